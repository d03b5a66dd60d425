//! Grammar-driven tokenizer for C-like source text.
//!
//! Tokenization is a pure function of the input text and the injected
//! `Grammar`: no state survives between calls, and the token stream always
//! covers the whole input. Bytes matching no lexical rule become one-char
//! `UNKNOWN` tokens, so the tokenizer makes progress on any input.

mod cursor;

pub use cedar_syntax::SyntaxKind;
use cedar_syntax::SyntaxKind::*;
use cedar_syntax::{Grammar, GreenTrivia, TriviaPiece, TriviaPieceKind};
use cursor::{Cursor, EOF_CHAR};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone)]
pub struct Token {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: GreenTrivia,
}

impl Token {
    const EOF: Self = Self {
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        leading: GreenTrivia::empty(),
        trailing: GreenTrivia::empty(),
    };
}

pub struct Tokenizer<'db> {
    text: &'db str,
    grammar: &'db Grammar,
    cursor: Cursor<'db>,
    current: Token,
    trivia_pieces: Vec<TriviaPiece>,
}

impl<'db> Tokenizer<'db> {
    pub fn new(text: &'db str, grammar: &'db Grammar) -> Self {
        let mut tokenizer = Self {
            text,
            grammar,
            cursor: Cursor::new(text),
            current: Token::EOF,
            trivia_pieces: Vec::with_capacity(4),
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        let len = self.cursor.pos_within_token();
        TextRange::at(end - len, len)
    }

    fn text(&self) -> &'db str {
        let range: std::ops::Range<usize> = self.range().into();
        &self.text[range]
    }

    pub fn next_token(&mut self) -> Token {
        self.trivia();
        let trailing_start = self.trivia_pieces.len();
        let (kind, kind_range) = self.syntax_kind();
        self.trivia();

        let (leading, trailing) = self.trivia_pieces.split_at(trailing_start);
        let leading = GreenTrivia::new(leading);
        let trailing = GreenTrivia::new(trailing);

        self.trivia_pieces.clear();
        std::mem::replace(&mut self.current, Token { leading, kind, kind_range, trailing })
    }

    fn trivia(&mut self) {
        loop {
            let kind = match self.cursor.peek() {
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| c != '\n');
                    TriviaPieceKind::SingleLineComment
                }
                '/' if self.cursor.second() == '*' => {
                    self.block_comment();
                    TriviaPieceKind::BlockComment
                }
                first_char => {
                    if first_char.is_whitespace() {
                        self.cursor.advance_while(char::is_whitespace);
                        TriviaPieceKind::Whitespace
                    } else {
                        break;
                    }
                }
            };

            self.trivia_pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }
    }

    /// Consumes `/* ... */`; an unterminated comment runs to end of input.
    fn block_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();
        loop {
            match self.cursor.peek() {
                EOF_CHAR if self.cursor.is_eof() => break,
                '*' if self.cursor.second() == '/' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    break;
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        if self.cursor.is_eof() {
            let range = self.range();
            self.cursor.reset_pos_within_token();
            return (EOF, range);
        }

        let rest = self.cursor.rest();

        let kind = match self.cursor.advance() {
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ';' => SEMICOLON,
            ',' => COMMA,
            '#' => self.preproc(),
            '"' => self.string('"'),
            '\'' => self.string('\''),
            '.' if self.cursor.peek().is_ascii_digit() => {
                self.digits(false);
                self.float_exponent();
                self.number_suffix();
                FLOAT_NUMBER
            }
            first_char @ '0'..='9' => self.number(first_char),
            'A'..='Z' | 'a'..='z' | '_' => {
                self.cursor.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
                self.grammar.keyword(self.text()).unwrap_or(NAME)
            }
            c if self.grammar.is_operator_start(c) => match self.grammar.match_operator(rest) {
                Some(op) => {
                    // Operators are ASCII, so byte length equals char count.
                    for _ in 1..op.len() {
                        self.cursor.advance();
                    }
                    OPERATOR
                }
                None => UNKNOWN,
            },
            _ => UNKNOWN,
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range)
    }

    /// Consumes a `#` directive to the end of the line, honoring backslash
    /// line continuations.
    fn preproc(&mut self) -> SyntaxKind {
        loop {
            match self.cursor.peek() {
                EOF_CHAR if self.cursor.is_eof() => break,
                '\n' => break,
                '\\' if self.cursor.second() == '\n' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                '\\' if self.cursor.second() == '\r' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    if self.cursor.matches('\n') {
                        self.cursor.advance();
                    }
                }
                _ => {
                    self.cursor.advance();
                }
            }
        }
        PREPROC
    }

    /// Consumes a string or character literal with escape sequences. An
    /// unterminated literal ends at the line break or end of input.
    fn string(&mut self, quote: char) -> SyntaxKind {
        loop {
            match self.cursor.peek() {
                EOF_CHAR if self.cursor.is_eof() => break,
                '\n' => break,
                '\\' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                c => {
                    self.cursor.advance();
                    if c == quote {
                        break;
                    }
                }
            }
        }
        if quote == '"' { STRING } else { CHAR }
    }

    fn number(&mut self, c: char) -> SyntaxKind {
        if c == '0' && (self.cursor.matches('x') || self.cursor.matches('X')) {
            self.cursor.advance();
            self.digits(true);
            self.number_suffix();
            return INT_NUMBER;
        }

        self.digits(false);

        if self.cursor.matches('.') && self.cursor.second() != '.' {
            self.cursor.advance();
            self.digits(false);
            self.float_exponent();
            self.number_suffix();
            return FLOAT_NUMBER;
        }

        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.float_exponent();
            self.number_suffix();
            return FLOAT_NUMBER;
        }

        self.number_suffix();
        INT_NUMBER
    }

    fn digits(&mut self, allow_hex: bool) {
        loop {
            match self.cursor.peek() {
                '0'..='9' => {
                    self.cursor.advance();
                }
                'a'..='f' | 'A'..='F' if allow_hex => {
                    self.cursor.advance();
                }
                _ => return,
            }
        }
    }

    fn float_exponent(&mut self) {
        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.cursor.advance();
            if self.cursor.matches('-') || self.cursor.matches('+') {
                self.cursor.advance();
            }
            self.digits(false);
        }
    }

    /// Consumes integer and float suffixes (`u`, `l`, `f` in any case).
    fn number_suffix(&mut self) {
        self.cursor.advance_while(|c| matches!(c, 'u' | 'U' | 'l' | 'L' | 'f' | 'F'));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_text<'a>(token: &Token, text: &'a str) -> &'a str {
        &text[token.kind_range]
    }

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let mut tokenizer = Tokenizer::new(text, Grammar::c());
        let mut kinds = Vec::new();
        loop {
            let token = tokenizer.next_token();
            if token.kind == EOF {
                return kinds;
            }
            kinds.push(token.kind);
        }
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let inputs = vec![
            ("int", INT_KW),
            ("while", WHILE_KW),
            ("sizeof", SIZEOF_KW),
            ("typedef", TYPEDEF_KW),
            ("integer", NAME),
            ("_start", NAME),
            ("x86_64", NAME),
        ];

        for (input, expected_kind) in inputs {
            let mut tokenizer = Tokenizer::new(input, Grammar::c());
            let token = tokenizer.next_token();
            assert_eq!(token.kind, expected_kind, "Input: '{input}'");
            assert_eq!(token_text(&token, input), input);
        }
    }

    #[test]
    fn test_integer_literals() {
        let inputs = vec![
            ("123", INT_NUMBER),
            ("0", INT_NUMBER),
            ("0x1f", INT_NUMBER),
            ("0X2B", INT_NUMBER),
            ("0755", INT_NUMBER),
            ("42u", INT_NUMBER),
            ("42UL", INT_NUMBER),
        ];

        for (input, expected_kind) in inputs {
            let mut tokenizer = Tokenizer::new(input, Grammar::c());
            let token = tokenizer.next_token();
            assert_eq!(token.kind, expected_kind, "Input: '{input}'");
            assert_eq!(token_text(&token, input), input, "did not consume all of '{input}'");
        }
    }

    #[test]
    fn test_float_literals() {
        let inputs = vec![
            ("123.456", FLOAT_NUMBER),
            ("0.0", FLOAT_NUMBER),
            ("1e10", FLOAT_NUMBER),
            ("1.0e-5", FLOAT_NUMBER),
            (".5", FLOAT_NUMBER),
            ("1.5f", FLOAT_NUMBER),
        ];

        for (input, expected_kind) in inputs {
            let mut tokenizer = Tokenizer::new(input, Grammar::c());
            let token = tokenizer.next_token();
            assert_eq!(token.kind, expected_kind, "Input: '{input}'");
            assert_eq!(token_text(&token, input), input, "did not consume all of '{input}'");
        }
    }

    #[test]
    fn test_string_literals() {
        let text = r#""hello \"world\"" 'x' '\n'"#;
        let mut tokenizer = Tokenizer::new(text, Grammar::c());

        let token = tokenizer.next_token();
        assert_eq!(token.kind, STRING);
        assert_eq!(token_text(&token, text), r#""hello \"world\"""#);

        let token = tokenizer.next_token();
        assert_eq!(token.kind, CHAR);
        assert_eq!(token_text(&token, text), "'x'");

        let token = tokenizer.next_token();
        assert_eq!(token.kind, CHAR);
        assert_eq!(token_text(&token, text), r"'\n'");
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let text = "\"oops\nint";
        let mut tokenizer = Tokenizer::new(text, Grammar::c());

        let token = tokenizer.next_token();
        assert_eq!(token.kind, STRING);
        assert_eq!(token_text(&token, text), "\"oops");

        let token = tokenizer.next_token();
        assert_eq!(token.kind, INT_KW);
    }

    #[test]
    fn test_longest_operator_match() {
        let text = "a <<= b";
        let mut tokenizer = Tokenizer::new(text, Grammar::c());

        assert_eq!(tokenizer.next_token().kind, NAME);
        let token = tokenizer.next_token();
        assert_eq!(token.kind, OPERATOR);
        assert_eq!(token_text(&token, text), "<<=");
        assert_eq!(tokenizer.next_token().kind, NAME);
        assert_eq!(tokenizer.next_token().kind, EOF);
    }

    #[test]
    fn test_arrow_and_increment_operators() {
        let text = "p->count++";
        let mut tokenizer = Tokenizer::new(text, Grammar::c());

        assert_eq!(tokenizer.next_token().kind, NAME);
        let token = tokenizer.next_token();
        assert_eq!(token.kind, OPERATOR);
        assert_eq!(token_text(&token, text), "->");
        assert_eq!(tokenizer.next_token().kind, NAME);
        let token = tokenizer.next_token();
        assert_eq!(token.kind, OPERATOR);
        assert_eq!(token_text(&token, text), "++");
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("f(a, b[0]);"),
            vec![
                NAME,
                LEFT_PAREN,
                NAME,
                COMMA,
                NAME,
                LEFT_BRACKET,
                INT_NUMBER,
                RIGHT_BRACKET,
                RIGHT_PAREN,
                SEMICOLON,
            ]
        );
    }

    #[test]
    fn test_preproc_directive_is_one_token() {
        let text = "#include <stdio.h>\nint x;";
        let mut tokenizer = Tokenizer::new(text, Grammar::c());

        let token = tokenizer.next_token();
        assert_eq!(token.kind, PREPROC);
        assert_eq!(token_text(&token, text), "#include <stdio.h>");

        assert_eq!(tokenizer.next_token().kind, INT_KW);
    }

    #[test]
    fn test_preproc_line_continuation() {
        let text = "#define MAX(a, b) \\\n    ((a) > (b) ? (a) : (b))\nint x;";
        let mut tokenizer = Tokenizer::new(text, Grammar::c());

        let token = tokenizer.next_token();
        assert_eq!(token.kind, PREPROC);
        assert!(token_text(&token, text).ends_with("(b))"));

        assert_eq!(tokenizer.next_token().kind, INT_KW);
    }

    #[test]
    fn test_comments_are_trivia() {
        let text = "int x; // trailing\n/* leading */ int y;";
        let mut tokenizer = Tokenizer::new(text, Grammar::c());

        assert_eq!(tokenizer.next_token().kind, INT_KW);
        assert_eq!(tokenizer.next_token().kind, NAME);

        let semicolon = tokenizer.next_token();
        assert_eq!(semicolon.kind, SEMICOLON);
        let trailing: Vec<_> = semicolon.trailing.pieces().to_vec();
        assert!(
            trailing.iter().any(|piece| piece.kind == TriviaPieceKind::SingleLineComment),
            "expected the line comment in trailing trivia, got {trailing:?}"
        );
        assert!(
            trailing.iter().any(|piece| piece.kind == TriviaPieceKind::BlockComment),
            "expected the block comment in trailing trivia, got {trailing:?}"
        );

        assert_eq!(tokenizer.next_token().kind, INT_KW);
        assert_eq!(tokenizer.next_token().kind, NAME);
        assert_eq!(tokenizer.next_token().kind, SEMICOLON);
        assert_eq!(tokenizer.next_token().kind, EOF);
    }

    #[test]
    fn test_leading_trivia_at_file_start() {
        let text = "  /* header */\nint x;";
        let mut tokenizer = Tokenizer::new(text, Grammar::c());

        let token = tokenizer.next_token();
        assert_eq!(token.kind, INT_KW);
        assert_eq!(token.leading.pieces().len(), 3);
        assert_eq!(u32::from(token.leading.len()), 15);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let text = "int /* oops";
        let mut tokenizer = Tokenizer::new(text, Grammar::c());

        let token = tokenizer.next_token();
        assert_eq!(token.kind, INT_KW);
        assert!(
            token.trailing.pieces().iter().any(|p| p.kind == TriviaPieceKind::BlockComment),
            "unterminated comment should still be trivia"
        );
        assert_eq!(tokenizer.next_token().kind, EOF);
    }

    #[test]
    fn test_unknown_bytes_make_progress() {
        assert_eq!(kinds("@$`"), vec![UNKNOWN, UNKNOWN, UNKNOWN]);
        assert_eq!(kinds("a @ b"), vec![NAME, UNKNOWN, NAME]);
    }

    #[test]
    fn test_empty_input() {
        let mut tokenizer = Tokenizer::new("", Grammar::c());
        let token = tokenizer.next_token();
        assert_eq!(token.kind, EOF);
        assert_eq!(token.kind_range, TextRange::empty(0.into()));
    }

    #[test]
    fn test_nul_byte_is_unknown_not_eof() {
        assert_eq!(kinds("int x;\0"), vec![INT_KW, NAME, SEMICOLON, UNKNOWN]);

        let mut tokenizer = Tokenizer::new("\0", Grammar::c());
        let token = tokenizer.next_token();
        assert_eq!(token.kind, UNKNOWN);
        assert_eq!(token.kind_range, TextRange::new(0.into(), 1.into()));

        let eof = tokenizer.next_token();
        assert_eq!(eof.kind, EOF);
        assert_eq!(eof.kind_range, TextRange::empty(1.into()));
    }

    #[test]
    fn test_same_input_same_tokens() {
        let text = "static int add(int a, int b) { return a + b; }";
        let first = kinds(text);
        let second = kinds(text);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
