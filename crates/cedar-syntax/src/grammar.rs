//! Immutable lexical grammar shared across parses.
//!
//! A `Grammar` is loaded once per language and injected into the tokenizer
//! and parser. It owns no state beyond static tables, so sharing it
//! read-only across threads is always safe.

use crate::SyntaxKind;

/// Static description of a language's lexical rules.
pub struct Grammar {
    /// Keyword table, sorted by text for binary search.
    keywords: &'static [(&'static str, SyntaxKind)],
    /// Operator table in declaration order. On equal-length matches the
    /// first declared entry wins.
    operators: &'static [&'static str],
}

impl Grammar {
    /// The C grammar.
    pub fn c() -> &'static Self {
        static C: Grammar = Grammar { keywords: C_KEYWORDS, operators: C_OPERATORS };
        &C
    }

    /// Looks up the keyword kind for `text`, if it is a keyword.
    pub fn keyword(&self, text: &str) -> Option<SyntaxKind> {
        let index = self.keywords.binary_search_by_key(&text, |&(kw, _)| kw).ok()?;
        Some(self.keywords[index].1)
    }

    /// Returns `true` if `c` can start an operator.
    pub fn is_operator_start(&self, c: char) -> bool {
        let mut buf = [0; 4];
        let c = &*c.encode_utf8(&mut buf);
        self.operators.iter().any(|op| op.starts_with(c))
    }

    /// Returns the longest operator that is a prefix of `rest`.
    ///
    /// Ties between equal-length rules are broken by declaration order,
    /// which the linear scan preserves.
    pub fn match_operator(&self, rest: &str) -> Option<&'static str> {
        let mut best: Option<&'static str> = None;
        for op in self.operators {
            if rest.starts_with(op) && best.is_none_or(|b| op.len() > b.len()) {
                best = Some(op);
            }
        }
        best
    }
}

static C_KEYWORDS: &[(&str, SyntaxKind)] = &[
    ("auto", SyntaxKind::AUTO_KW),
    ("break", SyntaxKind::BREAK_KW),
    ("case", SyntaxKind::CASE_KW),
    ("char", SyntaxKind::CHAR_KW),
    ("const", SyntaxKind::CONST_KW),
    ("continue", SyntaxKind::CONTINUE_KW),
    ("default", SyntaxKind::DEFAULT_KW),
    ("do", SyntaxKind::DO_KW),
    ("double", SyntaxKind::DOUBLE_KW),
    ("else", SyntaxKind::ELSE_KW),
    ("enum", SyntaxKind::ENUM_KW),
    ("extern", SyntaxKind::EXTERN_KW),
    ("float", SyntaxKind::FLOAT_KW),
    ("for", SyntaxKind::FOR_KW),
    ("goto", SyntaxKind::GOTO_KW),
    ("if", SyntaxKind::IF_KW),
    ("inline", SyntaxKind::INLINE_KW),
    ("int", SyntaxKind::INT_KW),
    ("long", SyntaxKind::LONG_KW),
    ("register", SyntaxKind::REGISTER_KW),
    ("return", SyntaxKind::RETURN_KW),
    ("short", SyntaxKind::SHORT_KW),
    ("signed", SyntaxKind::SIGNED_KW),
    ("sizeof", SyntaxKind::SIZEOF_KW),
    ("static", SyntaxKind::STATIC_KW),
    ("struct", SyntaxKind::STRUCT_KW),
    ("switch", SyntaxKind::SWITCH_KW),
    ("typedef", SyntaxKind::TYPEDEF_KW),
    ("union", SyntaxKind::UNION_KW),
    ("unsigned", SyntaxKind::UNSIGNED_KW),
    ("void", SyntaxKind::VOID_KW),
    ("volatile", SyntaxKind::VOLATILE_KW),
    ("while", SyntaxKind::WHILE_KW),
];

static C_OPERATORS: &[&str] = &[
    "<<=", ">>=", "...", "->", "++", "--", "<<", ">>", "<=", ">=", "==", "!=", "&&", "||", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "+", "-", "*", "/", "%", "<", ">", "=", "!", "&",
    "|", "^", "~", ".", "?", ":",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_sorted() {
        let grammar = Grammar::c();
        for window in grammar.keywords.windows(2) {
            assert!(window[0].0 < window[1].0, "{} >= {}", window[0].0, window[1].0);
        }
    }

    #[test]
    fn keyword_lookup() {
        let grammar = Grammar::c();
        assert_eq!(grammar.keyword("int"), Some(SyntaxKind::INT_KW));
        assert_eq!(grammar.keyword("while"), Some(SyntaxKind::WHILE_KW));
        assert_eq!(grammar.keyword("integer"), None);
        assert_eq!(grammar.keyword(""), None);
    }

    #[test]
    fn longest_operator_wins() {
        let grammar = Grammar::c();
        assert_eq!(grammar.match_operator("<<= 1"), Some("<<="));
        assert_eq!(grammar.match_operator("<< 1"), Some("<<"));
        assert_eq!(grammar.match_operator("< 1"), Some("<"));
        assert_eq!(grammar.match_operator("->next"), Some("->"));
        assert_eq!(grammar.match_operator("- x"), Some("-"));
        assert_eq!(grammar.match_operator("@"), None);
    }

    #[test]
    fn operator_start() {
        let grammar = Grammar::c();
        assert!(grammar.is_operator_start('+'));
        assert!(grammar.is_operator_start('.'));
        assert!(!grammar.is_operator_start('a'));
        assert!(!grammar.is_operator_start('#'));
    }
}
