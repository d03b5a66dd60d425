use cedar_syntax::SyntaxKind::*;
use cedar_syntax::SyntaxSet;

use super::{
    DECLARATION_FIRST, SPECIFIER_QUALIFIERS, TYPE_KEYWORDS, delimited, exprs, name, stmts,
};
use crate::parser::{CompletedMarker, Parser};

pub(crate) fn translation_unit(p: &mut Parser) {
    let m = p.start();

    while !p.at(EOF) {
        item(p);
    }

    p.eof();
    m.complete(p, TRANSLATION_UNIT);
}

const ITEM_RECOVERY: SyntaxSet =
    DECLARATION_FIRST.union(&SyntaxSet::new([PREPROC, TYPEDEF_KW, SEMICOLON, RIGHT_BRACE]));

fn item(p: &mut Parser) {
    match p.peek_kind() {
        PREPROC => preproc(p),
        TYPEDEF_KW => type_definition(p),
        SEMICOLON => p.error_and_bump("expected a declaration"),
        NAME => declaration_or_function(p, true),
        kind if DECLARATION_FIRST.contains(kind) => declaration_or_function(p, true),
        _ => {
            // Glob a run of unparseable tokens into one error node.
            let m = p.start();
            p.error("expected a declaration");
            p.advance();
            while !p.at(EOF) && !p.at(NAME) && !p.at_any(&ITEM_RECOVERY) {
                p.advance();
            }
            m.complete(p, ERROR);
        }
    }
}

/// A whole `#` directive is one token; the node kind comes from the
/// directive name that follows the `#`.
pub(crate) fn preproc(p: &mut Parser) {
    let kind = match directive_name(p.peek_text()) {
        "include" => PREPROC_INCLUDE,
        "define" => PREPROC_DEFINE,
        "if" | "ifdef" | "ifndef" | "elif" | "else" | "endif" => PREPROC_IF,
        _ => PREPROC_DIRECTIVE,
    };

    let m = p.start();
    p.advance();
    m.complete(p, kind);
}

fn directive_name(text: &str) -> &str {
    let text = text[1..].trim_start();
    let end = text.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(text.len());
    &text[..end]
}

pub(crate) fn type_definition(p: &mut Parser) {
    let m = p.start();
    p.advance();
    declaration_specifiers(p);

    if at_declarator_start(p) {
        let _ = declarator(p);
        while p.eat(COMMA) {
            if !at_declarator_start(p) {
                p.error_recover("expected a declarator", &ITEM_RECOVERY);
                break;
            }
            let _ = declarator(p);
        }
    } else {
        p.error_recover("expected a declarator", &ITEM_RECOVERY);
    }

    p.expect(SEMICOLON);
    m.complete(p, TYPE_DEFINITION);
}

/// Parses a declaration, or a function definition when a `{` body follows
/// the first declarator. The two are told apart only at that point; the
/// specifier and declarator prefix is common to both.
pub(crate) fn declaration_or_function(p: &mut Parser, allow_function: bool) {
    let m = p.start();
    declaration_specifiers(p);

    if p.eat(SEMICOLON) {
        // e.g. `struct point { int x; int y; };`
        m.complete(p, DECLARATION);
        return;
    }

    if !at_declarator_start(p) {
        p.error_recover("expected a declarator", &ITEM_RECOVERY);
        p.eat(SEMICOLON);
        m.complete(p, DECLARATION);
        return;
    }

    let first = declarator(p);

    if allow_function && p.at(LEFT_BRACE) {
        stmts::compound_statement(p);
        m.complete(p, FUNCTION_DEFINITION);
        return;
    }

    init_declarator_rest(p, first);
    while p.eat(COMMA) {
        if !at_declarator_start(p) {
            p.error_recover("expected a declarator", &ITEM_RECOVERY);
            break;
        }
        let next = declarator(p);
        init_declarator_rest(p, next);
    }

    p.expect(SEMICOLON);
    m.complete(p, DECLARATION);
}

fn init_declarator_rest(p: &mut Parser, declarator: CompletedMarker) {
    if p.at_text("=") {
        let m = declarator.precede(p);
        p.advance();
        initializer(p);
        m.complete(p, INIT_DECLARATOR);
    }
}

/// Consumes storage classes, qualifiers, and type specifiers. A `NAME` is
/// taken as a typedef name only when no type specifier was seen yet and the
/// following tokens still look like a declarator.
pub(crate) fn declaration_specifiers(p: &mut Parser) {
    let mut saw_type = false;

    loop {
        match p.peek_kind() {
            kind if SPECIFIER_QUALIFIERS.contains(kind) => p.advance(),
            kind if TYPE_KEYWORDS.contains(kind) => {
                saw_type = true;
                p.advance();
            }
            STRUCT_KW | UNION_KW => {
                saw_type = true;
                struct_or_union_specifier(p);
            }
            ENUM_KW => {
                saw_type = true;
                enum_specifier(p);
            }
            NAME if !saw_type && at_typedef_name(p) => {
                saw_type = true;
                p.advance();
            }
            _ => break,
        }
    }
}

/// `a * b;` parses as a pointer declaration, not a multiplication. That is
/// the usual resolution of this ambiguity without a symbol table.
pub(crate) fn at_typedef_name(p: &mut Parser) -> bool {
    if !p.at(NAME) {
        return false;
    }

    match p.nth_kind(1) {
        NAME => true,
        OPERATOR => {
            p.nth_text(1) == "*" && matches!(p.nth_kind(2), NAME | OPERATOR | RIGHT_PAREN)
        }
        _ => false,
    }
}

fn struct_or_union_specifier(p: &mut Parser) {
    let kind = if p.at(STRUCT_KW) { STRUCT_SPECIFIER } else { UNION_SPECIFIER };

    let m = p.start();
    p.advance();
    if p.at(NAME) {
        name(p, &SyntaxSet::EMPTY);
    }
    if p.at(LEFT_BRACE) {
        field_list(p);
    }
    m.complete(p, kind);
}

fn field_list(p: &mut Parser) {
    let m = p.start();
    p.advance();

    while !p.at(RIGHT_BRACE) && !p.at(EOF) {
        match p.peek_kind() {
            PREPROC => preproc(p),
            NAME => field_declaration(p),
            kind if DECLARATION_FIRST.contains(kind) => field_declaration(p),
            _ => p.error_and_bump("expected a field declaration"),
        }
    }

    p.expect(RIGHT_BRACE);
    m.complete(p, FIELD_LIST);
}

fn field_declaration(p: &mut Parser) {
    let m = p.start();
    declaration_specifiers(p);

    if at_declarator_start(p) {
        let _ = declarator(p);
        loop {
            if p.eat_text(":") {
                exprs::expr(p);
            }
            if !p.eat(COMMA) {
                break;
            }
            if !at_declarator_start(p) {
                p.error_recover("expected a declarator", &ITEM_RECOVERY);
                break;
            }
            let _ = declarator(p);
        }
    } else if p.eat_text(":") {
        // Anonymous bit-field.
        exprs::expr(p);
    }

    p.expect(SEMICOLON);
    m.complete(p, FIELD_DECLARATION);
}

fn enum_specifier(p: &mut Parser) {
    let m = p.start();
    p.advance();
    if p.at(NAME) {
        name(p, &SyntaxSet::EMPTY);
    }
    if p.at(LEFT_BRACE) {
        enumerator_list(p);
    }
    m.complete(p, ENUM_SPECIFIER);
}

const ENUMERATOR_FIRST: SyntaxSet = SyntaxSet::new([NAME]);

fn enumerator_list(p: &mut Parser) {
    let m = p.start();
    delimited(p, LEFT_BRACE, RIGHT_BRACE, COMMA, "expected an enumerator", &ENUMERATOR_FIRST, |p| {
        if !p.at(NAME) {
            return false;
        }

        let m = p.start();
        name(p, &SyntaxSet::new([COMMA, RIGHT_BRACE]));
        if p.eat_text("=") {
            exprs::expr(p);
        }
        m.complete(p, ENUMERATOR);
        true
    });
    m.complete(p, ENUMERATOR_LIST);
}

pub(crate) fn at_declarator_start(p: &Parser) -> bool {
    p.at(NAME) || p.at(LEFT_PAREN) || p.at_text("*")
}

/// One declarator: pointer stars, a name or a parenthesized inner
/// declarator, then array and parameter-list suffixes.
pub(crate) fn declarator(p: &mut Parser) -> CompletedMarker {
    let m = p.start();

    while p.at_text("*") || p.at(CONST_KW) || p.at(VOLATILE_KW) {
        p.advance();
    }

    match p.peek_kind() {
        NAME => p.advance(),
        LEFT_PAREN => {
            p.advance();
            if at_declarator_start(p) {
                let _ = declarator(p);
            }
            p.expect(RIGHT_PAREN);
        }
        // Abstract declarators, as in `int f(int *)`, have no name.
        RIGHT_PAREN | COMMA | LEFT_BRACKET => {}
        _ => {
            p.error("expected a declarator");
            p.missing();
        }
    }

    loop {
        match p.peek_kind() {
            LEFT_PAREN => parameter_list(p),
            LEFT_BRACKET => {
                p.advance();
                if !p.at(RIGHT_BRACKET) {
                    exprs::expr(p);
                }
                p.expect(RIGHT_BRACKET);
            }
            _ => break,
        }
    }

    m.complete(p, DECLARATOR)
}

const PARAMETER_FIRST: SyntaxSet = DECLARATION_FIRST.union(&SyntaxSet::new([NAME]));

fn parameter_list(p: &mut Parser) {
    let m = p.start();
    delimited(p, LEFT_PAREN, RIGHT_PAREN, COMMA, "expected a parameter", &PARAMETER_FIRST, |p| {
        if p.at_text("...") {
            let m = p.start();
            p.advance();
            m.complete(p, PARAMETER);
            return true;
        }

        if !p.at_any(&PARAMETER_FIRST) {
            return false;
        }

        let m = p.start();
        declaration_specifiers(p);
        if at_declarator_start(p) {
            let _ = declarator(p);
        }
        m.complete(p, PARAMETER);
        true
    });
    m.complete(p, PARAMETER_LIST);
}

const INITIALIZER_FIRST: SyntaxSet =
    exprs::EXPR_FIRST.union(&SyntaxSet::new([LEFT_BRACE, LEFT_BRACKET]));

fn initializer(p: &mut Parser) {
    if p.at(LEFT_BRACE) {
        initializer_list(p);
    } else {
        exprs::expr(p);
    }
}

fn initializer_list(p: &mut Parser) {
    let m = p.start();
    delimited(
        p,
        LEFT_BRACE,
        RIGHT_BRACE,
        COMMA,
        "expected an initializer",
        &INITIALIZER_FIRST,
        initializer_element,
    );
    m.complete(p, INITIALIZER_LIST);
}

fn initializer_element(p: &mut Parser) -> bool {
    if p.at(LEFT_BRACE) {
        initializer_list(p);
        return true;
    }

    // Designators: `.field = value` and `[index] = value`.
    if p.at_text(".") || p.at(LEFT_BRACKET) {
        if p.eat_text(".") {
            if p.at(NAME) {
                p.advance();
            } else {
                p.error("expected a field name");
            }
        } else {
            p.advance();
            exprs::expr(p);
            p.expect(RIGHT_BRACKET);
        }
        p.expect_text("=");
        initializer(p);
        return true;
    }

    exprs::expr(p).is_some()
}
