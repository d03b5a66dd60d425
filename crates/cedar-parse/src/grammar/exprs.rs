use cedar_syntax::SyntaxKind::*;
use cedar_syntax::SyntaxSet;

use super::{DECLARATION_FIRST, delimited, items};
use crate::parser::{CompletedMarker, Parser};

pub(crate) const EXPR_FIRST: SyntaxSet =
    SyntaxSet::new([NAME, INT_NUMBER, FLOAT_NUMBER, STRING, CHAR, LEFT_PAREN, SIZEOF_KW, OPERATOR]);

const EXPR_RECOVERY: SyntaxSet =
    SyntaxSet::new([SEMICOLON, COMMA, RIGHT_PAREN, RIGHT_BRACKET, RIGHT_BRACE, LEFT_BRACE]);

pub(crate) fn expr(p: &mut Parser) -> Option<CompletedMarker> {
    expr_bp(p, 1)
}

fn expr_bp(p: &mut Parser, min_bp: u8) -> Option<CompletedMarker> {
    let mut lhs = unary_expr(p)?;

    loop {
        if p.at_text("?") {
            if TERNARY_BP < min_bp {
                break;
            }

            let m = lhs.precede(p);
            p.advance();
            expr_bp(p, 1);
            p.expect_text(":");
            expr_bp(p, TERNARY_BP - 1);
            lhs = m.complete(p, TERNARY_EXPR);
            continue;
        }

        if !p.at(OPERATOR) {
            break;
        }
        let Some((left_bp, right_bp)) = binary_binding_power(p.peek_text()) else {
            break;
        };
        if left_bp < min_bp {
            break;
        }

        let m = lhs.precede(p);
        p.advance();
        expr_bp(p, right_bp);
        lhs = m.complete(p, BINARY_EXPR);
    }

    Some(lhs)
}

const TERNARY_BP: u8 = 4;

/// C precedence from assignment up to multiplicative. Assignment is
/// right-associative, the rest are left-associative.
fn binary_binding_power(op: &str) -> Option<(u8, u8)> {
    let bp = match op {
        "=" | "+=" | "-=" | "*=" | "/=" | "%=" | "<<=" | ">>=" | "&=" | "|=" | "^=" => (2, 1),
        "||" => (5, 6),
        "&&" => (7, 8),
        "|" => (9, 10),
        "^" => (11, 12),
        "&" => (13, 14),
        "==" | "!=" => (15, 16),
        "<" | "<=" | ">" | ">=" => (17, 18),
        "<<" | ">>" => (19, 20),
        "+" | "-" => (21, 22),
        "*" | "/" | "%" => (23, 24),
        _ => return None,
    };

    Some(bp)
}

fn unary_expr(p: &mut Parser) -> Option<CompletedMarker> {
    if p.at(SIZEOF_KW) {
        return Some(sizeof_expr(p));
    }

    if p.at(OPERATOR) && matches!(p.peek_text(), "-" | "+" | "!" | "~" | "*" | "&" | "++" | "--") {
        let m = p.start();
        p.advance();
        unary_expr(p);
        return Some(m.complete(p, PREFIX_EXPR));
    }

    let lhs = primary_expr(p)?;
    Some(postfix_expr(p, lhs))
}

fn sizeof_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.advance();

    if p.eat(LEFT_PAREN) {
        if at_type_name(p) {
            type_name(p);
        } else {
            expr(p);
        }
        p.expect(RIGHT_PAREN);
    } else {
        unary_expr(p);
    }

    m.complete(p, SIZEOF_EXPR)
}

fn postfix_expr(p: &mut Parser, mut lhs: CompletedMarker) -> CompletedMarker {
    loop {
        lhs = match p.peek_kind() {
            LEFT_PAREN => {
                let m = lhs.precede(p);
                argument_list(p);
                m.complete(p, CALL_EXPR)
            }
            LEFT_BRACKET => {
                let m = lhs.precede(p);
                p.advance();
                expr(p);
                p.expect(RIGHT_BRACKET);
                m.complete(p, INDEX_EXPR)
            }
            OPERATOR if matches!(p.peek_text(), "." | "->") => {
                let m = lhs.precede(p);
                p.advance();
                if p.at(NAME) {
                    p.advance();
                } else {
                    p.error("expected a field name");
                    p.missing();
                }
                m.complete(p, FIELD_EXPR)
            }
            OPERATOR if matches!(p.peek_text(), "++" | "--") => {
                let m = lhs.precede(p);
                p.advance();
                m.complete(p, POSTFIX_EXPR)
            }
            _ => break,
        };
    }

    lhs
}

fn primary_expr(p: &mut Parser) -> Option<CompletedMarker> {
    match p.peek_kind() {
        INT_NUMBER | FLOAT_NUMBER | CHAR => {
            let m = p.start();
            p.advance();
            Some(m.complete(p, LITERAL))
        }
        STRING => {
            let m = p.start();
            // Adjacent string literals concatenate.
            while p.at(STRING) {
                p.advance();
            }
            Some(m.complete(p, LITERAL))
        }
        NAME => {
            let m = p.start();
            p.advance();
            Some(m.complete(p, IDENT))
        }
        LEFT_PAREN => Some(paren_or_cast_expr(p)),
        _ => {
            p.error_recover("expected an expression", &EXPR_RECOVERY);
            None
        }
    }
}

fn paren_or_cast_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.advance();

    if at_type_name(p) {
        type_name(p);
        p.expect(RIGHT_PAREN);
        unary_expr(p);
        return m.complete(p, CAST_EXPR);
    }

    expr(p);
    p.expect(RIGHT_PAREN);
    m.complete(p, PAREN_EXPR)
}

/// `(mytype *)` is taken as a type name, `(x)` as an expression. A bare
/// `NAME` in parentheses never counts as a type; pointer stars tip the
/// balance.
fn at_type_name(p: &mut Parser) -> bool {
    let kind = p.peek_kind();
    if DECLARATION_FIRST.contains(kind) {
        return true;
    }

    kind == NAME
        && p.nth_kind(1) == OPERATOR
        && p.nth_text(1) == "*"
        && matches!(p.nth_kind(2), RIGHT_PAREN | OPERATOR)
}

/// An abstract type, as written in casts and `sizeof`: specifiers, pointer
/// stars, array suffixes, no declarator name.
fn type_name(p: &mut Parser) {
    items::declaration_specifiers(p);

    while p.at_text("*") || p.at(CONST_KW) || p.at(VOLATILE_KW) {
        p.advance();
    }

    while p.at(LEFT_BRACKET) {
        p.advance();
        if !p.at(RIGHT_BRACKET) {
            expr(p);
        }
        p.expect(RIGHT_BRACKET);
    }
}

fn argument_list(p: &mut Parser) {
    let m = p.start();
    delimited(p, LEFT_PAREN, RIGHT_PAREN, COMMA, "expected an argument", &EXPR_FIRST, |p| {
        expr(p).is_some()
    });
    m.complete(p, ARGUMENT_LIST);
}
