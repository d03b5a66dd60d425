use cedar_syntax::SyntaxKind::{self, *};
use cedar_syntax::SyntaxSet;

use super::{DECLARATION_FIRST, exprs, items, name};
use crate::parser::Parser;

pub(crate) fn compound_statement(p: &mut Parser) {
    if !p.at(LEFT_BRACE) {
        p.error("expected a block");
        return;
    }

    let m = p.start();
    p.advance();

    while !p.at(RIGHT_BRACE) && !p.at(EOF) {
        statement(p);
    }

    p.expect(RIGHT_BRACE);
    m.complete(p, COMPOUND_STATEMENT);
}

fn statement(p: &mut Parser) {
    match p.peek_kind() {
        LEFT_BRACE => compound_statement(p),
        SEMICOLON => {
            let m = p.start();
            p.advance();
            m.complete(p, EXPRESSION_STATEMENT);
        }
        PREPROC => items::preproc(p),
        RETURN_KW => return_statement(p),
        IF_KW => if_statement(p),
        WHILE_KW => while_statement(p),
        DO_KW => do_statement(p),
        FOR_KW => for_statement(p),
        SWITCH_KW => switch_statement(p),
        CASE_KW | DEFAULT_KW => case_clause(p),
        BREAK_KW => terminated(p, BREAK_STATEMENT),
        CONTINUE_KW => terminated(p, CONTINUE_STATEMENT),
        GOTO_KW => goto_statement(p),
        TYPEDEF_KW => items::type_definition(p),
        NAME if at_label(p) => labeled_statement(p),
        NAME if items::at_typedef_name(p) => items::declaration_or_function(p, false),
        kind if DECLARATION_FIRST.contains(kind) => items::declaration_or_function(p, false),
        _ => expression_statement(p),
    }
}

fn at_label(p: &mut Parser) -> bool {
    p.nth_kind(1) == OPERATOR && p.nth_text(1) == ":"
}

fn expression_statement(p: &mut Parser) {
    match exprs::expr(p) {
        Some(expr) => {
            let m = expr.precede(p);
            p.expect(SEMICOLON);
            m.complete(p, EXPRESSION_STATEMENT);
        }
        None => {
            // The error is already reported; keep the statement loop moving.
            if !p.eat(SEMICOLON) && !matches!(p.peek_kind(), RIGHT_BRACE | EOF) {
                let m = p.start();
                p.advance();
                m.complete(p, ERROR);
            }
        }
    }
}

fn return_statement(p: &mut Parser) {
    let m = p.start();
    p.advance();
    if !p.at(SEMICOLON) {
        exprs::expr(p);
    }
    p.expect(SEMICOLON);
    m.complete(p, RETURN_STATEMENT);
}

fn terminated(p: &mut Parser, kind: SyntaxKind) {
    let m = p.start();
    p.advance();
    p.expect(SEMICOLON);
    m.complete(p, kind);
}

fn goto_statement(p: &mut Parser) {
    let m = p.start();
    p.advance();
    name(p, &SyntaxSet::new([SEMICOLON]));
    p.expect(SEMICOLON);
    m.complete(p, GOTO_STATEMENT);
}

/// Exactly the parenthesized group; the condition ends at the `)`, so the
/// statement after it is never pulled into the expression.
fn condition(p: &mut Parser) {
    if !p.at(LEFT_PAREN) {
        p.error("expected `(`");
        return;
    }

    let m = p.start();
    p.advance();
    exprs::expr(p);
    p.expect(RIGHT_PAREN);
    m.complete(p, PAREN_EXPR);
}

fn if_statement(p: &mut Parser) {
    let m = p.start();
    p.advance();
    condition(p);
    statement(p);
    if p.eat(ELSE_KW) {
        statement(p);
    }
    m.complete(p, IF_STATEMENT);
}

fn while_statement(p: &mut Parser) {
    let m = p.start();
    p.advance();
    condition(p);
    statement(p);
    m.complete(p, WHILE_STATEMENT);
}

fn do_statement(p: &mut Parser) {
    let m = p.start();
    p.advance();
    statement(p);
    p.expect(WHILE_KW);
    condition(p);
    p.expect(SEMICOLON);
    m.complete(p, DO_STATEMENT);
}

fn for_statement(p: &mut Parser) {
    let m = p.start();
    p.advance();
    p.expect(LEFT_PAREN);

    if p.eat(SEMICOLON) {
        // Empty init clause.
    } else if p.at_any(&DECLARATION_FIRST) || items::at_typedef_name(p) {
        // The declaration consumes its own `;`.
        items::declaration_or_function(p, false);
    } else {
        exprs::expr(p);
        p.expect(SEMICOLON);
    }

    if !p.at(SEMICOLON) {
        exprs::expr(p);
    }
    p.expect(SEMICOLON);

    if !p.at(RIGHT_PAREN) {
        exprs::expr(p);
    }
    p.expect(RIGHT_PAREN);

    statement(p);
    m.complete(p, FOR_STATEMENT);
}

fn switch_statement(p: &mut Parser) {
    let m = p.start();
    p.advance();
    condition(p);
    statement(p);
    m.complete(p, SWITCH_STATEMENT);
}

/// `case expr:` and `default:`; the clause body statements stay siblings.
fn case_clause(p: &mut Parser) {
    let m = p.start();
    if p.eat(CASE_KW) {
        exprs::expr(p);
    } else {
        p.advance();
    }
    p.expect_text(":");
    m.complete(p, CASE_CLAUSE);
}

fn labeled_statement(p: &mut Parser) {
    let m = p.start();
    name(p, &SyntaxSet::EMPTY);
    p.advance();
    statement(p);
    m.complete(p, LABELED_STATEMENT);
}
