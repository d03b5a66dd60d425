use cedar_syntax::SyntaxKind::{self, *};
use cedar_syntax::SyntaxSet;

use crate::parser::Parser;

mod exprs;
pub(crate) mod items;
mod stmts;

pub(crate) use items::translation_unit;

/// Storage classes and qualifiers that may prefix any declaration.
const SPECIFIER_QUALIFIERS: SyntaxSet = SyntaxSet::new([
    AUTO_KW,
    CONST_KW,
    EXTERN_KW,
    INLINE_KW,
    REGISTER_KW,
    STATIC_KW,
    VOLATILE_KW,
]);

const TYPE_KEYWORDS: SyntaxSet = SyntaxSet::new([
    CHAR_KW,
    DOUBLE_KW,
    FLOAT_KW,
    INT_KW,
    LONG_KW,
    SHORT_KW,
    SIGNED_KW,
    UNSIGNED_KW,
    VOID_KW,
]);

const COMPOSITE_KEYWORDS: SyntaxSet = SyntaxSet::new([ENUM_KW, STRUCT_KW, UNION_KW]);

/// Tokens that can begin a declaration, not counting typedef names.
pub(crate) const DECLARATION_FIRST: SyntaxSet =
    SPECIFIER_QUALIFIERS.union(&TYPE_KEYWORDS).union(&COMPOSITE_KEYWORDS);

pub(crate) fn name(p: &mut Parser, recovery: &SyntaxSet) {
    match p.peek_kind() {
        NAME => {
            let m = p.start();
            p.advance();
            m.complete(p, IDENT);
        }
        _ => p.error_recover("expected identifier", recovery),
    }
}

pub(crate) fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    delim: SyntaxKind,
    unexpected_delim_message: &'static str,
    first_set: &SyntaxSet,
    mut parser: impl FnMut(&mut Parser<'_>) -> bool,
) {
    debug_assert_eq!(p.peek_kind(), bra);
    p.advance();

    while !p.at(ket) && !p.at(EOF) {
        if p.at(delim) {
            let m = p.start();
            p.error(unexpected_delim_message);
            p.advance();
            m.complete(p, ERROR);
            continue;
        }

        if !parser(p) {
            break;
        }

        if !p.eat(delim) {
            if first_set.contains(p.peek_kind()) {
                p.expect(delim);
            } else {
                break;
            }
        }
    }

    p.expect(ket);
}
