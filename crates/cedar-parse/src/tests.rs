use cedar_syntax::{Grammar, SyntaxKind, WalkEvent};
use expect_test::{Expect, expect};

use crate::translation_unit;

fn check(input: &str, expect: Expect) {
    let parse = translation_unit(input, Grammar::c());
    expect.assert_eq(&parse.debug_tree());
}

fn check_no_diagnostics(input: &str) {
    let parse = translation_unit(input, Grammar::c());
    assert!(
        parse.diagnostics().is_empty(),
        "unexpected diagnostics for {input:?}: {:?}",
        parse.diagnostics()
    );
}

#[test]
fn empty_file() {
    check(
        "",
        expect![[r#"
            TRANSLATION_UNIT@0..0
              EOF@0..0 ""
        "#]],
    );
}

#[test]
fn trivia_only_file_is_covered_by_eof() {
    check(
        " \n// tail\n",
        expect![[r#"
            TRANSLATION_UNIT@0..10
              EOF@10..10 ""
        "#]],
    );
}

#[test]
fn simple_declaration() {
    check(
        "int x;\n",
        expect![[r#"
            TRANSLATION_UNIT@0..7
              DECLARATION@0..7
                INT_KW@0..3 "int"
                DECLARATOR@4..5
                  NAME@4..5 "x"
                SEMICOLON@5..6 ";"
              EOF@7..7 ""
        "#]],
    );
}

#[test]
fn function_definition() {
    check(
        "int main(void) {\n    return 0;\n}\n",
        expect![[r#"
            TRANSLATION_UNIT@0..33
              FUNCTION_DEFINITION@0..33
                INT_KW@0..3 "int"
                DECLARATOR@4..15
                  NAME@4..8 "main"
                  PARAMETER_LIST@8..15
                    LEFT_PAREN@8..9 "("
                    PARAMETER@9..13
                      VOID_KW@9..13 "void"
                    RIGHT_PAREN@13..14 ")"
                COMPOUND_STATEMENT@15..33
                  LEFT_BRACE@15..16 "{"
                  RETURN_STATEMENT@21..31
                    RETURN_KW@21..27 "return"
                    LITERAL@28..29
                      INT_NUMBER@28..29 "0"
                    SEMICOLON@29..30 ";"
                  RIGHT_BRACE@31..32 "}"
              EOF@33..33 ""
        "#]],
    );
}

#[test]
fn preproc_include_kind_comes_from_directive_name() {
    check(
        "#include <stdio.h>\nint x;\n",
        expect![[r##"
            TRANSLATION_UNIT@0..26
              PREPROC_INCLUDE@0..19
                PREPROC@0..18 "#include <stdio.h>"
              DECLARATION@19..26
                INT_KW@19..22 "int"
                DECLARATOR@23..24
                  NAME@23..24 "x"
                SEMICOLON@24..25 ";"
              EOF@26..26 ""
        "##]],
    );
}

#[test]
fn binary_expression_precedence() {
    check(
        "int x = 1 + 2 * 3;\n",
        expect![[r#"
            TRANSLATION_UNIT@0..19
              DECLARATION@0..19
                INT_KW@0..3 "int"
                INIT_DECLARATOR@4..17
                  DECLARATOR@4..6
                    NAME@4..5 "x"
                  OPERATOR@6..7 "="
                  BINARY_EXPR@8..17
                    LITERAL@8..10
                      INT_NUMBER@8..9 "1"
                    OPERATOR@10..11 "+"
                    BINARY_EXPR@12..17
                      LITERAL@12..14
                        INT_NUMBER@12..13 "2"
                      OPERATOR@14..15 "*"
                      LITERAL@16..17
                        INT_NUMBER@16..17 "3"
                SEMICOLON@17..18 ";"
              EOF@19..19 ""
        "#]],
    );
}

#[test]
fn struct_declaration() {
    check(
        "struct point { int x; int y; };\n",
        expect![[r#"
            TRANSLATION_UNIT@0..32
              DECLARATION@0..32
                STRUCT_SPECIFIER@0..30
                  STRUCT_KW@0..6 "struct"
                  IDENT@7..13
                    NAME@7..12 "point"
                  FIELD_LIST@13..30
                    LEFT_BRACE@13..14 "{"
                    FIELD_DECLARATION@15..22
                      INT_KW@15..18 "int"
                      DECLARATOR@19..20
                        NAME@19..20 "x"
                      SEMICOLON@20..21 ";"
                    FIELD_DECLARATION@22..29
                      INT_KW@22..25 "int"
                      DECLARATOR@26..27
                        NAME@26..27 "y"
                      SEMICOLON@27..28 ";"
                    RIGHT_BRACE@29..30 "}"
                SEMICOLON@30..31 ";"
              EOF@32..32 ""
        "#]],
    );
}

#[test]
fn missing_semicolon_yields_missing_token() {
    check(
        "int x\n",
        expect![[r#"
            TRANSLATION_UNIT@0..6
              DECLARATION@0..6
                INT_KW@0..3 "int"
                DECLARATOR@4..6
                  NAME@4..5 "x"
                MISSING@6..6 ""
              EOF@6..6 ""
        "#]],
    );

    let parse = translation_unit("int x\n", Grammar::c());
    assert_eq!(parse.diagnostics().len(), 1);
    assert_eq!(parse.diagnostics()[0].message(), "expected `;`");
}

#[test]
fn garbage_globs_into_one_error_node() {
    check(
        "@ $\nint y;\n",
        expect![[r#"
            TRANSLATION_UNIT@0..11
              ERROR@0..4
                UNKNOWN@0..1 "@"
                UNKNOWN@2..3 "$"
              DECLARATION@4..11
                INT_KW@4..7 "int"
                DECLARATOR@8..9
                  NAME@8..9 "y"
                SEMICOLON@9..10 ";"
              EOF@11..11 ""
        "#]],
    );
}

#[test]
fn two_independent_declarations() {
    let parse = translation_unit("int a;\nint b;\n", Grammar::c());
    let kinds: Vec<SyntaxKind> = parse.tree().root().children().map(|node| node.kind()).collect();
    assert_eq!(kinds, [SyntaxKind::DECLARATION, SyntaxKind::DECLARATION]);
    assert!(parse.diagnostics().is_empty());
}

#[test]
fn comma_separated_declarators() {
    let parse = translation_unit("int a = 1, b = 2, *c;\n", Grammar::c());
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());

    let declaration = parse.tree().root().children().next().unwrap();
    let kinds: Vec<SyntaxKind> = declaration.children().map(|node| node.kind()).collect();
    assert_eq!(
        kinds,
        [SyntaxKind::INIT_DECLARATOR, SyntaxKind::INIT_DECLARATOR, SyntaxKind::DECLARATOR]
    );
}

#[test]
fn if_condition_ends_at_closing_paren() {
    let parse = translation_unit("void f(int *p) { if (p) *p = 1; }\n", Grammar::c());
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());

    let condition = parse
        .tree()
        .root()
        .preorder()
        .find_map(|event| match event {
            WalkEvent::Enter(node) if node.kind() == SyntaxKind::PAREN_EXPR => Some(node),
            _ => None,
        })
        .unwrap();
    assert_eq!(condition.text_trimmed(), "(p)");
}

#[test]
fn top_level_node_kinds_of_mixed_file() {
    let text = "#include <stdio.h>\n\
                typedef unsigned long size;\n\
                int counter;\n\
                int main(void) { return 0; }\n";
    let parse = translation_unit(text, Grammar::c());
    let kinds: Vec<SyntaxKind> = parse.tree().root().children().map(|node| node.kind()).collect();
    assert_eq!(
        kinds,
        [
            SyntaxKind::PREPROC_INCLUDE,
            SyntaxKind::TYPE_DEFINITION,
            SyntaxKind::DECLARATION,
            SyntaxKind::FUNCTION_DEFINITION,
        ]
    );
}

#[test]
fn statements_parse_without_diagnostics() {
    check_no_diagnostics(
        "void f(int n) {\n\
         \x20   int sum = 0;\n\
         \x20   for (i = 0; i < n; i++) sum += i;\n\
         \x20   while (sum > 10) sum--;\n\
         \x20   if (sum) { g(sum); } else { h(); }\n\
         \x20   do { sum = sum / 2; } while (sum);\n\
         \x20   switch (sum) { case 0: break; default: break; }\n\
         }\n",
    );
}

#[test]
fn expressions_parse_without_diagnostics() {
    check_no_diagnostics("int y = a ? b : c;\n");
    check_no_diagnostics("char *p = (char *)q;\n");
    check_no_diagnostics("int n = sizeof(int);\n");
    check_no_diagnostics("int m = s->field + t.other[3];\n");
    check_no_diagnostics("int z = f(1, \"two\", 'c');\n");
    check_no_diagnostics("int v[3] = {1, 2, 3};\n");
}

#[test]
fn declarations_parse_without_diagnostics() {
    check_no_diagnostics("static const unsigned long long counter = 0;\n");
    check_no_diagnostics("enum color { RED, GREEN = 2, BLUE };\n");
    check_no_diagnostics("union u { int i; float f; };\n");
    check_no_diagnostics("int (*callback)(int, void *);\n");
    check_no_diagnostics("extern int printf(const char *format, ...);\n");
}

#[test]
fn tree_always_covers_the_whole_input() {
    let inputs = [
        "",
        "int x;",
        "}}}",
        "((((",
        "\u{1}\u{2}\u{3}",
        "/* unterminated",
        "\"unterminated\nint x;\n",
        "int f( {\n",
        "struct { int",
    ];

    for input in inputs {
        let parse = translation_unit(input, Grammar::c());
        let root = parse.tree().root();
        assert_eq!(root.kind(), SyntaxKind::TRANSLATION_UNIT);
        assert_eq!(u32::from(root.text_range().start()), 0, "input: {input:?}");
        assert_eq!(usize::from(root.text_range().end()), input.len(), "input: {input:?}");
    }
}

#[test]
fn parsing_is_deterministic() {
    let text = "int x = 1;\nvoid f() { @#$ }\nstruct s;\n";
    let first = translation_unit(text, Grammar::c());
    let second = translation_unit(text, Grammar::c());
    assert_eq!(first.debug_tree(), second.debug_tree());
    assert_eq!(first.diagnostics(), second.diagnostics());
}
