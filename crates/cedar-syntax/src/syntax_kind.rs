#[allow(non_camel_case_types)]
#[repr(u16)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    SEMICOLON,
    COMMA,

    OPERATOR,

    AUTO_KW,
    BREAK_KW,
    CASE_KW,
    CHAR_KW,
    CONST_KW,
    CONTINUE_KW,
    DEFAULT_KW,
    DO_KW,
    DOUBLE_KW,
    ELSE_KW,
    ENUM_KW,
    EXTERN_KW,
    FLOAT_KW,
    FOR_KW,
    GOTO_KW,
    IF_KW,
    INLINE_KW,
    INT_KW,
    LONG_KW,
    REGISTER_KW,
    RETURN_KW,
    SHORT_KW,
    SIGNED_KW,
    SIZEOF_KW,
    STATIC_KW,
    STRUCT_KW,
    SWITCH_KW,
    TYPEDEF_KW,
    UNION_KW,
    UNSIGNED_KW,
    VOID_KW,
    VOLATILE_KW,
    WHILE_KW,
    NAME,

    INT_NUMBER,
    FLOAT_NUMBER,
    STRING,
    CHAR,
    PREPROC,

    WHITESPACE,
    LINE_COMMENT,
    BLOCK_COMMENT,

    UNKNOWN,
    MISSING,
    EOF,

    TRANSLATION_UNIT,
    PREPROC_INCLUDE,
    PREPROC_DEFINE,
    PREPROC_IF,
    PREPROC_DIRECTIVE,
    TYPE_DEFINITION,
    DECLARATION,
    FUNCTION_DEFINITION,
    STRUCT_SPECIFIER,
    UNION_SPECIFIER,
    ENUM_SPECIFIER,
    FIELD_LIST,
    FIELD_DECLARATION,
    ENUMERATOR_LIST,
    ENUMERATOR,
    DECLARATOR,
    INIT_DECLARATOR,
    PARAMETER_LIST,
    PARAMETER,
    COMPOUND_STATEMENT,
    RETURN_STATEMENT,
    IF_STATEMENT,
    WHILE_STATEMENT,
    DO_STATEMENT,
    FOR_STATEMENT,
    SWITCH_STATEMENT,
    CASE_CLAUSE,
    BREAK_STATEMENT,
    CONTINUE_STATEMENT,
    GOTO_STATEMENT,
    LABELED_STATEMENT,
    EXPRESSION_STATEMENT,
    BINARY_EXPR,
    TERNARY_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    SIZEOF_EXPR,
    CAST_EXPR,
    CALL_EXPR,
    INDEX_EXPR,
    FIELD_EXPR,
    PAREN_EXPR,
    ARGUMENT_LIST,
    INITIALIZER_LIST,
    LITERAL,
    IDENT,
    ERROR,
    TOMBSTONE,
}

impl SyntaxKind {
    /// Returns `true` for whitespace and comment tokens.
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Returns `true` for keyword tokens.
    pub fn is_keyword(self) -> bool {
        (Self::AUTO_KW as u16..=Self::WHILE_KW as u16).contains(&(self as u16))
    }

    /// The grammar-level name of this kind, as printed by consumers.
    pub fn name(self) -> &'static str {
        use SyntaxKind::*;

        match self {
            LEFT_PAREN => "(",
            RIGHT_PAREN => ")",
            LEFT_BRACKET => "[",
            RIGHT_BRACKET => "]",
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            SEMICOLON => ";",
            COMMA => ",",
            OPERATOR => "operator",
            AUTO_KW => "auto",
            BREAK_KW => "break",
            CASE_KW => "case",
            CHAR_KW => "char",
            CONST_KW => "const",
            CONTINUE_KW => "continue",
            DEFAULT_KW => "default",
            DO_KW => "do",
            DOUBLE_KW => "double",
            ELSE_KW => "else",
            ENUM_KW => "enum",
            EXTERN_KW => "extern",
            FLOAT_KW => "float",
            FOR_KW => "for",
            GOTO_KW => "goto",
            IF_KW => "if",
            INLINE_KW => "inline",
            INT_KW => "int",
            LONG_KW => "long",
            REGISTER_KW => "register",
            RETURN_KW => "return",
            SHORT_KW => "short",
            SIGNED_KW => "signed",
            SIZEOF_KW => "sizeof",
            STATIC_KW => "static",
            STRUCT_KW => "struct",
            SWITCH_KW => "switch",
            TYPEDEF_KW => "typedef",
            UNION_KW => "union",
            UNSIGNED_KW => "unsigned",
            VOID_KW => "void",
            VOLATILE_KW => "volatile",
            WHILE_KW => "while",
            NAME => "identifier",
            INT_NUMBER | FLOAT_NUMBER => "number_literal",
            STRING => "string_literal",
            CHAR => "char_literal",
            PREPROC => "preproc",
            WHITESPACE => "whitespace",
            LINE_COMMENT | BLOCK_COMMENT => "comment",
            UNKNOWN => "UNKNOWN",
            MISSING => "MISSING",
            EOF => "end_of_file",
            TRANSLATION_UNIT => "translation_unit",
            PREPROC_INCLUDE => "preproc_include",
            PREPROC_DEFINE => "preproc_define",
            PREPROC_IF => "preproc_if",
            PREPROC_DIRECTIVE => "preproc_directive",
            TYPE_DEFINITION => "type_definition",
            DECLARATION => "declaration",
            FUNCTION_DEFINITION => "function_definition",
            STRUCT_SPECIFIER => "struct_specifier",
            UNION_SPECIFIER => "union_specifier",
            ENUM_SPECIFIER => "enum_specifier",
            FIELD_LIST => "field_list",
            FIELD_DECLARATION => "field_declaration",
            ENUMERATOR_LIST => "enumerator_list",
            ENUMERATOR => "enumerator",
            DECLARATOR => "declarator",
            INIT_DECLARATOR => "init_declarator",
            PARAMETER_LIST => "parameter_list",
            PARAMETER => "parameter",
            COMPOUND_STATEMENT => "compound_statement",
            RETURN_STATEMENT => "return_statement",
            IF_STATEMENT => "if_statement",
            WHILE_STATEMENT => "while_statement",
            DO_STATEMENT => "do_statement",
            FOR_STATEMENT => "for_statement",
            SWITCH_STATEMENT => "switch_statement",
            CASE_CLAUSE => "case_clause",
            BREAK_STATEMENT => "break_statement",
            CONTINUE_STATEMENT => "continue_statement",
            GOTO_STATEMENT => "goto_statement",
            LABELED_STATEMENT => "labeled_statement",
            EXPRESSION_STATEMENT => "expression_statement",
            BINARY_EXPR => "binary_expression",
            TERNARY_EXPR => "conditional_expression",
            PREFIX_EXPR => "unary_expression",
            POSTFIX_EXPR => "update_expression",
            SIZEOF_EXPR => "sizeof_expression",
            CAST_EXPR => "cast_expression",
            CALL_EXPR => "call_expression",
            INDEX_EXPR => "subscript_expression",
            FIELD_EXPR => "field_expression",
            PAREN_EXPR => "parenthesized_expression",
            ARGUMENT_LIST => "argument_list",
            INITIALIZER_LIST => "initializer_list",
            LITERAL => "literal",
            IDENT => "identifier",
            ERROR => "ERROR",
            TOMBSTONE => "TOMBSTONE",
        }
    }
}
