//! Event-driven recursive descent parsing over the grammar-driven tokenizer.
//!
//! Parsing never fails: malformed input turns into `ERROR` nodes and
//! zero-length `MISSING` tokens, and the resulting tree always covers the
//! whole input text.

use cedar_errors::Diagnostic;
use cedar_syntax::{Grammar, SyntaxTree, WalkEventWithTokens};

mod grammar;
mod parser;
#[cfg(test)]
mod tests;

/// The result of parsing one source file: a full-fidelity tree plus the
/// diagnostics collected along the way.
pub struct Parse {
    tree: SyntaxTree,
    diagnostics: Vec<Diagnostic>,
}

impl Parse {
    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn into_tree(self) -> SyntaxTree {
        self.tree
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn debug_tree(&self) -> String {
        debug_tree(&self.tree)
    }
}

pub fn translation_unit(text: &str, grammar: &Grammar) -> Parse {
    let mut parser = parser::Parser::new(text, grammar);
    grammar::translation_unit(&mut parser);
    let (tree, diagnostics) = parser.finish();
    Parse { tree, diagnostics }
}

/// Renders the tree with one node or token per line, indented by depth.
/// Token lines show the token text without its attached trivia.
pub fn debug_tree(tree: &SyntaxTree) -> String {
    use std::fmt::Write as _;

    let mut out = String::new();
    let mut depth = 0;

    for event in tree.root().preorder_with_tokens() {
        match event {
            WalkEventWithTokens::EnterNode(node) => {
                let _ = writeln!(
                    out,
                    "{:indent$}{:?}@{:?}",
                    "",
                    node.kind(),
                    node.text_range(),
                    indent = depth * 2
                );
                depth += 1;
            }
            WalkEventWithTokens::LeaveNode(_) => depth -= 1,
            WalkEventWithTokens::Token(token) => {
                let _ = writeln!(
                    out,
                    "{:indent$}{:?}@{:?} {:?}",
                    "",
                    token.kind(),
                    token.trimmed_range(),
                    token.text_trimmed(),
                    indent = depth * 2
                );
            }
        }
    }

    out
}
