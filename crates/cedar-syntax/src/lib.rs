//! Lossless, immutable syntax tree with parent pointers and attached trivia.
//!
//! The tree is built once and then navigated by lightweight `Copy` handles
//! borrowing from the tree, without allocation or refcounting.

mod builder;
mod grammar;
mod syntax;
mod syntax_kind;
mod syntax_set;
mod tree;
mod trivia;

/// Builder for constructing a `SyntaxTree` from parser events.
pub use builder::Builder;
/// Immutable lexical grammar description shared across parses.
pub use grammar::Grammar;
/// Primary syntax tree API types.
pub use syntax::{
    Children, ChildrenWithTokens, NodeOrToken, Preorder, PreorderWithTokens, SyntaxElement,
    SyntaxNode, SyntaxToken, SyntaxTree, TriviaIter, WalkEvent, WalkEventWithTokens,
};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
/// Compact set for grouping `SyntaxKind` values.
pub use syntax_set::SyntaxSet;
/// Trivia pieces attached to tokens.
pub use trivia::{GreenTrivia, TriviaPiece, TriviaPieceKind};
