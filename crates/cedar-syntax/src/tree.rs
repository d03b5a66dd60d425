//! Flat arena storage for tokens, nodes, and child references.
//!
//! Everything is index based: tokens and nodes live in boxed slices owned by
//! the tree, and child references encode node-or-token in the high bit.

use text_size::TextSize;

use crate::SyntaxKind;

pub(crate) const NO_PARENT: u32 = u32::MAX;

/// Raw token stored in the tree arena.
///
/// A token's start offset is the end offset of the previous token; index 0
/// is a zero-length sentinel so that rule holds for the first real token.
#[derive(Clone, Copy)]
pub(crate) struct TokenData {
    pub(crate) kind: SyntaxKind,
    pub(crate) attached_trivia: AttachedTrivia,
    pub(crate) end: TextSize,
    pub(crate) parent: u32,
}

/// Compact encoding for trivia attachment metadata.
#[derive(Clone, Copy)]
pub(crate) struct AttachedTrivia {
    /// Encodes leading/trailing presence and trivia length in a single `u16`.
    ///
    /// Layout:
    /// - bit 0: has leading trivia
    /// - bit 1: has trailing trivia
    /// - bits 2..: trivia length (leading for real tokens, trailing for the
    ///   first trailing token)
    raw: u16,
}

impl AttachedTrivia {
    const MAX_TRIVIA_LEN: usize = (1 << (u16::BITS - 2)) - 1;

    pub(crate) fn new(
        has_leading_trivia: bool,
        has_trailing_trivia: bool,
        trivia_len: usize,
    ) -> Self {
        assert!(trivia_len <= Self::MAX_TRIVIA_LEN);
        Self {
            raw: ((trivia_len << 2)
                | (usize::from(has_trailing_trivia) << 1)
                | usize::from(has_leading_trivia)) as u16,
        }
    }

    pub(crate) fn has_leading_trivia(self) -> bool {
        (self.raw & 0b01) != 0
    }

    pub(crate) fn has_trailing_trivia(self) -> bool {
        (self.raw & 0b10) != 0
    }

    pub(crate) fn trivia_len(self) -> u32 {
        u32::from(self.raw >> 2)
    }
}

/// Raw node stored in the tree arena.
pub(crate) struct NodeData {
    pub(crate) kind: SyntaxKind,
    /// `NO_PARENT` for the root.
    pub(crate) parent: u32,
    pub(crate) children_start: u32,
    pub(crate) children_len: u32,
    /// Index of the first token inside this node, counting attached trivia.
    /// The sentinel index 0 marks a node that spans no tokens at all.
    pub(crate) first_token: u32,
    pub(crate) last_token: u32,
}

/// The typed view of a tagged child reference.
pub(crate) enum ChildKind {
    Node(u32),
    Token(u32),
}

/// Child reference with the node-or-token tag in the high bit.
#[derive(Clone, Copy)]
pub(crate) struct ChildRef(u32);

impl ChildRef {
    const TOKEN_BIT: u32 = 1 << 31;

    pub(crate) fn node(index: u32) -> Self {
        debug_assert!(index & Self::TOKEN_BIT == 0);
        Self(index)
    }

    pub(crate) fn token(index: u32) -> Self {
        debug_assert!(index & Self::TOKEN_BIT == 0);
        Self(index | Self::TOKEN_BIT)
    }

    pub(crate) fn kind(self) -> ChildKind {
        if self.0 & Self::TOKEN_BIT == 0 {
            ChildKind::Node(self.0)
        } else {
            ChildKind::Token(self.0 & !Self::TOKEN_BIT)
        }
    }
}
