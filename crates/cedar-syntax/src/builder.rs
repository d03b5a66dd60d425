//! Builder for the immutable syntax tree.

use text_size::TextSize;

use crate::tree::{AttachedTrivia, ChildRef, NO_PARENT, NodeData, TokenData};
use crate::{GreenTrivia, SyntaxKind, SyntaxTree, TriviaPieceKind};

/// Builds a `SyntaxTree` from parser events.
///
/// Nodes are opened with `start_node`, receive tokens and child nodes, and
/// are closed with `finish_node`; `finish` returns the completed tree.
/// Unbalanced calls are programming faults and panic.
pub struct Builder {
    text: Box<str>,
    tokens: Vec<TokenData>,
    nodes: Vec<NodeData>,
    children: Vec<ChildRef>,

    opened: Vec<OpenNode>,
    children_pool: Vec<Vec<ChildRef>>,
    text_len: TextSize,
    last_token_index: u32,
}

struct OpenNode {
    node: u32,
    children: Vec<ChildRef>,
    first_last_token: Option<(u32, u32)>,
}

impl Drop for Builder {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.opened.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

const DEFAULT_TREE_DEPTH: usize = 128;
const DEFAULT_TREE_SIZE: usize = 1024;
const DEFAULT_CHILDREN_LEN: usize = 10;

impl Builder {
    /// Creates a new builder for `text`.
    ///
    /// The internal token buffer is seeded with a fake token at index 0 to
    /// make token ranges uniform.
    pub fn new(text: &str) -> Self {
        let mut tokens = Vec::with_capacity(DEFAULT_TREE_SIZE);
        tokens.push(TokenData {
            kind: SyntaxKind::TOMBSTONE,
            attached_trivia: AttachedTrivia::new(false, false, 0),
            end: TextSize::new(0),
            parent: 0,
        });
        Self {
            text: text.into(),
            tokens,
            nodes: Vec::with_capacity(DEFAULT_TREE_SIZE),
            children: Vec::with_capacity(DEFAULT_TREE_SIZE),

            opened: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            children_pool: Vec::with_capacity(DEFAULT_TREE_DEPTH),
            text_len: TextSize::new(0),
            last_token_index: 0,
        }
    }

    /// Retrieves a recycled children buffer or allocates a new one.
    fn new_children_vec(&mut self) -> Vec<ChildRef> {
        self.children_pool.pop().unwrap_or_else(|| Vec::with_capacity(DEFAULT_CHILDREN_LEN))
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        let new_node = u32::try_from(self.nodes.len()).unwrap();
        let parent = match self.opened.last_mut() {
            Some(open) => {
                open.children.push(ChildRef::node(new_node));
                open.node
            }
            None => {
                assert!(self.nodes.is_empty(), "only the first node can be the root");
                NO_PARENT
            }
        };
        self.nodes.push(NodeData {
            kind,
            parent,
            children_start: 0,
            children_len: 0,
            first_token: 0,
            last_token: 0,
        });
        let children = self.new_children_vec();
        self.opened.push(OpenNode { node: new_node, children, first_last_token: None });
    }

    /// Finishes the most recently started node.
    pub fn finish_node(&mut self) {
        let mut open = self.opened.pop().expect("no opened nodes");
        let (first_token, last_token) =
            open.first_last_token.unwrap_or((0, self.last_token_index));

        let node = &mut self.nodes[open.node as usize];
        node.first_token = first_token;
        node.last_token = last_token;
        node.children_start = u32::try_from(self.children.len()).unwrap();
        node.children_len = u32::try_from(open.children.len()).unwrap();

        self.children.append(&mut open.children);
        self.children_pool.push(open.children);
    }

    /// Adds a token with its leading and trailing trivia.
    ///
    /// A `text_len` of zero is allowed and used for synthesized tokens such
    /// as `MISSING` and `EOF`.
    pub fn token(
        &mut self,
        leading: &GreenTrivia,
        kind: SyntaxKind,
        text_len: TextSize,
        trailing: &GreenTrivia,
    ) {
        let open = self.opened.last_mut().expect("token outside of any node");
        let parent = open.node;

        let leading_len = leading.pieces().len();
        let trailing_len = trailing.pieces().len();

        let text = &self.text;
        let text_end = &mut self.text_len;
        let mut push_text_len = |len| {
            *text_end += len;
            assert!(text.is_char_boundary(usize::from(*text_end)), "token splits a character");
            assert!(usize::from(*text_end) <= text.len(), "tokens overflow the source text");
            *text_end
        };

        let first_token = u32::try_from(self.tokens.len()).unwrap();
        self.tokens.extend(leading.pieces().iter().map(|piece| TokenData {
            kind: trivia_piece_kind(piece.kind),
            attached_trivia: AttachedTrivia::new(false, false, 0),
            end: push_text_len(piece.len),
            parent,
        }));

        let token = u32::try_from(self.tokens.len()).unwrap();
        self.tokens.push(TokenData {
            kind,
            attached_trivia: AttachedTrivia::new(leading_len != 0, trailing_len != 0, leading_len),
            end: push_text_len(text_len),
            parent,
        });
        open.children.push(ChildRef::token(token));

        self.tokens.extend(trailing.pieces().iter().map(|piece| TokenData {
            kind: trivia_piece_kind(piece.kind),
            attached_trivia: AttachedTrivia::new(false, false, trailing_len),
            end: push_text_len(piece.len),
            parent,
        }));

        let last_token = first_token + leading_len as u32 + trailing_len as u32;
        self.update_first_last_tokens(first_token, last_token);
        self.last_token_index = last_token;
    }

    /// Updates token ranges for all open ancestor nodes.
    fn update_first_last_tokens(&mut self, first_token: u32, last_token: u32) {
        for open in &mut self.opened {
            match &mut open.first_last_token {
                // First token inside this node, so also first and last token.
                None => open.first_last_token = Some((first_token, last_token)),
                // There was already a token. It is the first token, but we're
                // after it so (maybe) we're last.
                Some((_f, l)) => *l = last_token,
            }
        }
    }

    /// Finishes building and returns the immutable `SyntaxTree`.
    pub fn finish(mut self) -> SyntaxTree {
        assert!(self.opened.is_empty(), "unfinished nodes remain");
        assert!(!self.nodes.is_empty(), "tree has no root");
        assert_eq!(
            usize::from(self.text_len),
            self.text.len(),
            "tokens do not cover the source text"
        );

        SyntaxTree {
            text: std::mem::take(&mut self.text),
            tokens: std::mem::take(&mut self.tokens).into_boxed_slice(),
            nodes: std::mem::take(&mut self.nodes).into_boxed_slice(),
            children: std::mem::take(&mut self.children).into_boxed_slice(),
        }
    }
}

/// Maps trivia piece kinds to syntax kinds.
fn trivia_piece_kind(kind: TriviaPieceKind) -> SyntaxKind {
    match kind {
        TriviaPieceKind::Whitespace => SyntaxKind::WHITESPACE,
        TriviaPieceKind::SingleLineComment => SyntaxKind::LINE_COMMENT,
        TriviaPieceKind::BlockComment => SyntaxKind::BLOCK_COMMENT,
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextRange;

    use super::*;
    use crate::TriviaPiece;

    fn whitespace(len: u32) -> GreenTrivia {
        GreenTrivia::new(&[TriviaPiece::new(TriviaPieceKind::Whitespace, len.into())])
    }

    /// Builds the tree for `int x;` by hand:
    /// translation_unit > declaration > `int` ` ` `x` `;`, then a
    /// zero-length EOF token directly under the root.
    fn int_x_tree() -> SyntaxTree {
        let mut builder = Builder::new("int x;");
        builder.start_node(SyntaxKind::TRANSLATION_UNIT);
        builder.start_node(SyntaxKind::DECLARATION);
        builder.token(&GreenTrivia::empty(), SyntaxKind::INT_KW, 3.into(), &whitespace(1));
        builder.token(&GreenTrivia::empty(), SyntaxKind::NAME, 1.into(), &GreenTrivia::empty());
        builder.token(
            &GreenTrivia::empty(),
            SyntaxKind::SEMICOLON,
            1.into(),
            &GreenTrivia::empty(),
        );
        builder.finish_node();
        builder.token(&GreenTrivia::empty(), SyntaxKind::EOF, 0.into(), &GreenTrivia::empty());
        builder.finish_node();
        builder.finish()
    }

    #[test]
    fn root_covers_whole_text() {
        let tree = int_x_tree();
        let root = tree.root();

        assert_eq!(root.kind(), SyntaxKind::TRANSLATION_UNIT);
        assert_eq!(root.text_range(), TextRange::new(0.into(), 6.into()));
        assert_eq!(root.text(), "int x;");
        assert!(root.parent().is_none());
    }

    #[test]
    fn child_spans_are_contained_and_ordered() {
        let tree = int_x_tree();
        let root = tree.root();

        let children: Vec<_> = root.children().collect();
        assert_eq!(children.len(), 1);

        let declaration = children[0];
        assert_eq!(declaration.kind(), SyntaxKind::DECLARATION);
        assert_eq!(declaration.text_range(), TextRange::new(0.into(), 6.into()));
        assert_eq!(declaration.parent().map(|parent| parent.kind()), Some(root.kind()));

        let mut end = declaration.text_range().start();
        for child in declaration.children_with_tokens() {
            let range = match child {
                crate::NodeOrToken::Node(node) => node.text_range(),
                crate::NodeOrToken::Token(token) => token.range(),
            };
            assert_eq!(range.start(), end, "children must tile the parent");
            end = range.end();
        }
        assert_eq!(end, declaration.text_range().end());
    }

    #[test]
    fn trivia_is_attached_to_tokens() {
        let tree = int_x_tree();
        let int_kw = tree.root().first_token().unwrap();

        assert_eq!(int_kw.kind(), SyntaxKind::INT_KW);
        assert_eq!(int_kw.text_trimmed(), "int");
        assert_eq!(int_kw.text(), "int ");
        assert_eq!(int_kw.trailing_trivia().count(), 1);
        assert_eq!(int_kw.leading_trivia().count(), 0);

        let name = int_kw.next_token().and_then(|ws| ws.next_token()).unwrap();
        assert_eq!(name.kind(), SyntaxKind::NAME);
        assert_eq!(name.text(), "x");
        assert_eq!(name.prev_token().unwrap().kind(), SyntaxKind::WHITESPACE);
    }

    #[test]
    fn traversal_is_idempotent() {
        let tree = int_x_tree();
        let declaration = tree.root().children().next().unwrap();

        for _ in 0..3 {
            assert_eq!(declaration.kind(), SyntaxKind::DECLARATION);
            assert_eq!(declaration.text_range(), TextRange::new(0.into(), 6.into()));
            assert_eq!(declaration.children_with_tokens().count(), 3);
        }
    }

    #[test]
    fn preorder_enters_and_leaves_in_balance() {
        let tree = int_x_tree();
        let mut depth = 0usize;
        let mut max_depth = 0usize;

        for event in tree.root().preorder() {
            match event {
                crate::WalkEvent::Enter(_) => {
                    depth += 1;
                    max_depth = max_depth.max(depth);
                }
                crate::WalkEvent::Leave(_) => depth -= 1,
            }
        }

        assert_eq!(depth, 0);
        assert_eq!(max_depth, 2);
    }

    #[test]
    fn zero_length_tokens_are_allowed() {
        let mut builder = Builder::new("x");
        builder.start_node(SyntaxKind::TRANSLATION_UNIT);
        builder.start_node(SyntaxKind::DECLARATION);
        builder.token(&GreenTrivia::empty(), SyntaxKind::NAME, 1.into(), &GreenTrivia::empty());
        builder.token(&GreenTrivia::empty(), SyntaxKind::MISSING, 0.into(), &GreenTrivia::empty());
        builder.finish_node();
        builder.token(&GreenTrivia::empty(), SyntaxKind::EOF, 0.into(), &GreenTrivia::empty());
        builder.finish_node();
        let tree = builder.finish();

        let declaration = tree.root().children().next().unwrap();
        let missing = declaration.last_token().unwrap();
        assert_eq!(missing.kind(), SyntaxKind::MISSING);
        assert_eq!(missing.trimmed_range(), TextRange::empty(1.into()));
        assert_eq!(declaration.text_range(), TextRange::new(0.into(), 1.into()));
    }

    #[test]
    #[should_panic(expected = "unfinished nodes remain")]
    fn unbalanced_builder_panics() {
        let mut builder = Builder::new("");
        builder.start_node(SyntaxKind::TRANSLATION_UNIT);
        let _ = builder.finish();
    }
}
