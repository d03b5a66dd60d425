//! Public syntax tree API built on immutable, parent-linked nodes.

use std::fmt;

use text_size::TextRange;

use crate::SyntaxKind;
use crate::tree::{ChildKind, ChildRef, NO_PARENT, NodeData, TokenData};

/// Owned syntax tree for a single source text.
///
/// The tree owns the source buffer; all handles borrow from the tree and
/// are read-only, so concurrent traversal is always safe.
pub struct SyntaxTree {
    pub(crate) text: Box<str>,
    /// Always starts with a fake token.
    pub(crate) tokens: Box<[TokenData]>,
    /// The root is always index 0.
    pub(crate) nodes: Box<[NodeData]>,
    pub(crate) children: Box<[ChildRef]>,
}

impl SyntaxTree {
    /// Returns the root syntax node.
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, index: 0 }
    }

    /// Returns the full source text for this tree.
    pub fn text(&self) -> &str {
        &self.text
    }

    fn token_data(&self, index: u32) -> &TokenData {
        &self.tokens[index as usize]
    }

    fn node_data(&self, index: u32) -> &NodeData {
        &self.nodes[index as usize]
    }

    /// A token starts where the previous token ends; the sentinel at index 0
    /// anchors the first real token at offset 0.
    fn token_start(&self, index: u32) -> text_size::TextSize {
        self.tokens[index as usize - 1].end
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree").field("text_len", &self.text().len()).finish_non_exhaustive()
    }
}

/// Token handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a SyntaxTree,
    index: u32,
}

impl<'a> SyntaxToken<'a> {
    /// Returns this token's kind.
    pub fn kind(self) -> SyntaxKind {
        self.tree.token_data(self.index).kind
    }

    /// Returns `true` if this token is trivia.
    pub fn is_trivia(self) -> bool {
        self.kind().is_trivia()
    }

    /// Returns the token text range including attached trivia.
    pub fn text_range(self) -> TextRange {
        let attached = self.tree.token_data(self.index).attached_trivia;
        let first = if attached.has_leading_trivia() {
            self.index - attached.trivia_len()
        } else {
            self.index
        };
        let last = if attached.has_trailing_trivia() {
            self.index + self.tree.token_data(self.index + 1).attached_trivia.trivia_len()
        } else {
            self.index
        };
        TextRange::new(self.tree.token_start(first), self.tree.token_data(last).end)
    }

    /// Returns the range including attached trivia.
    pub fn range(self) -> TextRange {
        self.text_range()
    }

    /// Returns the token text range excluding trivia.
    pub fn trimmed_range(self) -> TextRange {
        TextRange::new(self.tree.token_start(self.index), self.tree.token_data(self.index).end)
    }

    /// Returns the token text including trivia.
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the token text excluding trivia.
    pub fn text_trimmed(self) -> &'a str {
        &self.tree.text[self.trimmed_range()]
    }

    /// Returns the previous token if any.
    pub fn prev_token(self) -> Option<Self> {
        (self.index > 1).then(|| Self { tree: self.tree, index: self.index - 1 })
    }

    /// Returns the next token if any.
    pub fn next_token(self) -> Option<Self> {
        let next = self.index + 1;
        ((next as usize) < self.tree.tokens.len()).then(|| Self { tree: self.tree, index: next })
    }

    /// Iterates over leading trivia tokens.
    pub fn leading_trivia(self) -> TriviaIter<'a> {
        let attached = self.tree.token_data(self.index).attached_trivia;
        if !attached.has_leading_trivia() {
            return TriviaIter { tree: self.tree, range: self.index..self.index };
        }
        TriviaIter { tree: self.tree, range: self.index - attached.trivia_len()..self.index }
    }

    /// Iterates over trailing trivia tokens.
    pub fn trailing_trivia(self) -> TriviaIter<'a> {
        let attached = self.tree.token_data(self.index).attached_trivia;
        if !attached.has_trailing_trivia() {
            return TriviaIter { tree: self.tree, range: self.index..self.index };
        }
        let len = self.tree.token_data(self.index + 1).attached_trivia.trivia_len();
        TriviaIter { tree: self.tree, range: self.index + 1..self.index + 1 + len }
    }

    /// Returns the parent node.
    pub fn parent(self) -> SyntaxNode<'a> {
        SyntaxNode { tree: self.tree, index: self.tree.token_data(self.index).parent }
    }

    /// Returns an iterator of parent nodes, starting from the immediate parent.
    pub fn parent_ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        self.parent().ancestors()
    }
}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.trimmed_range())
    }
}

/// Iterator over trivia tokens.
#[derive(Clone)]
pub struct TriviaIter<'a> {
    tree: &'a SyntaxTree,
    range: std::ops::Range<u32>,
}

impl<'a> Iterator for TriviaIter<'a> {
    type Item = SyntaxToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.range.next()?;
        Some(SyntaxToken { tree: self.tree, index })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for TriviaIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.range.next_back()?;
        Some(SyntaxToken { tree: self.tree, index })
    }
}

impl ExactSizeIterator for TriviaIter<'_> {}

/// Node handle tied to the lifetime of the tree.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    index: u32,
}

impl<'a> SyntaxNode<'a> {
    fn data(self) -> &'a NodeData {
        self.tree.node_data(self.index)
    }

    /// Returns this node's kind.
    pub fn kind(self) -> SyntaxKind {
        self.data().kind
    }

    /// Returns the first token spanned by this node, or `None` for a node
    /// spanning no tokens.
    pub fn first_token(self) -> Option<SyntaxToken<'a>> {
        let first = self.data().first_token;
        (first != 0).then_some(SyntaxToken { tree: self.tree, index: first })
    }

    /// Returns the last token spanned by this node.
    pub fn last_token(self) -> Option<SyntaxToken<'a>> {
        let first = self.data().first_token;
        (first != 0).then_some(SyntaxToken { tree: self.tree, index: self.data().last_token })
    }

    /// Returns the text range covered by this node, including attached
    /// trivia at its edges.
    pub fn text_range(self) -> TextRange {
        let data = self.data();
        if data.first_token == 0 {
            // An empty node sits right after whatever token came before it.
            return TextRange::empty(self.tree.token_data(data.last_token).end);
        }
        TextRange::new(
            self.tree.token_start(data.first_token),
            self.tree.token_data(data.last_token).end,
        )
    }

    /// Returns the range covered by this node.
    pub fn range(self) -> TextRange {
        self.text_range()
    }

    /// Returns the range with leading/trailing trivia trimmed away.
    pub fn trimmed_range(self) -> TextRange {
        let data = self.data();
        if data.first_token == 0 {
            return self.text_range();
        }
        let tokens = data.first_token..=data.last_token;
        let first = tokens
            .clone()
            .find(|&index| !self.tree.token_data(index).kind.is_trivia());
        let last = tokens.rev().find(|&index| !self.tree.token_data(index).kind.is_trivia());
        match (first, last) {
            (Some(first), Some(last)) => TextRange::new(
                self.tree.token_start(first),
                self.tree.token_data(last).end,
            ),
            _ => TextRange::empty(self.text_range().start()),
        }
    }

    /// Returns the text slice covered by this node.
    pub fn text(self) -> &'a str {
        &self.tree.text[self.text_range()]
    }

    /// Returns the text slice excluding leading/trailing trivia.
    pub fn text_trimmed(self) -> &'a str {
        &self.tree.text[self.trimmed_range()]
    }

    /// Returns the parent node if any.
    pub fn parent(self) -> Option<Self> {
        let parent = self.data().parent;
        (parent != NO_PARENT).then_some(Self { tree: self.tree, index: parent })
    }

    /// Returns an iterator of ancestors starting from this node.
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    fn child_refs(self) -> std::slice::Iter<'a, ChildRef> {
        let data = self.data();
        let start = data.children_start as usize;
        self.tree.children[start..start + data.children_len as usize].iter()
    }

    /// Iterates children including tokens.
    pub fn children_with_tokens(self) -> ChildrenWithTokens<'a> {
        ChildrenWithTokens { tree: self.tree, children: self.child_refs() }
    }

    /// Iterates child nodes, skipping tokens.
    pub fn children(self) -> Children<'a> {
        Children { inner: self.children_with_tokens() }
    }

    /// Returns the next sibling node, if any.
    pub fn next_sibling(self) -> Option<Self> {
        self.siblings_after().find_map(SyntaxElement::into_node)
    }

    /// Returns the previous sibling node, if any.
    pub fn prev_sibling(self) -> Option<Self> {
        let parent = self.parent()?;
        let mut previous = None;
        for child in parent.children() {
            if child.index == self.index {
                return previous;
            }
            previous = Some(child);
        }
        None
    }

    fn siblings_after(self) -> ChildrenWithTokens<'a> {
        let mut siblings = match self.parent() {
            Some(parent) => parent.children_with_tokens(),
            None => ChildrenWithTokens { tree: self.tree, children: [].iter() },
        };
        for sibling in siblings.by_ref() {
            if let SyntaxElement::Node(node) = sibling
                && node.index == self.index
            {
                break;
            }
        }
        siblings
    }

    /// Returns a preorder iterator over nodes.
    pub fn preorder(self) -> Preorder<'a> {
        Preorder { inner: PreorderWithTokens::new(self) }
    }

    /// Returns a preorder iterator over nodes and tokens.
    pub fn preorder_with_tokens(self) -> PreorderWithTokens<'a> {
        PreorderWithTokens::new(self)
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.text_range())
    }
}

/// Node or token element inside the tree.
pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

/// Iterator over children including tokens.
pub struct ChildrenWithTokens<'a> {
    tree: &'a SyntaxTree,
    children: std::slice::Iter<'a, ChildRef>,
}

impl Clone for ChildrenWithTokens<'_> {
    fn clone(&self) -> Self {
        Self { tree: self.tree, children: self.children.clone() }
    }
}

impl<'a> ChildrenWithTokens<'a> {
    fn map_child(&self, child: Option<&ChildRef>) -> Option<SyntaxElement<'a>> {
        let tree = self.tree;
        child.map(|child| match child.kind() {
            ChildKind::Node(index) => SyntaxElement::Node(SyntaxNode { tree, index }),
            ChildKind::Token(index) => SyntaxElement::Token(SyntaxToken { tree, index }),
        })
    }
}

impl<'a> Iterator for ChildrenWithTokens<'a> {
    type Item = SyntaxElement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let child = self.children.next();
        self.map_child(child)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.children.size_hint()
    }
}

impl DoubleEndedIterator for ChildrenWithTokens<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let child = self.children.next_back();
        self.map_child(child)
    }
}

impl ExactSizeIterator for ChildrenWithTokens<'_> {
    fn len(&self) -> usize {
        self.children.len()
    }
}

/// Iterator over child nodes only.
#[derive(Clone)]
pub struct Children<'a> {
    inner: ChildrenWithTokens<'a>,
}

impl<'a> Iterator for Children<'a> {
    type Item = SyntaxNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(SyntaxElement::into_node)
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.by_ref().rev().find_map(SyntaxElement::into_node)
    }
}

/// Preorder traversal over nodes.
#[derive(Clone)]
pub struct Preorder<'a> {
    inner: PreorderWithTokens<'a>,
}

impl<'a> Preorder<'a> {
    /// Skips the current subtree during traversal.
    pub fn skip_subtree(&mut self) {
        self.inner.skip_subtree();
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|item| match item {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

/// Preorder walk event for nodes.
#[derive(Clone, Copy)]
pub enum WalkEvent<'a> {
    Enter(SyntaxNode<'a>),
    Leave(SyntaxNode<'a>),
}

/// Preorder traversal over nodes and tokens.
#[derive(Clone)]
pub struct PreorderWithTokens<'a> {
    stack: Vec<(SyntaxNode<'a>, ChildrenWithTokens<'a>)>,
    root: Option<SyntaxNode<'a>>,
}

impl<'a> PreorderWithTokens<'a> {
    fn new(start: SyntaxNode<'a>) -> Self {
        Self { stack: Vec::with_capacity(128), root: Some(start) }
    }

    /// Skips the current subtree during traversal.
    pub fn skip_subtree(&mut self) {
        assert!(self.stack.pop().is_some(), "must have a subtree to skip");
    }
}

impl<'a> Iterator for PreorderWithTokens<'a> {
    type Item = WalkEventWithTokens<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let Some((_, active_node)) = self.stack.last_mut() else {
            let root = self.root?;
            self.root = None;
            self.stack.push((root, root.children_with_tokens()));
            return Some(WalkEventWithTokens::EnterNode(root));
        };
        match active_node.next() {
            Some(SyntaxElement::Node(child)) => {
                self.stack.push((child, child.children_with_tokens()));
                Some(WalkEventWithTokens::EnterNode(child))
            }
            Some(SyntaxElement::Token(child)) => Some(WalkEventWithTokens::Token(child)),
            None => {
                let (exited_node, _) = self.stack.pop().expect("should have an exited-from node");
                Some(WalkEventWithTokens::LeaveNode(exited_node))
            }
        }
    }
}

/// Preorder walk event including tokens.
#[derive(Clone, Copy)]
pub enum WalkEventWithTokens<'a> {
    EnterNode(SyntaxNode<'a>),
    LeaveNode(SyntaxNode<'a>),
    Token(SyntaxToken<'a>),
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}
