use std::collections::VecDeque;

use cedar_errors::Diagnostic;
use cedar_syntax::{Builder, Grammar, GreenTrivia, SyntaxKind, SyntaxSet, SyntaxTree};
use cedar_tokenizer::{Token, Tokenizer};
use drop_bomb::DropBomb;
use text_size::TextSize;

pub(crate) struct Parser<'db> {
    text: &'db str,
    tokenizer: Tokenizer<'db>,
    lookahead: VecDeque<Token>,
    events: Vec<Event>,
    diagnostics: Vec<Diagnostic>,
}

impl<'db> Parser<'db> {
    pub(crate) fn new(text: &'db str, grammar: &'db Grammar) -> Self {
        Self {
            text,
            tokenizer: Tokenizer::new(text, grammar),
            lookahead: VecDeque::new(),
            events: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn peek_token(&self) -> &Token {
        match self.lookahead.front() {
            Some(token) => token,
            None => self.tokenizer.peek(),
        }
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.peek_token().kind
    }

    pub(crate) fn peek_text(&self) -> &'db str {
        let range: std::ops::Range<usize> = self.peek_token().kind_range.into();
        &self.text[range]
    }

    /// Kind of the `n`-th token ahead, where `n == 0` is the current token.
    pub(crate) fn nth_kind(&mut self, n: usize) -> SyntaxKind {
        while self.lookahead.len() < n {
            let token = self.tokenizer.next_token();
            self.lookahead.push_back(token);
        }

        match self.lookahead.get(n) {
            Some(token) => token.kind,
            None => self.tokenizer.peek().kind,
        }
    }

    pub(crate) fn nth_text(&mut self, n: usize) -> &'db str {
        while self.lookahead.len() < n {
            let token = self.tokenizer.next_token();
            self.lookahead.push_back(token);
        }

        let kind_range = match self.lookahead.get(n) {
            Some(token) => token.kind_range,
            None => self.tokenizer.peek().kind_range,
        };
        let range: std::ops::Range<usize> = kind_range.into();
        &self.text[range]
    }

    pub(crate) fn advance(&mut self) {
        if self.peek_kind() == SyntaxKind::EOF {
            return;
        }

        let token = match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.tokenizer.next_token(),
        };
        self.events.push(Event::Token(token));
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_text(&self, text: &str) -> bool {
        self.peek_kind() == SyntaxKind::OPERATOR && self.peek_text() == text
    }

    pub(crate) fn at_any(&self, set: &SyntaxSet) -> bool {
        set.contains(self.peek_kind())
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            return true;
        }
        false
    }

    pub(crate) fn eat_text(&mut self, text: &str) -> bool {
        if self.at_text(text) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes `kind`, or records a zero-length `MISSING` token in its place.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) {
        if self.eat(kind) {
            return;
        }

        self.error(format!("expected `{}`", kind.name()));
        self.missing();
    }

    pub(crate) fn expect_text(&mut self, text: &str) {
        if self.eat_text(text) {
            return;
        }

        self.error(format!("expected `{text}`"));
        self.missing();
    }

    pub(crate) fn missing(&mut self) {
        self.events.push(Event::Missing);
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(message, self.peek_token().kind_range));
    }

    /// Reports an error and wraps the offending token in an `ERROR` node.
    pub(crate) fn error_and_bump(&mut self, message: &str) {
        let m = self.start();
        self.error(message);
        self.advance();
        m.complete(self, SyntaxKind::ERROR);
    }

    /// Reports an error; bumps the token unless it belongs to `recovery`.
    pub(crate) fn error_recover(&mut self, message: &str, recovery: &SyntaxSet) {
        if self.at_any(recovery) || self.at(SyntaxKind::EOF) {
            self.error(message);
        } else {
            self.error_and_bump(message);
        }
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    /// Records the end-of-file token. Zero-length, but it carries the
    /// file-trailing trivia, so the tree keeps covering the whole text.
    pub(crate) fn eof(&mut self) {
        let token = match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.tokenizer.next_token(),
        };
        debug_assert_eq!(token.kind, SyntaxKind::EOF);
        self.events.push(Event::Token(token));
    }

    pub(crate) fn finish(self) -> (SyntaxTree, Vec<Diagnostic>) {
        let Parser { text, tokenizer: _, lookahead: _, mut events, diagnostics } = self;
        let mut builder = Builder::new(text);
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == SyntaxKind::TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent } => {
                                if kind != SyntaxKind::TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => {
                    builder.finish_node();
                }
                Event::Token(Token { leading, kind, kind_range, trailing }) => {
                    builder.token(&leading, kind, kind_range.len(), &trailing);
                }
                Event::Missing => {
                    let empty = GreenTrivia::empty();
                    builder.token(&empty, SyntaxKind::MISSING, TextSize::new(0), &empty);
                }
            }
        }

        (builder.finish(), diagnostics)
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(Token),
    Missing,
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be either completed or abandoned"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position)
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    fn new(pos: u32) -> Self {
        CompletedMarker { pos }
    }

    /// Wraps the completed node in a new, not yet completed one.
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
