//! # Study Sessions
//!
//! A session walks one deck: the cards of a single group, or every card. The
//! deck is shuffled once when the session starts (or when the scope changes,
//! or on request) and then stays fixed while the user moves through it.
//!
//! Navigation clamps at both ends. Moving to another card always shows its
//! question side first.

use crate::model::{CardId, Flashcard, GroupId};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Which cards a session draws from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StudyScope {
    #[default]
    All,
    Group(GroupId),
}

impl StudyScope {
    pub fn includes(&self, card: &Flashcard) -> bool {
        match self {
            StudyScope::All => true,
            StudyScope::Group(id) => &card.group_id == id,
        }
    }
}

/// How the deck is ordered when (re)built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    Shuffled,
    /// Creation order, as stored.
    Stored,
}

#[derive(Debug, Clone)]
pub struct StudySession {
    scope: StudyScope,
    ordering: Ordering,
    deck: Vec<Flashcard>,
    cursor: usize,
    flipped: bool,
}

impl StudySession {
    pub fn new<R: Rng + ?Sized>(
        scope: StudyScope,
        ordering: Ordering,
        cards: &[Flashcard],
        rng: &mut R,
    ) -> Self {
        let mut session = Self {
            scope,
            ordering,
            deck: Vec::new(),
            cursor: 0,
            flipped: false,
        };
        session.rebuild(cards, rng);
        session
    }

    /// Switch to another scope: re-filter, re-order, back to the first card.
    pub fn select<R: Rng + ?Sized>(&mut self, scope: StudyScope, cards: &[Flashcard], rng: &mut R) {
        self.scope = scope;
        self.rebuild(cards, rng);
    }

    /// Reshuffle the current deck and start over.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.deck.shuffle(rng);
        self.cursor = 0;
        self.flipped = false;
    }

    fn rebuild<R: Rng + ?Sized>(&mut self, cards: &[Flashcard], rng: &mut R) {
        self.deck = cards
            .iter()
            .filter(|c| self.scope.includes(c))
            .cloned()
            .collect();
        if self.ordering == Ordering::Shuffled {
            self.deck.shuffle(rng);
        }
        self.cursor = 0;
        self.flipped = false;
    }

    /// Advance one card. Returns `false` at the last card.
    pub fn next(&mut self) -> bool {
        if self.cursor + 1 >= self.deck.len() {
            return false;
        }
        self.cursor += 1;
        self.flipped = false;
        true
    }

    /// Go back one card. Returns `false` at the first card.
    pub fn previous(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.flipped = false;
        true
    }

    pub fn flip(&mut self) {
        if !self.deck.is_empty() {
            self.flipped = !self.flipped;
        }
    }

    /// Bring the deck up to date after cards changed in storage.
    ///
    /// Cards keep their place in the shuffled order but take their latest
    /// content. Cards that were deleted, or moved out of the scope, drop out.
    /// New cards are not dealt in until the next shuffle or scope change.
    pub fn refresh(&mut self, cards: &[Flashcard]) {
        let current_id = self.current().map(|c| c.id.clone());
        let latest: HashMap<&CardId, &Flashcard> = cards.iter().map(|c| (&c.id, c)).collect();

        let scope = &self.scope;
        self.deck = self
            .deck
            .iter()
            .filter_map(|c| latest.get(&c.id).copied())
            .filter(|c| scope.includes(c))
            .cloned()
            .collect();

        let still_current = current_id
            .as_ref()
            .and_then(|id| self.deck.iter().position(|c| &c.id == id));
        match still_current {
            Some(pos) => self.cursor = pos,
            None => {
                // The card under the cursor went away: stay at the same slot.
                self.cursor = self.cursor.min(self.deck.len().saturating_sub(1));
                self.flipped = false;
            }
        }
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.deck.get(self.cursor)
    }

    /// Zero-based cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.deck.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn scope(&self) -> &StudyScope {
        &self.scope
    }

    pub fn deck(&self) -> &[Flashcard] {
        &self.deck
    }
}
