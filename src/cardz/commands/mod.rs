//! # Commands
//!
//! Commands sit between the API facade and the data layer. They check user
//! input (the data layer stores whatever it is given), turn selectors into
//! records, and describe what happened as a [`CmdResult`] instead of
//! printing.

use crate::config::CardzConfig;
use crate::error::{CardzError, Result};
use crate::model::{Flashcard, FlashcardGroup};

pub mod cards;
pub mod config;
pub mod doctor;
pub mod groups;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A group as listed, with its 1-based position and how many cards it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub index: usize,
    pub group: FlashcardGroup,
    pub card_count: usize,
}

/// A card as listed. `index` is its position among all cards, so it stays a
/// valid selector even when the listing is filtered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRow {
    pub index: usize,
    pub card: Flashcard,
    /// `None` when the card's group no longer exists.
    pub group_name: Option<String>,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_groups: Vec<FlashcardGroup>,
    pub affected_cards: Vec<Flashcard>,
    pub listed_groups: Vec<GroupSummary>,
    pub listed_cards: Vec<CardRow>,
    pub config: Option<CardzConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_groups(mut self, groups: Vec<GroupSummary>) -> Self {
        self.listed_groups = groups;
        self
    }

    pub fn with_listed_cards(mut self, cards: Vec<CardRow>) -> Self {
        self.listed_cards = cards;
        self
    }

    pub fn with_config(mut self, config: CardzConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Trim a required text field, rejecting it if nothing is left.
pub(crate) fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CardzError::Api(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blank means absent.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
