//! User-facing references to groups and cards.
//!
//! Ids are opaque and long, so the CLI lets users point at records the way
//! they see them listed: by 1-based position, by an id prefix, or (for
//! groups) by name.

use crate::error::{CardzError, Result};
use crate::model::{Flashcard, FlashcardGroup};
use std::fmt;
use std::str::FromStr;

/// Shortest id prefix accepted, to keep accidental matches unlikely.
pub const MIN_PREFIX_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// 1-based position in listing order.
    Index(usize),
    /// Exact id, unique id prefix, or (groups only) a name.
    Key(String),
    /// Exact id of a record the caller already holds. Never parsed from
    /// user input, so an id that looks like a number stays an id.
    Id(String),
}

impl FromStr for Selector {
    type Err = CardzError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CardzError::Api("Empty selector".to_string()));
        }
        match s.parse::<usize>() {
            Ok(0) => Err(CardzError::Api("Indexes start at 1".to_string())),
            Ok(n) => Ok(Selector::Index(n)),
            Err(_) => Ok(Selector::Key(s.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Index(i) => write!(f, "{}", i),
            Selector::Key(k) | Selector::Id(k) => write!(f, "\"{}\"", k),
        }
    }
}

fn by_id_or_prefix<'a, T>(
    items: &'a [T],
    key: &str,
    id_of: impl Fn(&T) -> &str,
) -> Result<Option<&'a T>> {
    if let Some(exact) = by_exact_id(items, key, &id_of) {
        return Ok(Some(exact));
    }
    if key.len() < MIN_PREFIX_LEN {
        return Ok(None);
    }
    let mut matches = items.iter().filter(|item| id_of(*item).starts_with(key));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Ok(Some(only)),
        (Some(_), Some(_)) => Err(CardzError::Api(format!(
            "Id prefix \"{}\" is ambiguous",
            key
        ))),
        _ => Ok(None),
    }
}

fn by_exact_id<'a, T>(items: &'a [T], id: &str, id_of: impl Fn(&T) -> &str) -> Option<&'a T> {
    items.iter().find(|item| id_of(*item) == id)
}

fn by_index<T>(items: &[T], n: usize) -> Option<&T> {
    n.checked_sub(1).and_then(|i| items.get(i))
}

fn group_by_key<'a>(
    groups: &'a [FlashcardGroup],
    key: &str,
) -> Result<Option<&'a FlashcardGroup>> {
    if let Some(group) = by_id_or_prefix(groups, key, |g| g.id.as_str())? {
        return Ok(Some(group));
    }
    let wanted = key.to_lowercase();
    let mut named = groups.iter().filter(|g| g.name.to_lowercase() == wanted);
    match (named.next(), named.next()) {
        (Some(only), None) => Ok(Some(only)),
        (Some(_), Some(_)) => Err(CardzError::Api(format!(
            "Several groups are named \"{}\", use an index or id",
            key
        ))),
        _ => Ok(None),
    }
}

/// Resolve a group selector against groups in listing order.
///
/// A number past the end of the listing is tried as an id or a name, so a
/// group called "2024" stays reachable.
pub fn resolve_group<'a>(
    groups: &'a [FlashcardGroup],
    selector: &Selector,
) -> Result<&'a FlashcardGroup> {
    let found = match selector {
        Selector::Index(n) => match by_index(groups, *n) {
            Some(group) => Some(group),
            None => group_by_key(groups, &n.to_string())?,
        },
        Selector::Key(key) => group_by_key(groups, key)?,
        Selector::Id(id) => by_exact_id(groups, id, |g| g.id.as_str()),
    };
    found.ok_or_else(|| CardzError::Api(format!("Group {} not found", selector)))
}

/// Resolve a card selector against cards in listing order.
pub fn resolve_card<'a>(cards: &'a [Flashcard], selector: &Selector) -> Result<&'a Flashcard> {
    let found = match selector {
        Selector::Index(n) => match by_index(cards, *n) {
            Some(card) => Some(card),
            None => by_id_or_prefix(cards, &n.to_string(), |c| c.id.as_str())?,
        },
        Selector::Key(key) => by_id_or_prefix(cards, key, |c| c.id.as_str())?,
        Selector::Id(id) => by_exact_id(cards, id, |c| c.id.as_str()),
    };
    found.ok_or_else(|| CardzError::Api(format!("Flashcard {} not found", selector)))
}
