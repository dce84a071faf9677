use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Milliseconds since the Unix epoch, the timestamp unit of the persisted layout.
pub type Millis = i64;

pub fn now_millis() -> Millis {
    Utc::now().timestamp_millis()
}

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// A fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(GroupId);
string_id!(CardId);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: Millis,
}

impl FlashcardGroup {
    pub fn new(name: String, description: Option<String>, created_at: Millis) -> Self {
        Self {
            id: GroupId::generate(),
            name,
            description,
            created_at,
        }
    }

    pub fn apply(&mut self, patch: &GroupPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    pub created_at: Millis,
    pub group_id: GroupId,
    // Reserved for review tracking; carried through storage untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<Millis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mastered: Option<bool>,
}

impl Flashcard {
    pub fn new(group_id: GroupId, card: NewFlashcard, created_at: Millis) -> Self {
        Self {
            id: CardId::generate(),
            question: card.question,
            answer: card.answer,
            created_at,
            group_id,
            last_reviewed: None,
            mastered: None,
        }
    }

    pub fn apply(&mut self, patch: &FlashcardPatch) {
        if let Some(question) = &patch.question {
            self.question = question.clone();
        }
        if let Some(answer) = &patch.answer {
            self.answer = answer.clone();
        }
        if let Some(group_id) = &patch.group_id {
            self.group_id = group_id.clone();
        }
    }

    /// Case-insensitive substring match on question or answer.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.question.to_lowercase().contains(&term) || self.answer.to_lowercase().contains(&term)
    }
}

/// Input for a card that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFlashcard {
    pub question: String,
    pub answer: String,
}

impl NewFlashcard {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Partial update for a group. `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl GroupPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashcardPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub group_id: Option<GroupId>,
}

impl FlashcardPatch {
    pub fn is_empty(&self) -> bool {
        self.question.is_none() && self.answer.is_none() && self.group_id.is_none()
    }
}
