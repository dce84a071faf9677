use super::{required, CardRow, CmdMessage, CmdResult};
use crate::bus::ChangeBus;
use crate::data::{cards, groups};
use crate::error::{CardzError, Result};
use crate::index::{resolve_card, resolve_group, Selector};
use crate::model::{FlashcardPatch, NewFlashcard};
use crate::store::RecordStore;

#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    pub group: Option<Selector>,
    /// Case-insensitive substring of the question or the answer.
    pub search: Option<String>,
}

/// Add cards to an existing group. Every card needs a question and an
/// answer; nothing is written unless all of them pass.
pub fn add<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    group: &Selector,
    new_cards: Vec<NewFlashcard>,
) -> Result<CmdResult> {
    if new_cards.is_empty() {
        return Err(CardzError::Api("Add at least one flashcard".to_string()));
    }
    let new_cards = new_cards
        .iter()
        .map(|card| -> Result<NewFlashcard> {
            Ok(NewFlashcard::new(
                required("Question", &card.question)?,
                required("Answer", &card.answer)?,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let all_groups = groups::load_groups(store);
    let target = resolve_group(&all_groups, group)?;

    let added = cards::add_flashcards(store, bus, &target.id, new_cards)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} flashcard(s) created in {}",
        added.len(),
        target.name
    )));
    result.affected_cards = added;
    Ok(result)
}

pub fn list<S: RecordStore + ?Sized>(store: &S, filter: &CardFilter) -> Result<CmdResult> {
    let all_groups = groups::load_groups(store);
    let group_id = filter
        .group
        .as_ref()
        .map(|sel| resolve_group(&all_groups, sel).map(|g| g.id.clone()))
        .transpose()?;
    let term = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let rows = cards::load_flashcards(store)
        .into_iter()
        .enumerate()
        .filter(|(_, card)| group_id.as_ref().map_or(true, |id| &card.group_id == id))
        .filter(|(_, card)| term.map_or(true, |t| card.matches(t)))
        .map(|(i, card)| CardRow {
            index: i + 1,
            group_name: all_groups
                .iter()
                .find(|g| g.id == card.group_id)
                .map(|g| g.name.clone()),
            card,
        })
        .collect();

    Ok(CmdResult::default().with_listed_cards(rows))
}

pub fn update<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    selector: &Selector,
    question: Option<&str>,
    answer: Option<&str>,
    group: Option<&Selector>,
) -> Result<CmdResult> {
    if question.is_none() && answer.is_none() && group.is_none() {
        return Err(CardzError::Api(
            "Nothing to update: give a question, answer or group".to_string(),
        ));
    }

    let all_groups = groups::load_groups(store);
    let patch = FlashcardPatch {
        question: question.map(|q| required("Question", q)).transpose()?,
        answer: answer.map(|a| required("Answer", a)).transpose()?,
        group_id: group
            .map(|sel| resolve_group(&all_groups, sel).map(|g| g.id.clone()))
            .transpose()?,
    };

    let all_cards = cards::load_flashcards(store);
    let target = resolve_card(&all_cards, selector)?;

    let mut result = CmdResult::default();
    if cards::update_flashcard(store, bus, &target.id, &patch)? {
        let mut updated = target.clone();
        updated.apply(&patch);
        result.add_message(CmdMessage::success(format!(
            "Flashcard updated: {}",
            updated.question
        )));
        result.affected_cards.push(updated);
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Flashcard {} was removed before it could be updated",
            selector
        )));
    }
    Ok(result)
}

pub fn delete<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    selector: &Selector,
) -> Result<CmdResult> {
    let all_cards = cards::load_flashcards(store);
    let target = resolve_card(&all_cards, selector)?;

    let mut result = CmdResult::default();
    if cards::delete_flashcard(store, bus, &target.id)? {
        result.add_message(CmdMessage::success(format!(
            "Flashcard deleted: {}",
            target.question
        )));
        result.affected_cards.push(target.clone());
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Flashcard {} was already gone",
            selector
        )));
    }
    Ok(result)
}
