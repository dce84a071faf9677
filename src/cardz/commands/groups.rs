use super::{optional, required, CmdMessage, CmdResult, GroupSummary};
use crate::bus::ChangeBus;
use crate::data::{cards, groups};
use crate::error::{CardzError, Result};
use crate::index::{resolve_group, Selector};
use crate::model::GroupPatch;
use crate::store::RecordStore;
use std::collections::HashMap;

pub fn create<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    name: &str,
    description: Option<&str>,
) -> Result<CmdResult> {
    let name = required("Group name", name)?;
    let group = groups::create_group(store, bus, name, optional(description))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Group created: {}", group.name)));
    result.affected_groups.push(group);
    Ok(result)
}

pub fn list<S: RecordStore + ?Sized>(store: &S) -> Result<CmdResult> {
    let mut counts: HashMap<_, usize> = HashMap::new();
    for card in cards::load_flashcards(store) {
        *counts.entry(card.group_id).or_default() += 1;
    }

    let summaries = groups::load_groups(store)
        .into_iter()
        .enumerate()
        .map(|(i, group)| GroupSummary {
            index: i + 1,
            card_count: counts.get(&group.id).copied().unwrap_or(0),
            group,
        })
        .collect();

    Ok(CmdResult::default().with_listed_groups(summaries))
}

/// Rename a group and/or change its description. A blank description clears
/// it.
pub fn update<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    selector: &Selector,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<CmdResult> {
    if name.is_none() && description.is_none() {
        return Err(CardzError::Api(
            "Nothing to update: give a new name or description".to_string(),
        ));
    }

    let patch = GroupPatch {
        name: name.map(|n| required("Group name", n)).transpose()?,
        description: description.map(|d| optional(Some(d))),
    };

    let all = groups::load_groups(store);
    let target = resolve_group(&all, selector)?;

    let mut result = CmdResult::default();
    if groups::update_group(store, bus, &target.id, &patch)? {
        let mut updated = target.clone();
        updated.apply(&patch);
        result.add_message(CmdMessage::success(format!("Group updated: {}", updated.name)));
        result.affected_groups.push(updated);
    } else {
        result.add_message(CmdMessage::warning(format!(
            "Group {} was removed before it could be updated",
            selector
        )));
    }
    Ok(result)
}

/// Delete a group together with all of its cards.
pub fn delete<S: RecordStore + ?Sized>(
    store: &S,
    bus: &ChangeBus,
    selector: &Selector,
) -> Result<CmdResult> {
    let all = groups::load_groups(store);
    let target = resolve_group(&all, selector)?;

    let report = groups::delete_group(store, bus, &target.id)?;
    let mut result = CmdResult::default();
    match report.group {
        Some(group) => {
            result.add_message(CmdMessage::success(format!(
                "Group deleted: {} ({} flashcard(s) removed)",
                group.name, report.cards_removed
            )));
            result.affected_groups.push(group);
        }
        None => result.add_message(CmdMessage::warning(format!(
            "Group {} was already gone",
            selector
        ))),
    }
    Ok(result)
}
