use crate::bus::ChangeBus;
use crate::commands::{CmdMessage, CmdResult};
use crate::data::{cards, groups};
use crate::error::Result;
use crate::model::GroupId;
use crate::store::RecordStore;
use std::collections::HashSet;

/// Look for flashcards whose group no longer exists. With `fix`, remove them.
pub fn run<S: RecordStore + ?Sized>(store: &S, bus: &ChangeBus, fix: bool) -> Result<CmdResult> {
    let live: HashSet<GroupId> = groups::load_groups(store)
        .into_iter()
        .map(|g| g.id)
        .collect();
    let orphans: Vec<_> = cards::load_flashcards(store)
        .into_iter()
        .filter(|c| !live.contains(&c.group_id))
        .collect();

    let mut result = CmdResult::default();
    if orphans.is_empty() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    }

    if !fix {
        result.add_message(CmdMessage::warning(format!(
            "Found {} flashcard(s) whose group no longer exists.",
            orphans.len()
        )));
        result.add_message(CmdMessage::info("Run `cardz doctor --fix` to remove them."));
        result.affected_cards = orphans;
        return Ok(result);
    }

    let removed = cards::delete_flashcards_where(store, bus, |c| !live.contains(&c.group_id))?;
    result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
    result.add_message(CmdMessage::info(format!(
        "  - Removed {} flashcard(s) whose group no longer exists.",
        removed
    )));
    result.affected_cards = orphans;
    Ok(result)
}
