//! Interactive study loop.
//!
//! The session keeps its deck in sync through a live view of the flashcards:
//! whenever the view reloads (including after a card is deleted from this
//! screen), the session is refreshed before the next frame is drawn.

use super::render::{print_messages, render_study_screen};
use cardz::api::{CardzApi, CmdMessage};
use cardz::error::{CardzError, Result};
use cardz::model::CardId;
use cardz::store::RecordStore;
use cardz::study::{Ordering, StudySession};
use console::{Key, Term};
use rand::Rng;

#[derive(Debug, PartialEq, Eq)]
pub(super) enum Action {
    Continue,
    Delete(CardId),
    Quit,
}

/// Apply one key press to the session.
pub(super) fn handle_key<R: Rng + ?Sized>(
    session: &mut StudySession,
    key: &Key,
    rng: &mut R,
) -> Action {
    match key {
        Key::ArrowRight | Key::Char('n') => {
            session.next();
        }
        Key::ArrowLeft | Key::Char('p') => {
            session.previous();
        }
        Key::Char(' ') | Key::Char('f') => session.flip(),
        Key::Char('s') => session.shuffle(rng),
        Key::Char('x') => {
            if let Some(card) = session.current() {
                return Action::Delete(card.id.clone());
            }
        }
        Key::Char('q') | Key::Escape => return Action::Quit,
        _ => {}
    }
    Action::Continue
}

/// Run the terminal cleanup whatever the session outcome was. A session
/// error wins over a cleanup error.
fn restore_after<F>(outcome: Result<()>, restore: F) -> Result<()>
where
    F: FnOnce() -> std::io::Result<()>,
{
    let restored = restore().map_err(CardzError::Io);
    outcome.and(restored)
}

pub(super) fn run<S: RecordStore + 'static>(
    api: &CardzApi<S>,
    group: Option<&str>,
    ordering: Ordering,
) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut session = api.study(group, ordering, &mut rng)?;
    if session.is_empty() {
        print_messages(&[CmdMessage::info("No flashcards to study.")]);
        return Ok(());
    }

    let term = Term::stdout();
    if !term.is_term() {
        return Err(CardzError::Api(
            "study needs an interactive terminal".to_string(),
        ));
    }

    let cards = api.watch_cards();
    let groups = api.watch_groups();
    let mut seen_reloads = cards.reload_count();

    term.hide_cursor()?;
    let outcome = loop {
        if cards.reload_count() != seen_reloads {
            seen_reloads = cards.reload_count();
            session.refresh(&cards.items());
            tracing::debug!(remaining = session.len(), "study deck refreshed");
        }
        if session.is_empty() {
            break Ok(());
        }

        let group_name = session
            .current()
            .and_then(|card| {
                groups
                    .items()
                    .iter()
                    .find(|g| g.id == card.group_id)
                    .map(|g| g.name.clone())
            });
        let drawn = term
            .clear_screen()
            .and_then(|_| term.write_str(&render_study_screen(&session, group_name.as_deref())));
        if let Err(e) = drawn {
            break Err(CardzError::Io(e));
        }

        let key = match term.read_key() {
            Ok(key) => key,
            Err(e) => break Err(CardzError::Io(e)),
        };
        match handle_key(&mut session, &key, &mut rng) {
            Action::Continue => {}
            Action::Delete(id) => {
                if let Err(e) = api.delete_card_by_id(&id) {
                    break Err(e);
                }
            }
            Action::Quit => break Ok(()),
        }
    };

    let outcome = restore_after(outcome, || {
        term.clear_screen()?;
        term.show_cursor()
    });
    if outcome.is_ok() && session.is_empty() {
        print_messages(&[CmdMessage::info("No flashcards left to study.")]);
    }
    outcome
}
