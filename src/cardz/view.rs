//! Live copies of a collection for UI clients.
//!
//! A [`LiveView`] keeps its own, possibly stale, copy of one collection and
//! reloads it from the store whenever the matching signal fires. Dropping the
//! view drops its subscription with it.

use crate::bus::{ChangeBus, Signal, Subscription};
use crate::data::{cards, groups};
use crate::model::{Flashcard, FlashcardGroup};
use crate::store::RecordStore;
use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

pub struct LiveView<T> {
    items: Rc<RefCell<Vec<T>>>,
    reloads: Rc<Cell<usize>>,
    _subscription: Subscription,
}

impl<T: 'static> LiveView<T> {
    fn with_loader<S, L>(store: Rc<S>, bus: &ChangeBus, signal: Signal, loader: L) -> Self
    where
        S: RecordStore + ?Sized + 'static,
        L: Fn(&S) -> Vec<T> + 'static,
    {
        let items = Rc::new(RefCell::new(loader(&*store)));
        let reloads = Rc::new(Cell::new(0));

        let target = Rc::clone(&items);
        let counter = Rc::clone(&reloads);
        let subscription = bus.subscribe(signal, move || {
            *target.borrow_mut() = loader(&*store);
            counter.set(counter.get() + 1);
        });

        Self {
            items,
            reloads,
            _subscription: subscription,
        }
    }

    /// The current copy. Do not hold the borrow across calls that mutate the
    /// store, or the reload triggered by that mutation will panic.
    pub fn items(&self) -> Ref<'_, Vec<T>> {
        self.items.borrow()
    }

    /// How many times the view reloaded after a notification.
    pub fn reload_count(&self) -> usize {
        self.reloads.get()
    }
}

impl LiveView<FlashcardGroup> {
    pub fn groups<S: RecordStore + ?Sized + 'static>(store: Rc<S>, bus: &ChangeBus) -> Self {
        Self::with_loader(store, bus, Signal::GroupChanged, |s: &S| groups::load_groups(s))
    }
}

impl LiveView<Flashcard> {
    pub fn flashcards<S: RecordStore + ?Sized + 'static>(store: Rc<S>, bus: &ChangeBus) -> Self {
        Self::with_loader(store, bus, Signal::FlashcardChanged, |s: &S| {
            cards::load_flashcards(s)
        })
    }
}
