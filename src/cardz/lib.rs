//! # Cardz Architecture
//!
//! Cardz is a **UI-agnostic flashcard library**. It is a library that happens
//! to have a CLI client, not a CLI with some library code attached.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders output, reads key presses      │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the store and the change bus                        │
//! │  - Parses selectors, dispatches to commands                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Checks user input, resolves selectors                    │
//! │  - Returns CmdResult with leveled messages                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Data Layer (data/)                                         │
//! │  - Load, create, update, delete groups and flashcards       │
//! │  - Emits a signal on the bus after every persisted change   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore trait: string values under string keys      │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Change notification
//!
//! Anything that shows data ([`view::LiveView`], the study screen) subscribes
//! to the [`bus::ChangeBus`] owned by the API and reloads when its signal
//! fires. Signals carry no payload: subscribers re-query the store.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types, and never writes to stdout/stderr or exits the process.
//! Diagnostics go through `tracing`; the binary decides where they end up.
//!
//! ## Testing Strategy
//!
//! 1. **Data and commands**: thorough unit tests against `InMemoryStore`.
//! 2. **API**: dispatch tests.
//! 3. **Store**: filesystem tests in a temp dir (`tests/file_store_test.rs`).
//! 4. **CLI**: argument parsing and rendering unit tests, plus end-to-end runs
//!    of the binary (`tests/cli_e2e.rs`).
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Input checks and results for each command
//! - [`data`]: Collection-level data access for groups and flashcards
//! - [`bus`]: Change notifications
//! - [`view`]: Self-refreshing copies of a collection
//! - [`study`]: Study session sequencing
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`FlashcardGroup`, `Flashcard`, patches)
//! - [`index`]: Selectors (position, id prefix, group name)
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and context setup
//! - [`logging`]: Subscriber setup for binaries
//! - [`error`]: Error types

pub mod api;
pub mod bus;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod index;
pub mod init;
pub mod logging;
pub mod model;
pub mod store;
pub mod study;
pub mod view;
