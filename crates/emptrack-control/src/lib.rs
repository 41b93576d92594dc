//! Interactive flows for the emptrack employee tracker.
//!
//! This crate holds everything between the terminal and the store: the main
//! menu, the entry, view, and edit sub-flows, the question lists they ask, and
//! the lookup-or-insert logic for departments and roles.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Prompter (console / scripted)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Controller                          │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐    │
//! │  │   Entry     │ │    View     │ │        Edit         │    │
//! │  │  sub-flows  │ │   reports   │ │   partial update    │    │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                   ┌──────────┴──────────┐
//!                   ▼                     ▼
//!            ┌────────────┐        ┌────────────┐
//!            │  Resolver  │ ─────▶ │   Store    │
//!            │  (upsert)  │        │  (MySQL)   │
//!            └────────────┘        └────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use emptrack_control::{ControlConfig, Controller, Prompter};
//! use emptrack_store::MemoryStore;
//!
//! # async fn example(prompter: &mut dyn Prompter) -> emptrack_control::Result<()> {
//! let store = MemoryStore::new();
//! Controller::new(&store, prompter, ControlConfig::default())
//!     .run()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Entry attempts
//!
//! Every entry attempt ends in a [`FlowOutcome`]:
//!
//! - `Saved` → the new id is shown, then "another / main menu / exit"
//! - `Cancelled` → nothing was written; the sub-flow starts over
//! - `Failed` → the error is shown; the sub-flow starts over, up to
//!   [`ControlConfig::max_attempts`] times in a row

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod entry;

pub mod edit;
pub mod error;
pub mod flow;
pub mod prompt;
pub mod questions;
pub mod resolve;
pub mod types;
pub mod view;

pub use edit::EditTable;
pub use error::{FlowError, Result};
pub use flow::Controller;
pub use prompt::{PromptError, Prompter, Table, Tone};
pub use resolve::{resolve_department, resolve_role, Resolved};
pub use types::{ControlConfig, EntryKind, FlowOutcome, Mode, Next, Saved};
pub use view::Report;

#[cfg(any(test, feature = "test-utils"))]
pub use prompt::{ScriptedPrompter, Transcript};
