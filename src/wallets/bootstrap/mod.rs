//! Wallets Bootstrap Module
//!
//! This module opens every persisted wallet when the host application starts. It is composed of
//! several submodules, each responsible for one stage of the pipeline:
//!
//! - `controller`: The entry point. Validates the host's collaborators and runs the pipeline once.
//! - `enumerator`: Lists the persisted wallet records as id/label pairs.
//! - `unlock_driver`: Prompts for each record's password in order and constructs the wallets.
//! - `reporter`: Delivers the single success or failure outcome to the host.
//! - `events`: Event types and handler traits for observing a run.
//! - `progress_tracker`: Counts what happened to each record and summarizes the run.
//!
//! Records are processed strictly one at a time. A skipped password leaves the wallet out of the
//! result; a wallet that fails to unlock aborts the run.

/// Main coordinator for the bootstrap run
pub mod controller;
/// Record enumeration against the document store
pub mod enumerator;
/// Event system for observing a run
pub mod events;
/// Tracks bootstrap progress and statistics
pub mod progress_tracker;
/// Completion reporting
pub mod reporter;
/// Sequential password acquisition and wallet construction
pub mod unlock_driver;

pub use controller::*;
pub use events::{BootstrapEvent, BootstrapEventHandler, EventDispatcher, HandlerError};
pub use progress_tracker::BootstrapStats;
pub use reporter::{BootstrapOutcome, CompletionCallback};
