//! Bootstrap controller for locally persisted, password-protected wallets.
//!
//! On startup the controller enumerates every persisted wallet record, asks the host for a
//! password for each one in turn, unlocks the wallets it was given passwords for and reports a
//! single success or failure outcome back to the host.

/// Controller configuration
pub mod config;
/// Tracing subscriber setup
pub mod logging;
/// Document store collaborator and its implementations
pub mod persistence;
/// Small shared helpers
pub mod utils;
/// Wallet collaborators and the bootstrap pipeline
pub mod wallets;

pub use config::{BootstrapConfig, InstantiationFailurePolicy};
pub use persistence::{
	Document, DocumentId, DocumentStore, FileDocumentStore, MemoryDocumentStore, PersistenceError,
	Query, QueryOptions,
};
pub use wallets::bootstrap::{
	BootstrapEvent, BootstrapEventHandler, BootstrapOutcome, BootstrapStats, ControllerState,
	WalletsController, WalletsControllerBuilder,
};
pub use wallets::{
	BootstrapContext, BootstrapError, Password, PasswordPrompt, PasswordResponse, WalletError,
	WalletFactory, WalletInstantiationRequest, WalletRecordIdentity,
};
