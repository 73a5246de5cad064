use crate::persistence::{DocumentId, PersistenceError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a persisted wallet record, projected from its stored document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecordIdentity {
	pub id: DocumentId,
	pub label: String,
}

impl WalletRecordIdentity {
	pub fn new(id: impl Into<DocumentId>, label: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: label.into(),
		}
	}
}

impl fmt::Display for WalletRecordIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{} ({})",
			crate::utils::display_label(&self.label),
			self.id
		)
	}
}

/// Errors raised by a wallet constructor
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
	#[error("Decryption error: {0}")]
	Decryption(String),

	#[error("Corrupt wallet record: {0}")]
	CorruptRecord(String),

	#[error("Persistence error: {0}")]
	Persistence(#[from] PersistenceError),

	#[error("Wallet error: {0}")]
	Other(String),
}

/// Errors surfaced by the wallets bootstrap
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
	#[error("Error fetching persisted wallet ids: {0}")]
	Enumeration(#[source] PersistenceError),

	#[error("Failed to read wallet {label:?} ({id}): {source}")]
	Instantiation {
		id: DocumentId,
		label: String,
		#[source]
		source: WalletError,
	},

	#[error("Configuration error: {0}")]
	Configuration(String),

	#[error("Wallets bootstrap has already run for this controller")]
	AlreadyBootstrapped,
}
