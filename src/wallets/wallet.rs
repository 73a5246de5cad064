//! Wallet constructor collaborator.

use crate::persistence::{DocumentId, DocumentStore};
use crate::wallets::{Password, WalletError};

use std::sync::Arc;

/// Collaborators shared by the bootstrap and every wallet it constructs
#[derive(Clone)]
pub struct BootstrapContext {
	/// Store holding the persisted wallet records.
	pub persister: Arc<dyn DocumentStore>,
}

impl BootstrapContext {
	pub fn new(persister: Arc<dyn DocumentStore>) -> Self {
		Self { persister }
	}
}

/// Everything a wallet constructor needs to open one persisted record
#[derive(Debug, Clone)]
pub struct WalletInstantiationRequest {
	pub id: DocumentId,
	pub password: Password,
}

/// Constructs and unlocks wallets from persisted records.
///
/// The returned future resolves exactly once, to either the unlocked wallet or the reason it
/// could not be opened, and must not do any further work afterwards.
#[async_trait::async_trait]
pub trait WalletFactory: Send + Sync {
	/// The unlocked wallet type handed back to the host.
	type Wallet: Send;

	async fn instantiate(
		&self,
		request: WalletInstantiationRequest,
		context: &BootstrapContext,
	) -> Result<Self::Wallet, WalletError>;
}
