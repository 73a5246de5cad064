//! Sequential unlock driver.
//!
//! Walks the enumerated wallet records one at a time: asks the password prompt for the record's
//! label, then either skips the record or hands the password to the wallet factory. Only one
//! prompt or one wallet construction is ever outstanding, and record `n + 1` is not touched until
//! record `n` has resolved.
//!
//! A wallet that fails to unlock ends the whole run under the default
//! [`InstantiationFailurePolicy::AbortRun`]; the remaining records are never prompted for.

use crate::config::InstantiationFailurePolicy;
use crate::utils::display_label;
use crate::wallets::bootstrap::{
	events::{BootstrapEvent, EventDispatcher},
	progress_tracker::BootstrapProgressTracker,
};
use crate::wallets::{
	BootstrapContext, BootstrapError, PasswordPrompt, PasswordResponse, WalletFactory,
	WalletInstantiationRequest, WalletRecordIdentity,
};

use tracing::{debug, error, info, warn};

/// Drives password acquisition and wallet construction for a list of records
pub struct UnlockDriver<'a, F: WalletFactory> {
	password_prompt: &'a dyn PasswordPrompt,
	wallet_factory: &'a F,
	context: &'a BootstrapContext,
	failure_policy: InstantiationFailurePolicy,
}

impl<'a, F: WalletFactory> UnlockDriver<'a, F> {
	pub fn new(
		password_prompt: &'a dyn PasswordPrompt,
		wallet_factory: &'a F,
		context: &'a BootstrapContext,
		failure_policy: InstantiationFailurePolicy,
	) -> Self {
		Self {
			password_prompt,
			wallet_factory,
			context,
			failure_policy,
		}
	}

	/// Process `identities` in order, appending every unlocked wallet to `wallets`.
	///
	/// Returns the first instantiation error when the failure policy aborts the run. Wallets
	/// unlocked before the failure stay in `wallets`.
	pub async fn run(
		&self,
		identities: Vec<WalletRecordIdentity>,
		wallets: &mut Vec<F::Wallet>,
		event_dispatcher: &mut EventDispatcher,
		progress_tracker: &mut BootstrapProgressTracker,
	) -> Result<(), BootstrapError> {
		let total = identities.len();

		for (position, identity) in identities.into_iter().enumerate() {
			debug!(
				"Requesting password for wallet {} ({}/{})",
				identity,
				position + 1,
				total
			);
			progress_tracker.record_password_requested();
			event_dispatcher
				.dispatch(&BootstrapEvent::PasswordRequested {
					identity: identity.clone(),
				})
				.await;

			let password = match self
				.password_prompt
				.obtain_password(&identity.label)
				.await
			{
				PasswordResponse::Skip => {
					info!("Skipping wallet {}", identity);
					progress_tracker.record_skipped();
					event_dispatcher
						.dispatch(&BootstrapEvent::WalletSkipped { identity })
						.await;
					continue;
				}
				PasswordResponse::TryWith(password) => password,
			};

			if password.is_empty() {
				warn!(
					"Empty password supplied for wallet {}, attempting anyway",
					display_label(&identity.label)
				);
			}

			let request = WalletInstantiationRequest {
				id: identity.id.clone(),
				password,
			};

			match self.wallet_factory.instantiate(request, self.context).await {
				Ok(wallet) => {
					info!("Unlocked wallet {}", identity);
					wallets.push(wallet);
					progress_tracker.record_instantiated();
					event_dispatcher
						.dispatch(&BootstrapEvent::WalletInstantiated { identity })
						.await;
				}
				Err(e) => {
					error!("Failed to read wallet {}: {}", identity, e);
					progress_tracker.record_failed();
					event_dispatcher
						.dispatch(&BootstrapEvent::WalletFailed {
							identity: identity.clone(),
							error: e.to_string(),
						})
						.await;

					match self.failure_policy {
						InstantiationFailurePolicy::AbortRun => {
							return Err(BootstrapError::Instantiation {
								id: identity.id,
								label: identity.label,
								source: e,
							});
						}
						#[cfg(feature = "continue-on-failure")]
						InstantiationFailurePolicy::SkipWallet => {
							warn!("Continuing bootstrap without wallet {}", identity);
						}
					}
				}
			}
		}

		progress_tracker.log_progress();
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::persistence::MemoryDocumentStore;
	use crate::wallets::{Password, WalletError};
	use std::collections::VecDeque;
	use std::sync::{Arc, Mutex};

	struct ScriptedPrompt {
		responses: Mutex<VecDeque<PasswordResponse>>,
		asked: Mutex<Vec<String>>,
	}

	impl ScriptedPrompt {
		fn new(responses: Vec<PasswordResponse>) -> Self {
			Self {
				responses: Mutex::new(responses.into()),
				asked: Mutex::new(Vec::new()),
			}
		}
	}

	#[async_trait::async_trait]
	impl PasswordPrompt for ScriptedPrompt {
		async fn obtain_password(&self, wallet_label: &str) -> PasswordResponse {
			self.asked.lock().unwrap().push(wallet_label.to_string());
			self.responses
				.lock()
				.unwrap()
				.pop_front()
				.unwrap_or(PasswordResponse::Skip)
		}
	}

	/// Unlocks a wallet when the password is `pw<id>`.
	struct MatchingFactory {
		attempts: Mutex<Vec<String>>,
	}

	#[async_trait::async_trait]
	impl WalletFactory for MatchingFactory {
		type Wallet = String;

		async fn instantiate(
			&self,
			request: WalletInstantiationRequest,
			_context: &BootstrapContext,
		) -> Result<String, WalletError> {
			self.attempts
				.lock()
				.unwrap()
				.push(request.id.to_string());
			if request.password == Password::new(format!("pw{}", request.id)) {
				Ok(format!("wallet-{}", request.id))
			} else {
				Err(WalletError::Decryption("bad password".to_string()))
			}
		}
	}

	fn identities() -> Vec<WalletRecordIdentity> {
		vec![
			WalletRecordIdentity::new(1u64, "A"),
			WalletRecordIdentity::new(2u64, "B"),
			WalletRecordIdentity::new(3u64, "C"),
		]
	}

	#[tokio::test]
	async fn test_skip_makes_no_construction_attempt() {
		let prompt = ScriptedPrompt::new(vec![
			PasswordResponse::try_with("pw1"),
			PasswordResponse::Skip,
			PasswordResponse::try_with("pw3"),
		]);
		let factory = MatchingFactory {
			attempts: Mutex::new(Vec::new()),
		};
		let context = BootstrapContext::new(Arc::new(MemoryDocumentStore::new()));
		let driver = UnlockDriver::new(
			&prompt,
			&factory,
			&context,
			InstantiationFailurePolicy::AbortRun,
		);

		let mut wallets = Vec::new();
		let mut tracker = BootstrapProgressTracker::new();
		tracker.record_enumerated(3);
		driver
			.run(
				identities(),
				&mut wallets,
				&mut EventDispatcher::new(),
				&mut tracker,
			)
			.await
			.unwrap();

		assert_eq!(wallets, vec!["wallet-1", "wallet-3"]);
		assert_eq!(*factory.attempts.lock().unwrap(), vec!["1", "3"]);
		assert_eq!(*prompt.asked.lock().unwrap(), vec!["A", "B", "C"]);
		assert!(tracker.validate_completion().is_ok());
	}

	#[tokio::test]
	async fn test_failure_aborts_remaining_records() {
		let prompt = ScriptedPrompt::new(vec![
			PasswordResponse::try_with("pw1"),
			PasswordResponse::try_with("wrong"),
			PasswordResponse::try_with("pw3"),
		]);
		let factory = MatchingFactory {
			attempts: Mutex::new(Vec::new()),
		};
		let context = BootstrapContext::new(Arc::new(MemoryDocumentStore::new()));
		let driver = UnlockDriver::new(
			&prompt,
			&factory,
			&context,
			InstantiationFailurePolicy::AbortRun,
		);

		let mut wallets = Vec::new();
		let mut tracker = BootstrapProgressTracker::new();
		tracker.record_enumerated(3);
		let result = driver
			.run(
				identities(),
				&mut wallets,
				&mut EventDispatcher::new(),
				&mut tracker,
			)
			.await;

		match result {
			Err(BootstrapError::Instantiation { id, label, source }) => {
				assert_eq!(id.as_str(), "2");
				assert_eq!(label, "B");
				assert!(matches!(source, WalletError::Decryption(_)));
			}
			other => panic!("expected instantiation failure, got {:?}", other),
		}
		assert_eq!(wallets, vec!["wallet-1"]);
		assert_eq!(*prompt.asked.lock().unwrap(), vec!["A", "B"]);
		assert_eq!(tracker.unprocessed(), 1);
	}

	#[cfg(feature = "continue-on-failure")]
	#[tokio::test]
	async fn test_skip_wallet_policy_continues_after_failure() {
		let prompt = ScriptedPrompt::new(vec![
			PasswordResponse::try_with("wrong"),
			PasswordResponse::try_with("pw2"),
			PasswordResponse::Skip,
		]);
		let factory = MatchingFactory {
			attempts: Mutex::new(Vec::new()),
		};
		let context = BootstrapContext::new(Arc::new(MemoryDocumentStore::new()));
		let driver = UnlockDriver::new(
			&prompt,
			&factory,
			&context,
			InstantiationFailurePolicy::SkipWallet,
		);

		let mut wallets = Vec::new();
		let mut tracker = BootstrapProgressTracker::new();
		tracker.record_enumerated(3);
		driver
			.run(
				identities(),
				&mut wallets,
				&mut EventDispatcher::new(),
				&mut tracker,
			)
			.await
			.unwrap();

		assert_eq!(wallets, vec!["wallet-2"]);
		assert_eq!(tracker.get_stats().wallets_failed, 1);
		assert_eq!(*prompt.asked.lock().unwrap(), vec!["A", "B", "C"]);
	}
}
