//! Configuration for the wallets bootstrap.

use serde::Deserialize;

/// What the unlock driver does when a wallet fails to unlock with the password it was given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstantiationFailurePolicy {
	/// Stop processing and fail the whole run with the wallet's error.
	#[default]
	AbortRun,
	/// Log the failure, leave the wallet out and continue with the next record.
	#[cfg(feature = "continue-on-failure")]
	SkipWallet,
}

/// Configuration for a wallets controller
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
	/// Collection holding the persisted wallet records.
	pub collection_name: String,
	/// Document field the enumerator reads each record's id from.
	///
	/// Only the projection uses it. The stores always key and deduplicate documents on
	/// [`ID_FIELD`](crate::persistence::ID_FIELD), so `Query::by_id` lookups made by a wallet
	/// factory find records by that field.
	pub id_field: String,
	/// Document field carrying the human-readable wallet label.
	pub label_field: String,
	/// Behavior when a wallet cannot be unlocked.
	pub on_instantiation_failure: InstantiationFailurePolicy,
}

impl Default for BootstrapConfig {
	fn default() -> Self {
		Self {
			collection_name: "Wallets".to_string(),
			id_field: crate::persistence::ID_FIELD.to_string(),
			label_field: "walletLabel".to_string(),
			on_instantiation_failure: InstantiationFailurePolicy::AbortRun,
		}
	}
}

impl BootstrapConfig {
	/// Parse a configuration from JSON. Missing keys keep their defaults.
	pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	pub fn with_collection_name(mut self, collection_name: impl Into<String>) -> Self {
		self.collection_name = collection_name.into();
		self
	}

	pub fn with_failure_policy(mut self, policy: InstantiationFailurePolicy) -> Self {
		self.on_instantiation_failure = policy;
		self
	}
}
