use crate::config::BootstrapConfig;
use crate::persistence::{Document, DocumentId, PersistenceError, Query, QueryOptions};
use crate::wallets::{BootstrapContext, WalletRecordIdentity};

use tracing::{debug, error, info};

/// Lists the persisted wallet records as id/label pairs.
pub struct RecordEnumerator<'a> {
	context: &'a BootstrapContext,
	config: &'a BootstrapConfig,
}

impl<'a> RecordEnumerator<'a> {
	pub fn new(context: &'a BootstrapContext, config: &'a BootstrapConfig) -> Self {
		Self { context, config }
	}

	/// Query every document of the wallet collection and project it onto its identity.
	///
	/// Order is whatever the store returns. Query errors are returned as-is.
	pub async fn enumerate(&self) -> Result<Vec<WalletRecordIdentity>, PersistenceError> {
		let documents = self
			.context
			.persister
			.documents_with_query(
				&self.config.collection_name,
				&Query::all(),
				&QueryOptions::default(),
			)
			.await
			.map_err(|e| {
				error!(
					"Failed to query collection {}: {}",
					self.config.collection_name, e
				);
				e
			})?;

		let identities = documents
			.iter()
			.map(|document| self.project(document))
			.collect::<Result<Vec<_>, _>>()?;

		info!(
			"Found {} persisted wallets in collection {}",
			identities.len(),
			self.config.collection_name
		);
		Ok(identities)
	}

	/// Reduce a stored wallet document to its id and label
	pub fn project(&self, document: &Document) -> Result<WalletRecordIdentity, PersistenceError> {
		let id = document
			.get(&self.config.id_field)
			.and_then(DocumentId::from_value)
			.ok_or_else(|| PersistenceError::MalformedDocument {
				collection: self.config.collection_name.clone(),
				reason: format!("wallet document has no usable {}", self.config.id_field),
			})?;

		let label = match document.get_str(&self.config.label_field) {
			Some(label) => label.to_string(),
			None => {
				debug!("Wallet document {} has no {}", id, self.config.label_field);
				String::new()
			}
		};

		Ok(WalletRecordIdentity { id, label })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::persistence::{DocumentStore, MemoryDocumentStore};
	use std::sync::Arc;

	async fn context_with(docs: Vec<Document>) -> BootstrapContext {
		let store = MemoryDocumentStore::new();
		for doc in docs {
			store.insert_document("Wallets", doc).await.unwrap();
		}
		BootstrapContext::new(Arc::new(store))
	}

	fn wallet_doc(id: u64, label: &str) -> Document {
		Document::new()
			.with_field("_id", id)
			.with_field("walletLabel", label)
			.with_field("encryptedSecret", "deadbeef")
	}

	#[tokio::test]
	async fn test_projects_ids_and_labels_in_store_order() {
		let context =
			context_with(vec![wallet_doc(2, "B"), wallet_doc(1, "A"), wallet_doc(3, "C")]).await;
		let config = BootstrapConfig::default();

		let identities = RecordEnumerator::new(&context, &config)
			.enumerate()
			.await
			.unwrap();

		assert_eq!(
			identities,
			vec![
				WalletRecordIdentity::new(2u64, "B"),
				WalletRecordIdentity::new(1u64, "A"),
				WalletRecordIdentity::new(3u64, "C"),
			]
		);
	}

	#[tokio::test]
	async fn test_missing_label_projects_to_empty() {
		let context = context_with(vec![Document::new().with_field("_id", "w1")]).await;
		let config = BootstrapConfig::default();

		let identities = RecordEnumerator::new(&context, &config)
			.enumerate()
			.await
			.unwrap();
		assert_eq!(identities, vec![WalletRecordIdentity::new("w1", "")]);
	}

	#[tokio::test]
	async fn test_other_collections_are_ignored() {
		let store = MemoryDocumentStore::new();
		store
			.insert_document("Settings", wallet_doc(9, "not a wallet"))
			.await
			.unwrap();
		let context = BootstrapContext::new(Arc::new(store));
		let config = BootstrapConfig::default();

		let identities = RecordEnumerator::new(&context, &config)
			.enumerate()
			.await
			.unwrap();
		assert!(identities.is_empty());
	}

	#[test]
	fn test_document_without_id_is_malformed() {
		let context = BootstrapContext::new(Arc::new(MemoryDocumentStore::new()));
		let config = BootstrapConfig::default();
		let result = RecordEnumerator::new(&context, &config)
			.project(&Document::new().with_field("walletLabel", "orphan"));
		assert!(matches!(
			result,
			Err(PersistenceError::MalformedDocument { .. })
		));
	}
}
