use crate::persistence::{
	Document, DocumentId, DocumentStore, PersistenceError, Query, QueryOptions,
	ensure_document_id, select_documents,
};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// In-memory implementation of DocumentStore
///
/// Documents are returned in insertion order. Inserting a document whose id already exists in the
/// collection replaces it in place.
#[derive(Default)]
pub struct MemoryDocumentStore {
	collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl MemoryDocumentStore {
	pub fn new() -> Self {
		Self::default()
	}

	fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<Document>>>, PersistenceError> {
		self.collections
			.lock()
			.map_err(|e| PersistenceError::Backend(format!("Document store lock poisoned: {}", e)))
	}
}

#[async_trait::async_trait]
impl DocumentStore for MemoryDocumentStore {
	async fn documents_with_query(
		&self,
		collection: &str,
		query: &Query,
		options: &QueryOptions,
	) -> Result<Vec<Document>, PersistenceError> {
		let guard = self.lock()?;
		let documents = guard
			.get(collection)
			.map(|documents| select_documents(documents, query, options))
			.unwrap_or_default();

		debug!(
			"Query on collection {} returned {} documents",
			collection,
			documents.len()
		);
		Ok(documents)
	}

	async fn insert_document(
		&self,
		collection: &str,
		mut document: Document,
	) -> Result<DocumentId, PersistenceError> {
		let id = ensure_document_id(collection, &mut document)?;

		let mut guard = self.lock()?;
		let documents = guard.entry(collection.to_string()).or_default();
		let existing = documents.iter().position(|stored| {
			stored
				.get(super::ID_FIELD)
				.and_then(DocumentId::from_value)
				.is_some_and(|stored_id| stored_id == id)
		});

		match existing {
			Some(position) => documents[position] = document,
			None => documents.push(document),
		}

		debug!("Stored document {} in collection {}", id, collection);
		Ok(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_insertion_order_and_replace() {
		let store = MemoryDocumentStore::new();
		for (id, label) in [("b", "B"), ("a", "A"), ("c", "C")] {
			store
				.insert_document(
					"Wallets",
					Document::new()
						.with_field("_id", id)
						.with_field("walletLabel", label),
				)
				.await
				.unwrap();
		}
		store
			.insert_document(
				"Wallets",
				Document::new()
					.with_field("_id", "a")
					.with_field("walletLabel", "A2"),
			)
			.await
			.unwrap();

		let docs = store
			.documents_with_query("Wallets", &Query::all(), &QueryOptions::default())
			.await
			.unwrap();
		let labels: Vec<_> = docs.iter().filter_map(|d| d.get_str("walletLabel")).collect();
		assert_eq!(labels, vec!["B", "A2", "C"]);
	}

	#[tokio::test]
	async fn test_query_filter_and_limit() {
		let store = MemoryDocumentStore::new();
		for label in ["A", "B", "A"] {
			store
				.insert_document("Wallets", Document::new().with_field("walletLabel", label))
				.await
				.unwrap();
		}

		let only_a = store
			.documents_with_query(
				"Wallets",
				&Query::all().field_eq("walletLabel", "A"),
				&QueryOptions::default(),
			)
			.await
			.unwrap();
		assert_eq!(only_a.len(), 2);

		let limited = store
			.documents_with_query("Wallets", &Query::all(), &QueryOptions::with_limit(1))
			.await
			.unwrap();
		assert_eq!(limited.len(), 1);
	}

	#[tokio::test]
	async fn test_unknown_collection_is_empty() {
		let store = MemoryDocumentStore::new();
		let docs = store
			.documents_with_query("Nothing", &Query::all(), &QueryOptions::default())
			.await
			.unwrap();
		assert!(docs.is_empty());
	}

	#[tokio::test]
	async fn test_generated_ids() {
		let store = MemoryDocumentStore::new();
		let id = store
			.insert_document("Wallets", Document::new().with_field("walletLabel", "A"))
			.await
			.unwrap();
		let docs = store
			.documents_with_query("Wallets", &Query::all(), &QueryOptions::default())
			.await
			.unwrap();
		assert_eq!(docs[0].get_str("_id"), Some(id.as_str()));
	}
}
