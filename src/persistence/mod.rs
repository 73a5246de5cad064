//! Document persistence collaborator
//!
//! The bootstrap controller never stores anything itself. It reads persisted wallet records
//! through the [`DocumentStore`] trait, which mirrors a small document database: named
//! collections of JSON documents, queried with a field filter and options.

/// File-backed document store
mod file;
/// In-memory document store
mod memory;
/// Document, query and error types
mod types;

pub use file::FileDocumentStore;
pub use memory::MemoryDocumentStore;
pub use types::*;

/// Field holding the persistence key of every document.
pub const ID_FIELD: &str = "_id";

/// Document store queried by the bootstrap pipeline and by wallet constructors
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
	/// Return the documents of `collection` matching `query`, in the store's native order.
	async fn documents_with_query(
		&self,
		collection: &str,
		query: &Query,
		options: &QueryOptions,
	) -> Result<Vec<Document>, PersistenceError>;

	/// Persist a document, assigning an id when it has none. Returns the document's id.
	async fn insert_document(
		&self,
		collection: &str,
		document: Document,
	) -> Result<DocumentId, PersistenceError>;
}

/// Return the id of `document`, generating and storing one if it has none.
pub(crate) fn ensure_document_id(
	collection: &str,
	document: &mut Document,
) -> Result<DocumentId, PersistenceError> {
	match document.get(ID_FIELD) {
		Some(value) => DocumentId::from_value(value).ok_or_else(|| {
			PersistenceError::MalformedDocument {
				collection: collection.to_string(),
				reason: format!("unusable {} value: {}", ID_FIELD, value),
			}
		}),
		None => {
			let id = DocumentId::new(crate::utils::generate_document_id());
			document.insert(ID_FIELD, id.as_str());
			Ok(id)
		}
	}
}

/// Filter documents with `query` and apply `options`, keeping the input order.
pub(crate) fn select_documents<'a>(
	documents: impl IntoIterator<Item = &'a Document>,
	query: &Query,
	options: &QueryOptions,
) -> Vec<Document> {
	documents
		.into_iter()
		.filter(|document| query.matches(document))
		.take(options.limit.unwrap_or(usize::MAX))
		.cloned()
		.collect()
}
