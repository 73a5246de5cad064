use crate::persistence::{
	Document, DocumentId, DocumentStore, PersistenceError, Query, QueryOptions,
	ensure_document_id, select_documents,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File-based implementation of DocumentStore
///
/// Each collection is a directory under `data_dir` and each document a pretty-printed JSON file
/// named after its id. Queries return documents in ascending file name order.
pub struct FileDocumentStore {
	data_dir: PathBuf,
}

impl FileDocumentStore {
	pub fn new(data_dir: PathBuf) -> Self {
		Self { data_dir }
	}

	pub fn data_dir(&self) -> &Path {
		&self.data_dir
	}

	fn collection_dir(&self, collection: &str) -> Result<PathBuf, PersistenceError> {
		if !is_safe_file_stem(collection) {
			return Err(PersistenceError::Backend(format!(
				"Invalid collection name: {:?}",
				collection
			)));
		}
		Ok(self.data_dir.join(collection))
	}

	fn get_document_filename(
		&self,
		collection: &str,
		id: &DocumentId,
	) -> Result<PathBuf, PersistenceError> {
		if !is_safe_file_stem(id.as_str()) {
			return Err(PersistenceError::MalformedDocument {
				collection: collection.to_string(),
				reason: format!("id {:?} cannot be used as a file name", id.as_str()),
			});
		}
		Ok(self
			.collection_dir(collection)?
			.join(format!("{}.json", id.as_str())))
	}

	async fn read_document(path: &Path) -> Result<Document, PersistenceError> {
		let content = tokio::fs::read_to_string(path).await?;
		let value: serde_json::Value = serde_json::from_str(&content)?;
		Document::try_from(value)
	}
}

#[async_trait::async_trait]
impl DocumentStore for FileDocumentStore {
	async fn documents_with_query(
		&self,
		collection: &str,
		query: &Query,
		options: &QueryOptions,
	) -> Result<Vec<Document>, PersistenceError> {
		let dir = self.collection_dir(collection)?;
		if !tokio::fs::try_exists(&dir).await? {
			debug!("Collection directory {:?} does not exist yet", dir);
			return Ok(Vec::new());
		}

		let mut entries = tokio::fs::read_dir(&dir).await?;
		let mut paths: Vec<PathBuf> = Vec::new();

		while let Some(entry) = entries.next_entry().await? {
			let path = entry.path();
			if path.extension().and_then(|e| e.to_str()) == Some("json") {
				paths.push(path);
			} else {
				debug!("Ignoring non-document file {:?}", path);
			}
		}
		paths.sort();

		let mut documents = Vec::with_capacity(paths.len());
		for path in &paths {
			documents.push(Self::read_document(path).await?);
		}

		let selected = select_documents(&documents, query, options);
		debug!(
			"Query on collection {} returned {} of {} documents",
			collection,
			selected.len(),
			documents.len()
		);
		Ok(selected)
	}

	async fn insert_document(
		&self,
		collection: &str,
		mut document: Document,
	) -> Result<DocumentId, PersistenceError> {
		let id = ensure_document_id(collection, &mut document)?;
		let filename = self.get_document_filename(collection, &id)?;

		if let Some(parent) = filename.parent() {
			tokio::fs::create_dir_all(parent).await?;
		}

		let content = serde_json::to_string_pretty(&document)?;
		let tmp_filename = filename.with_extension("json.tmp");
		tokio::fs::write(&tmp_filename, content).await?;
		if let Err(e) = tokio::fs::rename(&tmp_filename, &filename).await {
			if let Err(cleanup) = tokio::fs::remove_file(&tmp_filename).await {
				warn!("Failed to remove temporary file {:?}: {}", tmp_filename, cleanup);
			}
			return Err(e.into());
		}

		info!("Saved document {} to {:?}", id, filename);
		Ok(id)
	}
}

fn is_safe_file_stem(name: &str) -> bool {
	!name.is_empty()
		&& name != "."
		&& name != ".."
		&& name
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
