//! Types for the document store collaborator

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::ID_FIELD;

/// Errors raised by a document store.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("Malformed document in collection {collection}: {reason}")]
	MalformedDocument { collection: String, reason: String },

	#[error("Persistence backend error: {0}")]
	Backend(String),
}

/// Opaque persistence key of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Read an id out of a JSON value. Strings and numbers are accepted.
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
			Value::Number(n) => Some(Self(n.to_string())),
			_ => None,
		}
	}
}

impl fmt::Display for DocumentId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for DocumentId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<u64> for DocumentId {
	fn from(id: u64) -> Self {
		Self(id.to_string())
	}
}

/// A persisted JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style field setter.
	pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(field.into(), value.into());
		self
	}

	pub fn get(&self, field: &str) -> Option<&Value> {
		self.0.get(field)
	}

	pub fn get_str(&self, field: &str) -> Option<&str> {
		self.0.get(field).and_then(Value::as_str)
	}

	pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
		self.0.insert(field.into(), value.into())
	}

	pub fn fields(&self) -> &Map<String, Value> {
		&self.0
	}
}

impl From<Map<String, Value>> for Document {
	fn from(fields: Map<String, Value>) -> Self {
		Self(fields)
	}
}

impl TryFrom<Value> for Document {
	type Error = PersistenceError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(fields) => Ok(Self(fields)),
			other => Err(PersistenceError::Backend(format!(
				"Expected a JSON object for a document, got {}",
				other
			))),
		}
	}
}

/// Document filter. An empty query matches every document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Query(Map<String, Value>);

impl Query {
	/// The blank query; matches all documents in a collection.
	pub fn all() -> Self {
		Self::default()
	}

	/// Match the single document whose id is `id`.
	pub fn by_id(id: &DocumentId) -> Self {
		Self::all().field_eq(ID_FIELD, id.as_str())
	}

	/// Add a field equality constraint.
	pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
		self.0.insert(field.into(), value.into());
		self
	}

	pub fn is_match_all(&self) -> bool {
		self.0.is_empty()
	}

	/// Check whether a document satisfies every constraint of the query
	///
	/// Ids compare in their normalized form, so a stored numeric `_id` of `1` matches `"1"`.
	pub fn matches(&self, document: &Document) -> bool {
		self.0.iter().all(|(field, expected)| match document.get(field) {
			Some(actual) if field == ID_FIELD => {
				actual == expected
					|| DocumentId::from_value(actual)
						.is_some_and(|id| DocumentId::from_value(expected) == Some(id))
			}
			actual => actual == Some(expected),
		})
	}
}

/// Options applied to a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
	/// Maximum number of documents to return. `None` returns everything.
	pub limit: Option<usize>,
}

impl QueryOptions {
	pub fn with_limit(limit: usize) -> Self {
		Self { limit: Some(limit) }
	}
}
