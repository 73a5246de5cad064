//! Password acquisition collaborator.
//!
//! The host decides how a password is obtained (a dialog, a keyring, a test script). The
//! bootstrap asks exactly once per wallet record and never caches or retries the answer.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A candidate wallet password. The buffer is zeroized when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
	pub fn new(password: impl Into<String>) -> Self {
		Self(password.into())
	}

	pub fn expose(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for Password {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("Password(<redacted>)")
	}
}

impl From<&str> for Password {
	fn from(password: &str) -> Self {
		Self::new(password)
	}
}

/// Answer of the password prompt for a single wallet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordResponse {
	/// Try to unlock the wallet with this password.
	TryWith(Password),
	/// Leave this wallet locked for the rest of the run.
	Skip,
}

impl PasswordResponse {
	pub fn try_with(password: impl Into<String>) -> Self {
		Self::TryWith(Password::new(password))
	}

	pub fn is_skip(&self) -> bool {
		matches!(self, PasswordResponse::Skip)
	}
}

/// Source of wallet passwords, usually backed by a UI prompt.
#[async_trait::async_trait]
pub trait PasswordPrompt: Send + Sync {
	/// Obtain a password to open the wallet labelled `wallet_label`.
	///
	/// Resolves exactly once, with either a candidate password or a skip.
	async fn obtain_password(&self, wallet_label: &str) -> PasswordResponse;
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_password_debug_is_redacted() {
		let password = Password::new("hunter2");
		let rendered = format!("{:?}", PasswordResponse::TryWith(password.clone()));
		assert!(!rendered.contains("hunter2"));
		assert_eq!(password.expose(), "hunter2");
	}

	#[test]
	fn test_response_helpers() {
		assert!(PasswordResponse::Skip.is_skip());
		assert!(!PasswordResponse::try_with("pw").is_skip());
		assert!(Password::new("").is_empty());
	}
}
