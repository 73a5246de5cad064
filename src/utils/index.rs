use rand::Rng;

/// Generate a random 128-bit document id, hex encoded.
pub fn generate_document_id() -> String {
	let mut id = [0u8; 16];
	rand::rng().fill(&mut id);
	hex::encode(id)
}

/// Render a wallet label for log output, falling back to a placeholder for unnamed wallets.
pub fn display_label(label: &str) -> &str {
	if label.trim().is_empty() {
		"<unnamed wallet>"
	} else {
		label
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_document_id() {
		let a = generate_document_id();
		let b = generate_document_id();
		assert_eq!(a.len(), 32);
		assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
		assert_ne!(a, b);
	}

	#[test]
	fn test_display_label() {
		assert_eq!(display_label("Savings"), "Savings");
		assert_eq!(display_label("  "), "<unnamed wallet>");
	}
}
