//! Tracing subscriber setup for hosts embedding the bootstrap controller.

use tracing_subscriber::EnvFilter;

/// Install a compact fmt subscriber filtered by `RUST_LOG`, defaulting to `info` for this crate.
///
/// Returns `false` when a global subscriber was already installed, in which case nothing changes.
pub fn init_tracing() -> bool {
	init_tracing_with_directive("wallets_bootstrap=info")
}

/// Same as [`init_tracing`] with a caller supplied default directive.
pub fn init_tracing_with_directive(default_directive: &str) -> bool {
	let filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(default_directive))
		.unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_file(false)
		.with_line_number(false)
		.try_init()
		.is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_second_init_is_a_no_op() {
		init_tracing_with_directive("debug");
		assert!(!init_tracing());
	}
}
