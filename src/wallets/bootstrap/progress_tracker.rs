//! Progress tracking for the wallets bootstrap.
//!
//! The tracker counts what happened to every enumerated record so the host can log a one-line
//! summary of a run and check that every record was accounted for.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Service for tracking bootstrap progress
#[derive(Debug, Clone, Default)]
pub struct BootstrapProgressTracker {
	/// Records returned by the enumerator
	records_enumerated: usize,
	/// Password prompts issued
	passwords_requested: usize,
	/// Records the host declined to unlock
	wallets_skipped: usize,
	/// Wallets constructed and unlocked
	wallets_instantiated: usize,
	/// Wallets that failed to unlock
	wallets_failed: usize,
	started_at: Option<DateTime<Utc>>,
	finished_at: Option<DateTime<Utc>>,
}

impl BootstrapProgressTracker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn start(&mut self) {
		self.started_at = Some(Utc::now());
	}

	pub fn finish(&mut self) {
		self.finished_at = Some(Utc::now());
	}

	pub fn record_enumerated(&mut self, count: usize) {
		self.records_enumerated = count;
	}

	pub fn record_password_requested(&mut self) {
		self.passwords_requested += 1;
	}

	pub fn record_skipped(&mut self) {
		self.wallets_skipped += 1;
	}

	pub fn record_instantiated(&mut self) {
		self.wallets_instantiated += 1;
	}

	pub fn record_failed(&mut self) {
		self.wallets_failed += 1;
	}

	/// Records that were never prompted for, because the run stopped early.
	pub fn unprocessed(&self) -> usize {
		self.records_enumerated
			.saturating_sub(self.passwords_requested)
	}

	/// Log the current counters
	pub fn log_progress(&self) {
		info!(
			"Bootstrap progress: {}/{} wallets prompted, {} unlocked, {} skipped, {} failed",
			self.passwords_requested,
			self.records_enumerated,
			self.wallets_instantiated,
			self.wallets_skipped,
			self.wallets_failed
		);
	}

	/// Check that every prompted record resolved to exactly one outcome
	pub fn validate_completion(&self) -> Result<(), String> {
		let resolved = self.wallets_instantiated + self.wallets_skipped + self.wallets_failed;
		if resolved != self.passwords_requested {
			return Err(format!(
				"{} passwords requested but {} records resolved",
				self.passwords_requested, resolved
			));
		}
		if self.passwords_requested > self.records_enumerated {
			return Err(format!(
				"{} passwords requested for only {} records",
				self.passwords_requested, self.records_enumerated
			));
		}

		let unprocessed = self.unprocessed();
		if unprocessed > 0 {
			warn!("{} wallet records were never processed", unprocessed);
		}
		Ok(())
	}

	pub fn get_stats(&self) -> BootstrapStats {
		BootstrapStats {
			records_enumerated: self.records_enumerated,
			passwords_requested: self.passwords_requested,
			wallets_skipped: self.wallets_skipped,
			wallets_instantiated: self.wallets_instantiated,
			wallets_failed: self.wallets_failed,
			started_at: self.started_at,
			finished_at: self.finished_at,
		}
	}
}

/// Statistics about a bootstrap run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapStats {
	pub records_enumerated: usize,
	pub passwords_requested: usize,
	pub wallets_skipped: usize,
	pub wallets_instantiated: usize,
	pub wallets_failed: usize,
	pub started_at: Option<DateTime<Utc>>,
	pub finished_at: Option<DateTime<Utc>>,
}

impl BootstrapStats {
	/// Wall-clock duration of the run, once it has finished.
	pub fn duration(&self) -> Option<chrono::Duration> {
		match (self.started_at, self.finished_at) {
			(Some(start), Some(end)) => Some(end - start),
			_ => None,
		}
	}

	/// Get a human-readable summary of the bootstrap statistics
	pub fn summary(&self) -> String {
		format!(
			"Bootstrapped {} of {} wallets: {} skipped, {} failed{}",
			self.wallets_instantiated,
			self.records_enumerated,
			self.wallets_skipped,
			self.wallets_failed,
			match self.duration() {
				Some(duration) => format!(" in {}ms", duration.num_milliseconds()),
				None => String::new(),
			}
		)
	}
}
