use crate::wallets::BootstrapError;

use tracing::{error, info, warn};

/// Terminal result of a bootstrap run, as delivered to the host
pub enum BootstrapOutcome<'a, W> {
	/// Every record was processed. Holds the unlocked wallets in enumeration order.
	Success(&'a [W]),
	/// The run was aborted by this error.
	Failure(&'a BootstrapError),
}

impl<W> Clone for BootstrapOutcome<'_, W> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<W> Copy for BootstrapOutcome<'_, W> {}

impl<'a, W> BootstrapOutcome<'a, W> {
	pub fn is_success(&self) -> bool {
		matches!(self, BootstrapOutcome::Success(_))
	}

	pub fn wallets(&self) -> Option<&'a [W]> {
		match *self {
			BootstrapOutcome::Success(wallets) => Some(wallets),
			BootstrapOutcome::Failure(_) => None,
		}
	}

	pub fn error(&self) -> Option<&'a BootstrapError> {
		match *self {
			BootstrapOutcome::Success(_) => None,
			BootstrapOutcome::Failure(error) => Some(error),
		}
	}
}

/// Continuation invoked once with the outcome of a run.
pub type CompletionCallback<W> = Box<dyn FnOnce(BootstrapOutcome<'_, W>) + Send>;

/// Delivers the outcome of a run to the host's completion callback, at most once.
pub struct CompletionReporter<W> {
	on_completion: Option<CompletionCallback<W>>,
	reported: bool,
}

impl<W> CompletionReporter<W> {
	pub fn new(on_completion: Option<CompletionCallback<W>>) -> Self {
		Self {
			on_completion,
			reported: false,
		}
	}

	pub fn has_reported(&self) -> bool {
		self.reported
	}

	/// Report `outcome`. Returns whether a callback was invoked.
	///
	/// Only the first report of a run reaches the callback. A missing callback is logged.
	pub fn report(&mut self, outcome: BootstrapOutcome<'_, W>) -> bool {
		if self.reported {
			warn!("Wallets bootstrap outcome already reported, ignoring");
			return false;
		}
		self.reported = true;

		match outcome {
			BootstrapOutcome::Success(wallets) => {
				info!("Wallets bootstrap succeeded with {} wallets", wallets.len());
			}
			BootstrapOutcome::Failure(e) => {
				error!("Wallets bootstrap failed: {}", e);
			}
		}

		match self.on_completion.take() {
			Some(callback) => {
				callback(outcome);
				true
			}
			None => {
				warn!("No completion callback provided to WalletsController");
				false
			}
		}
	}
}
