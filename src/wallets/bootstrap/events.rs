//! Event system for the wallets bootstrap.
//!
//! The unlock driver and the controller emit a [`BootstrapEvent`] at every step of a run. Hosts
//! register [`BootstrapEventHandler`]s to observe progress (update a splash screen, collect
//! metrics, audit which wallets were skipped) without being able to influence the run itself.

use crate::wallets::WalletRecordIdentity;

/// Error type returned by event handlers.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Events that occur during a bootstrap run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapEvent {
	/// The persisted wallet records were enumerated
	RecordsEnumerated { count: usize },
	/// The password prompt is about to be asked for this wallet
	PasswordRequested { identity: WalletRecordIdentity },
	/// The host declined to supply a password for this wallet
	WalletSkipped { identity: WalletRecordIdentity },
	/// The wallet was constructed and unlocked
	WalletInstantiated { identity: WalletRecordIdentity },
	/// The wallet could not be unlocked with the supplied password
	WalletFailed {
		identity: WalletRecordIdentity,
		error: String,
	},
	/// The run finished successfully
	BootstrapCompleted { wallet_count: usize },
	/// The run was aborted
	BootstrapFailed { error: String },
}

impl BootstrapEvent {
	/// Whether this event ends a run.
	pub fn is_terminal(&self) -> bool {
		matches!(
			self,
			BootstrapEvent::BootstrapCompleted { .. } | BootstrapEvent::BootstrapFailed { .. }
		)
	}
}

/// Trait for handling bootstrap events.
#[async_trait::async_trait]
pub trait BootstrapEventHandler: Send + Sync {
	/// Handle a bootstrap event.
	async fn handle(&mut self, event: &BootstrapEvent) -> Result<(), HandlerError>;

	/// Get the name of this handler for logging and diagnostics.
	fn name(&self) -> &'static str;
}

/// Event dispatcher that manages multiple event handlers.
///
/// Handlers are called in registration order. A failing handler is logged and skipped; it never
/// stops the other handlers or the bootstrap run.
#[derive(Default)]
pub struct EventDispatcher {
	handlers: Vec<Box<dyn BootstrapEventHandler>>,
}

impl EventDispatcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register_handler(&mut self, handler: Box<dyn BootstrapEventHandler>) {
		self.handlers.push(handler);
	}

	pub fn handler_count(&self) -> usize {
		self.handlers.len()
	}

	/// Dispatch an event to all registered handlers.
	pub async fn dispatch(&mut self, event: &BootstrapEvent) {
		for handler in &mut self.handlers {
			if let Err(e) = handler.handle(event).await {
				tracing::error!("Handler {} failed to process event: {}", handler.name(), e);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::{Arc, Mutex};

	struct Recorder {
		seen: Arc<Mutex<Vec<BootstrapEvent>>>,
	}

	#[async_trait::async_trait]
	impl BootstrapEventHandler for Recorder {
		async fn handle(&mut self, event: &BootstrapEvent) -> Result<(), HandlerError> {
			self.seen.lock().unwrap().push(event.clone());
			Ok(())
		}

		fn name(&self) -> &'static str {
			"Recorder"
		}
	}

	struct Failing;

	#[async_trait::async_trait]
	impl BootstrapEventHandler for Failing {
		async fn handle(&mut self, _event: &BootstrapEvent) -> Result<(), HandlerError> {
			Err("handler exploded".into())
		}

		fn name(&self) -> &'static str {
			"Failing"
		}
	}

	#[tokio::test]
	async fn test_failing_handler_does_not_block_others() {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let mut dispatcher = EventDispatcher::new();
		dispatcher.register_handler(Box::new(Failing));
		dispatcher.register_handler(Box::new(Recorder { seen: seen.clone() }));
		assert_eq!(dispatcher.handler_count(), 2);

		dispatcher
			.dispatch(&BootstrapEvent::RecordsEnumerated { count: 3 })
			.await;

		assert_eq!(
			*seen.lock().unwrap(),
			vec![BootstrapEvent::RecordsEnumerated { count: 3 }]
		);
	}

	#[test]
	fn test_terminal_events() {
		assert!(BootstrapEvent::BootstrapCompleted { wallet_count: 0 }.is_terminal());
		assert!(
			BootstrapEvent::BootstrapFailed {
				error: "x".to_string()
			}
			.is_terminal()
		);
		assert!(!BootstrapEvent::RecordsEnumerated { count: 1 }.is_terminal());
	}
}
