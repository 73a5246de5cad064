//! Wallets controller and integration point for the bootstrap pipeline.
//!
//! This module defines the `WalletsController`, which owns the collaborators handed to it by the
//! host and runs the bootstrap sequence: enumerate the persisted wallet records, unlock them one
//! at a time, and report a single outcome.
//!
//! The controller is responsible for:
//! - Validating its configuration synchronously at construction
//! - Running the pipeline exactly once and tracking its lifecycle state
//! - Owning the unlocked wallets after the run so the host can query them
//! - Delivering the outcome to the completion callback and to registered event handlers

use crate::config::BootstrapConfig;
use crate::persistence::DocumentStore;
use crate::wallets::bootstrap::{
	enumerator::RecordEnumerator,
	events::{BootstrapEvent, BootstrapEventHandler, EventDispatcher},
	progress_tracker::{BootstrapProgressTracker, BootstrapStats},
	reporter::{BootstrapOutcome, CompletionCallback, CompletionReporter},
	unlock_driver::UnlockDriver,
};
use crate::wallets::{BootstrapContext, BootstrapError, PasswordPrompt, WalletFactory};

use std::sync::Arc;
use tracing::{error, info, warn};

/// Lifecycle of a controller's bootstrap run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
	/// Built and validated, bootstrap not started
	Constructed,
	/// Querying the persisted wallet records
	Enumerating,
	/// Prompting for passwords and unlocking wallets
	Unlocking,
	/// Completed successfully
	Succeeded,
	/// Completed with a failure
	Failed,
}

impl ControllerState {
	pub fn is_completed(&self) -> bool {
		matches!(self, ControllerState::Succeeded | ControllerState::Failed)
	}
}

/// Builder for a [`WalletsController`].
///
/// The password prompt and the persistence context are required; `build` refuses to produce a
/// controller without them.
pub struct WalletsControllerBuilder<F: WalletFactory> {
	wallet_factory: F,
	password_prompt: Option<Arc<dyn PasswordPrompt>>,
	context: Option<BootstrapContext>,
	config: BootstrapConfig,
	on_completion: Option<CompletionCallback<F::Wallet>>,
	event_handlers: Vec<Box<dyn BootstrapEventHandler>>,
}

impl<F: WalletFactory> WalletsControllerBuilder<F> {
	pub fn new(wallet_factory: F) -> Self {
		Self {
			wallet_factory,
			password_prompt: None,
			context: None,
			config: BootstrapConfig::default(),
			on_completion: None,
			event_handlers: Vec::new(),
		}
	}

	/// Sets the source of wallet passwords
	pub fn with_password_prompt(mut self, password_prompt: Arc<dyn PasswordPrompt>) -> Self {
		self.password_prompt = Some(password_prompt);
		self
	}

	/// Sets the collaborator context shared with every wallet
	pub fn with_context(mut self, context: BootstrapContext) -> Self {
		self.context = Some(context);
		self
	}

	/// Shorthand for a context holding only `persister`
	pub fn with_persister(self, persister: Arc<dyn DocumentStore>) -> Self {
		self.with_context(BootstrapContext::new(persister))
	}

	pub fn with_config(mut self, config: BootstrapConfig) -> Self {
		self.config = config;
		self
	}

	/// Sets the continuation receiving the outcome of the run
	pub fn on_completion<C>(mut self, callback: C) -> Self
	where
		C: FnOnce(BootstrapOutcome<'_, F::Wallet>) + Send + 'static,
	{
		self.on_completion = Some(Box::new(callback));
		self
	}

	pub fn with_event_handler(mut self, handler: Box<dyn BootstrapEventHandler>) -> Self {
		self.event_handlers.push(handler);
		self
	}

	/// Validate the configuration and build the controller. Does no asynchronous work.
	pub fn build(self) -> Result<WalletsController<F>, BootstrapError> {
		let password_prompt = self.password_prompt.ok_or_else(|| {
			let message =
				"You must supply a password prompt to your WalletsController".to_string();
			error!("{}", message);
			BootstrapError::Configuration(message)
		})?;

		let context = self.context.ok_or_else(|| {
			let message =
				"You must supply a persistence context to your WalletsController".to_string();
			error!("{}", message);
			BootstrapError::Configuration(message)
		})?;

		if self.config.collection_name.is_empty() {
			return Err(BootstrapError::Configuration(
				"Wallet collection name must not be empty".to_string(),
			));
		}

		let mut event_dispatcher = EventDispatcher::new();
		for handler in self.event_handlers {
			event_dispatcher.register_handler(handler);
		}

		Ok(WalletsController {
			config: self.config,
			context,
			password_prompt,
			wallet_factory: self.wallet_factory,
			reporter: CompletionReporter::new(self.on_completion),
			event_dispatcher,
			progress_tracker: BootstrapProgressTracker::new(),
			state: ControllerState::Constructed,
			wallets: Vec::new(),
		})
	}
}

/// Bootstrap controller for the persisted wallets.
///
/// Runs the enumerate → unlock → report pipeline once and keeps the unlocked wallets afterwards.
pub struct WalletsController<F: WalletFactory> {
	config: BootstrapConfig,
	context: BootstrapContext,
	password_prompt: Arc<dyn PasswordPrompt>,
	wallet_factory: F,

	reporter: CompletionReporter<F::Wallet>,
	event_dispatcher: EventDispatcher,
	progress_tracker: BootstrapProgressTracker,

	state: ControllerState,
	wallets: Vec<F::Wallet>,
}

impl<F: WalletFactory> WalletsController<F> {
	pub fn builder(wallet_factory: F) -> WalletsControllerBuilder<F> {
		WalletsControllerBuilder::new(wallet_factory)
	}

	/// Run the bootstrap sequence.
	///
	/// Enumerates the persisted wallets, unlocks them in order, then reports the outcome to the
	/// completion callback. The same outcome is returned. A controller bootstraps only once;
	/// later calls return [`BootstrapError::AlreadyBootstrapped`] without reporting anything.
	pub async fn bootstrap(&mut self) -> Result<&[F::Wallet], BootstrapError> {
		if self.state != ControllerState::Constructed {
			warn!(
				"Ignoring bootstrap request, controller is {:?}",
				self.state
			);
			return Err(BootstrapError::AlreadyBootstrapped);
		}

		info!("Starting wallets bootstrap");
		self.progress_tracker.start();
		self.state = ControllerState::Enumerating;

		let enumerated = RecordEnumerator::new(&self.context, &self.config)
			.enumerate()
			.await;
		let identities = match enumerated {
			Ok(identities) => identities,
			Err(e) => return Err(self.fail(BootstrapError::Enumeration(e)).await),
		};

		self.progress_tracker.record_enumerated(identities.len());
		self.event_dispatcher
			.dispatch(&BootstrapEvent::RecordsEnumerated {
				count: identities.len(),
			})
			.await;

		self.state = ControllerState::Unlocking;
		let driver = UnlockDriver::new(
			self.password_prompt.as_ref(),
			&self.wallet_factory,
			&self.context,
			self.config.on_instantiation_failure,
		);
		let result = driver
			.run(
				identities,
				&mut self.wallets,
				&mut self.event_dispatcher,
				&mut self.progress_tracker,
			)
			.await;

		if let Err(e) = result {
			return Err(self.fail(e).await);
		}

		self.state = ControllerState::Succeeded;
		self.progress_tracker.finish();
		if let Err(inconsistency) = self.progress_tracker.validate_completion() {
			warn!("Bootstrap bookkeeping mismatch: {}", inconsistency);
		}
		info!("{}", self.progress_tracker.get_stats().summary());

		self.event_dispatcher
			.dispatch(&BootstrapEvent::BootstrapCompleted {
				wallet_count: self.wallets.len(),
			})
			.await;
		self.reporter
			.report(BootstrapOutcome::Success(self.wallets.as_slice()));

		Ok(self.wallets.as_slice())
	}

	async fn fail(&mut self, error: BootstrapError) -> BootstrapError {
		self.state = ControllerState::Failed;
		self.progress_tracker.finish();
		info!("{}", self.progress_tracker.get_stats().summary());

		self.event_dispatcher
			.dispatch(&BootstrapEvent::BootstrapFailed {
				error: error.to_string(),
			})
			.await;
		self.reporter.report(BootstrapOutcome::Failure(&error));
		error
	}

	pub fn state(&self) -> ControllerState {
		self.state
	}

	/// The unlocked wallets, in enumeration order.
	///
	/// Empty until a run has unlocked something. After an aborted run this holds the wallets that
	/// were unlocked before the failure.
	pub fn wallets(&self) -> &[F::Wallet] {
		&self.wallets
	}

	pub fn wallet_count(&self) -> usize {
		self.wallets.len()
	}

	pub fn into_wallets(self) -> Vec<F::Wallet> {
		self.wallets
	}

	pub fn stats(&self) -> BootstrapStats {
		self.progress_tracker.get_stats()
	}

	pub fn config(&self) -> &BootstrapConfig {
		&self.config
	}

	pub fn context(&self) -> &BootstrapContext {
		&self.context
	}
}
