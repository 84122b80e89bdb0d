//! Per-call execution context: HTTP transport override, cancellation, and deadline.
//!
//! Every network exchange in the crate runs through [`Context::run`], which races the exchange
//! against the context's [`CancellationToken`] and optional deadline. A cancelled or expired
//! context fails the exchange promptly instead of waiting on a hung server.

// std
use std::time::Duration as StdDuration;
// crates.io
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;
// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::{HttpTransport, ReqwestHttpClient},
};

/// Execution context threaded through retrievals, refreshes, and authorized requests.
///
/// Cloning is cheap and clones share the same cancellation signal.
#[derive(Clone, Default)]
pub struct Context {
	http_client: Option<Arc<dyn HttpTransport>>,
	cancellation: CancellationToken,
	deadline: Option<Instant>,
}
impl Context {
	/// Returns an empty context: default HTTP client, never cancelled, no deadline.
	pub fn background() -> Self {
		Self::default()
	}

	/// Routes network calls through `client` instead of the shared default client.
	pub fn with_http_client<T>(self, client: T) -> Self
	where
		T: HttpTransport,
	{
		self.with_shared_http_client(Arc::new(client))
	}

	/// Routes network calls through an already shared transport.
	pub fn with_shared_http_client(mut self, client: Arc<dyn HttpTransport>) -> Self {
		self.http_client = Some(client);

		self
	}

	/// Replaces the cancellation signal, letting callers cancel from elsewhere.
	pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
		self.cancellation = token;

		self
	}

	/// Sets an absolute deadline for every exchange run under this context.
	pub fn with_deadline(mut self, deadline: Instant) -> Self {
		self.deadline = Some(deadline);

		self
	}

	/// Sets a deadline `timeout` from now.
	pub fn with_timeout(self, timeout: StdDuration) -> Self {
		self.with_deadline(Instant::now() + timeout)
	}

	/// Returns the cancellation signal shared by clones of this context.
	pub fn cancellation(&self) -> &CancellationToken {
		&self.cancellation
	}

	/// Cancels this context and every clone of it.
	pub fn cancel(&self) {
		self.cancellation.cancel();
	}

	/// Returns the configured deadline, if any.
	pub fn deadline(&self) -> Option<Instant> {
		self.deadline
	}

	/// Returns the transport override, or the shared default client.
	pub fn http_client(&self) -> Arc<dyn HttpTransport> {
		match &self.http_client {
			Some(client) => Arc::clone(client),
			None => ReqwestHttpClient::shared(),
		}
	}

	/// Drives `fut` to completion unless the context is cancelled or its deadline passes first.
	///
	/// The future is dropped on cancellation, so no partial work outlives the call.
	pub async fn run<F, T>(&self, fut: F) -> Result<T>
	where
		F: Future<Output = Result<T>>,
	{
		if self.cancellation.is_cancelled() {
			return Err(TransportError::Cancelled.into());
		}
		if self.deadline.is_some_and(|deadline| deadline <= Instant::now()) {
			return Err(TransportError::DeadlineExceeded.into());
		}

		tokio::select! {
			biased;
			_ = self.cancellation.cancelled() => Err(TransportError::Cancelled.into()),
			_ = wait_for(self.deadline) => Err(TransportError::DeadlineExceeded.into()),
			output = fut => output,
		}
	}
}
impl Debug for Context {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Context")
			.field("http_client_override", &self.http_client.is_some())
			.field("cancelled", &self.cancellation.is_cancelled())
			.field("deadline", &self.deadline)
			.finish()
	}
}

async fn wait_for(deadline: Option<Instant>) {
	match deadline {
		Some(deadline) => time::sleep_until(deadline).await,
		None => std::future::pending().await,
	}
}
