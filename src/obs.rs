//! Optional observability helpers for token flows.
//!
//! # Feature Flags
//!
//! - Enable `tracing` (on by default) to emit structured spans named `geo_auth.flow` with the
//!   `flow` and `stage` fields.
//! - Enable `metrics` to increment the `geo_auth_flow_total` counter for every
//!   attempt/success/failure/reuse, labeled by `flow` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Token flows observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Credential exchange against the authentication endpoint.
	Retrieve,
	/// Reuse-cache refresh decision.
	Refresh,
	/// Request authorization inside [`AuthTransport`](crate::http::AuthTransport).
	Authorize,
	/// Sealed client secret decryption.
	Decrypt,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Retrieve => "retrieve",
			FlowKind::Refresh => "refresh",
			FlowKind::Authorize => "authorize",
			FlowKind::Decrypt => "decrypt",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow that will contact a collaborator.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
	/// Cached token served without contacting a collaborator.
	Reused,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
			FlowOutcome::Reused => "reused",
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Runs a collaborator-facing flow inside its span, recording attempt and outcome.
pub async fn observe<F, T>(kind: FlowKind, stage: &'static str, fut: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	let span = FlowSpan::new(kind, stage);

	record_flow_outcome(kind, FlowOutcome::Attempt);

	let result = span.instrument(fut).await;

	match &result {
		Ok(_) => record_flow_outcome(kind, FlowOutcome::Success),
		Err(err) => {
			span.record_failure(err);
			record_flow_outcome(kind, FlowOutcome::Failure);
		},
	}

	result
}
