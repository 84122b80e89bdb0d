// self
use crate::obs::{FlowKind, FlowOutcome};

/// Increments `geo_auth_flow_total{flow, outcome}` when the `metrics` feature is enabled.
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"geo_auth_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn every_outcome_label_is_recordable() {
		for outcome in
			[FlowOutcome::Attempt, FlowOutcome::Success, FlowOutcome::Failure, FlowOutcome::Reused]
		{
			record_flow_outcome(FlowKind::Decrypt, outcome);
		}
	}
}
