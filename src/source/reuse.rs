//! Reuse cache that serves a valid token until it expires, then refreshes it exactly once.
//!
//! The cached slot sits behind a single async mutex held across the upstream call, so
//! concurrent callers that observe an invalid token queue behind one refresh instead of
//! stampeding the authentication endpoint. Failures are never cached.

// self
use crate::{
	_prelude::*,
	auth::Token,
	obs::{self, FlowKind, FlowOutcome},
	source::{CacheMetrics, TokenFuture, TokenSource},
};

/// Token source that holds one token in memory and validates it before each use.
pub struct ReuseTokenSource {
	upstream: Arc<dyn TokenSource>,
	cached: AsyncMutex<Option<Token>>,
	metrics: CacheMetrics,
}
impl ReuseTokenSource {
	/// Creates a cache seeded with `seed`, refreshing from `upstream` once the seed is invalid.
	///
	/// Prefer [`reuse_token_source`], which avoids wrapping one cache inside another.
	pub fn new(seed: Option<Token>, upstream: Arc<dyn TokenSource>) -> Self {
		Self { upstream, cached: AsyncMutex::new(seed), metrics: CacheMetrics::default() }
	}

	/// Returns the source consulted on cache misses.
	pub fn upstream(&self) -> &Arc<dyn TokenSource> {
		&self.upstream
	}

	/// Returns hit/refresh/failure counters for this cache.
	pub fn metrics(&self) -> &CacheMetrics {
		&self.metrics
	}

	/// Returns a copy of the cached token without validating or refreshing it.
	pub async fn cached(&self) -> Option<Token> {
		self.cached.lock().await.clone()
	}
}
impl TokenSource for ReuseTokenSource {
	fn token(&self) -> TokenFuture<'_> {
		const KIND: FlowKind = FlowKind::Refresh;

		Box::pin(async move {
			let mut cached = self.cached.lock().await;

			if let Some(current) = cached.as_ref().filter(|token| token.valid()) {
				self.metrics.record_hit();
				obs::record_flow_outcome(KIND, FlowOutcome::Reused);

				return Ok(current.clone());
			}

			self.metrics.record_refresh();

			let fresh = obs::observe(KIND, "reuse_token_source", self.upstream.token())
				.await
				.inspect_err(|_| self.metrics.record_failure())?;

			*cached = Some(fresh.clone());

			Ok(fresh)
		})
	}

	fn as_reuse(&self) -> Option<&ReuseTokenSource> {
		Some(self)
	}
}
impl Debug for ReuseTokenSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ReuseTokenSource")
			.field("hits", &self.metrics.hits())
			.field("refreshes", &self.metrics.refreshes())
			.finish_non_exhaustive()
	}
}

/// Returns a source that repeats the same token while it stays valid, starting with `seed`.
///
/// If `upstream` is already a [`ReuseTokenSource`], no second cache is layered on top: without a
/// seed the existing cache is returned as-is; with a seed a new cache is built around the
/// existing cache's own upstream.
pub fn reuse_token_source(
	seed: Option<Token>,
	upstream: Arc<dyn TokenSource>,
) -> Arc<dyn TokenSource> {
	let upstream = match upstream.as_reuse().map(|reuse| Arc::clone(reuse.upstream())) {
		Some(_) if seed.is_none() => return upstream,
		Some(inner) => inner,
		None => upstream,
	};

	Arc::new(ReuseTokenSource::new(seed, upstream))
}
