//! Token sources: anything that can hand out a [`Token`] on demand.
//!
//! Sources compose by wrapping. [`Refresher`] performs the credential exchange on every call,
//! [`ReuseTokenSource`] caches its upstream's result until it stops being valid, and
//! [`StaticTokenSource`] always returns the same pre-obtained token.

mod metrics;
mod reuse;

pub use metrics::CacheMetrics;
pub use reuse::*;

// self
use crate::{_prelude::*, auth::Token, config::Config, context::Context};

/// Boxed future returned by [`TokenSource::token`].
pub type TokenFuture<'a> = Pin<Box<dyn Future<Output = Result<Token>> + 'a + Send>>;

/// Capability that produces a token or fails.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Returns a token or an error.
	fn token(&self) -> TokenFuture<'_>;

	/// Exposes the source as a [`ReuseTokenSource`] so [`reuse_token_source`] never nests caches.
	fn as_reuse(&self) -> Option<&ReuseTokenSource> {
		None
	}
}

/// Source that performs a fresh credential exchange on every call.
#[derive(Clone, Debug)]
pub struct Refresher {
	ctx: Context,
	config: Arc<Config>,
}
impl Refresher {
	/// Creates a refresher that exchanges `config`'s credentials under `ctx`.
	pub fn new(ctx: Context, config: Arc<Config>) -> Self {
		Self { ctx, config }
	}

	/// Returns the configuration used for each exchange.
	pub fn config(&self) -> &Config {
		&self.config
	}
}
impl TokenSource for Refresher {
	fn token(&self) -> TokenFuture<'_> {
		Box::pin(self.config.token_from_credentials(&self.ctx))
	}
}

/// Source that always yields the same token, valid or not.
#[derive(Clone, Debug)]
pub struct StaticTokenSource(Token);
impl StaticTokenSource {
	/// Wraps a pre-obtained token.
	pub fn new(token: Token) -> Self {
		Self(token)
	}
}
impl TokenSource for StaticTokenSource {
	fn token(&self) -> TokenFuture<'_> {
		let token = self.0.clone();

		Box::pin(async move { Ok(token) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn static_source_returns_fixed_token() {
		let source = StaticTokenSource::new(Token::new("ACCESS_TOKEN"));
		let first = source.token().await.expect("Static source should never fail.");
		let second = source.token().await.expect("Static source should never fail.");

		assert_eq!(first, second);
		assert_eq!(first.access_token.expose(), "ACCESS_TOKEN");
		assert!(source.as_reuse().is_none());
	}
}
