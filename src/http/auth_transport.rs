// self
use crate::{
	_prelude::*,
	http::{HttpFuture, HttpTransport},
	obs::{self, FlowKind},
	source::{TokenSource, reuse_token_source},
};

/// Decorator that authorizes every request with a token from its source before delegating to
/// the base transport.
///
/// The source is wrapped in a reuse cache on construction (a no-op when it already is one), so
/// consecutive requests share a token until it expires.
#[derive(Clone)]
pub struct AuthTransport {
	base: Arc<dyn HttpTransport>,
	source: Option<Arc<dyn TokenSource>>,
}
impl AuthTransport {
	/// Creates a transport that stamps tokens from `source` onto requests sent through `base`.
	///
	/// A transport without a source rejects every request with [`Error::MissingSource`].
	pub fn new(base: Arc<dyn HttpTransport>, source: Option<Arc<dyn TokenSource>>) -> Self {
		Self { base, source: source.map(|source| reuse_token_source(None, source)) }
	}

	/// Returns the transport that receives authorized requests.
	pub fn base(&self) -> &Arc<dyn HttpTransport> {
		&self.base
	}

	/// Returns the (cached) token source, if any.
	pub fn source(&self) -> Option<&Arc<dyn TokenSource>> {
		self.source.as_ref()
	}

	/// Obtains a token, sets `Authorization: token <access>` and forwards the request.
	///
	/// Nothing is sent when the source is missing or fails.
	pub async fn round_trip(&self, mut request: Request) -> Result<Response> {
		let source = self.source.as_ref().ok_or(Error::MissingSource)?;

		obs::observe(FlowKind::Authorize, "auth_transport", async {
			let token = source.token().await?;

			token.apply_auth_header(&mut request)?;

			Ok(())
		})
		.await?;

		self.base.execute(request).await
	}
}
impl HttpTransport for AuthTransport {
	fn execute(&self, request: Request) -> HttpFuture<'_> {
		Box::pin(self.round_trip(request))
	}
}
impl Debug for AuthTransport {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthTransport").field("has_source", &self.source.is_some()).finish()
	}
}
