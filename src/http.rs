//! Transport primitives: the [`HttpTransport`] seam, the reqwest-backed default, and the
//! authorizing decorators built on top of it.
//!
//! [`HttpTransport`] is the crate's only dependency on an HTTP stack. The retriever executes its
//! login call through whichever transport the [`Context`](crate::context::Context) supplies, and
//! [`AuthTransport`] wraps a base transport to stamp every request with a fresh access token.

mod auth_transport;
mod client;

pub use auth_transport::*;
pub use client::*;

// std
use std::{ops::Deref, sync::OnceLock};
// self
use crate::{
	_prelude::*,
	error::{ConfigError, TransportError},
};

/// Boxed future returned by [`HttpTransport::execute`].
pub type HttpFuture<'a> = Pin<Box<dyn Future<Output = Result<Response>> + 'a + Send>>;

/// Executes a fully built request and yields the response or a crate [`Error`].
///
/// Implementations must be `Send + Sync + 'static` so one transport can be shared across
/// clients, token sources, and tasks behind an `Arc`.
pub trait HttpTransport
where
	Self: 'static + Send + Sync,
{
	/// Sends `request` and resolves once response headers arrive.
	fn execute(&self, request: Request) -> HttpFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Returns the process-wide default transport used when a context carries no override.
	pub fn shared() -> Arc<dyn HttpTransport> {
		Arc::clone(Self::shared_instance()) as Arc<dyn HttpTransport>
	}

	/// Returns the reqwest client behind [`shared`](Self::shared), used to build requests.
	pub(crate) fn shared_client() -> ReqwestClient {
		Self::shared_instance().0.clone()
	}

	fn shared_instance() -> &'static Arc<ReqwestHttpClient> {
		static SHARED: OnceLock<Arc<ReqwestHttpClient>> = OnceLock::new();

		SHARED.get_or_init(|| Arc::new(Self::default()))
	}
}
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl HttpTransport for ReqwestHttpClient {
	fn execute(&self, request: Request) -> HttpFuture<'_> {
		Box::pin(async move { self.0.execute(request).await.map_err(map_reqwest_error) })
	}
}
impl Debug for ReqwestHttpClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("ReqwestHttpClient(..)")
	}
}

pub(crate) fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::invalid_request(err).into();
	}

	TransportError::from(err).into()
}
