// crates.io
use reqwest::{IntoUrl, Method, RequestBuilder};
// self
use crate::{
	_prelude::*,
	context::Context,
	http::{AuthTransport, HttpTransport, ReqwestHttpClient, map_reqwest_error},
	source::TokenSource,
};

/// HTTP client whose requests run under a [`Context`] and, when built with a token source,
/// carry `Authorization: token <access>`.
///
/// Requests are assembled with reqwest's [`RequestBuilder`] and dispatched through the client's
/// [`HttpTransport`], never through the builder's own connection pool.
#[derive(Clone)]
pub struct AuthClient {
	ctx: Context,
	transport: Arc<dyn HttpTransport>,
	builder: ReqwestClient,
}
impl AuthClient {
	/// Creates a client that dispatches through `transport` under `ctx`.
	pub fn new(ctx: Context, transport: Arc<dyn HttpTransport>) -> Self {
		Self { ctx, transport, builder: ReqwestHttpClient::shared_client() }
	}

	/// Returns the context every request runs under.
	pub fn context(&self) -> &Context {
		&self.ctx
	}

	/// Returns the transport requests are dispatched through.
	pub fn transport(&self) -> &Arc<dyn HttpTransport> {
		&self.transport
	}

	/// Starts building a request with `method` against `url`.
	pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
	where
		U: IntoUrl,
	{
		self.builder.request(method, url)
	}

	/// Starts building a `GET` request.
	pub fn get<U>(&self, url: U) -> RequestBuilder
	where
		U: IntoUrl,
	{
		self.request(Method::GET, url)
	}

	/// Starts building a `POST` request.
	pub fn post<U>(&self, url: U) -> RequestBuilder
	where
		U: IntoUrl,
	{
		self.request(Method::POST, url)
	}

	/// Dispatches a built request, honoring the context's cancellation and deadline.
	pub async fn execute(&self, request: Request) -> Result<Response> {
		self.ctx.run(self.transport.execute(request)).await
	}

	/// Builds and dispatches a request started with [`request`](Self::request) or a helper.
	pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
		let request = builder.build().map_err(map_reqwest_error)?;

		self.execute(request).await
	}
}
impl Debug for AuthClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthClient").field("ctx", &self.ctx).finish_non_exhaustive()
	}
}

/// Returns a client that authorizes requests with tokens from `source`.
///
/// Without a source the client is the context's plain transport. With one, requests go through
/// an [`AuthTransport`] over the context's transport, caching the source's tokens.
pub fn new_client(ctx: Context, source: Option<Arc<dyn TokenSource>>) -> AuthClient {
	let base = ctx.http_client();
	let transport = match source {
		Some(source) => Arc::new(AuthTransport::new(base, Some(source))) as Arc<dyn HttpTransport>,
		None => base,
	};

	AuthClient::new(ctx, transport)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{
		auth::Token,
		error::{ConfigError, TransportError},
		source::StaticTokenSource,
	};

	#[test]
	fn unauthenticated_client_uses_context_transport() {
		let ctx = Context::background();
		let shared = ctx.http_client();
		let client = new_client(ctx, None);

		assert!(Arc::ptr_eq(client.transport(), &shared));
	}

	#[tokio::test]
	async fn invalid_urls_are_request_errors() {
		let client = new_client(Context::background(), None);
		let err = client.send(client.get("not a url")).await.expect_err("Bad URL must fail.");

		assert!(matches!(err, Error::Config(ConfigError::InvalidRequest { .. })));
	}

	#[tokio::test]
	async fn cancelled_context_fails_before_any_token_fetch() {
		let ctx = Context::background();
		let source = Arc::new(StaticTokenSource::new(Token::new("ACCESS_TOKEN")));
		let client = new_client(ctx.clone(), Some(source));

		ctx.cancel();

		let err = client
			.send(client.get("http://127.0.0.1:9/"))
			.await
			.expect_err("Cancelled context must fail.");

		assert!(matches!(err, Error::Transport(TransportError::Cancelled)));
	}
}
