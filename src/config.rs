//! Credential configuration and the entry points that turn it into tokens, token sources, and
//! authorized clients.

mod sealed;

pub use sealed::*;

// self
use crate::{
	_prelude::*,
	auth::{Credentials, Token},
	context::Context,
	error::ConfigError,
	http::{AuthClient, new_client},
	retrieve,
	source::{Refresher, TokenSource, reuse_token_source},
};

/// Login endpoint used by the client-credentials deployment.
pub const CLIENT_AUTH_URL: &str = "https://api.geocreation.com.au/api/session/login";
/// Login endpoint used by the email/password deployment.
pub const USER_AUTH_URL: &str = "https://api.geocreation.com.au/session/login";

/// Credential material plus the endpoint it is exchanged at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
	/// Credential pair sent in the login payload.
	pub credentials: Credentials,
	/// Login endpoint URL.
	pub auth_url: Url,
}
impl Config {
	/// Creates a configuration for `credentials` exchanged at `auth_url`.
	pub fn new(credentials: Credentials, auth_url: Url) -> Self {
		Self { credentials, auth_url }
	}

	/// Creates a configuration using the default endpoint for the credential variant.
	pub fn with_default_url(credentials: Credentials) -> Result<Self> {
		let raw = match credentials {
			Credentials::Client { .. } => CLIENT_AUTH_URL,
			Credentials::User { .. } => USER_AUTH_URL,
		};
		let auth_url = Url::parse(raw).map_err(|source| ConfigError::InvalidAuthUrl { source })?;

		Ok(Self::new(credentials, auth_url))
	}

	/// Parses a credential document (`{client_id, client_secret}` or `{email, password}`).
	pub fn from_json(json: &[u8]) -> Result<Self> {
		Self::with_default_url(Credentials::from_json(json)?)
	}

	/// Replaces the login endpoint.
	pub fn with_auth_url(mut self, auth_url: Url) -> Self {
		self.auth_url = auth_url;

		self
	}

	/// Exchanges this configuration's credentials for a token.
	pub async fn token_from_credentials(&self, ctx: &Context) -> Result<Token> {
		retrieve::retrieve_token(ctx, &self.credentials, &self.auth_url).await
	}

	/// Returns a source that serves `seed` while valid and re-exchanges credentials under `ctx`
	/// once it is not.
	pub fn token_source(&self, ctx: Context, seed: Option<Token>) -> Arc<dyn TokenSource> {
		let refresher = Refresher::new(ctx, Arc::new(self.clone()));

		reuse_token_source(seed, Arc::new(refresher))
	}

	/// Returns a client that authorizes every request with a token from
	/// [`token_source`](Self::token_source), refreshing as needed.
	pub fn client(&self, ctx: Context, seed: Option<Token>) -> AuthClient {
		let source = self.token_source(ctx.clone(), seed);

		new_client(ctx, Some(source))
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn client_document_uses_client_endpoint() {
		let config = Config::from_json(
			br#"{
				"client_id": "CLIENT_ID",
				"client_secret": "CLIENT_SECRET"
			}"#,
		)
		.expect("Client credential document should parse.");

		assert_eq!(config.credentials, Credentials::client("CLIENT_ID", "CLIENT_SECRET"));
		assert_eq!(config.auth_url.as_str(), CLIENT_AUTH_URL);
	}

	#[test]
	fn user_document_uses_user_endpoint() {
		let config = Config::from_json(br#"{"email": "EMAIL", "password": "PASSWORD"}"#)
			.expect("User credential document should parse.");

		assert_eq!(config.credentials.identifier(), "EMAIL");
		assert_eq!(config.credentials.secret().expose(), "PASSWORD");
		assert_eq!(config.auth_url.as_str(), USER_AUTH_URL);
	}

	#[test]
	fn auth_url_can_be_overridden() {
		let url = Url::parse("http://127.0.0.1:8080/login").expect("Fixture URL should parse.");
		let config = Config::from_json(br#"{"email": "EMAIL", "password": "PASSWORD"}"#)
			.expect("User credential document should parse.")
			.with_auth_url(url.clone());

		assert_eq!(config.auth_url, url);
	}

	#[test]
	fn token_source_is_a_reuse_cache_over_a_refresher() {
		let config = Config::from_json(br#"{"email": "EMAIL", "password": "PASSWORD"}"#)
			.expect("User credential document should parse.");
		let source = config.token_source(Context::background(), None);
		let cache = source.as_reuse().expect("Config sources should cache tokens.");

		assert!(cache.upstream().as_reuse().is_none());
	}
}
