//! Access token value and its validity rules.

// crates.io
use reqwest::header::{AUTHORIZATION, HeaderValue};
// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// How much earlier than its stated expiry a token is treated as expired, absorbing clock drift
/// between this process and the authentication endpoint.
pub const EXPIRY_DELTA: Duration = Duration::seconds(10);

/// Authorization scheme placed in front of the access token.
///
/// The endpoint expects `token`, not `Bearer`.
pub const AUTH_SCHEME: &str = "token";

/// Credential that authorizes requests against protected GEO resources.
///
/// Tokens are immutable once built; refreshing produces a new value.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
	/// Opaque access token; callers must avoid logging it.
	pub access_token: Secret,
	/// Optional expiry instant. `None` means the token never expires.
	pub expiry: Option<OffsetDateTime>,
}
impl Token {
	/// Creates a non-expiring token from a pre-obtained access token.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self { access_token: Secret::new(access_token), expiry: None }
	}

	/// Sets the expiry instant.
	pub fn with_expiry(mut self, expiry: OffsetDateTime) -> Self {
		self.expiry = Some(expiry);

		self
	}

	/// Reports whether the token counts as expired at `now`, applying [`EXPIRY_DELTA`].
	///
	/// A token expiring exactly [`EXPIRY_DELTA`] after `now` is already expired.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		match self.expiry {
			None => false,
			// An expiry too close to the minimum date to subtract the delta counts as expired.
			Some(expiry) => expiry.checked_sub(EXPIRY_DELTA).is_none_or(|skewed| skewed <= now),
		}
	}

	/// Reports whether the token is expired relative to the current clock.
	pub fn expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Reports whether the token carries an access token and is unexpired at `now`.
	pub fn is_valid_at(&self, now: OffsetDateTime) -> bool {
		!self.access_token.is_empty() && !self.is_expired_at(now)
	}

	/// Reports whether the token carries an access token and is unexpired.
	pub fn valid(&self) -> bool {
		self.is_valid_at(OffsetDateTime::now_utc())
	}

	/// Renders the `Authorization` header value, flagged as sensitive.
	pub fn authorization_value(&self) -> Result<HeaderValue> {
		let mut value = HeaderValue::from_str(&format!(
			"{AUTH_SCHEME} {}",
			self.access_token.expose()
		))
		.map_err(ConfigError::from)?;

		value.set_sensitive(true);

		Ok(value)
	}

	/// Sets the `Authorization` header on `request`, replacing any existing value.
	pub fn apply_auth_header(&self, request: &mut Request) -> Result<()> {
		let value = self.authorization_value()?;

		request.headers_mut().insert(AUTHORIZATION, value);

		Ok(())
	}
}
impl Debug for Token {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Token")
			.field("access_token", &"<redacted>")
			.field("expiry", &self.expiry)
			.finish()
	}
}
