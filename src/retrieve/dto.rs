//! Wire payloads exchanged with the authentication endpoint.

// crates.io
use time::{PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{_prelude::*, error::ParseError};

/// `YYYY-MM-DDThh:mm:ss[.fraction]` with no offset; the endpoint reports UTC.
const EXPIRES_AT_FORMAT: &[BorrowedFormatItem<'_>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]");
/// Output form with the seven fractional digits the endpoint emits.
const EXPIRES_AT_OUTPUT: &[BorrowedFormatItem<'_>] =
	format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:7]");

/// Login request body: `{"user": {"email": <id>, "password": <secret>}}`.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
	pub(crate) user: LoginUser<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginUser<'a> {
	pub(crate) email: &'a str,
	pub(crate) password: &'a str,
}

/// Success body: `{"authenticationToken": {"token": .., "expiresAt": ..}}`.
///
/// Deployment-specific extras such as `_id`, `_type`, or `userId` are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
	#[serde(rename = "authenticationToken", default)]
	pub(crate) authentication_token: AuthenticationToken,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthenticationToken {
	#[serde(default)]
	pub(crate) token: String,
	#[serde(rename = "expiresAt", default)]
	pub(crate) expires_at: String,
}
impl AuthenticationToken {
	pub(crate) fn expiry(&self) -> Result<OffsetDateTime, ParseError> {
		parse_expires_at(&self.expires_at)
	}
}

/// Parses the endpoint's offset-less timestamp, treating it as UTC.
///
/// Only plain four-digit years are accepted.
pub fn parse_expires_at(value: &str) -> Result<OffsetDateTime, ParseError> {
	let parsed = PrimitiveDateTime::parse(value, EXPIRES_AT_FORMAT)
		.map_err(|source| ParseError::Expiry { value: value.to_owned(), source })?;

	if !has_four_digit_year(value) {
		return Err(ParseError::ExpiryYear { value: value.to_owned() });
	}

	Ok(parsed.assume_utc())
}

/// Renders an instant in the endpoint's `expiresAt` format.
pub fn format_expires_at(instant: OffsetDateTime) -> Result<String, time::error::Format> {
	instant.to_offset(time::UtcOffset::UTC).format(EXPIRES_AT_OUTPUT)
}

fn has_four_digit_year(value: &str) -> bool {
	let bytes = value.as_bytes();

	bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}
