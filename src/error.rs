//! Crate-level error types shared by the retriever, token sources, and transports.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Largest response body preview kept inside a [`RetrieveError`].
const RETRIEVE_BODY_LIMIT: usize = 64 * 1024;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Network failure, timeout, or cancellation during an HTTP exchange.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Authentication endpoint answered with a non-2xx status.
	#[error(transparent)]
	Retrieve(#[from] RetrieveError),
	/// Authentication endpoint answered 2xx with an unreadable payload.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// Key-management collaborator could not reveal the client secret.
	#[error(transparent)]
	Decrypt(#[from] DecryptError),

	/// Authentication endpoint answered 2xx without an access token.
	#[error("Authorization server did not include a token in the response.")]
	NoToken,
	/// Authorizing transport was used without a token source.
	#[error("Transport has no token source configured.")]
	MissingSource,
}
impl Error {
	/// Returns `true` when the failure came from a cancelled context.
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Transport(TransportError::Cancelled))
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Credential document is not valid JSON or has the wrong shape.
	#[error("Credential document is malformed.")]
	CredentialsParse {
		/// Path-aware parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Credential document carries neither credential pair.
	#[error("Credential document must contain client_id/client_secret or email/password.")]
	MissingCredentials,
	/// Credential document carries both credential pairs.
	#[error("Credential document must not mix client_id/client_secret with email/password.")]
	AmbiguousCredentials,
	/// Authentication URL cannot be parsed.
	#[error("Authentication URL is invalid.")]
	InvalidAuthUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Login payload could not be encoded.
	#[error("Login payload could not be encoded.")]
	EncodeRequest {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Outbound request could not be built.
	#[error("HTTP request could not be built.")]
	InvalidRequest {
		/// Underlying builder failure.
		#[source]
		source: BoxError,
	},
	/// Access token contains bytes that are not allowed in a header value.
	#[error("Access token cannot be used as an Authorization header value.")]
	InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}
impl ConfigError {
	/// Wraps a request builder failure inside [`ConfigError`].
	pub fn invalid_request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::InvalidRequest { source: Box::new(src) }
	}
}

/// Transport-level failures (network, timeouts, cancellation).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the remote endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying HTTP client gave up waiting for the remote endpoint.
	#[error("Request timed out while calling the remote endpoint.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
	/// Caller cancelled the context before the exchange completed.
	#[error("Request was cancelled before the remote endpoint responded.")]
	Cancelled,
	/// Context deadline elapsed before the exchange completed.
	#[error("Context deadline elapsed before the remote endpoint responded.")]
	DeadlineExceeded,
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::Timeout { source: Box::new(e) } } else { Self::network(e) }
	}
}

/// Returned when the authentication endpoint answers with a non-2xx status.
///
/// The rendered reason phrase is the canonical one for the code, not the text the server sent.
#[derive(Debug, ThisError)]
#[error("cannot fetch token: {status}\nResponse: {body}")]
pub struct RetrieveError {
	/// Status line reported by the endpoint.
	pub status: StatusCode,
	/// Response body, cut to a bounded preview.
	pub body: String,
}
impl RetrieveError {
	/// Builds an error from a raw status and body, bounding the stored preview.
	pub fn new(status: StatusCode, body: &[u8]) -> Self {
		let mut body = String::from_utf8_lossy(body).into_owned();

		if body.len() > RETRIEVE_BODY_LIMIT {
			let mut cut = RETRIEVE_BODY_LIMIT;

			while !body.is_char_boundary(cut) {
				cut -= 1;
			}

			body.truncate(cut);
		}

		Self { status, body }
	}
}

/// Malformed 2xx payloads from the authentication endpoint.
#[derive(Debug, ThisError)]
pub enum ParseError {
	/// Body is not JSON or does not match the expected token envelope.
	#[error("Authentication endpoint returned malformed JSON.")]
	Json {
		/// Path-aware parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// `expiresAt` does not match `YYYY-MM-DDThh:mm:ss[.fraction]`.
	#[error("Authentication endpoint returned an unparsable expiry `{value}`.")]
	Expiry {
		/// Raw timestamp text.
		value: String,
		/// Underlying timestamp parsing failure.
		#[source]
		source: time::error::Parse,
	},
	/// `expiresAt` carries a signed or wider-than-four-digit year.
	#[error("Authentication endpoint returned an expiry `{value}` without a four-digit year.")]
	ExpiryYear {
		/// Raw timestamp text.
		value: String,
	},
}

/// Failures raised while revealing an encrypted client secret.
#[derive(Debug, ThisError)]
pub enum DecryptError {
	/// Sealed secret is not valid base64.
	#[error("Sealed client secret is not valid base64.")]
	Base64(#[from] base64::DecodeError),
	/// Decrypted plaintext is not UTF-8.
	#[error("Decrypted client secret is not valid UTF-8.")]
	Utf8(#[from] std::string::FromUtf8Error),
	/// Key-management service rejected or failed the call.
	#[error("Key-management service failed to decrypt the client secret.")]
	Service {
		/// Service-specific failure.
		#[source]
		source: BoxError,
	},
}
impl DecryptError {
	/// Wraps a key-management service failure.
	pub fn service(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Service { source: Box::new(src) }
	}
}
