//! Credential exchange against the authentication endpoint.
//!
//! [`retrieve_token`] posts the login payload, reads the full body, maps non-2xx statuses to
//! [`RetrieveError`](crate::error::RetrieveError), and parses the token envelope. The whole
//! exchange runs under the caller's [`Context`], so cancellation and deadlines interrupt it even
//! when the server never answers.

mod dto;

pub use dto::{format_expires_at, parse_expires_at};

// crates.io
use reqwest::{
	Method,
	header::{CONTENT_TYPE, HeaderValue},
};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, Token},
	context::Context,
	error::{ConfigError, ParseError, RetrieveError, TransportError},
	obs::{self, FlowKind},
	retrieve::dto::{LoginRequest, LoginResponse, LoginUser},
};

/// Exchanges `credentials` for a token at `auth_url`.
///
/// # Errors
///
/// - [`Error::Transport`] for network failures, cancellation, or an elapsed deadline.
/// - [`Error::Retrieve`] when the endpoint answers outside `200..=299`.
/// - [`Error::Parse`] for malformed JSON or an unparsable `expiresAt`.
/// - [`Error::NoToken`] when a 2xx envelope carries an empty token.
pub async fn retrieve_token(
	ctx: &Context,
	credentials: &Credentials,
	auth_url: &Url,
) -> Result<Token> {
	obs::observe(FlowKind::Retrieve, "retrieve_token", async {
		let request = login_request(credentials, auth_url)?;
		let client = ctx.http_client();
		let (status, body) = ctx
			.run(async {
				let response = client.execute(request).await?;
				let status = response.status();
				let body = response.bytes().await.map_err(TransportError::from)?;

				Ok((status, body))
			})
			.await?;

		if !status.is_success() {
			return Err(RetrieveError::new(status, &body).into());
		}

		parse_login_response(&body)
	})
	.await
}

fn login_request(credentials: &Credentials, auth_url: &Url) -> Result<Request> {
	let payload = LoginRequest {
		user: LoginUser {
			email: credentials.identifier(),
			password: credentials.secret().expose(),
		},
	};
	let body =
		serde_json::to_vec(&payload).map_err(|source| ConfigError::EncodeRequest { source })?;
	let mut request = Request::new(Method::POST, auth_url.clone());

	request.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
	*request.body_mut() = Some(body.into());

	Ok(request)
}

fn parse_login_response(body: &[u8]) -> Result<Token> {
	let de = &mut serde_json::Deserializer::from_slice(body);
	let envelope: LoginResponse =
		serde_path_to_error::deserialize(de).map_err(|source| ParseError::Json { source })?;
	let auth = envelope.authentication_token;
	let expiry = auth.expiry()?;

	// 2xx without a token is still a failure.
	if auth.token.is_empty() {
		return Err(Error::NoToken);
	}

	Ok(Token::new(auth.token).with_expiry(expiry))
}
