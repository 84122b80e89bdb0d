//! Key-management deployment: a client secret stored encrypted and revealed once before use.
//!
//! [`SealedConfig`] is consumed by [`SealedConfig::unseal`], so the decrypt call happens at most
//! once per sealed value and no [`Config`] can exist before it succeeds.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::{
	_prelude::*,
	auth::{Credentials, Secret, Token},
	config::{CLIENT_AUTH_URL, Config},
	context::Context,
	error::{ConfigError, DecryptError},
	obs::{self, FlowKind},
};

/// Boxed future returned by [`SecretDecryptor::decrypt`].
pub type DecryptFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Vec<u8>, DecryptError>> + 'a + Send>>;

/// External key-management capability that turns ciphertext into plaintext.
pub trait SecretDecryptor
where
	Self: Send + Sync,
{
	/// Decrypts an already base64-decoded ciphertext blob.
	fn decrypt(&self, ciphertext: Vec<u8>) -> DecryptFuture<'_>;
}

/// Client credentials whose secret is still encrypted (base64 ciphertext).
#[derive(Clone, PartialEq, Eq)]
pub struct SealedConfig {
	/// Application identifier.
	pub client_id: String,
	/// Base64-encoded ciphertext of the application secret.
	pub sealed_secret: String,
	/// Login endpoint URL.
	pub auth_url: Url,
}
impl SealedConfig {
	/// Creates a sealed configuration exchanged at the client-credentials endpoint.
	pub fn new(client_id: impl Into<String>, sealed_secret: impl Into<String>) -> Result<Self> {
		let auth_url =
			Url::parse(CLIENT_AUTH_URL).map_err(|source| ConfigError::InvalidAuthUrl { source })?;

		Ok(Self { client_id: client_id.into(), sealed_secret: sealed_secret.into(), auth_url })
	}

	/// Parses a `{client_id, client_secret}` document whose secret is base64 ciphertext.
	pub fn from_json(json: &[u8]) -> Result<Self> {
		match Credentials::from_json(json)? {
			Credentials::Client { client_id, client_secret } =>
				Self::new(client_id, client_secret.expose()),
			Credentials::User { .. } => Err(ConfigError::MissingCredentials.into()),
		}
	}

	/// Replaces the login endpoint.
	pub fn with_auth_url(mut self, auth_url: Url) -> Self {
		self.auth_url = auth_url;

		self
	}

	/// Base64-decodes and decrypts the secret, producing a ready-to-use [`Config`].
	///
	/// Decryption failures abort the pipeline; the ciphertext is never used as a password.
	pub async fn unseal(self, decryptor: &dyn SecretDecryptor) -> Result<Config> {
		let Self { client_id, sealed_secret, auth_url } = self;
		let plaintext = obs::observe(FlowKind::Decrypt, "unseal", async {
			let blob = STANDARD.decode(sealed_secret.as_bytes()).map_err(DecryptError::from)?;
			let bytes = decryptor.decrypt(blob).await?;
			let plaintext = String::from_utf8(bytes).map_err(DecryptError::from)?;

			Ok(plaintext)
		})
		.await?;

		Ok(Config::new(Credentials::client(client_id, Secret::new(plaintext)), auth_url))
	}

	/// Unseals the secret, then exchanges the resulting credentials for a token.
	///
	/// Returns the unsealed [`Config`] alongside the token so later refreshes reuse the
	/// plaintext instead of decrypting again.
	pub async fn decrypt_then_retrieve(
		self,
		ctx: &Context,
		decryptor: &dyn SecretDecryptor,
	) -> Result<(Config, Token)> {
		let config = self.unseal(decryptor).await?;
		let token = config.token_from_credentials(ctx).await?;

		Ok((config, token))
	}
}
impl Debug for SealedConfig {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SealedConfig")
			.field("client_id", &self.client_id)
			.field("sealed_secret", &"<sealed>")
			.field("auth_url", &self.auth_url)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use super::*;

	/// Reverses the ciphertext bytes, standing in for a key-management service.
	#[derive(Default)]
	struct ReversingDecryptor {
		calls: AtomicUsize,
	}
	impl SecretDecryptor for ReversingDecryptor {
		fn decrypt(&self, mut ciphertext: Vec<u8>) -> DecryptFuture<'_> {
			self.calls.fetch_add(1, Ordering::SeqCst);

			Box::pin(async move {
				ciphertext.reverse();

				Ok(ciphertext)
			})
		}
	}

	struct RefusingDecryptor;
	impl SecretDecryptor for RefusingDecryptor {
		fn decrypt(&self, _ciphertext: Vec<u8>) -> DecryptFuture<'_> {
			Box::pin(async { Err(DecryptError::service(std::io::Error::other("AccessDenied"))) })
		}
	}

	fn sealed(secret: &[u8]) -> SealedConfig {
		SealedConfig::new("CLIENT_ID", STANDARD.encode(secret)).expect("Default URL should parse.")
	}

	#[tokio::test]
	async fn unseal_decodes_then_decrypts_once() {
		let decryptor = ReversingDecryptor::default();
		let config = sealed(b"TERCES_TNEILC")
			.unseal(&decryptor)
			.await
			.expect("Reversible ciphertext should unseal.");

		assert_eq!(config.credentials, Credentials::client("CLIENT_ID", "CLIENT_SECRET"));
		assert_eq!(config.auth_url.as_str(), CLIENT_AUTH_URL);
		assert_eq!(decryptor.calls.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn invalid_base64_never_reaches_the_decryptor() {
		let decryptor = ReversingDecryptor::default();
		let err = SealedConfig::new("CLIENT_ID", "not base64!")
			.expect("Default URL should parse.")
			.unseal(&decryptor)
			.await
			.expect_err("Invalid base64 must fail.");

		assert!(matches!(err, Error::Decrypt(DecryptError::Base64(_))));
		assert_eq!(decryptor.calls.load(Ordering::SeqCst), 0);
	}

	#[tokio::test]
	async fn service_failures_abort_the_pipeline() {
		let err = sealed(b"ciphertext")
			.decrypt_then_retrieve(&Context::background(), &RefusingDecryptor)
			.await
			.expect_err("Decrypt failure must abort retrieval.");

		assert!(matches!(err, Error::Decrypt(DecryptError::Service { .. })));
	}

	#[tokio::test]
	async fn non_utf8_plaintext_is_rejected() {
		let err = sealed(&[0xff, 0xfe])
			.unseal(&ReversingDecryptor::default())
			.await
			.expect_err("Invalid UTF-8 must fail.");

		assert!(matches!(err, Error::Decrypt(DecryptError::Utf8(_))));
	}

	#[test]
	fn from_json_requires_client_credentials() {
		let config = SealedConfig::from_json(br#"{"client_id": "ID", "client_secret": "AQID"}"#)
			.expect("Client document should parse.");

		assert_eq!(config.sealed_secret, "AQID");

		let err = SealedConfig::from_json(br#"{"email": "EMAIL", "password": "PASSWORD"}"#)
			.expect_err("User documents cannot be sealed.");

		assert!(matches!(err, Error::Config(ConfigError::MissingCredentials)));
	}

	#[test]
	fn debug_hides_ciphertext() {
		let rendered = format!("{:?}", sealed(b"secret"));

		assert!(!rendered.contains(&STANDARD.encode(b"secret")));
	}
}
