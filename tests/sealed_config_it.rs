mod common;

// std
use std::time::Duration as StdDuration;
// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
use httpmock::prelude::*;
// self
use common::*;
use geo_auth::{
	config::{DecryptFuture, SealedConfig, SecretDecryptor},
	context::Context,
	error::{DecryptError, Error},
	url::Url,
};

/// XORs every byte with a fixed key, standing in for a key-management service.
struct XorDecryptor(u8);
impl SecretDecryptor for XorDecryptor {
	fn decrypt(&self, ciphertext: Vec<u8>) -> DecryptFuture<'_> {
		let key = self.0;

		Box::pin(async move { Ok(ciphertext.into_iter().map(|byte| byte ^ key).collect()) })
	}
}

struct DeniedDecryptor;
impl SecretDecryptor for DeniedDecryptor {
	fn decrypt(&self, _ciphertext: Vec<u8>) -> DecryptFuture<'_> {
		Box::pin(async {
			Err(DecryptError::service(std::io::Error::other("AccessDeniedException")))
		})
	}
}

fn sealed(server: &MockServer, key: u8) -> SealedConfig {
	let ciphertext: Vec<u8> = CLIENT_SECRET.bytes().map(|byte| byte ^ key).collect();
	let auth_url = Url::parse(&server.url(LOGIN_PATH)).expect("Mock login URL should parse.");

	SealedConfig::new(CLIENT_ID, STANDARD.encode(ciphertext))
		.expect("Default URL should parse.")
		.with_auth_url(auth_url)
}

#[tokio::test]
async fn decrypted_secret_is_used_as_the_password() {
	let server = MockServer::start_async().await;
	let login = mount_login(&server, StdDuration::ZERO).await;
	let (config, token) = sealed(&server, 0x5a)
		.decrypt_then_retrieve(&Context::background(), &XorDecryptor(0x5a))
		.await
		.expect("Sealed credentials should exchange for a token.");

	assert_eq!(config.credentials.secret().expose(), CLIENT_SECRET);
	assert_eq!(token.access_token.expose(), ACCESS_TOKEN);

	login.assert_async().await;
}

#[tokio::test]
async fn decrypt_failure_never_contacts_the_login_endpoint() {
	let server = MockServer::start_async().await;
	let login = mount_login(&server, StdDuration::ZERO).await;
	let err = sealed(&server, 0x5a)
		.decrypt_then_retrieve(&Context::background(), &DeniedDecryptor)
		.await
		.expect_err("Decrypt failure must abort the pipeline.");

	assert!(matches!(err, Error::Decrypt(DecryptError::Service { .. })));
	assert_eq!(login.hits_async().await, 0);
}

#[tokio::test]
async fn wrong_key_sends_the_wrong_password() {
	let server = MockServer::start_async().await;
	let login = mount_login(&server, StdDuration::ZERO).await;
	let rejected = server
		.mock_async(|when, then| {
			when.method(POST).path(LOGIN_PATH);
			then.status(400).body(r#"{"statusMessage": "Invalid email or password"}"#);
		})
		.await;
	let err = sealed(&server, 0x5a)
		.decrypt_then_retrieve(&Context::background(), &XorDecryptor(0x00))
		.await
		.expect_err("Garbled secret must be rejected by the endpoint.");

	assert!(matches!(err, Error::Retrieve(_)));
	assert_eq!(login.hits_async().await, 0);

	rejected.assert_async().await;
}
