//! Shared fixtures for the integration tests.

#![allow(dead_code)]

// std
use std::time::Duration as StdDuration;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::{Duration, OffsetDateTime};
// self
use geo_auth::{
	auth::{Credentials, Token},
	config::Config,
	retrieve::format_expires_at,
	url::Url,
};

pub const LOGIN_PATH: &str = "/api/session/login";
pub const CLIENT_ID: &str = "CLIENT_ID";
pub const CLIENT_SECRET: &str = "CLIENT_SECRET";
pub const ACCESS_TOKEN: &str = "7CbSGwAngmtTWR2kEds9KN0yZIxLJYBj";

/// Client-credential configuration pointed at the mock login endpoint.
pub fn config(server: &MockServer) -> Config {
	let auth_url = Url::parse(&server.url(LOGIN_PATH)).expect("Mock login URL should parse.");

	Config::new(Credentials::client(CLIENT_ID, CLIENT_SECRET), auth_url)
}

/// Login body the endpoint expects for [`config`].
pub fn login_body() -> serde_json::Value {
	json!({"user": {"email": CLIENT_ID, "password": CLIENT_SECRET}})
}

/// Successful login envelope for `token`, expiring `ttl` from now.
pub fn login_envelope(token: &str, ttl: Duration) -> serde_json::Value {
	json!({
		"_id": "5a71e4f8ef8d2d2a94df5c5e",
		"_type": "session",
		"userId": "5a71e4f8ef8d2d2a94df5c5f",
		"authenticationToken": {
			"token": token,
			"expiresAt": format_expires_at(OffsetDateTime::now_utc() + ttl)
				.expect("UTC instant should format."),
		}
	})
}

/// Mounts a login endpoint that issues [`ACCESS_TOKEN`] after `delay`.
pub async fn mount_login<'a>(server: &'a MockServer, delay: StdDuration) -> httpmock::Mock<'a> {
	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(LOGIN_PATH)
				.header("content-type", "application/json")
				.json_body(login_body());
			then.status(200)
				.header("content-type", "application/json")
				.delay(delay)
				.json_body(login_envelope(ACCESS_TOKEN, Duration::hours(1)));
		})
		.await
}

/// Token that has already expired.
pub fn expired_token(access: &str) -> Token {
	Token::new(access).with_expiry(OffsetDateTime::now_utc() - Duration::hours(1))
}

/// Token valid for another hour.
pub fn fresh_token(access: &str) -> Token {
	Token::new(access).with_expiry(OffsetDateTime::now_utc() + Duration::hours(1))
}
