//! Credential pairs exchanged for access tokens.

// self
use crate::{_prelude::*, auth::Secret, error::ConfigError};

/// The two credential deployments the endpoint accepts.
///
/// Both variants travel in the same login payload: the identifier fills `email` and the secret
/// fills `password`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
	/// Application credentials issued to a service.
	Client {
		/// Application identifier.
		client_id: String,
		/// Application secret.
		client_secret: Secret,
	},
	/// Resource owner credentials.
	User {
		/// Account email.
		email: String,
		/// Account password.
		password: Secret,
	},
}
impl Credentials {
	/// Builds a client credential pair.
	pub fn client(client_id: impl Into<String>, client_secret: impl Into<Secret>) -> Self {
		Self::Client { client_id: client_id.into(), client_secret: client_secret.into() }
	}

	/// Builds a user credential pair.
	pub fn user(email: impl Into<String>, password: impl Into<Secret>) -> Self {
		Self::User { email: email.into(), password: password.into() }
	}

	/// Parses a credential document holding either `{client_id, client_secret}` or
	/// `{email, password}`.
	pub fn from_json(json: &[u8]) -> Result<Self> {
		let de = &mut serde_json::Deserializer::from_slice(json);
		let raw: RawCredentials = serde_path_to_error::deserialize(de)
			.map_err(|source| ConfigError::CredentialsParse { source })?;

		raw.resolve()
	}

	/// Returns the value sent as the login `email` field.
	pub fn identifier(&self) -> &str {
		match self {
			Self::Client { client_id, .. } => client_id,
			Self::User { email, .. } => email,
		}
	}

	/// Returns the value sent as the login `password` field.
	pub fn secret(&self) -> &Secret {
		match self {
			Self::Client { client_secret, .. } => client_secret,
			Self::User { password, .. } => password,
		}
	}
}

#[derive(Deserialize)]
struct RawCredentials {
	client_id: Option<String>,
	client_secret: Option<Secret>,
	email: Option<String>,
	password: Option<Secret>,
}
impl RawCredentials {
	fn resolve(self) -> Result<Credentials> {
		let client = self.client_id.is_some() || self.client_secret.is_some();
		let user = self.email.is_some() || self.password.is_some();

		match (client, user) {
			(true, true) => Err(ConfigError::AmbiguousCredentials.into()),
			(false, false) => Err(ConfigError::MissingCredentials.into()),
			(true, false) => Ok(Credentials::Client {
				client_id: self.client_id.unwrap_or_default(),
				client_secret: self.client_secret.unwrap_or_default(),
			}),
			(false, true) => Ok(Credentials::User {
				email: self.email.unwrap_or_default(),
				password: self.password.unwrap_or_default(),
			}),
		}
	}
}
