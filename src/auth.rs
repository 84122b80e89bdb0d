//! Auth-domain models: access tokens, credential pairs, and redacted secrets.

pub mod credentials;
pub mod secret;
pub mod token;

pub use credentials::*;
pub use secret::*;
pub use token::*;
