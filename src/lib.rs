//! Client-side credential manager for the GEO authentication endpoint: exchange credentials for
//! a short-lived access token, reuse it while valid, refresh it lazily, and stamp it onto every
//! outbound request.
//!
//! ```no_run
//! # async fn demo() -> geo_auth::error::Result<()> {
//! use geo_auth::{config::Config, context::Context};
//!
//! let config = Config::from_json(br#"{"email":"ops@example.com","password":"hunter2"}"#)?;
//! let ctx = Context::background();
//! let token = config.token_from_credentials(&ctx).await?;
//! let client = config.client(ctx, Some(token));
//! let response = client.send(client.get("https://api.geocreation.com.au/api/projects")).await?;
//!
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod obs;
pub mod retrieve;
pub mod source;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use reqwest::{
		Client as ReqwestClient, Error as ReqwestError, Request, Response, StatusCode,
	};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {httpmock as _, parking_lot as _};
