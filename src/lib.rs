//! Signed client for BCA's corporate REST API.
//!
//! Sessions come from the OAuth2 client-credentials grant, every business call carries a
//! canonical HMAC-SHA256 signature, and an expired bearer token is replaced transparently.
//!
//! [`client::BcaClient`] is the entry point. Every business call goes through a bounded retry
//! loop ([`retry::RetryMachine`]) that re-authenticates on HTTP 401 or the provider's
//! token-invalid error code, then replays the original request with a fresh signature.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod http;
pub mod obs;
pub mod retry;
pub mod signature;
pub mod store;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{OffsetDateTime, UtcOffset};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use rust_decimal::Decimal;
pub use tokio_util::sync::CancellationToken;
pub use url;
#[cfg(test)] use httpmock as _;
