//! # Econfeed Core
//!
//! Request/response pipeline for a client of a remote economic-data API.
//!
//! ## Overview
//!
//! Resource call-sites (calendar, markets, news, ...) build a path with the
//! encoding primitives and hand it to a [`Client`]. The client resolves the
//! path against its base origin, attaches the credential, performs one
//! blocking GET, classifies failures into [`ApiError`] kinds, and reshapes
//! the JSON body into the requested [`OutputShape`].
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`encoding`] | Percent-encoding of path segments and query values |
//! | [`dates`] | Date format detection and range validation |
//! | [`query`] | Query composition and the [`RequestPath`] builder |
//! | [`credential`] | `<key>:<secret>` credential type |
//! | [`config`] | Base origin, streaming origin, and credential settings |
//! | [`http_client`] | Blocking transport abstraction |
//! | [`client`] | Authenticated request executor |
//! | [`classify`] | Status/transport error classification |
//! | [`output`] | Records, frame, and raw output shapes |
//! | [`error`] | Error types |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use econfeed_core::{Client, OutputShape, RequestDescriptor, RequestPath};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_env()?;
//!
//!     let path = RequestPath::new("calendar")
//!         .segment("country")
//!         .segment(vec!["united states", "china"])
//!         .date_range(Some("2016-01-01"), Some("2016-01-03"))?;
//!
//!     let frame = client
//!         .fetch(&RequestDescriptor::from(path).with_shape(OutputShape::Frame))?
//!         .into_frame();
//!
//!     if let Some(frame) = frame {
//!         println!("{} rows, columns {:?}", frame.height(), frame.columns());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use econfeed_core::{ApiError, ApiErrorKind};
//!
//! fn handle_error(error: ApiError) {
//!     match error.kind() {
//!         ApiErrorKind::Transport => {
//!             // Plausibly transient; caller may retry
//!         }
//!         ApiErrorKind::Authentication | ApiErrorKind::CredentialFormat => {
//!             // Fix the credential
//!         }
//!         ApiErrorKind::Parameters | ApiErrorKind::Date => {
//!             // Fix the call
//!         }
//!     }
//! }
//! ```
//!
//! Local validation (credential format, output selector, dates) always fails
//! before a request is sent. The core never retries.

pub mod classify;
pub mod client;
pub mod config;
pub mod credential;
pub mod dates;
pub mod encoding;
pub mod error;
pub mod http_client;
pub mod output;
pub mod query;

pub use classify::{classify_response, classify_status, classify_transport};
pub use client::{Client, RequestDescriptor, Target};
pub use config::ClientConfig;
pub use credential::Credential;
pub use dates::{detect_format, validate_range, validate_time, DateFormat, DateRange};
pub use encoding::{encode_list, encode_pairs, encode_value, Param};
pub use error::{ApiError, ApiErrorKind, ValidationError};
pub use http_client::{
    HttpClient, HttpError, HttpErrorKind, HttpRequest, HttpResponse, NoopHttpClient,
    ReqwestHttpClient,
};
pub use output::{normalize, DataFrame, Output, OutputShape, SCALAR_COLUMN};
pub use query::{append_credential, append_date_range, append_param, RequestPath};
