//! Validated access to untrusted request data and Accept-header negotiation.
//!
//! - [`Laundromat`] stores raw input case-insensitively and only hands values
//!   back through a [`Filter`].
//! - [`Negotiator`] resolves an Accept-style header against supported values.
//! - [`HeaderParam`] splits `;` parameterised header values.
//! - [`HttpRequest`] and [`HttpResponse`] are thin containers around them.

pub mod config;
pub mod error;
pub mod http;

pub use config::HttpioConfig;
pub use error::{HttpioError, HttpioResult};
pub use http::headers::HeaderParam;
pub use http::negotiator::{AcceptMap, Negotiator};
pub use http::request::{EtagHeader, HttpRequest, ModifiedHeader, RequestInput};
pub use http::response::{Disposition, HttpResponse};
pub use http::status::HttpStatus;
pub use http::store::Laundromat;
pub use http::upload::{UploadDescriptor, UploadErrorCode};
pub use http::validator::{Filter, Sanitizer, is_alnum, is_alpha, is_digit};
pub use http::value::Value;
