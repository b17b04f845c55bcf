//! Thin request aggregate.
//!
//! An [`HttpRequest`] owns one [`Laundromat`] per input source and derives the
//! content type and charset from the `Content-Type` header. It never reads
//! process globals: the binding layer hands over already-decoded maps in a
//! [`RequestInput`].

use std::collections::VecDeque;
use std::time::SystemTime;

use indexmap::IndexMap;
use tracing::debug;

use crate::config::HttpioConfig;
use crate::error::{HttpioError, HttpioResult};
use crate::http::headers::HeaderParam;
use crate::http::store::Laundromat;
use crate::http::upload::UploadDescriptor;
use crate::http::validator::{Filter, Sanitizer, is_alnum};
use crate::http::value::Value;
use crate::http::{HttpMethod, http_method_from_str};

/// Raw request data as decoded by the binding layer.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    pub ip: String,
    pub uri: String,
    pub method: String,
    pub headers: IndexMap<String, Value>,
    pub cookies: IndexMap<String, Value>,
    pub query: IndexMap<String, Value>,
    pub body: IndexMap<String, Value>,
    pub uploads: Vec<UploadDescriptor>,
}

/// Which conditional header [`HttpRequest::match_etag`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtagHeader {
    IfMatch,
    IfNoneMatch,
}

impl EtagHeader {
    fn name(self) -> &'static str {
        match self {
            EtagHeader::IfMatch => "If-Match",
            EtagHeader::IfNoneMatch => "If-None-Match",
        }
    }
}

/// Which conditional header [`HttpRequest::match_modified`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifiedHeader {
    IfModifiedSince,
    IfUnmodifiedSince,
}

impl ModifiedHeader {
    fn name(self) -> &'static str {
        match self {
            ModifiedHeader::IfModifiedSince => "If-Modified-Since",
            ModifiedHeader::IfUnmodifiedSince => "If-Unmodified-Since",
        }
    }
}

#[derive(Debug)]
pub struct HttpRequest {
    ip: String,
    uri: String,
    method: HttpMethod,
    content_type: String,
    charset: String,
    modified_since_pattern: String,

    pub headers: Laundromat,
    pub cookies: Laundromat,
    pub query: Laundromat,
    pub body: Laundromat,
    uploads: VecDeque<UploadDescriptor>,
}

impl HttpRequest {
    /// Builds the aggregate.
    ///
    /// Fails with [`HttpioError::UnknownMethod`] for a method outside the
    /// known set, and with a data error when a `Content-Type` header is
    /// present but does not match the configured pattern.
    pub fn new(input: RequestInput, config: &HttpioConfig) -> HttpioResult<Self> {
        let method = match http_method_from_str(&input.method) {
            HttpMethod::Unknown => return Err(HttpioError::UnknownMethod(input.method)),
            m => m,
        };

        let headers = Laundromat::new(input.headers);

        let mut content_type = config.default_content_type.clone();
        let mut charset = String::new();
        if headers.is("Content-Type") {
            let filter = Filter::pattern(&config.content_type_pattern)?;
            let raw = headers.get("Content-Type", &filter)?;
            let ctype = HeaderParam::parse(&raw.scalar_string().unwrap_or_default());
            content_type = ctype.base().to_string();
            charset = ctype.param("charset").to_string();
        }

        debug!(method = method.as_str(), uri = %input.uri, %content_type, "request built");

        Ok(Self {
            ip: input.ip,
            uri: input.uri,
            method,
            content_type,
            charset,
            modified_since_pattern: config.modified_since_pattern.clone(),
            headers,
            cookies: Laundromat::new(input.cookies),
            query: Laundromat::new(input.query),
            body: Laundromat::new(input.body),
            uploads: input.uploads.into(),
        })
    }

    /// Remote address, kept for logging only.
    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// Compares `etag` with the given conditional header.
    ///
    /// An absent header compares as the empty string. A present header must
    /// be alphanumeric or the read fails with [`HttpioError::DataNotValid`].
    pub fn match_etag(&self, etag: &str, header: EtagHeader) -> HttpioResult<bool> {
        let mut current = String::new();
        if self.headers.is(header.name()) {
            let value = self.headers.get(header.name(), &Filter::predicate(is_alnum))?;
            current = value.scalar_string().unwrap_or_default();
        }

        Ok(etag == current)
    }

    /// True iff `time` is strictly earlier than the date in the given header.
    ///
    /// A missing header or one that is not an HTTP date never matches.
    pub fn match_modified(&self, time: SystemTime, header: ModifiedHeader) -> HttpioResult<bool> {
        if !self.headers.is(header.name()) {
            return Ok(false);
        }

        let filter = Filter::pattern(&self.modified_since_pattern)?;
        let raw = self.headers.get(header.name(), &filter)?;
        let raw = raw.scalar_string().unwrap_or_default();

        match httpdate::parse_http_date(&raw) {
            Ok(header_time) => Ok(time < header_time),
            Err(_) => Ok(false),
        }
    }

    /// True while unprocessed uploads remain.
    pub fn is_upload(&self) -> bool {
        !self.uploads.is_empty()
    }

    /// Takes the next upload in submission order.
    ///
    /// The descriptor is validated and its target name stripped of markup.
    pub fn next_upload(&mut self) -> Option<HttpioResult<UploadDescriptor>> {
        let mut upload = self.uploads.pop_front()?;

        if let Err(err) = upload.validate() {
            return Some(Err(err));
        }

        upload.name = Sanitizer::StripTags.sanitize(&upload.name);

        Some(Ok(upload))
    }
}
