/// HTTP status codes with their reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpStatus {
    Continue = 100,
    SwitchingProtocols = 101,
    Ok = 200,
    Created = 201,
    Accepted = 202,
    NonAuthoritativeInformation = 203,
    NoContent = 204,
    ResetContent = 205,
    PartialContent = 206,
    MultipleChoices = 300,
    MovedPermanently = 301,
    Found = 302,
    SeeOther = 303,
    NotModified = 304,
    UseProxy = 305,
    TemporaryRedirect = 307,
    BadRequest = 400,
    Unauthorized = 401,
    PaymentRequired = 402,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    NotAcceptable = 406,
    ProxyAuthenticationRequired = 407,
    RequestTimeout = 408,
    Conflict = 409,
    Gone = 410,
    LengthRequired = 411,
    PreconditionFailed = 412,
    PayloadTooLarge = 413,
    UriTooLong = 414,
    UnsupportedMediaType = 415,
    RangeNotSatisfiable = 416,
    ExpectationFailed = 417,
    InternalServerError = 500,
    NotImplemented = 501,
    BadGateway = 502,
    ServiceUnavailable = 503,
    GatewayTimeout = 504,
    HttpVersionNotSupported = 505,
}

const ALL: &[HttpStatus] = &[
    HttpStatus::Continue,
    HttpStatus::SwitchingProtocols,
    HttpStatus::Ok,
    HttpStatus::Created,
    HttpStatus::Accepted,
    HttpStatus::NonAuthoritativeInformation,
    HttpStatus::NoContent,
    HttpStatus::ResetContent,
    HttpStatus::PartialContent,
    HttpStatus::MultipleChoices,
    HttpStatus::MovedPermanently,
    HttpStatus::Found,
    HttpStatus::SeeOther,
    HttpStatus::NotModified,
    HttpStatus::UseProxy,
    HttpStatus::TemporaryRedirect,
    HttpStatus::BadRequest,
    HttpStatus::Unauthorized,
    HttpStatus::PaymentRequired,
    HttpStatus::Forbidden,
    HttpStatus::NotFound,
    HttpStatus::MethodNotAllowed,
    HttpStatus::NotAcceptable,
    HttpStatus::ProxyAuthenticationRequired,
    HttpStatus::RequestTimeout,
    HttpStatus::Conflict,
    HttpStatus::Gone,
    HttpStatus::LengthRequired,
    HttpStatus::PreconditionFailed,
    HttpStatus::PayloadTooLarge,
    HttpStatus::UriTooLong,
    HttpStatus::UnsupportedMediaType,
    HttpStatus::RangeNotSatisfiable,
    HttpStatus::ExpectationFailed,
    HttpStatus::InternalServerError,
    HttpStatus::NotImplemented,
    HttpStatus::BadGateway,
    HttpStatus::ServiceUnavailable,
    HttpStatus::GatewayTimeout,
    HttpStatus::HttpVersionNotSupported,
];

impl HttpStatus {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<HttpStatus> {
        ALL.iter().copied().find(|s| s.code() == code)
    }

    pub fn reason(self) -> &'static str {
        match self {
            HttpStatus::Continue => "Continue",
            HttpStatus::SwitchingProtocols => "Switching Protocols",
            HttpStatus::Ok => "OK",
            HttpStatus::Created => "Created",
            HttpStatus::Accepted => "Accepted",
            HttpStatus::NonAuthoritativeInformation => "Non-Authoritative Information",
            HttpStatus::NoContent => "No Content",
            HttpStatus::ResetContent => "Reset Content",
            HttpStatus::PartialContent => "Partial Content",
            HttpStatus::MultipleChoices => "Multiple Choices",
            HttpStatus::MovedPermanently => "Moved Permanently",
            HttpStatus::Found => "Found",
            HttpStatus::SeeOther => "See Other",
            HttpStatus::NotModified => "Not Modified",
            HttpStatus::UseProxy => "Use Proxy",
            HttpStatus::TemporaryRedirect => "Temporary Redirect",
            HttpStatus::BadRequest => "Bad Request",
            HttpStatus::Unauthorized => "Unauthorized",
            HttpStatus::PaymentRequired => "Payment Required",
            HttpStatus::Forbidden => "Forbidden",
            HttpStatus::NotFound => "Not Found",
            HttpStatus::MethodNotAllowed => "Method Not Allowed",
            HttpStatus::NotAcceptable => "Not Acceptable",
            HttpStatus::ProxyAuthenticationRequired => "Proxy Authentication Required",
            HttpStatus::RequestTimeout => "Request Timeout",
            HttpStatus::Conflict => "Conflict",
            HttpStatus::Gone => "Gone",
            HttpStatus::LengthRequired => "Length Required",
            HttpStatus::PreconditionFailed => "Precondition Failed",
            HttpStatus::PayloadTooLarge => "Request Entity Too Large",
            HttpStatus::UriTooLong => "Request-URI Too Long",
            HttpStatus::UnsupportedMediaType => "Unsupported Media Type",
            HttpStatus::RangeNotSatisfiable => "Requested Range Not Satisfiable",
            HttpStatus::ExpectationFailed => "Expectation Failed",
            HttpStatus::InternalServerError => "Internal Server Error",
            HttpStatus::NotImplemented => "Not Implemented",
            HttpStatus::BadGateway => "Bad Gateway",
            HttpStatus::ServiceUnavailable => "Service Unavailable",
            HttpStatus::GatewayTimeout => "Gateway Timeout",
            HttpStatus::HttpVersionNotSupported => "HTTP Version Not Supported",
        }
    }
}

/// Reason phrase for a numeric code, empty for unknown codes.
pub fn status_description(code: u16) -> &'static str {
    HttpStatus::from_code(code).map(HttpStatus::reason).unwrap_or("")
}
