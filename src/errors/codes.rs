use axum::http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use super::http_error::HttpError;

/// Returned when a number is not one of the defined [`ErrorCode`] values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not an HTTP error status code")]
pub struct UnknownErrorCode(pub u16);

// One row per status: variant, number, canonical phrase, and the two
// convenience constructors generated on `HttpError`.
macro_rules! error_codes {
    ($( $variant:ident = $num:literal, $phrase:literal, $ctor:ident, $named:ident; )*) => {
        /// HTTP client and server error statuses
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum ErrorCode {
            $(
                #[doc = concat!(stringify!($num), " ", $phrase)]
                $variant = $num,
            )*
        }

        impl ErrorCode {
            /// Every defined code, in ascending numeric order
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$variant,)*];

            /// Canonical English status phrase, e.g. `"Not Found"` for 404
            pub const fn phrase(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $phrase,)*
                }
            }
        }

        impl TryFrom<u16> for ErrorCode {
            type Error = UnknownErrorCode;

            fn try_from(value: u16) -> Result<Self, Self::Error> {
                match value {
                    $($num => Ok(ErrorCode::$variant),)*
                    other => Err(UnknownErrorCode(other)),
                }
            }
        }

        impl HttpError {
            $(
                #[doc = concat!("`", stringify!($num), " ", $phrase, "` carrying `message`.")]
                pub fn $ctor(message: impl Into<String>) -> Self {
                    Self::new(ErrorCode::$variant, message)
                }

                #[doc = concat!("`", stringify!($num), " ", $phrase, "` carrying a symbolic `name` and `message`.")]
                pub fn $named(name: impl Into<String>, message: impl Into<String>) -> Self {
                    Self::named(ErrorCode::$variant, name, message)
                }
            )*
        }
    };
}

error_codes! {
    BadRequest = 400, "Bad Request", bad_request, bad_request_named;
    Unauthorized = 401, "Unauthorized", unauthorized, unauthorized_named;
    PaymentRequired = 402, "Payment Required", payment_required, payment_required_named;
    Forbidden = 403, "Forbidden", forbidden, forbidden_named;
    NotFound = 404, "Not Found", not_found, not_found_named;
    MethodNotAllowed = 405, "Method Not Allowed", method_not_allowed, method_not_allowed_named;
    NotAcceptable = 406, "Not Acceptable", not_acceptable, not_acceptable_named;
    ProxyAuthenticationRequired = 407, "Proxy Authentication Required", proxy_authentication_required, proxy_authentication_required_named;
    RequestTimeout = 408, "Request Timeout", request_timeout, request_timeout_named;
    Conflict = 409, "Conflict", conflict, conflict_named;
    Gone = 410, "Gone", gone, gone_named;
    LengthRequired = 411, "Length Required", length_required, length_required_named;
    PreconditionFailed = 412, "Precondition Failed", precondition_failed, precondition_failed_named;
    PayloadTooLarge = 413, "Request Entity Too Large", payload_too_large, payload_too_large_named;
    UriTooLong = 414, "Request URI Too Long", uri_too_long, uri_too_long_named;
    UnsupportedMediaType = 415, "Unsupported Media Type", unsupported_media_type, unsupported_media_type_named;
    RangeNotSatisfiable = 416, "Requested Range Not Satisfiable", range_not_satisfiable, range_not_satisfiable_named;
    ExpectationFailed = 417, "Expectation Failed", expectation_failed, expectation_failed_named;
    ImATeapot = 418, "I'm a teapot", im_a_teapot, im_a_teapot_named;
    MisdirectedRequest = 421, "Misdirected Request", misdirected_request, misdirected_request_named;
    UnprocessableEntity = 422, "Unprocessable Entity", unprocessable_entity, unprocessable_entity_named;
    Locked = 423, "Locked", locked, locked_named;
    FailedDependency = 424, "Failed Dependency", failed_dependency, failed_dependency_named;
    TooEarly = 425, "Too Early", too_early, too_early_named;
    UpgradeRequired = 426, "Upgrade Required", upgrade_required, upgrade_required_named;
    PreconditionRequired = 428, "Precondition Required", precondition_required, precondition_required_named;
    TooManyRequests = 429, "Too Many Requests", too_many_requests, too_many_requests_named;
    RequestHeaderFieldsTooLarge = 431, "Request Header Fields Too Large", request_header_fields_too_large, request_header_fields_too_large_named;
    UnavailableForLegalReasons = 451, "Unavailable For Legal Reasons", unavailable_for_legal_reasons, unavailable_for_legal_reasons_named;

    InternalServerError = 500, "Internal Server Error", internal_server_error, internal_server_error_named;
    NotImplemented = 501, "Not Implemented", not_implemented, not_implemented_named;
    BadGateway = 502, "Bad Gateway", bad_gateway, bad_gateway_named;
    ServiceUnavailable = 503, "Service Unavailable", service_unavailable, service_unavailable_named;
    GatewayTimeout = 504, "Gateway Timeout", gateway_timeout, gateway_timeout_named;
    HttpVersionNotSupported = 505, "HTTP Version Not Supported", http_version_not_supported, http_version_not_supported_named;
    VariantAlsoNegotiates = 506, "Variant Also Negotiates", variant_also_negotiates, variant_also_negotiates_named;
    InsufficientStorage = 507, "Insufficient Storage", insufficient_storage, insufficient_storage_named;
    LoopDetected = 508, "Loop Detected", loop_detected, loop_detected_named;
    NotExtended = 510, "Not Extended", not_extended, not_extended_named;
    NetworkAuthenticationRequired = 511, "Network Authentication Required", network_authentication_required, network_authentication_required_named;
}

impl ErrorCode {
    /// Numeric HTTP status
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Inverse of [`ErrorCode::phrase`]
    pub fn from_phrase(phrase: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| code.phrase() == phrase)
    }

    /// 4xx: the caller can recover by changing the request
    pub const fn is_client_error(self) -> bool {
        self.as_u16() < 500
    }

    /// 5xx: detail must not reach the client
    pub const fn is_server_error(self) -> bool {
        self.as_u16() >= 500
    }

    /// Status line for this code
    pub fn status(self) -> StatusCode {
        StatusCode::from_u16(self.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.as_u16()
    }
}

impl From<ErrorCode> for StatusCode {
    fn from(code: ErrorCode) -> Self {
        code.status()
    }
}

// On the wire a code is its phrase, not its number.
impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.phrase())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let phrase = String::deserialize(deserializer)?;
        Self::from_phrase(&phrase).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown error code phrase: {phrase:?}"))
        })
    }
}
