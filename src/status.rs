//! HTTP status codes as a typed enum.
//!
//! Only the codes commentd actually emits are listed. Use [`Status`]
//! anywhere a status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.
//!
//! ```rust
//! use commentd::{Response, Status};
//!
//! Response::status(Status::NoContent);
//!
//! Response::builder()
//!     .status(Status::NotFound)
//!     .text("Comment not found ⚠️");
//! ```

use http::StatusCode;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                   // 200
    Created,              // 201
    NoContent,            // 204

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,           // 400
    NotFound,             // 404
    MethodNotAllowed,     // 405
    UnprocessableContent, // 422

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError,  // 500
    ServiceUnavailable,   // 503
}

impl From<Status> for StatusCode {
    fn from(s: Status) -> StatusCode {
        match s {
            Status::Ok                   => StatusCode::OK,
            Status::Created              => StatusCode::CREATED,
            Status::NoContent            => StatusCode::NO_CONTENT,
            Status::BadRequest           => StatusCode::BAD_REQUEST,
            Status::NotFound             => StatusCode::NOT_FOUND,
            Status::MethodNotAllowed     => StatusCode::METHOD_NOT_ALLOWED,
            Status::UnprocessableContent => StatusCode::UNPROCESSABLE_ENTITY,
            Status::InternalServerError  => StatusCode::INTERNAL_SERVER_ERROR,
            Status::ServiceUnavailable   => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        StatusCode::from(s).as_u16()
    }
}
