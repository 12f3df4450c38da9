//! HTTP mapping for domain errors.
//!
//! The domain [`Error`] stays framework-free; this module gives it a status
//! code and a JSON body. Internal failures are logged in full and reach the
//! client only as a generic message with the trace id attached.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Trace id to report: the one captured on the error, else the one in scope.
fn trace_id_for(error: &Error) -> Option<String> {
    error
        .trace_id()
        .map(str::to_owned)
        .or_else(|| TraceId::current().map(|id| id.to_string()))
}

fn client_payload(error: &Error, trace_id: Option<String>) -> Error {
    let payload = if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal(INTERNAL_MESSAGE)
    } else {
        let mut payload = Error::new(error.code(), error.message());
        if let Some(details) = error.details() {
            payload = payload.with_details(details.clone());
        }
        payload
    };
    match trace_id {
        Some(id) => payload.with_trace_id(id),
        None => payload,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let trace_id = trace_id_for(self);
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(
                trace_id = trace_id.as_deref().unwrap_or("-"),
                message = self.message(),
                "request failed with internal error"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = &trace_id {
            builder.insert_header((TRACE_ID_HEADER, id.clone()));
        }
        builder.json(client_payload(self, trace_id))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

#[cfg(test)]
mod tests;
