//! Error types for campaignweb-api

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use campaignweb_core::{CoreError, ErrorCode};
use campaignweb_utils::escape_html;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Internal server error: {message}")]
    InternalError { message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error.code() {
            ErrorCode::FolderNotFound => ApiError::NotFound {
                resource: error.to_string(),
            },
            _ => ApiError::InternalError {
                message: error.to_details().to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::warn!("Request rejected: {}", self);
        }

        let body = crate::base_html(
            "Erro",
            &format!(
                "<div class='p-6'><h1 class='text-xl font-bold text-red-600'>{}</h1><pre class='mt-4 text-sm'>{}</pre></div>",
                status,
                escape_html(&self.to_string())
            ),
        );
        (status, Html(body)).into_response()
    }
}
