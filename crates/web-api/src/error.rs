use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use betedge_core::{ErrorKind, WagerError};
use serde::{Deserialize, Serialize};

/// JSON body returned for every rejected calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
    pub field: String,
    pub constraint: String,
}

/// A calculation the engine refused to perform.
#[derive(Debug)]
pub struct ApiError(pub WagerError);

impl From<WagerError> for ApiError {
    fn from(err: WagerError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        tracing::debug!(kind = %err.kind(), field = err.field(), "Rejected request: {}", err);

        let body = Json(ErrorBody {
            kind: err.kind(),
            message: err.to_string(),
            field: err.field().to_string(),
            constraint: err.constraint(),
        });

        (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wager_errors_become_unprocessable() {
        let err: ApiError = WagerError::invalid_stake("cash_stake", 0.0).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
