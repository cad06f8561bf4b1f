// Error handling and response types for Stratum services
//
// Wraps anyhow errors for actix-web. A wrapped StratumError renders as a
// StatusMessage body with the variant's HTTP status; anything else is a
// plain 500.

use std::fmt::{Display, Formatter};

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use stratum_api::model::StatusMessage;
use stratum_common::StratumError;

// Local wrapper for application errors to implement actix-web error handling
// (Cannot impl foreign trait for foreign type due to orphan rules)
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl From<StratumError> for AppError {
    fn from(value: StratumError) -> Self {
        AppError {
            inner: value.into(),
        }
    }
}

impl AppError {
    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }

    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        let status = self
            .downcast_ref::<StratumError>()
            .map(|e| e.status_code())
            .unwrap_or(500);
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self.downcast_ref::<StratumError>() {
            Some(e) => e.to_string(),
            None => self.inner.to_string(),
        };
        HttpResponse::build(status).json(StatusMessage::error(status.as_u16(), message))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::error::ResponseError;

    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err: AppError = StratumError::not_found("account '42' not found").into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_maps_to_401() {
        let err: AppError = StratumError::Authentication("token expired".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_unknown_error_maps_to_500() {
        let err = AppError::from(anyhow::anyhow!("something unexpected"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(format!("{}", err), "something unexpected");
    }

    #[test]
    fn test_downcast_preserves_variant() {
        let err: AppError = StratumError::InvalidData("bad email".to_string()).into();
        let inner = err.downcast_ref::<StratumError>().unwrap();
        assert!(matches!(inner, StratumError::InvalidData(_)));
    }
}
