use actix_web::{web, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// Shared state registered on the `App`. Its absence is a wiring bug.
pub fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::internal(ErrorCode::Internal, "AppState not available"))
}
