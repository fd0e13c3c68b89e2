use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::extractors::{Validate, ValidatedJson};
use crate::services::users::{
    self, check_email, check_len, LOGIN_USERNAME_LEN, PASSWORD_LEN, REGISTER_USERNAME_LEN,
};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), DomainError> {
        check_len("username", &self.username, REGISTER_USERNAME_LEN)?;
        check_email(&self.email)?;
        check_len("password", &self.password, PASSWORD_LEN)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), DomainError> {
        check_len("username", &self.username, LOGIN_USERNAME_LEN)?;
        check_len("password", &self.password, PASSWORD_LEN)
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let user = users::register(
        app_state.users(),
        &body.username,
        &body.email,
        &body.password,
    )
    .await?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        id: user.id,
        username: user.username,
    }))
}

async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<LoginResponse>, AppError> {
    let token = users::login(
        app_state.users(),
        &app_state.security,
        &body.username,
        &body.password,
    )
    .await?;

    Ok(web::Json(LoginResponse { token }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
