// storefront_server/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::User;
use crate::services::SignedIn;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct RegisterRequestPayload {
  pub name: String,
  pub email: String,
  pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  pub email: String,
  pub password: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
  pub token: String,
  pub user: User,
}

impl From<SignedIn> for AuthResponse {
  fn from(signed_in: SignedIn) -> Self {
    Self {
      token: signed_in.session.token,
      user: signed_in.user,
    }
  }
}

#[instrument(name = "handler::register", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn register_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<RegisterRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let signed_in = app_state
    .auth
    .register(&payload.name, &payload.email, &payload.password)
    .await?;
  info!(user_id = %signed_in.user.id, "Registration successful.");
  Ok(HttpResponse::Created().json(AuthResponse::from(signed_in)))
}

#[instrument(name = "handler::login", skip(app_state, req_payload), fields(req_email = %req_payload.email))]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let signed_in = app_state.auth.login(&payload.email, &payload.password).await?;
  Ok(HttpResponse::Ok().json(AuthResponse::from(signed_in)))
}

pub async fn me_handler(app_state: web::Data<AppState>, auth_user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
  let user = app_state.auth.current_user(auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(user))
}
