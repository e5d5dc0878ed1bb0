// POST /vpn-auth - account registration and login, selected by `action`

use axum::{body::Bytes, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::utils::{
    non_blank, normalize_email, parse_body, username_from_email, validate_email_format,
    validate_password,
};
use crate::api::format::UserView;
use crate::api::state::AppState;
use crate::auth::password::{dummy_verify, hash_password, verify_password, Verification};
use crate::database::models::NewUser;
use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};

const INVALID_CREDENTIALS: &str = "Неверный email или пароль";

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AuthRequest {
    Register(RegisterRequest),
    Login(LoginRequest),
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserView,
    pub message: &'static str,
}

pub async fn post(State(state): State<AppState>, body: Bytes) -> ApiResult<AuthResponse> {
    match parse_body::<AuthRequest>(&body)? {
        AuthRequest::Register(req) => register(&state, req).await,
        AuthRequest::Login(req) => login(&state, req).await,
    }
}

/// Creates the account. A taken email surfaces as 409 from the store.
async fn register(state: &AppState, req: RegisterRequest) -> ApiResult<AuthResponse> {
    let email = normalize_email(&req.email);
    validate_email_format(&email).map_err(|msg| ApiError::field_error("email", msg))?;
    validate_password(&req.password, state.config.auth.min_password_length)
        .map_err(|msg| ApiError::field_error("password", msg))?;

    let username = non_blank(req.username).unwrap_or_else(|| username_from_email(&email));
    if username.chars().count() > 100 {
        return Err(ApiError::field_error("username", "Username must be at most 100 characters"));
    }

    let password = req.password;
    let password_hash = blocking(move || hash_password(&password)).await??;

    let user = state
        .store
        .create_user(NewUser {
            email,
            password_hash,
            username,
            subscription_tier: state.config.auth.default_subscription_tier.clone(),
        })
        .await?;

    info!(user_id = user.id, "Registered user");

    Ok(ApiResponse::created(AuthResponse {
        user: UserView::from(&user),
        message: "Аккаунт успешно создан",
    }))
}

/// Same 401 for an unknown email and a wrong password
async fn login(state: &AppState, req: LoginRequest) -> ApiResult<AuthResponse> {
    let email = normalize_email(&req.email);
    let password = req.password;

    let Some(user) = state.store.find_active_user_by_email(&email).await? else {
        blocking(move || dummy_verify(&password)).await?;
        warn!("Login rejected: no active account for the given email");
        return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
    };

    let stored = user.password_hash.clone();
    let (verification, password) = blocking(move || {
        let verification = verify_password(&password, &stored);
        (verification, password)
    })
    .await?;

    let rehashed = match verification {
        Verification::Invalid => {
            warn!(user_id = user.id, "Login rejected: password mismatch");
            return Err(ApiError::unauthorized(INVALID_CREDENTIALS));
        }
        Verification::Valid => None,
        Verification::ValidLegacy => {
            info!(user_id = user.id, "Upgrading legacy password hash");
            Some(blocking(move || hash_password(&password)).await??)
        }
    };

    state.store.record_login(user.id, rehashed).await?;
    info!(user_id = user.id, "User logged in");

    Ok(ApiResponse::success(AuthResponse {
        user: UserView::from(&user),
        message: "Успешный вход",
    }))
}

/// Runs password hashing off the async workers
async fn blocking<F, R>(f: F) -> Result<R, ApiError>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!("Password task failed: {}", e);
        ApiError::internal_server_error("An error occurred while processing your request")
    })
}
