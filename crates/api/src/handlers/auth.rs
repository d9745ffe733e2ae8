//! Handlers for the `/auth` resource: register, login, refresh, logout,
//! current user, password change, and the password-reset flow.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use gearguard_core::error::CoreError;
use gearguard_core::roles::ROLE_EMPLOYEE;
use gearguard_core::types::DbId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use gearguard_db::models::session::CreateSession;
use gearguard_db::models::user::{CreateUser, UserResponse};
use gearguard_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::auth::reset::{generate_reset_token, hash_reset_token, RESET_TOKEN_EXPIRY_MINS};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Success-shaped message returned by forgot-password regardless of whether
/// the email exists, to prevent account enumeration.
const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account exists with this email, you will receive a password reset link.";

/// Minimum password length for change-password (register uses the same bound
/// via its `validator` rule).
const MIN_PASSWORD_LENGTH: usize = 6;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub department_id: Option<DbId>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: String,
}

/// Request body for `POST /auth/forgot-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    pub token: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Successful authentication response returned by register, login, and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Plain `{ "message": ... }` response for the reset flow.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an `employee` account and log it in. Duplicate username or email
/// is reported as a field-naming conflict before any row is inserted.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_body(&input)?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already exists".into(),
        )));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        username: input.username,
        email: input.email,
        password_hash: hashed,
        name: input.name,
        role: ROLE_EMPLOYEE.to_string(),
        department_id: input.department_id,
    };
    let user = UserRepo::create(&state.pool, &create_dto, &[]).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    // Auto-login after registration.
    let response = create_auth_response(&state, user.id, &user.role).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
/// The failure message never reveals whether the username or the password
/// was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid credentials".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid credentials".into(),
        )));
    }

    let response = create_auth_response(&state, user.id, &user.role).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // Revoke old session (token rotation).
    SessionRepo::revoke(&state.pool, session.id).await?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, user.id, &user.role).await?;
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all sessions for the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/me
///
/// Return the authenticated user with its team memberships.
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    let team_ids = UserRepo::team_ids(&state.pool, user.id).await?;

    Ok(Json(UserResponse::from_user(&user, team_ids)))
}

/// POST /api/v1/auth/change-password
///
/// Change the authenticated user's password. The current password is
/// required and must verify against the stored hash.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    let current = input.current_password.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Validation("Current password is required".into()))
    })?;

    let current_valid = verify_password(current, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Validation(
            "Current password is incorrect".into(),
        )));
    }

    validate_password_strength(&input.new_password, MIN_PASSWORD_LENGTH)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &hashed).await?;

    tracing::info!(user_id = user.id, "Password changed");

    Ok(Json(MessageResponse {
        message: "Password has been changed successfully".into(),
    }))
}

/// POST /api/v1/auth/forgot-password
///
/// Start the password-reset flow. Always returns the same success-shaped
/// response, whether or not the email matches an account.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_body(&input)?;

    let response = MessageResponse {
        message: FORGOT_PASSWORD_MESSAGE.into(),
    };

    let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? else {
        return Ok(Json(response));
    };

    let (token, token_hash) = generate_reset_token();
    let expires_at = Utc::now() + chrono::Duration::minutes(RESET_TOKEN_EXPIRY_MINS);
    UserRepo::set_reset_token(&state.pool, user.id, Some(&token_hash), Some(expires_at)).await?;

    let reset_url = format!("{}/reset-password/{token}", state.config.app_url);
    match &state.mailer {
        Some(mailer) => {
            // Delivery failure must not leak whether the account exists.
            if let Err(e) = mailer.send_password_reset(&user.email, &reset_url).await {
                tracing::error!(user_id = user.id, error = %e, "Failed to send reset email");
            }
        }
        None => {
            tracing::warn!(user_id = user.id, "SMTP not configured; reset email skipped");
        }
    }

    Ok(Json(response))
}

/// POST /api/v1/auth/reset-password
///
/// Consume a reset token: set the new password hash and clear the token.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_body(&input)?;

    let token_hash = hash_reset_token(&input.token);
    let user = UserRepo::find_by_reset_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(
                "Invalid or expired reset token".into(),
            ))
        })?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    // Clears the reset token along with setting the new hash (single-use).
    UserRepo::update_password(&state.pool, user.id, &hashed).await?;

    tracing::info!(user_id = user.id, "Password reset via token");

    Ok(Json(MessageResponse {
        message: "Password has been reset successfully".into(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `validator` rules and surface the first failure message.
fn validate_body<T: Validate>(body: &T) -> AppResult<()> {
    body.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .filter_map(|err| err.message.as_ref().map(ToString::to_string))
            .next()
            .unwrap_or_else(|| "Invalid request body".to_string());
        AppError::Core(CoreError::Validation(message))
    })
}

/// Generate access + refresh tokens, persist a session row, and build the
/// response including the user's team memberships.
async fn create_auth_response(
    state: &AppState,
    user_id: DbId,
    role: &str,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user_id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateSession {
        user_id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    SessionRepo::create(&state.pool, &session_input).await?;

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;
    let team_ids = UserRepo::team_ids(&state.pool, user_id).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        user: UserResponse::from_user(&user, team_ids),
    })
}
