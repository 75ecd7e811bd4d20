use crate::error::{AppError, Result};
use crate::models::user::{UserRequest, UserResponse, UserUpdate};
use crate::repositories::RepositoryError;
use crate::validation::{validate_id, validate_user_request};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
};
use tracing::{debug, warn};

type BodyPayload = std::result::Result<Json<UserRequest>, JsonRejection>;
type IdPath = std::result::Result<Path<String>, PathRejection>;

fn parse_body(payload: BodyPayload) -> Result<UserRequest> {
    let Json(request) = payload.map_err(|e| {
        warn!("invalid request body: {}", e);
        AppError::InvalidBody
    })?;

    validate_user_request(&request).map_err(|e| {
        warn!("invalid request body: {}", e);
        AppError::InvalidBody
    })?;

    Ok(request)
}

fn parse_id(path: IdPath) -> Result<String> {
    let Path(id) = path.map_err(|e| {
        warn!("invalid uri: {}", e);
        AppError::InvalidPath
    })?;

    validate_id(&id).map_err(|e| {
        warn!("invalid uri: {}", e);
        AppError::InvalidPath
    })?;

    Ok(id)
}

fn not_found(id: String) -> AppError {
    warn!("user not found: {}", id);
    AppError::UserNotFound(id)
}

/// POST /users/
pub async fn create_user_handler(
    State(app_state): State<AppState>,
    payload: BodyPayload,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let request = parse_body(payload)?;

    let user = app_state
        .user_repository
        .create(request.into_new_user(None))
        .await
        .map_err(|e| AppError::store("error creating user", e))?;

    debug!(user_id = %user.id, "user created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/{id}
pub async fn get_user_handler(
    State(app_state): State<AppState>,
    path: IdPath,
) -> Result<Json<UserResponse>> {
    let id = parse_id(path)?;

    match app_state.user_repository.get_by_id(&id).await {
        Ok(user) => Ok(Json(user.into())),
        Err(RepositoryError::NotFound) => Err(not_found(id)),
        Err(e) => Err(AppError::store("error retrieving user", e)),
    }
}

/// GET /users/
pub async fn list_users_handler(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>> {
    let users = app_state
        .user_repository
        .get_all()
        .await
        .map_err(|e| AppError::store("error retrieving users", e))?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PUT /users/{id}
///
/// Updates the user when it exists (200), otherwise creates it under the
/// requested id (201).
pub async fn update_user_handler(
    State(app_state): State<AppState>,
    path: IdPath,
    payload: BodyPayload,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let id = parse_id(path)?;
    let request = parse_body(payload)?;

    let repository = &app_state.user_repository;
    match repository
        .update_by_id(&id, UserUpdate::from(request.clone()))
        .await
    {
        Ok(user) => Ok((StatusCode::OK, Json(user.into()))),
        Err(RepositoryError::NotFound) => {
            let user = repository
                .create(request.into_new_user(Some(id)))
                .await
                .map_err(|e| AppError::store("error creating user", e))?;

            debug!(user_id = %user.id, "user created through update");
            Ok((StatusCode::CREATED, Json(user.into())))
        }
        Err(e) => Err(AppError::store("error updating user", e)),
    }
}

/// DELETE /users/{id}
pub async fn delete_user_handler(
    State(app_state): State<AppState>,
    path: IdPath,
) -> Result<StatusCode> {
    let id = parse_id(path)?;

    match app_state.user_repository.delete_by_id(&id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(RepositoryError::NotFound) => Err(not_found(id)),
        Err(e) => Err(AppError::store("error deleting user", e)),
    }
}
