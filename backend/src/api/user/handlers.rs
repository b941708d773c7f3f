//! HTTP handlers for user CRUD.

use crate::auth::models::CurrentUser;
use crate::database::models::{CreateUserRequest, PublicUser, UpdateUserRequest};
use crate::errors::ServiceResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};

/// `GET /users`: admin only, lists every user.
pub async fn list_users(
    Extension(state): Extension<AppState>,
) -> ServiceResult<Json<Vec<PublicUser>>> {
    let users = UserService::new(&state).list().await?;
    Ok(Json(users))
}

/// `POST /users`: admin only, creates an account with a generated
/// temporary password delivered by email.
pub async fn create_user(
    Extension(state): Extension<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> ServiceResult<(StatusCode, Json<PublicUser>)> {
    let user = UserService::new(&state).create(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT /users/{id}`: self-service for regular users, any record for
/// admins.
pub async fn update_user(
    Extension(state): Extension<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> ServiceResult<Json<PublicUser>> {
    let user = UserService::new(&state)
        .update(&current.0, &id, payload)
        .await?;
    Ok(Json(user))
}

/// `DELETE /users/{id}`: admin only.
pub async fn delete_user(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ServiceResult<StatusCode> {
    UserService::new(&state).delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
