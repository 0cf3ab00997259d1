//! User endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{NewUser, User, UserId, UserPatch};

#[derive(Debug, Clone, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub total: usize,
}

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/{user_id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/by-email/{email}", get(get_user_by_email))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    debug!("Listing users");

    let users = state.user_service.get_users().await.map_err(ApiError::from)?;
    let total = users.len();

    Ok(Json(ListUsersResponse { users, total }))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    debug!(email = %request.email, "Creating user");

    let user = state
        .user_service
        .create_user(request)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %user_id, "Getting user");

    let user = fetch_user(&state, &user_id).await?;

    Ok(Json(user))
}

/// GET /users/by-email/{email}
pub async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>, ApiError> {
    debug!(email = %email, "Getting user by email");

    let user = state
        .user_service
        .get_user_by_email(&email)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(user))
}

/// PATCH /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(patch): Json<UserPatch>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %user_id, "Updating user");

    let current = fetch_user(&state, &user_id).await?;
    let user = state
        .user_service
        .update_user(&current, patch)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(user))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = %user_id, "Deleting user");

    let current = fetch_user(&state, &user_id).await?;
    state
        .user_service
        .delete_user(&current)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

async fn fetch_user(state: &AppState, raw_id: &str) -> Result<User, ApiError> {
    let id = parse_user_id(raw_id)?;

    state
        .user_service
        .get_user_by_id(id)
        .await
        .map_err(ApiError::from)
}

fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse::<i64>()
        .map(UserId::new)
        .map_err(|_| ApiError::bad_request(format!("Invalid user id '{}'", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id("42").unwrap(), UserId::new(42));

        let err = parse_user_id("abc").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error.message, "Invalid user id 'abc'");
    }

    #[test]
    fn test_list_response_serialization() {
        let response = ListUsersResponse {
            users: vec![User {
                id: Some(UserId::new(1)),
                email: "ada@example.com".to_string(),
                name: "Ada".to_string(),
                is_admin: true,
            }],
            total: 1,
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["users"][0]["isAdmin"], true);
    }
}
