use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{DeletedUserResponse, UserPayload};
use super::repo_types::User;
use super::services;
use crate::{error::DirectoryError, state::AppState};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

fn user_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, DirectoryError> {
    match path {
        Ok(Path(id)) => Ok(id),
        Err(e) => {
            warn!(error = %e, "bad user id");
            Err(DirectoryError::Validation("Invalid user id".into()))
        }
    }
}

fn body(payload: Result<Json<UserPayload>, JsonRejection>) -> Result<UserPayload, DirectoryError> {
    match payload {
        Ok(Json(p)) => Ok(p),
        Err(e) => {
            warn!(error = %e, "unreadable user payload");
            Err(DirectoryError::Validation("All fields are required".into()))
        }
    }
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, DirectoryError> {
    let users = services::list_users(state.users.as_ref()).await?;
    Ok(Json(users))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<impl IntoResponse, DirectoryError> {
    let user = services::create_user(state.users.as_ref(), body(payload)?).await?;
    info!(user_id = user.id, email = %user.email, "user created");
    let location = format!("/api/users/{}", user.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(user)))
}

#[instrument(skip(state, id))]
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<User>, DirectoryError> {
    let user = services::get_user(state.users.as_ref(), user_id(id)?).await?;
    Ok(Json(user))
}

#[instrument(skip(state, id, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> Result<Json<User>, DirectoryError> {
    let id = user_id(id)?;
    let user = services::update_user(state.users.as_ref(), id, body(payload)?).await?;
    info!(user_id = user.id, "user updated");
    Ok(Json(user))
}

#[instrument(skip(state, id))]
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeletedUserResponse>, DirectoryError> {
    let user = services::delete_user(state.users.as_ref(), user_id(id)?).await?;
    info!(user_id = user.id, "user deleted");
    Ok(Json(DeletedUserResponse {
        message: "User deleted successfully".into(),
        user,
    }))
}

#[cfg(test)]
mod tests {
    use reqwest::{blocking::Client, StatusCode};
    use serde_json::{json, Value};

    use crate::test_support::spawn_server;

    #[test]
    fn create_list_delete_then_not_found() {
        let base = spawn_server();
        let http = Client::new();

        let res = http
            .post(format!("{base}/api/users"))
            .json(&json!({ "name": "Ann", "email": "ann@x.com", "city": "NYC", "country": "US" }))
            .send()
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: Value = res.json().unwrap();
        let id = created["id"].as_i64().expect("generated id");
        assert!(created["created_at"].is_string());
        assert_eq!(created["email"], "ann@x.com");

        let list: Vec<Value> = http
            .get(format!("{base}/api/users"))
            .send()
            .unwrap()
            .json()
            .unwrap();
        assert_eq!(list[0]["id"].as_i64(), Some(id));

        let res = http.delete(format!("{base}/api/users/{id}")).send().unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let deleted: Value = res.json().unwrap();
        assert_eq!(deleted["message"], "User deleted successfully");
        assert_eq!(deleted["user"]["id"].as_i64(), Some(id));

        let res = http.get(format!("{base}/api/users/{id}")).send().unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = res.json().unwrap();
        assert_eq!(body, json!({ "error": "User not found" }));
    }

    #[test]
    fn validation_and_conflict_statuses() {
        let base = spawn_server();
        let http = Client::new();
        let url = format!("{base}/api/users");

        let res = http
            .post(&url)
            .json(&json!({ "name": "Ann", "email": "ann@x.com" }))
            .send()
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().unwrap();
        assert_eq!(body["error"], "All fields are required");

        let res = http
            .post(&url)
            .json(&json!({ "name": "Ann", "email": "nope", "city": "NYC", "country": "US" }))
            .send()
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().unwrap();
        assert_eq!(body["error"], "Invalid email format");

        let ann = json!({ "name": "Ann", "email": "ann@x.com", "city": "NYC", "country": "US" });
        assert_eq!(
            http.post(&url).json(&ann).send().unwrap().status(),
            StatusCode::CREATED
        );
        let res = http.post(&url).json(&ann).send().unwrap();
        assert_eq!(res.status(), StatusCode::CONFLICT);
        let body: Value = res.json().unwrap();
        assert_eq!(body["error"], "Email already exists");
    }

    #[test]
    fn malformed_body_and_id_are_bad_requests() {
        let base = spawn_server();
        let http = Client::new();

        let res = http
            .post(format!("{base}/api/users"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().unwrap();
        assert!(body["error"].is_string());

        let res = http.get(format!("{base}/api/users/abc")).send().unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().unwrap();
        assert_eq!(body["error"], "Invalid user id");
    }

    #[test]
    fn put_replaces_fields_and_404s_on_missing_row() {
        let base = spawn_server();
        let http = Client::new();

        let created: Value = http
            .post(format!("{base}/api/users"))
            .json(&json!({ "name": "Ann", "email": "ann@x.com", "city": "NYC", "country": "US" }))
            .send()
            .unwrap()
            .json()
            .unwrap();
        let id = created["id"].as_i64().unwrap();

        let res = http
            .put(format!("{base}/api/users/{id}"))
            .json(&json!({ "name": "Ann Lee", "email": "ann@x.com", "city": "Paris", "country": "FR" }))
            .send()
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let updated: Value = res.json().unwrap();
        assert_eq!(updated["city"], "Paris");
        assert_eq!(updated["created_at"], created["created_at"]);

        let res = http
            .put(format!("{base}/api/users/9999"))
            .json(&json!({ "name": "X", "email": "x@x.com", "city": "Y", "country": "Z" }))
            .send()
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
