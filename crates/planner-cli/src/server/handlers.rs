use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{header::SET_COOKIE, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use planner_core::date::Date;
use planner_core::models::{NewTaskData, Task};
use planner_core::service;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::auth::token_cookie;
use super::error::ApiError;
use super::SharedState;

#[derive(Debug, Deserialize)]
pub struct NextDateParams {
    pub now: Option<String>,
    pub date: Option<String>,
    pub repeat: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub task: NewTaskData,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

fn parse_id(id: Option<&str>) -> Result<Uuid, ApiError> {
    let id = id.map(str::trim).filter(|id| !id.is_empty());
    let id = id.ok_or_else(|| ApiError::BadRequest("task id is required".to_string()))?;
    Uuid::parse_str(id).map_err(|_| ApiError::BadRequest(format!("invalid task id '{}'", id)))
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(format!("Invalid JSON format: {}", rejection.body_text())))
}

/// `GET /api/nextdate`: plain-text answer, public.
pub async fn next_date(
    State(state): State<SharedState>,
    Query(params): Query<NextDateParams>,
) -> Result<String, (StatusCode, String)> {
    let bad_request = |message: String| (StatusCode::BAD_REQUEST, message);

    let now = match params.now.as_deref().filter(|now| !now.is_empty()) {
        Some(now) => now
            .parse::<Date>()
            .map_err(|_| bad_request("Invalid 'now' date format, expected YYYYMMDD".to_string()))?,
        None => state.clock.today(),
    };
    let date = params.date.unwrap_or_default();
    let repeat = params.repeat.unwrap_or_default();

    service::next_date(&date, &repeat, now)
        .map(|next| next.to_string())
        .map_err(|err| bad_request(err.to_string()))
}

/// `POST /api/task`
pub async fn add_task(
    State(state): State<SharedState>,
    payload: Result<Json<NewTaskData>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let draft = json_body(payload)?;
    let task = state.service.add_task(draft, state.clock.today()).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": task.id }))))
}

/// `GET /api/task?id=`
pub async fn get_task(
    State(state): State<SharedState>,
    Query(params): Query<IdParams>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    Ok(Json(state.service.get_task(id).await?))
}

/// `PUT /api/task`
pub async fn update_task(
    State(state): State<SharedState>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = json_body(payload)?;
    let id = parse_id(Some(&request.id))?;
    state
        .service
        .update_task(id, request.task, state.clock.today())
        .await?;
    Ok(Json(json!({})))
}

/// `DELETE /api/task?id=`
pub async fn delete_task(
    State(state): State<SharedState>,
    Query(params): Query<IdParams>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    state.service.delete_task(id).await?;
    Ok(Json(json!({})))
}

/// `POST /api/task/done?id=`
pub async fn done_task(
    State(state): State<SharedState>,
    Query(params): Query<IdParams>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(params.id.as_deref())?;
    state.service.complete_task(id, state.clock.today()).await?;
    Ok(Json(json!({})))
}

/// `GET /api/tasks[?search=]`
pub async fn list_tasks(
    State(state): State<SharedState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<TasksResponse>, ApiError> {
    let tasks = state
        .service
        .list_tasks(params.search.as_deref(), state.list_limit)
        .await?;
    Ok(Json(TasksResponse { tasks }))
}

/// `POST /api/signin`: public.
pub async fn sign_in(
    State(state): State<SharedState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let auth = state
        .auth
        .as_ref()
        .ok_or_else(|| ApiError::BadRequest("Password not set".to_string()))?;
    let request = json_body(payload)?;

    if !auth.check_password(&request.password) {
        return Err(ApiError::Unauthorized("Invalid password".to_string()));
    }
    let token = auth
        .issue_token()
        .map_err(|err| ApiError::Internal(format!("cannot issue token: {}", err)))?;

    tracing::info!("signed in");
    let cookie = token_cookie(&token, state.token_ttl_hours);
    Ok(([(SET_COOKIE, cookie)], Json(json!({ "token": token }))).into_response())
}
