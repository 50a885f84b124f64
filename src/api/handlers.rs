use crate::{
    api::models::*,
    auth::jwt::Claims,
    core::{
        errors::FimdefestaError,
        models::{
            audit::{AppLog, GroupAudit},
            group::Group,
            item::Item,
            participant::Participant,
            user::User,
        },
        services::{FimdefestaService, GroupSummaryResponse},
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
    visualization::Visualization,
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
};
use http::header;

use std::sync::Arc;

// Middleware to validate the bearer token
async fn auth_middleware(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| FimdefestaError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| FimdefestaError::Unauthorized("Invalid Authorization header".to_string()))?;

    let claims = service.validate_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>) -> Router {
    let protected_routes = Router::new()
        .route("/users/{user_id}", axum::routing::get(get_user))
        .route("/groups", axum::routing::post(create_group).get(list_groups))
        .route(
            "/groups/{group_id}",
            axum::routing::get(get_group).delete(delete_group),
        )
        .route("/groups/{group_id}/update", axum::routing::post(update_group))
        .route("/groups/{group_id}/participants", axum::routing::post(add_participant))
        .route(
            "/groups/{group_id}/participants/remove",
            axum::routing::post(remove_participant),
        )
        .route("/groups/{group_id}/items", axum::routing::post(add_item))
        .route("/groups/{group_id}/items/update", axum::routing::post(update_item))
        .route("/groups/{group_id}/items/remove", axum::routing::post(remove_item))
        .route("/groups/{group_id}/summary", axum::routing::get(get_group_summary))
        .route(
            "/groups/{group_id}/summary/chart",
            axum::routing::get(get_summary_chart),
        )
        .route("/logs", axum::routing::get(get_app_logs))
        .route("/groups/{group_id}/audits", axum::routing::get(get_group_audits))
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/register", axum::routing::post(register))
        .route("/login", axum::routing::post(login))
        .merge(protected_routes)
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Invalid registration data", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub(crate) async fn register(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let (user, token) = service.register_user(req.name, req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub(crate) async fn login(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (user, token) = service.login(&req.email, &req.password).await?;
    Ok(Json(AuthResponse { token, user }))
}

#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(("user_id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_user(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = service
        .get_user(&user_id)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(user_id))?;
    Ok(Json(user))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created", body = Group),
        (status = 400, description = "Invalid group data", body = ErrorResponse)
    )
)]
pub(crate) async fn create_group(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let created_by = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    let group = service
        .create_group(req.name, req.date, req.location, req.participant_names, &created_by)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/api/groups",
    responses(
        (status = 200, description = "Groups created by the caller", body = [Group])
    )
)]
pub(crate) async fn list_groups(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<Group>>, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    let groups = service.get_user_groups(&user).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group found", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Group>, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    let group = service.get_group(&group_id, &user).await?;
    Ok(Json(group))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/update",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = UpdateGroupRequest,
    responses(
        (status = 200, description = "Group updated", body = Group),
        (status = 403, description = "Not the group creator", body = ErrorResponse)
    )
)]
pub(crate) async fn update_group(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    let group = service
        .update_group(&group_id, req.name, req.date, req.location, &user)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group deleted"),
        (status = 403, description = "Not the group creator", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_group(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<StatusCode, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    service.delete_group(&group_id, &user).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/participants",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = AddParticipantRequest,
    responses(
        (status = 200, description = "Participant added", body = Participant),
        (status = 409, description = "Participant name already taken", body = ErrorResponse)
    )
)]
pub(crate) async fn add_participant(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddParticipantRequest>,
) -> Result<Json<Participant>, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    let participant = service.add_participant(&group_id, req.name, &user).await?;
    Ok(Json(participant))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/participants/remove",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = RemoveParticipantRequest,
    responses(
        (status = 200, description = "Participant removed"),
        (status = 404, description = "Participant not found", body = ErrorResponse)
    )
)]
pub(crate) async fn remove_participant(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<RemoveParticipantRequest>,
) -> Result<StatusCode, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    service.remove_participant(&group_id, &req.participant_id, &user).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/items",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Item added", body = Item),
        (status = 400, description = "Invalid item data", body = ErrorResponse)
    )
)]
pub(crate) async fn add_item(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    let item = service
        .add_item(
            &group_id,
            req.name,
            req.price,
            req.quantity.unwrap_or(1),
            req.split_equally,
            req.participants,
            &user,
        )
        .await?;
    Ok(Json(item))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/items/update",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
pub(crate) async fn update_item(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<Json<Item>, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    let item = Item {
        id: req.item_id,
        name: req.name,
        price: req.price,
        quantity: req.quantity.unwrap_or(1),
        split_equally: req.split_equally,
        participants: req.participants,
    };
    let item = service.update_item(&group_id, item, &user).await?;
    Ok(Json(item))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/items/remove",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = RemoveItemRequest,
    responses(
        (status = 200, description = "Item removed"),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
pub(crate) async fn remove_item(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<RemoveItemRequest>,
) -> Result<StatusCode, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    service.remove_item(&group_id, &req.item_id, &user).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/summary",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Bill summary", body = GroupSummaryResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group_summary(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<GroupSummaryResponse>, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    let summary = service.get_group_summary(&group_id, &user).await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/summary/chart",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Chart.js configuration for the bill summary"),
        (status = 404, description = "No totals to chart", body = ErrorResponse)
    )
)]
pub(crate) async fn get_summary_chart(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    let group = service.get_group(&group_id, &user).await?;
    let summary = service.get_group_summary(&group_id, &user).await?;
    let chart = Visualization::generate_summary_chart(&group, &summary)?;
    Ok(Json(chart))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application logs", body = [AppLog])
    )
)]
pub(crate) async fn get_app_logs(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/audits",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group audit trail", body = [GroupAudit]),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub(crate) async fn get_group_audits(
    State(service): State<Arc<FimdefestaService<InMemoryLogging, InMemoryStorage>>>,
    Path(group_id): Path<String>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<GroupAudit>>, ApiError> {
    let user = service
        .get_user(&claims.sub)
        .await?
        .ok_or_else(|| FimdefestaError::UserNotFound(claims.sub.clone()))?;
    let audits = service.get_group_audits(&group_id, &user).await?;
    Ok(Json(audits))
}
