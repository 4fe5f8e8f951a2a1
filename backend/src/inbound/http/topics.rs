//! Topic administration HTTP handlers.
//!
//! ```text
//! GET /api/v1/topics?page&limit&type=active|all
//! POST /api/v1/topics
//! PATCH /api/v1/topics
//! DELETE /api/v1/topics
//! ```
//!
//! Listing is public so the submission form can discover active topics;
//! every mutation requires an authorized admin credential.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use pagination::{PageRequest, Pagination};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{NewTopic, TopicFilter};
use crate::domain::{Error, Topic};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminToken, require_admin};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Topic payload returned by every topic endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicBody {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Description shown on the submission form.
    pub description: String,
    /// Whether the topic currently accepts submissions.
    pub is_active: bool,
    /// Creation instant as milliseconds since epoch.
    pub created_at: i64,
}

impl From<Topic> for TopicBody {
    fn from(topic: Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name.into(),
            description: topic.description.into(),
            is_active: topic.is_active,
            created_at: topic.created_at.timestamp_millis(),
        }
    }
}

/// Query parameters for `GET /api/v1/topics`.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListTopicsQuery {
    /// Requested page, defaulting to 1.
    pub page: Option<i64>,
    /// Requested page size, defaulting to 10 and capped at 100.
    pub limit: Option<i64>,
    /// `active` restricts the listing to topics accepting submissions;
    /// `all` (the default) lists everything.
    #[serde(rename = "type")]
    pub scope: Option<String>,
}

/// Response payload for the topic listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTopicsResponse {
    /// Topics in listing order.
    pub topics: Vec<TopicBody>,
    /// Envelope describing the full result set.
    #[schema(value_type = Object)]
    pub pagination: Pagination,
}

/// Request body for `POST /api/v1/topics`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicBody {
    /// Requested display name.
    pub name: String,
    /// Requested description.
    pub description: String,
}

/// Request body for `PATCH /api/v1/topics`.
///
/// The activity flag is the only mutable topic field.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTopicBody {
    /// Topic to update.
    pub id: String,
    /// New activity flag.
    pub is_active: bool,
}

/// Request body for `DELETE /api/v1/topics`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTopicBody {
    /// Topic to delete together with its entries.
    pub id: String,
}

/// Response payload for the cascade deletion.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTopicResponse {
    /// Whether the topic document existed and was removed.
    pub topic_deleted: bool,
    /// Number of entries removed alongside it.
    pub entries_deleted: u64,
}

fn parse_topic_filter(scope: Option<&str>) -> Result<TopicFilter, Error> {
    match scope {
        None => Ok(TopicFilter::All),
        Some("all") => Ok(TopicFilter::All),
        Some("active") => Ok(TopicFilter::Active),
        Some(other) => Err(
            Error::invalid_request("type must be active or all").with_details(json!({
                "field": "type",
                "value": other,
                "code": "invalid_topic_filter",
            })),
        ),
    }
}

/// List topics, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/topics",
    params(ListTopicsQuery),
    responses(
        (status = 200, description = "Topic page", body = ListTopicsResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["topics"],
    operation_id = "listTopics",
    security([])
)]
#[get("/topics")]
pub async fn list_topics(
    state: web::Data<HttpState>,
    query: web::Query<ListTopicsQuery>,
) -> ApiResult<web::Json<ListTopicsResponse>> {
    let ListTopicsQuery { page, limit, scope } = query.into_inner();
    let filter = parse_topic_filter(scope.as_deref())?;
    let page = state
        .topics_query
        .list(filter, PageRequest::from_raw(page, limit))
        .await?;
    Ok(web::Json(ListTopicsResponse {
        topics: page.topics.into_iter().map(TopicBody::from).collect(),
        pagination: page.pagination,
    }))
}

/// Create a topic. New topics always start active.
#[utoipa::path(
    post,
    path = "/api/v1/topics",
    request_body = CreateTopicBody,
    responses(
        (status = 201, description = "Topic created", body = TopicBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["topics"],
    operation_id = "createTopic",
    security(("AdminBearer" = []))
)]
#[post("/topics")]
pub async fn create_topic(
    state: web::Data<HttpState>,
    token: AdminToken,
    payload: web::Json<CreateTopicBody>,
) -> ApiResult<HttpResponse> {
    require_admin(state.authorizer.as_ref(), &token).await?;
    let CreateTopicBody { name, description } = payload.into_inner();
    let topic = state.topics.create(NewTopic { name, description }).await?;
    Ok(HttpResponse::Created().json(TopicBody::from(topic)))
}

/// Toggle a topic's activity flag.
#[utoipa::path(
    patch,
    path = "/api/v1/topics",
    request_body = UpdateTopicBody,
    responses(
        (status = 200, description = "Topic updated", body = TopicBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Topic not found", body = Error)
    ),
    tags = ["topics"],
    operation_id = "updateTopic",
    security(("AdminBearer" = []))
)]
#[patch("/topics")]
pub async fn update_topic(
    state: web::Data<HttpState>,
    token: AdminToken,
    payload: web::Json<UpdateTopicBody>,
) -> ApiResult<web::Json<TopicBody>> {
    require_admin(state.authorizer.as_ref(), &token).await?;
    let UpdateTopicBody { id, is_active } = payload.into_inner();
    let id = parse_uuid(&id, FieldName::new("id"))?;
    let topic = state.topics.set_active(id, is_active).await?;
    Ok(web::Json(TopicBody::from(topic)))
}

/// Delete a topic together with every entry referencing it.
///
/// Idempotent: deleting an absent topic reports success with
/// `topicDeleted: false`.
#[utoipa::path(
    delete,
    path = "/api/v1/topics",
    request_body = DeleteTopicBody,
    responses(
        (status = 200, description = "Cascade completed", body = DeleteTopicResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["topics"],
    operation_id = "deleteTopic",
    security(("AdminBearer" = []))
)]
#[delete("/topics")]
pub async fn delete_topic(
    state: web::Data<HttpState>,
    token: AdminToken,
    payload: web::Json<DeleteTopicBody>,
) -> ApiResult<web::Json<DeleteTopicResponse>> {
    require_admin(state.authorizer.as_ref(), &token).await?;
    let id = parse_uuid(&payload.id, FieldName::new("id"))?;
    let outcome = state.topics.delete(id).await?;
    Ok(web::Json(DeleteTopicResponse {
        topic_deleted: outcome.topic_deleted,
        entries_deleted: outcome.entries_deleted,
    }))
}
