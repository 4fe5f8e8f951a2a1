//! Entry submission, listing, and export HTTP handlers.
//!
//! ```text
//! GET /api/v1/entries?page&limit&topicId&topicName
//! POST /api/v1/entries
//! DELETE /api/v1/entries
//! GET /api/v1/entries/export?topicId&topicName
//! ```
//!
//! Submission and listing are intentionally public; deletion and export
//! require an authorized admin credential. `topicId` and `topicName` are
//! mutually exclusive filter modes and `topicId` wins when both are
//! supplied.

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, web};
use pagination::{PageRequest, Pagination};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::{EntryListRequest, SubmitEntryRequest};
use crate::domain::{Entry, EntryForm, Error, ListingPlan};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminToken, require_admin};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_uuid, parse_uuid};

/// Entry payload returned by submission and listing.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryBody {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Referenced topic.
    pub topic_id: Uuid,
    /// Topic name at submission time.
    pub topic_name: String,
    /// Canonical (sigil-less) Telegram username.
    pub telegram_username: String,
    /// Verified platform username.
    pub platform_username: String,
    /// Canonical checksummed wallet address.
    pub wallet_address: String,
    /// Optional Discord username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord_username: Option<String>,
    /// Contact email.
    pub email: String,
    /// Submission instant as milliseconds since epoch.
    pub created_at: i64,
}

impl From<Entry> for EntryBody {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            topic_id: entry.topic_id,
            topic_name: entry.topic_name,
            telegram_username: entry.telegram_username.into(),
            platform_username: entry.platform_username.into(),
            wallet_address: entry.wallet_address.into(),
            discord_username: entry.discord_username.map(String::from),
            email: entry.email.into(),
            created_at: entry.created_at.timestamp_millis(),
        }
    }
}

/// Query parameters for `GET /api/v1/entries` and the export variant.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesQuery {
    /// Requested page, defaulting to 1.
    pub page: Option<i64>,
    /// Requested page size, defaulting to 10 and capped at 100.
    pub limit: Option<i64>,
    /// Filter by topic id; wins over `topicName`.
    pub topic_id: Option<String>,
    /// Case-insensitive substring filter on the topic name.
    pub topic_name: Option<String>,
}

/// Response payload for the entry listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesResponse {
    /// Entries in listing order.
    pub entries: Vec<EntryBody>,
    /// Envelope describing the full (filtered) result set.
    #[schema(value_type = Object)]
    pub pagination: Pagination,
}

/// Request body for `POST /api/v1/entries`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEntryBody {
    /// Topic the entry is submitted against.
    pub topic_id: String,
    /// Telegram username, `@` optional under the lenient policy.
    pub telegram_username: String,
    /// Platform username.
    pub platform_username: String,
    /// Wallet address.
    pub wallet_address: String,
    /// Optional Discord username.
    pub discord_username: Option<String>,
    /// Contact email.
    pub email: String,
}

/// Request body for `DELETE /api/v1/entries`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEntryBody {
    /// Entry to delete.
    pub id: String,
}

fn listing_plan(
    topic_id: Option<&str>,
    topic_name: Option<&str>,
) -> Result<ListingPlan, Error> {
    let topic_id = parse_optional_uuid(topic_id, FieldName::new("topicId"))?;
    Ok(ListingPlan::from_filters(topic_id, topic_name))
}

/// List entries, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/entries",
    params(ListEntriesQuery),
    responses(
        (status = 200, description = "Entry page", body = ListEntriesResponse),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["entries"],
    operation_id = "listEntries",
    security([])
)]
#[get("/entries")]
pub async fn list_entries(
    state: web::Data<HttpState>,
    query: web::Query<ListEntriesQuery>,
) -> ApiResult<web::Json<ListEntriesResponse>> {
    let ListEntriesQuery {
        page,
        limit,
        topic_id,
        topic_name,
    } = query.into_inner();
    let plan = listing_plan(topic_id.as_deref(), topic_name.as_deref())?;
    let page = state
        .entries_query
        .list(EntryListRequest {
            plan,
            page: PageRequest::from_raw(page, limit),
        })
        .await?;
    Ok(web::Json(ListEntriesResponse {
        entries: page.entries.into_iter().map(EntryBody::from).collect(),
        pagination: page.pagination,
    }))
}

/// Submit an entry against a topic.
#[utoipa::path(
    post,
    path = "/api/v1/entries",
    request_body = SubmitEntryBody,
    responses(
        (status = 201, description = "Entry stored", body = EntryBody),
        (status = 400, description = "Validation or uniqueness failure", body = Error),
        (status = 404, description = "Topic not found", body = Error),
        (status = 503, description = "Username verification unavailable", body = Error)
    ),
    tags = ["entries"],
    operation_id = "submitEntry",
    security([])
)]
#[post("/entries")]
pub async fn submit_entry(
    state: web::Data<HttpState>,
    payload: web::Json<SubmitEntryBody>,
) -> ApiResult<HttpResponse> {
    let SubmitEntryBody {
        topic_id,
        telegram_username,
        platform_username,
        wallet_address,
        discord_username,
        email,
    } = payload.into_inner();
    let topic_id = parse_uuid(&topic_id, FieldName::new("topicId"))?;
    let entry = state
        .entries
        .submit(SubmitEntryRequest {
            topic_id,
            form: EntryForm {
                telegram_username,
                platform_username,
                wallet_address,
                discord_username,
                email,
            },
        })
        .await?;
    Ok(HttpResponse::Created().json(EntryBody::from(entry)))
}

/// Delete an entry.
#[utoipa::path(
    delete,
    path = "/api/v1/entries",
    request_body = DeleteEntryBody,
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Entry not found", body = Error)
    ),
    tags = ["entries"],
    operation_id = "deleteEntry",
    security(("AdminBearer" = []))
)]
#[delete("/entries")]
pub async fn delete_entry(
    state: web::Data<HttpState>,
    token: AdminToken,
    payload: web::Json<DeleteEntryBody>,
) -> ApiResult<HttpResponse> {
    require_admin(state.authorizer.as_ref(), &token).await?;
    let id = parse_uuid(&payload.id, FieldName::new("id"))?;
    state.entries.delete(id).await?;
    Ok(HttpResponse::Ok().finish())
}

/// Export entries as CSV, honouring the listing filter modes.
#[utoipa::path(
    get,
    path = "/api/v1/entries/export",
    params(ListEntriesQuery),
    responses(
        (status = 200, description = "CSV export", content_type = "text/csv"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["entries"],
    operation_id = "exportEntries",
    security(("AdminBearer" = []))
)]
#[get("/entries/export")]
pub async fn export_entries(
    state: web::Data<HttpState>,
    token: AdminToken,
    query: web::Query<ListEntriesQuery>,
) -> ApiResult<HttpResponse> {
    require_admin(state.authorizer.as_ref(), &token).await?;
    let ListEntriesQuery {
        topic_id,
        topic_name,
        ..
    } = query.into_inner();
    let plan = listing_plan(topic_id.as_deref(), topic_name.as_deref())?;
    let csv = state.entries_query.export(plan).await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"entries.csv\"",
        ))
        .body(csv))
}
