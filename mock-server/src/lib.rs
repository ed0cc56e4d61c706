use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Token accepted by `app()`.
pub const DEFAULT_TOKEN: &str = "fixture-token";

const DEFAULT_PAGE: usize = 10;
const MAX_PAGE: usize = 50;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    /// Fields this fixture does not interpret are stored and echoed as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModerationState {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Default)]
struct Catalog {
    drafts: HashMap<String, Item>,
    published: HashMap<String, Item>,
    reviews: HashMap<String, Vec<Review>>,
    moderation: HashMap<String, ModerationState>,
    config: Value,
}

/// One request as it reached the fixture, before the token check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub entity_token: Option<String>,
}

/// Shared fixture state. Clones share the same catalog and request log.
#[derive(Clone)]
pub struct Fixture {
    token: Arc<str>,
    catalog: Arc<RwLock<Catalog>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Fixture {
    pub fn new(token: &str) -> Self {
        let catalog = Catalog {
            config: json!({"isCatalogEnabled": true}),
            ..Catalog::default()
        };
        Self {
            token: Arc::from(token),
            catalog: Arc::new(RwLock::new(catalog)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests().len()
    }

    /// Insert an item straight into the public catalog.
    pub async fn publish(&self, item: Item) {
        let mut catalog = self.catalog.write().await;
        if let Some(id) = item.id.clone() {
            catalog.drafts.insert(id.clone(), item.clone());
            catalog.published.insert(id, item);
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/Catalog/CreateDraftItem", post(create_draft_item))
            .route("/Catalog/UpdateDraftItem", post(update_draft_item))
            .route("/Catalog/GetDraftItem", post(get_draft_item))
            .route("/Catalog/GetDraftItems", post(get_draft_items))
            .route("/Catalog/PublishDraftItem", post(publish_draft_item))
            .route("/Catalog/GetItemPublishStatus", post(get_item_publish_status))
            .route("/Catalog/GetItem", post(get_item))
            .route("/Catalog/DeleteItem", post(delete_item))
            .route("/Catalog/SearchItems", post(search_items))
            .route("/Catalog/ReviewItem", post(review_item))
            .route("/Catalog/GetItemReviews", post(get_item_reviews))
            .route("/Catalog/GetItemReviewSummary", post(get_item_review_summary))
            .route("/Catalog/SetItemModerationState", post(set_item_moderation_state))
            .route("/Catalog/GetItemModerationState", post(get_item_moderation_state))
            .route("/Catalog/GetCatalogConfig", post(get_catalog_config))
            .route("/Catalog/UpdateCatalogConfig", post(update_catalog_config))
            .fallback(unknown_api)
            .layer(middleware::from_fn_with_state(self.clone(), authenticate))
            .with_state(self.clone())
    }
}

pub fn app() -> Router {
    Fixture::new(DEFAULT_TOKEN).router()
}

pub async fn run(listener: TcpListener, fixture: Fixture) -> Result<(), std::io::Error> {
    axum::serve(listener, fixture.router()).await
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// A failure rendered as the service's error envelope.
#[derive(Debug)]
pub struct FixtureError {
    status: StatusCode,
    error: &'static str,
    error_code: i32,
    message: String,
    details: Option<BTreeMap<String, Vec<String>>>,
}

impl FixtureError {
    fn invalid(field: &str, detail: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: "InvalidParams",
            error_code: 1000,
            message: "Invalid input parameters".to_string(),
            details: Some(BTreeMap::from([(
                field.to_string(),
                vec![detail.to_string()],
            )])),
        }
    }

    fn not_found(id: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error: "ItemNotFound",
            error_code: 1047,
            message: format!("Item {id} not found"),
            details: None,
        }
    }

    fn unauthenticated() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: "NotAuthenticated",
            error_code: 1074,
            message: "This API method requires a valid entity token".to_string(),
            details: None,
        }
    }

    fn internal(message: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: "InternalServerError",
            error_code: 1110,
            message,
            details: None,
        }
    }
}

impl IntoResponse for FixtureError {
    fn into_response(self) -> Response {
        let mut body = json!({
            "code": self.status.as_u16(),
            "status": self.status.canonical_reason().unwrap_or("Error").replace(' ', ""),
            "error": self.error,
            "errorCode": self.error_code,
            "errorMessage": self.message,
        });
        if let Some(details) = self.details {
            body["errorDetails"] = json!(details);
        }
        (self.status, Json(body)).into_response()
    }
}

type Reply = Result<Json<Value>, FixtureError>;

fn ok(data: impl Serialize) -> Reply {
    let data = serde_json::to_value(data).map_err(|e| FixtureError::internal(e.to_string()))?;
    Ok(Json(json!({"code": 200, "status": "OK", "data": data})))
}

fn parse<T: DeserializeOwned>(body: &Bytes) -> Result<T, FixtureError> {
    serde_json::from_slice(body).map_err(|e| FixtureError::invalid("body", &e.to_string()))
}

fn required_id(id: Option<String>) -> Result<String, FixtureError> {
    id.filter(|id| !id.is_empty())
        .ok_or_else(|| FixtureError::invalid("id", "The id field is required."))
}

// ---------------------------------------------------------------------------
// Middleware
// ---------------------------------------------------------------------------

async fn authenticate(State(fixture): State<Fixture>, request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get("x-entitytoken")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let path = request.uri().path().to_string();
    tracing::debug!(%path, has_token = token.is_some(), "fixture request");

    let authorized = token.as_deref() == Some(&*fixture.token);
    if let Ok(mut log) = fixture.requests.lock() {
        log.push(RecordedRequest {
            path,
            entity_token: token,
        });
    }

    if authorized {
        next.run(request).await
    } else {
        FixtureError::unauthenticated().into_response()
    }
}

async fn unknown_api(request: Request) -> FixtureError {
    FixtureError {
        status: StatusCode::NOT_FOUND,
        error: "APINotFound",
        error_code: 1071,
        message: format!("No API at {}", request.uri().path()),
        details: None,
    }
}

// ---------------------------------------------------------------------------
// Drafts and publishing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteItem {
    item: Item,
    #[serde(default)]
    publish: bool,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Lookup {
    #[serde(default, alias = "itemId")]
    id: Option<String>,
    #[serde(default)]
    ids: Vec<String>,
    #[serde(default)]
    e_tag: Option<String>,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    count: Option<usize>,
    #[serde(default)]
    continuation_token: Option<String>,
}

async fn create_draft_item(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let WriteItem { mut item, publish } = parse(&body)?;
    let id = item.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
    item.id = Some(id.clone());
    item.e_tag = Some(Uuid::new_v4().to_string());

    let mut catalog = fixture.catalog.write().await;
    catalog.drafts.insert(id.clone(), item.clone());
    if publish {
        catalog.published.insert(id, item.clone());
    }
    ok(json!({"item": item}))
}

async fn update_draft_item(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let WriteItem { mut item, publish } = parse(&body)?;
    let id = required_id(item.id.clone())?;

    let mut catalog = fixture.catalog.write().await;
    if !catalog.drafts.contains_key(&id) {
        return Err(FixtureError::not_found(&id));
    }
    item.e_tag = Some(Uuid::new_v4().to_string());
    catalog.drafts.insert(id.clone(), item.clone());
    if publish {
        catalog.published.insert(id, item.clone());
    }
    ok(json!({"item": item}))
}

async fn get_draft_item(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let id = required_id(parse::<Lookup>(&body)?.id)?;
    let catalog = fixture.catalog.read().await;
    let item = catalog.drafts.get(&id).ok_or_else(|| FixtureError::not_found(&id))?;
    ok(json!({"item": item}))
}

async fn get_draft_items(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let lookup: Lookup = parse(&body)?;
    let catalog = fixture.catalog.read().await;
    let items: Vec<&Item> = lookup
        .ids
        .iter()
        .filter_map(|id| catalog.drafts.get(id))
        .collect();
    ok(json!({"items": items}))
}

async fn publish_draft_item(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let lookup: Lookup = parse(&body)?;
    let id = required_id(lookup.id)?;

    let mut catalog = fixture.catalog.write().await;
    let draft = catalog
        .drafts
        .get(&id)
        .cloned()
        .ok_or_else(|| FixtureError::not_found(&id))?;
    if lookup.e_tag.is_some() && lookup.e_tag != draft.e_tag {
        return Err(FixtureError::invalid("eTag", "The eTag does not match the current draft."));
    }
    catalog.published.insert(id, draft);
    ok(json!({}))
}

async fn get_item_publish_status(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let id = required_id(parse::<Lookup>(&body)?.id)?;
    let catalog = fixture.catalog.read().await;
    let result = if catalog.published.contains_key(&id) {
        "Succeeded"
    } else if catalog.drafts.contains_key(&id) {
        "Unknown"
    } else {
        return Err(FixtureError::not_found(&id));
    };
    ok(json!({"result": result}))
}

// ---------------------------------------------------------------------------
// Public catalog
// ---------------------------------------------------------------------------

async fn get_item(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let id = required_id(parse::<Lookup>(&body)?.id)?;
    let catalog = fixture.catalog.read().await;
    let item = catalog.published.get(&id).ok_or_else(|| FixtureError::not_found(&id))?;
    ok(json!({"item": item}))
}

async fn delete_item(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let id = required_id(parse::<Lookup>(&body)?.id)?;
    let mut catalog = fixture.catalog.write().await;
    let draft = catalog.drafts.remove(&id);
    let published = catalog.published.remove(&id);
    if draft.is_none() && published.is_none() {
        return Err(FixtureError::not_found(&id));
    }
    catalog.reviews.remove(&id);
    catalog.moderation.remove(&id);
    ok(json!({}))
}

fn matches_search(item: &Item, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|v| v.to_lowercase().contains(&needle))
    };
    contains(&item.title)
        || contains(&item.description)
        || item.keywords.iter().any(|k| k.to_lowercase().contains(&needle))
}

async fn search_items(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let lookup: Lookup = parse(&body)?;
    let count = lookup.count.unwrap_or(DEFAULT_PAGE);
    if count == 0 || count > MAX_PAGE {
        return Err(FixtureError::invalid("count", "The count must be between 1 and 50."));
    }
    let offset = match lookup.continuation_token.as_deref() {
        Some(token) => token
            .parse::<usize>()
            .map_err(|_| FixtureError::invalid("continuationToken", "Unrecognized token."))?,
        None => 0,
    };

    let catalog = fixture.catalog.read().await;
    let mut hits: Vec<&Item> = catalog
        .published
        .values()
        .filter(|item| lookup.search.as_deref().map_or(true, |s| matches_search(item, s)))
        .collect();
    hits.sort_by(|a, b| a.id.cmp(&b.id));

    let page: Vec<&Item> = hits.iter().skip(offset).take(count).copied().collect();
    let next = offset + page.len();
    let mut data = json!({"items": page});
    if next < hits.len() {
        data["continuationToken"] = json!(next.to_string());
    }
    ok(data)
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WriteReview {
    #[serde(default)]
    id: Option<String>,
    review: Review,
}

async fn review_item(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let WriteReview { id, mut review } = parse(&body)?;
    let id = required_id(id)?;
    if !(1..=5).contains(&review.rating) {
        return Err(FixtureError::invalid("review.rating", "The rating must be between 1 and 5."));
    }

    let mut catalog = fixture.catalog.write().await;
    if !catalog.published.contains_key(&id) {
        return Err(FixtureError::not_found(&id));
    }
    review.review_id = Some(Uuid::new_v4().to_string());
    review.item_id = Some(id.clone());
    catalog.reviews.entry(id).or_default().push(review);
    ok(json!({}))
}

async fn get_item_reviews(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let lookup: Lookup = parse(&body)?;
    let id = required_id(lookup.id)?;
    let catalog = fixture.catalog.read().await;
    if !catalog.published.contains_key(&id) {
        return Err(FixtureError::not_found(&id));
    }
    let reviews: Vec<&Review> = catalog
        .reviews
        .get(&id)
        .map(|r| r.iter().take(lookup.count.unwrap_or(DEFAULT_PAGE)).collect())
        .unwrap_or_default();
    ok(json!({"reviews": reviews}))
}

async fn get_item_review_summary(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let id = required_id(parse::<Lookup>(&body)?.id)?;
    let catalog = fixture.catalog.read().await;
    if !catalog.published.contains_key(&id) {
        return Err(FixtureError::not_found(&id));
    }
    let reviews = catalog.reviews.get(&id).map(Vec::as_slice).unwrap_or_default();

    let mut stars = [0u32; 5];
    for review in reviews {
        stars[usize::from(review.rating - 1)] += 1;
    }
    let total: u32 = stars.iter().sum();
    let average = if total == 0 {
        0.0
    } else {
        reviews.iter().map(|r| f64::from(r.rating)).sum::<f64>() / f64::from(total)
    };

    let mut data = json!({
        "reviewsCount": total,
        "rating": {
            "average": average,
            "count1Star": stars[0],
            "count2Star": stars[1],
            "count3Star": stars[2],
            "count4Star": stars[3],
            "count5Star": stars[4],
            "totalCount": total,
        },
    });
    if let Some(best) = reviews.iter().max_by_key(|r| r.rating) {
        data["mostFavorableReview"] = json!(best);
    }
    if let Some(worst) = reviews.iter().min_by_key(|r| r.rating) {
        data["leastFavorableReview"] = json!(worst);
    }
    ok(data)
}

// ---------------------------------------------------------------------------
// Moderation and configuration
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetModeration {
    #[serde(default)]
    id: Option<String>,
    status: String,
    #[serde(default)]
    reason: Option<String>,
}

async fn set_item_moderation_state(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let SetModeration { id, status, reason } = parse(&body)?;
    let id = required_id(id)?;
    let mut catalog = fixture.catalog.write().await;
    if !catalog.drafts.contains_key(&id) && !catalog.published.contains_key(&id) {
        return Err(FixtureError::not_found(&id));
    }
    catalog.moderation.insert(id, ModerationState { status, reason });
    ok(json!({}))
}

async fn get_item_moderation_state(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let id = required_id(parse::<Lookup>(&body)?.id)?;
    let catalog = fixture.catalog.read().await;
    if !catalog.drafts.contains_key(&id) && !catalog.published.contains_key(&id) {
        return Err(FixtureError::not_found(&id));
    }
    let state = catalog.moderation.get(&id).cloned().unwrap_or(ModerationState {
        status: "Unknown".to_string(),
        reason: None,
    });
    ok(json!({"state": state}))
}

async fn get_catalog_config(State(fixture): State<Fixture>) -> Reply {
    let catalog = fixture.catalog.read().await;
    ok(json!({"config": catalog.config}))
}

#[derive(Deserialize)]
struct UpdateConfig {
    config: Value,
}

async fn update_catalog_config(State(fixture): State<Fixture>, body: Bytes) -> Reply {
    let UpdateConfig { config } = parse(&body)?;
    if !config.is_object() {
        return Err(FixtureError::invalid("config", "The config must be an object."));
    }
    fixture.catalog.write().await.config = config;
    ok(json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_keeps_unknown_fields() {
        let raw = json!({"id": "A", "title": "X", "contentType": "weapon", "isHidden": false});
        let item: Item = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.extra["contentType"], "weapon");
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn search_matches_title_description_and_keywords() {
        let item = Item {
            id: Some("A".to_string()),
            title: Some("Iron Sword".to_string()),
            description: Some("Sharp".to_string()),
            keywords: vec!["blade".to_string()],
            ..Item::default()
        };
        assert!(matches_search(&item, "sword"));
        assert!(matches_search(&item, "SHARP"));
        assert!(matches_search(&item, "blade"));
        assert!(!matches_search(&item, "shield"));
    }

    #[test]
    fn invalid_error_carries_details() {
        let err = FixtureError::invalid("id", "The id field is required.");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.details.unwrap()["id"], vec!["The id field is required."]);
    }

    #[test]
    fn new_fixture_has_no_requests() {
        let fixture = Fixture::new("T");
        assert_eq!(fixture.request_count(), 0);
    }
}
