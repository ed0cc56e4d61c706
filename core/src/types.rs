//! Request and response DTOs for the catalog API.
//!
//! # Design
//! These mirror the service schema with camelCase field names. Everything
//! the service may omit is an `Option` (or a defaulted collection) and is
//! skipped when serializing, so a request only carries the fields the caller
//! set. The fixture server defines its own copies of the subset it serves;
//! integration tests catch drift between the two.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared models
// ---------------------------------------------------------------------------

/// Identifies an entity (title player, title, master player, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EntityKey {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

/// A secondary, title-defined identifier for an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogAlternateId {
    pub r#type: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ModerationStatus {
    AwaitingModeration,
    Approved,
    Rejected,
    /// Also used for statuses this client does not know yet.
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModerationState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: ModerationStatus,
}

/// Aggregate star rating of an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(default)]
    pub average: f32,
    #[serde(default)]
    pub count1_star: u32,
    #[serde(default)]
    pub count2_star: u32,
    #[serde(default)]
    pub count3_star: u32,
    #[serde(default)]
    pub count4_star: u32,
    #[serde(default)]
    pub count5_star: u32,
    #[serde(default)]
    pub total_count: u32,
}

/// A catalog entry, either a draft or a published item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_ids: Vec<CatalogAlternateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_entity: Option<EntityKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation: Option<ModerationState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// Free-form, title-defined properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_properties: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_entity: Option<EntityKey>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,
    #[serde(default)]
    pub helpful_positive: u32,
    #[serde(default)]
    pub helpful_negative: u32,
    #[serde(default)]
    pub is_instrumented: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewTakedown {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    pub review_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_entities: Vec<EntityKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviewer_entities: Vec<EntityKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_types: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub is_catalog_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadInfo {
    pub file_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlMetadata {
    pub file_name: String,
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PublishResult {
    Pending,
    Succeeded,
    Failed,
    Canceled,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum HelpfulnessVote {
    UnHelpful,
    Helpful,
    #[default]
    #[serde(other)]
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ConcernCategory {
    OffensiveContent,
    ChildExploitation,
    MaliciousIntent,
    PrivacyConcerns,
    MisleadingApp,
    PoorPerformance,
    ReviewResponse,
    SpamAdvertising,
    Profanity,
    #[default]
    #[serde(other)]
    None,
}

// ---------------------------------------------------------------------------
// Item lookups: every per-item request addresses the item by id or by
// alternate id.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

impl GetItemRequest {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetItemResponse {
    #[serde(default)]
    pub item: Option<CatalogItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

/// Empty `data` payload returned by write-only operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EmptyResponse {}

pub type DeleteItemResponse = EmptyResponse;

// ---------------------------------------------------------------------------
// Drafts and publishing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftItemRequest {
    pub item: CatalogItem,
    #[serde(default)]
    pub publish: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftItemResponse {
    #[serde(default)]
    pub item: Option<CatalogItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDraftItemRequest {
    pub item: CatalogItem,
    #[serde(default)]
    pub publish: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDraftItemResponse {
    #[serde(default)]
    pub item: Option<CatalogItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetDraftItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

impl GetDraftItemRequest {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetDraftItemResponse {
    #[serde(default)]
    pub item: Option<CatalogItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetDraftItemsRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_ids: Vec<CatalogAlternateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetDraftItemsResponse {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetEntityDraftItemsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetEntityDraftItemsResponse {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublishDraftItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    /// Only publish if the draft still carries this ETag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

pub type PublishDraftItemResponse = EmptyResponse;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetItemPublishStatusRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetItemPublishStatusResponse {
    #[serde(default)]
    pub result: PublishResult,
    #[serde(default)]
    pub status_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateUploadUrlsRequest {
    pub files: Vec<UploadInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateUploadUrlsResponse {
    #[serde(default)]
    pub upload_urls: Vec<UploadUrlMetadata>,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemsRequest {
    /// Free-text query matched against titles, descriptions and keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// OData-style filter expression, e.g. `tags/any(t: t eq 'sword')`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemsResponse {
    #[serde(default)]
    pub items: Vec<CatalogItem>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    pub review: Review,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

pub type ReviewItemResponse = EmptyResponse;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetItemReviewsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetItemReviewsResponse {
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub continuation_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetItemReviewSummaryRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetItemReviewSummaryResponse {
    #[serde(default)]
    pub least_favorable_review: Option<Review>,
    #[serde(default)]
    pub most_favorable_review: Option<Review>,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub reviews_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetEntityItemReviewRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetEntityItemReviewResponse {
    #[serde(default)]
    pub review: Option<Review>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEntityItemReviewsRequest {
    pub entity: EntityKey,
}

pub type DeleteEntityItemReviewsResponse = EmptyResponse;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubmitItemReviewVoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    pub review_id: String,
    #[serde(default)]
    pub vote: HelpfulnessVote,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

pub type SubmitItemReviewVoteResponse = EmptyResponse;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TakedownItemReviewsRequest {
    pub reviews: Vec<ReviewTakedown>,
}

pub type TakedownItemReviewsResponse = EmptyResponse;

// ---------------------------------------------------------------------------
// Reporting and moderation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    #[serde(default)]
    pub concern_category: ConcernCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

pub type ReportItemResponse = EmptyResponse;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReportItemReviewRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    pub review_id: String,
    #[serde(default)]
    pub concern_category: ConcernCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityKey>,
}

pub type ReportItemReviewResponse = EmptyResponse;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetItemModerationStateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetItemModerationStateResponse {
    #[serde(default)]
    pub state: Option<ModerationState>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SetItemModerationStateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<CatalogAlternateId>,
    pub status: ModerationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub type SetItemModerationStateResponse = EmptyResponse;

// ---------------------------------------------------------------------------
// Catalog configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GetCatalogConfigRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GetCatalogConfigResponse {
    #[serde(default)]
    pub config: Option<CatalogConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCatalogConfigRequest {
    pub config: CatalogConfig,
}

pub type UpdateCatalogConfigResponse = EmptyResponse;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_optional_fields_are_omitted() {
        let body = serde_json::to_value(GetItemRequest::by_id("A")).unwrap();
        assert_eq!(body, json!({"id": "A"}));
    }

    #[test]
    fn catalog_item_uses_camel_case() {
        let item = CatalogItem {
            id: Some("A".to_string()),
            content_type: Some("weapon".to_string()),
            is_hidden: Some(false),
            ..CatalogItem::default()
        };
        let body = serde_json::to_value(&item).unwrap();
        assert_eq!(body, json!({"id": "A", "contentType": "weapon", "isHidden": false}));
    }

    #[test]
    fn item_response_tolerates_missing_fields() {
        let parsed: GetItemResponse =
            serde_json::from_value(json!({"item": {"id": "A", "title": "X"}})).unwrap();
        let item = parsed.item.unwrap();
        assert_eq!(item.id.as_deref(), Some("A"));
        assert_eq!(item.title.as_deref(), Some("X"));
        assert!(item.tags.is_empty());
    }

    #[test]
    fn empty_response_accepts_empty_object() {
        let parsed: EmptyResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed, EmptyResponse {});
    }

    #[test]
    fn moderation_status_uses_variant_names() {
        let request = SetItemModerationStateRequest {
            id: Some("A".to_string()),
            status: ModerationStatus::AwaitingModeration,
            ..SetItemModerationStateRequest::default()
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"id": "A", "status": "AwaitingModeration"}));
    }

    #[test]
    fn unrecognised_enum_values_fall_back_to_default() {
        let status: GetItemPublishStatusResponse =
            serde_json::from_value(json!({"result": "Scheduled", "statusMessage": "later"})).unwrap();
        assert_eq!(status.result, PublishResult::Unknown);

        let state: ModerationState =
            serde_json::from_value(json!({"status": "Quarantined", "reason": "r"})).unwrap();
        assert_eq!(state.status, ModerationStatus::Unknown);
        assert_eq!(state.reason.as_deref(), Some("r"));

        let vote: HelpfulnessVote = serde_json::from_value(json!("Sarcastic")).unwrap();
        assert_eq!(vote, HelpfulnessVote::None);
        let category: ConcernCategory = serde_json::from_value(json!("Copyright")).unwrap();
        assert_eq!(category, ConcernCategory::None);
    }

    #[test]
    fn rating_counts_use_star_suffix() {
        let rating: Rating = serde_json::from_value(json!({
            "average": 4.5, "count5Star": 3, "count4Star": 1, "totalCount": 4
        }))
        .unwrap();
        assert_eq!(rating.count5_star, 3);
        assert_eq!(rating.total_count, 4);
    }
}
