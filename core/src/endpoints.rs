//! The catalog endpoint table.
//!
//! Each row binds a service path to its request and response types and
//! generates the `Endpoint` impl plus a blocking and a deferred method on
//! [`EconomyClient`]. Adding an endpoint means adding a row.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::EconomyClient;
use crate::dispatch::PendingCall;
use crate::error::ApiError;
use crate::types::*;

/// A request type bound to one service path.
pub trait Endpoint: Serialize {
    const PATH: &'static str;
    type Response: DeserializeOwned;
}

macro_rules! catalog_endpoints {
    ($(
        $(#[doc = $doc:literal])*
        $path:literal => $blocking:ident, $deferred:ident ($request:ty) -> $response:ty;
    )+) => {
        $(
            impl Endpoint for $request {
                const PATH: &'static str = $path;
                type Response = $response;
            }
        )+

        /// Every path in the table, in table order.
        pub const CATALOG_PATHS: &[&str] = &[$($path),+];

        impl EconomyClient {
            $(
                $(#[doc = $doc])*
                pub fn $blocking(&self, request: &$request) -> Result<$response, ApiError> {
                    self.send(request)
                }

                $(#[doc = $doc])*
                ///
                /// Deferred form: returns a call that runs when awaited.
                pub fn $deferred(&self, request: $request) -> PendingCall<$request, $response> {
                    self.send_async(request)
                }
            )+
        }
    };
}

catalog_endpoints! {
    /// Create a new item in the working catalog from the given metadata.
    "/Catalog/CreateDraftItem" => create_draft_item, create_draft_item_async
        (CreateDraftItemRequest) -> CreateDraftItemResponse;
    /// Create upload URLs for raw file content attached to items.
    "/Catalog/CreateUploadUrls" => create_upload_urls, create_upload_urls_async
        (CreateUploadUrlsRequest) -> CreateUploadUrlsResponse;
    /// Delete all reviews written by an entity.
    "/Catalog/DeleteEntityItemReviews" => delete_entity_item_reviews, delete_entity_item_reviews_async
        (DeleteEntityItemReviewsRequest) -> DeleteEntityItemReviewsResponse;
    /// Remove an item from both the working and the public catalog.
    "/Catalog/DeleteItem" => delete_item, delete_item_async
        (DeleteItemRequest) -> DeleteItemResponse;
    /// Fetch the title's catalog configuration.
    "/Catalog/GetCatalogConfig" => get_catalog_config, get_catalog_config_async
        (GetCatalogConfigRequest) -> GetCatalogConfigResponse;
    /// Fetch an item from the working catalog.
    "/Catalog/GetDraftItem" => get_draft_item, get_draft_item_async
        (GetDraftItemRequest) -> GetDraftItemResponse;
    /// Fetch a page of items from the working catalog.
    "/Catalog/GetDraftItems" => get_draft_items, get_draft_items_async
        (GetDraftItemsRequest) -> GetDraftItemsResponse;
    /// Fetch a page of draft items created by an entity.
    "/Catalog/GetEntityDraftItems" => get_entity_draft_items, get_entity_draft_items_async
        (GetEntityDraftItemsRequest) -> GetEntityDraftItemsResponse;
    /// Fetch the review an entity wrote for an item.
    "/Catalog/GetEntityItemReview" => get_entity_item_review, get_entity_item_review_async
        (GetEntityItemReviewRequest) -> GetEntityItemReviewResponse;
    /// Fetch an item from the public catalog.
    "/Catalog/GetItem" => get_item, get_item_async
        (GetItemRequest) -> GetItemResponse;
    /// Fetch the moderation state of an item.
    "/Catalog/GetItemModerationState" => get_item_moderation_state, get_item_moderation_state_async
        (GetItemModerationStateRequest) -> GetItemModerationStateResponse;
    /// Report how far a publish of the item has got.
    "/Catalog/GetItemPublishStatus" => get_item_publish_status, get_item_publish_status_async
        (GetItemPublishStatusRequest) -> GetItemPublishStatusResponse;
    /// Fetch a page of reviews for an item.
    "/Catalog/GetItemReviews" => get_item_reviews, get_item_reviews_async
        (GetItemReviewsRequest) -> GetItemReviewsResponse;
    /// Rating summary and the most and least favorable reviews of an item.
    "/Catalog/GetItemReviewSummary" => get_item_review_summary, get_item_review_summary_async
        (GetItemReviewSummaryRequest) -> GetItemReviewSummaryResponse;
    /// Publish a draft item to the public catalog.
    "/Catalog/PublishDraftItem" => publish_draft_item, publish_draft_item_async
        (PublishDraftItemRequest) -> PublishDraftItemResponse;
    /// Flag an item for moderation.
    "/Catalog/ReportItem" => report_item, report_item_async
        (ReportItemRequest) -> ReportItemResponse;
    /// Flag a review for moderation.
    "/Catalog/ReportItemReview" => report_item_review, report_item_review_async
        (ReportItemReviewRequest) -> ReportItemReviewResponse;
    /// Create or replace the caller's review of an item.
    "/Catalog/ReviewItem" => review_item, review_item_async
        (ReviewItemRequest) -> ReviewItemResponse;
    /// Query the public catalog.
    "/Catalog/SearchItems" => search_items, search_items_async
        (SearchItemsRequest) -> SearchItemsResponse;
    /// Set the moderation state of an item.
    "/Catalog/SetItemModerationState" => set_item_moderation_state, set_item_moderation_state_async
        (SetItemModerationStateRequest) -> SetItemModerationStateResponse;
    /// Vote a review helpful or unhelpful.
    "/Catalog/SubmitItemReviewVote" => submit_item_review_vote, submit_item_review_vote_async
        (SubmitItemReviewVoteRequest) -> SubmitItemReviewVoteResponse;
    /// Hide reviews from public view.
    "/Catalog/TakedownItemReviews" => takedown_item_reviews, takedown_item_reviews_async
        (TakedownItemReviewsRequest) -> TakedownItemReviewsResponse;
    /// Replace the title's catalog configuration.
    "/Catalog/UpdateCatalogConfig" => update_catalog_config, update_catalog_config_async
        (UpdateCatalogConfigRequest) -> UpdateCatalogConfigResponse;
    /// Replace the metadata of an item in the working catalog.
    "/Catalog/UpdateDraftItem" => update_draft_item, update_draft_item_async
        (UpdateDraftItemRequest) -> UpdateDraftItemResponse;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn table_covers_every_catalog_operation() {
        assert_eq!(CATALOG_PATHS.len(), 24);
        let unique: HashSet<_> = CATALOG_PATHS.iter().collect();
        assert_eq!(unique.len(), CATALOG_PATHS.len());
        assert!(CATALOG_PATHS.iter().all(|p| p.starts_with("/Catalog/")));
    }

    #[test]
    fn request_types_know_their_paths() {
        assert_eq!(GetItemRequest::PATH, "/Catalog/GetItem");
        assert_eq!(SearchItemsRequest::PATH, "/Catalog/SearchItems");
        assert_eq!(UpdateDraftItemRequest::PATH, "/Catalog/UpdateDraftItem");
    }
}
