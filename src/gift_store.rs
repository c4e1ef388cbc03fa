use crate::{
    errors::StoreResult,
    types::{Gift, GiftDraft, GiftPatch},
};

/// The data-access contract the presentation layer consumes: four
/// asynchronous operations over the wishlist collection. The record shape is
/// identical regardless of which backing store serves the call.
#[async_trait::async_trait]
pub trait GiftStore: Send + Sync {
    /// Short name of the backing store, for diagnostics.
    fn backend(&self) -> &'static str;

    /// Every record in the collection, newest `created_at` first.
    async fn list(&self) -> StoreResult<Vec<Gift>>;

    /// Persist a new record, assigning its id and timestamps, and return it
    /// as stored. A fresh record has `created_at == updated_at`.
    async fn create(&self, draft: GiftDraft) -> StoreResult<Gift>;

    /// Merge `patch` onto the record with `id`, refresh `updated_at`, and
    /// return the merged record. Fails with `NotFound` when the id does not
    /// exist.
    async fn update(&self, id: &str, patch: GiftPatch) -> StoreResult<Gift>;

    /// Remove the record with `id` permanently. Fails with `NotFound` when
    /// the id does not exist.
    async fn delete(&self, id: &str) -> StoreResult<()>;
}
