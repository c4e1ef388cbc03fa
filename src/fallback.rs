use crate::{
    errors::StoreResult,
    gift_store::GiftStore,
    local::LocalStore,
    supabase::{SupabaseStore, SupabaseStoreOptions},
    types::{Gift, GiftDraft, GiftPatch},
};
use std::path::PathBuf;
use tracing::warn;

const BACKEND: &str = "fallback";

/// Decorator composing two stores: every operation is attempted on the
/// primary first and transparently re-executed on the fallback when the
/// primary is unavailable (unreachable, misconfigured, or erroring).
///
/// `NotFound` is never absorbed and never triggers the fallback: addressing
/// a record that does not exist is the caller's error whichever store
/// reports it. The same policy applies uniformly to all four operations, so
/// data operations appear to always succeed unless the id genuinely does
/// not exist.
pub struct FallbackStore {
    primary: Box<dyn GiftStore>,
    fallback: Box<dyn GiftStore>,
}

impl FallbackStore {
    #[must_use]
    pub fn new(primary: Box<dyn GiftStore>, fallback: Box<dyn GiftStore>) -> Self {
        Self { primary, fallback }
    }

    /// The reference composition: a Supabase-backed primary with a local
    /// JSON document as the fallback.
    #[must_use]
    pub fn supabase_with_local(options: SupabaseStoreOptions, path: impl Into<PathBuf>) -> Self {
        Self::new(
            Box::new(SupabaseStore::new(options)),
            Box::new(LocalStore::new(path)),
        )
    }

    fn warn_falling_back(&self, operation: &'static str, error: &crate::StoreError) {
        warn!(
            primary = self.primary.backend(),
            fallback = self.fallback.backend(),
            operation,
            %error,
            "primary store unavailable, falling back"
        );
    }
}

#[async_trait::async_trait]
impl GiftStore for FallbackStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn list(&self) -> StoreResult<Vec<Gift>> {
        match self.primary.list().await {
            Err(error) if error.is_unavailable() => {
                self.warn_falling_back("list", &error);
                self.fallback.list().await
            }
            result => result,
        }
    }

    async fn create(&self, draft: GiftDraft) -> StoreResult<Gift> {
        match self.primary.create(draft.clone()).await {
            Err(error) if error.is_unavailable() => {
                self.warn_falling_back("create", &error);
                self.fallback.create(draft).await
            }
            result => result,
        }
    }

    async fn update(&self, id: &str, patch: GiftPatch) -> StoreResult<Gift> {
        match self.primary.update(id, patch.clone()).await {
            Err(error) if error.is_unavailable() => {
                self.warn_falling_back("update", &error);
                self.fallback.update(id, patch).await
            }
            result => result,
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        match self.primary.delete(id).await {
            Err(error) if error.is_unavailable() => {
                self.warn_falling_back("delete", &error);
                self.fallback.delete(id).await
            }
            result => result,
        }
    }
}
