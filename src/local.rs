use crate::{
    errors::{StoreError, StoreResult},
    gift_store::GiftStore,
    types::{now_timestamp, Gift, GiftDraft, GiftPatch},
};
use std::{
    fs,
    io::ErrorKind,
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, warn};
use uuid::Uuid;

const BACKEND: &str = "local";

/// Device-local fallback store: the whole collection serialized as one JSON
/// document at a well-known path.
///
/// Every operation read-modify-writes the full document under a mutex, and
/// writes go through a temp file plus rename so no reader ever observes a
/// partial write. An absent or corrupt document degrades to the empty
/// collection instead of failing.
pub struct LocalStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guard protects no data of its own, so a poisoned lock is safe
        // to reclaim.
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_all(&self) -> Vec<Gift> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => return Vec::new(),
            Err(error) => {
                warn!(
                    backend = BACKEND,
                    path = %self.path.display(),
                    %error,
                    "failed to read local store, treating as empty"
                );
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(gifts) => gifts,
            Err(error) => {
                warn!(
                    backend = BACKEND,
                    path = %self.path.display(),
                    %error,
                    "corrupt local store, treating as empty"
                );
                Vec::new()
            }
        }
    }

    fn write_all(&self, gifts: &[Gift]) -> StoreResult<()> {
        let raw = serde_json::to_string(gifts)
            .map_err(|error| StoreError::Storage(format!("serialize collection: {error}")))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)
            .map_err(|error| StoreError::Storage(format!("write {}: {error}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|error| {
            StoreError::Storage(format!("rename into {}: {error}", self.path.display()))
        })?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl GiftStore for LocalStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn list(&self) -> StoreResult<Vec<Gift>> {
        let _guard = self.guard();
        let mut gifts = self.read_all();
        // Stable sort: records created at the same instant keep their
        // newest-first insertion order.
        gifts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!(backend = BACKEND, count = gifts.len(), "listed gifts");
        Ok(gifts)
    }

    async fn create(&self, draft: GiftDraft) -> StoreResult<Gift> {
        let _guard = self.guard();
        let mut gifts = self.read_all();

        let now = now_timestamp();
        let gift = Gift {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            price: draft.price,
            image: draft.image,
            category: draft.category,
            store_link: draft.store_link,
            observation: draft.observation,
            received: draft.received,
            priority: draft.priority,
            created_at: now.clone(),
            updated_at: now,
        };
        gifts.insert(0, gift.clone());
        self.write_all(&gifts)?;

        debug!(backend = BACKEND, id = %gift.id, "created gift");
        Ok(gift)
    }

    async fn update(&self, id: &str, patch: GiftPatch) -> StoreResult<Gift> {
        let _guard = self.guard();
        let mut gifts = self.read_all();

        let gift = gifts
            .iter_mut()
            .find(|gift| gift.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        patch.apply(gift);
        gift.updated_at = now_timestamp();
        let gift = gift.clone();
        self.write_all(&gifts)?;

        debug!(backend = BACKEND, id = %gift.id, "updated gift");
        Ok(gift)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let _guard = self.guard();
        let mut gifts = self.read_all();

        let before = gifts.len();
        gifts.retain(|gift| gift.id != id);
        if gifts.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        self.write_all(&gifts)?;

        debug!(backend = BACKEND, %id, "deleted gift");
        Ok(())
    }
}
