#![allow(dead_code)]

use std::time::Duration;
use wishlist_store::{
    Category, Gift, GiftDraft, GiftPatch, GiftStore, Priority, StoreError, StoreResult,
};

/// The record from the reference scenario.
pub fn scenario_draft() -> GiftDraft {
    GiftDraft {
        name: "Bolsa rosa".to_string(),
        price: "150,00".to_string(),
        category: Category::Moda,
        priority: Priority::Sonho,
        received: false,
        ..Default::default()
    }
}

pub fn draft(name: &str) -> GiftDraft {
    GiftDraft {
        name: name.to_string(),
        price: "10,00".to_string(),
        ..Default::default()
    }
}

/// Long enough for the microsecond timestamps of consecutive operations to
/// differ.
pub async fn pause() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

/// A primary store that is never reachable, for exercising the fallback
/// path.
pub struct UnavailableStore;

#[async_trait::async_trait]
impl GiftStore for UnavailableStore {
    fn backend(&self) -> &'static str {
        "unavailable"
    }

    async fn list(&self) -> StoreResult<Vec<Gift>> {
        Err(StoreError::NotConfigured("forced unavailability"))
    }

    async fn create(&self, _draft: GiftDraft) -> StoreResult<Gift> {
        Err(StoreError::NotConfigured("forced unavailability"))
    }

    async fn update(&self, _id: &str, _patch: GiftPatch) -> StoreResult<Gift> {
        Err(StoreError::NotConfigured("forced unavailability"))
    }

    async fn delete(&self, _id: &str) -> StoreResult<()> {
        Err(StoreError::NotConfigured("forced unavailability"))
    }
}
