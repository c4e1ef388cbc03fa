use crate::{
    client_utils,
    errors::{StoreError, StoreResult},
    gift_store::GiftStore,
    types::{now_timestamp, Gift, GiftDraft, GiftPatch},
};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::Serialize;
use tracing::debug;

const BACKEND: &str = "supabase";
const DEFAULT_TABLE: &str = "presents";
const PLACEHOLDER_API_KEY: &str = "YOUR_SUPABASE_ANON_KEY";

/// Remote record store speaking PostgREST against a hosted Supabase table.
///
/// Mutations request `return=representation` so the affected rows come back
/// in the response; an update or delete that matches no row is how
/// `NotFound` is detected.
pub struct SupabaseStore {
    url: String,
    api_key: String,
    table: String,
    client: Client,
    misconfigured: Option<&'static str>,
}

#[derive(Clone, Default)]
pub struct SupabaseStoreOptions {
    /// Project endpoint, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// The project anon key, sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Table holding the records; defaults to `presents`.
    pub table: Option<String>,
    /// Bring-your-own client, e.g. to control timeouts.
    pub client: Option<Client>,
}

impl SupabaseStoreOptions {
    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY` from the environment.
    /// Missing variables leave the fields empty, which the store reports as
    /// not configured rather than failing construction.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("SUPABASE_URL").unwrap_or_default(),
            api_key: std::env::var("SUPABASE_ANON_KEY").unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Detect absent or placeholder connection parameters without any
    /// network traffic.
    fn misconfiguration(&self) -> Option<&'static str> {
        if self.url.is_empty() {
            return Some("endpoint URL is empty");
        }
        if !self.url.starts_with("https://") || !self.url.contains(".supabase.co") {
            return Some("endpoint URL is not a Supabase project URL");
        }
        if self.api_key.is_empty() {
            return Some("anon key is empty");
        }
        if self.api_key == PLACEHOLDER_API_KEY {
            return Some("anon key is the placeholder value");
        }
        None
    }
}

/// Wire shape of an update: the caller's patch plus the refreshed
/// `updated_at`, which the client sets rather than trusting a trigger to
/// exist on the table.
#[derive(Serialize)]
struct UpdateRow<'a> {
    #[serde(flatten)]
    patch: &'a GiftPatch,
    updated_at: &'a str,
}

impl SupabaseStore {
    #[must_use]
    pub fn new(mut options: SupabaseStoreOptions) -> Self {
        let misconfigured = options.misconfiguration();
        let client = options.client.take().unwrap_or_default();

        Self {
            url: options.url.trim_end_matches('/').to_string(),
            api_key: options.api_key,
            table: options
                .table
                .take()
                .unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            client,
            misconfigured,
        }
    }

    fn ensure_configured(&self) -> StoreResult<()> {
        match self.misconfigured {
            Some(reason) => Err(StoreError::NotConfigured(reason)),
            None => Ok(()),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url, self.table)
    }

    fn request_headers(&self) -> StoreResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        let mut apikey = HeaderValue::from_str(&self.api_key)
            .map_err(|_| StoreError::NotConfigured("anon key is not a valid header value"))?;
        apikey.set_sensitive(true);
        headers.insert("apikey", apikey);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", self.api_key))
            .map_err(|_| StoreError::NotConfigured("anon key is not a valid header value"))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn mutation_headers(&self) -> StoreResult<HeaderMap> {
        let mut headers = self.request_headers()?;
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl GiftStore for SupabaseStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn list(&self) -> StoreResult<Vec<Gift>> {
        self.ensure_configured()?;
        debug!(backend = BACKEND, table = %self.table, "listing gifts");

        let url = format!("{}?select=*&order=created_at.desc", self.table_url());
        let gifts: Vec<Gift> = client_utils::send_json::<(), _>(
            &self.client,
            Method::GET,
            &url,
            None,
            self.request_headers()?,
        )
        .await?;

        debug!(backend = BACKEND, count = gifts.len(), "listed gifts");
        Ok(gifts)
    }

    async fn create(&self, draft: GiftDraft) -> StoreResult<Gift> {
        self.ensure_configured()?;
        debug!(backend = BACKEND, name = %draft.name, "creating gift");

        let rows: Vec<Gift> = client_utils::send_json(
            &self.client,
            Method::POST,
            &self.table_url(),
            Some(&draft),
            self.mutation_headers()?,
        )
        .await?;

        let gift = rows.into_iter().next().ok_or_else(|| {
            StoreError::Invariant("insert returned no representation".to_string())
        })?;
        debug!(backend = BACKEND, id = %gift.id, "created gift");
        Ok(gift)
    }

    async fn update(&self, id: &str, patch: GiftPatch) -> StoreResult<Gift> {
        self.ensure_configured()?;
        debug!(backend = BACKEND, %id, "updating gift");

        let url = format!("{}?id=eq.{id}", self.table_url());
        let updated_at = now_timestamp();
        let payload = UpdateRow {
            patch: &patch,
            updated_at: &updated_at,
        };
        let rows: Vec<Gift> = client_utils::send_json(
            &self.client,
            Method::PATCH,
            &url,
            Some(&payload),
            self.mutation_headers()?,
        )
        .await?;

        let gift = rows
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        debug!(backend = BACKEND, id = %gift.id, "updated gift");
        Ok(gift)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.ensure_configured()?;
        debug!(backend = BACKEND, %id, "deleting gift");

        let url = format!("{}?id=eq.{id}", self.table_url());
        let rows: Vec<Gift> = client_utils::send_json::<(), _>(
            &self.client,
            Method::DELETE,
            &url,
            None,
            self.mutation_headers()?,
        )
        .await?;

        if rows.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!(backend = BACKEND, %id, "deleted gift");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Priority;
    use serde_json::json;

    fn configured_options() -> SupabaseStoreOptions {
        SupabaseStoreOptions {
            url: "https://project.supabase.co".to_string(),
            api_key: "anon-key".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn detects_missing_and_placeholder_configuration() {
        assert!(SupabaseStoreOptions::default().misconfiguration().is_some());

        let mut options = configured_options();
        assert!(options.misconfiguration().is_none());

        options.api_key = PLACEHOLDER_API_KEY.to_string();
        assert!(options.misconfiguration().is_some());

        let mut options = configured_options();
        options.url = "http://localhost:3000".to_string();
        assert!(options.misconfiguration().is_some());
    }

    #[test]
    fn table_url_uses_default_table_and_trims_slash() {
        let mut options = configured_options();
        options.url = "https://project.supabase.co/".to_string();
        let store = SupabaseStore::new(options);
        assert_eq!(
            store.table_url(),
            "https://project.supabase.co/rest/v1/presents"
        );

        let mut options = configured_options();
        options.table = Some("gifts".to_string());
        let store = SupabaseStore::new(options);
        assert_eq!(
            store.table_url(),
            "https://project.supabase.co/rest/v1/gifts"
        );
    }

    #[test]
    fn update_payload_carries_patch_and_refreshed_timestamp() {
        let patch = GiftPatch {
            received: Some(true),
            priority: Some(Priority::Sonho),
            ..Default::default()
        };
        let payload = UpdateRow {
            patch: &patch,
            updated_at: "2026-08-27T12:00:00.000000Z",
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "received": true,
                "priority": "sonho",
                "updated_at": "2026-08-27T12:00:00.000000Z",
            })
        );
    }

    #[tokio::test]
    async fn unconfigured_store_fails_without_network_traffic() {
        let store = SupabaseStore::new(SupabaseStoreOptions::default());
        let error = store.list().await.unwrap_err();
        assert!(matches!(error, StoreError::NotConfigured(_)));
        assert!(error.is_unavailable());
    }
}
