use crate::errors::StoreError;
use reqwest::{header::HeaderMap, Client, Method};
use serde::{de::DeserializeOwned, Serialize};

/// Issue a request with an optional JSON body and parse the JSON response.
/// Throws error on non-success status code.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<&T>,
    headers: HeaderMap,
) -> Result<R, StoreError> {
    let mut request = client.request(method, url).headers(headers);
    if let Some(body) = body {
        request = request.json(body);
    }
    let response = request.send().await?;
    if response.status().is_success() {
        Ok(response.json::<R>().await?)
    } else {
        Err(StoreError::StatusCode(
            response.status(),
            response.text().await.unwrap_or_default(),
        ))
    }
}
