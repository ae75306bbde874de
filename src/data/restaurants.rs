//! Restaurant listing HTTP client
//!
//! Fetches the static restaurant JSON resource and parses its `businesses`
//! field into a `RestaurantList`.

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use super::{BusinessesResponse, RestaurantList};

/// Static resource the listing is served from
pub const DEFAULT_RESTAURANTS_URL: &str =
    "https://raw.githubusercontent.com/kholood-ea/inova-assignment/master/Resturants.json";

/// Errors that can occur when fetching the restaurant listing
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned status {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Network access is disabled
    #[error("Network access is disabled (offline mode)")]
    Offline,
}

/// Client for the restaurant listing resource
#[derive(Debug, Clone)]
pub struct RestaurantClient {
    client: Client,
    url: String,
}

impl Default for RestaurantClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RestaurantClient {
    /// Create a client for the default listing URL
    pub fn new() -> Self {
        Self::with_url(DEFAULT_RESTAURANTS_URL)
    }

    /// Create a client for a custom listing URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// The URL this client fetches from
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full restaurant listing
    ///
    /// Issues a single GET with no retry; retrying is the caller's policy.
    ///
    /// # Returns
    /// * `Ok(RestaurantList)` - the `businesses` field of the body
    /// * `Err(FetchError)` - if the request, status or parsing fails
    pub async fn fetch_restaurants(&self) -> Result<RestaurantList, FetchError> {
        debug!(url = %self.url, "fetching restaurant listing");

        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        parse_response(&text)
    }
}

/// Parses a listing body into its `businesses` list
pub fn parse_response(text: &str) -> Result<RestaurantList, FetchError> {
    let body: BusinessesResponse = serde_json::from_str(text)?;
    Ok(body.businesses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response() -> &'static str {
        r#"{
            "businesses": [
                {
                    "id": "b1",
                    "name": "Al Fanar",
                    "image_url": "https://example.com/fanar.jpg",
                    "rating": 4.0
                },
                {
                    "id": "b2",
                    "name": "Logma",
                    "image_url": "https://example.com/logma.jpg"
                }
            ],
            "total": 2
        }"#
    }

    #[test]
    fn test_parse_valid_response() {
        let list = parse_response(sample_response()).expect("Should parse");

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "Al Fanar");
        assert_eq!(list[1].image_url, "https://example.com/logma.jpg");
        assert!(list[0].extra.contains_key("rating"));
    }

    #[test]
    fn test_parse_preserves_order() {
        let list = parse_response(sample_response()).unwrap();
        let names: Vec<&str> = list.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Al Fanar", "Logma"]);
    }

    #[test]
    fn test_parse_tolerates_null_image_url() {
        let body = r#"{"businesses": [
            {"name": "A", "image_url": "https://example.com/a.jpg"},
            {"name": "B", "image_url": null}
        ]}"#;

        let list = parse_response(body).expect("One null field should not fail the listing");

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "B");
        assert_eq!(list[1].image_url, "");
    }

    #[test]
    fn test_parse_missing_businesses_is_empty() {
        let list = parse_response(r#"{"total": 0}"#).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        let result = parse_response("{not json");
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_client_default_url() {
        let client = RestaurantClient::default();
        assert_eq!(client.url(), DEFAULT_RESTAURANTS_URL);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_fails() {
        // Port 1 on loopback refuses connections
        let client = RestaurantClient::with_url("http://127.0.0.1:1/Resturants.json");

        let result = client.fetch_restaurants().await;

        assert!(matches!(result, Err(FetchError::RequestFailed(_))));
    }
}
