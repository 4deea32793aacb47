//! Pinata v3 backend.
//!
//! Uploads go to `{uploads_url}/v3/files` as multipart form data on the
//! private network; signed URLs are minted through
//! `{api_url}/v3/files/private/download_link` for
//! `https://{gateway}/files/{cid}`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use memegen_common::config::AssetStoreConfig;
use memegen_common::error::{MemeError, MemeResult};
use memegen_meme_model::{ContentIdentifier, SelectedAsset, SignedUrl};

use crate::AssetStore;

/// Longest slice of an error body included in error messages.
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for the Pinata files API.
#[derive(Debug, Clone)]
pub struct PinataClient {
    http: reqwest::Client,
    jwt: String,
    gateway: String,
    api_url: String,
    uploads_url: String,
}

/// Body of the `download_link` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignedUrlRequest {
    pub url: String,
    pub expires: u64,
    pub date: i64,
    pub method: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    data: UploadedFile,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    cid: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    size: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SignedUrlResponse {
    data: String,
}

impl PinataClient {
    /// Build a client from configuration. Fails when the credential or the
    /// gateway is missing.
    pub fn from_config(config: &AssetStoreConfig) -> MemeResult<Self> {
        let jwt = config
            .jwt
            .clone()
            .ok_or_else(|| MemeError::config("asset store credential is not set"))?;
        let gateway = normalize_gateway(&config.gateway);
        if gateway.is_empty() {
            return Err(MemeError::config("asset store gateway is not set"));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .build()
            .map_err(|e| MemeError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            jwt,
            gateway,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            uploads_url: config.uploads_url.trim_end_matches('/').to_string(),
        })
    }

    /// Gateway host, without scheme.
    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    /// Unsigned gateway URL for a content identifier.
    pub fn gateway_url(&self, cid: &ContentIdentifier) -> String {
        gateway_file_url(&self.gateway, cid)
    }
}

#[async_trait::async_trait]
impl AssetStore for PinataClient {
    async fn upload(&self, asset: &SelectedAsset) -> MemeResult<ContentIdentifier> {
        let endpoint = format!("{}/v3/files", self.uploads_url);
        tracing::debug!(
            file = %asset.file_name,
            media_type = %asset.media_type,
            bytes = asset.len(),
            %endpoint,
            "Uploading asset"
        );

        let part = reqwest::multipart::Part::bytes(asset.bytes.clone())
            .file_name(asset.file_name.clone())
            .mime_str(&asset.media_type)
            .map_err(|e| MemeError::upload(format!("Invalid media type: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .text("network", "private")
            .part("file", part);

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.jwt)
            .multipart(form)
            .send()
            .await
            .map_err(|e| MemeError::upload(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MemeError::upload(format!("Failed to read response: {e}")))?;
        if !status.is_success() {
            return Err(MemeError::upload(format!(
                "HTTP {status}: {}",
                truncate(&body, MAX_ERROR_BODY)
            )));
        }

        parse_upload_response(&body)
    }

    async fn create_signed_url(
        &self,
        cid: &ContentIdentifier,
        expires_in_secs: u64,
    ) -> MemeResult<SignedUrl> {
        let endpoint = format!("{}/v3/files/private/download_link", self.api_url);
        let now = Utc::now();
        let request = build_signed_url_request(&self.gateway, cid, expires_in_secs, now);
        tracing::debug!(%cid, expires = expires_in_secs, "Requesting signed URL");

        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&self.jwt)
            .json(&request)
            .send()
            .await
            .map_err(|e| MemeError::signed_url(format!("Request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MemeError::signed_url(format!("Failed to read response: {e}")))?;
        if !status.is_success() {
            return Err(MemeError::signed_url(format!(
                "HTTP {status}: {}",
                truncate(&body, MAX_ERROR_BODY)
            )));
        }

        parse_signed_url_response(&body, now, expires_in_secs)
    }

    fn name(&self) -> &str {
        "pinata"
    }
}

/// Strip scheme and trailing slashes from a configured gateway.
pub fn normalize_gateway(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

/// `https://{gateway}/files/{cid}`.
pub fn gateway_file_url(gateway: &str, cid: &ContentIdentifier) -> String {
    format!("https://{gateway}/files/{cid}")
}

/// Request body asking for a GET link valid for `expires_in_secs` from `now`.
pub fn build_signed_url_request(
    gateway: &str,
    cid: &ContentIdentifier,
    expires_in_secs: u64,
    now: DateTime<Utc>,
) -> SignedUrlRequest {
    SignedUrlRequest {
        url: gateway_file_url(gateway, cid),
        expires: expires_in_secs,
        date: now.timestamp(),
        method: "GET".to_string(),
    }
}

/// Extract the content identifier from an upload response body.
pub fn parse_upload_response(body: &str) -> MemeResult<ContentIdentifier> {
    let parsed: UploadResponse = serde_json::from_str(body)
        .map_err(|e| MemeError::upload(format!("Unexpected upload response: {e}")))?;
    tracing::debug!(
        id = parsed.data.id.as_deref().unwrap_or("-"),
        size = parsed.data.size.unwrap_or(0),
        "Upload acknowledged"
    );
    ContentIdentifier::new(parsed.data.cid)
        .map_err(|_| MemeError::upload("Upload response carried an empty cid"))
}

/// Extract the signed URL from a `download_link` response body.
pub fn parse_signed_url_response(
    body: &str,
    issued_at: DateTime<Utc>,
    expires_in_secs: u64,
) -> MemeResult<SignedUrl> {
    let parsed: SignedUrlResponse = serde_json::from_str(body)
        .map_err(|e| MemeError::signed_url(format!("Unexpected signed URL response: {e}")))?;
    if parsed.data.trim().is_empty() {
        return Err(MemeError::signed_url("Signed URL response was empty"));
    }
    Ok(SignedUrl::new(parsed.data, issued_at, expires_in_secs))
}

fn truncate(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cid(raw: &str) -> ContentIdentifier {
        ContentIdentifier::new(raw).unwrap()
    }

    #[test]
    fn test_normalize_gateway() {
        assert_eq!(normalize_gateway("https://gw.example/"), "gw.example");
        assert_eq!(normalize_gateway("http://gw.example"), "gw.example");
        assert_eq!(normalize_gateway(" gw.example "), "gw.example");
        assert_eq!(normalize_gateway(""), "");
    }

    #[test]
    fn test_signed_url_request_body() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let request = build_signed_url_request("gw", &cid("abc123"), 300, now);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["url"], "https://gw/files/abc123");
        assert_eq!(json["expires"], 300);
        assert_eq!(json["date"], 1_700_000_000);
        assert_eq!(json["method"], "GET");
    }

    #[test]
    fn test_parse_upload_response() {
        let body = r#"{"data":{"id":"f-1","name":"cat.png","cid":"abc123","size":42,"mime_type":"image/png"}}"#;
        assert_eq!(parse_upload_response(body).unwrap(), cid("abc123"));
    }

    #[test]
    fn test_parse_upload_response_rejects_empty_cid() {
        let err = parse_upload_response(r#"{"data":{"cid":""}}"#).unwrap_err();
        assert!(matches!(err, MemeError::Upload { .. }));
        assert!(parse_upload_response("not json").is_err());
    }

    #[test]
    fn test_parse_signed_url_response() {
        let now = Utc::now();
        let url = parse_signed_url_response(
            r#"{"data":"https://gw/files/abc123?X-Signature=s"}"#,
            now,
            300,
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://gw/files/abc123?X-Signature=s");
        assert_eq!(url.expires_in_secs, 300);
        assert!(parse_signed_url_response(r#"{"data":""}"#, now, 300).is_err());
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let mut config = AssetStoreConfig::default();
        assert!(PinataClient::from_config(&config).is_err());
        config.jwt = Some("jwt".into());
        assert!(PinataClient::from_config(&config).is_err());
        config.gateway = "https://gw.example/".into();
        let client = PinataClient::from_config(&config).unwrap();
        assert_eq!(client.gateway(), "gw.example");
        assert_eq!(client.gateway_url(&cid("q")), "https://gw.example/files/q");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
