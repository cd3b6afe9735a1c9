use reqwest::{Client, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

/// Bucket holding todo attachments.
const BUCKET: &str = "todo-attachments";

/// Error from the file store. Deleting an object that is already gone is a
/// recognized condition callers handle differently from other failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("object not found")]
    NotFound,
    #[error("{0}")]
    Request(String),
}

/// Client for the hosted file store. Objects are keyed by a generated
/// opaque name, carry a content-type tag, and are read through a fetchable
/// URL issued right after upload. That URL is also the deletion handle.
#[derive(Clone)]
pub struct StorageClient {
    bucket_url: String,
    api_key: String,
    http: Client,
}

#[derive(Deserialize)]
struct UrlResponse {
    url: String,
}

/// Generate a fresh opaque object name, decoupled from the display name.
pub fn generate_object_name() -> String {
    Uuid::new_v4().to_string()
}

impl StorageClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, String> {
        let http = Client::builder()
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            bucket_url: format!("{}/buckets/{}/objects", base_url.trim_end_matches('/'), BUCKET),
            api_key: api_key.to_string(),
            http,
        })
    }

    /// PUT an object under `object_name` with its content-type metadata.
    pub async fn upload(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), String> {
        let url = format!("{}/{}", self.bucket_url, object_name);
        let resp = self
            .http
            .put(&url)
            .header("X-Api-Key", &self.api_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| format!("Upload failed: {}", e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(format!("Upload returned {}: {}", status, text));
        }
        Ok(())
    }

    /// Fetch the download URL for a just-uploaded object.
    pub async fn download_url(&self, object_name: &str) -> Result<String, String> {
        let url = format!("{}/{}/url", self.bucket_url, object_name);
        let resp = self
            .http
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| format!("Download URL request failed: {}", e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("Failed to read download URL response: {}", e))?;

        if !status.is_success() {
            return Err(format!("Download URL returned {}: {}", status, text));
        }

        parse_url_response(&text)
    }

    /// DELETE an object by the URL issued at upload time. A missing object
    /// reports [`StorageError::NotFound`] so callers can treat it as
    /// already-deleted where that is the right call.
    pub async fn delete_by_url(&self, url: &str) -> Result<(), StorageError> {
        let resp = self
            .http
            .delete(url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| StorageError::Request(format!("Delete failed: {}", e)))?;

        match resp.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND | StatusCode::GONE => Err(StorageError::NotFound),
            s => {
                let text = resp.text().await.unwrap_or_default();
                Err(StorageError::Request(format!("Delete returned {}: {}", s, text)))
            }
        }
    }
}

fn parse_url_response(json: &str) -> Result<String, String> {
    let parsed: UrlResponse = serde_json::from_str(json)
        .map_err(|e| format!("Failed to parse download URL response: {}", e))?;
    Ok(parsed.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_names_are_opaque_and_unique() {
        let a = generate_object_name();
        let b = generate_object_name();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn url_response_parsing() {
        let url = parse_url_response(r#"{"url": "https://files.finito.app/x"}"#).unwrap();
        assert_eq!(url, "https://files.finito.app/x");
        assert!(parse_url_response(r#"{"href": "nope"}"#).is_err());
    }

    #[test]
    fn not_found_is_distinguishable() {
        let err = StorageError::NotFound;
        assert!(matches!(err, StorageError::NotFound));
        assert_eq!(err.to_string(), "object not found");
    }
}
