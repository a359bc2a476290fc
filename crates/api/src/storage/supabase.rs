//! Client for the hosted storage REST API.

use std::time::Duration;

use async_trait::async_trait;
use escrutinio_core::storage::{validate_object_path, BlobStore, StorageError};
use reqwest::StatusCode;
use serde::Deserialize;

/// Object storage bucket reached with the service key.
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

#[derive(Debug, Deserialize)]
struct SignResponse {
    #[serde(rename = "signedURL")]
    signed_url: String,
}

impl SupabaseStorage {
    pub fn new(base_url: String, service_key: String, bucket: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{path}", self.base_url, self.bucket)
    }

    fn sign_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/sign/{}/{path}", self.base_url, self.bucket)
    }

    /// The sign endpoint answers with a path relative to `/storage/v1`.
    fn absolute_signed_url(&self, relative: &str) -> String {
        if relative.starts_with("http://") || relative.starts_with("https://") {
            return relative.to_string();
        }
        format!("{}/storage/v1{relative}", self.base_url)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
    }

    async fn check_status(response: reqwest::Response, path: &str) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND || body.contains("not_found") {
            return Err(StorageError::NotFound(path.to_string()));
        }
        Err(StorageError::Backend {
            status: status.as_u16(),
            body,
        })
    }
}

fn transport(e: reqwest::Error) -> StorageError {
    StorageError::Transport(e.to_string())
}

#[async_trait]
impl BlobStore for SupabaseStorage {
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        validate_object_path(path)?;
        let response = self
            .authorized(self.client.post(self.object_url(path)))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(transport)?;
        Self::check_status(response, path).await?;
        Ok(())
    }

    async fn signed_url(&self, path: &str, ttl: Duration) -> Result<String, StorageError> {
        validate_object_path(path)?;
        let response = self
            .authorized(self.client.post(self.sign_url(path)))
            .json(&serde_json::json!({ "expiresIn": ttl.as_secs() }))
            .send()
            .await
            .map_err(transport)?;
        let signed: SignResponse = Self::check_status(response, path)
            .await?
            .json()
            .await
            .map_err(transport)?;
        Ok(self.absolute_signed_url(&signed.signed_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> SupabaseStorage {
        SupabaseStorage::new("https://abc.supabase.co/".into(), "key".into(), "actas".into())
    }

    #[test]
    fn object_and_sign_endpoints() {
        let s = storage();
        assert_eq!(
            s.object_url("1/mesa-2/2-3.jpg"),
            "https://abc.supabase.co/storage/v1/object/actas/1/mesa-2/2-3.jpg"
        );
        assert_eq!(
            s.sign_url("1/mesa-2/2-3.jpg"),
            "https://abc.supabase.co/storage/v1/object/sign/actas/1/mesa-2/2-3.jpg"
        );
    }

    #[test]
    fn relative_signed_urls_are_made_absolute() {
        let s = storage();
        assert_eq!(
            s.absolute_signed_url("/object/sign/actas/a.jpg?token=t"),
            "https://abc.supabase.co/storage/v1/object/sign/actas/a.jpg?token=t"
        );
        assert_eq!(
            s.absolute_signed_url("https://cdn.example/a.jpg"),
            "https://cdn.example/a.jpg"
        );
    }
}
