//! Filesystem blob store with HMAC-signed read URLs.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use escrutinio_core::storage::{validate_object_path, BlobStore, StorageError};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tokio::io::AsyncWriteExt;

type HmacSha256 = Hmac<Sha256>;

/// Stores objects under `root`; signed URLs are served by `GET /blobs/{*path}`.
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
    signer: HmacSha256,
}

impl LocalBlobStore {
    pub fn new(
        root: PathBuf,
        public_base_url: String,
        signing_key: &[u8],
    ) -> Result<Self, hmac::digest::InvalidLength> {
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            signer: HmacSha256::new_from_slice(signing_key)?,
        })
    }

    fn object_path(&self, path: &str) -> Result<PathBuf, StorageError> {
        validate_object_path(path)?;
        Ok(self.root.join(path))
    }

    fn mac(&self, path: &str, expires: i64) -> HmacSha256 {
        let mut mac = self.signer.clone();
        mac.update(format!("{path}:{expires}").as_bytes());
        mac
    }

    /// Hex signature over `path:expires`.
    pub fn sign(&self, path: &str, expires: i64) -> String {
        hex::encode(self.mac(path, expires).finalize().into_bytes())
    }

    /// Whether `token` is a valid, unexpired signature for `path`.
    pub fn verify(&self, path: &str, expires: i64, token: &str) -> bool {
        if expires < chrono::Utc::now().timestamp() {
            return false;
        }
        match hex::decode(token) {
            Ok(bytes) => self.mac(path, expires).verify_slice(&bytes).is_ok(),
            Err(_) => false,
        }
    }

    /// Read a stored object.
    pub async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let file = self.object_path(path)?;
        tokio::fs::read(&file).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(path.to_string()),
            _ => StorageError::Io(e),
        })
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, path: &str, bytes: Vec<u8>, _content_type: &str) -> Result<(), StorageError> {
        let file = self.object_path(path)?;
        if let Some(parent) = file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut out = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::Backend {
                    status: 409,
                    body: format!("Object already exists: {path}"),
                },
                _ => StorageError::Io(e),
            })?;
        out.write_all(&bytes).await?;
        out.flush().await?;
        Ok(())
    }

    async fn signed_url(&self, path: &str, ttl: Duration) -> Result<String, StorageError> {
        let file = self.object_path(path)?;
        if !tokio::fs::try_exists(&file).await? {
            return Err(StorageError::NotFound(path.to_string()));
        }
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let expires = chrono::Utc::now().timestamp().saturating_add(ttl_secs);
        Ok(format!(
            "{}/blobs/{path}?expires={expires}&token={}",
            self.public_base_url,
            self.sign(path, expires)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn store(dir: &tempfile::TempDir) -> LocalBlobStore {
        LocalBlobStore::new(dir.path().to_path_buf(), "http://localhost:3000/".into(), b"k").unwrap()
    }

    fn query_param<'a>(url: &'a str, name: &str) -> &'a str {
        url.split(['?', '&'])
            .find_map(|kv| kv.strip_prefix(&format!("{name}=")))
            .unwrap()
    }

    #[tokio::test]
    async fn put_then_read_and_sign() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        s.put("7/mesa-3/3-1.jpg", vec![1, 2, 3], "image/jpeg").await.unwrap();
        assert_eq!(s.read("7/mesa-3/3-1.jpg").await.unwrap(), vec![1, 2, 3]);

        let url = s.signed_url("7/mesa-3/3-1.jpg", Duration::from_secs(300)).await.unwrap();
        assert!(url.starts_with("http://localhost:3000/blobs/7/mesa-3/3-1.jpg?expires="));
        let expires: i64 = query_param(&url, "expires").parse().unwrap();
        assert!(s.verify("7/mesa-3/3-1.jpg", expires, query_param(&url, "token")));
        assert!(!s.verify("7/mesa-3/other.jpg", expires, query_param(&url, "token")));
    }

    #[tokio::test]
    async fn put_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        s.put("a.jpg", vec![1], "image/jpeg").await.unwrap();
        assert_matches!(
            s.put("a.jpg", vec![2], "image/jpeg").await,
            Err(StorageError::Backend { status: 409, .. })
        );
    }

    #[tokio::test]
    async fn signing_missing_object_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            store(&dir).signed_url("nope.jpg", Duration::from_secs(1)).await,
            Err(StorageError::NotFound(_))
        );
    }

    #[test]
    fn expired_or_garbled_tokens_fail() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(&dir);
        let past = chrono::Utc::now().timestamp() - 10;
        assert!(!s.verify("a.jpg", past, &s.sign("a.jpg", past)));
        let future = chrono::Utc::now().timestamp() + 60;
        assert!(s.verify("a.jpg", future, &s.sign("a.jpg", future)));
        assert!(!s.verify("a.jpg", future, "zz"));
        assert!(!s.verify("a.jpg", future, "abc"));
    }

    #[test]
    fn token_is_lowercase_hex_of_a_sha256_mac() {
        let dir = tempfile::tempdir().unwrap();
        let token = store(&dir).sign("a.jpg", 1_700_000_000);
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}
