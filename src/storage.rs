//! Durable object storage behind the upload relay.
//!
//! The relay only needs "put bytes under a key"; that seam is the
//! [`ObjectStore`] trait so the HTTP layer can be exercised against an
//! in-memory double while production runs against S3.

use crate::config::StorageConfig;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use rand::distr::Alphanumeric;
use rand::Rng;

/// Prefix every upload is stored under.
const KEY_PREFIX: &str = "scaled-doors";
const KEY_SUFFIX_LEN: usize = 8;

/// Storage backend failure. The message is for the log; user-facing
/// responses stay generic so backend details never leak.
#[derive(Debug, thiserror::Error)]
#[error("storage backend error: {0}")]
pub struct StoreError(pub String);

#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StoreError>;
}

/// S3-backed store.
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Store {
    /// Build a client for the configured region. Credentials come from the
    /// SDK's default provider chain (the same environment variables the
    /// startup check validated).
    pub async fn connect(config: &StorageConfig) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        S3Store {
            client: aws_sdk_s3::Client::new(&shared),
            bucket: config.bucket.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StoreError(aws_sdk_s3::error::DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}

/// Generate a globally unique storage key: millisecond timestamp prefix
/// plus a random alphanumeric suffix. Uniqueness by construction; no
/// collision detection.
pub fn object_key() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!(
        "{KEY_PREFIX}/{}-{}.glb",
        chrono::Utc::now().timestamp_millis(),
        suffix
    )
}

/// Join the configured public base URL with an object key.
pub fn public_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}
