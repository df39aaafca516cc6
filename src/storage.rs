use async_trait::async_trait;
use aws_sdk_s3 as s3;
use axum::body::Bytes;
use chrono::Utc;
use s3::primitives::ByteStream;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Logical folder under which the remote driver places every news image.
const REMOTE_IMAGE_FOLDER: &str = "news-images";

/// FileUpload
///
/// The in-memory form of one file part pulled off a multipart stream: the part's
/// metadata plus its fully buffered bytes. Produced by the ingestion pipeline and
/// consumed by a StorageService implementation.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub field_name: String,
    pub file_name: String,
    pub mime_type: String,
    pub encoding: String,
    pub data: Bytes,
}

/// FileDescriptor
///
/// Metadata bundle identifying a locally stored file. The `path` is rooted under the
/// public-serving prefix (the leading `/public` segment is stripped), so it is usable
/// as-is in an `<img src>` or a persisted `image_url` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub field_name: String,
    pub file_name: String,
    pub mime_type: String,
    pub encoding: String,
    pub path: String,
}

/// StoredFile
///
/// The result of a durable write, as a tagged variant so downstream code can
/// pattern-match instead of probing for a `path` property. Serializes untagged:
/// the local variant as the descriptor object, the remote variant as a bare URL
/// string, which is the wire shape controllers and clients expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredFile {
    Local(FileDescriptor),
    Remote(String),
}

impl StoredFile {
    /// The single identifier sufficient to retrieve the file later: a public-rooted
    /// relative path for the local variant, an absolute URL for the remote one.
    pub fn public_location(&self) -> &str {
        match self {
            StoredFile::Local(descriptor) => &descriptor.path,
            StoredFile::Remote(url) => url,
        }
    }
}

/// StorageError
///
/// Failures raised by a storage backend. Local disk problems carry the underlying
/// I/O error; remote upload problems carry the SDK's rendering of the failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("upload failed: {0}")]
    Upload(String),
}

// 1. StorageService Contract
/// StorageService
///
/// Defines the abstract contract for all interactions with the file storage layer.
/// This trait allows us to swap the concrete implementation — local disk in
/// development, the S3 client in production, the in-memory Mock during testing —
/// without affecting the ingestion pipeline or the calling handlers.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Ensures the storage destination exists (directory or bucket). Idempotent and
    /// safe to call at startup; primarily used in the `Env::Local` setup.
    async fn prepare(&self);

    /// Persists one uploaded file and returns the descriptor identifying where it
    /// can be retrieved from.
    ///
    /// # Arguments
    /// * `upload`: the buffered file part.
    /// * `prefix`: optional destination-prefix override; `None` means the backend's
    ///   configured default.
    async fn store(
        &self,
        upload: FileUpload,
        prefix: Option<&str>,
    ) -> Result<StoredFile, StorageError>;
}

/// StorageState
///
/// The concrete type used to share the storage service access across the application state.
pub type StorageState = Arc<dyn StorageService>;

// 2. The Local Implementation (public directory on disk)
/// LocalStorage
///
/// Writes uploads beneath a public directory and serves them back by relative path.
/// Filenames are prefixed with a millisecond timestamp plus a random UUID so two
/// uploads of the same original name in the same millisecond cannot collide.
#[derive(Clone)]
pub struct LocalStorage {
    root: PathBuf,
    default_prefix: String,
}

impl LocalStorage {
    /// Constructs the local driver. `root` is the directory containing `public/`;
    /// `default_prefix` is used when a caller does not override the destination.
    pub fn new(root: &str, default_prefix: &str) -> Self {
        Self {
            root: PathBuf::from(root),
            default_prefix: default_prefix.to_string(),
        }
    }

    fn destination_dir(&self, prefix: &str) -> PathBuf {
        self.root.join(prefix.trim_start_matches('/'))
    }
}

#[async_trait]
impl StorageService for LocalStorage {
    async fn prepare(&self) {
        let _ = tokio::fs::create_dir_all(self.destination_dir(&self.default_prefix)).await;
    }

    /// store
    ///
    /// Ensures the destination directory exists, writes the bytes under a unique
    /// name, and returns a descriptor whose path is rooted at the public-serving
    /// prefix (the `/public` segment is not part of the served URL).
    async fn store(
        &self,
        upload: FileUpload,
        prefix: Option<&str>,
    ) -> Result<StoredFile, StorageError> {
        let prefix = prefix.unwrap_or(&self.default_prefix);
        let dir = self.destination_dir(prefix);
        tokio::fs::create_dir_all(&dir).await?;

        let unique_name = unique_file_name(&upload.file_name);
        tokio::fs::write(dir.join(&unique_name), &upload.data).await?;

        let public_path = format!("{}/{}", strip_public_prefix(prefix), unique_name);
        Ok(StoredFile::Local(FileDescriptor {
            field_name: upload.field_name,
            file_name: upload.file_name,
            mime_type: upload.mime_type,
            encoding: upload.encoding,
            path: public_path,
        }))
    }
}

// 3. The Remote Implementation (S3/MinIO)
/// S3Storage
///
/// The concrete remote implementation using the AWS SDK for S3. Due to S3
/// compatibility, this client transparently handles connections to a Dockerized
/// MinIO instance locally and a hosted S3 gateway in production.
///
/// The `force_path_style(true)` is critical for MinIO and gateway compatibility.
#[derive(Clone)]
pub struct S3Storage {
    client: s3::Client,
    bucket_name: String,
    endpoint: String,
}

impl S3Storage {
    /// Constructs the S3 client using credentials and configuration from AppConfig.
    pub async fn new(
        endpoint: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
    ) -> Self {
        let credentials =
            s3::config::Credentials::new(access_key, secret_key, None, None, "static");

        let config = s3::Config::builder()
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .region(s3::config::Region::new(region.to_string()))
            .behavior_version_latest()
            // Path-style addressing (http://endpoint/bucket/key) is required for
            // MinIO and S3-compatible gateways.
            .force_path_style(true)
            .build();

        let client = s3::Client::from_conf(config);

        Self {
            client,
            bucket_name: bucket.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StorageService for S3Storage {
    /// prepare
    ///
    /// Calls the S3 CreateBucket API. S3 APIs are idempotent, so this only creates
    /// the bucket if it does not already exist. Safe to call at startup.
    async fn prepare(&self) {
        let _ = self
            .client
            .create_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await;
    }

    /// store
    ///
    /// Buffers the upload to a temporary file, pushes it to the object store under
    /// the fixed image folder, and unlinks the temporary file once the upload has
    /// been acknowledged. A failed upload leaves the temporary file in the OS temp
    /// directory. Returns the object's durable URL.
    async fn store(
        &self,
        upload: FileUpload,
        _prefix: Option<&str>,
    ) -> Result<StoredFile, StorageError> {
        let unique_name = unique_file_name(&upload.file_name);
        let temp_path = std::env::temp_dir().join(&unique_name);
        tokio::fs::write(&temp_path, &upload.data).await?;

        let object_key = sanitize_key(&format!("{}/{}", REMOTE_IMAGE_FOLDER, unique_name));
        let body = ByteStream::from_path(&temp_path)
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(&object_key)
            .content_type(&upload.mime_type)
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        let _ = tokio::fs::remove_file(&temp_path).await;

        Ok(StoredFile::Remote(format!(
            "{}/{}/{}",
            self.endpoint, self.bucket_name, object_key
        )))
    }
}

/// unique_file_name
///
/// Builds a collision-resistant stored name: millisecond timestamp, a random UUID,
/// then the sanitized original filename. The timestamp keeps directory listings
/// roughly chronological; the UUID carries the uniqueness guarantee.
fn unique_file_name(original: &str) -> String {
    format!(
        "{}-{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple(),
        sanitize_file_name(original)
    )
}

/// sanitize_file_name
///
/// Reduces a client-supplied filename to its final path component and drops
/// control characters, preventing traversal via crafted filenames.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    if cleaned.is_empty() || cleaned == "." || cleaned == ".." {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// sanitize_key
///
/// Utility function to prevent path traversal attacks by removing directory
/// navigation components (e.g., `..`, `.`) from an object key.
fn sanitize_key(key: &str) -> String {
    key.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// strip_public_prefix
///
/// Derives the served path from a destination prefix by removing the leading
/// `/public` segment: files written under `./public/images/news` are served from
/// `/images/news`.
fn strip_public_prefix(prefix: &str) -> String {
    match prefix.strip_prefix("/public") {
        Some("") => "/".to_string(),
        Some(rest) => rest.to_string(),
        None => prefix.to_string(),
    }
}

// 4. The Mock Implementation (For Unit Tests)
/// MockStorageService
///
/// A mock implementation of `StorageService` used exclusively for unit and
/// integration testing. This lets us exercise the ingestion pipeline and upload
/// handlers without a disk or network dependency, isolating the test boundary.
#[derive(Clone)]
pub struct MockStorageService {
    /// When true, all operations return a simulated failure.
    pub should_fail: bool,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self { should_fail: false }
    }

    pub fn new_failing() -> Self {
        Self { should_fail: true }
    }
}

impl Default for MockStorageService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn prepare(&self) {
        // No-op in mock environment.
    }

    async fn store(
        &self,
        upload: FileUpload,
        _prefix: Option<&str>,
    ) -> Result<StoredFile, StorageError> {
        if self.should_fail {
            return Err(StorageError::Upload(
                "Mock Storage Error: Simulation requested".to_string(),
            ));
        }

        let sanitized_key = sanitize_key(&format!(
            "{}/{}",
            REMOTE_IMAGE_FOLDER,
            sanitize_file_name(&upload.file_name)
        ));

        // Returns a deterministic, local-style URL for mock assertions.
        Ok(StoredFile::Remote(format!(
            "http://localhost:9000/mock-bucket/{}?signature=fake",
            sanitized_key
        )))
    }
}
