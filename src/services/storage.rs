//! Image storage service
//!
//! Uploads admin images to an object-storage bucket under collision-resistant
//! names and resolves their public URLs. The hosted bucket speaks the Supabase
//! storage HTTP API; an in-process bucket backs tests.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use async_trait::async_trait;
use chrono::Utc;
use futures::future::try_join_all;
use rand::distributions::Alphanumeric;
use rand::Rng;
use regex::Regex;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;
use crate::config::StorageConfig;
use crate::utils::errors::{StorageError, StorageResult};
use crate::utils::logging::log_storage_operation;

/// Folder used when the caller does not name one
pub const DEFAULT_FOLDER: &str = "general";

const OBJECT_PREFIX: &str = "/storage/v1/object";
const RANDOM_SUFFIX_LEN: usize = 6;

/// An image selected for upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Object-storage bucket boundary
#[async_trait]
pub trait Bucket: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Store `bytes` at `path`; an existing object at that path is an error
    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StorageResult<()>;

    async fn remove(&self, paths: &[String]) -> StorageResult<()>;

    fn public_url(&self, path: &str) -> String;
}

/// Bucket reached over the hosted storage HTTP API
#[derive(Debug, Clone)]
pub struct SupabaseBucket {
    client: Client,
    base_url: String,
    api_key: String,
    bucket: String,
    cache_control_seconds: u64,
}

#[derive(Serialize)]
struct RemoveRequest<'a> {
    prefixes: &'a [String],
}

impl SupabaseBucket {
    pub fn new(config: &StorageConfig) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("DealerDesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
            cache_control_seconds: config.cache_control_seconds,
        })
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}{}/{}/{}", self.base_url, OBJECT_PREFIX, self.bucket, encode_path(path))
    }
}

#[async_trait]
impl Bucket for SupabaseBucket {
    fn name(&self) -> &str {
        &self.bucket
    }

    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StorageResult<()> {
        let response = self
            .client
            .post(self.object_url(path))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("cache-control", format!("max-age={}", self.cache_control_seconds))
            .header("x-upsert", "false")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StorageError::UploadFailed {
                path: path.to_string(),
                message: format!("HTTP {}: {}", status, error_text),
            });
        }

        Ok(())
    }

    async fn remove(&self, paths: &[String]) -> StorageResult<()> {
        let response = self
            .client
            .delete(format!("{}{}/{}", self.base_url, OBJECT_PREFIX, self.bucket))
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .json(&RemoveRequest { prefixes: paths })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StorageError::RemoveFailed {
                path: paths.join(", "),
                message: format!("HTTP {}: {}", status, error_text),
            });
        }

        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url(&self.base_url, &self.bucket, path)
    }
}

/// In-process bucket
#[derive(Debug, Clone)]
pub struct MemoryBucket {
    base_url: String,
    bucket: String,
    objects: Arc<Mutex<BTreeMap<String, StoredObject>>>,
    failing_names: Arc<Mutex<Vec<String>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MemoryBucket {
    pub fn new(base_url: &str, bucket: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            objects: Arc::default(),
            failing_names: Arc::default(),
        }
    }

    /// Fail uploads whose path contains `fragment`
    pub async fn fail_uploads_containing(&self, fragment: &str) {
        self.failing_names.lock().await.push(fragment.to_string());
    }

    pub async fn paths(&self) -> Vec<String> {
        self.objects.lock().await.keys().cloned().collect()
    }

    pub async fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.lock().await.get(path).cloned()
    }
}

impl Default for MemoryBucket {
    fn default() -> Self {
        Self::new("http://localhost:54321", "images")
    }
}

#[async_trait]
impl Bucket for MemoryBucket {
    fn name(&self) -> &str {
        &self.bucket
    }

    async fn put(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StorageResult<()> {
        if self.failing_names.lock().await.iter().any(|f| path.contains(f.as_str())) {
            return Err(StorageError::UploadFailed {
                path: path.to_string(),
                message: "rejected by bucket".to_string(),
            });
        }

        let mut objects = self.objects.lock().await;
        if objects.contains_key(path) {
            return Err(StorageError::UploadFailed {
                path: path.to_string(),
                message: "The resource already exists".to_string(),
            });
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        Ok(())
    }

    async fn remove(&self, paths: &[String]) -> StorageResult<()> {
        let mut objects = self.objects.lock().await;
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        public_object_url(&self.base_url, &self.bucket, path)
    }
}

/// Image upload and removal on top of a [`Bucket`]
#[derive(Debug, Clone)]
pub struct ImageStorage {
    bucket: Arc<dyn Bucket>,
}

impl ImageStorage {
    pub fn new(bucket: Arc<dyn Bucket>) -> Self {
        Self { bucket }
    }

    pub fn bucket(&self) -> &Arc<dyn Bucket> {
        &self.bucket
    }

    /// Upload one image and return its public URL
    pub async fn upload_image(&self, file: &ImageFile, folder: Option<&str>) -> StorageResult<String> {
        let path = object_path(folder.unwrap_or(DEFAULT_FOLDER), &file.name);
        let size = file.bytes.len();

        self.bucket
            .put(&path, file.bytes.clone(), &file.content_type)
            .await?;
        log_storage_operation("upload", &path, Some(size));

        Ok(self.bucket.public_url(&path))
    }

    /// Upload every file concurrently
    ///
    /// URLs come back in input order. The first failure fails the call; uploads
    /// that already finished stay in the bucket.
    pub async fn upload_images(&self, files: &[ImageFile], folder: Option<&str>) -> StorageResult<Vec<String>> {
        let urls = try_join_all(files.iter().map(|file| self.upload_image(file, folder))).await?;
        info!(count = urls.len(), "Uploaded images");
        Ok(urls)
    }

    /// Remove the object behind a public URL of this bucket
    ///
    /// URLs that do not point into the bucket are ignored.
    pub async fn delete_image(&self, url: &str) -> StorageResult<()> {
        let Some(path) = object_path_from_url(url, self.bucket.name()) else {
            debug!(url = %url, "Not a public URL of this bucket, nothing to delete");
            return Ok(());
        };

        self.bucket.remove(std::slice::from_ref(&path)).await?;
        log_storage_operation("remove", &path, None);
        Ok(())
    }
}

/// `{folder}/{unix_millis}_{random}_{sanitized_name}`
///
/// A folder that is empty once its slashes are trimmed becomes [`DEFAULT_FOLDER`].
pub fn object_path(folder: &str, file_name: &str) -> String {
    let folder = match folder.trim_matches('/') {
        "" => DEFAULT_FOLDER,
        trimmed => trimmed,
    };
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();

    format!(
        "{}/{}_{}_{}",
        folder,
        Utc::now().timestamp_millis(),
        suffix,
        sanitize_file_name(file_name)
    )
}

/// Replace every character outside `[A-Za-z0-9.-]` with `_`
pub fn sanitize_file_name(name: &str) -> String {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9.-]").expect("file name pattern is valid"));
    pattern.replace_all(name, "_").into_owned()
}

fn public_object_url(base_url: &str, bucket: &str, path: &str) -> String {
    format!("{}{}/public/{}/{}", base_url, OBJECT_PREFIX, bucket, encode_path(path))
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn object_path_from_url(url: &str, bucket: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let marker = format!("{}/public/{}/", OBJECT_PREFIX, bucket);
    let (_, encoded) = parsed.path().split_once(&marker)?;
    let path = urlencoding::decode(encoded).ok()?.into_owned();
    (!path.is_empty()).then_some(path)
}
