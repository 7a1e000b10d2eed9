use std::collections::HashMap;
use std::str::FromStr;

use futures::stream::TryStreamExt;
use opendal::Operator;

use crate::error::{Error, Result};

pub mod constants;
pub mod path;
pub mod types;

use self::constants::{BYTES_USED_HEADER, OBJECT_COUNT_HEADER};
use self::types::{Container, ContainerObject};

/// Storage provider types
#[derive(Debug, Clone, Copy)]
pub enum StorageProvider {
    Oss,
    S3,
    Fs,
}

impl FromStr for StorageProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "oss" => Ok(Self::Oss),
            "s3" | "minio" => Ok(Self::S3),
            "fs" => Ok(Self::Fs),
            _ => Err(Error::UnsupportedProvider {
                provider: s.to_string(),
            }),
        }
    }
}

/// Unified storage configuration for different providers
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub provider: StorageProvider,
    pub bucket: String,
    pub access_key_id: Option<String>,
    pub access_key_secret: Option<String>,
    pub endpoint: Option<String>,
    pub region: Option<String>,
    pub root_path: Option<String>,
}

impl StorageConfig {
    pub fn oss(
        bucket: String,
        access_key_id: String,
        access_key_secret: String,
        region: Option<String>,
    ) -> Self {
        Self {
            provider: StorageProvider::Oss,
            bucket,
            access_key_id: Some(access_key_id),
            access_key_secret: Some(access_key_secret),
            endpoint: None,
            region,
            root_path: None,
        }
    }

    pub fn s3(
        bucket: String,
        access_key_id: String,
        secret_access_key: String,
        region: Option<String>,
    ) -> Self {
        Self {
            provider: StorageProvider::S3,
            bucket,
            access_key_id: Some(access_key_id),
            access_key_secret: Some(secret_access_key),
            endpoint: None,
            region,
            root_path: None,
        }
    }

    pub fn fs(root_path: String) -> Self {
        Self {
            provider: StorageProvider::Fs,
            bucket: "local".to_string(),
            access_key_id: None,
            access_key_secret: None,
            endpoint: None,
            region: None,
            root_path: Some(root_path),
        }
    }
}

/// Remote object-store operations needed by the tree and the purge coordinator.
///
/// All methods are plain request/response; no call ever returns a "null"
/// listing — an empty `Vec` always means the container really has no objects.
pub trait StoreClient {
    /// Enumerate the containers visible in the account.
    fn list_containers(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Container>>> + Send;

    /// Fetch container header metadata. The object count, when the backend
    /// reports one, is stored under [`OBJECT_COUNT_HEADER`].
    async fn container_headers(&self, container: &str) -> Result<HashMap<String, String>>;

    /// List objects currently in a container, up to `limit` when given.
    /// Ordering is store-defined.
    fn list_objects(
        &self,
        container: &str,
        limit: Option<usize>,
    ) -> impl std::future::Future<Output = Result<Vec<ContainerObject>>> + Send;

    /// Delete a single object.
    async fn delete_object(&self, container: &str, object: &str) -> Result<()>;

    /// Delete a container that holds no more objects.
    async fn delete_container(&self, container: &str) -> Result<()>;
}

/// Unified store client using OpenDAL. Containers map to top-level
/// directories under the operator root.
#[derive(Clone)]
pub struct OpenDalStore {
    operator: Operator,
    provider: StorageProvider,
}

impl OpenDalStore {
    pub async fn new(config: StorageConfig) -> Result<Self> {
        let operator = Self::build_operator(&config)?;
        Ok(Self {
            operator,
            provider: config.provider,
        })
    }

    pub fn provider(&self) -> StorageProvider {
        self.provider
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    fn build_operator(config: &StorageConfig) -> Result<Operator> {
        match &config.provider {
            StorageProvider::Oss => {
                #[cfg(feature = "oss")]
                {
                    let mut builder = opendal::services::Oss::default().bucket(&config.bucket);
                    if let Some(access_key_id) = &config.access_key_id {
                        builder = builder.access_key_id(access_key_id);
                    }
                    if let Some(access_key_secret) = &config.access_key_secret {
                        builder = builder.access_key_secret(access_key_secret);
                    }
                    if let Some(endpoint) = &config.endpoint {
                        builder = builder.endpoint(endpoint);
                    }
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "oss"))]
                {
                    Err(Error::UnsupportedProvider {
                        provider: "oss (feature disabled)".to_string(),
                    })
                }
            }
            StorageProvider::S3 => {
                #[cfg(feature = "s3")]
                {
                    let mut builder = opendal::services::S3::default().bucket(&config.bucket);
                    if let Some(access_key_id) = &config.access_key_id {
                        builder = builder.access_key_id(access_key_id);
                    }
                    if let Some(secret_access_key) = &config.access_key_secret {
                        builder = builder.secret_access_key(secret_access_key);
                    }
                    if let Some(region) = &config.region {
                        builder = builder.region(region);
                    }
                    if let Some(endpoint) = &config.endpoint {
                        builder = builder.endpoint(endpoint);
                    }
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "s3"))]
                {
                    Err(Error::UnsupportedProvider {
                        provider: "s3 (feature disabled)".to_string(),
                    })
                }
            }
            StorageProvider::Fs => {
                #[cfg(feature = "fs")]
                {
                    let root = config.root_path.as_deref().unwrap_or("./");
                    let builder = opendal::services::Fs::default().root(root);
                    Ok(Operator::new(builder)?.finish())
                }

                #[cfg(not(feature = "fs"))]
                {
                    Err(Error::UnsupportedProvider {
                        provider: "fs (feature disabled)".to_string(),
                    })
                }
            }
        }
    }

    /// Walk a container recursively and total up its object bytes and count.
    async fn container_usage(&self, container: &str) -> Result<(u64, u64)> {
        let dir = path::container_dir(container);
        let mut lister = self.operator.lister_with(&dir).recursive(true).await?;

        let mut bytes = 0u64;
        let mut count = 0u64;
        while let Some(entry) = lister.try_next().await? {
            let meta = entry.metadata();
            if meta.mode().is_dir() {
                continue;
            }
            bytes += meta.content_length();
            count += 1;
        }
        Ok((bytes, count))
    }
}

impl StoreClient for OpenDalStore {
    async fn list_containers(&self) -> Result<Vec<Container>> {
        log::debug!("list_containers provider={:?}", self.provider);
        let entries = self.operator.list("/").await?;

        let mut containers = Vec::new();
        for entry in entries {
            if !entry.metadata().mode().is_dir() {
                continue;
            }
            let name = entry.name().trim_end_matches('/').to_string();
            if name.is_empty() {
                // the listing may include the root itself
                continue;
            }
            let (bytes, count) = self.container_usage(&name).await?;
            containers.push(Container { name, bytes, count });
        }
        Ok(containers)
    }

    async fn container_headers(&self, container: &str) -> Result<HashMap<String, String>> {
        log::debug!(
            "container_headers provider={:?} container={}",
            self.provider,
            container
        );
        let (bytes, count) = self.container_usage(container).await?;

        let mut headers = HashMap::new();
        headers.insert(OBJECT_COUNT_HEADER.to_string(), count.to_string());
        headers.insert(BYTES_USED_HEADER.to_string(), bytes.to_string());
        Ok(headers)
    }

    async fn list_objects(
        &self,
        container: &str,
        limit: Option<usize>,
    ) -> Result<Vec<ContainerObject>> {
        log::debug!(
            "list_objects provider={:?} container={} limit={:?}",
            self.provider,
            container,
            limit
        );
        let dir = path::container_dir(container);
        let mut lister = self.operator.lister_with(&dir).recursive(true).await?;

        let mut objects = Vec::new();
        while let Some(entry) = lister.try_next().await? {
            let meta = entry.metadata();
            if meta.mode().is_dir() {
                continue;
            }
            objects.push(ContainerObject {
                name: path::object_name(entry.path(), container),
                bytes: meta.content_length(),
            });
            if limit.is_some_and(|l| objects.len() >= l) {
                break;
            }
        }
        Ok(objects)
    }

    async fn delete_object(&self, container: &str, object: &str) -> Result<()> {
        log::debug!(
            "delete_object provider={:?} container={} object={}",
            self.provider,
            container,
            object
        );
        let full = path::object_path(container, object);
        self.operator.delete(&full).await?;
        Ok(())
    }

    async fn delete_container(&self, container: &str) -> Result<()> {
        log::debug!(
            "delete_container provider={:?} container={}",
            self.provider,
            container
        );
        // remove_all rather than a plain delete: directory-backed stores can
        // keep empty prefixes around after the last object is gone.
        let dir = path::container_dir(container);
        self.operator.remove_all(&dir).await?;
        Ok(())
    }
}
