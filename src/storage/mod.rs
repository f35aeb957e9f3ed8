use std::env;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

pub mod file;
pub mod memory;
mod models;

pub use models::{KvEntry, LinkRecord};

/// 链接键的命名空间前缀
pub const LINK_KEY_PREFIX: &str = "url:";

pub fn link_key(code: &str) -> String {
    format!("{}{}", LINK_KEY_PREFIX, code)
}

/// 从键名还原短码
pub fn strip_link_key(key: &str) -> &str {
    key.strip_prefix(LINK_KEY_PREFIX).unwrap_or(key)
}

/// Key-value store adapter.
///
/// Wraps an external flat key-value service. Every `put` writes the
/// serialized record as the primary value AND a metadata mirror of the same
/// record in a single call; `list` reads only the mirrors, so bulk listing
/// never touches primary values. The store provides no transactions and no
/// ordering guarantees across concurrent writers (last write wins).
#[async_trait]
pub trait KvStore: Send + Sync {
    /// 读取主值并反序列化，未命中返回 None
    async fn get(&self, key: &str) -> Result<Option<LinkRecord>>;

    /// 同一次调用写入主值和镜像元数据
    async fn put(&self, key: &str, record: &LinkRecord) -> Result<()>;

    /// 幂等删除，键不存在也算成功
    async fn delete(&self, key: &str) -> Result<()>;

    /// 按前缀列出键名和镜像元数据，至多 limit 条
    async fn list(&self, prefix: &str, limit: usize) -> Result<Vec<KvEntry>>;

    async fn backend_name(&self) -> String;
}

pub struct StoreFactory;

impl StoreFactory {
    pub async fn create() -> Result<Arc<dyn KvStore>> {
        let backend = env::var("STORAGE_BACKEND").unwrap_or_else(|_| "file".into());

        let boxed: Box<dyn KvStore> = match backend.as_str() {
            "memory" => Box::new(memory::MemoryStore::new()),
            _ => Box::new(file::FileStore::new()?),
        };

        Ok(Arc::from(boxed))
    }
}
