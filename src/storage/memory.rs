use async_trait::async_trait;
use dashmap::DashMap;

use super::{KvEntry, KvStore, LinkRecord};
use crate::errors::Result;

/// 内存后端，键到 (主值, 镜像) 的映射
pub struct MemoryStore {
    entries: DashMap<String, StoredValue>,
}

#[derive(Clone, Debug)]
struct StoredValue {
    /// 序列化后的主值
    value: String,
    /// 镜像元数据，list 只读取这里
    metadata: LinkRecord,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            entries: DashMap::new(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<LinkRecord>> {
        match self.entries.get(key) {
            Some(stored) => {
                let record = serde_json::from_str(&stored.value)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, record: &LinkRecord) -> Result<()> {
        let value = serde_json::to_string(record)?;
        self.entries.insert(
            key.to_string(),
            StoredValue {
                value,
                metadata: record.clone(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str, limit: usize) -> Result<Vec<KvEntry>> {
        let entries = self
            .entries
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .take(limit)
            .map(|entry| KvEntry {
                name: entry.key().clone(),
                metadata: entry.value().metadata.clone(),
            })
            .collect();
        Ok(entries)
    }

    async fn backend_name(&self) -> String {
        "memory".to_string()
    }
}
