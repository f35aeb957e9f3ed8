use std::collections::HashMap;
use std::env;
use std::fs;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{KvEntry, KvStore, LinkRecord};
use crate::errors::{LinkboxError, Result};

/// 文件中持久化的单行：键、序列化主值、镜像元数据
#[derive(Serialize, Deserialize, Clone, Debug)]
struct StoredRow {
    key: String,
    value: String,
    metadata: LinkRecord,
}

pub struct FileStore {
    file_path: String,
    cache: Arc<RwLock<HashMap<String, StoredRow>>>,
}

impl FileStore {
    pub fn new() -> Result<Self> {
        let file_path = env::var("LINKS_FILE").unwrap_or_else(|_| "links.json".to_string());
        Self::with_path(file_path)
    }

    pub fn with_path(file_path: String) -> Result<Self> {
        let store = FileStore {
            file_path,
            cache: Arc::new(RwLock::new(HashMap::new())),
        };

        // 初始化时加载数据到缓存
        let rows = store.load_from_file()?;
        {
            let mut cache_guard = store.cache.write().unwrap();
            *cache_guard = rows;
            info!("FileStore 初始化完成，已加载 {} 个键", cache_guard.len());
        }

        Ok(store)
    }

    fn load_from_file(&self) -> Result<HashMap<String, StoredRow>> {
        match fs::read_to_string(&self.file_path) {
            Ok(content) => match serde_json::from_str::<Vec<StoredRow>>(&content) {
                Ok(rows) => {
                    let map = rows
                        .into_iter()
                        .map(|row| (row.key.clone(), row))
                        .collect::<HashMap<_, _>>();
                    Ok(map)
                }
                Err(e) => {
                    error!("解析链接文件失败: {}", e);
                    Err(LinkboxError::serialization(format!(
                        "解析链接文件失败: {}",
                        e
                    )))
                }
            },
            Err(_) => {
                info!("链接文件不存在，创建空的存储");
                if let Err(e) = fs::write(&self.file_path, "[]") {
                    error!("创建链接文件失败: {}", e);
                    return Err(LinkboxError::storage(format!("创建链接文件失败: {}", e)));
                }
                Ok(HashMap::new())
            }
        }
    }

    fn save_to_file(&self, rows: &HashMap<String, StoredRow>) -> Result<()> {
        let rows_vec: Vec<&StoredRow> = rows.values().collect();
        let json = serde_json::to_string_pretty(&rows_vec)?;
        fs::write(&self.file_path, json)?;
        Ok(())
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<LinkRecord>> {
        let stored = {
            let cache_guard = self.cache.read().unwrap();
            cache_guard.get(key).cloned()
        };
        match stored {
            Some(row) => {
                let record = serde_json::from_str(&row.value)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, record: &LinkRecord) -> Result<()> {
        let value = serde_json::to_string(record)?;
        {
            let mut cache_guard = self.cache.write().unwrap();
            cache_guard.insert(
                key.to_string(),
                StoredRow {
                    key: key.to_string(),
                    value,
                    metadata: record.clone(),
                },
            );
        }

        let cache_guard = self.cache.read().unwrap();
        self.save_to_file(&cache_guard)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        // 幂等：键不存在也照常成功
        let removed = {
            let mut cache_guard = self.cache.write().unwrap();
            cache_guard.remove(key).is_some()
        };

        if removed {
            let cache_guard = self.cache.read().unwrap();
            self.save_to_file(&cache_guard)?;
        }
        Ok(())
    }

    async fn list(&self, prefix: &str, limit: usize) -> Result<Vec<KvEntry>> {
        let cache_guard = self.cache.read().unwrap();
        let entries = cache_guard
            .values()
            .filter(|row| row.key.starts_with(prefix))
            .take(limit)
            .map(|row| KvEntry {
                name: row.key.clone(),
                metadata: row.metadata.clone(),
            })
            .collect();
        Ok(entries)
    }

    async fn backend_name(&self) -> String {
        "file".to_string()
    }
}
