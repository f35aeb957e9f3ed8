use serde::{Deserialize, Serialize};

/// 短链接记录，序列化为 camelCase 以匹配前端和持久化格式
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub original_url: String,

    #[serde(default)]
    pub note: String,

    /// 创建时间，毫秒时间戳
    #[serde(default)]
    pub created_at: i64,

    #[serde(default)]
    pub visit_count: u64,
}

impl LinkRecord {
    pub fn new(original_url: String, note: String) -> Self {
        LinkRecord {
            original_url,
            note,
            created_at: chrono::Utc::now().timestamp_millis(),
            visit_count: 0,
        }
    }
}

/// list 操作返回的条目：键名加镜像元数据，不含主值
#[derive(Clone, Debug)]
pub struct KvEntry {
    pub name: String,
    pub metadata: LinkRecord,
}
