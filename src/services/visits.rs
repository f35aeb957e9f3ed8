use std::sync::Arc;

use tracing::{debug, warn};

use crate::storage::{link_key, KvStore, LinkRecord};

/// 访问计数器。跳转响应返回后在独立任务中回写计数，
/// 失败只记录日志，不重试也不影响请求方。
pub struct VisitCounter {
    store: Arc<dyn KvStore>,
}

impl VisitCounter {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        VisitCounter { store }
    }

    /// Schedule a detached visit-count update for `code`.
    ///
    /// The caller passes the record it already fetched during resolution;
    /// the task bumps `visit_count` and rewrites value and mirror in one
    /// put. Counting is best-effort: concurrent redirects on the same code
    /// may undercount (last write wins), and a failed write is logged and
    /// dropped. The redirect response never waits for this task.
    pub fn record(&self, code: String, mut record: LinkRecord) {
        let store = self.store.clone();
        tokio::spawn(async move {
            record.visit_count += 1;
            match store.put(&link_key(&code), &record).await {
                Ok(()) => debug!("Visit recorded for {}: {}", code, record.visit_count),
                Err(e) => warn!("Stats update failed for {}: {}", code, e),
            }
        });
    }
}
