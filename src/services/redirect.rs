use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::debug;

use crate::storage::{link_key, KvStore, LinkRecord};

pub struct RedirectService;

impl RedirectService {
    /// 查找短码记录。未命中不是错误，由调用方放行给静态/404 处理。
    pub async fn resolve(
        store: &Arc<dyn KvStore>,
        code: &str,
    ) -> crate::errors::Result<Option<LinkRecord>> {
        let record = store.get(&link_key(code)).await?;
        if record.is_none() {
            debug!("Redirect link not found: {}", code);
        }
        Ok(record)
    }

    /// 302 Found 跳转响应
    pub fn redirect_response(record: &LinkRecord) -> HttpResponse {
        HttpResponse::Found()
            .insert_header(("Location", record.original_url.as_str()))
            .finish()
    }
}
