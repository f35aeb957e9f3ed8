use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::storage::{link_key, strip_link_key, KvStore, LinkRecord, LINK_KEY_PREFIX};
use crate::utils::generate_random_code;

/// 单次 list 的上限，个人工具不分页
const LIST_LIMIT: usize = 1000;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostNewLink {
    pub url: Option<String>,
    pub short_code: Option<String>,
    pub note: Option<String>,
}

/// PUT 是整体替换：未提供的字段取默认值，而不是保留旧值
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PutLink {
    pub original_url: String,
    pub note: Option<String>,
    pub visit_count: Option<u64>,
    pub created_at: Option<i64>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LinkEntry {
    pub short_code: String,
    #[serde(flatten)]
    pub record: LinkRecord,
}

pub struct AdminService;

impl AdminService {
    pub async fn get_all_links(store: web::Data<Arc<dyn KvStore>>) -> impl Responder {
        info!("Admin API: request to list links");

        let entries = match store.list(LINK_KEY_PREFIX, LIST_LIMIT).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Admin API: failed to list links: {}", e);
                return HttpResponse::InternalServerError()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({ "error": e.to_string() }));
            }
        };

        let mut links: Vec<LinkEntry> = entries
            .into_iter()
            .map(|entry| LinkEntry {
                short_code: strip_link_key(&entry.name).to_string(),
                record: entry.metadata,
            })
            .collect();

        // 按创建时间降序排序（最新的在前），缺失的时间戳按 0 处理
        links.sort_by(|a, b| b.record.created_at.cmp(&a.record.created_at));

        info!("Admin API: returning {} links", links.len());

        HttpResponse::Ok()
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(links)
    }

    pub async fn post_link(
        link: web::Json<PostNewLink>,
        store: web::Data<Arc<dyn KvStore>>,
        config: web::Data<Config>,
    ) -> impl Responder {
        let url = match link.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => {
                info!("Admin API: create request rejected, missing url");
                return HttpResponse::BadRequest()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({ "error": "Missing URL" }));
            }
        };

        // 显式短码要求严格唯一；生成的短码碰撞时只重试一次
        let explicit = link
            .short_code
            .as_deref()
            .filter(|code| !code.is_empty())
            .map(|code| code.to_string());

        let mut code = match &explicit {
            Some(code) => code.clone(),
            None => {
                debug!("Admin API: no code provided, generating a new one");
                generate_random_code(config.random_code_length)
            }
        };

        match store.get(&link_key(&code)).await {
            Ok(Some(_)) if explicit.is_some() => {
                info!("Admin API: short code already exists - {}", code);
                return HttpResponse::Conflict()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({ "error": "Short code already exists" }));
            }
            Ok(Some(_)) => {
                // 随机碰撞，换一个就继续，残余概率可接受
                code = generate_random_code(config.random_code_length);
            }
            Ok(None) => {}
            Err(e) => {
                error!("Admin API: collision check failed - {}: {}", code, e);
                return HttpResponse::InternalServerError()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({ "error": e.to_string() }));
            }
        }

        let record = LinkRecord::new(url, link.note.clone().unwrap_or_default());

        match store.put(&link_key(&code), &record).await {
            Ok(()) => {
                info!("Admin API: link created - {} -> {}", code, record.original_url);
                HttpResponse::Ok()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({
                        "success": true,
                        "code": code,
                        "data": record,
                    }))
            }
            Err(e) => {
                error!("Admin API: failed to create link - {}: {}", code, e);
                HttpResponse::InternalServerError()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({ "error": e.to_string() }))
            }
        }
    }

    pub async fn update_link(
        code: web::Path<String>,
        link: web::Json<PutLink>,
        store: web::Data<Arc<dyn KvStore>>,
    ) -> impl Responder {
        info!(
            "Admin API: update link request - code: {}, target: {}",
            code, link.original_url
        );

        let record = LinkRecord {
            original_url: link.original_url.clone(),
            note: link.note.clone().unwrap_or_default(),
            visit_count: link.visit_count.unwrap_or(0),
            created_at: link
                .created_at
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
        };

        match store.put(&link_key(&code), &record).await {
            Ok(()) => {
                info!("Admin API: link updated - {}", code);
                HttpResponse::Ok()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({ "success": true, "data": record }))
            }
            Err(e) => {
                error!("Admin API: failed to update link - {}: {}", code, e);
                HttpResponse::InternalServerError()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({ "error": e.to_string() }))
            }
        }
    }

    pub async fn delete_link(
        code: web::Path<String>,
        store: web::Data<Arc<dyn KvStore>>,
    ) -> impl Responder {
        info!("Admin API: delete link request - code: {}", code);

        // 删除是幂等的，不存在的短码也返回成功
        match store.delete(&link_key(&code)).await {
            Ok(()) => {
                info!("Admin API: link deleted - {}", code);
                HttpResponse::Ok()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({ "deleted": true }))
            }
            Err(e) => {
                error!("Admin API: failed to delete link - {}: {}", code, e);
                HttpResponse::InternalServerError()
                    .append_header(("Content-Type", "application/json; charset=utf-8"))
                    .json(serde_json::json!({ "error": e.to_string() }))
            }
        }
    }
}
