use actix_service::{Service, Transform};
use actix_web::{
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    Error, HttpResponse,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::AUTH_COOKIE_NAME;
use crate::services::{RedirectService, VisitCounter};
use crate::storage::KvStore;

/// 前端路由保留路径，放行给 SPA 处理
const RESERVED_PATHS: [&str; 2] = ["/login", "/dashboard"];

/// 每个请求的处置结果，按优先级分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// 交给下游的静态资源 / API / 前端处理
    PassThrough,
    /// 受保护的 API 路径，先过会话检查
    ApiProtected,
    /// 候选短码，尝试解析跳转
    ShortCode(String),
}

/// Classify a request path, strictly in priority order: site root, static
/// assets and well-known root files, API (login exempt, rest gated),
/// reserved frontend routes, then everything else as a short-code candidate.
pub fn classify(path: &str) -> Disposition {
    if path == "/" {
        return Disposition::PassThrough;
    }

    if path.starts_with("/assets/") || path == "/favicon.ico" || path == "/robots.txt" {
        return Disposition::PassThrough;
    }

    if path.starts_with("/api/") {
        if path == "/api/login" {
            return Disposition::PassThrough;
        }
        return Disposition::ApiProtected;
    }

    if RESERVED_PATHS.contains(&path) {
        return Disposition::PassThrough;
    }

    // 去掉前导斜杠后的剩余部分作为候选短码
    let code = &path[1..];
    if code.is_empty() {
        return Disposition::PassThrough;
    }
    Disposition::ShortCode(code.to_string())
}

/// 请求分发中间件：每个请求的唯一入口，
/// 在路由匹配之前决定放行、鉴权拦截还是短码跳转。
pub struct LinkDispatch {
    store: Arc<dyn KvStore>,
    visits: Arc<VisitCounter>,
}

impl LinkDispatch {
    pub fn new(store: Arc<dyn KvStore>, visits: Arc<VisitCounter>) -> Self {
        LinkDispatch { store, visits }
    }
}

impl<S, B> Transform<S, ServiceRequest> for LinkDispatch
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = LinkDispatchMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(LinkDispatchMiddleware {
            service: Rc::new(service),
            store: self.store.clone(),
            visits: self.visits.clone(),
        }))
    }
}

pub struct LinkDispatchMiddleware<S> {
    service: Rc<S>,
    store: Arc<dyn KvStore>,
    visits: Arc<VisitCounter>,
}

impl<S, B> Service<ServiceRequest> for LinkDispatchMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let store = self.store.clone();
        let visits = self.visits.clone();

        Box::pin(async move {
            match classify(req.path()) {
                Disposition::PassThrough => {
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Disposition::ApiProtected => {
                    // 只检查 Cookie 是否带有会话名，不校验其内容。
                    // 个人工具的既定取舍，不是安全边界。
                    if has_session_cookie(&req) {
                        let res = srv.call(req).await?.map_into_left_body();
                        return Ok(res);
                    }

                    debug!("API request without session cookie: {}", req.path());
                    Ok(req.into_response(
                        HttpResponse::Unauthorized()
                            .append_header((
                                header::CONTENT_TYPE,
                                "application/json; charset=utf-8",
                            ))
                            .json(serde_json::json!({ "error": "Unauthorized" }))
                            .map_into_right_body(),
                    ))
                }
                Disposition::ShortCode(code) => {
                    match RedirectService::resolve(&store, &code).await {
                        Ok(Some(record)) => {
                            let response = RedirectService::redirect_response(&record);
                            // 计数回写在响应之后的独立任务中完成
                            visits.record(code, record);
                            Ok(req.into_response(response.map_into_right_body()))
                        }
                        Ok(None) => {
                            // 未命中不是错误，放行给静态 / 404 处理
                            let res = srv.call(req).await?.map_into_left_body();
                            Ok(res)
                        }
                        Err(e) => {
                            warn!("Store lookup failed for {}: {}", code, e);
                            Ok(req.into_response(
                                HttpResponse::InternalServerError()
                                    .append_header((
                                        header::CONTENT_TYPE,
                                        "application/json; charset=utf-8",
                                    ))
                                    .json(serde_json::json!({ "error": e.to_string() }))
                                    .map_into_right_body(),
                            ))
                        }
                    }
                }
            }
        })
    }
}

/// 会话 Cookie 存在性检查
fn has_session_cookie(req: &ServiceRequest) -> bool {
    req.headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|cookie| cookie.contains(&format!("{}=", AUTH_COOKIE_NAME)))
}
