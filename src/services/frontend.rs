use actix_web::{HttpRequest, HttpResponse, Responder};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use tracing::debug;

pub struct FrontendService;

// 静态文件映射表，编译时嵌入
static STATIC_FILES: Lazy<HashMap<&'static str, &'static [u8]>> = Lazy::new(|| {
    let mut files: HashMap<&'static str, &'static [u8]> = HashMap::new();
    files.insert(
        "index.html",
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/web/dist/index.html")),
    );
    files.insert(
        "robots.txt",
        include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/web/dist/robots.txt")),
    );
    files.insert(
        "assets/app.js",
        include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/web/dist/assets/app.js"
        )),
    );
    files.insert(
        "assets/app.css",
        include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/web/dist/assets/app.css"
        )),
    );
    files
});

impl FrontendService {
    /// 首页和前端保留路由（/login、/dashboard）都返回 SPA 壳
    pub async fn handle_index() -> impl Responder {
        debug!("Serving frontend index page");
        match STATIC_FILES.get("index.html") {
            Some(content) => HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(*content),
            None => Self::not_found_response(),
        }
    }

    /// 处理静态资源文件
    pub async fn handle_static(req: HttpRequest) -> impl Responder {
        let path = req.match_info().query("path");
        debug!("Serving static file: {}", path);

        // 根据文件扩展名确定 Content-Type
        let content_type = match path.rsplit('.').next() {
            Some("css") => "text/css",
            Some("js") => "application/javascript",
            Some("json") => "application/json",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("svg") => "image/svg+xml",
            Some("ico") => "image/x-icon",
            Some("woff") | Some("woff2") => "font/woff2",
            _ => "application/octet-stream",
        };

        match STATIC_FILES.get(format!("assets/{}", path).as_str()) {
            Some(content) => HttpResponse::Ok().content_type(content_type).body(*content),
            None => Self::not_found_response(),
        }
    }

    pub async fn handle_robots() -> impl Responder {
        match STATIC_FILES.get("robots.txt") {
            Some(content) => HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(*content),
            None => Self::not_found_response(),
        }
    }

    /// 未匹配任何路由时的兜底 404
    pub async fn handle_not_found() -> impl Responder {
        Self::not_found_response()
    }

    fn not_found_response() -> HttpResponse {
        HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body("Not Found")
    }
}
