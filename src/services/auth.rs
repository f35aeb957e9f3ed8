use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::info;

use crate::config::{Config, AUTH_COOKIE_NAME};

/// 会话 Cookie 的固定值。路由层只检查 Cookie 是否存在，
/// 不做签名校验，这是个人工具的已知取舍。
const AUTH_COOKIE_VALUE: &str = "valid_session";

/// 会话有效期 30 天
const AUTH_COOKIE_MAX_AGE_DAYS: i64 = 30;

#[derive(Deserialize, Debug)]
pub struct LoginRequest {
    pub password: String,
}

pub struct AuthService;

impl AuthService {
    pub async fn login(
        body: web::Json<LoginRequest>,
        config: web::Data<Config>,
    ) -> impl Responder {
        if body.password != config.admin_password {
            info!("Login failed: wrong password");
            return HttpResponse::Unauthorized()
                .append_header(("Content-Type", "application/json; charset=utf-8"))
                .json(serde_json::json!({ "error": "Invalid password" }));
        }

        info!("Login succeeded, issuing session cookie");

        let cookie = Cookie::build(AUTH_COOKIE_NAME, AUTH_COOKIE_VALUE)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .max_age(Duration::days(AUTH_COOKIE_MAX_AGE_DAYS))
            .finish();

        HttpResponse::Ok()
            .cookie(cookie)
            .append_header(("Content-Type", "application/json; charset=utf-8"))
            .json(serde_json::json!({ "success": true }))
    }
}
