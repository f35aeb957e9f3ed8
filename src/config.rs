use std::env;

/// 会话 Cookie 名称，路由层只做存在性检查
pub const AUTH_COOKIE_NAME: &str = "auth_token";

// 配置结构体
#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub admin_password: String,
    pub random_code_length: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `ADMIN_PASSWORD` falls back to "admin123" for local development;
    /// set it explicitly in any real deployment.
    pub fn from_env() -> Self {
        Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
            random_code_length: env::var("RANDOM_CODE_LENGTH")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
        }
    }
}
