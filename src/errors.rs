use std::fmt;

#[derive(Debug, Clone)]
pub enum LinkboxError {
    Validation(String),
    Conflict(String),
    Unauthorized(String),
    NotFound(String),
    Serialization(String),
    Storage(String),
}

impl LinkboxError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LinkboxError::Validation(_) => "E001",
            LinkboxError::Conflict(_) => "E002",
            LinkboxError::Unauthorized(_) => "E003",
            LinkboxError::NotFound(_) => "E004",
            LinkboxError::Serialization(_) => "E005",
            LinkboxError::Storage(_) => "E006",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LinkboxError::Validation(_) => "Validation Error",
            LinkboxError::Conflict(_) => "Conflict Error",
            LinkboxError::Unauthorized(_) => "Unauthorized",
            LinkboxError::NotFound(_) => "Resource Not Found",
            LinkboxError::Serialization(_) => "Serialization Error",
            LinkboxError::Storage(_) => "Storage Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            LinkboxError::Validation(msg) => msg,
            LinkboxError::Conflict(msg) => msg,
            LinkboxError::Unauthorized(msg) => msg,
            LinkboxError::NotFound(msg) => msg,
            LinkboxError::Serialization(msg) => msg,
            LinkboxError::Storage(msg) => msg,
        }
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LinkboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LinkboxError {}

// 便捷的构造函数
impl LinkboxError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LinkboxError::Validation(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        LinkboxError::Conflict(msg.into())
    }

    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        LinkboxError::Unauthorized(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        LinkboxError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LinkboxError::Serialization(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        LinkboxError::Storage(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for LinkboxError {
    fn from(err: std::io::Error) -> Self {
        LinkboxError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for LinkboxError {
    fn from(err: serde_json::Error) -> Self {
        LinkboxError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LinkboxError>;
