use std::fmt;

use serde::Deserialize;

// =========================================================
// 错误分类
// =========================================================

/// 接口调用失败的分类
///
/// 由 HTTP 状态码（或没有响应）决定，决定展示给用户的提示。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 400: 服务端拒绝了输入
    BadRequest,
    /// 401: 令牌失效，需要重新登录
    Unauthorized,
    /// 500: 服务端故障
    Server,
    /// 没有收到响应（网络中断、CORS、请求构建失败）
    Network,
    /// 其它状态码
    Unexpected(u16),
    /// 响应体无法解析
    Decode,
}

impl ApiErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiErrorKind::BadRequest,
            401 => ApiErrorKind::Unauthorized,
            500 => ApiErrorKind::Server,
            other => ApiErrorKind::Unexpected(other),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::BadRequest => "BAD_REQUEST",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Server => "SERVER_ERROR",
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Unexpected(_) => "UNEXPECTED_STATUS",
            ApiErrorKind::Decode => "DECODE_ERROR",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

/// 服务端错误体中我们关心的字段
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// 服务端或传输层给出的原始信息
    pub message: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: Option<String>) -> Self {
        Self { kind, message }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, Some(message.into()))
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, Some(message.into()))
    }

    /// 根据状态码和响应体构造错误，响应体里的 `message` 字段会被保留
    pub fn from_response(status: u16, body: Option<ErrorBody>) -> Self {
        let message = body
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        Self::new(ApiErrorKind::from_status(status), message)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// 展示给用户的提示
    ///
    /// `fallback` 是各操作自己的重试提示，用于无法归类的失败。
    pub fn user_message(&self, fallback: &str) -> String {
        match self.kind {
            ApiErrorKind::BadRequest => self
                .message
                .clone()
                .unwrap_or_else(|| "Bad request - please check your input".to_string()),
            ApiErrorKind::Unauthorized => "Please login again".to_string(),
            ApiErrorKind::Server => "Server error - please try again later".to_string(),
            ApiErrorKind::Network | ApiErrorKind::Unexpected(_) | ApiErrorKind::Decode => {
                fallback.to_string()
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.kind.error_code())?;
        if let ApiErrorKind::Unexpected(status) = self.kind {
            write!(f, " status {}", status)?;
        }
        if let Some(message) = &self.message {
            write!(f, " {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
