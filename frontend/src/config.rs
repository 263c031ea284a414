//! 运行时配置
//!
//! 启动时解析一次，之后通过 Context 注入。
//! 取值来自构建时环境变量，未设置则使用默认常量。

use std::time::Duration;

use leptos::prelude::*;

/// 这些是默认值，构建时没有设置对应环境变量则使用这些值
const DEFAULT_API_BASE_URL: &str = "https://appoint-kjul.onrender.com";
const DEFAULT_TOAST_MS: u64 = 3000;
const DEFAULT_LOG_LEVEL: log::Level = log::Level::Info;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// 远端 API 的唯一地址（注册接口也使用它）
    pub api_base_url: String,
    /// 通知自动消失的时间
    pub toast_duration: Duration,
    pub log_level: log::Level,
}

impl AppConfig {
    /// 读取构建时注入的 `CLINIC_*` 变量
    pub fn from_env() -> Self {
        Self::resolve(
            option_env!("CLINIC_API_BASE_URL"),
            option_env!("CLINIC_TOAST_MS"),
            option_env!("CLINIC_LOG_LEVEL"),
        )
    }

    fn resolve(base_url: Option<&str>, toast_ms: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let toast_duration = Duration::from_millis(
            toast_ms
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_TOAST_MS),
        );

        let log_level = log_level
            .and_then(|v| v.trim().parse::<log::Level>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            api_base_url,
            toast_duration,
            log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

/// 从 Context 获取配置
pub fn use_config() -> AppConfig {
    use_context::<AppConfig>().expect("AppConfig should be provided")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.toast_duration, Duration::from_millis(3000));
        assert_eq!(config.log_level, log::Level::Info);
    }

    #[test]
    fn overrides_are_trimmed_and_parsed() {
        let config = AppConfig::resolve(Some(" http://localhost:5000/ "), Some("1500"), Some("debug"));
        assert_eq!(config.api_base_url, "http://localhost:5000");
        assert_eq!(config.toast_duration, Duration::from_millis(1500));
        assert_eq!(config.log_level, log::Level::Debug);
    }

    #[test]
    fn invalid_overrides_fall_back() {
        let config = AppConfig::resolve(Some(""), Some("soon"), Some("loud"));
        assert_eq!(config, AppConfig::default());
    }
}
