//! SessionStorage 封装模块
//!
//! 使用 `web_sys::Storage` 访问当前标签页的 sessionStorage，
//! 关闭标签页即失效。

use serde::{Serialize, de::DeserializeOwned};

use crate::serde_helper;

/// 会话存储操作封装
///
/// 提供静态方法访问浏览器 sessionStorage API。
pub struct SessionStorage;

impl SessionStorage {
    /// 获取 sessionStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok()?
    }

    /// 获取存储的字符串值
    ///
    /// # 返回
    /// - `Some(String)` 如果键存在且有值
    /// - `None` 如果键不存在或发生错误
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，失败返回 `false`
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对，失败返回 `false`
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }

    /// 读取 JSON 值，键不存在或解析失败都返回 `None`
    pub fn get_json<T: DeserializeOwned>(key: &str) -> Option<T> {
        let raw = Self::get(key)?;
        match serde_helper::from_json_string(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("[Storage] 无法解析 {}: {}", key, e);
                None
            }
        }
    }

    /// 以 JSON 写入
    pub fn set_json<T: Serialize>(key: &str, value: &T) -> bool {
        match serde_helper::to_json_string(value) {
            Ok(raw) => Self::set(key, &raw),
            Err(e) => {
                log::error!("[Storage] 无法序列化 {}: {}", key, e);
                false
            }
        }
    }
}
