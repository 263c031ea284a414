//! 诊所预约客户端的共享领域层
//!
//! 纯逻辑，不依赖 DOM 或 web_sys，可在宿主机上直接 `cargo test`：
//! - `model`: 传输模型（会话、预约、时段）
//! - `protocol`: 接口定义（路径、方法、鉴权）
//! - `validation`: 表单校验规则
//! - `access`: 角色与路由权限表
//! - `booking`: 预约列表的投影与筛选
//! - `error`: 接口错误分类

pub mod access;
pub mod booking;
pub mod date;
pub mod error;
pub mod model;
pub mod protocol;
pub mod validation;

pub use access::{Access, NavLink, Page, Role, authorize};
pub use error::{ApiError, ApiErrorKind};
pub use model::{Booking, BookingOwner, Session, SlotMap, SlotStatus, UserProfile};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// sessionStorage 中保存令牌的键
pub const STORAGE_TOKEN_KEY: &str = "token";
/// sessionStorage 中保存用户资料的键
pub const STORAGE_USER_KEY: &str = "user";
/// Bearer 鉴权头
pub const HEADER_AUTHORIZATION: &str = "Authorization";
