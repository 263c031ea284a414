//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 权限判定委托给 `clinic_shared::access`，这里只负责路径与页面的映射。

use std::fmt::Display;

use clinic_shared::{Access, Page, Session, authorize};

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    Register,
    /// 预约表单 (根路径，仅普通用户)
    Booking,
    /// 我的预约 (仅普通用户)
    MyAppointments,
    /// 全部预约 (仅管理员)
    AdminBookings,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        match path {
            "/" | "/book-appointment" => Self::Booking,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/my-appointments" => Self::MyAppointments,
            "/admin/allbookings" | "/admin/bookings" => Self::AdminBookings,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Booking => "/",
            Self::MyAppointments => "/my-appointments",
            Self::AdminBookings => "/admin/allbookings",
            Self::NotFound => "/404",
        }
    }

    pub fn page(&self) -> Option<Page> {
        match self {
            Self::Login => Some(Page::Login),
            Self::Register => Some(Page::Register),
            Self::Booking => Some(Page::Booking),
            Self::MyAppointments => Some(Page::MyAppointments),
            Self::AdminBookings => Some(Page::AdminBookings),
            Self::NotFound => None,
        }
    }

    /// **核心守卫逻辑**
    ///
    /// 返回 `Some(重定向目标)` 表示当前会话不能进入此路由。
    pub fn guard(&self, session: Option<&Session>) -> Option<AppRoute> {
        let page = self.page()?;
        match authorize(page, session) {
            Access::Granted => None,
            Access::Redirect(target) => Some(target.into()),
        }
    }

    pub fn shows_navbar(&self) -> bool {
        !self.page().is_some_and(|p| p.hides_navbar())
    }
}

impl From<Page> for AppRoute {
    fn from(page: Page) -> Self {
        match page {
            Page::Login => Self::Login,
            Page::Register => Self::Register,
            Page::Booking => Self::Booking,
            Page::MyAppointments => Self::MyAppointments,
            Page::AdminBookings => Self::AdminBookings,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_shared::{Role, UserProfile};

    fn session(role: Role) -> Session {
        Session {
            token: "tok".into(),
            user: UserProfile {
                role,
                ..Default::default()
            },
        }
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Booking,
            AppRoute::MyAppointments,
            AppRoute::AdminBookings,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/admin/bookings"), AppRoute::AdminBookings);
        assert_eq!(AppRoute::from_path("/my-appointments/"), AppRoute::MyAppointments);
        assert_eq!(AppRoute::from_path("/admin/slots"), AppRoute::NotFound);
    }

    #[test]
    fn root_uses_the_same_guard_as_other_pages() {
        assert_eq!(AppRoute::Booking.guard(None), Some(AppRoute::Login));
        assert_eq!(
            AppRoute::Booking.guard(Some(&session(Role::Admin))),
            Some(AppRoute::AdminBookings)
        );
        assert_eq!(AppRoute::Booking.guard(Some(&session(Role::User))), None);
        assert_eq!(
            AppRoute::AdminBookings.guard(Some(&session(Role::User))),
            Some(AppRoute::Booking)
        );
        assert_eq!(AppRoute::NotFound.guard(None), None);
    }

    #[test]
    fn navbar_hidden_only_on_auth_pages() {
        assert!(!AppRoute::Login.shows_navbar());
        assert!(!AppRoute::Register.shows_navbar());
        assert!(AppRoute::Booking.shows_navbar());
        assert!(AppRoute::NotFound.shows_navbar());
    }
}
