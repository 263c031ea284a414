//! 角色与页面权限表
//!
//! 路由守卫和导航栏共用这一张表，避免两处各自维护角色到链接的映射。

use serde::{Deserialize, Serialize};

use crate::model::Session;

/// 用户角色
///
/// 未知的角色字符串按普通用户处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// 登录成功或越权访问时的落地页
    pub fn home(&self) -> Page {
        match self {
            Role::User => Page::Booking,
            Role::Admin => Page::AdminBookings,
        }
    }

    /// 导航栏链接
    pub fn nav_links(&self) -> &'static [NavLink] {
        match self {
            Role::User => USER_LINKS,
            Role::Admin => ADMIN_LINKS,
        }
    }
}

/// 应用内的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Register,
    /// 预约表单，挂在根路径
    Booking,
    MyAppointments,
    AdminBookings,
}

impl Page {
    /// 允许访问的角色集合，`None` 表示公开页面
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Page::Login | Page::Register => None,
            Page::Booking | Page::MyAppointments => Some(&[Role::User]),
            Page::AdminBookings => Some(&[Role::Admin]),
        }
    }

    /// 是否隐藏导航栏
    pub fn hides_navbar(&self) -> bool {
        matches!(self, Page::Login | Page::Register)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub page: Page,
}

const USER_LINKS: &[NavLink] = &[
    NavLink {
        label: "Book Appointment",
        page: Page::Booking,
    },
    NavLink {
        label: "My Appointments",
        page: Page::MyAppointments,
    },
];

const ADMIN_LINKS: &[NavLink] = &[NavLink {
    label: "All Bookings",
    page: Page::AdminBookings,
}];

/// 守卫判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(Page),
}

/// **核心守卫逻辑**
///
/// 每次导航都重新调用，不缓存结果。空令牌等同于未登录。
pub fn authorize(page: Page, session: Option<&Session>) -> Access {
    let Some(allowed) = page.allowed_roles() else {
        return Access::Granted;
    };

    let Some(session) = session.filter(|s| !s.token.is_empty()) else {
        return Access::Redirect(Page::Login);
    };

    let role = session.role();
    if allowed.contains(&role) {
        Access::Granted
    } else {
        Access::Redirect(role.home())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserProfile;

    fn session(role: Role) -> Session {
        Session {
            token: "tok".into(),
            user: UserProfile {
                id: None,
                email: "p@clinic.test".into(),
                name: "P".into(),
                role,
            },
        }
    }

    #[test]
    fn admin_on_user_page_goes_to_admin_listing() {
        let admin = session(Role::Admin);
        assert_eq!(
            authorize(Page::Booking, Some(&admin)),
            Access::Redirect(Page::AdminBookings)
        );
        assert_eq!(
            authorize(Page::MyAppointments, Some(&admin)),
            Access::Redirect(Page::AdminBookings)
        );
        assert_eq!(authorize(Page::AdminBookings, Some(&admin)), Access::Granted);
    }

    #[test]
    fn user_on_admin_page_goes_to_root() {
        let user = session(Role::User);
        assert_eq!(
            authorize(Page::AdminBookings, Some(&user)),
            Access::Redirect(Page::Booking)
        );
        assert_eq!(authorize(Page::MyAppointments, Some(&user)), Access::Granted);
        assert_eq!(authorize(Page::Booking, Some(&user)), Access::Granted);
    }

    #[test]
    fn missing_token_goes_to_login_for_every_protected_page() {
        for page in [Page::Booking, Page::MyAppointments, Page::AdminBookings] {
            assert_eq!(authorize(page, None), Access::Redirect(Page::Login));
        }

        let mut blank = session(Role::Admin);
        blank.token.clear();
        assert_eq!(
            authorize(Page::AdminBookings, Some(&blank)),
            Access::Redirect(Page::Login)
        );
    }

    #[test]
    fn public_pages_are_always_granted() {
        assert_eq!(authorize(Page::Login, None), Access::Granted);
        assert_eq!(authorize(Page::Register, Some(&session(Role::Admin))), Access::Granted);
    }

    #[test]
    fn nav_links_only_point_at_pages_the_role_may_open() {
        for role in [Role::User, Role::Admin] {
            let s = session(role);
            for link in role.nav_links() {
                assert_eq!(authorize(link.page, Some(&s)), Access::Granted, "{}", link.label);
            }
        }
    }

    #[test]
    fn role_round_trips_as_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
