//! 会话模块
//!
//! 全应用唯一的会话读写入口。路由守卫、导航栏和各个表单都从这里取会话，
//! 不再各自直接读 sessionStorage。路由服务通过注入的会话信号感知变化。

use clinic_shared::{STORAGE_TOKEN_KEY, STORAGE_USER_KEY, Session, UserProfile};
use leptos::prelude::*;

use crate::web::SessionStorage;

/// 会话上下文
///
/// 持有会话信号，写入时同步落盘到 sessionStorage。
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Option<Session>>,
}

impl SessionContext {
    /// 从 sessionStorage 恢复会话
    ///
    /// 只要令牌存在即视为已登录；用户资料缺失或损坏时按默认资料（普通用户）处理。
    pub fn restore() -> Self {
        Self {
            session: RwSignal::new(load_session()),
        }
    }

    /// 获取会话信号（用于路由服务注入）
    pub fn signal(&self) -> Signal<Option<Session>> {
        self.session.into()
    }

    /// 当前会话（响应式读取）
    pub fn get(&self) -> Option<Session> {
        self.session.get()
    }

    /// 当前会话（不追踪）
    pub fn get_untracked(&self) -> Option<Session> {
        self.session.get_untracked()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(|s| s.is_some())
    }

    /// 登录成功后保存会话
    pub fn sign_in(&self, session: Session) {
        SessionStorage::set(STORAGE_TOKEN_KEY, &session.token);
        SessionStorage::set_json(STORAGE_USER_KEY, &session.user);
        log::info!(
            "[Session] Signed in as {} ({})",
            session.user.email,
            session.user.role.as_str()
        );
        self.session.set(Some(session));
    }

    /// 注销并清除状态
    ///
    /// 只清本地，不调用任何接口。导航由调用方或路由服务的会话监听处理。
    pub fn sign_out(&self) {
        SessionStorage::delete(STORAGE_TOKEN_KEY);
        SessionStorage::delete(STORAGE_USER_KEY);
        self.session.set(None);
        log::info!("[Session] Signed out");
    }
}

fn load_session() -> Option<Session> {
    let token = SessionStorage::get(STORAGE_TOKEN_KEY).filter(|t| !t.is_empty())?;
    let user = SessionStorage::get_json::<UserProfile>(STORAGE_USER_KEY).unwrap_or_default();
    Some(Session { token, user })
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
