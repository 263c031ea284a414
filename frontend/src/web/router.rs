//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use clinic_shared::Session;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 对目标路由执行守卫，返回最终应当展示的路由
fn resolve(target: AppRoute, session: Option<&Session>) -> AppRoute {
    match target.guard(session) {
        Some(redirect) => {
            log::info!("[Router] Access denied to {}. Redirecting to {}.", target, redirect);
            redirect
        }
        None => target,
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 会话信号由外部注入，守卫每次导航都重新读取。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 当前会话（注入的信号，实现解耦）
    session: Signal<Option<Session>>,
}

impl RouterService {
    /// 创建新的路由服务
    ///
    /// 初始路由从 URL 解析后同样要过一遍守卫。
    fn new(session: Signal<Option<Session>>) -> Self {
        let requested = AppRoute::from_path(&current_path());
        let initial_route = session.with_untracked(|s| resolve(requested, s.as_ref()));
        if initial_route != requested {
            replace_history_state(initial_route.to_path());
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, path: &str) {
        self.navigate_to(AppRoute::from_path(path));
    }

    /// 导航到指定路由（pushState）
    pub fn navigate_to(&self, target_route: AppRoute) {
        let resolved = self
            .session
            .with_untracked(|s| resolve(target_route, s.as_ref()));

        // 被拒绝时用 replaceState，避免后退键回到被拒绝的地址
        if resolved == target_route {
            push_history_state(resolved.to_path());
        } else {
            replace_history_state(resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let session = self.session;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            // popstate 时也执行守卫逻辑
            let resolved = session.with_untracked(|s| resolve(target_route, s.as_ref()));
            if resolved != target_route {
                replace_history_state(resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 会话变化（登录、登出、角色变化）时重新执行守卫
    fn setup_session_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let route = current_route.get_untracked();
            let resolved = session.with(|s| resolve(route, s.as_ref()));
            if resolved != route {
                replace_history_state(resolved.to_path());
                set_route.set(resolved);
                log::info!("[Router] Session changed, moved from {} to {}.", route, resolved);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<Option<Session>>) -> RouterService {
    let router = RouterService::new(session);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_session_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话信号
    session: Signal<Option<Session>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，拦截点击改走路由服务
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(into, optional)] class: String,
    /// 点击后的额外回调（例如收起移动端菜单）
    #[prop(optional)]
    on_navigate: Option<Callback<()>>,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        router.navigate_to(to);
        if let Some(cb) = on_navigate {
            cb.run(());
        }
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
