//! 诊所预约前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话状态管理
//! - `notify`: 通知队列
//! - `components`: UI 组件层

mod api;
mod components {
    pub mod admin_bookings;
    pub mod booking;
    mod form_state;
    mod icons;
    pub mod login;
    pub mod my_appointments;
    pub mod navbar;
    pub mod register;
}
pub mod config;
mod notify;
mod serde_helper;
mod session;

use crate::components::admin_bookings::AdminBookingsPage;
use crate::components::booking::BookingPage;
use crate::components::login::LoginPage;
use crate::components::my_appointments::MyAppointmentsPage;
use crate::components::navbar::Navbar;
use crate::components::register::RegisterPage;
use crate::config::AppConfig;
use crate::notify::{Notifier, Toaster};
use crate::session::SessionContext;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::HttpClient;
    pub use storage::SessionStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet, use_router};

#[component]
fn NotFoundPage() -> impl IntoView {
    let router = use_router();

    view! {
        <div class="flex items-center justify-center min-h-[calc(100vh-4rem)] bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <button class="btn btn-primary mt-6" on:click=move |_| router.navigate("/")>
                    "Back to home"
                </button>
            </div>
        </div>
    }
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Booking => view! { <BookingPage /> }.into_any(),
        AppRoute::MyAppointments => view! { <MyAppointmentsPage /> }.into_any(),
        AppRoute::AdminBookings => view! { <AdminBookingsPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    // 1. 配置与通知队列
    let notifier = Notifier::new(config.toast_duration);
    provide_context(config);
    provide_context(notifier);

    // 2. 从 sessionStorage 恢复会话
    let session = SessionContext::restore();
    provide_context(session);

    // 3. 会话信号注入路由服务，守卫据此判定
    view! {
        <Router session=session.signal()>
            <Navbar />
            <Toaster />
            <main>
                <RouterOutlet matcher=route_matcher />
            </main>
        </Router>
    }
}
