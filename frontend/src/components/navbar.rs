//! 顶部导航栏
//!
//! 角色与链接表来自 `Role::nav_links`，会话只从 `SessionContext` 读取。

use leptos::prelude::*;

use crate::components::icons::{Close, LogIn, LogOut, Menu, Stethoscope, UserPlus};
use crate::notify::use_notifier;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let notifier = use_notifier();
    let current = router.current_route();

    let (menu_open, set_menu_open) = signal(false);
    let close_menu = Callback::new(move |_: ()| set_menu_open.set(false));

    // 路由变化时收起移动端菜单
    Effect::new(move |_| {
        current.track();
        set_menu_open.set(false);
    });

    let on_logout = move |_: leptos::ev::MouseEvent| {
        session.sign_out();
        notifier.info("Logged out");
        router.navigate_to(AppRoute::Login);
        set_menu_open.set(false);
    };

    let links = move |item_class: &'static str| {
        let role = session.get().map(|s| s.role());
        match role {
            Some(role) => role
                .nav_links()
                .iter()
                .map(|link| {
                    let to = AppRoute::from(link.page);
                    let class = if current.get() == to {
                        format!("{} btn-active", item_class)
                    } else {
                        item_class.to_string()
                    };
                    view! {
                        <li>
                            <Link to=to class=class on_navigate=close_menu>{link.label}</Link>
                        </li>
                    }
                })
                .collect_view()
                .into_any(),
            None => view! {
                <li>
                    <Link to=AppRoute::Login class=item_class on_navigate=close_menu>
                        <LogIn attr:class="h-4 w-4" /> "Login"
                    </Link>
                </li>
                <li>
                    <Link to=AppRoute::Register class=item_class on_navigate=close_menu>
                        <UserPlus attr:class="h-4 w-4" /> "Register"
                    </Link>
                </li>
            }
            .into_any(),
        }
    };

    view! {
        <Show when=move || current.get().shows_navbar()>
            <div class="navbar bg-base-100 shadow-md sticky top-0 z-40">
                <div class="flex-1 gap-2">
                    <Stethoscope attr:class="text-primary h-6 w-6" />
                    <span class="text-xl font-bold">"Clinic Booking"</span>
                </div>

                <div class="flex-none hidden md:flex items-center gap-2">
                    <ul class="menu menu-horizontal px-1 gap-1">
                        {move || links("btn btn-ghost btn-sm")}
                    </ul>
                    <Show when=move || session.is_authenticated()>
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Logout"
                        </button>
                    </Show>
                </div>

                <div class="flex-none md:hidden">
                    <button class="btn btn-ghost btn-square" on:click=move |_| set_menu_open.update(|v| *v = !*v)>
                        {move || if menu_open.get() {
                            view! { <Close attr:class="h-6 w-6" /> }.into_any()
                        } else {
                            view! { <Menu attr:class="h-6 w-6" /> }.into_any()
                        }}
                    </button>
                </div>
            </div>

            <Show when=move || menu_open.get()>
                <div class="md:hidden bg-base-100 shadow-md">
                    <ul class="menu p-2">
                        {move || links("")}
                        <Show when=move || session.is_authenticated()>
                            <li>
                                <a class="text-error" on:click=on_logout>
                                    <LogOut attr:class="h-4 w-4" /> "Logout"
                                </a>
                            </li>
                        </Show>
                    </ul>
                </div>
            </Show>
        </Show>
    }
}
