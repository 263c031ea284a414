use clinic_shared::validation::{FIX_ERRORS_MESSAGE, FieldErrors};
use clinic_shared::{ApiError, ApiErrorKind};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ClinicApi, report_failure};
use crate::components::form_state::{FieldError, LoginForm};
use crate::components::icons::{Eye, EyeOff, LogIn};
use crate::config::use_config;
use crate::notify::use_notifier;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

const LOGIN_FAILED: &str = "Login failed! Please try again.";

#[component]
pub fn LoginPage() -> impl IntoView {
    let config = use_config();
    let session = use_session();
    let notifier = use_notifier();
    let router = use_router();

    let form = LoginForm::new();
    let (show_password, set_show_password) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let req = form.to_request();
        if let Err(errors) = req.validate() {
            form.errors.set(errors);
            notifier.error(FIX_ERRORS_MESSAGE);
            return;
        }
        form.errors.set(FieldErrors::new());

        set_is_submitting.set(true);
        let api = ClinicApi::new(&config.api_base_url, None);
        spawn_local(async move {
            let result = api.login(&req).await.and_then(|res| {
                res.into_session().ok_or_else(|| {
                    ApiError::new(ApiErrorKind::Decode, Some("login response carried no token".into()))
                })
            });

            match result {
                Ok(new_session) => {
                    let home = AppRoute::from(new_session.role().home());
                    session.sign_in(new_session);
                    notifier.success("Login successful!");
                    router.navigate_to(home);
                }
                Err(err) => report_failure(&err, LOGIN_FAILED, notifier, session, router),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-[calc(100vh-4rem)] bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <LogIn attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Welcome Back"</h1>
                        <p class="text-base-content/70">"Sign in to book and manage your appointments"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@example.com"
                                class="input input-bordered"
                                class:input-error=move || form.errors.with(|e| e.get("email").is_some())
                                prop:value=move || form.email.get()
                                on:input=move |ev| form.email.set(event_target_value(&ev))
                            />
                            <FieldError errors=form.errors field="email" />
                        </div>

                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <div class="join w-full">
                                <input
                                    id="password"
                                    type=move || if show_password.get() { "text" } else { "password" }
                                    placeholder="••••••••"
                                    class="input input-bordered join-item w-full"
                                    class:input-error=move || form.errors.with(|e| e.get("password").is_some())
                                    prop:value=move || form.password.get()
                                    on:input=move |ev| form.password.set(event_target_value(&ev))
                                />
                                <button
                                    type="button"
                                    class="btn join-item"
                                    on:click=move |_| set_show_password.update(|v| *v = !*v)
                                >
                                    {move || if show_password.get() {
                                        view! { <EyeOff attr:class="h-4 w-4" /> }.into_any()
                                    } else {
                                        view! { <Eye attr:class="h-4 w-4" /> }.into_any()
                                    }}
                                </button>
                            </div>
                            <FieldError errors=form.errors field="password" />
                        </div>

                        <div class="form-control">
                            <label class="label cursor-pointer justify-start gap-2">
                                <input
                                    type="checkbox"
                                    class="checkbox checkbox-sm"
                                    prop:checked=move || form.remember.get()
                                    on:change=move |ev| form.remember.set(event_target_checked(&ev))
                                />
                                <span class="label-text">"Remember me"</span>
                            </label>
                        </div>

                        <div class="form-control mt-6">
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Signing in..." }.into_any()
                                } else {
                                    "Login".into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm mt-2">
                            "Don't have an account? "
                            <Link to=AppRoute::Register class="link link-primary">"Register"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
