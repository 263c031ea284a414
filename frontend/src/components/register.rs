use clinic_shared::validation::{FIX_ERRORS_MESSAGE, FieldErrors, password_requirements};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ClinicApi, report_failure};
use crate::components::form_state::{FieldError, RegisterForm};
use crate::components::icons::{CheckCircle, Circle, UserPlus};
use crate::config::use_config;
use crate::notify::use_notifier;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

const REGISTER_FAILED: &str = "Registration failed! Please try again.";

/// 单个输入框（标签 + 输入 + 错误提示）
#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] placeholder: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FieldErrors>,
    /// 错误表中对应的字段名
    field: &'static str,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label" for=id>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                type=input_type
                placeholder=placeholder
                class="input input-bordered"
                class:input-error=move || errors.with(|e| e.get(field).is_some())
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <FieldError errors=errors field=field />
        </div>
    }
}

/// 密码强度提示，仅展示
#[component]
fn PasswordHints(password: RwSignal<String>) -> impl IntoView {
    move || {
        let requirements = password.with(|p| password_requirements(p));
        view! {
            <ul class="mt-2 space-y-1 text-xs">
                {requirements
                    .into_iter()
                    .map(|req| {
                        let class = if req.passed { "flex items-center gap-1 text-success" } else { "flex items-center gap-1 text-base-content/60" };
                        view! {
                            <li class=class>
                                {if req.passed {
                                    view! { <CheckCircle attr:class="h-3 w-3" /> }.into_any()
                                } else {
                                    view! { <Circle attr:class="h-3 w-3" /> }.into_any()
                                }}
                                {req.label}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        }
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let config = use_config();
    let session = use_session();
    let notifier = use_notifier();
    let router = use_router();

    let form = RegisterForm::new();
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
            match api.register(&req).await {
                Ok(res) => {
                    log::info!("[Register] Account created for {}", req.email);
                    form.reset();
                    notifier.success(
                        res.message
                            .filter(|m| !m.trim().is_empty())
                            .unwrap_or_else(|| "Registration successful!".to_string()),
                    );
                    router.navigate_to(AppRoute::Login);
                }
                Err(err) => report_failure(&err, REGISTER_FAILED, notifier, session, router),
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
                            <UserPlus attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Create Account"</h1>
                        <p class="text-base-content/70">"Register to book your next visit"</p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit novalidate>
                        <TextField id="fullName" label="Full Name" placeholder="Jane Doe" value=form.full_name errors=form.errors field="fullName" />
                        <TextField id="email" label="Email" input_type="email" placeholder="you@example.com" value=form.email errors=form.errors field="email" />
                        <div>
                            <TextField id="password" label="Password" input_type="password" value=form.password errors=form.errors field="password" />
                            <PasswordHints password=form.password />
                        </div>
                        <TextField id="confirmPassword" label="Confirm Password" input_type="password" value=form.confirm_password errors=form.errors field="confirmPassword" />
                        <TextField id="phone" label="Phone" input_type="tel" placeholder="10 digit mobile number" value=form.phone errors=form.errors field="phone" />

                        <div class="form-control mt-6">
                            <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Registering..." }.into_any()
                                } else {
                                    "Register".into_any()
                                }}
                            </button>
                        </div>

                        <p class="text-center text-sm mt-2">
                            "Already have an account? "
                            <Link to=AppRoute::Login class="link link-primary">"Login"</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
