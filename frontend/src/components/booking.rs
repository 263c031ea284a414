use clinic_shared::Session;
use clinic_shared::protocol::CreateBookingRequest;
use clinic_shared::validation::{FIX_ERRORS_MESSAGE, FieldErrors};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ClinicApi, report_failure};
use crate::components::form_state::{BookingForm, FieldError};
use crate::components::icons::Stethoscope;
use crate::config::use_config;
use crate::notify::use_notifier;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

const BOOKING_FAILED: &str = "Booking failed! Please try again.";

/// 提交前的判定结果
#[derive(Debug, PartialEq)]
enum SubmitGate {
    Invalid(FieldErrors),
    NeedsLogin,
    Ready(Session),
}

/// 先校验表单，再检查会话
fn submit_gate(
    req: &CreateBookingRequest,
    available: &[String],
    session: Option<Session>,
) -> SubmitGate {
    if let Err(errors) = req.validate(available) {
        return SubmitGate::Invalid(errors);
    }
    match session {
        Some(current) => SubmitGate::Ready(current),
        None => SubmitGate::NeedsLogin,
    }
}

#[component]
pub fn BookingPage() -> impl IntoView {
    let config = use_config();
    let session = use_session();
    let notifier = use_notifier();
    let router = use_router();

    let form = BookingForm::new();
    let slots = RwSignal::new(Vec::<String>::new());
    let (slots_loading, set_slots_loading) = signal(true);
    let (is_submitting, set_is_submitting) = signal(false);

    // 挂载时拉取一次时段表，失败则视为没有可选时段
    let slot_api = ClinicApi::for_session(&config, session.get_untracked().as_ref());
    spawn_local(async move {
        match slot_api.list_slots().await {
            Ok(map) => slots.set(map.available_labels()),
            Err(err) => {
                log::error!("[Booking] Failed to fetch slots: {}", err);
                slots.set(Vec::new());
            }
        }
        set_slots_loading.set(false);
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        let req = form.to_request();
        let available = slots.get_untracked();
        let current = match submit_gate(&req, &available, session.get_untracked()) {
            SubmitGate::Invalid(errors) => {
                form.errors.set(errors);
                notifier.error(FIX_ERRORS_MESSAGE);
                return;
            }
            SubmitGate::NeedsLogin => {
                form.errors.set(FieldErrors::new());
                notifier.error("Please login first!");
                router.navigate_to(AppRoute::Login);
                return;
            }
            SubmitGate::Ready(current) => current,
        };
        form.errors.set(FieldErrors::new());

        set_is_submitting.set(true);
        let api = ClinicApi::for_session(&config, Some(&current));
        spawn_local(async move {
            match api.create_booking(&req).await {
                Ok(booking) => {
                    log::info!("[Booking] Created booking {} for slot {}", booking.id, req.time);
                    notifier.success("Booking successful!");
                    router.navigate_to(AppRoute::MyAppointments);
                }
                Err(err) => report_failure(&err, BOOKING_FAILED, notifier, session, router),
            }
            set_is_submitting.set(false);
        });
    };

    let input_class = move |field: &'static str| {
        move || {
            if form.errors.with(|e| e.get(field).is_some()) {
                "input input-bordered input-error w-full"
            } else {
                "input input-bordered w-full"
            }
        }
    };

    view! {
        <div class="container mx-auto p-4 max-w-2xl">
            <div class="flex items-center gap-3 mb-6">
                <div class="p-2 bg-primary/10 rounded-xl text-primary">
                    <Stethoscope attr:class="h-6 w-6" />
                </div>
                <div>
                    <h1 class="text-2xl font-bold">"Book an Appointment"</h1>
                    <p class="text-base-content/70 text-sm">"Pick a day and an open time slot"</p>
                </div>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body" on:submit=on_submit novalidate>
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <div class="form-control">
                            <label class="label" for="date">
                                <span class="label-text">"Date"</span>
                            </label>
                            <input
                                id="date"
                                type="date"
                                class=input_class("date")
                                prop:value=move || form.date.get()
                                on:input=move |ev| form.date.set(event_target_value(&ev))
                            />
                            <FieldError errors=form.errors field="date" />
                        </div>

                        <div class="form-control">
                            <label class="label" for="time">
                                <span class="label-text">"Time Slot"</span>
                            </label>
                            <Show
                                when=move || !slots_loading.get()
                                fallback=|| view! {
                                    <div class="flex items-center gap-2 h-12 text-sm text-base-content/60">
                                        <span class="loading loading-spinner loading-sm"></span>
                                        "Loading slots..."
                                    </div>
                                }
                            >
                                <Show
                                    when=move || slots.with(|s| !s.is_empty())
                                    fallback=|| view! {
                                        <div class="h-12 flex items-center text-sm text-warning">"No slots available"</div>
                                    }
                                >
                                    <select
                                        id="time"
                                        class=move || if form.errors.with(|e| e.get("time").is_some()) {
                                            "select select-bordered select-error w-full"
                                        } else {
                                            "select select-bordered w-full"
                                        }
                                        prop:value=move || form.time.get()
                                        on:change=move |ev| form.time.set(event_target_value(&ev))
                                    >
                                        <option value="">"Select a time slot"</option>
                                        <For
                                            each=move || slots.get()
                                            key=|label| label.clone()
                                            children=move |label| {
                                                let value = label.clone();
                                                view! { <option value=value>{label}</option> }
                                            }
                                        />
                                    </select>
                                </Show>
                            </Show>
                            <FieldError errors=form.errors field="time" />
                        </div>

                        <div class="form-control">
                            <label class="label" for="name">
                                <span class="label-text">"Patient Name"</span>
                            </label>
                            <input
                                id="name"
                                type="text"
                                placeholder="Jane Doe"
                                class=input_class("name")
                                prop:value=move || form.name.get()
                                on:input=move |ev| form.name.set(event_target_value(&ev))
                            />
                            <FieldError errors=form.errors field="name" />
                        </div>

                        <div class="form-control">
                            <label class="label" for="mobile">
                                <span class="label-text">"Mobile"</span>
                            </label>
                            <input
                                id="mobile"
                                type="tel"
                                placeholder="10 digit mobile number"
                                class=input_class("mobile")
                                prop:value=move || form.mobile.get()
                                on:input=move |ev| form.mobile.set(event_target_value(&ev))
                            />
                            <FieldError errors=form.errors field="mobile" />
                        </div>
                    </div>

                    <div class="form-control">
                        <label class="label" for="message">
                            <span class="label-text">"Message (optional)"</span>
                        </label>
                        <textarea
                            id="message"
                            class="textarea textarea-bordered h-24"
                            placeholder="Anything the doctor should know"
                            prop:value=move || form.message.get()
                            on:input=move |ev| form.message.set(event_target_value(&ev))
                        ></textarea>
                    </div>

                    <div class="card-actions justify-end mt-4">
                        <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Booking..." }.into_any()
                            } else {
                                "Book Appointment".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(time: &str) -> CreateBookingRequest {
        CreateBookingRequest {
            date: "2025-03-04".into(),
            time: time.into(),
            name: "Ann".into(),
            mobile: "1111111111".into(),
            message: String::new(),
        }
    }

    fn session() -> Session {
        Session {
            token: "tok".into(),
            user: Default::default(),
        }
    }

    #[test]
    fn invalid_form_is_reported_before_missing_session() {
        let available = vec!["08:00 AM".to_string()];
        match submit_gate(&request("09:00 AM"), &available, None) {
            SubmitGate::Invalid(errors) => assert_eq!(errors.get("time"), Some("Select a time slot")),
            other => panic!("expected field errors, got {:?}", other),
        }
    }

    #[test]
    fn valid_form_without_session_needs_login() {
        let available = vec!["08:00 AM".to_string()];
        assert_eq!(submit_gate(&request("08:00 AM"), &available, None), SubmitGate::NeedsLogin);
        assert_eq!(
            submit_gate(&request("08:00 AM"), &available, Some(session())),
            SubmitGate::Ready(session())
        );
    }
}
