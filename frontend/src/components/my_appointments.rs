use clinic_shared::booking::{AppointmentStatus, AppointmentView, cancel_appointment, project_appointments};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ClinicApi, report_failure};
use crate::config::use_config;
use crate::notify::use_notifier;
use crate::session::use_session;
use crate::web::router::use_router;

const FETCH_FAILED: &str = "Could not load your appointments. Please try again.";

fn status_badge(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Confirmed => "badge badge-success",
        AppointmentStatus::Pending => "badge badge-warning",
        AppointmentStatus::Cancelled => "badge badge-error",
    }
}

#[component]
fn AppointmentCard(
    appt: AppointmentView,
    /// 取消回调（只改本地展示状态）
    on_cancel: Callback<String>,
) -> impl IntoView {
    let id = appt.id.clone();
    let can_cancel = appt.can_cancel();

    view! {
        <div class="card bg-base-100 shadow-md">
            <div class="card-body">
                <div class="flex justify-between items-start">
                    <h2 class="card-title">{appt.slot}</h2>
                    <span class=status_badge(appt.status)>{appt.status.as_str()}</span>
                </div>
                <div class="text-sm space-y-1 text-base-content/80">
                    <p>"Booked on: " {appt.date} " at " {appt.time}</p>
                    <p>"Mobile: " {appt.mobile}</p>
                    {(!appt.message.is_empty()).then(|| view! { <p>"Message: " {appt.message}</p> })}
                </div>
                <Show when=move || can_cancel>
                    <div class="card-actions justify-end">
                        <button
                            class="btn btn-sm btn-outline btn-error"
                            on:click={
                                let id = id.clone();
                                move |_| on_cancel.run(id.clone())
                            }
                        >
                            "Cancel"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}

#[component]
pub fn MyAppointmentsPage() -> impl IntoView {
    let config = use_config();
    let session = use_session();
    let notifier = use_notifier();
    let router = use_router();

    let appointments = RwSignal::new(Vec::<AppointmentView>::new());
    let (loading, set_loading) = signal(true);

    let current = session.get_untracked();
    let email = current
        .as_ref()
        .and_then(|s| s.email())
        .map(str::to_string);

    match email.clone() {
        Some(email) => {
            let api = ClinicApi::for_session(&config, current.as_ref());
            spawn_local(async move {
                match api.list_own_bookings(&email).await {
                    Ok(bookings) => {
                        appointments.set(project_appointments(&bookings, &chrono::Local));
                    }
                    Err(err) => {
                        log::error!("[Appointments] Failed to fetch bookings for {}: {}", email, err);
                        if err.is_unauthorized() {
                            report_failure(&err, FETCH_FAILED, notifier, session, router);
                        }
                    }
                }
                set_loading.set(false);
            });
        }
        None => {
            notifier.error("Please login first");
            set_loading.set(false);
        }
    }

    let on_cancel = Callback::new(move |id: String| {
        let changed = appointments.try_update(|list| cancel_appointment(list, &id));
        if changed == Some(true) {
            notifier.info("Appointment cancelled");
        }
    });

    view! {
        <Show when={
            let has_email = email.is_some();
            move || has_email
        }>
            <div class="container mx-auto p-4 max-w-4xl">
                <h1 class="text-2xl font-bold mb-6">"My Appointments"</h1>
                <Show
                    when=move || !loading.get()
                    fallback=|| view! {
                        <div class="flex justify-center p-12">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                        </div>
                    }
                >
                    <Show
                        when=move || appointments.with(|list| !list.is_empty())
                        fallback=|| view! {
                            <div class="text-center p-12 text-base-content/60">"No appointments booked yet."</div>
                        }
                    >
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <For
                                each=move || appointments.get()
                                key=|appt| (appt.id.clone(), appt.status)
                                children=move |appt| view! { <AppointmentCard appt=appt on_cancel=on_cancel /> }
                            />
                        </div>
                    </Show>
                </Show>
            </div>
        </Show>
    }
}
