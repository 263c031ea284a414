use clinic_shared::Booking;
use clinic_shared::booking::{BookingFilter, booking_date};
use clinic_shared::date::{DISPLAY_DATE_FORMAT, DateRange, split_timestamp};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::{ClinicApi, report_failure};
use crate::components::icons::{Close, Eye, Search};
use crate::config::use_config;
use crate::notify::use_notifier;
use crate::session::use_session;
use crate::web::router::use_router;

const FETCH_FAILED: &str = "Could not load bookings. Please try again.";

/// 详情弹层（只读）
#[component]
fn BookingDetail(booking: Booking, on_close: Callback<()>) -> impl IntoView {
    let day = booking_date(&booking)
        .map(|d| d.format(DISPLAY_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let created = booking
        .created_at
        .as_ref()
        .map(|ts| {
            let (date, time) = split_timestamp(ts, &chrono::Local);
            format!("{} {}", date, time)
        })
        .unwrap_or_else(|| "N/A".to_string());
    let slot = booking.slot_label().to_string();
    let owner = booking.owner_email().to_string();
    let owner_name = booking.owner_name().to_string();
    let message = booking
        .message
        .clone()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "-".to_string());

    view! {
        <div class="modal modal-open">
            <div class="modal-box">
                <button
                    class="btn btn-sm btn-circle btn-ghost absolute right-2 top-2"
                    on:click=move |_| on_close.run(())
                >
                    <Close attr:class="h-4 w-4" />
                </button>
                <h3 class="font-bold text-lg mb-4">"Booking Details"</h3>
                <dl class="grid grid-cols-3 gap-y-2 text-sm">
                    <dt class="font-semibold">"Booking ID"</dt>
                    <dd class="col-span-2 font-mono text-xs break-all">{booking.id}</dd>
                    <dt class="font-semibold">"Name"</dt>
                    <dd class="col-span-2">{booking.name}</dd>
                    <dt class="font-semibold">"Mobile"</dt>
                    <dd class="col-span-2">{booking.mobile}</dd>
                    <dt class="font-semibold">"Date"</dt>
                    <dd class="col-span-2">{day}</dd>
                    <dt class="font-semibold">"Time Slot"</dt>
                    <dd class="col-span-2">{slot}</dd>
                    <dt class="font-semibold">"User Email"</dt>
                    <dd class="col-span-2">{owner}</dd>
                    <dt class="font-semibold">"User Name"</dt>
                    <dd class="col-span-2">{owner_name}</dd>
                    <dt class="font-semibold">"Booked At"</dt>
                    <dd class="col-span-2">{created}</dd>
                    <dt class="font-semibold">"Message"</dt>
                    <dd class="col-span-2 whitespace-pre-wrap">{message}</dd>
                </dl>
                <div class="modal-action">
                    <button class="btn" on:click=move |_| on_close.run(())>"Close"</button>
                </div>
            </div>
            <div class="modal-backdrop" on:click=move |_| on_close.run(())></div>
        </div>
    }
}

#[component]
pub fn AdminBookingsPage() -> impl IntoView {
    let config = use_config();
    let session = use_session();
    let notifier = use_notifier();
    let router = use_router();

    let bookings = RwSignal::new(Vec::<Booking>::new());
    let (loading, set_loading) = signal(true);
    let (search, set_search) = signal(String::new());
    let (from, set_from) = signal(String::new());
    let (to, set_to) = signal(String::new());
    let selected = RwSignal::new(Option::<Booking>::None);

    let api = ClinicApi::for_session(&config, session.get_untracked().as_ref());
    spawn_local(async move {
        match api.list_all_bookings().await {
            Ok(list) => {
                log::debug!("[Admin] Loaded {} bookings", list.len());
                bookings.set(list);
            }
            Err(err) => report_failure(&err, FETCH_FAILED, notifier, session, router),
        }
        set_loading.set(false);
    });

    let filter = Memo::new(move |_| {
        BookingFilter::new(search.get(), DateRange::from_inputs(&from.get(), &to.get()))
    });
    let visible = move || {
        let filter = filter.get();
        bookings.with(|list| filter.apply(list).into_iter().cloned().collect::<Vec<_>>())
    };

    let close_detail = Callback::new(move |_: ()| selected.set(None));

    view! {
        <div class="container mx-auto p-4">
            <h1 class="text-2xl font-bold mb-6">"All Bookings"</h1>

            <div class="flex flex-col md:flex-row gap-4 mb-6">
                <label class="input input-bordered flex items-center gap-2 flex-1">
                    <Search attr:class="h-4 w-4 opacity-70" />
                    <input
                        type="text"
                        class="grow"
                        placeholder="Search by name or mobile"
                        prop:value=search
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-control">
                    <span class="label-text text-xs">"From"</span>
                    <input
                        type="date"
                        class="input input-bordered input-sm"
                        prop:value=from
                        on:input=move |ev| set_from.set(event_target_value(&ev))
                    />
                </label>
                <label class="form-control">
                    <span class="label-text text-xs">"To"</span>
                    <input
                        type="date"
                        class="input input-bordered input-sm"
                        prop:value=to
                        on:input=move |ev| set_to.set(event_target_value(&ev))
                    />
                </label>
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! {
                    <div class="flex items-center justify-center gap-2 p-12 text-base-content/60">
                        <span class="loading loading-spinner"></span>
                        "Loading bookings..."
                    </div>
                }
            >
                <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Mobile"</th>
                                <th>"Time Slot"</th>
                                <th>"User Email"</th>
                                <th>"View"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let rows = visible();
                                if rows.is_empty() {
                                    return view! {
                                        <tr>
                                            <td colspan="5" class="text-center text-base-content/60">"No bookings found"</td>
                                        </tr>
                                    }
                                    .into_any();
                                }
                                rows.into_iter()
                                    .map(|b| {
                                        let slot = b.slot_label().to_string();
                                        let owner = b.owner_email().to_string();
                                        let name = b.name.clone();
                                        let mobile = b.mobile.clone();
                                        view! {
                                            <tr>
                                                <td>{name}</td>
                                                <td>{mobile}</td>
                                                <td>{slot}</td>
                                                <td>{owner}</td>
                                                <td>
                                                    <button
                                                        class="btn btn-ghost btn-xs"
                                                        on:click=move |_| selected.set(Some(b.clone()))
                                                    >
                                                        <Eye attr:class="h-4 w-4" />
                                                    </button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                                    .into_any()
                            }}
                        </tbody>
                    </table>
                </div>
            </Show>

            {move || selected.get().map(|b| view! { <BookingDetail booking=b on_close=close_detail /> })}
        </div>
    }
}
