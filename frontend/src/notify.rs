//! 通知队列
//!
//! 所有成功/失败提示都进队列，以 toast 形式展示并自动消失，
//! 不阻塞调用方的控制流。

use std::time::Duration;

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

impl ToastLevel {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "alert alert-success shadow-lg",
            ToastLevel::Error => "alert alert-error shadow-lg",
            ToastLevel::Info => "alert alert-info shadow-lg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// 通知上下文
#[derive(Clone, Copy)]
pub struct Notifier {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    duration: StoredValue<Duration>,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            duration: StoredValue::new(duration),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    fn push(&self, level: ToastLevel, message: String) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        log::debug!("[Notify] {:?}: {}", level, message);
        self.toasts.update(|list| list.push(Toast { id, level, message }));

        let this = *self;
        set_timeout(move || this.dismiss(id), self.duration.get_value());
    }
}

/// 从 Context 获取通知上下文
pub fn use_notifier() -> Notifier {
    use_context::<Notifier>().expect("Notifier should be provided")
}

/// 通知展示区
#[component]
pub fn Toaster() -> impl IntoView {
    let notifier = use_notifier();
    let toasts = notifier.toasts;

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toasts.get()
                key=|t| t.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.level.alert_class() on:click=move |_| notifier.dismiss(id)>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}
