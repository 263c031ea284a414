//! 表单状态管理模块
//!
//! 将零散的 signal 整合为结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到请求对象的转换
//!
//! 校验规则本身在 `clinic_shared::validation`，这里只保存校验结果。

use clinic_shared::protocol::{CreateBookingRequest, LoginRequest, RegisterRequest};
use clinic_shared::validation::FieldErrors;
use leptos::prelude::*;

/// 登录表单
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合在闭包间传递。
#[derive(Clone, Copy)]
pub struct LoginForm {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub remember: RwSignal<bool>,
    pub errors: RwSignal<FieldErrors>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            remember: RwSignal::new(false),
            errors: RwSignal::new(FieldErrors::new()),
        }
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            remember: self.remember.get_untracked(),
        }
    }
}

/// 注册表单
#[derive(Clone, Copy)]
pub struct RegisterForm {
    pub full_name: RwSignal<String>,
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
    pub phone: RwSignal<String>,
    pub errors: RwSignal<FieldErrors>,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            full_name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            confirm_password: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            errors: RwSignal::new(FieldErrors::new()),
        }
    }

    /// 注册成功后清空表单
    pub fn reset(&self) {
        self.full_name.set(String::new());
        self.email.set(String::new());
        self.password.set(String::new());
        self.confirm_password.set(String::new());
        self.phone.set(String::new());
        self.errors.set(FieldErrors::new());
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            full_name: self.full_name.get_untracked(),
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            confirm_password: self.confirm_password.get_untracked(),
            phone: self.phone.get_untracked(),
        }
    }
}

/// 预约表单
#[derive(Clone, Copy)]
pub struct BookingForm {
    pub date: RwSignal<String>,
    pub time: RwSignal<String>,
    pub name: RwSignal<String>,
    pub mobile: RwSignal<String>,
    pub message: RwSignal<String>,
    pub errors: RwSignal<FieldErrors>,
}

impl BookingForm {
    pub fn new() -> Self {
        Self {
            date: RwSignal::new(String::new()),
            time: RwSignal::new(String::new()),
            name: RwSignal::new(String::new()),
            mobile: RwSignal::new(String::new()),
            message: RwSignal::new(String::new()),
            errors: RwSignal::new(FieldErrors::new()),
        }
    }

    pub fn to_request(&self) -> CreateBookingRequest {
        CreateBookingRequest {
            date: self.date.get_untracked(),
            time: self.time.get_untracked(),
            name: self.name.get_untracked(),
            mobile: self.mobile.get_untracked(),
            message: self.message.get_untracked(),
        }
    }
}

/// 字段下方的错误提示
#[component]
pub fn FieldError(errors: RwSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    move || {
        errors
            .with(|e| e.get(field))
            .map(|message| view! { <p class="text-error text-sm mt-1">{message}</p> })
    }
}
