//! 表单校验
//!
//! 只在提交时运行，纯函数，无副作用。校验失败时不发起任何请求。

use crate::protocol::{CreateBookingRequest, LoginRequest, RegisterRequest};

/// 校验失败时的统一提示
pub const FIX_ERRORS_MESSAGE: &str = "Please fix the errors before submitting";

/// 字段名 -> 失败原因，按校验顺序保存
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, &'static str)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: &'static str) {
        self.0.push((field, message));
    }

    /// 字段对应的提示，校验通过时为 None
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| *message)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(name, _)| *name)
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

// =========================================================
// 基础规则
// =========================================================

/// 与 `\S+@\S+\.\S+` 等价：存在一个 `@`，前面紧挨非空白字符，
/// 后面的非空白片段里有一个既不在开头也不在结尾的 `.`
pub fn is_valid_email(email: &str) -> bool {
    let chars: Vec<char> = email.chars().collect();
    chars.iter().enumerate().any(|(i, &c)| {
        if c != '@' || i == 0 || chars[i - 1].is_whitespace() {
            return false;
        }
        let tail: Vec<char> = chars[i + 1..]
            .iter()
            .copied()
            .take_while(|c| !c.is_whitespace())
            .collect();
        tail.len() >= 3 && tail[1..tail.len() - 1].contains(&'.')
    })
}

/// 恰好 10 位 ASCII 数字
pub fn is_ten_digits(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

// =========================================================
// 密码提示（仅展示，不阻止提交）
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordRequirement {
    pub label: &'static str,
    pub passed: bool,
}

/// 按 UTF-16 码元计长度，与浏览器里 `String.length` 一致
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

pub fn password_requirements(password: &str) -> [PasswordRequirement; 4] {
    [
        PasswordRequirement {
            label: "Minimum 8 characters",
            passed: utf16_len(password) >= 8,
        },
        PasswordRequirement {
            label: "At least one uppercase letter",
            passed: password.chars().any(|c| c.is_ascii_uppercase()),
        },
        PasswordRequirement {
            label: "At least one number",
            passed: password.chars().any(|c| c.is_ascii_digit()),
        },
        PasswordRequirement {
            label: "At least one special character",
            passed: password.chars().any(|c| !c.is_ascii_alphanumeric()),
        },
    ]
}

// =========================================================
// 各表单的规则
// =========================================================

impl LoginRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if !is_valid_email(&self.email) {
            errors.insert("email", "Enter a valid email");
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        }
        errors.into_result()
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.full_name.is_empty() {
            errors.insert("fullName", "Full name is required");
        }
        if !is_valid_email(&self.email) {
            errors.insert("email", "Enter a valid email");
        }
        if utf16_len(&self.password) < 8 {
            errors.insert("password", "Password must be at least 8 characters");
        }
        if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }
        if !is_ten_digits(&self.phone) {
            errors.insert("phone", "Enter a valid 10-digit phone number");
        }
        errors.into_result()
    }
}

impl CreateBookingRequest {
    /// `available` 是本次拉取到的可选时段
    pub fn validate(&self, available: &[String]) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.date.is_empty() {
            errors.insert("date", "Select a date");
        }
        if self.time.is_empty() || !available.iter().any(|slot| *slot == self.time) {
            errors.insert("time", "Select a time slot");
        }
        if self.name.is_empty() {
            errors.insert("name", "Enter your name");
        }
        if !is_ten_digits(&self.mobile) {
            errors.insert("mobile", "Enter valid 10-digit mobile number");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests;
