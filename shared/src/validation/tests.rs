use super::*;

// =========================================================
// Helpers
// =========================================================

fn register(password: &str, confirm: &str, phone: &str, email: &str) -> RegisterRequest {
    RegisterRequest {
        full_name: "Ann Lee".into(),
        email: email.into(),
        password: password.into(),
        confirm_password: confirm.into(),
        phone: phone.into(),
    }
}

fn booking(time: &str, mobile: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        date: "2025-03-04".into(),
        time: time.into(),
        name: "Ann".into(),
        mobile: mobile.into(),
        message: String::new(),
    }
}

fn slots() -> Vec<String> {
    vec!["08:00 AM".to_string(), "10:00 AM".to_string()]
}

// =========================================================
// Primitive rules
// =========================================================

#[test]
fn mobile_must_be_exactly_ten_ascii_digits() {
    assert!(is_ten_digits("9876543210"));
    assert!(!is_ten_digits("987654321"));
    assert!(!is_ten_digits("98765432100"));
    assert!(!is_ten_digits("98765abcde"));
    assert!(!is_ten_digits(" 987654321"));
    assert!(!is_ten_digits("９８７６５４３２１０"));
    assert!(!is_ten_digits(""));
}

#[test]
fn email_needs_at_and_dot_segment() {
    assert!(is_valid_email("ann@example.com"));
    assert!(is_valid_email("a@b.c"));
    assert!(is_valid_email("first last@clinic.org"));
    assert!(!is_valid_email("ann.example.com"));
    assert!(!is_valid_email("ann@example"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("ann@.com"));
    assert!(!is_valid_email("ann@example."));
    assert!(!is_valid_email("ann @example.com"));
    assert!(!is_valid_email(""));
}

#[test]
fn password_hints_do_not_decide_validity() {
    let hints = password_requirements("abcdefgh");
    assert!(hints[0].passed);
    assert!(!hints[1].passed && !hints[2].passed && !hints[3].passed);

    // 只有长度规则会阻止提交
    assert!(register("abcdefgh", "abcdefgh", "9876543210", "a@b.co").validate().is_ok());
}

#[test]
fn password_length_counts_utf16_units() {
    // 每个 emoji 占两个 UTF-16 码元：2 + 3 * 2 = 8
    let pw = "ab😀😀😀";
    assert!(register(pw, pw, "9876543210", "a@b.co").validate().is_ok());
    assert!(password_requirements(pw)[0].passed);

    let short = "ab😀😀";
    let errors = register(short, short, "9876543210", "a@b.co")
        .validate()
        .unwrap_err();
    assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["password"]);
}

// =========================================================
// Login
// =========================================================

#[test]
fn login_requires_email_and_password() {
    let req = LoginRequest {
        email: "not-an-email".into(),
        password: String::new(),
        remember: false,
    };
    let errors = req.validate().unwrap_err();
    assert_eq!(errors.get("email"), Some("Enter a valid email"));
    assert_eq!(errors.get("password"), Some("Password is required"));

    let ok = LoginRequest {
        email: "ann@example.com".into(),
        password: "x".into(),
        remember: true,
    };
    assert!(ok.validate().is_ok());
}

// =========================================================
// Register
// =========================================================

#[test]
fn register_blocked_by_each_rule() {
    let cases = [
        (register("short", "short", "9876543210", "a@b.co"), "password"),
        (register("longenough", "different1", "9876543210", "a@b.co"), "confirmPassword"),
        (register("longenough", "longenough", "12345", "a@b.co"), "phone"),
        (register("longenough", "longenough", "9876543210", "a@bco"), "email"),
    ];
    for (req, field) in cases {
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field]);
    }
}

#[test]
fn register_passes_when_all_rules_hold() {
    let req = register("Secret#123", "Secret#123", "9876543210", "ann@example.com");
    assert!(req.validate().is_ok());
}

#[test]
fn register_reports_missing_name_first() {
    let mut req = register("x", "y", "1", "bad");
    req.full_name.clear();
    let errors = req.validate().unwrap_err();
    assert_eq!(errors.len(), 5);
    assert_eq!(errors.fields().next(), Some("fullName"));
}

// =========================================================
// Booking
// =========================================================

#[test]
fn booking_time_must_come_from_fetched_slots() {
    assert!(booking("08:00 AM", "9876543210").validate(&slots()).is_ok());

    let errors = booking("09:00 AM", "9876543210").validate(&slots()).unwrap_err();
    assert_eq!(errors.get("time"), Some("Select a time slot"));

    let errors = booking("", "9876543210").validate(&[]).unwrap_err();
    assert_eq!(errors.get("time"), Some("Select a time slot"));
}

#[test]
fn booking_mobile_and_required_fields() {
    let mut req = booking("10:00 AM", "98765abcde");
    req.date.clear();
    req.name.clear();
    let errors = req.validate(&slots()).unwrap_err();
    assert_eq!(
        errors.fields().collect::<Vec<_>>(),
        vec!["date", "name", "mobile"]
    );
}

#[test]
fn booking_message_is_optional() {
    let mut req = booking("10:00 AM", "9876543210");
    req.message = "Follow-up visit".into();
    assert!(req.validate(&slots()).is_ok());
    req.message.clear();
    assert!(req.validate(&slots()).is_ok());
}
