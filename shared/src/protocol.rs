use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::model::{Booking, Session, SlotMap, UserProfile};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// GET requests carry no body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the bearer token must be attached.
    const AUTH: bool;

    /// Full path including any query string.
    fn path(&self) -> String {
        Self::PATH.to_string()
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// A login only counts when the server hands back a non-empty token.
    pub fn into_session(self) -> Option<Session> {
        let token = self.token.filter(|t| !t.is_empty())?;
        Some(Session {
            token,
            user: self.user.unwrap_or_default(),
        })
    }
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const PATH: &'static str = "/api/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: bool = false;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RegisterResponse {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiRequest for RegisterRequest {
    type Response = RegisterResponse;
    const PATH: &'static str = "/api/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: bool = false;
}

// =========================================================
// Slots & Bookings
// =========================================================

/// List every slot with its fill state
#[derive(Debug, Serialize, Deserialize)]
pub struct ListSlotsRequest;

impl ApiRequest for ListSlotsRequest {
    type Response = SlotMap;
    const PATH: &'static str = "/api/slots";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: bool = true;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub date: String,
    pub time: String,
    pub name: String,
    pub mobile: String,
    #[serde(default)]
    pub message: String,
}

impl ApiRequest for CreateBookingRequest {
    type Response = Booking;
    const PATH: &'static str = "/api/bookings/booking";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: bool = true;
}

/// Bookings owned by one account, filtered server-side by email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOwnBookingsRequest {
    pub email: String,
}

impl ApiRequest for ListOwnBookingsRequest {
    type Response = Vec<Booking>;
    const PATH: &'static str = "/api/bookings/allbookings";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: bool = true;

    fn path(&self) -> String {
        format!("{}?email={}", Self::PATH, encode_uri_component(&self.email))
    }
}

/// Every booking across all users (admin only)
#[derive(Debug, Serialize, Deserialize)]
pub struct ListAllBookingsRequest;

impl ApiRequest for ListAllBookingsRequest {
    type Response = Vec<Booking>;
    const PATH: &'static str = "/api/bookings/admin/allbookings";
    const METHOD: HttpMethod = HttpMethod::Get;
    const AUTH: bool = true;
}

/// Percent-encode a query value, leaving the same characters untouched as
/// `encodeURIComponent`.
pub fn encode_uri_component(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            other => out.push_str(&format!("%{:02X}", other)),
        }
    }
    out
}

/// Format the bearer header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Role;

    #[test]
    fn endpoints_match_remote_api() {
        assert_eq!(LoginRequest::PATH, "/api/auth/login");
        assert_eq!(RegisterRequest::PATH, "/api/auth/register");
        assert_eq!(ListSlotsRequest.path(), "/api/slots");
        assert_eq!(CreateBookingRequest::PATH, "/api/bookings/booking");
        assert_eq!(ListAllBookingsRequest.path(), "/api/bookings/admin/allbookings");
        assert!(!LoginRequest::AUTH && !RegisterRequest::AUTH);
        assert!(ListSlotsRequest::AUTH && CreateBookingRequest::AUTH);
    }

    #[test]
    fn own_bookings_path_encodes_email() {
        let req = ListOwnBookingsRequest {
            email: "ann+test@example.com".into(),
        };
        assert_eq!(
            req.path(),
            "/api/bookings/allbookings?email=ann%2Btest%40example.com"
        );
    }

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("it's(ok)*!~"), "it's(ok)*!~");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn register_body_uses_camel_case() {
        let req = RegisterRequest {
            full_name: "Ann Lee".into(),
            email: "ann@example.com".into(),
            password: "Secret#123".into(),
            confirm_password: "Secret#123".into(),
            phone: "9876543210".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["fullName"], "Ann Lee");
        assert_eq!(json["confirmPassword"], "Secret#123");
        assert!(json.get("full_name").is_none());
    }

    #[test]
    fn login_response_without_token_is_not_a_session() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
        assert!(resp.into_session().is_none());

        let resp: LoginResponse = serde_json::from_str(
            r#"{"token":"abc","user":{"email":"a@b.co","name":"A","role":"admin"}}"#,
        )
        .unwrap();
        let session = resp.into_session().unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.role(), Role::Admin);
    }

    #[test]
    fn bearer_header_value() {
        assert_eq!(bearer("t0k"), "Bearer t0k");
        assert!(!HttpMethod::Get.has_body());
        assert!(HttpMethod::Post.has_body());
    }
}
