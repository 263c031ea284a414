use clinic_shared::error::{ApiResult, ErrorBody};
use clinic_shared::protocol::{
    ApiRequest, CreateBookingRequest, ListAllBookingsRequest, ListOwnBookingsRequest,
    ListSlotsRequest, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, bearer,
};
use clinic_shared::{ApiError, ApiErrorKind, Booking, HEADER_AUTHORIZATION, Session, SlotMap};

use crate::config::AppConfig;
use crate::notify::Notifier;
use crate::serde_helper;
use crate::session::SessionContext;
use crate::web::HttpClient;
use crate::web::route::AppRoute;
use crate::web::router::RouterService;

#[derive(Clone, Debug, PartialEq)]
pub struct ClinicApi {
    pub base_url: String,
    pub token: Option<String>,
}

impl ClinicApi {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, token }
    }

    /// 以当前会话的令牌构造客户端
    pub fn for_session(config: &AppConfig, session: Option<&Session>) -> Self {
        Self::new(&config.api_base_url, session.map(|s| s.token.clone()))
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送任意接口请求
    ///
    /// 非 2xx 响应按状态码分类，响应体中的 `message` 字段会被保留。
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let url = self.url(&req.path());
        let mut builder = HttpClient::request(R::METHOD, &url);

        if let Some(value) = auth_header(R::AUTH, self.token.as_deref())? {
            builder = builder.header(HEADER_AUTHORIZATION, &value);
        }

        if R::METHOD.has_body() {
            let body = serde_helper::to_json_string(req)
                .map_err(|e| ApiError::new(ApiErrorKind::Decode, Some(e.to_string())))?;
            builder = builder.json_body(body);
        }

        let res = builder.send().await.map_err(|e| {
            log::error!("[Api] {} {} failed: {}", R::METHOD.as_str(), R::PATH, e);
            ApiError::from(e)
        })?;

        let status = res.status();
        let ok = res.ok();
        let text = res.text().await?;

        if !ok {
            let body = serde_helper::from_json_string::<ErrorBody>(&text).ok();
            let err = ApiError::from_response(status, body);
            log::warn!("[Api] {} {} rejected: {}", R::METHOD.as_str(), R::PATH, err);
            return Err(err);
        }

        serde_helper::from_json_string::<R::Response>(&text).map_err(|e| {
            log::error!("[Api] {} {} returned unreadable body: {}", R::METHOD.as_str(), R::PATH, e);
            ApiError::decode(e.to_string())
        })
    }

    /// 登录
    pub async fn login(&self, req: &LoginRequest) -> ApiResult<LoginResponse> {
        self.send(req).await
    }

    /// 注册
    pub async fn register(&self, req: &RegisterRequest) -> ApiResult<RegisterResponse> {
        self.send(req).await
    }

    /// 获取时段表
    pub async fn list_slots(&self) -> ApiResult<SlotMap> {
        self.send(&ListSlotsRequest).await
    }

    /// 创建预约
    pub async fn create_booking(&self, req: &CreateBookingRequest) -> ApiResult<Booking> {
        self.send(req).await
    }

    /// 获取某个邮箱名下的预约
    pub async fn list_own_bookings(&self, email: &str) -> ApiResult<Vec<Booking>> {
        let req = ListOwnBookingsRequest {
            email: email.to_string(),
        };
        self.send(&req).await
    }

    /// 获取全部预约（管理员）
    pub async fn list_all_bookings(&self) -> ApiResult<Vec<Booking>> {
        self.send(&ListAllBookingsRequest).await
    }
}

/// 需要鉴权的接口没有令牌时不发请求，直接按 401 处理
fn auth_header(needs_auth: bool, token: Option<&str>) -> ApiResult<Option<String>> {
    if !needs_auth {
        return Ok(None);
    }
    let token = token.filter(|t| !t.is_empty()).ok_or_else(|| {
        ApiError::new(ApiErrorKind::Unauthorized, Some("no session token".into()))
    })?;
    Ok(Some(bearer(token)))
}

/// 一次失败调用对界面的影响
#[derive(Debug, Clone, PartialEq, Eq)]
struct FailureOutcome {
    message: String,
    /// 清会话并回到登录页
    sign_out: bool,
}

fn failure_outcome(err: &ApiError, fallback: &str) -> FailureOutcome {
    FailureOutcome {
        message: err.user_message(fallback),
        sign_out: err.is_unauthorized(),
    }
}

/// 把失败的调用反馈给用户
///
/// 401 会清掉本地会话并回到登录页；其它情况只提示，不导航，表单保持原样。
pub fn report_failure(
    err: &ApiError,
    fallback: &str,
    notifier: Notifier,
    session: SessionContext,
    router: RouterService,
) {
    let outcome = failure_outcome(err, fallback);
    notifier.error(outcome.message);
    if outcome.sign_out {
        session.sign_out();
        router.navigate_to(AppRoute::Login);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_shared::error::ErrorBody;

    #[test]
    fn authenticated_call_without_token_is_unauthorized() {
        let err = auth_header(true, None).unwrap_err();
        assert!(err.is_unauthorized());
        assert!(auth_header(true, Some("")).unwrap_err().is_unauthorized());
        assert_eq!(auth_header(true, Some("tok")).unwrap(), Some(bearer("tok")));
        assert_eq!(auth_header(false, None).unwrap(), None);
    }

    #[test]
    fn unauthorized_failure_signs_out() {
        let err = ApiError::from_response(401, None);
        let outcome = failure_outcome(&err, "Booking failed! Please try again.");
        assert!(outcome.sign_out);
        assert_eq!(outcome.message, "Please login again");
    }

    #[test]
    fn other_failures_keep_the_session() {
        let bad = ApiError::from_response(
            400,
            Some(ErrorBody {
                message: Some("Slot already booked".into()),
            }),
        );
        let outcome = failure_outcome(&bad, "Booking failed! Please try again.");
        assert!(!outcome.sign_out);
        assert_eq!(outcome.message, "Slot already booked");

        let offline = failure_outcome(&ApiError::network("offline"), "Login failed! Please try again.");
        assert!(!offline.sign_out);
        assert_eq!(offline.message, "Login failed! Please try again.");
    }

    #[test]
    fn base_url_joins_paths_without_double_slashes() {
        let api = ClinicApi::new("http://localhost:5000/", None);
        assert_eq!(api.url("/api/slots"), "http://localhost:5000/api/slots");
        assert_eq!(api.url("api/slots"), "http://localhost:5000/api/slots");
    }
}
