/// HTTP request handlers
///
/// Handlers are thin: deserialize + validate the request, resolve the acting
/// user from the auth middleware, call the matching service method, and wrap
/// the result in the common success envelope. Status codes for failures come
/// from `AppError`'s `ResponseError` impl, never from handler code.
pub mod comments;
pub mod posts;
pub mod replies;

use actix_web::HttpResponse;
use serde::Serialize;

/// Common success envelope: `{success, message, data}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

/// 200 response with a message and payload
pub fn ok<T: Serialize>(message: &str, data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: Some(message.to_string()),
        data,
    })
}

/// 200 response where the payload speaks for itself (like toggles)
pub fn ok_data<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse {
        success: true,
        message: None,
        data,
    })
}
