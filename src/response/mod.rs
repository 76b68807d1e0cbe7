use std::fmt::Display;

use axum::{http::StatusCode, Json};
use serde::{ser::SerializeStruct, Serialize};
use serde_json::{json, Value};
/// 响应数据
#[derive(Debug)]
pub struct Response {
    /// 响应状态码
    code: StatusCode,
    status: i32,
    data: Value,
}

impl axum::response::IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        let code = self.code;
        (code, Json(self)).into_response()
    }
}

impl Serialize for Response {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("Response", 3)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("code", &self.code.as_u16())?;
        s.serialize_field("data", &self.data)?;
        s.end()
    }
}
impl Response {
    pub fn new(code: StatusCode, status: i32, data: Value) -> Response {
        Self { code, status, data }
    }
    pub fn ok(data: Value) -> Self {
        Self {
            code: StatusCode::OK,
            status: 0,
            data,
        }
    }
    pub fn empty() -> Self {
        Self {
            code: StatusCode::OK,
            status: 0,
            data: json!("OK"),
        }
    }
    /// Missing, expired or forged token
    pub fn token_error(e: impl Display) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, -1, json!(e.to_string()))
    }
    /// 内部错误
    pub fn internal_server_error(e: impl Display) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, -1, json!(e.to_string()))
    }
    /// 密码错误
    pub fn wrong_password() -> Self {
        Self::new(StatusCode::OK, 5, json!("Invalid credentials"))
    }
    pub fn code(&self) -> StatusCode {
        self.code
    }
    pub fn status(&self) -> i32 {
        self.status
    }
    pub fn data(&self) -> &Value {
        &self.data
    }
}

impl From<crate::Error> for Response {
    fn from(value: crate::Error) -> Self {
        tracing::error!("request failed: {value}");
        Response::internal_server_error(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_status_and_code() {
        let value = serde_json::to_value(Response::ok(json!([1, 2]))).unwrap();
        assert_eq!(value, json!({"status": 0, "code": 200, "data": [1, 2]}));
    }

    #[test]
    fn token_error_is_unauthorized() {
        let resp = Response::token_error("Invalid token");
        assert_eq!(resp.code(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.status(), -1);
        assert_eq!(resp.data(), &json!("Invalid token"));
    }

    #[test]
    fn store_error_becomes_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let resp: Response = crate::Error::from(io).into();
        assert_eq!(resp.code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.data().as_str().unwrap().contains("denied"));
    }

    #[test]
    fn csv_error_becomes_internal() {
        let csv = csv::Error::from(std::io::Error::new(std::io::ErrorKind::Other, "torn row"));
        let resp: Response = crate::Error::from(csv).into();
        assert_eq!(resp.code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.data().as_str().unwrap().contains("torn row"));
    }

    #[test]
    fn wrong_password_keeps_http_ok() {
        let resp = Response::wrong_password();
        assert_eq!(resp.code(), StatusCode::OK);
        assert_eq!(resp.status(), 5);
    }
}
