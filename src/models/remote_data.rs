//! 远程数据状态
//!
//! 后端请求的结果以状态加载荷的形式返回，而不是直接返回 `Result`：
//! 调用方需要区分"进行中"、"成功"、"失败"以及"已过期"等状态。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// 请求状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestState {
    RequestPending,
    ResponsePending,
    Success,
    Error,
    SuccessStale,
    ErrorStale,
}

impl RequestState {
    pub fn is_loading(self) -> bool {
        matches!(self, Self::RequestPending | Self::ResponsePending)
    }

    /// 仅 `Success`，过期的成功不算
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    pub fn is_stale(self) -> bool {
        matches!(self, Self::SuccessStale | Self::ErrorStale)
    }

    pub fn has_succeeded(self) -> bool {
        matches!(self, Self::Success | Self::SuccessStale)
    }

    pub fn has_failed(self) -> bool {
        matches!(self, Self::Error | Self::ErrorStale)
    }

    pub fn has_completed(self) -> bool {
        !self.is_loading()
    }
}

/// 远程数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteData<T> {
    pub state: RequestState,
    pub payload: Option<T>,
    pub status_code: Option<u16>,
    pub error_message: Option<String>,
    pub time_completed: Option<DateTime<Utc>>,
}

impl<T> RemoteData<T> {
    pub fn success(payload: T) -> Self {
        Self::success_with_status(payload, 200)
    }

    pub fn success_with_status(payload: T, status_code: u16) -> Self {
        Self {
            state: RequestState::Success,
            payload: Some(payload),
            status_code: Some(status_code),
            error_message: None,
            time_completed: Some(Utc::now()),
        }
    }

    /// 成功但没有载荷（例如 204）
    pub fn no_content(status_code: u16) -> Self {
        Self {
            state: RequestState::Success,
            payload: None,
            status_code: Some(status_code),
            error_message: None,
            time_completed: Some(Utc::now()),
        }
    }

    /// 失败；`status_code` 为 0 表示未收到响应
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            state: RequestState::Error,
            payload: None,
            status_code: Some(status_code),
            error_message: Some(message.into()),
            time_completed: Some(Utc::now()),
        }
    }

    pub fn pending() -> Self {
        Self {
            state: RequestState::ResponsePending,
            payload: None,
            status_code: None,
            error_message: None,
            time_completed: None,
        }
    }

    /// 标记为过期，载荷保留
    pub fn into_stale(mut self) -> Self {
        self.state = match self.state {
            RequestState::Success | RequestState::SuccessStale => RequestState::SuccessStale,
            RequestState::Error | RequestState::ErrorStale => RequestState::ErrorStale,
            pending => pending,
        };
        self
    }

    pub fn is_success(&self) -> bool {
        self.state.is_success()
    }

    pub fn has_succeeded(&self) -> bool {
        self.state.has_succeeded()
    }

    pub fn has_failed(&self) -> bool {
        self.state.has_failed()
    }

    pub fn has_completed(&self) -> bool {
        self.state.has_completed()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteData<U> {
        RemoteData {
            state: self.state,
            payload: self.payload.map(f),
            status_code: self.status_code,
            error_message: self.error_message,
            time_completed: self.time_completed,
        }
    }

    /// 转换载荷；转换失败时变为错误状态，保留原状态码
    pub fn try_map<U, E: std::fmt::Display>(
        self,
        f: impl FnOnce(T) -> std::result::Result<U, E>,
    ) -> RemoteData<U> {
        let status_code = self.status_code;
        match self.payload.map(f) {
            Some(Err(e)) => RemoteData::error(status_code.unwrap_or(0), e.to_string()),
            Some(Ok(payload)) => RemoteData {
                state: self.state,
                payload: Some(payload),
                status_code,
                error_message: self.error_message,
                time_completed: self.time_completed,
            },
            None => RemoteData {
                state: self.state,
                payload: None,
                status_code,
                error_message: self.error_message,
                time_completed: self.time_completed,
            },
        }
    }

    /// 转换为 `Result`
    ///
    /// 成功且有载荷时返回载荷；成功无载荷视为不存在。
    pub fn into_result(self, what: &str) -> Result<T> {
        if self.state.is_loading() {
            return Err(AppError::Internal(format!("{what}: request still pending")));
        }
        if self.state.has_succeeded() {
            return self
                .payload
                .ok_or_else(|| AppError::NotFound(what.to_string()));
        }
        let message = self
            .error_message
            .unwrap_or_else(|| "unknown error".to_string());
        match self.status_code.unwrap_or(0) {
            0 => Err(AppError::Connection(format!("{what}: {message}"))),
            404 => Err(AppError::NotFound(what.to_string())),
            408 | 504 => Err(AppError::Timeout(format!("{what}: {message}"))),
            status => Err(AppError::Rest {
                status,
                message: format!("{what}: {message}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(RequestState::Success.is_success());
        assert!(!RequestState::SuccessStale.is_success());
        assert!(RequestState::SuccessStale.has_succeeded());
        assert!(RequestState::ErrorStale.has_failed());
        assert!(RequestState::RequestPending.is_loading());
        assert!(!RequestState::ResponsePending.has_completed());
    }

    #[test]
    fn test_into_stale_keeps_payload() {
        let rd = RemoteData::success(5).into_stale();
        assert_eq!(rd.state, RequestState::SuccessStale);
        assert_eq!(rd.payload(), Some(&5));
        assert!(!rd.is_success());
    }

    #[test]
    fn test_map() {
        let rd = RemoteData::success(2).map(|v| v * 10);
        assert_eq!(rd.payload, Some(20));
        let rd: RemoteData<i32> = RemoteData::error(500, "boom");
        assert_eq!(rd.map(|v| v + 1).payload, None);

        let rd = RemoteData::success("x").try_map(|s| s.parse::<i32>());
        assert!(rd.has_failed());
        assert_eq!(rd.status_code, Some(200));
    }

    #[test]
    fn test_into_result_mapping() {
        assert_eq!(RemoteData::success("x").into_result("item").unwrap(), "x");
        assert!(matches!(
            RemoteData::<()>::error(404, "gone").into_result("item"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            RemoteData::<()>::error(0, "refused").into_result("item"),
            Err(AppError::Connection(_))
        ));
        assert!(matches!(
            RemoteData::<()>::error(504, "slow").into_result("item"),
            Err(AppError::Timeout(_))
        ));
        assert!(matches!(
            RemoteData::<()>::error(500, "boom").into_result("item"),
            Err(AppError::Rest { status: 500, .. })
        ));
        assert!(matches!(
            RemoteData::<()>::no_content(204).into_result("item"),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            RemoteData::<()>::pending().into_result("item"),
            Err(AppError::Internal(_))
        ));
    }
}
