//! 请求错误与HTTP状态映射
//!
//! 管线任一阶段失败都会中止整个请求，以 `{"error": ...}` 单体返回，
//! 不会伴随部分结果。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dwgmap_file::FileError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// 请求中没有名为 `file` 的表单字段；用户可自行纠正
    #[error("No file uploaded")]
    UploadMissing,

    /// multipart表单本身不可读
    #[error("invalid upload: {0}")]
    Upload(String),

    #[error(transparent)]
    Pipeline(#[from] FileError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UploadMissing => StatusCode::BAD_REQUEST,
            ApiError::Upload(_) | ApiError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, error = %self, "conversion request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
