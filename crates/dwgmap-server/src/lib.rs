//! DWGMap HTTP服务
//!
//! 单一请求边界：接收上传的DWG文件，依次运行外部转换工具、
//! 交换格式解析与几何转换引擎，返回GeoJSON要素集合。
//!
//! 转换器与解析器作为能力参数注入（[`AppState`] 的类型参数），
//! 测试时可替换为确定性假实现，无需真实的外部工具。

pub mod config;
pub mod cors;
pub mod error;
pub mod pipeline;
pub mod routes;

pub use config::{ConfigError, ConverterConfig, ServerConfig, TessellationSettings};
pub use error::ApiError;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use dwgmap_core::TessellationConfig;
use dwgmap_file::{DrawingConverter, ExchangeParser};
use std::sync::Arc;

/// 上传体积上限
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// 路由间共享的应用状态
pub struct AppState<C, P> {
    pub converter: C,
    pub parser: P,
    pub tessellation: TessellationConfig,
    pub map_token: Option<String>,
}

pub fn build_router<C, P>(state: Arc<AppState<C, P>>) -> Router
where
    C: DrawingConverter + 'static,
    P: ExchangeParser + 'static,
{
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/config", get(routes::client_config))
        .route("/convert", post(routes::convert))
        .layer(middleware::from_fn(cors::permissive))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use dwgmap_core::{DrawingEntity, Line, Point2};
    use dwgmap_file::FileError;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::future::Future;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// 记录调用次数的假转换器；`exit_code` 为Some时模拟工具失败
    #[derive(Clone)]
    struct FakeConverter {
        calls: Arc<AtomicUsize>,
        exit_code: Option<i32>,
    }

    impl DrawingConverter for FakeConverter {
        fn convert(
            &self,
            _input: &Path,
            output: &Path,
        ) -> impl Future<Output = Result<(), FileError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let exit_code = self.exit_code;
            let output = output.to_path_buf();
            async move {
                match exit_code {
                    Some(code) => Err(FileError::ToolExit {
                        tool: "dwg2dxf".to_string(),
                        code,
                    }),
                    None => Ok(tokio::fs::write(&output, "converted").await?),
                }
            }
        }
    }

    /// 固定返回一条线段的假解析器
    #[derive(Clone)]
    struct StaticParser;

    impl ExchangeParser for StaticParser {
        fn parse(&self, text: &str) -> Result<Vec<DrawingEntity>, FileError> {
            assert_eq!(text, "converted");
            Ok(vec![DrawingEntity::Line(Line::new(
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 1.0),
                "0",
            ))])
        }
    }

    fn test_router(exit_code: Option<i32>) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let state = Arc::new(AppState {
            converter: FakeConverter {
                calls: calls.clone(),
                exit_code,
            },
            parser: StaticParser,
            tessellation: TessellationConfig::default(),
            map_token: None,
        });
        (build_router(state), calls)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    const BOUNDARY: &str = "X-DWGMAP-BOUNDARY";

    fn multipart_request(field_name: &str, payload: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
                 filename=\"plan.dwg\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/convert")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_probe() {
        let (router, _) = test_router(None);
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn test_convert_returns_feature_collection() {
        let (router, calls) = test_router(None);
        let response = router
            .oneshot(multipart_request("file", b"dwg bytes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let payload = body_json(response).await;
        assert_eq!(payload["type"], "FeatureCollection");
        assert_eq!(payload["features"].as_array().unwrap().len(), 1);
        assert_eq!(payload["features"][0]["geometry"]["type"], "LineString");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_file_is_400_and_skips_pipeline() {
        let (router, calls) = test_router(None);
        let response = router
            .oneshot(multipart_request("attachment", b"whatever"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "No file uploaded" })
        );
        // 400时任何管线阶段都不应被触发
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_tool_failure_is_500_with_tool_and_code() {
        let (router, _) = test_router(Some(2));
        let response = router
            .oneshot(multipart_request("file", b"dwg bytes"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let payload = body_json(response).await;
        let message = payload["error"].as_str().unwrap();
        assert!(message.contains("dwg2dxf"));
        assert!(message.contains("exited with code 2"));
    }

    #[tokio::test]
    async fn test_options_preflight_short_circuits_with_204() {
        let (router, _) = test_router(None);
        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/convert")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_METHODS)
                .unwrap(),
            "GET,POST,OPTIONS"
        );
    }

    #[tokio::test]
    async fn test_client_config_exposes_token() {
        let state = Arc::new(AppState {
            converter: FakeConverter {
                calls: Arc::new(AtomicUsize::new(0)),
                exit_code: None,
            },
            parser: StaticParser,
            tessellation: TessellationConfig::default(),
            map_token: Some("pk.test".to_string()),
        });
        let response = build_router(state)
            .oneshot(Request::get("/config").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await, json!({ "token": "pk.test" }));
    }
}
