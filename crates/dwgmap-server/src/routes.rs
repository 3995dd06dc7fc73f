//! HTTP处理器

use crate::error::ApiError;
use crate::{pipeline, AppState};
use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::Json;
use dwgmap_core::FeatureCollection;
use dwgmap_file::{DrawingConverter, ExchangeParser};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// 内嵌的地图页面
const INDEX_HTML: &str = include_str!("../static/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// 存活探针
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// 暴露给前端的客户端配置
#[derive(Debug, Serialize)]
pub struct ClientConfig {
    token: Option<String>,
}

pub async fn client_config<C, P>(State(state): State<Arc<AppState<C, P>>>) -> Json<ClientConfig>
where
    C: DrawingConverter,
    P: ExchangeParser,
{
    Json(ClientConfig {
        token: state.map_token.clone(),
    })
}

/// 接收上传的DWG文件，运行完整转换管线，返回GeoJSON要素集合
pub async fn convert<C, P>(
    State(state): State<Arc<AppState<C, P>>>,
    mut multipart: Multipart,
) -> Result<Json<FeatureCollection>, ApiError>
where
    C: DrawingConverter,
    P: ExchangeParser,
{
    let payload = read_file_field(&mut multipart).await?;
    let report = pipeline::run(
        &state.converter,
        &state.parser,
        &state.tessellation,
        &payload,
    )
    .await?;
    Ok(Json(report.collection))
}

/// 取multipart中名为 `file` 的字段；缺失时管线各阶段不会被触发
async fn read_file_field(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Upload(e.to_string()))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(ApiError::UploadMissing)
}
