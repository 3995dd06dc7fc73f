//! DWGMap 主程序入口
//!
//! 初始化日志、加载配置、装配真实的转换管线并启动HTTP服务。

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dwgmap_file::{Dwg2Dxf, DxfExchangeParser};
use dwgmap_server::{build_router, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志，RUST_LOG可覆盖默认等级
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::discover()?;
    info!(
        port = config.port,
        tool = config.converter.tool.as_str(),
        "starting dwgmap"
    );

    let converter = Dwg2Dxf::new(
        config.converter.tool.clone(),
        Duration::from_secs(config.converter.timeout_secs),
    );
    let state = Arc::new(AppState {
        converter,
        parser: DxfExchangeParser,
        tessellation: config.tessellation.into(),
        map_token: config.map_token.clone(),
    });

    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}
