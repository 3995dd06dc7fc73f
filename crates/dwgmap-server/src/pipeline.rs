//! 单请求转换管线
//!
//! 上传字节 → 请求级临时目录 → 外部工具 → DXF文本 → 实体列表 → 要素集合。
//! 临时目录随值析构，任一失败路径都会清理上传产物。

use dwgmap_core::{convert_entities, ConversionReport, TessellationConfig};
use dwgmap_file::{DrawingConverter, ExchangeParser, FileError};
use tracing::info;

pub async fn run<C, P>(
    converter: &C,
    parser: &P,
    tessellation: &TessellationConfig,
    payload: &[u8],
) -> Result<ConversionReport, FileError>
where
    C: DrawingConverter,
    P: ExchangeParser,
{
    let workspace = tempfile::tempdir()?;
    let input = workspace.path().join("input.dwg");
    let output = workspace.path().join("output.dxf");

    tokio::fs::write(&input, payload).await?;
    converter.convert(&input, &output).await?;
    let text = tokio::fs::read_to_string(&output).await?;

    let entities = parser.parse(&text)?;
    let report = convert_entities(&entities, tessellation);
    info!(
        entities = entities.len(),
        features = report.collection.len(),
        dropped = report.dropped,
        "drawing converted"
    );
    Ok(report)
}
