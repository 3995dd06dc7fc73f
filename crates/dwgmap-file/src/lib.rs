//! DWG/DXF 文件管线
//!
//! 两个可注入的能力边界：
//! - [`DrawingConverter`]：调用外部工具把DWG解码为DXF交换格式
//! - [`ExchangeParser`]：把DXF文本解析为实体列表
//!
//! DWG二进制解码与DXF语法解析都委托外部实现，本仓库不做。

pub mod converter;
pub mod error;
pub mod parser;

pub use converter::{DrawingConverter, Dwg2Dxf};
pub use error::FileError;
pub use parser::{DxfExchangeParser, ExchangeParser};
