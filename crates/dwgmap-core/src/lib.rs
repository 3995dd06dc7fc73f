//! DWGMap 核心转换引擎
//!
//! 将外部解析器产出的图纸实体（线段、多段线、圆、圆弧）转换为
//! GeoJSON 要素集合，供地图前端渲染。
//!
//! 转换是纯函数：不持有状态，相同的实体序列总是产生字节一致的输出，
//! 可在并发请求间安全复用。

pub mod convert;
pub mod entity;
pub mod geojson;
pub mod math;

pub use convert::{convert_entities, ConversionReport, TessellationConfig};
pub use entity::{Arc, Circle, DrawingEntity, Line, Polyline, UNNAMED_LAYER};
pub use geojson::{Feature, FeatureCollection, FeatureProperties, Geometry};
pub use math::{BoundingBox2, Point2};
