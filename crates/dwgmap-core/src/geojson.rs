//! GeoJSON输出模型
//!
//! 手工建模的serde结构，字段顺序固定，保证相同输入的序列化结果
//! 字节一致。坐标以 `(x, y)` 元组表示，序列化为 `[x, y]` 数组。

use serde::Serialize;

/// 要素几何
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<(f64, f64)> },
    Polygon { coordinates: Vec<Vec<(f64, f64)>> },
}

impl Geometry {
    /// 遍历几何中的全部坐标点
    pub fn points(&self) -> Box<dyn Iterator<Item = (f64, f64)> + '_> {
        match self {
            Geometry::LineString { coordinates } => Box::new(coordinates.iter().copied()),
            Geometry::Polygon { coordinates } => Box::new(coordinates.iter().flatten().copied()),
        }
    }
}

/// 要素属性，至少包含图层名
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    pub layer: String,
    /// 仅多段线携带
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
}

impl FeatureProperties {
    pub fn layer(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            closed: None,
        }
    }

    pub fn with_closed(layer: impl Into<String>, closed: bool) -> Self {
        Self {
            layer: layer.into(),
            closed: Some(closed),
        }
    }
}

/// GeoJSON要素
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub geometry: Geometry,
    pub properties: FeatureProperties,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: FeatureProperties) -> Self {
        Self {
            kind: "Feature",
            geometry,
            properties,
        }
    }
}

/// GeoJSON要素集合，要素顺序与实体出现顺序一致
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    /// 整体范围 `[west, south, east, north]`，空集合时省略
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<[f64; 4]>,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>, bbox: Option<[f64; 4]>) -> Self {
        Self {
            kind: "FeatureCollection",
            bbox,
            features,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), None)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
