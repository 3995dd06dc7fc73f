//! 实体到GeoJSON要素的转换引擎
//!
//! 每个可识别实体映射为至多一个要素，曲线实体按固定分段数细分采样。
//! 转换本身从不失败：无法识别或退化的实体按丢弃策略跳过并计数，
//! 不会使整个集合失败。

use crate::entity::{Arc, Circle, DrawingEntity, Line, Polyline};
use crate::geojson::{Feature, FeatureCollection, FeatureProperties, Geometry};
use crate::math::{BoundingBox2, Point2};
use tracing::debug;

/// 曲线细分配置
///
/// 默认值与上游渲染保持一致，调整只影响采样密度，不改变映射规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessellationConfig {
    /// 圆的分段数
    pub circle_segments: usize,
    /// 圆弧的分段数
    pub arc_segments: usize,
}

impl Default for TessellationConfig {
    fn default() -> Self {
        Self {
            circle_segments: 64,
            arc_segments: 64,
        }
    }
}

/// 转换结果
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub collection: FeatureCollection,
    /// 被丢弃（未产生要素）的实体数
    pub dropped: usize,
}

/// 将实体序列转换为要素集合，保持出现顺序
pub fn convert_entities(
    entities: &[DrawingEntity],
    config: &TessellationConfig,
) -> ConversionReport {
    let mut features = Vec::with_capacity(entities.len());
    let mut dropped = 0usize;

    for entity in entities {
        match convert_entity(entity, config) {
            Some(feature) => features.push(feature),
            None => {
                dropped += 1;
                debug!(
                    kind = entity.kind(),
                    layer = entity.layer(),
                    "entity dropped, no feature mapping"
                );
            }
        }
    }

    let bbox = collection_bounds(&features);
    ConversionReport {
        collection: FeatureCollection::new(features, bbox),
        dropped,
    }
}

/// 单个实体的转换；无法映射时返回None
fn convert_entity(entity: &DrawingEntity, config: &TessellationConfig) -> Option<Feature> {
    match entity {
        DrawingEntity::Line(line) => Some(line_feature(line)),
        DrawingEntity::Polyline(polyline) => polyline_feature(polyline),
        DrawingEntity::Circle(circle) => Some(circle_feature(circle, config.circle_segments)),
        DrawingEntity::Arc(arc) => Some(arc_feature(arc, config.arc_segments)),
        DrawingEntity::Unsupported { .. } => None,
    }
}

fn line_feature(line: &Line) -> Feature {
    let coordinates = vec![(line.start.x, line.start.y), (line.end.x, line.end.y)];
    Feature::new(
        Geometry::LineString { coordinates },
        FeatureProperties::layer(&line.layer),
    )
}

/// 顶点序列原样透传：不去重，闭合时也不补终点。
/// 不足两个顶点无法构成合法的LineString，按丢弃处理。
fn polyline_feature(polyline: &Polyline) -> Option<Feature> {
    if polyline.vertices.len() < 2 {
        return None;
    }
    let coordinates = polyline.vertices.iter().map(|v| (v.x, v.y)).collect();
    Some(Feature::new(
        Geometry::LineString { coordinates },
        FeatureProperties::with_closed(&polyline.layer, polyline.closed),
    ))
}

/// 圆细分为 `segments + 1` 个点的单环多边形，
/// i=0 与 i=segments 分别落在角度 0 与 2π 上，首尾点重合成闭环。
fn circle_feature(circle: &Circle, segments: usize) -> Feature {
    let mut ring = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let a = (i as f64 / segments as f64) * std::f64::consts::TAU;
        ring.push((
            circle.center.x + circle.radius * a.cos(),
            circle.center.y + circle.radius * a.sin(),
        ));
    }
    Feature::new(
        Geometry::Polygon {
            coordinates: vec![ring],
        },
        FeatureProperties::layer(&circle.layer),
    )
}

/// 圆弧在角度上线性插值采样（非弧长均匀）。
/// `end < start` 时沿负向扫过短跨度，不做 2π 回绕归一化，
/// 与上游行为保持一致。
fn arc_feature(arc: &Arc, segments: usize) -> Feature {
    let start = arc.start_angle.to_radians();
    let end = arc.end_angle.to_radians();
    let mut coordinates = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f64 / segments as f64;
        let a = start + (end - start) * t;
        coordinates.push((
            arc.center.x + arc.radius * a.cos(),
            arc.center.y + arc.radius * a.sin(),
        ));
    }
    Feature::new(
        Geometry::LineString { coordinates },
        FeatureProperties::layer(&arc.layer),
    )
}

/// 集合整体范围 `[west, south, east, north]`
fn collection_bounds(features: &[Feature]) -> Option<[f64; 4]> {
    let points = features
        .iter()
        .flat_map(|feature| feature.geometry.points())
        .map(|(x, y)| Point2::new(x, y));
    BoundingBox2::from_points(points).map(|bbox| bbox.to_geojson())
}
