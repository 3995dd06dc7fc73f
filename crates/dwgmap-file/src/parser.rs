//! 交换格式解析适配
//!
//! DXF文本的语法解析交给 `dxf` crate，本层把解析结果映射为
//! 引擎的实体模型。圆弧角度保持度数原样透传。

use crate::error::FileError;
use dwgmap_core::{Arc, Circle, DrawingEntity, Line, Point2, Polyline, UNNAMED_LAYER};
use tracing::debug;

/// DXF文本 → 实体列表；注入以便测试时替换为确定性实现
pub trait ExchangeParser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Vec<DrawingEntity>, FileError>;
}

/// 基于 `dxf` crate 的解析器
#[derive(Debug, Clone, Default)]
pub struct DxfExchangeParser;

impl ExchangeParser for DxfExchangeParser {
    fn parse(&self, text: &str) -> Result<Vec<DrawingEntity>, FileError> {
        let mut bytes = text.as_bytes();
        let drawing =
            dxf::Drawing::load(&mut bytes).map_err(|e| FileError::ExchangeParse(e.to_string()))?;
        let entities: Vec<DrawingEntity> = drawing.entities().map(map_entity).collect();
        debug!(count = entities.len(), "parsed exchange entities");
        Ok(entities)
    }
}

/// DXF实体 → 引擎实体
fn map_entity(entity: &dxf::entities::Entity) -> DrawingEntity {
    let layer = if entity.common.layer.is_empty() {
        UNNAMED_LAYER.to_string()
    } else {
        entity.common.layer.clone()
    };

    match &entity.specific {
        dxf::entities::EntityType::Line(line) => DrawingEntity::Line(Line::new(
            Point2::new(line.p1.x, line.p1.y),
            Point2::new(line.p2.x, line.p2.y),
            layer,
        )),

        dxf::entities::EntityType::LwPolyline(lwpoly) => {
            let vertices = lwpoly
                .vertices
                .iter()
                .map(|v| Point2::new(v.x, v.y))
                .collect();
            DrawingEntity::Polyline(Polyline::new(vertices, lwpoly.is_closed(), layer))
        }

        dxf::entities::EntityType::Polyline(poly) => {
            let vertices = poly
                .vertices()
                .map(|v| Point2::new(v.location.x, v.location.y))
                .collect();
            DrawingEntity::Polyline(Polyline::new(vertices, poly.is_closed(), layer))
        }

        dxf::entities::EntityType::Circle(circle) => DrawingEntity::Circle(Circle::new(
            Point2::new(circle.center.x, circle.center.y),
            circle.radius,
            layer,
        )),

        dxf::entities::EntityType::Arc(arc) => DrawingEntity::Arc(Arc::new(
            Point2::new(arc.center.x, arc.center.y),
            arc.radius,
            arc.start_angle,
            arc.end_angle,
            layer,
        )),

        other => DrawingEntity::Unsupported {
            kind: entity_kind_name(other).to_string(),
            layer,
        },
    }
}

/// 常见实体类型的可读名称，其余归入OTHER
fn entity_kind_name(entity_type: &dxf::entities::EntityType) -> &'static str {
    use dxf::entities::EntityType;
    match entity_type {
        EntityType::Text(_) => "TEXT",
        EntityType::MText(_) => "MTEXT",
        EntityType::Insert(_) => "INSERT",
        EntityType::Spline(_) => "SPLINE",
        EntityType::ModelPoint(_) => "POINT",
        EntityType::Ellipse(_) => "ELLIPSE",
        _ => "OTHER",
    }
}
