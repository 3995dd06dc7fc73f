//! 图纸实体模型
//!
//! 外部交换格式解析器的输出即转换引擎的输入契约。
//! 支持的图元：
//! - 线段 (LINE)
//! - 多段线 (LWPOLYLINE / POLYLINE)
//! - 圆 (CIRCLE)
//! - 圆弧 (ARC)
//!
//! 其余实体类型以 [`DrawingEntity::Unsupported`] 保留类型名，
//! 由引擎按丢弃策略处理。

use crate::math::Point2;
use serde::{Deserialize, Serialize};

/// 图层缺失时的占位名
pub const UNNAMED_LAYER: &str = "unnamed";

/// 实体类型枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawingEntity {
    Line(Line),
    Polyline(Polyline),
    Circle(Circle),
    Arc(Arc),
    /// 暂不支持的实体类型，保留原始类型名以便观测
    Unsupported { kind: String, layer: String },
}

impl DrawingEntity {
    /// 实体所在图层
    pub fn layer(&self) -> &str {
        match self {
            DrawingEntity::Line(line) => &line.layer,
            DrawingEntity::Polyline(polyline) => &polyline.layer,
            DrawingEntity::Circle(circle) => &circle.layer,
            DrawingEntity::Arc(arc) => &arc.layer,
            DrawingEntity::Unsupported { layer, .. } => layer,
        }
    }

    /// 实体类型名称
    pub fn kind(&self) -> &str {
        match self {
            DrawingEntity::Line(_) => "LINE",
            DrawingEntity::Polyline(_) => "POLYLINE",
            DrawingEntity::Circle(_) => "CIRCLE",
            DrawingEntity::Arc(_) => "ARC",
            DrawingEntity::Unsupported { kind, .. } => kind,
        }
    }
}

/// 线段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
    pub layer: String,
}

impl Line {
    pub fn new(start: Point2, end: Point2, layer: impl Into<String>) -> Self {
        Self {
            start,
            end,
            layer: layer.into(),
        }
    }
}

/// 多段线（LWPOLYLINE与POLYLINE的统一表示）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point2>,
    /// 是否闭合
    pub closed: bool,
    pub layer: String,
}

impl Polyline {
    pub fn new(vertices: Vec<Point2>, closed: bool, layer: impl Into<String>) -> Self {
        Self {
            vertices,
            closed,
            layer: layer.into(),
        }
    }
}

/// 圆
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
    pub layer: String,
}

impl Circle {
    pub fn new(center: Point2, radius: f64, layer: impl Into<String>) -> Self {
        Self {
            center,
            radius,
            layer: layer.into(),
        }
    }
}

/// 圆弧
///
/// 角度为度数，逆时针自正x轴起算；解析层不做换算，
/// 引擎采样时才转为弧度。`end_angle` 可能数值上小于 `start_angle`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Point2,
    pub radius: f64,
    /// 起始角度（度）
    pub start_angle: f64,
    /// 终止角度（度）
    pub end_angle: f64,
    pub layer: String,
}

impl Arc {
    pub fn new(
        center: Point2,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        layer: impl Into<String>,
    ) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            layer: layer.into(),
        }
    }
}
