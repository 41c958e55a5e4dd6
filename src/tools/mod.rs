use egui::Color32;
use serde::{Deserialize, Serialize};

pub mod shape_preview;
pub mod state_machine;

pub use shape_preview::{ShapeGeometry, ShapeKind, ShapePreviewRenderer};
pub use state_machine::{Gesture, GestureKind, GestureSnapshot, ToolStateMachine};

/// Every tool the toolbar offers. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Brush,
    Eraser,
    Circle,
    Square,
    Triangle,
    Arrow,
    Select,
    Move,
}

impl Tool {
    /// Toolbar order: selection tools, freehand tools, then shapes.
    pub const ALL: [Tool; 8] = [
        Tool::Select,
        Tool::Move,
        Tool::Brush,
        Tool::Eraser,
        Tool::Circle,
        Tool::Square,
        Tool::Triangle,
        Tool::Arrow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Brush => "Brush",
            Tool::Eraser => "Eraser",
            Tool::Circle => "Circle",
            Tool::Square => "Square",
            Tool::Triangle => "Triangle",
            Tool::Arrow => "Arrow",
            Tool::Select => "Select",
            Tool::Move => "Move",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tool::Brush => "🖌",
            Tool::Eraser => "⌫",
            Tool::Circle => "○",
            Tool::Square => "□",
            Tool::Triangle => "△",
            Tool::Arrow => "➡",
            Tool::Select => "⬚",
            Tool::Move => "✥",
        }
    }

    /// The outline this tool drags out, if it is a shape tool.
    pub fn shape(&self) -> Option<ShapeKind> {
        match self {
            Tool::Circle => Some(ShapeKind::Circle),
            Tool::Square => Some(ShapeKind::Square),
            Tool::Triangle => Some(ShapeKind::Triangle),
            Tool::Arrow => Some(ShapeKind::Arrow),
            _ => None,
        }
    }

    pub fn is_freehand(&self) -> bool {
        matches!(self, Tool::Brush | Tool::Eraser)
    }

    pub fn is_selection(&self) -> bool {
        matches!(self, Tool::Select | Tool::Move)
    }
}

/// Brush sizes offered by the toolbar, in screen pixels.
pub const BRUSH_SIZES: [f32; 3] = [2.0, 5.0, 10.0];
pub const DEFAULT_BRUSH_SIZE: f32 = 5.0;

/// Tool state owned by the host UI. The canvas reads it when a gesture
/// starts and never holds on to it afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub active_tool: Tool,
    pub primary_color: Color32,
    pub secondary_color: Color32,
    /// Stroke width in screen pixels
    pub brush_size: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            active_tool: Tool::Brush,
            primary_color: Color32::BLACK,
            secondary_color: Color32::WHITE,
            brush_size: DEFAULT_BRUSH_SIZE,
        }
    }
}
