use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::error::CanvasResult;
use crate::tools::ToolSettings;

/// Swatches offered by the palette.
pub const COLOR_PALETTE: [Color32; 8] = [
    Color32::from_rgb(0x00, 0x00, 0x00),
    Color32::from_rgb(0xff, 0xff, 0xff),
    Color32::from_rgb(0xff, 0x00, 0x00),
    Color32::from_rgb(0x00, 0xff, 0x00),
    Color32::from_rgb(0x00, 0x00, 0xff),
    Color32::from_rgb(0xff, 0xff, 0x00),
    Color32::from_rgb(0x00, 0xff, 0xff),
    Color32::from_rgb(0xff, 0x00, 0xff),
];

/// Background colors offered next to the palette.
pub const BACKGROUND_PRESETS: [Color32; 6] = [
    Color32::from_rgb(0xff, 0xff, 0xff),
    Color32::from_rgb(0xf3, 0xf4, 0xf6),
    Color32::from_rgb(0xe5, 0xe7, 0xeb),
    Color32::from_rgb(0xfe, 0xf3, 0xc7),
    Color32::from_rgb(0xdb, 0xea, 0xfe),
    Color32::from_rgb(0xd1, 0xfa, 0xe5),
];

pub const DEFAULT_BACKGROUND: Color32 = Color32::WHITE;
pub const EXPORT_FILE_NAME: &str = "raster_paint.png";

/// Everything the app restores on the next launch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub tools: ToolSettings,
    pub background: Color32,
    pub show_grid: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            tools: ToolSettings::default(),
            background: DEFAULT_BACKGROUND,
            show_grid: false,
        }
    }
}

impl Preferences {
    pub fn from_json(json: &str) -> CanvasResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> CanvasResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
