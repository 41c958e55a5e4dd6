use egui::{Color32, Rect, Vec2};

use crate::tools::GestureKind;

/// Notifications the canvas sends to its host.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    GestureStarted(GestureKind),
    GestureEnded {
        kind: GestureKind,
        /// False when the gesture left no mark (aborted shape, click without drag)
        committed: bool,
    },
    /// Normalized bounds of the new selection, `None` once cleared
    SelectionChanged(Option<Rect>),
    ClipboardChanged {
        width: usize,
        height: usize,
    },
    ViewChanged {
        scale: f32,
        translation: Vec2,
    },
    /// The host is expected to restyle the page behind the canvas
    BackgroundChanged(Color32),
    GridToggled(bool),
    Resized {
        width: usize,
        height: usize,
    },
    Cleared,
}
