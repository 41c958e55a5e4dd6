use egui::{Color32, Pos2, Vec2};
use log::{debug, info};

use super::{ShapeKind, ShapePreviewRenderer, Tool, ToolSettings};
use crate::geometry::ViewTransform;
use crate::input::PointerButtons;
use crate::raster::RasterSurface;
use crate::selection::{FloatingSelection, SelectionModel};

/// Everything a gesture reads from the outside world, frozen at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSnapshot {
    pub tool: Tool,
    /// Primary color when the primary button alone started the gesture,
    /// secondary otherwise; the background color for the eraser.
    pub stroke_color: Color32,
    pub brush_size: f32,
    pub transform: ViewTransform,
}

impl GestureSnapshot {
    pub fn capture(
        settings: &ToolSettings,
        buttons: PointerButtons,
        background: Color32,
        transform: ViewTransform,
    ) -> Self {
        let stroke_color = match settings.active_tool {
            Tool::Eraser => background,
            _ if buttons.is_primary_only() => settings.primary_color,
            _ => settings.secondary_color,
        };
        Self {
            tool: settings.active_tool,
            stroke_color,
            brush_size: settings.brush_size,
            transform,
        }
    }

    /// Brush size converted to buffer units, so lines keep their on-screen
    /// width whatever the zoom.
    pub fn line_width(&self) -> f32 {
        self.transform.screen_len_to_buffer(self.brush_size)
    }

    pub fn to_buffer(&self, screen: Pos2) -> Pos2 {
        self.transform.to_buffer(screen)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Stroke,
    Shape,
    Select,
    Move,
    Pan,
}

/// The one gesture in progress, if any.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Freehand brush or eraser. `path` holds every buffer point visited.
    Stroking {
        snapshot: GestureSnapshot,
        path: Vec<Pos2>,
    },
    ShapeDragging {
        snapshot: GestureSnapshot,
        shape: ShapeKind,
        anchor: Pos2,
        /// Set once the scratch buffer holds an outline
        previewed: bool,
    },
    SelectDragging {
        snapshot: GestureSnapshot,
        anchor: Pos2,
    },
    Moving {
        snapshot: GestureSnapshot,
        anchor: Pos2,
        float: FloatingSelection,
    },
    /// Anchored in screen space; re-anchored after every move.
    Panning { anchor: Pos2 },
}

impl Gesture {
    pub fn kind(&self) -> Option<GestureKind> {
        match self {
            Gesture::Idle => None,
            Gesture::Stroking { .. } => Some(GestureKind::Stroke),
            Gesture::ShapeDragging { .. } => Some(GestureKind::Shape),
            Gesture::SelectDragging { .. } => Some(GestureKind::Select),
            Gesture::Moving { .. } => Some(GestureKind::Move),
            Gesture::Panning { .. } => Some(GestureKind::Pan),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }
}

/// The state a gesture acts on.
#[derive(Debug)]
pub struct GestureTarget<'a> {
    pub surface: &'a mut RasterSurface,
    pub selection: &'a mut SelectionModel,
    pub view: &'a mut ViewTransform,
}

/// What a pointer event changed, so the owner can notify and redraw.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Outcome {
    pub started: Option<GestureKind>,
    /// Kind of the gesture that closed and whether it left a mark
    pub ended: Option<(GestureKind, bool)>,
    pub pixels_changed: bool,
    pub selection_changed: bool,
    pub view_changed: bool,
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        *self == Outcome::default()
    }
}

/// Routes pointer events to the active gesture.
#[derive(Debug, Clone, Default)]
pub struct ToolStateMachine {
    gesture: Gesture,
    renderer: ShapePreviewRenderer,
}

impl ToolStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// True while a shape outline is waiting in the scratch buffer.
    pub fn preview_visible(&self, surface: &RasterSurface) -> bool {
        matches!(self.gesture, Gesture::ShapeDragging { previewed: true, .. }) && surface.scratch_ready()
    }

    /// Opens a gesture for the tool in `settings`. Ignored while another
    /// gesture is still open.
    pub fn pointer_down(
        &mut self,
        target: GestureTarget<'_>,
        settings: &ToolSettings,
        screen: Pos2,
        buttons: PointerButtons,
    ) -> Outcome {
        let mut outcome = Outcome::default();
        if let Some(kind) = self.gesture.kind() {
            debug!("Pointer down ignored: {kind:?} gesture still open");
            return outcome;
        }

        if buttons.contains(PointerButtons::MIDDLE) {
            self.gesture = Gesture::Panning { anchor: screen };
            outcome.started = Some(GestureKind::Pan);
            return outcome;
        }

        let snapshot = GestureSnapshot::capture(settings, buttons, target.surface.background(), *target.view);
        let point = snapshot.to_buffer(screen);

        self.gesture = match snapshot.tool {
            Tool::Select | Tool::Move if target.selection.contains(point) => {
                match FloatingSelection::lift(target.selection, target.surface) {
                    Some(float) => Gesture::Moving {
                        snapshot,
                        anchor: point,
                        float,
                    },
                    None => Gesture::Idle,
                }
            }
            Tool::Select => {
                target.selection.start_selection(point);
                outcome.selection_changed = true;
                Gesture::SelectDragging {
                    snapshot,
                    anchor: point,
                }
            }
            Tool::Move => {
                debug!("Move tool pressed outside the selection");
                Gesture::Idle
            }
            Tool::Brush | Tool::Eraser => Gesture::Stroking {
                snapshot,
                path: vec![point],
            },
            Tool::Circle | Tool::Square | Tool::Triangle | Tool::Arrow => match snapshot.tool.shape() {
                Some(shape) => Gesture::ShapeDragging {
                    snapshot,
                    shape,
                    anchor: point,
                    previewed: false,
                },
                None => Gesture::Idle,
            },
        };

        outcome.started = self.gesture.kind();
        if let Some(kind) = outcome.started {
            debug!("{kind:?} gesture opened with {:?} at {point:?}", snapshot.tool);
        }
        outcome
    }

    /// Feeds the open gesture. Buttons are ignored: the gesture already
    /// captured what it needs at pointer-down.
    pub fn pointer_move(&mut self, target: GestureTarget<'_>, screen: Pos2) -> Outcome {
        let mut outcome = Outcome::default();
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Panning { anchor } => {
                let delta = screen - *anchor;
                *anchor = screen;
                if delta != Vec2::ZERO {
                    target.view.pan_by(delta);
                    outcome.view_changed = true;
                }
            }
            Gesture::Moving {
                snapshot,
                anchor,
                float,
            } => {
                let offset = snapshot.to_buffer(screen) - *anchor;
                float.drag_to(offset, target.surface, target.selection);
                outcome.pixels_changed = true;
                outcome.selection_changed = true;
            }
            Gesture::SelectDragging { snapshot, .. } => {
                let point = snapshot.to_buffer(screen);
                outcome.selection_changed = target.selection.resize_selection(point);
            }
            Gesture::Stroking { snapshot, path } => {
                let point = snapshot.to_buffer(screen);
                if let Some(&last) = path.last() {
                    target
                        .surface
                        .stroke_segment(last, point, snapshot.line_width(), snapshot.stroke_color);
                    outcome.pixels_changed = true;
                }
                path.push(point);
            }
            Gesture::ShapeDragging {
                snapshot,
                shape,
                anchor,
                previewed,
            } => {
                let point = snapshot.to_buffer(screen);
                self.renderer.render(
                    target.surface,
                    *shape,
                    *anchor,
                    point,
                    snapshot.stroke_color,
                    snapshot.line_width(),
                    snapshot.transform.scale(),
                );
                *previewed = true;
                outcome.pixels_changed = true;
            }
        }
        outcome
    }

    /// Closes the gesture, committing a shape preview.
    pub fn pointer_up(&mut self, surface: &mut RasterSurface) -> Outcome {
        self.finish(surface, true)
    }

    /// Leaving the canvas ends the gesture exactly like releasing the button.
    pub fn pointer_leave(&mut self, surface: &mut RasterSurface) -> Outcome {
        self.finish(surface, true)
    }

    /// Drops any open gesture without committing it.
    pub fn abort(&mut self, surface: &mut RasterSurface) -> Outcome {
        self.finish(surface, false)
    }

    fn finish(&mut self, surface: &mut RasterSurface, commit_shape: bool) -> Outcome {
        let mut outcome = Outcome::default();
        let gesture = std::mem::take(&mut self.gesture);
        let Some(kind) = gesture.kind() else {
            return outcome;
        };

        let committed = match gesture {
            Gesture::ShapeDragging { previewed, .. } => {
                let committed = commit_shape && previewed && surface.composite_scratch_onto_primary();
                if !committed {
                    surface.discard_scratch();
                }
                outcome.pixels_changed = previewed;
                committed
            }
            Gesture::Stroking { path, .. } => path.len() > 1,
            Gesture::Moving { float, .. } => float.offset() != Vec2::ZERO,
            Gesture::SelectDragging { .. } | Gesture::Panning { .. } => true,
            Gesture::Idle => false,
        };

        if kind == GestureKind::Shape && !committed {
            info!("Shape preview discarded");
        } else {
            debug!("{kind:?} gesture closed (committed: {committed})");
        }
        outcome.ended = Some((kind, committed));
        outcome
    }
}
