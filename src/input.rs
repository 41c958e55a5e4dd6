use egui::{Context, PointerButton, Pos2, Rect};

/// Pressed-button mask carried by pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerButtons(pub u8);

impl PointerButtons {
    pub const NONE: Self = Self(0);
    pub const PRIMARY: Self = Self(1);
    pub const SECONDARY: Self = Self(2);
    pub const MIDDLE: Self = Self(4);

    pub fn contains(&self, other: PointerButtons) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    /// True only when the primary button is the sole button held.
    pub fn is_primary_only(&self) -> bool {
        *self == Self::PRIMARY
    }

    fn from_pointer(pointer: &egui::PointerState) -> Self {
        let mut mask = 0;
        for (button, bit) in [
            (PointerButton::Primary, Self::PRIMARY),
            (PointerButton::Secondary, Self::SECONDARY),
            (PointerButton::Middle, Self::MIDDLE),
        ] {
            if pointer.button_down(button) {
                mask |= bit.0;
            }
        }
        Self(mask)
    }
}

impl std::ops::BitOr for PointerButtons {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Pointer input in canvas-local screen coordinates (origin at the canvas
/// widget's top-left corner).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown { position: Pos2, buttons: PointerButtons },
    PointerMove { position: Pos2, buttons: PointerButtons },
    PointerUp { position: Pos2 },
    PointerLeave,
    /// Positive `delta_y` scrolls down, which zooms out.
    Wheel { position: Pos2, delta_y: f32 },
}

/// Converts raw egui input into [`InputEvent`]s for one canvas widget.
#[derive(Debug, Clone)]
pub struct InputHandler {
    canvas_rect: Rect,
    last_pointer_pos: Option<Pos2>,
    inside: bool,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            canvas_rect,
            last_pointer_pos: None,
            inside: false,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_local(&self, pos: Pos2) -> Pos2 {
        pos - self.canvas_rect.min.to_vec2()
    }

    /// Process this frame's egui input. Events come out in the order a
    /// browser would deliver them: leave, down, move, wheel, up.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            let hover = input.pointer.hover_pos();
            let inside = hover.is_some_and(|pos| self.canvas_rect.contains(pos));

            if self.inside && !inside {
                events.push(InputEvent::PointerLeave);
            }

            if let Some(pos) = hover.filter(|_| inside) {
                let position = self.to_local(pos);
                let buttons = PointerButtons::from_pointer(&input.pointer);

                if input.pointer.any_pressed() {
                    events.push(InputEvent::PointerDown { position, buttons });
                }
                if Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove { position, buttons });
                }
                let scroll = input.raw_scroll_delta.y;
                if scroll != 0.0 {
                    // egui reports wheel-up as positive; flip to the DOM convention.
                    events.push(InputEvent::Wheel {
                        position,
                        delta_y: -scroll,
                    });
                }
                if input.pointer.any_released() {
                    events.push(InputEvent::PointerUp { position });
                }
            }

            self.inside = inside;
            self.last_pointer_pos = hover;
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_mask() {
        let both = PointerButtons::PRIMARY | PointerButtons::MIDDLE;
        assert!(both.contains(PointerButtons::MIDDLE));
        assert!(!both.contains(PointerButtons::SECONDARY));
        assert!(!both.is_primary_only());
        assert!(PointerButtons::PRIMARY.is_primary_only());
        assert!(!PointerButtons::NONE.contains(PointerButtons::NONE));
    }
}
