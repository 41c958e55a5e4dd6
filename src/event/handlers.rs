use std::cell::{Cell, RefCell};
use std::rc::Rc;

use egui::Color32;

use crate::event::{CanvasEvent, EventHandler};

/// Keeps a shared color in step with `BackgroundChanged`, for hosts that paint
/// the page behind the canvas.
#[derive(Debug, Clone)]
pub struct BackgroundFollower {
    color: Rc<Cell<Color32>>,
}

impl BackgroundFollower {
    pub fn new(color: Rc<Cell<Color32>>) -> Self {
        Self { color }
    }
}

impl EventHandler for BackgroundFollower {
    fn handle_event(&mut self, event: &CanvasEvent) {
        if let CanvasEvent::BackgroundChanged(color) = event {
            self.color.set(*color);
        }
    }
}

/// Appends every event to a shared list.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<CanvasEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto the recorded list that stays valid after the recorder is
    /// handed to a bus.
    pub fn events(&self) -> Rc<RefCell<Vec<CanvasEvent>>> {
        Rc::clone(&self.events)
    }
}

impl EventHandler for EventRecorder {
    fn handle_event(&mut self, event: &CanvasEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
