mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::CanvasEvent;
pub use handlers::{BackgroundFollower, EventRecorder};

/// Host-side callback for canvas notifications.
pub trait EventHandler {
    fn handle_event(&mut self, event: &CanvasEvent);
}
