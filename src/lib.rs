#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod components;
pub mod error;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod input;
pub mod panels;
pub mod raster;
pub mod selection;
pub mod settings;
pub mod texture_manager;
pub mod tools;

pub use app::PaintApp;
pub use canvas::Canvas;
pub use error::{CanvasError, CanvasResult};
pub use event::{CanvasEvent, EventBus, EventHandler};
pub use geometry::{DragRect, ViewTransform};
pub use input::{InputEvent, PointerButtons};
pub use raster::{PixelBuffer, RasterSurface};
pub use selection::{FloatingSelection, SelectionModel};
pub use settings::Preferences;
pub use tools::{Tool, ToolSettings, ToolStateMachine};
