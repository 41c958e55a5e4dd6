pub mod hit_testing;
pub mod transform;

pub use hit_testing::{DragRect, is_inside};
pub use transform::ViewTransform;
