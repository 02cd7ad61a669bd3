//! Interactive crop viewport: preview zoom/pan, pan gestures, the debounced
//! crop selection, and the mapping from display space to source pixels.

pub mod gesture;
pub mod mapping;
pub mod selection;
pub mod transform;

pub use gesture::{
    FrameScheduler, GestureController, PointerInput, ReleaseListeners, ReleaseSubscription,
};
pub use mapping::{contain_scale, map_to_source};
pub use selection::CropSelection;
pub use transform::{InteractionMode, ViewportTransform};
