pub mod convert;
pub mod crop;
pub mod dropzone;
pub mod helpers;
pub mod menu_bar;
pub mod notice;
pub mod resize;
pub mod result;
pub mod status;
pub mod tabs;

pub(crate) const CONTROLS_WIDTH: f32 = 260.0;
