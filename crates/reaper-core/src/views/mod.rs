//! Per-tab editing views. Each owns its own dispatcher, so requests never
//! cross views.

pub mod convert;
pub mod crop;
pub mod resize;
pub mod result;

pub use convert::ConvertView;
pub use crop::CropView;
pub use resize::ResizeView;
pub use result::ResultPresenter;
