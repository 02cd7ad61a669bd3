pub mod config;
pub mod consts;
pub mod edit;
pub mod error;
pub mod format;
pub mod geometry;
pub mod metadata;
pub mod persist;
pub mod source;
pub mod viewport;
pub mod views;
