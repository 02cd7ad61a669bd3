pub mod backend;
pub mod dispatcher;
pub mod request;

pub use backend::{LocalBackend, ProcessingBackend};
pub use dispatcher::{EditDispatcher, WakeFn};
pub use request::{EditKind, EditParams, EditState, EditStatus, RequestId};
