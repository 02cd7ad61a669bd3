use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::format::FileFormat;
use crate::geometry::CropRect;
use crate::source::EncodedImage;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditKind {
    Crop,
    Resize,
    Convert,
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Crop => write!(f, "Crop"),
            Self::Resize => write!(f, "Resize"),
            Self::Convert => write!(f, "Convert"),
        }
    }
}

/// Typed parameters of one backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum EditParams {
    Crop(CropRect),
    Resize { width: u32, height: u32 },
    Convert { target: FileFormat },
}

impl EditParams {
    pub fn kind(&self) -> EditKind {
        match self {
            Self::Crop(_) => EditKind::Crop,
            Self::Resize { .. } => EditKind::Resize,
            Self::Convert { .. } => EditKind::Convert,
        }
    }
}

/// Identifies one submission so late results can be matched or discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditStatus {
    Idle,
    Pending { id: RequestId, params: EditParams },
    Succeeded { params: EditParams, artifact: Arc<EncodedImage> },
    Failed { params: EditParams, error: String },
}

impl EditStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Single-in-flight request lifecycle of one view.
///
/// `Idle | Failed -> Pending -> Succeeded | Failed`; only [`EditState::clear`]
/// leaves a terminal state for `Idle`.
#[derive(Clone, Debug)]
pub struct EditState {
    status: EditStatus,
    next_id: u64,
}

impl Default for EditState {
    fn default() -> Self {
        Self {
            status: EditStatus::Idle,
            next_id: 1,
        }
    }
}

impl EditState {
    pub fn status(&self) -> &EditStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// True once a result is on screen: only download and clear remain.
    pub fn in_result_mode(&self) -> bool {
        matches!(self.status, EditStatus::Succeeded { .. })
    }

    /// Whether a new submission would be accepted.
    pub fn accepts_submit(&self) -> bool {
        matches!(self.status, EditStatus::Idle | EditStatus::Failed { .. })
    }

    pub fn artifact(&self) -> Option<&Arc<EncodedImage>> {
        match &self.status {
            EditStatus::Succeeded { artifact, .. } => Some(artifact),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            EditStatus::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn pending_id(&self) -> Option<RequestId> {
        match &self.status {
            EditStatus::Pending { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Enter `Pending`. Returns `None` without touching anything when a
    /// request is already in flight or a result is being shown.
    pub fn begin(&mut self, params: EditParams) -> Option<RequestId> {
        if !self.accepts_submit() {
            warn!(kind = %params.kind(), "submission ignored: view is busy or showing a result");
            return None;
        }
        let id = RequestId(self.next_id);
        self.next_id += 1;
        info!(%id, kind = %params.kind(), "edit submitted");
        self.status = EditStatus::Pending { id, params };
        Some(id)
    }

    /// Apply the outcome of request `id`. Outcomes for anything other than
    /// the request currently pending are dropped; returns whether it applied.
    pub fn resolve(&mut self, id: RequestId, outcome: Result<EncodedImage, String>) -> bool {
        let params = match &self.status {
            EditStatus::Pending { id: pending, params } if *pending == id => params.clone(),
            _ => {
                warn!(%id, "discarding stale edit result");
                return false;
            }
        };
        self.status = match outcome {
            Ok(image) => {
                let artifact = Arc::new(image);
                info!(%id, kind = %params.kind(), size = %artifact.size(), "edit succeeded");
                EditStatus::Succeeded { params, artifact }
            }
            Err(error) => {
                warn!(%id, kind = %params.kind(), %error, "edit failed");
                EditStatus::Failed { params, error }
            }
        };
        true
    }

    /// Back to `Idle`, forgetting the artifact. Any request still in flight
    /// becomes stale.
    pub fn clear(&mut self) {
        if let Some(id) = self.pending_id() {
            debug!(%id, "clearing view with a request in flight");
        }
        self.status = EditStatus::Idle;
    }
}
