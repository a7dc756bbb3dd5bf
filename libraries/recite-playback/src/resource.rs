//! Platform-agnostic audio resource seam
//!
//! The controller never touches audio hardware or the network. It asks an
//! [`AudioBackend`] for a resource bound to a clip URL, tells it to start, and
//! later releases it. Readiness, completion and failure come back as
//! [`ResourceEvent`]s tagged with the resource's id, which the owner of the
//! controller feeds into
//! [`PlaybackController::handle_event`](crate::PlaybackController::handle_event).

use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::Result;

/// Identity of one audio resource
///
/// Ids are allocated by the controller and never reused, so an event from a
/// superseded resource can always be told apart from one from the current
/// resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(u64);

impl ResourceId {
    /// Wrap a raw id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw id
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something that happened to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceEventKind {
    /// Enough data is available and the clip is audible
    Ready,

    /// The clip played to its end
    Ended,

    /// The clip could not be fetched, decoded or played
    Failed(String),
}

/// Event reported by a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEvent {
    /// Resource that reported the event
    pub resource: ResourceId,

    /// What happened
    pub kind: ResourceEventKind,
}

impl ResourceEvent {
    /// Clip is ready and audible
    pub fn ready(resource: ResourceId) -> Self {
        Self {
            resource,
            kind: ResourceEventKind::Ready,
        }
    }

    /// Clip finished
    pub fn ended(resource: ResourceId) -> Self {
        Self {
            resource,
            kind: ResourceEventKind::Ended,
        }
    }

    /// Clip failed
    pub fn failed(resource: ResourceId, message: impl Into<String>) -> Self {
        Self {
            resource,
            kind: ResourceEventKind::Failed(message.into()),
        }
    }
}

/// One playable clip, exclusively owned by the controller
pub trait AudioResource {
    /// Id this resource was opened with
    fn id(&self) -> ResourceId;

    /// Request playback
    ///
    /// Returns once playback has been requested, not once it is audible.
    ///
    /// # Errors
    /// Returns an error if playback cannot even be requested. The controller
    /// treats this like a `Failed` event.
    fn start(&mut self) -> Result<()>;

    /// Stop playback and stop reporting events
    ///
    /// Must be idempotent. After release the resource may still emit an event
    /// already in flight; the controller ignores it.
    fn release(&mut self);
}

/// Factory for audio resources
pub trait AudioBackend {
    /// Resource type produced by this backend
    type Resource: AudioResource;

    /// Create a resource bound to `url`, without starting it
    ///
    /// # Errors
    /// Returns an error if the resource cannot be created at all. The
    /// controller treats this like a `Failed` event.
    fn open(&mut self, id: ResourceId, url: &Url) -> Result<Self::Resource>;
}
