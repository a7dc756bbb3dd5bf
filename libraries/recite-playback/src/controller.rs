//! Playback controller
//!
//! The state machine behind every play button. It owns the observable
//! [`PlaybackState`], the [`AutoplayQueue`] and at most one live audio resource.

use recite_core::{AudioUrlScheme, PlaybackItem};
use tracing::{debug, info, trace, warn};

use crate::error::Result;
use crate::events::PlaybackEvent;
use crate::queue::AutoplayQueue;
use crate::resource::{AudioBackend, AudioResource, ResourceEvent, ResourceEventKind, ResourceId};
use crate::types::{PlayOptions, PlaybackConfig, PlaybackPhase, PlaybackState, ToggleWhileLoading};

/// The resource currently registered with the controller
struct ActiveResource<R> {
    item: PlaybackItem,
    resource: R,
}

/// Sequential recitation playback controller
///
/// All mutation goes through `&mut self`, so a single logical thread drives the
/// controller. Backends report back through [`ResourceEvent`]s, which the owner
/// feeds into [`handle_event`](Self::handle_event).
pub struct PlaybackController<B: AudioBackend> {
    config: PlaybackConfig,
    urls: AudioUrlScheme,
    backend: B,

    // Observable state
    state: PlaybackState,
    queue: AutoplayQueue,

    // At most one live resource
    active: Option<ActiveResource<B::Resource>>,
    next_resource_id: u64,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<B: AudioBackend> PlaybackController<B> {
    /// Create an idle controller
    ///
    /// # Errors
    /// Returns an error if `config.audio_base_url` is not a usable base URL.
    pub fn new(config: PlaybackConfig, backend: B) -> Result<Self> {
        let urls = AudioUrlScheme::new(&config.audio_base_url)?;
        debug!(base = %urls.base(), "Playback controller created");

        Ok(Self {
            config,
            urls,
            backend,
            state: PlaybackState::idle(),
            queue: AutoplayQueue::inactive(),
            active: None,
            next_resource_id: 0,
            pending_events: Vec::new(),
        })
    }

    // ===== Playback Control =====

    /// Play `item`, or pause it if it is already playing
    ///
    /// Requesting the item that is currently playing stops it. Requesting it
    /// while it is still loading follows [`ToggleWhileLoading`]. Any other item
    /// supersedes whatever was loaded before. With `options.autoplay` the rest
    /// of the item's group plays after it.
    ///
    /// Returns once playback has been requested. A clip that cannot be loaded
    /// is not an error here; the controller returns to idle and emits
    /// [`PlaybackEvent::ItemFailed`].
    ///
    /// # Errors
    /// Returns an error, without changing any state, if `item` has a zero
    /// coordinate or autoplay is requested without a positive queue length.
    pub fn play(&mut self, item: PlaybackItem, options: PlayOptions) -> Result<()> {
        item.validate()?;
        let queue_length = options.checked_queue_length()?;

        let key = item.key();
        if self.state.is_current(&key) {
            match self.state.phase() {
                PlaybackPhase::Playing => {
                    debug!(item = %key, "Same item requested while playing, pausing");
                    self.halt();
                    return Ok(());
                }
                PlaybackPhase::Loading => match self.config.toggle_while_loading {
                    ToggleWhileLoading::Cancel => {
                        debug!(item = %key, "Same item requested while loading, cancelling");
                        self.halt();
                        return Ok(());
                    }
                    ToggleWhileLoading::Ignore => {
                        debug!(item = %key, "Same item requested while loading, ignoring");
                        return Ok(());
                    }
                    ToggleWhileLoading::Restart => {
                        debug!(item = %key, "Same item requested while loading, restarting");
                    }
                },
                PlaybackPhase::Idle => {}
            }
        }

        self.queue = match queue_length {
            Some(length) => AutoplayQueue::starting_at(item, length),
            None => AutoplayQueue::inactive(),
        };

        self.start_item(item);
        Ok(())
    }

    /// Stop playback and forget the autoplay queue
    ///
    /// Idempotent: on an idle controller nothing changes and no event is
    /// emitted.
    pub fn stop(&mut self) {
        debug!("Stop requested");
        self.halt();
    }

    /// Apply one event reported by a resource
    ///
    /// Returns `false` if the event came from a resource that is no longer
    /// current. Such events change nothing.
    pub fn handle_event(&mut self, event: ResourceEvent) -> bool {
        let Some(item) = self
            .active
            .as_ref()
            .filter(|active| active.resource.id() == event.resource)
            .map(|active| active.item)
        else {
            trace!(resource = %event.resource, kind = ?event.kind, "Ignoring stale resource event");
            return false;
        };

        match event.kind {
            ResourceEventKind::Ready => self.on_ready(item),
            ResourceEventKind::Ended => self.on_ended(item),
            ResourceEventKind::Failed(message) => {
                self.release_active();
                self.fail(item, message);
            }
        }
        true
    }

    // ===== Queries =====

    /// Current state snapshot
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Whether `item` is the one loading or playing
    pub fn is_current(&self, item: &PlaybackItem) -> bool {
        self.state.is_current(&item.key())
    }

    /// Autoplay queue snapshot
    pub fn autoplay_queue(&self) -> &AutoplayQueue {
        &self.queue
    }

    /// Id of the live resource, if any
    pub fn current_resource(&self) -> Option<ResourceId> {
        self.active.as_ref().map(|active| active.resource.id())
    }

    /// Controller configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// URL scheme clips are resolved with
    pub fn url_scheme(&self) -> &AudioUrlScheme {
        &self.urls
    }

    /// Backend the controller opens resources with
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Transitions =====

    /// Supersede the current resource and load `item`
    fn start_item(&mut self, item: PlaybackItem) {
        self.release_active();

        let key = item.key();
        self.set_state(PlaybackState::loading(key.clone()));

        let url = self.urls.resolve(&item);
        let id = self.allocate_resource_id();
        debug!(item = %key, resource = %id, url = %url, "Opening clip");

        let mut resource = match self.backend.open(id, &url) {
            Ok(resource) => resource,
            Err(e) => {
                self.fail(item, e.to_string());
                return;
            }
        };

        if let Err(e) = resource.start() {
            resource.release();
            self.fail(item, e.to_string());
            return;
        }

        self.active = Some(ActiveResource { item, resource });
    }

    fn on_ready(&mut self, item: PlaybackItem) {
        if !self.state.is_loading {
            return;
        }
        let key = item.key();
        info!(item = %key, "Playing");
        self.set_state(PlaybackState::playing(key.clone()));
        self.emit(PlaybackEvent::ItemStarted { key });
    }

    fn on_ended(&mut self, item: PlaybackItem) {
        self.release_active();

        let key = item.key();
        info!(item = %key, "Finished");
        self.emit(PlaybackEvent::ItemFinished { key: key.clone() });

        if let Some(next) = self.queue.advance(item.group_id) {
            let to = next.key();
            debug!(from = %key, to = %to, "Autoplay advancing");
            self.emit(PlaybackEvent::AutoplayAdvanced { from: key, to });
            self.start_item(next);
            return;
        }

        if self.queue.is_active() {
            debug!(group = item.group_id, "Autoplay exhausted");
            self.emit(PlaybackEvent::AutoplayExhausted {
                group_id: item.group_id,
            });
        }
        self.queue.clear();
        self.set_state(PlaybackState::idle());
    }

    /// Recover from a clip that could not be loaded or played
    fn fail(&mut self, item: PlaybackItem, message: String) {
        let key = item.key();
        warn!(item = %key, error = %message, "Clip failed");
        self.queue.clear();
        self.emit(PlaybackEvent::ItemFailed { key, message });
        self.set_state(PlaybackState::idle());
    }

    /// Release everything and go idle
    fn halt(&mut self) {
        self.release_active();
        self.queue.clear();
        self.set_state(PlaybackState::idle());
    }

    /// Detach the live resource, then release it
    fn release_active(&mut self) {
        if let Some(mut active) = self.active.take() {
            trace!(resource = %active.resource.id(), "Releasing resource");
            active.resource.release();
        }
    }

    fn allocate_resource_id(&mut self) -> ResourceId {
        self.next_resource_id += 1;
        ResourceId::new(self.next_resource_id)
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state == state {
            return;
        }
        debug!(from = ?self.state.phase(), to = ?state.phase(), "State transition");
        self.state = state.clone();
        self.emit(PlaybackEvent::StateChanged { state });
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}

impl<B: AudioBackend> Drop for PlaybackController<B> {
    fn drop(&mut self) {
        self.release_active();
    }
}
