//! Shared test backend for playback controller tests
//!
//! Resources never produce sound. Tests drive them by handing
//! `ResourceEvent`s to the controller, and inspect the shared log to see what
//! the controller asked the backend to do.

#![allow(dead_code)]

use recite_core::PlaybackItem;
use recite_playback::{
    AudioBackend, AudioResource, PlayOptions, PlaybackConfig, PlaybackController, PlaybackError,
    ResourceEvent, ResourceId, Result,
};
use std::cell::RefCell;
use std::rc::Rc;
use url::Url;

/// Everything the backend was asked to do
#[derive(Debug, Default)]
pub struct BackendLog {
    pub opened: Vec<(ResourceId, Url)>,
    pub started: Vec<ResourceId>,
    pub released: Vec<ResourceId>,
}

impl BackendLog {
    /// Resources opened and not released
    pub fn live(&self) -> Vec<ResourceId> {
        self.opened
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !self.released.contains(id))
            .collect()
    }

    /// File names of every opened URL, in order
    pub fn opened_files(&self) -> Vec<String> {
        self.opened
            .iter()
            .filter_map(|(_, url)| url.path_segments()?.next_back().map(str::to_string))
            .collect()
    }
}

/// Backend whose resources only record calls
#[derive(Debug, Default)]
pub struct RecordingBackend {
    log: Rc<RefCell<BackendLog>>,

    /// File names whose `open` fails synchronously
    pub refuse: Vec<String>,
}

impl RecordingBackend {
    pub fn new() -> (Self, Rc<RefCell<BackendLog>>) {
        let backend = Self::default();
        let log = Rc::clone(&backend.log);
        (backend, log)
    }
}

pub struct RecordingResource {
    id: ResourceId,
    log: Rc<RefCell<BackendLog>>,
    released: bool,
}

impl AudioResource for RecordingResource {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn start(&mut self) -> Result<()> {
        self.log.borrow_mut().started.push(self.id);
        Ok(())
    }

    fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.log.borrow_mut().released.push(self.id);
        }
    }
}

impl AudioBackend for RecordingBackend {
    type Resource = RecordingResource;

    fn open(&mut self, id: ResourceId, url: &Url) -> Result<RecordingResource> {
        let file = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or_default();
        if self.refuse.iter().any(|refused| refused == file) {
            return Err(PlaybackError::backend(format!("refused {file}")));
        }

        self.log.borrow_mut().opened.push((id, url.clone()));
        Ok(RecordingResource {
            id,
            log: Rc::clone(&self.log),
            released: false,
        })
    }
}

pub type TestController = PlaybackController<RecordingBackend>;

/// Controller with default config and a fresh recording backend
pub fn controller() -> (TestController, Rc<RefCell<BackendLog>>) {
    controller_with(PlaybackConfig::default())
}

pub fn controller_with(config: PlaybackConfig) -> (TestController, Rc<RefCell<BackendLog>>) {
    let (backend, log) = RecordingBackend::new();
    let controller = PlaybackController::new(config, backend).expect("valid config");
    (controller, log)
}

pub fn item(group: u32, index: u32) -> PlaybackItem {
    PlaybackItem::new(group, index)
}

/// Play `item` and report it ready
pub fn play_until_ready(controller: &mut TestController, item: PlaybackItem, options: PlayOptions) {
    controller.play(item, options).expect("valid request");
    ready(controller);
}

/// Report the current resource ready
pub fn ready(controller: &mut TestController) {
    let id = controller.current_resource().expect("resource is live");
    assert!(controller.handle_event(ResourceEvent::ready(id)));
}

/// Report the current resource ended
pub fn end(controller: &mut TestController) {
    let id = controller.current_resource().expect("resource is live");
    assert!(controller.handle_event(ResourceEvent::ended(id)));
}

/// Report the current resource failed
pub fn fail(controller: &mut TestController, message: &str) {
    let id = controller.current_resource().expect("resource is live");
    assert!(controller.handle_event(ResourceEvent::failed(id, message)));
}

/// Check the mutual exclusion and key-presence invariants
pub fn assert_consistent(controller: &TestController) {
    let state = controller.state();
    assert!(
        !(state.is_playing && state.is_loading),
        "playing and loading at once: {state:?}"
    );
    assert_eq!(
        state.current_item.is_some(),
        state.is_playing || state.is_loading,
        "current item out of sync with flags: {state:?}"
    );
}
