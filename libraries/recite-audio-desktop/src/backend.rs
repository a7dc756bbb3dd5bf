//! Desktop audio backend
//!
//! Each started resource gets its own worker thread which downloads, decodes,
//! resamples and plays one clip, then reports back over a shared event
//! channel. Releasing a resource raises its stop flag; the worker notices,
//! drops its stream and exits without reporting anything further.
//!
//! ```text
//! Controller thread                 Worker thread (one per clip)
//!        │  open + start                    │
//!        │─────────────────────────────────>│ fetch → decode → resample
//!        │                                  │ build CPAL stream, play
//!        │  ResourceEvent::Ready            │
//!        │<─────────────────────────────────│
//!        │                                  │ ... frames consumed ...
//!        │  ResourceEvent::Ended            │
//!        │<─────────────────────────────────│
//! ```

use crossbeam_channel::{unbounded, Receiver, Sender};
use recite_playback::{AudioBackend, AudioResource, ResourceEvent, ResourceId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};
use url::Url;

use crate::decoder::{decode_clip, DecodedClip};
use crate::error::{AudioError, Result};
use crate::fetch::fetch_clip;
use crate::output::{OutputDevice, OutputOutcome};
use crate::resample::resample_interleaved;
use crate::settings::DesktopSettings;

/// Backend that plays clips over HTTP on the default output device
pub struct DesktopBackend {
    settings: DesktopSettings,
    events: Sender<ResourceEvent>,
}

impl DesktopBackend {
    /// Create the backend and the receiving end of its event channel
    ///
    /// The owner of the controller drains the receiver and passes every event
    /// to `PlaybackController::handle_event`.
    ///
    /// # Errors
    /// Returns an error if `settings` are out of range.
    pub fn new(settings: DesktopSettings) -> Result<(Self, Receiver<ResourceEvent>)> {
        settings.validate()?;
        let (events, receiver) = unbounded();
        Ok((Self { settings, events }, receiver))
    }

    /// Backend settings
    pub fn settings(&self) -> &DesktopSettings {
        &self.settings
    }
}

impl AudioBackend for DesktopBackend {
    type Resource = DesktopResource;

    fn open(&mut self, id: ResourceId, url: &Url) -> recite_playback::Result<DesktopResource> {
        Ok(DesktopResource {
            id,
            url: url.clone(),
            settings: self.settings.clone(),
            events: self.events.clone(),
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
        })
    }
}

/// One clip on the desktop backend
pub struct DesktopResource {
    id: ResourceId,
    url: Url,
    settings: DesktopSettings,
    events: Sender<ResourceEvent>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl DesktopResource {
    /// URL this resource plays
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Whether the worker thread has been spawned and not yet exited
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    /// Whether the resource has been released
    pub fn is_released(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }
}

impl AudioResource for DesktopResource {
    fn id(&self) -> ResourceId {
        self.id
    }

    fn start(&mut self) -> recite_playback::Result<()> {
        if self.worker.is_some() || self.is_released() {
            return Ok(());
        }

        let worker = Worker {
            id: self.id,
            url: self.url.clone(),
            settings: self.settings.clone(),
            events: self.events.clone(),
            stop: Arc::clone(&self.stop),
        };

        let handle = thread::Builder::new()
            .name(format!("recite-clip-{}", self.id.get()))
            .spawn(move || worker.run())
            .map_err(|e| AudioError::Thread(e.to_string()))?;

        self.worker = Some(handle);
        Ok(())
    }

    fn release(&mut self) {
        if !self.stop.swap(true, Ordering::Relaxed) {
            debug!(resource = %self.id, "Resource released");
        }
        // Detached, never joined: the worker exits once it sees the flag
        self.worker = None;
    }
}

impl Drop for DesktopResource {
    fn drop(&mut self) {
        self.release();
    }
}

/// State moved onto the worker thread
struct Worker {
    id: ResourceId,
    url: Url,
    settings: DesktopSettings,
    events: Sender<ResourceEvent>,
    stop: Arc<AtomicBool>,
}

impl Worker {
    fn run(self) {
        match self.play() {
            Ok(OutputOutcome::Finished) => self.send(ResourceEvent::ended(self.id)),
            Ok(OutputOutcome::Released) => {
                debug!(resource = %self.id, "Worker stopped after release");
            }
            Err(e) => {
                if !self.released() {
                    warn!(resource = %self.id, url = %self.url, error = %e, "Clip playback failed");
                }
                self.send(ResourceEvent::failed(self.id, e.to_string()));
            }
        }
    }

    fn play(&self) -> Result<OutputOutcome> {
        let Some(bytes) = fetch_clip(&self.url, self.settings.request_timeout(), &self.stop)? else {
            return Ok(OutputOutcome::Released);
        };
        if self.released() {
            return Ok(OutputOutcome::Released);
        }

        let extension = self
            .url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext);
        let clip = decode_clip(bytes, extension)?;

        let device = OutputDevice::open_default()?;
        let samples = resample_interleaved(
            &clip.samples,
            DecodedClip::CHANNELS,
            clip.sample_rate,
            device.sample_rate(),
        )?;
        if self.released() {
            return Ok(OutputOutcome::Released);
        }

        device.play(samples, self.settings.volume, &self.stop, || {
            self.send(ResourceEvent::ready(self.id));
        })
    }

    fn released(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Report an event unless the resource has been released
    fn send(&self, event: ResourceEvent) {
        if self.released() {
            return;
        }
        // Receiver gone means nobody is listening any more
        let _ = self.events.send(event);
    }
}
