/// Event pump between a backend and the playback controller
use crossbeam_channel::Receiver;
use recite_core::ItemKey;
use recite_playback::{AudioBackend, PlaybackController, PlaybackEvent, ResourceEvent};
use serde::Serialize;
use tracing::{debug, info, warn};

/// What happened during a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Items that played to their end, in order
    pub finished: Vec<ItemKey>,

    /// Items that failed, with the backend's message
    pub failed: Vec<(ItemKey, String)>,

    /// Resource events that came from superseded resources
    pub stale_events: usize,
}

/// Feed backend events into `controller` until it is idle again
///
/// Every playback event is logged and passed to `observe` as it is drained.
/// If the backend's channel closes while playback is still active, the
/// controller is stopped.
pub fn run_until_idle<B: AudioBackend>(
    controller: &mut PlaybackController<B>,
    events: &Receiver<ResourceEvent>,
    mut observe: impl FnMut(&PlaybackEvent),
) -> SessionSummary {
    let mut summary = SessionSummary::default();

    loop {
        for event in controller.drain_events() {
            record(&mut summary, &event);
            observe(&event);
        }

        if controller.state().is_idle() {
            break;
        }

        match events.recv() {
            Ok(event) => {
                if !controller.handle_event(event) {
                    summary.stale_events += 1;
                }
            }
            Err(_) => {
                warn!("Audio backend disconnected, stopping playback");
                controller.stop();
            }
        }
    }

    debug!(
        finished = summary.finished.len(),
        failed = summary.failed.len(),
        "Session complete"
    );
    summary
}

fn record(summary: &mut SessionSummary, event: &PlaybackEvent) {
    match event {
        PlaybackEvent::ItemFinished { key } => summary.finished.push(key.clone()),
        PlaybackEvent::ItemFailed { key, message } => {
            summary.failed.push((key.clone(), message.clone()));
        }
        PlaybackEvent::AutoplayExhausted { group_id } => {
            info!(chapter = group_id, "Reached end of chapter");
        }
        PlaybackEvent::StateChanged { state } => {
            debug!(phase = ?state.phase(), item = ?state.current_item, "Playback state");
        }
        PlaybackEvent::ItemStarted { .. } | PlaybackEvent::AutoplayAdvanced { .. } => {}
    }
}
