//! CPAL output for a single clip
//!
//! The stream is built, played and dropped on the calling thread (the
//! resource's worker), since a CPAL `Stream` is not `Send` on every platform.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, StreamConfig};
use crossbeam_channel::bounded;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::debug;

use crate::decoder::DecodedClip;
use crate::error::{AudioError, Result};

/// How often the worker checks for completion and release
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Grace period so the device plays out its last buffer
const DRAIN_TIME: Duration = Duration::from_millis(100);

/// How a clip's playback ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputOutcome {
    /// Every frame was handed to the device
    Finished,

    /// The stop flag was raised first
    Released,
}

/// Default output device with its preferred configuration
pub struct OutputDevice {
    device: Device,
    config: StreamConfig,
    sample_rate: u32,
    channels: usize,
}

impl OutputDevice {
    /// Open the system's default output device
    ///
    /// # Errors
    /// Returns an error if there is no output device or it reports no usable
    /// configuration.
    pub fn open_default() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::DeviceNotFound)?;

        let supported = device.default_output_config()?;
        let sample_rate = supported.sample_rate();
        let config = supported.config();
        let channels = usize::from(config.channels);
        if channels == 0 {
            return Err(AudioError::DeviceError(
                "device reports zero output channels".to_string(),
            ));
        }

        Ok(Self {
            device,
            config,
            sample_rate,
            channels,
        })
    }

    /// Device sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Device channel count
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Play interleaved stereo `samples` (already at the device rate) to the end
    ///
    /// Calls `on_started` once the stream is playing. Blocks until every frame
    /// was written or `stop` is raised.
    ///
    /// # Errors
    /// Returns an error if the stream cannot be built or started, or the
    /// device reports an error while playing.
    pub fn play(
        &self,
        samples: Vec<f32>,
        volume: f32,
        stop: &AtomicBool,
        on_started: impl FnOnce(),
    ) -> Result<OutputOutcome> {
        let samples = Arc::new(samples);
        let position = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicBool::new(false));
        let (error_tx, error_rx) = bounded::<String>(1);

        let channels = self.channels;
        let cb_samples = Arc::clone(&samples);
        let cb_position = Arc::clone(&position);
        let cb_finished = Arc::clone(&finished);

        let stream = self.device.build_output_stream(
            &self.config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                fill_frames(
                    data,
                    channels,
                    &cb_samples,
                    &cb_position,
                    &cb_finished,
                    volume,
                );
            },
            move |err| {
                let _ = error_tx.try_send(err.to_string());
            },
            None,
        )?;
        stream.play()?;

        debug!(
            frames = samples.len() / DecodedClip::CHANNELS,
            sample_rate = self.sample_rate,
            channels,
            "Output stream started"
        );
        on_started();

        loop {
            if stop.load(Ordering::Relaxed) {
                return Ok(OutputOutcome::Released);
            }
            if let Ok(message) = error_rx.try_recv() {
                return Err(AudioError::DeviceError(message));
            }
            if finished.load(Ordering::Relaxed) {
                thread::sleep(DRAIN_TIME);
                return Ok(OutputOutcome::Finished);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Audio callback body: copy stereo frames into a device buffer of any width
fn fill_frames(
    out: &mut [f32],
    channels: usize,
    samples: &[f32],
    position: &AtomicUsize,
    finished: &AtomicBool,
    volume: f32,
) {
    let total = samples.len() / DecodedClip::CHANNELS;
    let mut frame = position.load(Ordering::Relaxed);

    for out_frame in out.chunks_mut(channels) {
        if frame >= total {
            out_frame.fill(0.0);
            finished.store(true, Ordering::Relaxed);
            continue;
        }

        let left = samples[frame * 2] * volume;
        let right = samples[frame * 2 + 1] * volume;
        match out_frame {
            [mono] => *mono = (left + right) * 0.5,
            [l, r, rest @ ..] => {
                *l = left;
                *r = right;
                rest.fill(0.0);
            }
            [] => {}
        }
        frame += 1;
    }

    position.store(frame, Ordering::Relaxed);
}
