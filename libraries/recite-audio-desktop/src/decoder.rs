//! In-memory clip decoding with Symphonia
//!
//! Clips are short, so the whole file is decoded up front into one
//! interleaved stereo `f32` buffer.

use std::io::Cursor;
use std::time::Duration;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, trace};

use crate::error::{AudioError, Result};

/// Decoded clip, interleaved stereo
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedClip {
    /// Interleaved L/R samples in -1.0..=1.0
    pub samples: Vec<f32>,

    /// Source sample rate in Hz
    pub sample_rate: u32,
}

impl DecodedClip {
    /// Channel count of `samples`
    pub const CHANNELS: usize = 2;

    /// Number of stereo frames
    pub fn frames(&self) -> usize {
        self.samples.len() / Self::CHANNELS
    }

    /// Playing time
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frames() as f64 / f64::from(self.sample_rate))
    }
}

/// Decode a complete clip held in memory
///
/// `extension` (for example `"mp3"`) helps the probe pick a format.
///
/// # Errors
/// Returns an error if the format is not recognised, there is no audio track,
/// or the clip contains no audio at all.
pub fn decode_clip(bytes: Vec<u8>, extension: Option<&str>) -> Result<DecodedClip> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| AudioError::DecodeError(format!("Failed to probe clip: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| AudioError::DecodeError("No audio tracks found".to_string()))?;

    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| AudioError::DecodeError(format!("Failed to create decoder: {}", e)))?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            // Corrupt frame: skip it, the rest of the clip is usually fine
            Err(SymphoniaError::DecodeError(e)) => {
                trace!(error = %e, "Skipping undecodable packet");
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        if sample_rate == 0 {
            sample_rate = spec.rate;
        }

        let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        append_stereo(&mut samples, buffer.samples(), spec.channels.count());
    }

    if samples.is_empty() || sample_rate == 0 {
        return Err(AudioError::DecodeError("Clip contains no audio".to_string()));
    }

    let clip = DecodedClip {
        samples,
        sample_rate,
    };
    debug!(
        frames = clip.frames(),
        sample_rate = clip.sample_rate,
        "Clip decoded"
    );
    Ok(clip)
}

/// Append interleaved frames of any channel count as stereo
fn append_stereo(out: &mut Vec<f32>, interleaved: &[f32], channels: usize) {
    match channels {
        0 => {}
        1 => {
            for &s in interleaved {
                out.push(s);
                out.push(s);
            }
        }
        2 => out.extend_from_slice(interleaved),
        n => {
            // Keep front left/right, drop the rest
            for frame in interleaved.chunks_exact(n) {
                out.push(frame[0]);
                out.push(frame[1]);
            }
        }
    }
}
