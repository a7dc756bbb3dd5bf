//! Sample rate conversion to the output device rate

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use crate::error::{AudioError, Result};

/// Resample an interleaved buffer from `source_rate` to `target_rate`
///
/// Returns the input unchanged when the rates already match.
///
/// # Errors
/// Returns an error if the resampler rejects the rates or the buffer.
pub fn resample_interleaved(
    samples: &[f32],
    channels: usize,
    source_rate: u32,
    target_rate: u32,
) -> Result<Vec<f32>> {
    if source_rate == target_rate || samples.is_empty() || channels == 0 {
        return Ok(samples.to_vec());
    }

    let frames = samples.len() / channels;

    // Speech clips: cubic sinc is plenty
    let params = SincInterpolationParameters {
        sinc_len: 128,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 128,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(
        f64::from(target_rate) / f64::from(source_rate),
        2.0,
        params,
        frames,
        channels,
    )
    .map_err(|e| AudioError::ResampleError(e.to_string()))?;

    let mut deinterleaved = vec![Vec::with_capacity(frames); channels];
    for frame in samples.chunks_exact(channels) {
        for (channel, &sample) in deinterleaved.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    let resampled = resampler
        .process(&deinterleaved, None)
        .map_err(|e| AudioError::ResampleError(e.to_string()))?;

    let output_frames = resampled[0].len();
    let mut interleaved = Vec::with_capacity(output_frames * channels);
    for frame_idx in 0..output_frames {
        for channel in &resampled {
            interleaved.push(channel[frame_idx]);
        }
    }

    Ok(interleaved)
}
