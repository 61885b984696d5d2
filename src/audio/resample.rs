//! Sample-rate conversion for captured speech.
//!
//! Microphones commonly deliver 44.1/48 kHz while the STT stack wants 16 kHz
//! mono. Downsampling runs a short FIR low-pass first so high frequencies do
//! not alias, then a linear interpolator does the rate change. Speech
//! snippets are short, so latency matters more than phase accuracy here.

use std::f32::consts::PI;

// Practical device-rate bounds; anything outside is passed through untouched.
const MIN_DEVICE_RATE: u32 = 2_000;
const MAX_DEVICE_RATE: u32 = 1_600_000;
const MAX_FIR_TAPS: usize = 129;

/// Convert `input` from `device_rate` to `target_rate`.
pub fn resample_to_rate(input: &[f32], device_rate: u32, target_rate: u32) -> Vec<f32> {
    if input.is_empty() || device_rate == 0 || target_rate == 0 {
        return input.to_vec();
    }
    if device_rate == target_rate {
        return input.to_vec();
    }
    if !(MIN_DEVICE_RATE..=MAX_DEVICE_RATE).contains(&device_rate) {
        return input.to_vec();
    }

    let ratio = target_rate as f32 / device_rate as f32;
    let filtered = if device_rate > target_rate {
        let taps = fir_tap_count(device_rate, target_rate);
        low_pass(input, device_rate, target_rate, taps)
    } else {
        input.to_vec()
    };
    linear_resample(&filtered, ratio)
}

fn linear_resample(input: &[f32], ratio: f32) -> Vec<f32> {
    let output_len = (input.len() as f32 * ratio).round() as usize;
    let mut output = Vec::with_capacity(output_len);
    for i in 0..output_len {
        let src = i as f32 / ratio;
        let idx = src.floor() as usize;
        let frac = src - idx as f32;
        if idx + 1 < input.len() {
            output.push(input[idx] * (1.0 - frac) + input[idx + 1] * frac);
        } else {
            output.push(input.last().copied().unwrap_or(0.0));
        }
    }
    output
}

/// Short filter for near-equal rates, longer when collapsing 48 kHz into 16 kHz.
fn fir_tap_count(device_rate: u32, target_rate: u32) -> usize {
    let decimation = device_rate as f32 / target_rate.max(1) as f32;
    let mut taps = (decimation * 4.0).ceil().max(11.0) as usize;
    if taps % 2 == 0 {
        taps += 1;
    }
    taps.min(MAX_FIR_TAPS)
}

fn low_pass(input: &[f32], device_rate: u32, target_rate: u32, taps: usize) -> Vec<f32> {
    if input.is_empty() || taps <= 1 {
        return input.to_vec();
    }
    let cutoff = (target_rate as f32 * 0.5 / device_rate as f32).min(0.499);
    let coeffs = windowed_sinc(cutoff, taps);
    let half = taps / 2;
    let mut output = Vec::with_capacity(input.len());
    for n in 0..input.len() {
        let mut acc = 0.0;
        for (k, coeff) in coeffs.iter().enumerate() {
            if let Some(idx) = n.checked_add(k).and_then(|sum| sum.checked_sub(half)) {
                if let Some(sample) = input.get(idx) {
                    acc += *sample * coeff;
                }
            }
        }
        output.push(acc);
    }
    output
}

/// Hamming-windowed sinc taps, normalized to unity gain.
fn windowed_sinc(normalized_cutoff: f32, taps: usize) -> Vec<f32> {
    let mut coeffs = Vec::with_capacity(taps);
    let m = (taps - 1) as f32;
    for n in 0..taps {
        let centered = n as f32 - m / 2.0;
        let x = 2.0 * PI * normalized_cutoff * centered;
        let sinc = if centered == 0.0 {
            2.0 * normalized_cutoff
        } else {
            (2.0 * normalized_cutoff * x.sin()) / x
        };
        let window = if taps <= 1 {
            1.0
        } else {
            0.54 - 0.46 * ((2.0 * PI * n as f32) / m).cos()
        };
        coeffs.push(sinc * window);
    }
    let sum: f32 = coeffs.iter().sum();
    if sum != 0.0 {
        for coeff in coeffs.iter_mut() {
            *coeff /= sum;
        }
    }
    coeffs
}
