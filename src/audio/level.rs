use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Floor reported when nothing has been measured yet.
const METER_FLOOR_DB: f32 = -60.0;

/// Silence mics rarely get above this even with room noise.
const QUIET_DB: f32 = -50.0;

/// Shared live input level, written by the capture loop and read by the CLI
/// so it can warn when the microphone looks dead.
#[derive(Clone, Debug, Default)]
pub struct LevelMeter {
    db_bits: Arc<AtomicU32>,
}

impl LevelMeter {
    pub fn new() -> Self {
        let meter = Self {
            db_bits: Arc::new(AtomicU32::new(0)),
        };
        meter.set_db(METER_FLOOR_DB);
        meter
    }

    pub fn set_db(&self, db: f32) {
        self.db_bits.store(db.to_bits(), Ordering::Relaxed);
    }

    pub fn db(&self) -> f32 {
        f32::from_bits(self.db_bits.load(Ordering::Relaxed))
    }

    /// True when the last reading sits near the noise floor.
    pub fn is_quiet(&self) -> bool {
        self.db() <= QUIET_DB
    }
}

pub(crate) fn rms_db(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return METER_FLOOR_DB;
    }
    let energy: f32 = samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32;
    let rms = energy.sqrt().max(1e-6);
    20.0 * rms.log10()
}
