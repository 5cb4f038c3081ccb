use serde::{Deserialize, Serialize};

/// Maximum health any sheet may record.
pub const HEALTH_CAP: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Health {
    #[serde(default)]
    pub value: i32, // 0..=max
    #[serde(default)]
    pub max: i32, // 0..=HEALTH_CAP
}

/// Which bound a health write ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthClamp {
    MaxCapped,
    ValueCapped,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let (max, _) = cap_max(max);
        Self { value: max, max }
    }

    /// Write a new maximum; current health follows it down when it no longer fits.
    pub fn set_max(&mut self, max: i32) -> Vec<HealthClamp> {
        let mut clamps = Vec::new();
        let (max, capped) = cap_max(max);
        if capped {
            clamps.push(HealthClamp::MaxCapped);
        }
        self.max = max;
        if self.value > self.max {
            self.value = self.max;
            clamps.push(HealthClamp::ValueCapped);
        }
        clamps
    }

    /// Write current health against the stored maximum.
    pub fn set_value(&mut self, value: i32) -> Option<HealthClamp> {
        let (value, capped) = cap_value(value, self.max);
        self.value = value;
        capped.then_some(HealthClamp::ValueCapped)
    }

    pub fn is_valid(&self) -> bool {
        0 <= self.value && self.value <= self.max && self.max <= HEALTH_CAP
    }
}

/// Clamp a maximum into `0..=HEALTH_CAP`; the flag reports a cut at the top.
pub fn cap_max(max: i32) -> (i32, bool) {
    if max > HEALTH_CAP {
        (HEALTH_CAP, true)
    } else {
        (max.max(0), false)
    }
}

/// Clamp current health into `0..=effective_max`; the flag reports a cut at the top.
pub fn cap_value(value: i32, effective_max: i32) -> (i32, bool) {
    if value > effective_max {
        (effective_max.max(0), true)
    } else {
        (value.max(0), false)
    }
}
