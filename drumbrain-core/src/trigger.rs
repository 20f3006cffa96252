//! Peak detection on a single piezo pad.
//!
//! A hit starts when the signal crosses the threshold, after which the peak is tracked for
//! the scan window. The scan then finishes and is reported if its peak reaches the trigger
//! value. The pad is ignored for the mask window after every finished scan, so mechanical
//! ringing of the pad does not double trigger.

#[cfg(feature = "defmt")]
use defmt::debug;
#[cfg(not(feature = "defmt"))]
use log::debug;

use crate::{
    config::TriggerSettings,
    time::{elapsed, Instant},
    Channel,
};

pub const MIN_TRIGGER_VALUE: u16 = 10;
pub const MAX_TRIGGER_VALUE: u16 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Scanning { started: Instant },
}

/// A finished scan whose peak reached the trigger value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub channel: Channel,
    pub peak: u16,
}

pub struct HitDetector {
    channel: Channel,
    settings: TriggerSettings,
    state: ScanState,
    last_hit: Option<Instant>,
    peak: u16,
    triggered: Option<u16>,
}

impl HitDetector {
    pub fn new(channel: Channel, settings: TriggerSettings) -> Self {
        let mut detector = Self {
            channel,
            settings,
            state: ScanState::Idle,
            last_hit: None,
            peak: 0,
            triggered: None,
        };
        detector.set_trigger_value(settings.trigger_value as i32);
        detector
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Peak of the running scan, or of the last finished one.
    pub fn peak(&self) -> u16 {
        self.peak
    }

    pub fn trigger_value(&self) -> u16 {
        self.settings.trigger_value
    }

    /// Applies from the next finished scan on, a running scan is not re-evaluated.
    pub fn set_trigger_value(&mut self, value: i32) {
        self.settings.trigger_value =
            value.clamp(MIN_TRIGGER_VALUE as i32, MAX_TRIGGER_VALUE as i32) as u16;
    }

    pub fn triggered(&self) -> bool {
        self.triggered.is_some()
    }

    pub fn clear_triggered(&mut self) {
        self.triggered = None;
    }

    /// Returns the reported hit, if any, and clears the triggered flag.
    pub fn take_hit(&mut self) -> Option<Hit> {
        self.triggered.take().map(|peak| Hit {
            channel: self.channel,
            peak,
        })
    }

    pub fn update(&mut self, sample: u16, now: Instant) {
        match self.state {
            ScanState::Idle => {
                if self.masked(now) || sample <= self.settings.threshold {
                    return;
                }

                self.state = ScanState::Scanning { started: now };
                self.peak = sample;
            }
            ScanState::Scanning { started } => {
                if elapsed(now, started) < self.settings.scan_window {
                    self.peak = self.peak.max(sample);
                } else {
                    self.finish_scan(now);
                }
            }
        }
    }

    fn masked(&self, now: Instant) -> bool {
        self.last_hit
            .is_some_and(|last_hit| elapsed(now, last_hit) < self.settings.mask_window)
    }

    fn finish_scan(&mut self, now: Instant) {
        let reported = self.peak >= self.settings.trigger_value;

        debug!(
            "pad {}: peak {} (trigger value {}, reported: {})",
            self.channel.index(),
            self.peak,
            self.settings.trigger_value,
            reported
        );

        if reported {
            self.triggered = Some(self.peak);
        }

        self.last_hit = Some(now);
        self.state = ScanState::Idle;
    }
}
