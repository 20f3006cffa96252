//! Tuning parameters of the brain.
//!
//! The defaults are the hand tuned values the pads were developed with. None of them is a
//! hard invariant, boards with different piezos or pots are expected to override them.

use derivative::Derivative;

use crate::{note::MidiNote, time::Duration, CHANNELS};

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy)]
pub struct TriggerSettings {
    /// Raw level a sample has to exceed to start scanning for a peak.
    #[derivative(Default(value = "50"))]
    pub threshold: u16,
    /// Minimal peak for a scan to be reported as a hit. Clamped to 10..=1000.
    #[derivative(Default(value = "100"))]
    pub trigger_value: u16,
    /// How long the peak is tracked after the threshold was crossed.
    #[derivative(Default(value = "Duration::millis(5)"))]
    pub scan_window: Duration,
    /// Quiet time after a finished scan during which the pad is ignored.
    #[derivative(Default(value = "Duration::millis(50)"))]
    pub mask_window: Duration,
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy)]
pub struct ControlSettings {
    #[derivative(Default(value = "Duration::millis(100)"))]
    pub pot_read_interval: Duration,
    /// A pot reading is only reported when it moved strictly more than this.
    #[derivative(Default(value = "15"))]
    pub noise_threshold: u16,
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy)]
pub struct StoreSettings {
    /// Address of the marker byte, notes follow directly after it.
    #[derivative(Default(value = "0"))]
    pub base_address: u16,
    #[derivative(Default(value = "0x42"))]
    pub marker: u8,
    #[derivative(Default(value = "[MidiNote::BASS_DRUM, MidiNote::LOW_FLOOR_TOM]"))]
    pub default_notes: [MidiNote; CHANNELS],
    #[derivative(Default(value = "Duration::millis(30_000)"))]
    pub write_delay: Duration,
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy)]
pub struct MenuSettings {
    #[derivative(Default(value = "Duration::millis(15_000)"))]
    pub timeout: Duration,
}

#[derive(Derivative)]
#[derivative(Default)]
#[derive(Debug, Clone, Copy)]
pub struct PresentationSettings {
    /// Pot movement needed before a setting is applied and its overlay shown.
    #[derivative(Default(value = "40"))]
    pub overlay_threshold: u16,
    #[derivative(Default(value = "Duration::millis(3_000)"))]
    pub overlay_timeout: Duration,
    #[derivative(Default(value = "Duration::millis(50)"))]
    pub render_interval: Duration,
    #[derivative(Default(value = "Duration::millis(250)"))]
    pub hit_dot_duration: Duration,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BrainSettings {
    pub trigger: TriggerSettings,
    pub controls: ControlSettings,
    pub store: StoreSettings,
    pub menu: MenuSettings,
    pub presentation: PresentationSettings,
}
