use std::sync::Once;

use drumbrain_core::{
    config::TriggerSettings,
    time::millis,
    trigger::{HitDetector, ScanState, MAX_TRIGGER_VALUE, MIN_TRIGGER_VALUE},
    Channel,
};
use rand::Rng;

static INIT: Once = Once::new();

fn init_logger() {
    INIT.call_once(|| {
        env_logger::init();
    });
}

fn detector() -> HitDetector {
    HitDetector::new(Channel::Drum1, TriggerSettings::default())
}

#[test]
fn test_peak_is_maximum_of_scan_window() {
    init_logger();

    let mut rng = rand::thread_rng();

    for _ in 0..1000 {
        let mut detector = detector();
        let window: Vec<u16> = (0..5)
            .map(|i| {
                if i == 0 {
                    rng.gen_range(51..4096)
                } else {
                    rng.gen_range(0..4096)
                }
            })
            .collect();

        for (t, sample) in window.iter().enumerate() {
            detector.update(*sample, millis(1000 + t as u32));
        }
        assert!(matches!(detector.state(), ScanState::Scanning { .. }));

        // the sample on the closing tick lies outside the window
        detector.update(4095, millis(1005));
        assert_eq!(detector.state(), ScanState::Idle);

        let expected = *window.iter().max().unwrap();
        assert_eq!(detector.peak(), expected);

        let hit = detector.take_hit();
        if expected >= detector.trigger_value() {
            assert_eq!(hit.map(|hit| hit.peak), Some(expected));
        } else {
            assert_eq!(hit, None);
        }
    }
}

#[test]
fn test_no_hits_within_mask_window() {
    init_logger();

    let mut rng = rand::thread_rng();
    let settings = TriggerSettings::default();

    for _ in 0..20 {
        let mut detector = detector();
        let mut hits = vec![];

        for t in 0..20_000u32 {
            let sample = if rng.gen_bool(0.3) {
                rng.gen_range(0..4096)
            } else {
                rng.gen_range(0..60)
            };

            detector.update(sample, millis(t));
            if detector.take_hit().is_some() {
                hits.push(t);
            }
        }

        assert!(!hits.is_empty());
        for pair in hits.windows(2) {
            assert!(pair[1] - pair[0] >= settings.mask_window.to_millis());
        }
    }
}

#[test]
fn test_ringing_is_masked() {
    init_logger();

    let mut detector = detector();

    for t in 0..6 {
        detector.update(800, millis(t));
    }
    assert_eq!(detector.take_hit().map(|hit| hit.peak), Some(800));

    for t in 6..55 {
        detector.update(800, millis(t));
        assert_eq!(detector.state(), ScanState::Idle);
    }

    detector.update(800, millis(55));
    assert!(matches!(detector.state(), ScanState::Scanning { .. }));
}

#[test]
fn test_soft_hit_is_not_reported() {
    init_logger();

    let mut detector = detector();

    for t in 0..6 {
        detector.update(80, millis(t));
    }

    assert_eq!(detector.state(), ScanState::Idle);
    assert!(!detector.triggered());
    assert_eq!(detector.take_hit(), None);
}

#[test]
fn test_trigger_value_is_clamped() {
    init_logger();

    let mut detector = detector();

    for (input, expected) in [
        (i32::MIN, MIN_TRIGGER_VALUE),
        (-5, MIN_TRIGGER_VALUE),
        (0, MIN_TRIGGER_VALUE),
        (10, 10),
        (500, 500),
        (1000, 1000),
        (1001, MAX_TRIGGER_VALUE),
        (i32::MAX, MAX_TRIGGER_VALUE),
    ] {
        detector.set_trigger_value(input);
        assert_eq!(detector.trigger_value(), expected, "input {input}");
    }

    let mut rng = rand::thread_rng();
    for _ in 0..10_000 {
        detector.set_trigger_value(rng.gen());
        assert!((MIN_TRIGGER_VALUE..=MAX_TRIGGER_VALUE).contains(&detector.trigger_value()));
    }
}

#[test]
fn test_triggered_is_cleared() {
    init_logger();

    let mut detector = detector();

    for t in 0..6 {
        detector.update(300, millis(t));
    }
    assert!(detector.triggered());

    detector.clear_triggered();
    assert!(!detector.triggered());
    assert_eq!(detector.take_hit(), None);
}

#[test]
fn test_trigger_value_applies_to_next_scan() {
    init_logger();

    let mut detector = detector();

    for t in 1000..1006 {
        detector.update(500, millis(t));
    }
    assert_eq!(detector.take_hit().map(|hit| hit.peak), Some(500));

    detector.set_trigger_value(1000);

    for t in 2000..2006 {
        detector.update(500, millis(t));
    }
    assert_eq!(detector.state(), ScanState::Idle);
    assert!(!detector.triggered());
    assert_eq!(detector.take_hit(), None);
}

#[test]
fn test_latched_hit_survives_trigger_change() {
    init_logger();

    let mut detector = detector();

    for t in 0..6 {
        detector.update(500, millis(t));
    }

    detector.set_trigger_value(1000);
    assert_eq!(detector.take_hit().map(|hit| hit.peak), Some(500));
    assert_eq!(detector.take_hit(), None);
}
