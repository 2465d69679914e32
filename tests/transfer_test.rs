use std::f32::consts::PI;
use trigrip::mapping::{GainMap, GainSource, TransferCurve, smooth_gain};

#[test]
fn test_curves_pass_through_origin() {
    assert_eq!(TransferCurve::Linear { gain: 2.0 }.scale(0.0), 0.0);
    assert_eq!(TransferCurve::power_default().scale(0.0), 0.0);
    assert_eq!(TransferCurve::tanh_default().scale(0.0), 0.0);
}

#[test]
fn test_linear_curve() {
    let c = TransferCurve::Linear { gain: 2.0 };
    assert!((c.scale(10.0) - 20.0).abs() < 1e-5);
    assert!((c.scale(0.5) - 1.0).abs() < 1e-5);
}

#[test]
fn test_power_curve_default_constants() {
    // A=1.910, B=2: 10 deg -> 1.91 * (0.17453)^2 rad = 3.334 deg
    let c = TransferCurve::power_default();
    assert!((c.scale(10.0) - 3.334).abs() < 5e-3);
    // accelerating: doubling the input more than doubles the output
    assert!(c.scale(20.0) > 2.0 * c.scale(10.0));
}

#[test]
fn test_tanh_curve_default_constants() {
    // A=0.547, B=3.657: 10 deg -> 0.547 * tanh(0.6382) rad = 17.67 deg
    let c = TransferCurve::tanh_default();
    assert!((c.scale(10.0) - 17.67).abs() < 5e-2);
    // decelerating: doubling the input less than doubles the output
    assert!(c.scale(20.0) < 2.0 * c.scale(10.0));
}

#[test]
fn test_tanh_curve_saturates() {
    let TransferCurve::Tanh { a, .. } = TransferCurve::tanh_default() else {
        unreachable!()
    };
    let bound = a * 180.0 / PI;
    let c = TransferCurve::tanh_default();
    for raw in [1.0f32, 5.0, 15.0, 45.0, 90.0, 180.0, 720.0] {
        assert!(c.scale(raw).abs() <= bound + 1e-4);
    }
}

#[test]
fn test_gain_map_is_monotonic_and_clamped() {
    let map = GainMap::travel_default();

    // clamped exactly outside the domain
    assert_eq!(map.evaluate(-1.0), map.gain_min);
    assert_eq!(map.evaluate(0.0), map.gain_min);
    assert_eq!(map.evaluate(100.0), map.gain_max);

    // non-decreasing across a sweep
    let mut prev = f32::MIN;
    for i in 0..200 {
        let g = map.evaluate(-0.5 + i as f32 * 0.01);
        assert!(g >= prev);
        prev = g;
    }
}

#[test]
fn test_gain_map_midpoint() {
    let map = GainMap::travel_default();
    let mid = (map.domain_min + map.domain_max) / 2.0;
    let expected = (map.gain_min + map.gain_max) / 2.0;
    assert!((map.evaluate(mid) - expected).abs() < 1e-4);
}

#[test]
fn test_gain_map_validation() {
    let mut map = GainMap::area_default();
    assert!(map.validate().is_ok());

    map.domain_min = map.domain_max;
    assert!(map.validate().is_err());

    let mut map = GainMap::area_default();
    map.gain_min = -0.5;
    assert!(map.validate().is_err());

    let mut map = GainMap::area_default();
    map.gain_max = f32::NAN;
    assert!(map.validate().is_err());
}

#[test]
fn test_curve_validation() {
    assert!(TransferCurve::Linear { gain: 1.5 }.validate().is_ok());
    assert!(TransferCurve::Linear { gain: 0.0 }.validate().is_err());
    assert!(TransferCurve::Power { a: 1.0, b: f32::NAN }.validate().is_err());
    assert!(TransferCurve::Tanh { a: -1.0, b: 2.0 }.validate().is_err());
}

#[test]
fn test_gain_source_validation() {
    assert!(GainSource::Fixed { gain: 1.0 }.validate().is_ok());
    assert!(GainSource::Fixed { gain: 0.0 }.validate().is_err());
    assert!(
        GainSource::Area {
            map: GainMap::area_default()
        }
        .validate()
        .is_ok()
    );
}

#[test]
fn test_smooth_gain_converges() {
    let mut g = 0.1;
    for _ in 0..600 {
        g = smooth_gain(g, 2.0, 2.0, 1.0 / 60.0);
    }
    assert!((g - 2.0).abs() < 1e-3);

    // a huge rate snaps to the target instead of overshooting
    assert_eq!(smooth_gain(0.1, 2.0, 1000.0, 1.0), 2.0);
}
