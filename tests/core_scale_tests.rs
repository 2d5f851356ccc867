use approx::assert_relative_eq;
use survey_charts::ChartError;
use survey_charts::core::{BandScale, LinearScale};

#[test]
fn linear_scale_maps_domain_onto_inverted_range() {
    let scale = LinearScale::new(0.0, 50.0)
        .expect("valid scale")
        .with_range(370.0, 30.0)
        .expect("valid range");

    assert_relative_eq!(scale.domain_to_pixel(0.0).expect("to pixel"), 370.0);
    assert_relative_eq!(scale.domain_to_pixel(50.0).expect("to pixel"), 30.0);
    assert_relative_eq!(scale.domain_to_pixel(25.0).expect("to pixel"), 200.0);
}

#[test]
fn linear_scale_does_not_clamp_values_outside_domain() {
    let scale = LinearScale::new(0.0, 50.0)
        .expect("valid scale")
        .with_range(370.0, 30.0)
        .expect("valid range");

    let px = scale.domain_to_pixel(60.0).expect("to pixel");
    assert_relative_eq!(px, -38.0, epsilon = 1e-9);
    assert!(px < 30.0);
}

#[test]
fn linear_scale_round_trip_within_tolerance() {
    let scale = LinearScale::new(10.0, 110.0)
        .expect("valid scale")
        .with_range(0.0, 1000.0)
        .expect("valid range");

    let original = 42.5;
    let px = scale.domain_to_pixel(original).expect("to pixel");
    let recovered = scale.pixel_to_domain(px).expect("from pixel");

    assert!((recovered - original).abs() <= 1e-9);
}

#[test]
fn degenerate_domain_is_rejected() {
    let err = LinearScale::new(5.0, 5.0).expect_err("zero-width domain must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));

    assert!(LinearScale::new(f64::NAN, 1.0).is_err());
}

#[test]
fn non_finite_value_is_rejected() {
    let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
    assert!(scale.domain_to_pixel(f64::INFINITY).is_err());
}

#[test]
fn nice_keeps_round_domain_and_extends_ragged_one() {
    let round = LinearScale::new(0.0, 50.0).expect("valid scale").nice(10);
    assert_eq!(round.domain(), (0.0, 50.0));

    let ragged = LinearScale::new(0.0, 47.3).expect("valid scale").nice(10);
    assert_eq!(ragged.domain(), (0.0, 50.0));

    let wide = LinearScale::new(0.0, 88.0).expect("valid scale").nice(10);
    assert_eq!(wide.domain(), (0.0, 90.0));
}

#[test]
fn ticks_step_by_five_over_survey_domain() {
    let ticks = LinearScale::new(0.0, 50.0).expect("valid scale").ticks(10);

    assert_eq!(ticks.len(), 11);
    for (index, tick) in ticks.iter().enumerate() {
        assert_relative_eq!(*tick, index as f64 * 5.0);
    }
}

#[test]
fn ticks_handle_sub_unit_steps() {
    let ticks = LinearScale::new(0.0, 1.0).expect("valid scale").ticks(5);

    let expected = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
    assert_eq!(ticks.len(), expected.len());
    for (tick, expected) in ticks.iter().zip(expected) {
        assert_relative_eq!(*tick, expected, epsilon = 1e-12);
    }
}

#[test]
fn ticks_follow_reversed_domain() {
    let ticks = LinearScale::new(10.0, 0.0).expect("valid scale").ticks(5);
    assert_eq!(ticks.first().copied(), Some(10.0));
    assert_eq!(ticks.last().copied(), Some(0.0));
}

#[test]
fn band_scale_splits_range_with_padding() {
    let scale = BandScale::new(["a", "b"], 80.0, 1080.0)
        .expect("valid band scale")
        .with_padding(0.1)
        .expect("valid padding");

    let step = 1000.0 / 2.1;
    assert_relative_eq!(scale.step(), step, epsilon = 1e-9);
    assert_relative_eq!(scale.bandwidth(), step * 0.9, epsilon = 1e-9);

    let first = scale.position("a").expect("known category");
    let second = scale.position("b").expect("known category");
    assert_relative_eq!(first, 80.0 + step * 0.1, epsilon = 1e-9);
    assert_relative_eq!(second - first, step, epsilon = 1e-9);
    assert_relative_eq!(
        scale.center("a").expect("known category"),
        first + scale.bandwidth() / 2.0,
        epsilon = 1e-9
    );
}

#[test]
fn band_scale_collapses_duplicates_and_ignores_unknown() {
    let scale = BandScale::new(["a", "a", "b"], 0.0, 300.0).expect("valid band scale");

    assert_eq!(scale.len(), 2);
    assert_eq!(scale.domain().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(scale.position("missing"), None);
}

#[test]
fn band_scale_supports_reversed_range() {
    let scale = BandScale::new(["a", "b", "c"], 300.0, 0.0).expect("valid band scale");

    let a = scale.position("a").expect("known category");
    let c = scale.position("c").expect("known category");
    assert!(a > c);
    assert_relative_eq!(scale.bandwidth(), 100.0, epsilon = 1e-9);
}

#[test]
fn band_scale_rejects_out_of_range_padding() {
    let scale = BandScale::new(["a"], 0.0, 100.0).expect("valid band scale");
    assert!(scale.with_padding(1.5).is_err());
}
