use approx::assert_abs_diff_eq;
use curve_clip::ClipError;
use curve_clip::core::{CurveSampler, MAX_SAMPLE_COUNT, PlotSize, SamplerTuning, Viewport, XRange};

fn sampler() -> CurveSampler {
    let viewport = Viewport::new(0.0, 400.0, -100.0, 100.0).expect("viewport");
    CurveSampler::new(viewport, PlotSize::new(400, 300)).expect("sampler")
}

#[test]
fn auto_resolution_uses_pixel_spacing() {
    let sampler = sampler();
    let range = XRange::new(0.0, 400.0).expect("range");

    assert_eq!(sampler.auto_resolution(range).expect("resolution"), 20);

    let samples = sampler
        .sample(&|x: f64| x * 0.1, range, None)
        .expect("sample");
    assert_eq!(samples.len(), 20);
}

#[test]
fn auto_resolution_follows_clamped_width() {
    let sampler = sampler();
    let range = XRange::new(300.0, 900.0).expect("range");

    // Clamped to [300, 400] -> 100 px -> 5 samples.
    assert_eq!(sampler.auto_resolution(range).expect("resolution"), 5);
}

#[test]
fn auto_resolution_has_floor_of_two() {
    let sampler = sampler();
    let range = XRange::new(0.0, 10.0).expect("range");
    assert_eq!(sampler.auto_resolution(range).expect("resolution"), 2);
}

#[test]
fn custom_pixel_spacing_changes_resolution() {
    let viewport = Viewport::new(0.0, 400.0, -1.0, 1.0).expect("viewport");
    let tuning = SamplerTuning {
        pixel_spacing_px: 10.0,
        ..SamplerTuning::default()
    };
    let sampler =
        CurveSampler::with_tuning(viewport, PlotSize::new(400, 300), tuning).expect("sampler");
    let range = XRange::new(0.0, 400.0).expect("range");
    assert_eq!(sampler.auto_resolution(range).expect("resolution"), 40);
}

#[test]
fn samples_are_uniform_and_reach_range_end() {
    let sampler = sampler();
    let range = XRange::new(0.0, 1.0).expect("range");

    let samples = sampler
        .sample(&|x: f64| x * x, range, Some(11))
        .expect("sample");
    assert_eq!(samples.len(), 11);
    assert_eq!(samples[0].x, 0.0);
    assert_eq!(samples[10].x, 1.0);
    for (index, sample) in samples.iter().enumerate() {
        let expected = index as f64 * 0.1;
        assert_abs_diff_eq!(sample.x, expected, epsilon = 1e-12);
        assert_abs_diff_eq!(sample.y(), expected * expected, epsilon = 1e-12);
    }
}

#[test]
fn last_sample_snaps_onto_awkward_range_end() {
    let sampler = sampler();
    let range = XRange::new(0.1, 0.7).expect("range");

    let samples = sampler
        .sample(&|x: f64| x, range, Some(7))
        .expect("sample");
    assert_eq!(samples.last().map(|sample| sample.x), Some(0.7));
}

#[test]
fn explicit_resolution_respects_floor() {
    let sampler = sampler();
    let range = XRange::new(0.0, 1.0).expect("range");

    let samples = sampler
        .sample(&|_x: f64| 1.0, range, Some(0))
        .expect("sample");
    assert_eq!(samples.len(), 2);
}

#[test]
fn sampling_clamps_to_viewport_x_range() {
    let sampler = sampler();
    let range = XRange::new(-100.0, 100.0).expect("range");

    let samples = sampler
        .sample(&|x: f64| x, range, Some(5))
        .expect("sample");
    assert_eq!(samples[0].x, 0.0);
    assert_eq!(samples[4].x, 100.0);
}

#[test]
fn area_functions_produce_two_values_per_sample() {
    let sampler = sampler();
    let range = XRange::new(0.0, 4.0).expect("range");

    let samples = sampler
        .sample(&|x: f64| (x - 1.0, x + 1.0), range, Some(3))
        .expect("sample");
    assert!(samples.iter().all(|sample| sample.is_area()));
    assert_eq!(samples[1].values.as_slice(), &[1.0, 3.0]);
}

#[test]
fn non_finite_first_value_is_invalid_function() {
    let sampler = sampler();
    let range = XRange::new(0.0, 4.0).expect("range");

    let err = sampler
        .sample(&|x: f64| 1.0 / x, range, None)
        .expect_err("1/0 is not finite");
    assert!(matches!(err, ClipError::InvalidFunction { x } if x == 0.0));

    let err = sampler
        .sample(&|_x: f64| [0.0, f64::NAN], range, None)
        .expect_err("area top is NaN");
    assert!(matches!(err, ClipError::InvalidFunction { .. }));
}

#[test]
fn later_non_finite_values_are_kept_for_clipping() {
    let viewport = Viewport::new(-1.0, 1.0, -10.0, 10.0).expect("viewport");
    let sampler = CurveSampler::new(viewport, PlotSize::new(100, 100)).expect("sampler");
    let range = XRange::new(-1.0, 1.0).expect("range");

    let samples = sampler
        .sample(&|x: f64| 1.0 / x, range, Some(3))
        .expect("first value is finite");
    assert_eq!(samples.len(), 3);
    assert!(samples[1].y().is_infinite());
    assert_eq!(samples[2].y(), 1.0);
}

#[test]
fn disjoint_range_is_empty_input() {
    let sampler = sampler();
    let range = XRange::new(500.0, 600.0).expect("range");

    let err = sampler
        .sample(&|x: f64| x, range, None)
        .expect_err("no overlap");
    assert!(matches!(err, ClipError::EmptyInput(_)));
}

#[test]
fn invalid_tuning_is_rejected() {
    let viewport = Viewport::new(0.0, 1.0, 0.0, 1.0).expect("viewport");
    let tuning = SamplerTuning {
        pixel_spacing_px: 0.0,
        ..SamplerTuning::default()
    };
    assert!(CurveSampler::with_tuning(viewport, PlotSize::new(10, 10), tuning).is_err());
    assert!(CurveSampler::new(viewport, PlotSize::new(0, 10)).is_err());
}

#[test]
fn oversized_resolution_is_rejected() {
    let sampler = sampler();
    let range = XRange::new(0.0, 1.0).expect("range");

    let err = sampler
        .sample(&|x: f64| x, range, Some(usize::MAX))
        .expect_err("cannot allocate usize::MAX samples");
    assert!(matches!(err, ClipError::InvalidData(_)));

    assert!(
        sampler
            .sample(&|x: f64| x, range, Some(MAX_SAMPLE_COUNT + 1))
            .is_err()
    );
}

#[test]
fn oversized_auto_resolution_is_rejected() {
    let viewport = Viewport::new(0.0, 1.0, 0.0, 1.0).expect("viewport");
    let tuning = SamplerTuning {
        pixel_spacing_px: 1e-6,
        ..SamplerTuning::default()
    };
    let sampler = CurveSampler::with_tuning(viewport, PlotSize::new(4_000, 10), tuning)
        .expect("sampler");
    let range = XRange::new(0.0, 1.0).expect("range");

    let err = sampler
        .sample(&|x: f64| x, range, None)
        .expect_err("auto resolution above the cap");
    assert!(matches!(err, ClipError::InvalidData(_)));
}

#[test]
fn first_value_is_checked_at_clamped_start() {
    let sampler = sampler();
    let range = XRange::new(-100.0, 100.0).expect("range");

    // Singular at x = -100, which lies left of the viewport.
    let samples = sampler
        .sample(&|x: f64| 1.0 / (x + 100.0), range, Some(3))
        .expect("clamped start is x = 0");
    assert_eq!(samples[0].x, 0.0);
    assert_eq!(samples[0].y(), 0.01);
}
