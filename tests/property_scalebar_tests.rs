use geona_viz::core::{ScaleRange, validate_scale};
use proptest::prelude::*;

proptest! {
    #[test]
    fn log_ticks_are_five_strictly_increasing_values_with_exact_endpoints(
        min in 1e-6f64..1e3,
        span_factor in 1.001f64..1e6
    ) {
        let max = min * span_factor;
        let range = ScaleRange::new(min, max, true).expect("valid log range");
        let ticks = range.ticks();

        prop_assert_eq!(ticks.len(), 5);
        for pair in ticks.windows(2) {
            prop_assert!(pair[0].value < pair[1].value);
        }
        prop_assert!((ticks[0].value - min).abs() <= min * 1e-9);
        prop_assert!((ticks[4].value - max).abs() <= max * 1e-9);
    }

    #[test]
    fn linear_ticks_follow_the_quarter_span_formula(
        min in -1e6f64..1e6,
        raw_span in 0.001f64..1e6
    ) {
        let max = min + raw_span;
        let range = ScaleRange::new(min, max, false).expect("valid range");
        let ticks = range.ticks();
        let span = max - min;

        prop_assert_eq!(ticks.len(), 5);
        prop_assert_eq!(ticks[0].value, min);
        prop_assert_eq!(ticks[4].value, max);
        for (index, tick) in ticks.iter().enumerate() {
            let expected = min + index as f64 / 4.0 * span;
            prop_assert!((tick.value - expected).abs() <= span * 1e-12);
        }
    }

    #[test]
    fn inverted_bounds_always_fail_validation(
        min in 0.001f64..1e6,
        delta in 0.001f64..1e6,
        logarithmic in any::<bool>()
    ) {
        let max = min - delta;
        let result = validate_scale(&min.to_string(), &max.to_string(), logarithmic);
        prop_assert!(result.is_err());
    }

    #[test]
    fn every_tick_label_parses_back_to_a_nearby_value(
        min in -1e6f64..1e6,
        span in 0.001f64..1e6
    ) {
        let range = ScaleRange::new(min, min + span, false).expect("valid range");
        for tick in range.ticks() {
            let reparsed: f64 = tick.label.parse().expect("standard form parses");
            let tolerance = tick.value.abs().max(1.0) * 0.01;
            prop_assert!((reparsed - tick.value).abs() <= tolerance);
        }
    }
}
