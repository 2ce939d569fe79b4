//! Property checks for interpolators and solvers.

use proptest::prelude::*;

use parcurve_math::prelude::*;

fn increasing_knots() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..2.0, 3..10).prop_map(|steps| {
        steps
            .iter()
            .scan(0.0, |t, step| {
                *t += step;
                Some(*t)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn log_linear_discount_factors_stay_between_knots(
        times in increasing_knots(),
        rate in -0.01f64..0.10,
        query in 0.0f64..1.0,
    ) {
        let dfs: Vec<f64> = times.iter().map(|t| (-rate * t).exp()).collect();
        let interp = LogLinearInterpolator::new(times.clone(), dfs.clone()).unwrap();

        let t = times[0] + query * (times[times.len() - 1] - times[0]);
        let df = interp.interpolate(t).unwrap();

        // A flat continuous rate is reproduced exactly by log-linear interpolation
        prop_assert!((df - (-rate * t).exp()).abs() < 1e-12);
    }

    #[test]
    fn flat_extrapolation_returns_end_values(
        times in increasing_knots(),
        beyond in 0.1f64..50.0,
    ) {
        let ys: Vec<f64> = times.iter().map(|t| 0.01 + 0.001 * t).collect();
        let last = ys[ys.len() - 1];
        let first = ys[0];

        let linear = LinearInterpolator::new(times.clone(), ys.clone()).unwrap().with_flat_extrapolation();
        let spline = CubicSpline::new(times.clone(), ys).unwrap().with_flat_extrapolation();
        let t_max = times[times.len() - 1];

        prop_assert!((linear.interpolate(t_max + beyond).unwrap() - last).abs() < 1e-15);
        prop_assert!((spline.interpolate(t_max + beyond).unwrap() - last).abs() < 1e-15);
        prop_assert!((spline.interpolate(times[0] - beyond).unwrap() - first).abs() < 1e-15);
    }

    #[test]
    fn hybrid_solves_deposit_discount_factor(rate in -0.02f64..0.15, days in 1u32..3650) {
        let tau = f64::from(days) / 360.0;
        let f = |df: f64| (1.0 + rate * tau) * df - 1.0;

        let result = hybrid_numerical(f, 1.0, Some((1e-6, 4.0)), &SolverConfig::default()).unwrap();
        prop_assert!((result.root - 1.0 / (1.0 + rate * tau)).abs() < 1e-11);
    }
}
