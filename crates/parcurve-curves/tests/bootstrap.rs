//! Integration tests: bootstrap curves from mixed instrument sets.
//!
//! Market data: March 16, 2016 (Wednesday)
//!
//! | Instrument | Term      | Quote    |
//! |------------|-----------|----------|
//! | Deposit    | 3M        | 0.620%   |
//! | Deposit    | 6M        | 0.890%   |
//! | Swap       | 2Y        | 0.850%   |
//! | Swap       | 3Y        | 0.950%   |
//! | Swap       | 5Y        | 1.200%   |

use approx::assert_relative_eq;
use parcurve_core::{Date, Tenor};
use parcurve_curves::prelude::*;
use proptest::prelude::*;

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

fn val() -> Date {
    d(2016, 3, 16)
}

fn mm() -> MoneyMarketConventions {
    MoneyMarketConventions::default()
}

fn annual_fixed() -> SwapConventions {
    SwapConventions::from_pairs([("fixed_length", "12"), ("float_length", "6")]).unwrap()
}

fn deposit(tenor: Tenor, rate: f64) -> Instrument {
    Deposit::new(val(), tenor, rate, mm()).unwrap().into()
}

fn swap(years: i32, rate: f64) -> Instrument {
    TermSwap::new(val(), Tenor::years(years), rate, annual_fixed())
        .unwrap()
        .into()
}

fn shifted_market(shift: f64) -> Vec<Instrument> {
    vec![
        deposit(Tenor::months(3), 0.0062 + shift),
        deposit(Tenor::months(6), 0.0089 + shift),
        swap(2, 0.0085 + shift),
        swap(3, 0.0095 + shift),
        swap(5, 0.0120 + shift),
    ]
}

fn market() -> Vec<Instrument> {
    shifted_market(0.0)
}

fn build(instruments: Vec<Instrument>) -> Curve {
    let mut curve = Curve::new(val());
    for instrument in instruments {
        curve.add_instrument(instrument).unwrap();
    }
    curve
}

#[test]
fn test_negative_rate_deposit() {
    let mut curve = Curve::new(val());
    curve.add_instrument(deposit(Tenor::days(5), -0.00293)).unwrap();

    let df = curve.discount_factor(d(2016, 3, 21)).unwrap();
    assert_relative_eq!(df, 1.0 / (1.0 - 0.00293 * 5.0 / 360.0), epsilon = 1e-15);
    assert!(df > 1.0);

    let zero = curve.zero_rate(d(2016, 3, 21), Compounding::Continuous).unwrap();
    assert!(zero < 0.0);
}

#[test]
fn test_valuation_date_discounts_at_one() {
    let mut curve = build(market());
    assert_eq!(curve.discount_factor(val()).unwrap(), 1.0);
    assert_eq!(curve.view().unwrap()[0], Pillar::new(val(), 1.0));
}

#[test]
fn test_one_pillar_per_instrument() {
    let mut curve = build(market());
    let maturities: Vec<Date> = curve.instruments().iter().map(|i| i.maturity()).collect();

    let pillars = curve.view().unwrap();
    assert_eq!(pillars.len(), maturities.len() + 1);
    for (pillar, maturity) in pillars[1..].iter().zip(&maturities) {
        assert_eq!(pillar.date, *maturity);
    }
}

#[test]
fn test_positive_rates_give_decreasing_discount_factors() {
    let mut curve = build(market());
    let pillars = curve.view().unwrap().to_vec();

    for pair in pillars.windows(2) {
        assert!(
            pair[1].discount_factor < pair[0].discount_factor,
            "{} >= {}",
            pair[1].discount_factor,
            pair[0].discount_factor
        );
    }

    let mut previous = 1.0;
    let mut date = val();
    while date < d(2021, 3, 16) {
        date = date.add_days(30);
        let df = curve.discount_factor(date).unwrap();
        assert!(df < previous);
        previous = df;
    }
}

#[test]
fn test_negative_rates_give_increasing_discount_factors() {
    let mut curve = build(shifted_market(-0.02));
    let pillars = curve.view().unwrap().to_vec();

    for pair in pillars.windows(2) {
        assert!(
            pair[1].discount_factor > pair[0].discount_factor,
            "{} <= {}",
            pair[1].discount_factor,
            pair[0].discount_factor
        );
    }

    let mut previous = 1.0;
    let mut date = val();
    while date < d(2021, 3, 16) {
        date = date.add_days(30);
        let df = curve.discount_factor(date).unwrap();
        assert!(df > previous);
        previous = df;
    }

    let zero = curve.zero_rate(d(2018, 3, 16), Compounding::Continuous).unwrap();
    assert!(zero < 0.0);
    assert!(curve.repricing_report().unwrap().is_valid());
}

#[test]
fn test_swap_reprices_against_solved_deposits() {
    let mut curve = build(market());
    let report = curve.repricing_report().unwrap();

    assert!(report.is_valid(), "{report}");
    assert_eq!(report.total_count(), 5);
    assert!(report.max_error() < 1e-7);

    let kinds: Vec<InstrumentKind> = report.checks().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            InstrumentKind::Deposit,
            InstrumentKind::Deposit,
            InstrumentKind::TermSwap,
            InstrumentKind::TermSwap,
            InstrumentKind::TermSwap,
        ]
    );
}

#[test]
fn test_queries_are_idempotent() {
    let mut curve = build(market());
    let date = d(2018, 7, 2);

    let first = curve.discount_factor(date).unwrap();
    let pillars = curve.view().unwrap().to_vec();
    curve.bootstrap().unwrap();

    assert_eq!(curve.discount_factor(date).unwrap(), first);
    assert_eq!(curve.view().unwrap(), &pillars[..]);
}

#[test]
fn test_duplicate_maturity_leaves_curve_unchanged() {
    let mut curve = build(market());
    let before = curve.view().unwrap().to_vec();

    let err = curve.add_instrument(deposit(Tenor::months(6), 0.02)).unwrap_err();
    assert!(err.is_duplicate_maturity());
    assert!(!curve.is_stale());
    assert_eq!(curve.instruments().len(), 5);
    assert_eq!(curve.view().unwrap(), &before[..]);
}

#[test]
fn test_convergence_failure_names_instrument() {
    let config = BootstrapConfig::default()
        .with_solver(SolverConfig::default().with_max_iterations(1));
    let mut curve = Curve::new(val()).with_config(config);
    curve.add_instrument(deposit(Tenor::months(6), 0.0089)).unwrap();
    let three_year = swap(3, 0.0095);
    let description = three_year.description();
    curve.add_instrument(three_year).unwrap();

    match curve.bootstrap().unwrap_err() {
        CurveError::BootstrapConvergence {
            instrument,
            maturity,
            ..
        } => {
            assert_eq!(instrument, description);
            assert_eq!(instrument, "Swap 0.9500% 2016-03-16 to 2019-03-16");
            assert_eq!(maturity, d(2019, 3, 16));
        }
        other => panic!("unexpected error: {other}"),
    }

    // Only the deposit pillar was kept
    assert_eq!(curve.solved_pillars().len(), 2);
    assert!(curve.discount_factor(d(2017, 3, 16)).is_err());
}

#[test]
fn test_quote_without_root_fails_the_bootstrap() {
    // 1 - 10 × 0.5 < 0: no positive discount factor reprices this deposit
    let hopeless = deposit(Tenor::months(6), -10.0);
    let description = hopeless.description();

    let mut curve = Curve::new(val());
    curve.add_instrument(deposit(Tenor::months(3), 0.0062)).unwrap();
    curve.add_instrument(hopeless).unwrap();
    curve.add_instrument(swap(2, 0.0085)).unwrap();

    match curve.bootstrap().unwrap_err() {
        CurveError::BootstrapConvergence {
            instrument,
            maturity,
            ..
        } => {
            assert_eq!(instrument, description);
            assert_eq!(maturity, d(2016, 9, 16));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert_eq!(curve.solved_pillars().len(), 2);
    assert_eq!(curve.first_unsolved(), 1);
    assert!(curve.is_stale());
    assert!(curve.discount_factor(d(2016, 5, 2)).is_err());
}

#[test]
fn test_closed_form_matches_iterative_solve() {
    let instruments = vec![
        deposit(Tenor::months(3), 0.0062),
        ForwardRate::new(d(2016, 6, 16), d(2016, 12, 16), 0.0095, mm())
            .unwrap()
            .into(),
        Future::from_imm("Z16", Tenor::months(3), 99.05, mm())
            .unwrap()
            .into(),
    ];

    let mut closed = build(instruments.clone());
    let mut iterative = Curve::new(val()).with_config(BootstrapConfig::default().with_closed_form(false));
    for instrument in instruments {
        iterative.add_instrument(instrument).unwrap();
    }

    let a = closed.view().unwrap().to_vec();
    let b = iterative.view().unwrap().to_vec();
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.date, y.date);
        assert_relative_eq!(x.discount_factor, y.discount_factor, epsilon = 1e-12);
    }
}

#[test]
fn test_fra_starting_beyond_last_pillar() {
    let mut curve = Curve::new(val());
    curve.add_instrument(deposit(Tenor::months(3), 0.0062)).unwrap();
    let start = d(2016, 9, 16);
    let end = d(2016, 12, 16);
    curve
        .add_instrument(ForwardRate::new(start, end, 0.0110, mm()).unwrap())
        .unwrap();

    let tau = 91.0 / 360.0;
    let df_start = curve.discount_factor(start).unwrap();
    let df_end = curve.discount_factor(end).unwrap();
    assert_relative_eq!(df_end * (1.0 + 0.0110 * tau), df_start, epsilon = 1e-12);
    assert!(curve.repricing_report().unwrap().is_valid());
}

#[test]
fn test_futures_strip() {
    let mut curve = Curve::new(val());
    curve.add_instrument(deposit(Tenor::months(3), 0.0062)).unwrap();
    for (code, price) in [("M16", 99.35), ("U16", 99.28), ("Z16", 99.20)] {
        curve
            .add_instrument(Future::from_imm(code, Tenor::months(3), price, mm()).unwrap())
            .unwrap();
    }

    // Z16 runs 2016-12-21 to 2017-03-21
    let df_start = curve.discount_factor(d(2016, 12, 21)).unwrap();
    let df_end = curve.discount_factor(d(2017, 3, 21)).unwrap();
    assert_relative_eq!(
        df_start / df_end,
        1.0 + 0.0080 * 90.0 / 360.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_compound_futures_strip_matches_simple_strip() {
    let strip = [("M16", 99.35), ("U16", 99.28), ("Z16", 99.20)];

    let mut simple = Curve::new(val());
    let mut compound = Curve::new(val());
    simple.add_instrument(deposit(Tenor::months(3), 0.0062)).unwrap();
    compound.add_instrument(deposit(Tenor::months(3), 0.0062)).unwrap();
    for (code, price) in strip {
        simple
            .add_instrument(Future::from_imm(code, Tenor::months(3), price, mm()).unwrap())
            .unwrap();
        compound
            .add_instrument(CompoundFuture::from_imm(code, Tenor::months(3), price, mm()).unwrap())
            .unwrap();
    }

    let report = compound.repricing_report().unwrap();
    assert!(report.is_valid(), "{report}");
    assert!(report
        .checks()
        .iter()
        .skip(1)
        .all(|c| c.kind == InstrumentKind::CompoundFuture));

    let expected = simple.view().unwrap().to_vec();
    for (a, b) in compound.view().unwrap().iter().zip(&expected) {
        assert_eq!(a.date, b.date);
        assert_relative_eq!(a.discount_factor, b.discount_factor, epsilon = 1e-12);
    }

    // Same answer when every pillar goes through the solver
    let mut iterative = Curve::new(val()).with_config(BootstrapConfig::default().with_closed_form(false));
    iterative.add_instrument(deposit(Tenor::months(3), 0.0062)).unwrap();
    for (code, price) in strip {
        iterative
            .add_instrument(CompoundFuture::from_imm(code, Tenor::months(3), price, mm()).unwrap())
            .unwrap();
    }
    let date = d(2017, 3, 21);
    assert_relative_eq!(
        iterative.discount_factor(date).unwrap(),
        compound.discount_factor(date).unwrap(),
        epsilon = 1e-10
    );
}

#[test]
fn test_spline_interpolation_reprices() {
    let mut curve = build(market()).with_interpolation(InterpolationMethod::CubicSplineZero);
    assert_eq!(curve.interpolation(), InterpolationMethod::CubicSplineZero);

    let report = curve.repricing_report().unwrap();
    assert!(report.is_valid(), "{report}");

    // The first deposit is solved against a single pillar, exactly
    let df = curve.discount_factor(d(2016, 6, 16)).unwrap();
    assert_relative_eq!(df, 1.0 / (1.0 + 0.0062 * 92.0 / 360.0), epsilon = 1e-12);
}

#[test]
fn test_overnight_curve_discounts_term_swaps() {
    let ois_conventions =
        SwapConventions::from_pairs([("fixed_length", "12"), ("float_length", "12")]).unwrap();
    let mut ois = Curve::new(val());
    for (years, rate) in [(1, 0.0040), (2, 0.0050), (3, 0.0060), (5, 0.0080)] {
        ois.add_instrument(
            OvernightIndexSwap::new(val(), Tenor::years(years), rate, ois_conventions.clone()).unwrap(),
        )
        .unwrap();
    }
    assert!(ois.repricing_report().unwrap().is_valid());
    let discount_curve = ois.snapshot().unwrap();

    let mut dual = build(market()).with_discount_curve(discount_curve).unwrap();
    let mut single = build(market());

    assert!(dual.repricing_report().unwrap().is_valid());

    let date = d(2021, 3, 16);
    let dual_df = dual.discount_factor(date).unwrap();
    let single_df = single.discount_factor(date).unwrap();
    assert!((dual_df - single_df).abs() > 1e-8);

    // Deposits do not depend on the discount curve
    assert_relative_eq!(
        dual.discount_factor(d(2016, 9, 16)).unwrap(),
        single.discount_factor(d(2016, 9, 16)).unwrap(),
        epsilon = 1e-15
    );
}

/// Annual OIS curve with pillars on each anniversary out to three years.
fn overnight_snapshot() -> DiscountCurve {
    let conventions =
        SwapConventions::from_pairs([("fixed_length", "12"), ("float_length", "12")]).unwrap();
    let mut ois = Curve::new(val());
    for (years, rate) in [(1, 0.0040), (2, 0.0050), (3, 0.0060)] {
        ois.add_instrument(
            OvernightIndexSwap::new(val(), Tenor::years(years), rate, conventions.clone()).unwrap(),
        )
        .unwrap();
    }
    ois.snapshot().unwrap()
}

fn basis_swap(style: BasisSwapStyle, years: i32, spread: f64, pairs: &[(&str, &str)]) -> Instrument {
    BasisSwap::new(
        style,
        val(),
        Tenor::years(years),
        spread,
        BasisSwapConventions::from_pairs(pairs.iter().copied()).unwrap(),
    )
    .unwrap()
    .into()
}

#[test]
fn test_flat_compound_basis_reproduces_reference_curve() {
    let reference = overnight_snapshot();
    let annual = [("leg_one_length", "12"), ("leg_two_length", "12")];

    let mut curve = Curve::new(val()).with_discount_curve(reference.clone()).unwrap();
    for years in 1..=3 {
        curve
            .add_instrument(basis_swap(BasisSwapStyle::CompoundIndex, years, 0.0, &annual))
            .unwrap();
    }

    for pillar in &curve.view().unwrap()[1..] {
        assert_relative_eq!(
            pillar.discount_factor,
            reference.discount(pillar.date),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_basis_spread_widens_projection_curve() {
    let reference = overnight_snapshot();
    let quarterly = [("leg_one_length", "3"), ("leg_two_length", "3")];

    let mut curve = Curve::new(val()).with_discount_curve(reference.clone()).unwrap();
    curve.add_instrument(deposit(Tenor::months(3), 0.0062)).unwrap();
    curve
        .add_instrument(basis_swap(BasisSwapStyle::AverageIndex, 1, 0.0025, &quarterly))
        .unwrap();
    curve
        .add_instrument(basis_swap(BasisSwapStyle::AverageIndex, 2, 0.0030, &quarterly))
        .unwrap();

    let report = curve.repricing_report().unwrap();
    assert!(report.is_valid(), "{report}");
    assert_eq!(report.checks()[2].kind, InstrumentKind::BasisSwap);

    // Term rates above the overnight average put the projection curve below the reference
    for date in [d(2017, 3, 16), d(2018, 3, 16)] {
        assert!(curve.discount_factor(date).unwrap() < reference.discount(date));
    }
}

#[test]
fn test_basis_swap_without_reference_curve_fails() {
    let mut curve = Curve::new(val());
    curve.add_instrument(deposit(Tenor::months(3), 0.0062)).unwrap();
    curve
        .add_instrument(basis_swap(BasisSwapStyle::CompoundIndex, 1, 0.001, &[]))
        .unwrap();

    let err = curve.bootstrap().unwrap_err();
    assert!(matches!(err, CurveError::InvalidInstrument { .. }), "{err}");
    assert_eq!(curve.solved_pillars().len(), 2);
}

#[test]
fn test_zeros_and_rates() {
    let mut curve = build(market());

    let zeros = curve.zeros().unwrap();
    assert_eq!(zeros.len(), 6);
    assert_eq!(zeros[0].date, val());
    assert_eq!(zeros[0].rate, 0.0);

    let one_year = d(2017, 3, 16);
    let df = curve.discount_factor(one_year).unwrap();
    let continuous = curve.zero_rate(one_year, Compounding::Continuous).unwrap();
    assert_relative_eq!(continuous, -df.ln(), epsilon = 1e-12);

    let annual = curve.zero_rate(one_year, Compounding::Annual).unwrap();
    assert_relative_eq!(annual, 1.0 / df - 1.0, epsilon = 1e-12);

    let at_val = curve.zero_rate(val(), Compounding::Continuous).unwrap();
    assert_relative_eq!(at_val, zeros[1].rate, epsilon = 1e-12);
}

#[test]
fn test_dates_before_valuation_rejected() {
    let mut curve = build(market());
    let err = curve.discount_factor(d(2016, 3, 15)).unwrap_err();
    assert_eq!(
        err,
        CurveError::DateBeforeValuation {
            date: d(2016, 3, 15),
            valuation_date: val(),
        }
    );
    assert!(curve.zero_rate(d(2015, 1, 1), Compounding::Continuous).is_err());
}

#[test]
fn test_empty_curve() {
    let mut curve = Curve::new(val());
    assert_eq!(curve.discount_factor(d(2017, 1, 1)), Err(CurveError::EmptyCurve));
    assert!(curve.snapshot().is_err());
}

#[test]
fn test_bootstrap_all_in_parallel() {
    let mut curves: Vec<Curve> = (0..4)
        .map(|i| build(shifted_market(f64::from(i) * 0.001)))
        .collect();

    let results = bootstrap_all(&mut curves);
    assert!(results.iter().all(Result::is_ok));

    let five_year = d(2021, 3, 16);
    let dfs: Vec<f64> = curves
        .iter_mut()
        .map(|c| c.discount_factor(five_year).unwrap())
        .collect();
    assert!(dfs.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn test_snapshot_serialization() {
    let mut curve = build(market());
    let snapshot = curve.snapshot().unwrap();

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: DiscountCurve = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.valuation_date(), val());
    assert_eq!(restored.pillars(), snapshot.pillars());
    let date = d(2019, 9, 30);
    assert_relative_eq!(
        restored.discount_factor(date).unwrap(),
        curve.discount_factor(date).unwrap(),
        epsilon = 1e-15
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_insertion_order_does_not_matter(
        order in Just((0..5).collect::<Vec<usize>>()).prop_shuffle(),
        query_between in any::<bool>(),
    ) {
        let reference = build(market()).view().unwrap().to_vec();

        let instruments = market();
        let mut curve = Curve::new(val());
        for &i in &order {
            curve.add_instrument(instruments[i].clone()).unwrap();
            if query_between {
                curve.bootstrap().unwrap();
            }
        }

        let pillars = curve.view().unwrap();
        prop_assert_eq!(pillars.len(), reference.len());
        for (p, r) in pillars.iter().zip(&reference) {
            prop_assert_eq!(p.date, r.date);
            prop_assert!((p.discount_factor - r.discount_factor).abs() < 1e-12);
        }
    }

    #[test]
    fn prop_single_deposit_discount_factor(rate in -0.01f64..0.10, months in 1i32..24) {
        let mut curve = Curve::new(val());
        let deposit = Deposit::new(val(), Tenor::months(months), rate, mm()).unwrap();
        let tau = deposit.year_fraction();
        let end = deposit.end_date();
        curve.add_instrument(deposit).unwrap();

        let df = curve.discount_factor(end).unwrap();
        prop_assert!((df * (1.0 + rate * tau) - 1.0).abs() < 1e-12);
    }
}
