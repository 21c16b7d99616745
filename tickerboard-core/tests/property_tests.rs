//! Property tests for transform and progress invariants.
//!
//! Uses proptest to verify:
//! 1. Anchor - every column's first observed cell is exactly 0.0
//! 2. Forward-fill idempotence - filling a filled matrix changes nothing
//! 3. Ordering - final-row values never increase left to right
//! 4. Ranks - contiguous from 1, one per symbol with at least one bar
//! 5. Progress - fraction stays in [0, 1] once the contest has started

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use std::collections::BTreeMap;
use tickerboard_core::domain::{Bar, StockPick};
use tickerboard_core::{
    normalize, ContestWindow, FillPolicy, StockPicks, TransformOptions,
};

// ── Strategies (proptest) ────────────────────────────────────────────

/// Per-symbol series: day offset → close. Each series is non-empty.
fn arb_series() -> impl Strategy<Value = Vec<BTreeMap<u32, f64>>> {
    prop::collection::vec(
        prop::collection::btree_map(0u32..30, 1.0..500.0_f64, 1..15),
        1..6,
    )
}

fn arb_fill() -> impl Strategy<Value = FillPolicy> {
    prop_oneof![Just(FillPolicy::ForwardFill), Just(FillPolicy::None)]
}

fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 4, 21, 0, 0).unwrap()
}

fn build(series: &[BTreeMap<u32, f64>]) -> (Vec<Bar>, StockPicks) {
    let picks = StockPicks::new(
        (0..series.len())
            .map(|i| StockPick::new(format!("S{i}"), format!("Stock {i}")))
            .collect(),
    )
    .unwrap();
    let bars = series
        .iter()
        .enumerate()
        .flat_map(|(i, closes)| {
            closes.iter().map(move |(&day, &close)| {
                Bar::new(format!("S{i}"), base() + Duration::days(i64::from(day)), close)
            })
        })
        .collect();
    (bars, picks)
}

// ── 1. Anchor ────────────────────────────────────────────────────────

proptest! {
    /// The first observed cell of every column is exactly zero.
    #[test]
    fn first_observation_is_zero(series in arb_series(), fill in arb_fill()) {
        let (bars, picks) = build(&series);
        let opts = TransformOptions { fill, ..Default::default() };
        let out = normalize(&bars, &picks, &opts).unwrap();

        for column in out.matrix.columns() {
            let first = column.first_observed().unwrap();
            prop_assert_eq!(column.values[first], Some(0.0));
            prop_assert!(column.values[..first].iter().all(Option::is_none));
        }
    }
}

// ── 2. Forward-Fill Idempotence ──────────────────────────────────────

proptest! {
    /// Filling twice equals filling once.
    #[test]
    fn forward_fill_is_idempotent(series in arb_series()) {
        let (bars, picks) = build(&series);
        let out = normalize(&bars, &picks, &TransformOptions::default()).unwrap();

        let mut again = out.matrix.clone();
        again.forward_fill();
        prop_assert_eq!(&again, &out.matrix);
    }

    /// After filling, a column is never unset once it has been observed.
    #[test]
    fn filled_columns_have_no_interior_gaps(series in arb_series()) {
        let (bars, picks) = build(&series);
        let out = normalize(&bars, &picks, &TransformOptions::default()).unwrap();

        for column in out.matrix.columns() {
            let first = column.first_observed().unwrap();
            prop_assert!(column.values[first..].iter().all(Option::is_some));
        }
    }
}

// ── 3. Ordering ──────────────────────────────────────────────────────

proptest! {
    /// Final-row values are non-increasing; unset values come last.
    #[test]
    fn columns_sorted_by_final_row(series in arb_series(), fill in arb_fill()) {
        let (bars, picks) = build(&series);
        let opts = TransformOptions { fill, ..Default::default() };
        let out = normalize(&bars, &picks, &opts).unwrap();

        let last: Vec<Option<f64>> = out.matrix.last_row().into_iter().map(|(_, v)| v).collect();
        for pair in last.windows(2) {
            match (pair[0], pair[1]) {
                (Some(a), Some(b)) => prop_assert!(a >= b),
                (None, Some(_)) => prop_assert!(false, "unset value ranked above a set one"),
                _ => {}
            }
        }
    }
}

// ── 4. Ranks ─────────────────────────────────────────────────────────

proptest! {
    /// Ranks run 1..=n and follow matrix column order.
    #[test]
    fn ranks_are_contiguous(series in arb_series()) {
        let (bars, picks) = build(&series);
        let out = normalize(&bars, &picks, &TransformOptions::default()).unwrap();

        prop_assert_eq!(out.ranking.len(), series.len());
        for (i, (metric, symbol)) in out.ranking.iter().zip(out.matrix.symbols()).enumerate() {
            prop_assert_eq!(metric.rank, i + 1);
            prop_assert_eq!(metric.symbol.as_str(), symbol);
        }
    }
}

// ── 5. Progress ──────────────────────────────────────────────────────

proptest! {
    /// Once the start date has passed the fraction is within [0, 1].
    #[test]
    fn fraction_within_unit_interval(
        total in 1i64..400,
        offset_secs in 0i64..(800 * 86_400),
    ) {
        let start = NaiveDate::from_ymd_opt(2024, 11, 4).unwrap();
        let window = ContestWindow::new(start, start + Duration::days(total)).unwrap();
        let now = start.and_hms_opt(0, 0, 0).unwrap() + Duration::seconds(offset_secs);

        let p = window.progress_at(now);
        prop_assert!((0.0..=1.0).contains(&p.fraction));
        prop_assert_eq!(p.days_total, total);
        if p.days_passed >= total {
            prop_assert_eq!(p.fraction, 1.0);
        }
    }
}
