//! Integration tests for greedy deployment over the reference scenario.

mod common;

use fleet_deploy::sim::deploy::{Greedy, Policy, RandomGreedy};
use fleet_deploy::sim::engine::Engine;
use fleet_deploy::sim::score::PercentDifference;

#[test]
fn achieved_capacity_matches_reference_sequence() {
    let result = common::run_reference(common::reference_fleet(), Greedy);
    common::assert_close(
        &result.ledger.new_capacity_column(),
        &[20.0, 75.0, 80.0, 80.0, 220.0, 640.0, 690.0, 950.0, 700.0],
    );
    assert_eq!(result.policy, "greedy");
}

#[test]
fn big_unit_replaced_at_end_of_life() {
    let result = common::run_reference(common::reference_fleet(), Greedy);
    let decom = result.ledger.decommissioned_column(0);
    assert_eq!(decom, vec![0, 0, 0, 0, 0, 0, 0, 0, 1]);
    // one Big commissioned at t=2 retires at t=8 and is replaced in place
    assert_eq!(result.ledger.count_column(0), vec![0, 0, 1, 1, 2, 8, 8, 11, 9]);
}

#[test]
fn big_unit_capacity_column() {
    let result = common::run_reference(common::reference_fleet(), Greedy);
    let big: Vec<f64> = result.ledger.steps().iter().map(|s| s.units[0].capacity).collect();
    common::assert_close(&big, &[0.0, 0.0, 80.0, 80.0, 160.0, 640.0, 640.0, 880.0, 720.0]);
}

#[test]
fn small_units_cascade_every_two_steps() {
    let result = common::run_reference(common::reference_fleet(), Greedy);
    assert_eq!(result.ledger.count_column(2), vec![0, 3, 0, 3, 0, 3, 2, 5, 2]);
    assert_eq!(result.ledger.decommissioned_column(2), vec![0, 0, 0, 3, 0, 3, 0, 3, 2]);
}

#[test]
fn greedy_never_commissions_above_demand() {
    let result = common::run_reference(common::reference_fleet(), Greedy);
    for step in result.ledger.steps() {
        assert!(
            step.new_total_capacity <= step.demand + common::TOL,
            "step {} overshoots: {} > {}",
            step.step,
            step.new_total_capacity,
            step.demand
        );
    }
}

#[test]
fn decommissions_pair_with_earlier_commissions() {
    let fleet = common::reference_fleet();
    let result = common::run_reference(fleet.clone(), Greedy);
    for (u, unit) in fleet.units().iter().enumerate() {
        let counts = result.ledger.count_column(u);
        let decom = result.ledger.decommissioned_column(u);
        for t in 0..counts.len() {
            let expected = if t >= unit.lifetime { counts[t - unit.lifetime] } else { 0 };
            assert_eq!(decom[t], expected, "{} at t={t}", unit.name);
            assert!(decom[t] <= counts[t]);
        }
    }
}

#[test]
fn capacity_fields_are_consistent_with_counts() {
    let fleet = common::reference_fleet();
    let result = common::run_reference(fleet.clone(), Greedy);
    for step in result.ledger.steps() {
        let mut total = 0.0;
        let mut fresh = 0.0;
        for (u, state) in step.units.iter().enumerate() {
            let mwe = fleet.unit(u).effective_mwe();
            assert!((state.capacity - f64::from(state.count) * mwe).abs() < common::TOL);
            total += state.capacity;
            fresh += state.new_capacity;
        }
        assert!((step.total_capacity - total).abs() < common::TOL);
        assert!((step.new_total_capacity - fresh).abs() < common::TOL);
    }
}

#[test]
fn score_report_counts_and_shares() {
    let result = common::run_reference(common::reference_fleet(), Greedy);
    let report = &result.report;
    assert_eq!(report.equal_count, 6);
    assert_eq!(report.below_count, 3);
    assert_eq!(report.above_count, 0);
    assert!((report.total_under_supply - (-8.0)).abs() < common::TOL);
    assert!(report.total_over_supply.abs() < common::TOL);

    let big = report.share_of("ReactorBig").unwrap_or_default();
    assert!((big - 85.333_333_333).abs() < 1e-6, "got {big}");
    let sum: f64 = report.shares.iter().map(|s| s.percent).sum();
    assert!((sum - 100.0).abs() < 1e-9);
    assert!(report.undefined_steps().is_empty());
    assert!(report.steps.iter().all(|s| matches!(s.percent, PercentDifference::Defined(_))));
}

#[test]
fn runs_are_deterministic() {
    let a = common::run_reference(common::reference_fleet(), Greedy);
    let b = common::run_reference(common::reference_fleet(), Greedy);
    assert_eq!(a.ledger, b.ledger);
}

#[test]
fn random_greedy_is_seed_deterministic_and_bounded() {
    let a = common::run_reference(common::reference_fleet(), RandomGreedy::new(11));
    let b = common::run_reference(common::reference_fleet(), Policy::RandomGreedy(RandomGreedy::new(11)));
    assert_eq!(a.ledger, b.ledger);
    for step in a.ledger.steps() {
        assert!(step.new_total_capacity <= step.demand + common::TOL);
    }
}

#[test]
fn into_ledger_matches_run() {
    let fleet = common::reference_fleet();
    let ledger = Engine::new(fleet.clone(), Greedy, &common::DEMAND, common::START_YEAR)
        .and_then(Engine::into_ledger)
        .expect("ledger builds");
    let result = common::run_reference(fleet, Greedy);
    assert_eq!(ledger, result.ledger);
    assert_eq!(ledger.step(0).year, 2016);
    assert_eq!(ledger.step(8).year, 2024);
}
