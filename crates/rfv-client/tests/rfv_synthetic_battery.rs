mod support;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rfv_client::rfv::types::{Grade, Metric};
use rfv_client::{ActionMap, RfvScore, compute_rfv};
use support::ledger_kit::{synthetic_ledger, transaction};

const SEEDS: [u64; 4] = [7, 42, 1_337, 90_210];

#[test]
fn every_customer_appears_exactly_once() {
    for seed in SEEDS {
        let ledger = synthetic_ledger(seed, 120);
        let expected = ledger
            .iter()
            .map(|row| row.customer_id.clone())
            .collect::<BTreeSet<String>>();

        let result = compute_rfv(&ledger, &ActionMap::new());
        assert!(result.is_ok());
        if let Ok(segmentation) = result {
            let ids = segmentation
                .customers
                .iter()
                .map(|customer| customer.metrics.customer_id.clone())
                .collect::<Vec<String>>();
            assert_eq!(ids.len(), expected.len());
            assert_eq!(ids.into_iter().collect::<BTreeSet<String>>(), expected);
        }
    }
}

#[test]
fn recency_is_measured_from_the_global_latest_purchase() {
    let early = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap_or(NaiveDate::MIN);
    let late = NaiveDate::from_ymd_opt(2024, 3, 21).unwrap_or(NaiveDate::MIN);
    let result = compute_rfv(
        &[transaction("X", early, 10.0), transaction("Y", late, 10.0)],
        &ActionMap::new(),
    );
    assert!(result.is_ok());
    if let Ok(segmentation) = result {
        assert_eq!(segmentation.reference_date, late);
        assert_eq!(segmentation.customers[0].metrics.recency, 20);
        assert_eq!(segmentation.customers[1].metrics.recency, 0);
    }
}

#[test]
fn grades_are_monotonic_in_each_metric() {
    for seed in SEEDS {
        let result = compute_rfv(&synthetic_ledger(seed, 80), &ActionMap::new());
        assert!(result.is_ok());
        let Ok(segmentation) = result else {
            continue;
        };

        for metric in Metric::ALL {
            for left in &segmentation.customers {
                for right in &segmentation.customers {
                    let left_value = left.metrics.metric_value(metric);
                    let right_value = right.metrics.metric_value(metric);
                    let left_grade = segmentation.boundaries.grade(&left.metrics, metric);
                    let right_grade = segmentation.boundaries.grade(&right.metrics, metric);
                    match metric {
                        Metric::Recency if left_value <= right_value => {
                            assert!(left_grade <= right_grade);
                        }
                        Metric::Frequency | Metric::Value if left_value <= right_value => {
                            assert!(left_grade >= right_grade);
                        }
                        _ => {}
                    }
                }
            }
        }
    }
}

#[test]
fn values_on_the_first_quartile_boundary_land_in_the_first_bucket() {
    // Frequencies 1..=5: p25 is exactly 2.
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or(NaiveDate::MIN);
    let mut ledger = Vec::new();
    for (index, id) in ["F1", "F2", "F3", "F4", "F5"].iter().enumerate() {
        for _ in 0..=index {
            ledger.push(transaction(id, day, 1.0));
        }
    }

    let result = compute_rfv(&ledger, &ActionMap::new());
    assert!(result.is_ok());
    if let Ok(segmentation) = result {
        assert_eq!(segmentation.boundaries.frequency.p25, 2.0);
        let f2 = &segmentation.customers[1];
        assert_eq!(f2.metrics.frequency, 2);
        assert_eq!(f2.score.frequency, Grade::D);
        assert_eq!(segmentation.customers[0].score.frequency, Grade::D);
        assert_eq!(segmentation.customers[2].score.frequency, Grade::C);
        assert_eq!(segmentation.customers[4].score.frequency, Grade::A);
    }
}

#[test]
fn score_text_round_trips_through_the_grade_triple() {
    for seed in SEEDS {
        let result = compute_rfv(&synthetic_ledger(seed, 60), &ActionMap::new());
        assert!(result.is_ok());
        if let Ok(segmentation) = result {
            for customer in &segmentation.customers {
                let text = customer.score.to_string();
                assert_eq!(text.len(), 3);
                assert_eq!(RfvScore::parse(&text), Some(customer.score));
            }
        }
    }
}

#[test]
fn repeated_runs_are_identical_and_leave_input_untouched() {
    let ledger = synthetic_ledger(2_024, 150);
    let snapshot = ledger.clone();
    let actions = ActionMap::from_pairs([("AAA", "VIP"), ("DDD", "Reactivate")]);
    assert!(actions.is_ok());
    if let Ok(actions) = actions {
        let first = compute_rfv(&ledger, &actions);
        let second = compute_rfv(&ledger, &actions);
        assert!(first.is_ok() && second.is_ok());
        if let (Ok(first), Ok(second)) = (first, second) {
            assert_eq!(first, second);
            assert_eq!(first.score_counts(), second.score_counts());
        }
        assert_eq!(ledger, snapshot);
    }
}

#[test]
fn empty_ledger_is_rejected() {
    let result = compute_rfv(&[], &ActionMap::new());
    assert!(result.is_err());
    if let Err(error) = result {
        assert_eq!(error.code, "empty_dataset");
    }
}
