//! Recency/frequency/value segmentation.
//!
//! A ledger of purchases is reduced to one row per customer, each metric is
//! split into quartiles across all customers, and the three resulting grades
//! are joined into a score that may map to a marketing action.

pub mod aggregate;
pub mod quartile;
pub mod score;
pub mod types;

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::ClientResult;
use crate::rfv::aggregate::aggregate;
use crate::rfv::quartile::MetricBoundaries;
use crate::rfv::score::{ActionMap, RfvScore};
use crate::rfv::types::{CustomerMetrics, Transaction};

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCustomer {
    pub metrics: CustomerMetrics,
    pub score: RfvScore,
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    pub reference_date: NaiveDate,
    pub boundaries: MetricBoundaries,
    /// Ordered by customer id.
    pub customers: Vec<ClassifiedCustomer>,
}

impl Segmentation {
    pub fn total_value(&self) -> f64 {
        self.customers
            .iter()
            .map(|customer| customer.metrics.value)
            .sum()
    }

    /// Customers per score, largest group first; equal counts fall back to
    /// score order.
    pub fn score_counts(&self) -> Vec<(RfvScore, usize)> {
        let mut counts: BTreeMap<RfvScore, usize> = BTreeMap::new();
        for customer in &self.customers {
            *counts.entry(customer.score).or_default() += 1;
        }
        let mut ordered = counts.into_iter().collect::<Vec<(RfvScore, usize)>>();
        ordered.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));
        ordered
    }
}

/// Runs the full segmentation for one ledger snapshot.
pub fn compute_rfv(
    transactions: &[Transaction],
    actions: &ActionMap,
) -> ClientResult<Segmentation> {
    let aggregation = aggregate(transactions)?;
    let boundaries = MetricBoundaries::compute(&aggregation.customers)?;

    let customers = aggregation
        .customers
        .into_iter()
        .map(|metrics| {
            let score = RfvScore::compose(&metrics, &boundaries);
            let action = actions.lookup(&score).map(str::to_string);
            ClassifiedCustomer {
                metrics,
                score,
                action,
            }
        })
        .collect::<Vec<ClassifiedCustomer>>();

    let mapped = customers
        .iter()
        .filter(|customer| customer.action.is_some())
        .count();
    tracing::debug!(
        customers = customers.len(),
        mapped,
        unmapped = customers.len() - mapped,
        "rfv.classified"
    );

    Ok(Segmentation {
        reference_date: aggregation.reference_date,
        boundaries,
        customers,
    })
}
