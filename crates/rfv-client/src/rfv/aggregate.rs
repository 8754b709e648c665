use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::contracts::types::LedgerIssue;
use crate::rfv::types::{CustomerMetrics, Transaction};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub reference_date: NaiveDate,
    /// One entry per distinct customer, ordered by customer id.
    pub customers: Vec<CustomerMetrics>,
}

#[derive(Debug, Clone)]
struct Accumulator {
    last_purchase: NaiveDate,
    frequency: i64,
    value: f64,
}

pub fn aggregate(transactions: &[Transaction]) -> ClientResult<Aggregation> {
    let Some(reference_date) = transactions.iter().map(|txn| txn.purchase_date).max() else {
        return Err(ClientError::empty_dataset());
    };

    let issues = check_transactions(transactions);
    if !issues.is_empty() {
        return Err(ClientError::missing_field(issues));
    }

    let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for transaction in transactions {
        let entry = groups
            .entry(transaction.customer_id.as_str())
            .or_insert_with(|| Accumulator {
                last_purchase: transaction.purchase_date,
                frequency: 0,
                value: 0.0,
            });
        entry.last_purchase = entry.last_purchase.max(transaction.purchase_date);
        entry.frequency += 1;
        entry.value += transaction.amount;
    }

    let customers = groups
        .into_iter()
        .map(|(customer_id, group)| CustomerMetrics {
            customer_id: customer_id.to_string(),
            last_purchase: group.last_purchase,
            recency: (reference_date - group.last_purchase).num_days(),
            frequency: group.frequency,
            value: group.value,
        })
        .collect::<Vec<CustomerMetrics>>();

    tracing::debug!(
        transactions = transactions.len(),
        customers = customers.len(),
        %reference_date,
        "rfv.aggregate"
    );

    Ok(Aggregation {
        reference_date,
        customers,
    })
}

// Typed transactions can still carry values the ledger loader would have
// rejected when they are built directly by a caller.
fn check_transactions(transactions: &[Transaction]) -> Vec<LedgerIssue> {
    let mut issues = Vec::new();
    for (index, transaction) in transactions.iter().enumerate() {
        let row = (index as i64) + 1;
        if transaction.customer_id.trim().is_empty() {
            issues.push(LedgerIssue {
                row,
                field: "customer_id".to_string(),
                code: "missing_required_field".to_string(),
                description: "customer_id must be present and non-empty.".to_string(),
                expected: Some("non-empty string".to_string()),
                received: Some(transaction.customer_id.clone()),
            });
        }
        if !transaction.amount.is_finite() || transaction.amount < 0.0 {
            issues.push(LedgerIssue {
                row,
                field: "amount".to_string(),
                code: "invalid_number".to_string(),
                description: format!(
                    "amount must be a finite, non-negative number; got {}",
                    transaction.amount
                ),
                expected: Some("number >= 0".to_string()),
                received: Some(transaction.amount.to_string()),
            });
        }
    }
    issues
}
