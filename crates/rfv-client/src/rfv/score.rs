use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::rfv::quartile::MetricBoundaries;
use crate::rfv::types::{CustomerMetrics, Grade, Metric};

/// Recency, frequency and value grades, always composed in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RfvScore {
    pub recency: Grade,
    pub frequency: Grade,
    pub value: Grade,
}

impl RfvScore {
    pub fn compose(customer: &CustomerMetrics, boundaries: &MetricBoundaries) -> Self {
        Self {
            recency: boundaries.grade(customer, Metric::Recency),
            frequency: boundaries.grade(customer, Metric::Frequency),
            value: boundaries.grade(customer, Metric::Value),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let mut chars = value.chars();
        let recency = Grade::from_char(chars.next()?)?;
        let frequency = Grade::from_char(chars.next()?)?;
        let grade_value = Grade::from_char(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Self {
            recency,
            frequency,
            value: grade_value,
        })
    }
}

impl fmt::Display for RfvScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.recency.as_char(),
            self.frequency.as_char(),
            self.value.as_char()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionMapError {
    #[error("`{0}` is not a score; keys must be 3 letters from A-D such as `AAA`")]
    InvalidScore(String),
    #[error("action text for `{0}` is empty")]
    EmptyAction(String),
}

/// Score-to-marketing-action table. Supplied by the caller; scores with no
/// entry simply have no action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionMap {
    entries: BTreeMap<RfvScore, String>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, ActionMapError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut map = Self::new();
        for (score, action) in pairs {
            map.insert(score.as_ref(), action.as_ref())?;
        }
        Ok(map)
    }

    pub fn insert(&mut self, score: &str, action: &str) -> Result<(), ActionMapError> {
        let parsed = RfvScore::parse(score.trim())
            .ok_or_else(|| ActionMapError::InvalidScore(score.to_string()))?;
        let text = action.trim();
        if text.is_empty() {
            return Err(ActionMapError::EmptyAction(score.to_string()));
        }
        self.entries.insert(parsed, text.to_string());
        Ok(())
    }

    pub fn lookup(&self, score: &RfvScore) -> Option<&str> {
        self.entries.get(score).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RfvScore, &str)> {
        self.entries
            .iter()
            .map(|(score, action)| (score, action.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
