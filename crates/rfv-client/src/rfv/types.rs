use chrono::NaiveDate;

use crate::{ClientError, ClientResult};

/// One purchase from the ledger. Several transactions may share a customer
/// and/or a purchase date.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub customer_id: String,
    pub purchase_date: NaiveDate,
    pub purchase_code: String,
    pub amount: f64,
}

/// Per-customer reduction of the ledger.
///
/// `recency` is measured in days from the customer's last purchase to the most
/// recent purchase date found anywhere in the ledger, not to "today".
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerMetrics {
    pub customer_id: String,
    pub last_purchase: NaiveDate,
    pub recency: i64,
    pub frequency: i64,
    pub value: f64,
}

impl CustomerMetrics {
    pub fn metric_value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Recency => self.recency as f64,
            Metric::Frequency => self.frequency as f64,
            Metric::Value => self.value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Recency,
    Frequency,
    Value,
}

impl Metric {
    /// Fixed composition order of a score: recency, frequency, value.
    pub const ALL: [Metric; 3] = [Self::Recency, Self::Frequency, Self::Value];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recency => "recency",
            Self::Frequency => "frequency",
            Self::Value => "value",
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Recency => Polarity::LowerIsBetter,
            Self::Frequency | Self::Value => Polarity::HigherIsBetter,
        }
    }

    pub fn supported_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|metric| metric.as_str()).collect()
    }

    /// Resolves a metric by name. Matching ignores case and surrounding
    /// whitespace; anything else fails with `invalid_metric`.
    pub fn from_name(name: &str) -> ClientResult<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == normalized)
            .ok_or_else(|| ClientError::invalid_metric(name, &Self::supported_names()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    LowerIsBetter,
    HigherIsBetter,
}

impl Polarity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LowerIsBetter => "lower_is_better",
            Self::HigherIsBetter => "higher_is_better",
        }
    }
}

/// Quartile letter grade. `A` is always the best bucket for the metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    pub fn from_char(value: char) -> Option<Self> {
        match value {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Grade, Metric, Polarity};

    #[test]
    fn metric_names_resolve_case_insensitively() {
        let parsed = Metric::from_name(" Frequency ");
        assert!(parsed.is_ok());
        if let Ok(metric) = parsed {
            assert_eq!(metric, Metric::Frequency);
        }
    }

    #[test]
    fn unknown_metric_name_is_rejected() {
        let parsed = Metric::from_name("monetary");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_metric");
        }
    }

    #[test]
    fn only_recency_prefers_lower_values() {
        assert_eq!(Metric::Recency.polarity(), Polarity::LowerIsBetter);
        assert_eq!(Metric::Frequency.polarity(), Polarity::HigherIsBetter);
        assert_eq!(Metric::Value.polarity(), Polarity::HigherIsBetter);
    }

    #[test]
    fn grades_order_alphabetically() {
        assert!(Grade::A < Grade::B && Grade::B < Grade::C && Grade::C < Grade::D);
        assert_eq!(Grade::from_char('C'), Some(Grade::C));
        assert_eq!(Grade::from_char('E'), None);
    }
}
