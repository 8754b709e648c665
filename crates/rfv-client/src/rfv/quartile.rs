use crate::rfv::types::{CustomerMetrics, Grade, Metric, Polarity};
use crate::{ClientError, ClientResult};

const GRADES_LOWER_IS_BETTER: [Grade; 4] = [Grade::A, Grade::B, Grade::C, Grade::D];
const GRADES_HIGHER_IS_BETTER: [Grade; 4] = [Grade::D, Grade::C, Grade::B, Grade::A];

/// 25th/50th/75th percentile of one metric across every customer in a ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuartileBoundaries {
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
}

impl QuartileBoundaries {
    /// Percentiles use linear interpolation between the closest ranks, so two
    /// values `{1, 2}` yield `1.25 / 1.5 / 1.75`. Returns `None` for no values.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|left, right| left.total_cmp(right));
        Some(Self {
            p25: quantile(&sorted, 0.25),
            p50: quantile(&sorted, 0.50),
            p75: quantile(&sorted, 0.75),
        })
    }

    /// Assigns a grade with inclusive thresholds checked in ascending order, so
    /// a value sitting exactly on a boundary lands in the lower bucket.
    pub fn classify(&self, value: f64, polarity: Polarity) -> Grade {
        let bucket = self.bucket(value);
        match polarity {
            Polarity::LowerIsBetter => GRADES_LOWER_IS_BETTER[bucket],
            Polarity::HigherIsBetter => GRADES_HIGHER_IS_BETTER[bucket],
        }
    }

    fn bucket(&self, value: f64) -> usize {
        if value <= self.p25 {
            0
        } else if value <= self.p50 {
            1
        } else if value <= self.p75 {
            2
        } else {
            3
        }
    }
}

/// Boundaries for all three metrics, computed once per ledger and shared by
/// every customer's classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBoundaries {
    pub recency: QuartileBoundaries,
    pub frequency: QuartileBoundaries,
    pub value: QuartileBoundaries,
}

impl MetricBoundaries {
    pub fn compute(customers: &[CustomerMetrics]) -> ClientResult<Self> {
        let boundaries_for = |metric: Metric| {
            let values = customers
                .iter()
                .map(|customer| customer.metric_value(metric))
                .collect::<Vec<f64>>();
            QuartileBoundaries::from_values(&values).ok_or_else(ClientError::empty_dataset)
        };

        let boundaries = Self {
            recency: boundaries_for(Metric::Recency)?,
            frequency: boundaries_for(Metric::Frequency)?,
            value: boundaries_for(Metric::Value)?,
        };

        for metric in Metric::ALL {
            let current = boundaries.for_metric(metric);
            tracing::debug!(
                metric = metric.as_str(),
                p25 = current.p25,
                p50 = current.p50,
                p75 = current.p75,
                "rfv.quartiles"
            );
        }

        Ok(boundaries)
    }

    pub fn for_metric(&self, metric: Metric) -> QuartileBoundaries {
        match metric {
            Metric::Recency => self.recency,
            Metric::Frequency => self.frequency,
            Metric::Value => self.value,
        }
    }

    pub fn for_metric_name(&self, name: &str) -> ClientResult<(Metric, QuartileBoundaries)> {
        let metric = Metric::from_name(name)?;
        Ok((metric, self.for_metric(metric)))
    }

    pub fn grade(&self, customer: &CustomerMetrics, metric: Metric) -> Grade {
        self.for_metric(metric)
            .classify(customer.metric_value(metric), metric.polarity())
    }

    pub fn classify_by_name(&self, name: &str, value: f64) -> ClientResult<Grade> {
        let (metric, boundaries) = self.for_metric_name(name)?;
        Ok(boundaries.classify(value, metric.polarity()))
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let last = sorted.len() - 1;
    let position = (last as f64) * q;
    let lower = position.floor() as usize;
    let upper = (lower + 1).min(last);
    let fraction = position - (lower as f64);
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
