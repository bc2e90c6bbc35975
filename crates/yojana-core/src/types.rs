use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::YojanaError;
use crate::YojanaResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.06 = 6%). Never as percentages.
pub type Rate = Decimal;

/// Year fractions or counts
pub type Years = Decimal;

/// Which cash flow the return metrics are measured on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnBasis {
    /// Net of EMI, before inflation adjustment
    Nominal,
    /// Nominal deflated by the cumulative inflation factor
    #[default]
    Real,
}

impl ReturnBasis {
    pub fn from_realized(realized: bool) -> Self {
        if realized {
            ReturnBasis::Real
        } else {
            ReturnBasis::Nominal
        }
    }
}

/// A single value in a yearly schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearValue {
    /// 1-based year of the scheme
    pub year: u32,
    pub value: Decimal,
}

/// A yearly schedule: one value per year, years contiguous from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlowSeries {
    pub label: String,
    pub points: Vec<YearValue>,
}

impl CashFlowSeries {
    /// Build a series from consecutive values, numbering years from 1.
    pub fn from_values(label: &str, values: Vec<Decimal>) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| YearValue {
                year: i as u32 + 1,
                value,
            })
            .collect();
        CashFlowSeries {
            label: label.to_string(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<Decimal> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn years(&self) -> Vec<u32> {
        self.points.iter().map(|p| p.year).collect()
    }

    /// Value for a 1-based year, if present.
    pub fn value_at(&self, year: u32) -> Option<Decimal> {
        self.points.iter().find(|p| p.year == year).map(|p| p.value)
    }

    /// Sum of all yearly values.
    pub fn total(&self) -> Decimal {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Check the series covers exactly `horizon` contiguous years from 1.
    pub fn ensure_horizon(&self, horizon: u32, context: &str) -> YojanaResult<()> {
        if self.points.len() != horizon as usize {
            return Err(YojanaError::ShapeMismatch {
                context: format!("{context} ({})", self.label),
                expected: horizon as usize,
                actual: self.points.len(),
            });
        }
        for (i, p) in self.points.iter().enumerate() {
            if p.year != i as u32 + 1 {
                return Err(YojanaError::YearIndexMismatch {
                    context: format!("{context} ({})", self.label),
                    position: i + 1,
                    expected: i as u32 + 1,
                    found: p.year,
                });
            }
        }
        Ok(())
    }

    /// Check both series share identical year indices.
    pub fn ensure_aligned(&self, other: &CashFlowSeries, context: &str) -> YojanaResult<()> {
        if self.points.len() != other.points.len() {
            return Err(YojanaError::ShapeMismatch {
                context: format!("{context} ({} vs {})", self.label, other.label),
                expected: self.points.len(),
                actual: other.points.len(),
            });
        }
        let gap = self
            .points
            .iter()
            .zip(&other.points)
            .enumerate()
            .find(|(_, (a, b))| a.year != b.year);
        if let Some((i, (a, b))) = gap {
            return Err(YojanaError::YearIndexMismatch {
                context: format!("{context} ({} vs {})", self.label, other.label),
                position: i + 1,
                expected: a.year,
                found: b.year,
            });
        }
        Ok(())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_values_numbers_years_from_one() {
        let s = CashFlowSeries::from_values("x", vec![dec!(1), dec!(2), dec!(3)]);
        assert_eq!(s.years(), vec![1, 2, 3]);
        assert_eq!(s.total(), dec!(6));
        assert_eq!(s.value_at(2), Some(dec!(2)));
        assert_eq!(s.value_at(4), None);
    }

    #[test]
    fn test_ensure_horizon_rejects_short_series() {
        let s = CashFlowSeries::from_values("x", vec![dec!(1); 24]);
        assert!(matches!(
            s.ensure_horizon(25, "test"),
            Err(YojanaError::ShapeMismatch { expected: 25, actual: 24, .. })
        ));
    }

    #[test]
    fn test_ensure_aligned_rejects_gapped_years() {
        let a = CashFlowSeries::from_values("a", vec![dec!(1), dec!(2)]);
        let b = CashFlowSeries {
            label: "b".into(),
            points: vec![
                YearValue { year: 1, value: dec!(1) },
                YearValue { year: 3, value: dec!(2) },
            ],
        };
        match a.ensure_aligned(&b, "test") {
            Err(YojanaError::YearIndexMismatch {
                position,
                expected,
                found,
                ..
            }) => {
                assert_eq!((position, expected, found), (2, 2, 3));
            }
            other => panic!("expected YearIndexMismatch, got {other:?}"),
        }
        assert!(a.ensure_aligned(&a.clone(), "test").is_ok());
    }

    #[test]
    fn test_ensure_horizon_names_the_gap() {
        let s = CashFlowSeries {
            label: "gross".into(),
            points: vec![
                YearValue { year: 1, value: dec!(1) },
                YearValue { year: 2, value: dec!(1) },
                YearValue { year: 4, value: dec!(1) },
            ],
        };
        let err = s.ensure_horizon(3, "projection").unwrap_err();
        assert_eq!(err.kind(), "shape_mismatch");
        assert_eq!(
            err.to_string(),
            "Year index mismatch in projection (gross): position 3 holds year 4, expected year 3"
        );
    }
}
