//! Distributor profit and ROI calculator

use serde::{Deserialize, Serialize};

use crate::error::CalculatorError;

/// Days per month used for monthly income
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Days per year used for yearly income
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Calculator inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInput {
    /// Price of one machine (₹)
    pub machine_cost: f64,

    /// Number of machines
    pub machines: f64,

    /// Cleaning price per helmet (₹)
    pub cleaning_price: f64,

    /// Cleans per day, per machine
    pub cleans_per_day: f64,
}

/// Projected returns
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    pub daily: f64,
    pub monthly: f64,
    pub yearly: f64,
    pub total_cost: f64,

    /// `None` when daily income is zero and the investment never pays back
    pub days_to_roi: Option<u64>,
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64, CalculatorError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CalculatorError::MissingField { field });
    }

    let value: f64 = trimmed
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| CalculatorError::NotANumber {
            field,
            value: trimmed.to_string(),
        })?;

    if value < 0.0 {
        return Err(CalculatorError::Negative { field });
    }

    if value.fract() != 0.0 {
        return Err(CalculatorError::NotAWholeNumber { field });
    }

    Ok(value)
}

impl RoiInput {
    /// Parse the four form fields; all are required whole numbers
    pub fn parse(
        machine_cost: &str,
        machines: &str,
        cleaning_price: &str,
        cleans_per_day: &str,
    ) -> Result<Self, CalculatorError> {
        Ok(Self {
            machine_cost: parse_field("machine cost", machine_cost)?,
            machines: parse_field("number of machines", machines)?,
            cleaning_price: parse_field("cleaning price", cleaning_price)?,
            cleans_per_day: parse_field("cleans per day", cleans_per_day)?,
        })
    }

    pub fn calculate(&self) -> RoiResult {
        let daily = self.machines * self.cleaning_price * self.cleans_per_day;
        let total_cost = self.machines * self.machine_cost;

        let days_to_roi = if daily > 0.0 {
            Some((total_cost / daily).ceil() as u64)
        } else {
            None
        };

        tracing::debug!(daily, total_cost, ?days_to_roi, "calculated ROI");

        RoiResult {
            daily,
            monthly: daily * DAYS_PER_MONTH,
            yearly: daily * DAYS_PER_YEAR,
            total_cost,
            days_to_roi,
        }
    }
}

impl RoiResult {
    /// Days to ROI for display; the infinity sign when it never pays back
    pub fn days_to_roi_display(&self) -> String {
        match self.days_to_roi {
            Some(days) => group_indian(&days.to_string()),
            None => "∞".to_string(),
        }
    }
}

/// Format rupees with Indian digit grouping and no fractional part
///
/// `1234567.4` becomes `₹12,34,567`.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("₹{sign}{}", group_indian(&digits))
}

/// Group a digit string as lakh/crore: last three digits, then pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod calculator_tests {
    use super::*;

    #[test]
    fn test_example_projection() {
        let input = RoiInput::parse("50000", "5", "50", "20").unwrap();
        let result = input.calculate();

        assert_eq!(result.daily, 5000.0);
        assert_eq!(result.monthly, 150_000.0);
        assert_eq!(result.yearly, 1_825_000.0);
        assert_eq!(result.total_cost, 250_000.0);
        assert_eq!(result.days_to_roi, Some(50));
    }

    #[test]
    fn test_days_round_up() {
        let input = RoiInput::parse("1000", "1", "30", "1").unwrap();
        assert_eq!(input.calculate().days_to_roi, Some(34));
    }

    #[test]
    fn test_zero_income_never_pays_back() {
        let input = RoiInput::parse("50000", "2", "0", "20").unwrap();
        let result = input.calculate();
        assert_eq!(result.days_to_roi, None);
        assert_eq!(result.days_to_roi_display(), "∞");
    }

    #[test]
    fn test_all_fields_required() {
        assert_eq!(
            RoiInput::parse("50000", "", "50", "20"),
            Err(CalculatorError::MissingField {
                field: "number of machines"
            })
        );
    }

    #[test]
    fn test_rejects_bad_numbers() {
        assert!(matches!(
            RoiInput::parse("fifty", "1", "1", "1"),
            Err(CalculatorError::NotANumber { .. })
        ));
        assert!(matches!(
            RoiInput::parse("100", "1", "-5", "1"),
            Err(CalculatorError::Negative {
                field: "cleaning price"
            })
        ));
        assert!(RoiInput::parse("inf", "1", "1", "1").is_err());
    }

    #[test]
    fn test_rejects_fractions() {
        assert_eq!(
            RoiInput::parse("50000", "2.5", "50", "20"),
            Err(CalculatorError::NotAWholeNumber {
                field: "number of machines"
            })
        );
        assert!(RoiInput::parse("50000.0", "2", "1e2", "20").is_ok());
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(0.0), "₹0");
        assert_eq!(format_inr(999.0), "₹999");
        assert_eq!(format_inr(5000.0), "₹5,000");
        assert_eq!(format_inr(150_000.0), "₹1,50,000");
        assert_eq!(format_inr(1_825_000.0), "₹18,25,000");
        assert_eq!(format_inr(123_456_789.4), "₹12,34,56,789");
        assert_eq!(format_inr(1234.6), "₹1,235");
    }

    #[test]
    fn test_days_display_grouping() {
        let result = RoiResult {
            daily: 1.0,
            monthly: 30.0,
            yearly: 365.0,
            total_cost: 123_456.0,
            days_to_roi: Some(123_456),
        };
        assert_eq!(result.days_to_roi_display(), "1,23,456");
    }
}
