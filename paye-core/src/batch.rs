//! Per-record evaluation for payroll runs covering many employees.
//!
//! Each record is computed on its own; a rejected record never affects the
//! others.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calculations::PayeCalculator;
use crate::{CalculationResult, TaxConfig, UserInput};

/// Outcome for one record of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchOutcome {
    Computed(CalculationResult),
    Rejected(String),
}

impl BatchOutcome {
    pub fn result(&self) -> Option<&CalculationResult> {
        match self {
            Self::Computed(result) => Some(result),
            Self::Rejected(_) => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Computes every record against the same config.
///
/// Records with a negative basic salary are rejected; everything else is
/// computed. Outcomes are returned in record order.
pub fn compute_batch(
    records: &[UserInput],
    config: &TaxConfig,
) -> Vec<BatchOutcome> {
    let calculator = PayeCalculator::new(config);

    let outcomes: Vec<BatchOutcome> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            if record.basic_salary < Decimal::ZERO {
                warn!(row = idx + 1, employee = %record.employee_name, "rejected negative basic salary");
                BatchOutcome::Rejected("Invalid salary amount".to_string())
            } else {
                BatchOutcome::Computed(calculator.calculate(record))
            }
        })
        .collect();

    info!(records = outcomes.len(), "batch computed");
    outcomes
}

/// Totals across a batch, as shown on a payroll dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
    pub total_monthly_paye: Decimal,
    pub total_monthly_net_pay: Decimal,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        let results: Vec<&CalculationResult> =
            outcomes.iter().filter_map(BatchOutcome::result).collect();

        Self {
            processed: outcomes.len(),
            failed: outcomes.len() - results.len(),
            total_monthly_paye: results
                .iter()
                .map(|r| r.monthly_paye)
                .fold(Decimal::ZERO, Decimal::saturating_add),
            total_monthly_net_pay: results
                .iter()
                .map(|r| r.monthly_net_pay)
                .fold(Decimal::ZERO, Decimal::saturating_add),
        }
    }

    /// Percentage of records computed successfully, or `None` for an empty batch.
    pub fn success_percent(&self) -> Option<Decimal> {
        if self.processed == 0 {
            return None;
        }
        let succeeded = Decimal::from(self.processed - self.failed);
        Some(succeeded * Decimal::ONE_HUNDRED / Decimal::from(self.processed))
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    /// Shared buffer the test subscriber writes formatted events into.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            let bytes = self.0.lock().expect("log buffer").clone();
            String::from_utf8(bytes).expect("utf-8 log output")
        }
    }

    impl io::Write for CapturedLogs {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().expect("log buffer").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Initializes tracing subscriber for tests that verify log output.
    fn init_test_tracing(logs: &CapturedLogs) -> tracing::subscriber::DefaultGuard {
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn employees(config: &TaxConfig) -> Vec<UserInput> {
        vec![
            UserInput::bulk_employee(
                "John Doe",
                dec!(250000),
                dec!(50000),
                dec!(30000),
                dec!(1200000),
                config,
            ),
            UserInput::bulk_employee(
                "Jane Smith",
                dec!(450000),
                dec!(100000),
                dec!(50000),
                dec!(2000000),
                config,
            ),
            UserInput::bulk_employee(
                "Alkali Musa",
                dec!(180000),
                dec!(30000),
                dec!(20000),
                dec!(0),
                config,
            ),
        ]
    }

    #[test]
    fn every_record_is_computed_in_order() {
        let config = TaxConfig::default();
        let records = employees(&config);

        let outcomes = compute_batch(&records, &config);

        assert_eq!(outcomes.len(), 3);
        for (record, outcome) in records.iter().zip(&outcomes) {
            let expected = crate::compute(record, &config);
            assert_eq!(outcome.result(), Some(&expected));
        }
    }

    #[test]
    fn negative_salary_is_rejected_without_affecting_others() {
        let logs = CapturedLogs::default();
        let _guard = init_test_tracing(&logs);
        let config = TaxConfig::default();
        let mut records = employees(&config);
        records[1].basic_salary = dec!(-1);

        let outcomes = compute_batch(&records, &config);
        let output = logs.contents();

        assert!(output.contains("WARN"));
        assert!(output.contains("rejected negative basic salary"));
        assert!(output.contains("row=2"));
        assert!(output.contains("employee=Jane Smith"));
        assert!(!output.contains("batch computed"));

        assert!(!outcomes[0].is_rejected());
        assert_eq!(
            outcomes[1],
            BatchOutcome::Rejected("Invalid salary amount".to_string())
        );
        assert_eq!(
            outcomes[2].result(),
            Some(&crate::compute(&records[2], &config))
        );
    }

    #[test]
    fn record_without_rent_gets_no_relief() {
        let config = TaxConfig::default();
        let outcomes = compute_batch(&employees(&config), &config);

        let result = outcomes[2].result().expect("computed");

        assert_eq!(result.rent_relief, dec!(0));
        // (180,000 + 30,000 + 20,000) x 12
        assert_eq!(result.gross_annual, dec!(2760000));
    }

    #[test]
    fn summary_totals_computed_records() {
        let config = TaxConfig::default();
        let mut records = employees(&config);
        records[2].basic_salary = dec!(-1);
        let outcomes = compute_batch(&records, &config);

        let summary = BatchSummary::from_outcomes(&outcomes);

        let first = outcomes[0].result().expect("computed");
        let second = outcomes[1].result().expect("computed");
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(
            summary.total_monthly_paye,
            first.monthly_paye + second.monthly_paye
        );
        assert_eq!(
            summary.total_monthly_net_pay,
            first.monthly_net_pay + second.monthly_net_pay
        );
    }

    #[test]
    fn success_percent_of_empty_batch_is_none() {
        let summary = BatchSummary::from_outcomes(&[]);

        assert_eq!(summary.success_percent(), None);
        assert_eq!(summary.total_monthly_paye, dec!(0));
    }

    #[test]
    fn success_percent_counts_failures() {
        let outcomes = vec![
            BatchOutcome::Rejected("Invalid salary amount".to_string()),
            BatchOutcome::Rejected("Invalid salary amount".to_string()),
            BatchOutcome::Computed(crate::compute(&UserInput::default(), &TaxConfig::default())),
            BatchOutcome::Computed(crate::compute(&UserInput::default(), &TaxConfig::default())),
        ];

        let summary = BatchSummary::from_outcomes(&outcomes);

        assert_eq!(summary.success_percent(), Some(dec!(50)));
    }
}
