//! Locale-aware value coercion
//!
//! Revenue and expense values are coerced with different rules:
//!
//! - revenue strips the `.` thousands separator, then turns the decimal `,`
//!   into `.`; failures are logged.
//! - expense only turns `,` into `.`; failures are silent. A value such as
//!   `1.234,56` therefore does not parse on the expense side.
//!
//! In both cases an unparseable value becomes `None` and is left out of
//! every sum.

use crate::types::{CellValue, SourceKind};

/// Parse a revenue token such as `1.234,56`
pub fn parse_revenue_value(token: &str) -> Option<f64> {
    let normalized = token.trim().replace('.', "").replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            log::warn!(target: "campaignweb::parser", "Erro ao converter o valor: {}", normalized);
            None
        }
    }
}

/// Parse an expense token such as `1234,56`
pub fn parse_expense_value(token: &str) -> Option<f64> {
    let normalized = token.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            log::trace!(target: "campaignweb::parser", "expense value coerced to missing: {:?}", token);
            None
        }
    }
}

/// Coerce a raw cell with the rule of its source
pub fn coerce_value(kind: SourceKind, cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Number(_) | CellValue::Empty => None,
        CellValue::Text(text) => match kind {
            SourceKind::Revenue => parse_revenue_value(text),
            SourceKind::Expense => parse_expense_value(text),
        },
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::{Mutex, Once};
    use std::thread::{self, ThreadId};

    /// Keeps every record so tests can check what an operator would see
    struct CaptureLogger {
        records: Mutex<Vec<(ThreadId, Level, String)>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if let Ok(mut records) = self.records.lock() {
                records.push((thread::current().id(), record.level(), record.target().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger {
        records: Mutex::new(Vec::new()),
    };

    /// Level and target of every record `f` logs on the current thread
    fn logged_by(f: impl FnOnce()) -> Vec<(Level, String)> {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = log::set_logger(&LOGGER);
            log::set_max_level(LevelFilter::Trace);
        });

        let id = thread::current().id();
        LOGGER.records.lock().unwrap().retain(|(t, _, _)| *t != id);
        f();
        LOGGER
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _, _)| *t == id)
            .map(|(_, level, target)| (*level, target.clone()))
            .collect()
    }

    #[test]
    fn test_parse_revenue_value() {
        assert_eq!(parse_revenue_value("1.234,56"), Some(1234.56));
        assert_eq!(parse_revenue_value("600.822.115,84"), Some(600822115.84));
        assert_eq!(parse_revenue_value("250"), Some(250.0));
        assert_eq!(parse_revenue_value(" 10,5 "), Some(10.5));
    }

    #[test]
    fn test_parse_revenue_value_invalid() {
        assert_eq!(parse_revenue_value("abc"), None);
        assert_eq!(parse_revenue_value(""), None);
        assert_eq!(parse_revenue_value("nan"), None);
    }

    #[test]
    fn test_parse_expense_value() {
        assert_eq!(parse_expense_value("1234,56"), Some(1234.56));
        assert_eq!(parse_expense_value("800"), Some(800.0));
        assert_eq!(parse_expense_value("n/a"), None);
    }

    #[test]
    fn test_expense_keeps_thousands_dot() {
        // "1.234.56" is not a number
        assert_eq!(parse_expense_value("1.234,56"), None);
        assert_eq!(parse_revenue_value("1.234,56"), Some(1234.56));
    }

    #[test]
    fn test_revenue_failure_is_reported() {
        let records = logged_by(|| {
            assert_eq!(parse_revenue_value("abc"), None);
        });
        assert_eq!(records, vec![(Level::Warn, "campaignweb::parser".to_string())]);

        let records = logged_by(|| {
            assert_eq!(parse_revenue_value("1.234,56"), Some(1234.56));
        });
        assert!(records.is_empty());
    }

    #[test]
    fn test_expense_failure_is_silent() {
        let records = logged_by(|| {
            assert_eq!(parse_expense_value("abc"), None);
            assert_eq!(parse_expense_value("1.234,56"), None);
        });
        // trace output is allowed, nothing an operator would see by default
        assert!(records.iter().all(|(level, _)| *level > Level::Info));
    }

    #[test]
    fn test_coerce_value() {
        assert_eq!(coerce_value(SourceKind::Revenue, &CellValue::Number(42.5)), Some(42.5));
        assert_eq!(coerce_value(SourceKind::Expense, &CellValue::Empty), None);
        assert_eq!(
            coerce_value(SourceKind::Revenue, &CellValue::Text("2.000,00".to_string())),
            Some(2000.0)
        );
        assert_eq!(
            coerce_value(SourceKind::Expense, &CellValue::Text("2.000,00".to_string())),
            None
        );
    }
}
