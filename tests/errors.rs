use std::fmt;

use zest_dashboard::DashboardError;
use zest_dashboard::error::failure_report;

#[derive(Debug)]
struct Wrapped(std::io::Error);

impl fmt::Display for Wrapped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("could not start the dashboard")
    }
}

impl std::error::Error for Wrapped {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[test]
fn failure_report_lists_causes_and_stack_trace() {
    let err = Wrapped(std::io::Error::new(
        std::io::ErrorKind::AddrInUse,
        "address already in use",
    ));
    let report = failure_report(&err);

    assert!(report.starts_with("could not start the dashboard"));
    assert!(report.contains("\n  caused by: address already in use"));
    assert!(report.contains("\nstack trace:\n"));
}

#[test]
fn failure_report_for_config_errors() {
    let err = DashboardError::Config("PORT must be a port number".to_string());
    let report = failure_report(&err);
    assert!(report.starts_with("configuration error: PORT must be a port number"));
    assert!(!report.contains("caused by"));
}
