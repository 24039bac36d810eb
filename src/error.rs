#[cfg(feature = "web")]
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors produced while building, rendering or serving the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A table has columns of different lengths
    #[error("table `{table}`: column `{column}` has {found} rows, expected {expected}")]
    InconsistentTable {
        table: &'static str,
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("unknown chart: {0}")]
    UnknownChart(String),

    #[error("unknown table: {0}")]
    UnknownTable(String),

    #[error("invalid render options: {0}")]
    InvalidOptions(String),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

/// Describes a fatal error: its message, every `source()` cause and a stack
/// trace captured at the reporting site
pub fn failure_report(err: &dyn std::error::Error) -> String {
    let mut report = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        report.push_str("\n  caused by: ");
        report.push_str(&cause.to_string());
        source = cause.source();
    }
    report.push_str("\nstack trace:\n");
    report.push_str(&std::backtrace::Backtrace::force_capture().to_string());
    report
}

#[cfg(feature = "web")]
impl DashboardError {
    fn status(&self) -> StatusCode {
        match self {
            DashboardError::UnknownChart(_) | DashboardError::UnknownTable(_) => {
                StatusCode::NOT_FOUND
            }
            DashboardError::InvalidOptions(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(feature = "web")]
impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let body = Json(serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
