#![cfg(not(tarpaulin_include))]

use crate::data::{Analytics, Table, Value};
#[cfg(feature = "web")]
use crate::error::{DashboardError, DashboardResult};

/// Quotes a CSV field if it contains a comma, quote or newline
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Convert a table to CSV format
///
/// The first line holds the column names; each following line is one row,
/// i.e. the values found at the same index of every column.
///
/// # Examples
/// ```
/// use zest_dashboard::data::Analytics;
/// use zest_dashboard::export::to_csv;
///
/// let analytics = Analytics::new();
/// let csv = to_csv(&analytics.funding_data);
/// assert!(csv.starts_with("round,amount,year,valuation\n"));
/// ```
pub fn to_csv(table: &dyn Table) -> String {
    let columns = table.columns();
    let mut csv_content = String::new();

    let header: Vec<String> = columns.iter().map(|c| csv_field(c.name)).collect();
    csv_content.push_str(&header.join(","));
    csv_content.push('\n');

    for row in 0..table.row_count() {
        let fields: Vec<String> = columns
            .iter()
            .map(|c| {
                c.values
                    .get(row)
                    .map(|v| csv_field(&v.to_string()))
                    .unwrap_or_default()
            })
            .collect();
        csv_content.push_str(&fields.join(","));
        csv_content.push('\n');
    }

    csv_content
}

/// Convert every table to an XLSX workbook, one worksheet per table
///
/// Worksheets are named after the tables; text cells stay text and numeric
/// cells are written as numbers.
#[cfg(feature = "web")]
pub fn to_xlsx(analytics: &Analytics) -> DashboardResult<Vec<u8>> {
    use rust_xlsxwriter::{Workbook, Worksheet};

    let xlsx_error = |e: rust_xlsxwriter::XlsxError| DashboardError::Export(e.to_string());
    let mut workbook = Workbook::new();

    for table in analytics.tables() {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(table.name()).map_err(xlsx_error)?;

        for (col, column) in table.columns().iter().enumerate() {
            let col = col as u16;
            worksheet
                .write_string(0, col, column.name)
                .map_err(xlsx_error)?;

            for (row, value) in column.values.iter().enumerate() {
                let row = row as u32 + 1;
                match value {
                    Value::Int(v) => worksheet.write_number(row, col, *v as f64),
                    Value::Number(v) => worksheet.write_number(row, col, *v),
                    Value::Text(v) => worksheet.write_string(row, col, *v),
                }
                .map_err(xlsx_error)?;
            }
        }

        workbook.push_worksheet(worksheet);
    }

    workbook.save_to_buffer().map_err(xlsx_error)
}

/// Every table as CSV, keyed by table name
pub fn all_csv(analytics: &Analytics) -> Vec<(&'static str, String)> {
    analytics
        .tables()
        .into_iter()
        .map(|t| (t.name(), to_csv(t)))
        .collect()
}
