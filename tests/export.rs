use zest_dashboard::data::{Analytics, Table};
use zest_dashboard::export;

#[test]
fn financial_csv_has_header_and_one_line_per_year() {
    let analytics = Analytics::new();
    let csv = export::to_csv(&analytics.financial_data);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), 8);
    assert_eq!(
        lines[0],
        "year,revenue_cr,loss_cr,expenses_cr,growth_rate,burn_multiple,gross_margin,\
         marketing_expenses,employee_costs,bad_debt_provisions"
    );
    assert!(lines[1].starts_with("2018,8.2,15.2,"));
    assert!(lines[7].starts_with("2024,320,485,805,"));
}

#[test]
fn text_columns_are_written_as_is() {
    let analytics = Analytics::new();
    let csv = export::to_csv(&analytics.funding_data);
    assert!(csv.contains("\nSeries A,22,2017,85\n"));
}

#[test]
fn every_table_exports() {
    let analytics = Analytics::new();
    let all = export::all_csv(&analytics);
    assert_eq!(all.len(), 7);
    for (name, csv) in all {
        let table = analytics.table(name).unwrap();
        assert_eq!(csv.lines().count(), table.row_count() + 1, "{}", name);
    }
}

#[cfg(feature = "web")]
#[test]
fn workbook_is_a_zip_archive() {
    let bytes = export::to_xlsx(&Analytics::new()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
