use zest_dashboard::data::{Analytics, Table};

#[test]
fn every_table_has_equal_length_columns() {
    let analytics = Analytics::new();
    for table in analytics.tables() {
        let columns = table.columns();
        let expected = columns[0].len();
        for column in &columns {
            assert_eq!(
                column.len(),
                expected,
                "{}.{} has the wrong length",
                table.name(),
                column.name
            );
        }
    }
    assert!(analytics.validate().is_ok());
}

#[test]
fn table_shapes_match_the_dataset() {
    let analytics = Analytics::new();
    let shapes: Vec<(&str, usize, usize)> = analytics
        .tables()
        .iter()
        .map(|t| (t.name(), t.row_count(), t.columns().len()))
        .collect();

    assert_eq!(
        shapes,
        vec![
            ("financial", 7, 10),
            ("operational", 7, 9),
            ("opportunities", 6, 7),
            ("funding", 6, 4),
            ("market", 6, 4),
            ("customer", 6, 7),
            ("risk", 6, 4),
        ]
    );
}

#[test]
fn table_lookup_by_name() {
    let analytics = Analytics::new();
    assert_eq!(analytics.table("risk").map(|t| t.row_count()), Some(6));
    assert!(analytics.table("nope").is_none());
}

#[test]
fn inconsistent_table_is_reported_with_its_column() {
    let mut analytics = Analytics::new();
    analytics.funding_data.valuation.pop();

    let err = analytics.validate().unwrap_err().to_string();
    assert!(err.contains("funding"), "{}", err);
    assert!(err.contains("valuation"), "{}", err);
}

#[test]
fn literal_values_are_preserved() {
    let analytics = Analytics::new();
    let fin = &analytics.financial_data;
    assert_eq!(fin.year, vec![2018, 2019, 2020, 2021, 2022, 2023, 2024]);
    assert_eq!(fin.revenue_cr.last(), Some(&320.0));
    assert_eq!(analytics.operational_data.merchants.last(), Some(&12000));
    assert_eq!(analytics.funding_data.round[5], "Emergency");
    assert_eq!(analytics.customer_data.segment[4], "Tech Workers");
}
