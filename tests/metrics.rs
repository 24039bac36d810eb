use zest_dashboard::data::Analytics;
use zest_dashboard::metrics::{self, format};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn engagement_rate_per_year() {
    let rates = Analytics::new().engagement_rate();
    assert_eq!(rates.len(), 7);
    assert!(approx(rates[0], 40.0));
    assert!(approx(rates[6], 40.0));
    assert!(approx(rates[5], 8.5 / 17.0 * 100.0));
}

#[test]
fn npa_multiple_against_industry() {
    let analytics = Analytics::new();
    assert!(approx(analytics.kpis().npa_multiple, 4.8));
    let series = analytics.npa_multiples();
    assert!(approx(series[0], 2.5 / 1.5));
    assert!(approx(*series.last().unwrap(), 4.8));
}

#[test]
fn ltv_cac_ratio_per_segment() {
    let ratios = Analytics::new().ltv_cac_ratio();
    assert_eq!(ratios.len(), 6);
    assert!((ratios[4] - 66.666_666).abs() < 1e-3);
    assert!(approx(ratios[0], 125000.0 / 3500.0));
}

#[test]
fn addressable_market_per_segment() {
    let market = Analytics::new().addressable_market();
    let expected = [21.25, 107.25, 15.3, 8.4, 16.0, 9.8];
    for (got, want) in market.iter().zip(expected) {
        assert!(approx(*got, want), "{} != {}", got, want);
    }
}

#[test]
fn headline_kpis() {
    let kpis = Analytics::new().kpis();
    assert!(approx(kpis.total_losses, 1560.2));
    assert!(approx(kpis.peak_valuation, 435.0));
    assert!(approx(kpis.current_revenue, 320.0));
    assert!(approx(kpis.current_users, 17.0));
    assert!(approx(kpis.revenue_growth, 31.3));
}

#[test]
fn expense_breakdown_sums_to_total() {
    let shares = Analytics::new().expense_breakdown();
    let labels: Vec<&str> = shares.iter().map(|s| s.label).collect();
    assert_eq!(labels, ["Marketing", "Employee Costs", "Bad Debt", "Other"]);

    let amounts: Vec<f64> = shares.iter().map(|s| s.amount).collect();
    assert!(approx(amounts[0], 220.0));
    assert!(approx(amounts[1], 165.0));
    assert!(approx(amounts[2], 195.0));
    assert!(approx(amounts[3], 225.0));
    assert!(approx(amounts.iter().sum::<f64>(), 805.0));
}

#[test]
fn rankings() {
    let analytics = Analytics::new();
    assert_eq!(analytics.top_opportunities(3), vec![0, 3, 2]);
    assert_eq!(analytics.top_segments_by_ltv(3), vec![4, 2, 5]);
    assert_eq!(metrics::rank_descending(&[1.0, 3.0, 3.0, 2.0]), vec![1, 2, 3, 0]);
}

#[test]
fn zero_denominator_yields_zero() {
    assert_eq!(metrics::ratio(5.0, 0.0), 0.0);
    assert_eq!(metrics::engagement_rate(&[1.0, 2.0], &[0.0, 4.0]), vec![0.0, 50.0]);
    assert_eq!(metrics::max(&[]), 0.0);
    assert_eq!(metrics::last(&[]), 0.0);
}

#[test]
fn display_formats() {
    assert_eq!(format::crores(1560.2), "₹1560Cr");
    assert_eq!(format::usd_millions(435.0), "$435M");
    assert_eq!(format::usd_millions(4.7), "$4.7M");
    assert_eq!(format::usd_billions(195.0), "$195B");
    assert_eq!(format::millions(17.0), "17.0M");
    assert_eq!(format::multiple(4.8), "4.8x");
    assert_eq!(format::percent(31.3), "31.3%");
    assert_eq!(format::lakhs(320000.0), "₹3.2L");
    assert_eq!(format::thousands(50), "50");
    assert_eq!(format::thousands(12000), "12,000");
    assert_eq!(format::thousands(1234567), "1,234,567");
}
