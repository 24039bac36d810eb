use zest_dashboard::charts::{self, BarMode, ChartId, Mark, Plot, XAxis};
use zest_dashboard::data::Analytics;
use zest_dashboard::theme::{self, ColorScale};

fn cartesian(id: ChartId) -> charts::Cartesian {
    match charts::build(id, &Analytics::new()).plot {
        Plot::Cartesian(c) => c,
        Plot::Donut(_) => panic!("{} is a donut", id),
    }
}

#[test]
fn chart_ids_parse_back_from_their_slugs() {
    assert_eq!(ChartId::ALL.len(), 21);
    for id in ChartId::ALL {
        assert_eq!(id.slug().parse::<ChartId>().unwrap(), id);
    }
    assert!("revenue_loss".parse::<ChartId>().is_err());
}

#[test]
fn every_chart_builds_with_aligned_series() {
    let analytics = Analytics::new();
    for id in ChartId::ALL {
        let spec = charts::build(id, &analytics);
        assert_eq!(spec.id, id);
        assert_eq!(spec.title, id.title());
        assert!(spec.series_count() >= 1, "{} has no series", id);

        if let Plot::Cartesian(c) = &spec.plot {
            for series in &c.series {
                assert_eq!(series.values.len(), c.x.len(), "{}", id);
            }
        }
    }
}

#[test]
fn user_growth_has_engagement_on_secondary_axis() {
    let chart = cartesian(ChartId::UserGrowth);
    assert_eq!(chart.series.len(), 3);
    assert_eq!(chart.y2_label.as_deref(), Some("Engagement Rate (%)"));

    let engagement = &chart.series[2];
    assert!(engagement.secondary);
    assert!(engagement.dashed);
    assert!((engagement.values[6] - 40.0).abs() < 1e-6);
}

#[test]
fn reference_lines() {
    let cases = [
        (ChartId::BurnRate, 1.5),
        (ChartId::Churn, 20.0),
        (ChartId::AppRating, 4.0),
        (ChartId::LtvCac, 3.0),
    ];
    for (id, y) in cases {
        let reference = cartesian(id).reference.expect("reference line");
        assert_eq!(reference.y, y, "{}", id);
    }
    assert_eq!(cartesian(ChartId::LtvCac).reference.unwrap().color, theme::THRESHOLD);
    assert!(cartesian(ChartId::Funding).reference.is_none());
}

#[test]
fn bar_labels_use_display_formats() {
    let funding = cartesian(ChartId::Funding);
    assert_eq!(funding.x, XAxis::Category(Analytics::new().funding_data.round));
    assert_eq!(funding.series[0].mark, Mark::Bar);
    assert_eq!(funding.series[0].labels[0], "$4.7M");
    assert_eq!(funding.series[0].labels[3], "$50M");

    let merchants = cartesian(ChartId::Merchants);
    assert_eq!(merchants.series[0].labels.last().map(String::as_str), Some("12,000"));

    let ltv = cartesian(ChartId::LtvCac);
    assert_eq!(ltv.series[0].labels[4], "66.7x");
}

#[test]
fn addressable_market_overlays_two_series() {
    let chart = cartesian(ChartId::AddressableMarket);
    assert_eq!(chart.bar_mode, BarMode::Overlay);
    assert_eq!(chart.series.len(), 2);
    assert!((chart.series[1].values[1] - 107.25).abs() < 1e-9);
}

#[test]
fn bubble_charts_scale_sizes_and_colours() {
    let matrix = cartesian(ChartId::OpportunityMatrix);
    let bubbles = matrix.series[0].bubbles.as_ref().expect("bubbles");
    assert_eq!(bubbles.scale, ColorScale::Viridis);
    assert!((bubbles.sizes[1] - 65.0).abs() < 1e-9);

    let customers = cartesian(ChartId::CustomerSegmentation);
    let bubbles = customers.series[0].bubbles.as_ref().expect("bubbles");
    assert!((bubbles.sizes[4] - 80.0).abs() < 1e-9);

    let risks = cartesian(ChartId::RiskMatrix);
    let bubbles = risks.series[0].bubbles.as_ref().expect("bubbles");
    assert_eq!(bubbles.sizes[5], 70.0);
}

#[test]
fn expense_breakdown_is_a_donut() {
    match charts::build(ChartId::ExpenseBreakdown, &Analytics::new()).plot {
        Plot::Donut(donut) => {
            assert_eq!(donut.slices.len(), 4);
            assert_eq!(donut.hole, 0.4);
            assert_eq!(donut.slices[3].label, "Other");
        }
        Plot::Cartesian(_) => panic!("expected a donut"),
    }
}

#[test]
fn spec_serializes_with_kebab_case_id() {
    let spec = charts::build(ChartId::RevenueLoss, &Analytics::new());
    let json = serde_json::to_value(&spec).unwrap();
    assert_eq!(json["id"], "revenue-loss");
    assert_eq!(json["plot"]["kind"], "cartesian");
    assert_eq!(json["plot"]["series"][0]["color"], "#28a745");
}

#[test]
fn colour_scales_run_from_first_to_last_stop() {
    let colors = ColorScale::Reds.map(&[8.0, 35.0, 12.0]);
    assert_eq!(colors[0], ColorScale::Reds.at(0.0));
    assert_eq!(colors[1], ColorScale::Reds.at(1.0));
    assert_eq!(ColorScale::Viridis.at(-3.0), ColorScale::Viridis.at(0.0));
    assert_eq!(theme::PRIMARY.hex(), "#0066cc");
}
