use std::collections::HashSet;

use zest_dashboard::charts::ChartId;
use zest_dashboard::data::Analytics;
use zest_dashboard::html;
use zest_dashboard::panels::{self, Block, NoteItem, Tab};

#[test]
fn tab_contents() {
    let analytics = Analytics::new();
    // (tab, kpi cards, charts, note cards)
    let expected = [
        (Tab::Dashboard, 0, 4, 1),
        (Tab::Financial, 4, 3, 0),
        (Tab::Operations, 0, 4, 0),
        (Tab::Strategic, 0, 3, 1),
        (Tab::Customer, 0, 2, 1),
        (Tab::Market, 0, 3, 0),
        (Tab::Risk, 0, 2, 1),
    ];

    for (tab, kpis, charts, notes) in expected {
        let panel = panels::build(tab, &analytics);
        assert_eq!(panel.tab, tab);
        assert_eq!(panel.kpi_count(), kpis, "{} kpis", tab);
        assert_eq!(panel.chart_count(), charts, "{} charts", tab);
        assert_eq!(panel.note_count(), notes, "{} notes", tab);
    }
}

#[test]
fn every_chart_appears_on_exactly_one_tab() {
    let analytics = Analytics::new();
    let placed: Vec<ChartId> = Tab::ALL
        .iter()
        .flat_map(|tab| panels::build(*tab, &analytics).charts())
        .collect();

    assert_eq!(placed.len(), ChartId::ALL.len());
    let unique: HashSet<ChartId> = placed.into_iter().collect();
    assert_eq!(unique.len(), ChartId::ALL.len());
}

#[test]
fn rows_fit_the_grid() {
    let analytics = Analytics::new();
    for tab in Tab::ALL {
        for row in &panels::build(tab, &analytics).rows {
            let width: u32 = row.iter().map(|c| c.width as u32).sum();
            assert_eq!(width, 12, "{} has a row of width {}", tab, width);
        }
    }
}

#[test]
fn unknown_tab_falls_back_to_dashboard() {
    assert_eq!(Tab::resolve("risk"), Tab::Risk);
    assert_eq!(Tab::resolve("settings"), Tab::Dashboard);
    assert_eq!(Tab::resolve(""), Tab::Dashboard);
    assert_eq!(Tab::parse("settings"), None);
}

#[test]
fn header_kpi_values() {
    let cards = panels::header_kpis(&Analytics::new());
    let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, ["₹1560Cr", "$435M", "₹320Cr", "17.0M", "4.8x", "31.3%"]);
}

#[test]
fn financial_kpi_cards() {
    let panel = panels::build(Tab::Financial, &Analytics::new());
    let cards: Vec<_> = panel.rows[0]
        .iter()
        .filter_map(|c| match &c.block {
            Block::Kpi(card) => Some(card),
            _ => None,
        })
        .collect();

    assert_eq!(cards[0].value, "31.3%");
    assert_eq!(cards[1].value, "2.5x");
    assert_eq!(cards[2].value, "12.5%");
    assert_eq!(cards[3].value, "₹805Cr");
    assert_eq!(cards[3].caption.as_deref(), Some("FY2024"));
}

fn note_text(tab: Tab) -> Vec<String> {
    let panel = panels::build(tab, &Analytics::new());
    let mut text = Vec::new();
    for cell in panel.rows.iter().flatten() {
        if let Block::Note(card) = &cell.block {
            for item in &card.items {
                match item {
                    NoteItem::Check { text: t }
                    | NoteItem::Heading { text: t, .. }
                    | NoteItem::Paragraph { text: t } => text.push(t.clone()),
                    NoteItem::List { items } => text.extend(items.iter().cloned()),
                    NoteItem::Rule => {}
                }
            }
        }
    }
    text
}

#[test]
fn derived_note_cards() {
    let strategic = note_text(Tab::Strategic);
    assert_eq!(strategic[0], "1. B2B Credit Infrastructure");
    assert_eq!(strategic[1], "TAM: $25B, Capital: $20M");
    assert_eq!(strategic[2], "2. RegTech Solutions");

    let customer = note_text(Tab::Customer);
    assert_eq!(customer[1], "Tech Workers: ₹3.2L LTV");
    assert_eq!(customer[2], "SME Owners: ₹2.8L LTV");

    let dashboard = note_text(Tab::Dashboard);
    assert_eq!(dashboard.len(), 5);
    assert_eq!(dashboard[0], "Pivot to B2B SaaS Infrastructure");

    assert!(note_text(Tab::Risk).contains(&"Total: $90M over 18 months".to_string()));
}

#[test]
fn panel_html_has_chart_placeholders() {
    let panel = panels::build(Tab::Market, &Analytics::new());
    let fragment = html::render_panel(&panel);

    assert!(fragment.starts_with("<div class=\"tab-panel\" data-tab=\"market\">"));
    for id in panel.charts() {
        assert!(fragment.contains(&format!("data-chart=\"{}\"", id.slug())));
        assert!(fragment.contains(&format!("/api/charts/{}/svg?height=", id.slug())));
    }
    assert!(fragment.contains("col-md-12"));
}

#[test]
fn page_contains_header_tabs_and_dashboard() {
    let page = html::render_page(&Analytics::new(), Tab::Dashboard);

    assert!(!page.contains("{{"));
    assert!(page.contains("ZestMoney Strategic Intelligence Platform"));
    assert!(page.contains("₹1560Cr"));
    for tab in Tab::ALL {
        assert!(page.contains(&format!("data-tab=\"{}\"", tab.slug())));
    }
    assert!(page.contains("custom-tab custom-tab--selected\" data-tab=\"dashboard\""));
    assert!(page.contains("data-chart=\"revenue-loss\""));
    assert!(page.contains("Strategic Recommendations"));
}

#[test]
fn html_escaping() {
    assert_eq!(html::escape("R&D <b>\"x\"</b>"), "R&amp;D &lt;b&gt;&quot;x&quot;&lt;/b&gt;");
}
