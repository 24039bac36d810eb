//! Tab layout
//!
//! Each tab of the dashboard is a [`Panel`]: rows of KPI cards, chart slots
//! and note cards laid out on a 12-column grid.

use serde::Serialize;
use std::fmt;

use crate::charts::ChartId;
use crate::data::Analytics;
use crate::metrics::{format, last};
use crate::theme::{self, Rgb};

/// The seven views of the dashboard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Dashboard,
    Financial,
    Operations,
    Strategic,
    Customer,
    Market,
    Risk,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Dashboard,
        Tab::Financial,
        Tab::Operations,
        Tab::Strategic,
        Tab::Customer,
        Tab::Market,
        Tab::Risk,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Tab::Dashboard => "dashboard",
            Tab::Financial => "financial",
            Tab::Operations => "operations",
            Tab::Strategic => "strategic",
            Tab::Customer => "customer",
            Tab::Market => "market",
            Tab::Risk => "risk",
        }
    }

    /// Label shown on the tab bar
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Dashboard => "Executive Dashboard",
            Tab::Financial => "Financial Analysis",
            Tab::Operations => "Operations",
            Tab::Strategic => "Strategic Planning",
            Tab::Customer => "Customer Analytics",
            Tab::Market => "Market Intelligence",
            Tab::Risk => "Risk Assessment",
        }
    }

    pub fn parse(s: &str) -> Option<Tab> {
        Tab::ALL.iter().copied().find(|t| t.slug() == s)
    }

    /// Like [`Tab::parse`], but unknown identifiers select the dashboard
    pub fn resolve(s: &str) -> Tab {
        Tab::parse(s).unwrap_or(Tab::Dashboard)
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A single summary number
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct KpiCard {
    pub title: String,
    pub value: String,
    pub caption: Option<String>,
    pub color: Rgb,
}

impl KpiCard {
    fn new(title: &str, value: String, color: Rgb) -> Self {
        Self {
            title: title.to_string(),
            value,
            caption: None,
            color,
        }
    }

    fn caption(mut self, caption: &str) -> Self {
        self.caption = Some(caption.to_string());
        self
    }
}

/// Place reserved for a chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSlot {
    pub chart: ChartId,
    pub title: String,
    /// Pixel height the chart is rendered at
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoteItem {
    /// A ticked line
    Check { text: String },
    Heading { text: String, color: Option<Rgb> },
    Paragraph { text: String },
    List { items: Vec<String> },
    Rule,
}

/// Free-form card with headings, lists and text
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NoteCard {
    pub header: String,
    pub accent: Rgb,
    pub items: Vec<NoteItem>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Kpi(KpiCard),
    Chart(ChartSlot),
    Note(NoteCard),
}

/// A block and the number of grid columns (out of 12) it spans
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cell {
    pub width: u8,
    pub block: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Panel {
    pub tab: Tab,
    pub rows: Vec<Vec<Cell>>,
}

impl Panel {
    fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.rows.iter().flatten().map(|c| &c.block)
    }

    pub fn kpi_count(&self) -> usize {
        self.blocks().filter(|b| matches!(b, Block::Kpi(_))).count()
    }

    pub fn chart_count(&self) -> usize {
        self.charts().len()
    }

    pub fn note_count(&self) -> usize {
        self.blocks().filter(|b| matches!(b, Block::Note(_))).count()
    }

    /// Charts in reading order
    pub fn charts(&self) -> Vec<ChartId> {
        self.blocks()
            .filter_map(|b| match b {
                Block::Chart(slot) => Some(slot.chart),
                _ => None,
            })
            .collect()
    }
}

fn chart(width: u8, chart: ChartId, height: u32) -> Cell {
    Cell {
        width,
        block: Block::Chart(ChartSlot {
            chart,
            title: chart.title().to_string(),
            height,
        }),
    }
}

fn kpi(width: u8, card: KpiCard) -> Cell {
    Cell {
        width,
        block: Block::Kpi(card),
    }
}

fn note(width: u8, card: NoteCard) -> Cell {
    Cell {
        width,
        block: Block::Note(card),
    }
}

fn heading(text: &str) -> NoteItem {
    NoteItem::Heading {
        text: text.to_string(),
        color: None,
    }
}

fn list(items: &[&str]) -> NoteItem {
    NoteItem::List {
        items: items.iter().map(|s| s.to_string()).collect(),
    }
}

/// The six cards shown above the tab bar
pub fn header_kpis(a: &Analytics) -> Vec<KpiCard> {
    let k = a.kpis();
    vec![
        KpiCard::new("Total Losses", format::crores(k.total_losses), theme::DANGER),
        KpiCard::new("Peak Valuation", format::usd_millions(k.peak_valuation), theme::PRIMARY),
        KpiCard::new("Current Revenue", format::crores(k.current_revenue), theme::SUCCESS),
        KpiCard::new("User Base", format::millions(k.current_users), theme::INFO),
        KpiCard::new("NPA vs Industry", format::multiple(k.npa_multiple), theme::WARNING),
        KpiCard::new("Revenue Growth", format::percent(k.revenue_growth), theme::SECONDARY),
    ]
}

/// Builds the panel shown for `tab`
pub fn build(tab: Tab, a: &Analytics) -> Panel {
    let rows = match tab {
        Tab::Dashboard => dashboard(),
        Tab::Financial => financial(a),
        Tab::Operations => operations(),
        Tab::Strategic => strategic(a),
        Tab::Customer => customer(a),
        Tab::Market => market(),
        Tab::Risk => risk(),
    };
    Panel { tab, rows }
}

const RECOMMENDATIONS: [&str; 5] = [
    "Pivot to B2B SaaS Infrastructure",
    "Focus on RegTech Compliance Solutions",
    "Implement AI-driven Risk Management",
    "Develop Open Banking APIs",
    "Strategic Asset Monetization",
];

fn dashboard() -> Vec<Vec<Cell>> {
    let recommendations = NoteCard {
        header: "Strategic Recommendations".to_string(),
        accent: theme::PRIMARY,
        items: RECOMMENDATIONS
            .iter()
            .map(|r| NoteItem::Check {
                text: r.to_string(),
            })
            .collect(),
    };

    vec![
        vec![chart(6, ChartId::RevenueLoss, 400), chart(6, ChartId::UserGrowth, 400)],
        vec![chart(6, ChartId::Funding, 400), chart(6, ChartId::Npa, 400)],
        vec![note(12, recommendations)],
    ]
}

fn financial(a: &Analytics) -> Vec<Vec<Cell>> {
    let fin = &a.financial_data;
    let k = a.kpis();
    let latest_year = fin.year.last().copied().unwrap_or_default();

    vec![
        vec![
            kpi(
                3,
                KpiCard::new("Revenue Growth", format::percent(k.revenue_growth), theme::SUCCESS)
                    .caption("Year-over-Year"),
            ),
            kpi(
                3,
                KpiCard::new(
                    "Burn Rate",
                    format::multiple(last(&fin.burn_multiple)),
                    theme::WARNING,
                )
                .caption("Expense/Revenue"),
            ),
            kpi(
                3,
                KpiCard::new(
                    "Gross Margin",
                    format::percent(last(&fin.gross_margin)),
                    theme::INFO,
                )
                .caption("Current Margin"),
            ),
            kpi(
                3,
                KpiCard::new(
                    "Total Expenses",
                    format::crores(last(&fin.expenses_cr)),
                    theme::DANGER,
                )
                .caption(&format!("FY{}", latest_year)),
            ),
        ],
        vec![
            chart(6, ChartId::RevenueExpense, 450),
            chart(6, ChartId::ExpenseBreakdown, 450),
        ],
        vec![chart(12, ChartId::BurnRate, 400)],
    ]
}

fn operations() -> Vec<Vec<Cell>> {
    vec![
        vec![chart(6, ChartId::UserEngagement, 400), chart(6, ChartId::Merchants, 400)],
        vec![chart(6, ChartId::Churn, 400), chart(6, ChartId::AppRating, 400)],
    ]
}

fn strategic(a: &Analytics) -> Vec<Vec<Cell>> {
    let o = &a.opportunities;
    let accents = [theme::SUCCESS, theme::INFO, theme::PRIMARY];

    let mut items = Vec::new();
    for (rank, (i, color)) in a.top_opportunities(3).into_iter().zip(accents).enumerate() {
        if rank > 0 {
            items.push(NoteItem::Rule);
        }
        items.push(NoteItem::Heading {
            text: format!("{}. {}", rank + 1, o.name[i]),
            color: Some(color),
        });
        items.push(NoteItem::Paragraph {
            text: format!(
                "TAM: {}, Capital: {}",
                format::usd_billions(o.tam_billions[i]),
                format::usd_millions(o.capital_required[i])
            ),
        });
    }

    let top = NoteCard {
        header: "Top Opportunities".to_string(),
        accent: theme::PRIMARY,
        items,
    };

    vec![
        vec![chart(8, ChartId::OpportunityMatrix, 500), note(4, top)],
        vec![chart(6, ChartId::MarketSize, 400), chart(6, ChartId::Roadmap, 400)],
    ]
}

fn customer(a: &Analytics) -> Vec<Vec<Cell>> {
    let c = &a.customer_data;
    let high_value = a
        .top_segments_by_ltv(3)
        .into_iter()
        .map(|i| format!("{}: {} LTV", c.segment[i], format::lakhs(c.ltv[i])))
        .collect();

    let insights = NoteCard {
        header: "Segment Insights".to_string(),
        accent: theme::PRIMARY,
        items: vec![
            heading("High-Value Segments:"),
            NoteItem::List { items: high_value },
            NoteItem::Rule,
            heading("Growth Opportunities:"),
            list(&["Focus on professionals", "B2B SME lending", "Premium products"]),
        ],
    };

    vec![
        vec![chart(8, ChartId::CustomerSegmentation, 500), note(4, insights)],
        vec![chart(12, ChartId::LtvCac, 400)],
    ]
}

fn market() -> Vec<Vec<Cell>> {
    vec![
        vec![chart(6, ChartId::MarketSegments, 400), chart(6, ChartId::MarketGrowth, 400)],
        vec![chart(12, ChartId::AddressableMarket, 400)],
    ]
}

fn risk() -> Vec<Vec<Cell>> {
    let critical = NoteCard {
        header: "Critical Risks".to_string(),
        accent: theme::DANGER,
        items: vec![
            heading("Immediate Attention:"),
            list(&[
                "Credit Risk: 9.2/10",
                "Regulatory Risk: 8.1/10",
                "Funding Risk: 8.5/10",
            ]),
            NoteItem::Rule,
            heading("Mitigation Cost:"),
            NoteItem::Paragraph {
                text: "Total: $90M over 18 months".to_string(),
            },
        ],
    };

    vec![
        vec![chart(8, ChartId::RiskMatrix, 500), note(4, critical)],
        vec![chart(12, ChartId::RiskMitigation, 400)],
    ]
}
