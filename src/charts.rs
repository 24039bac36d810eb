//! Chart definitions
//!
//! Every chart on the dashboard is described by a [`ChartSpec`]: the x axis,
//! one or more series drawn against it, and a few decorations (reference
//! line, secondary axis, colour bar). Specs are plain data; the `graph`
//! module turns them into pixels.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::data::Analytics;
use crate::error::DashboardError;
use crate::metrics::{self, format};
use crate::theme::{self, ColorScale, Rgb};

/// Identifier of every chart the dashboard can draw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartId {
    RevenueLoss,
    UserGrowth,
    Funding,
    Npa,
    RevenueExpense,
    ExpenseBreakdown,
    BurnRate,
    UserEngagement,
    Merchants,
    Churn,
    AppRating,
    OpportunityMatrix,
    MarketSize,
    Roadmap,
    CustomerSegmentation,
    LtvCac,
    MarketSegments,
    MarketGrowth,
    AddressableMarket,
    RiskMatrix,
    RiskMitigation,
}

impl ChartId {
    pub const ALL: [ChartId; 21] = [
        ChartId::RevenueLoss,
        ChartId::UserGrowth,
        ChartId::Funding,
        ChartId::Npa,
        ChartId::RevenueExpense,
        ChartId::ExpenseBreakdown,
        ChartId::BurnRate,
        ChartId::UserEngagement,
        ChartId::Merchants,
        ChartId::Churn,
        ChartId::AppRating,
        ChartId::OpportunityMatrix,
        ChartId::MarketSize,
        ChartId::Roadmap,
        ChartId::CustomerSegmentation,
        ChartId::LtvCac,
        ChartId::MarketSegments,
        ChartId::MarketGrowth,
        ChartId::AddressableMarket,
        ChartId::RiskMatrix,
        ChartId::RiskMitigation,
    ];

    /// URL-safe identifier, e.g. `revenue-loss`
    pub fn slug(&self) -> &'static str {
        match self {
            ChartId::RevenueLoss => "revenue-loss",
            ChartId::UserGrowth => "user-growth",
            ChartId::Funding => "funding",
            ChartId::Npa => "npa",
            ChartId::RevenueExpense => "revenue-expense",
            ChartId::ExpenseBreakdown => "expense-breakdown",
            ChartId::BurnRate => "burn-rate",
            ChartId::UserEngagement => "user-engagement",
            ChartId::Merchants => "merchants",
            ChartId::Churn => "churn",
            ChartId::AppRating => "app-rating",
            ChartId::OpportunityMatrix => "opportunity-matrix",
            ChartId::MarketSize => "market-size",
            ChartId::Roadmap => "roadmap",
            ChartId::CustomerSegmentation => "customer-segmentation",
            ChartId::LtvCac => "ltv-cac",
            ChartId::MarketSegments => "market-segments",
            ChartId::MarketGrowth => "market-growth",
            ChartId::AddressableMarket => "addressable-market",
            ChartId::RiskMatrix => "risk-matrix",
            ChartId::RiskMitigation => "risk-mitigation",
        }
    }

    /// Heading shown above the chart
    pub fn title(&self) -> &'static str {
        match self {
            ChartId::RevenueLoss => "Revenue vs Loss Trend",
            ChartId::UserGrowth => "User Growth Analysis",
            ChartId::Funding => "Funding Timeline",
            ChartId::Npa => "NPA Trend Analysis",
            ChartId::RevenueExpense => "Revenue & Expense Trends",
            ChartId::ExpenseBreakdown => "Expense Breakdown (2024)",
            ChartId::BurnRate => "Burn Rate Analysis",
            ChartId::UserEngagement => "User Engagement Analysis",
            ChartId::Merchants => "Merchant Network Growth",
            ChartId::Churn => "Customer Churn Analysis",
            ChartId::AppRating => "App Rating Trend",
            ChartId::OpportunityMatrix => "Strategic Opportunity Matrix",
            ChartId::MarketSize => "Market Size Analysis",
            ChartId::Roadmap => "Implementation Timeline",
            ChartId::CustomerSegmentation => "Customer Segmentation",
            ChartId::LtvCac => "LTV vs CAC Analysis",
            ChartId::MarketSegments => "Market Size by Segment",
            ChartId::MarketGrowth => "Growth Rate Analysis",
            ChartId::AddressableMarket => "Addressable Market",
            ChartId::RiskMatrix => "Risk Assessment Matrix",
            ChartId::RiskMitigation => "Risk Mitigation Timeline",
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ChartId {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartId::ALL
            .iter()
            .copied()
            .find(|id| id.slug() == s)
            .ok_or_else(|| DashboardError::UnknownChart(s.to_string()))
    }
}

/// Horizontal axis of a cartesian chart
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum XAxis {
    Numeric(Vec<f64>),
    /// Labels placed at positions 0, 1, 2, ...
    Category(Vec<String>),
}

impl XAxis {
    pub fn years(years: &[i32]) -> Self {
        XAxis::Numeric(years.iter().map(|y| *y as f64).collect())
    }

    pub fn len(&self) -> usize {
        match self {
            XAxis::Numeric(v) => v.len(),
            XAxis::Category(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plot coordinate of point `i`
    pub fn position(&self, i: usize) -> f64 {
        match self {
            XAxis::Numeric(v) => v.get(i).copied().unwrap_or_default(),
            XAxis::Category(_) => i as f64,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mark {
    Line,
    Bar,
    Bubble,
}

/// Sized, colour-coded markers
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bubbles {
    /// Marker diameters in pixels
    pub sizes: Vec<f64>,
    /// Values mapped onto `scale`
    pub color_values: Vec<f64>,
    pub scale: ColorScale,
    pub color_title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub name: Option<String>,
    pub values: Vec<f64>,
    pub mark: Mark,
    pub color: Rgb,
    pub width: u32,
    pub dashed: bool,
    /// Fill between the line and zero
    pub fill: bool,
    pub marker_size: u32,
    pub opacity: f64,
    /// Text drawn at each point; empty for none
    pub labels: Vec<String>,
    /// Drawn against the secondary y axis
    pub secondary: bool,
    pub bubbles: Option<Bubbles>,
}

impl Series {
    fn new(mark: Mark, values: Vec<f64>, color: Rgb) -> Self {
        Self {
            name: None,
            values,
            mark,
            color,
            width: 3,
            dashed: false,
            fill: false,
            marker_size: 6,
            opacity: 1.0,
            labels: Vec::new(),
            secondary: false,
            bubbles: None,
        }
    }

    pub fn line(values: Vec<f64>, color: Rgb) -> Self {
        Self::new(Mark::Line, values, color)
    }

    pub fn bar(values: Vec<f64>, color: Rgb) -> Self {
        Self::new(Mark::Bar, values, color)
    }

    pub fn bubbles(values: Vec<f64>, bubbles: Bubbles) -> Self {
        Self {
            bubbles: Some(bubbles),
            ..Self::new(Mark::Bubble, values, theme::PRIMARY)
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }

    pub fn marker_size(mut self, size: u32) -> Self {
        self.marker_size = size;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn secondary(mut self) -> Self {
        self.secondary = true;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarMode {
    /// Bars of different series sit side by side
    Group,
    /// Bars of different series share a slot, later ones on top
    Overlay,
}

/// Dashed horizontal benchmark with a caption
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub y: f64,
    pub label: String,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Cartesian {
    pub x: XAxis,
    pub x_label: String,
    pub y_label: String,
    pub y2_label: Option<String>,
    pub series: Vec<Series>,
    pub bar_mode: BarMode,
    pub reference: Option<ReferenceLine>,
}

impl Cartesian {
    fn new(x: XAxis, x_label: &str, y_label: &str) -> Self {
        Self {
            x,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            y2_label: None,
            series: Vec::new(),
            bar_mode: BarMode::Group,
            reference: None,
        }
    }

    fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    fn reference(mut self, y: f64, label: &str, color: Rgb) -> Self {
        self.reference = Some(ReferenceLine {
            y,
            label: label.to_string(),
            color,
        });
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Donut {
    pub slices: Vec<Slice>,
    /// Inner radius as a fraction of the outer one
    pub hole: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Plot {
    Cartesian(Cartesian),
    Donut(Donut),
}

/// Complete description of one chart
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSpec {
    pub id: ChartId,
    pub title: String,
    pub plot: Plot,
}

impl ChartSpec {
    fn new(id: ChartId, plot: Plot) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            plot,
        }
    }

    /// Number of data series (slices count as one series)
    pub fn series_count(&self) -> usize {
        match &self.plot {
            Plot::Cartesian(c) => c.series.len(),
            Plot::Donut(_) => 1,
        }
    }
}

/// Builds the spec of `id` from the dataset
pub fn build(id: ChartId, a: &Analytics) -> ChartSpec {
    let plot = match id {
        ChartId::RevenueLoss => revenue_loss(a),
        ChartId::UserGrowth => user_growth(a),
        ChartId::Funding => funding(a),
        ChartId::Npa => npa(a),
        ChartId::RevenueExpense => revenue_expense(a),
        ChartId::ExpenseBreakdown => expense_breakdown(a),
        ChartId::BurnRate => burn_rate(a),
        ChartId::UserEngagement => user_engagement(a),
        ChartId::Merchants => merchants(a),
        ChartId::Churn => churn(a),
        ChartId::AppRating => app_rating(a),
        ChartId::OpportunityMatrix => opportunity_matrix(a),
        ChartId::MarketSize => market_size(a),
        ChartId::Roadmap => roadmap(),
        ChartId::CustomerSegmentation => customer_segmentation(a),
        ChartId::LtvCac => ltv_cac(a),
        ChartId::MarketSegments => market_segments(a),
        ChartId::MarketGrowth => market_growth(a),
        ChartId::AddressableMarket => addressable_market(a),
        ChartId::RiskMatrix => risk_matrix(a),
        ChartId::RiskMitigation => risk_mitigation(a),
    };
    ChartSpec::new(id, plot)
}

fn labels<F: Fn(f64) -> String>(values: &[f64], f: F) -> Vec<String> {
    values.iter().map(|v| f(*v)).collect()
}

fn revenue_loss(a: &Analytics) -> Plot {
    let fin = &a.financial_data;
    Plot::Cartesian(
        Cartesian::new(XAxis::years(&fin.year), "Year", "Amount (₹ Crores)")
            .series(Series::line(fin.revenue_cr.clone(), theme::SUCCESS).named("Revenue"))
            .series(Series::line(fin.loss_cr.clone(), theme::DANGER).named("Net Loss")),
    )
}

fn user_growth(a: &Analytics) -> Plot {
    let ops = &a.operational_data;
    let mut chart = Cartesian::new(XAxis::years(&ops.year), "Year", "Users (Millions)")
        .series(Series::line(ops.users_millions.clone(), theme::PRIMARY).named("Total Users"))
        .series(
            Series::line(ops.active_users_millions.clone(), theme::INFO).named("Active Users"),
        )
        .series(
            Series::line(a.engagement_rate(), theme::WARNING)
                .named("Engagement Rate (%)")
                .width(2)
                .dashed()
                .secondary(),
        );
    chart.y2_label = Some("Engagement Rate (%)".to_string());
    Plot::Cartesian(chart)
}

fn funding(a: &Analytics) -> Plot {
    let f = &a.funding_data;
    Plot::Cartesian(
        Cartesian::new(XAxis::Category(f.round.clone()), "Funding Round", "Amount ($M)").series(
            Series::bar(f.amount.clone(), theme::PRIMARY)
                .labels(labels(&f.amount, format::usd_millions)),
        ),
    )
}

fn npa(a: &Analytics) -> Plot {
    let ops = &a.operational_data;
    Plot::Cartesian(
        Cartesian::new(XAxis::years(&ops.year), "Year", "NPA Rate (%)")
            .series(Series::line(ops.npa_rate.clone(), theme::DANGER).named("ZestMoney NPA Rate"))
            .series(
                Series::line(ops.industry_npa.clone(), theme::SUCCESS)
                    .named("Industry Benchmark")
                    .width(2)
                    .dashed(),
            ),
    )
}

fn revenue_expense(a: &Analytics) -> Plot {
    let fin = &a.financial_data;
    Plot::Cartesian(
        Cartesian::new(XAxis::years(&fin.year), "Year", "Amount (₹ Crores)")
            .series(
                Series::line(fin.revenue_cr.clone(), theme::SUCCESS)
                    .named("Revenue")
                    .filled(),
            )
            .series(
                Series::line(fin.expenses_cr.clone(), theme::DANGER)
                    .named("Expenses")
                    .filled(),
            ),
    )
}

fn expense_breakdown(a: &Analytics) -> Plot {
    let colors = [theme::WARNING, theme::INFO, theme::DANGER, theme::SECONDARY];
    let slices = a
        .expense_breakdown()
        .into_iter()
        .zip(colors)
        .map(|(share, color)| Slice {
            label: share.label.to_string(),
            value: share.amount,
            color,
        })
        .collect();
    Plot::Donut(Donut { slices, hole: 0.4 })
}

fn burn_rate(a: &Analytics) -> Plot {
    let fin = &a.financial_data;
    Plot::Cartesian(
        Cartesian::new(XAxis::years(&fin.year), "Year", "Burn Rate Multiple")
            .series(
                Series::bar(fin.burn_multiple.clone(), theme::WARNING)
                    .labels(labels(&fin.burn_multiple, format::multiple)),
            )
            .reference(1.5, "Healthy Benchmark (1.5x)", theme::BENCHMARK),
    )
}

fn user_engagement(a: &Analytics) -> Plot {
    let ops = &a.operational_data;
    Plot::Cartesian(
        Cartesian::new(XAxis::years(&ops.year), "Year", "Users (Millions)")
            .series(
                Series::bar(ops.users_millions.clone(), theme::PRIMARY)
                    .named("Total Users")
                    .labels(labels(&ops.users_millions, format::millions)),
            )
            .series(
                Series::bar(ops.active_users_millions.clone(), theme::INFO)
                    .named("Active Users")
                    .labels(labels(&ops.active_users_millions, format::millions)),
            ),
    )
}

fn merchants(a: &Analytics) -> Plot {
    let ops = &a.operational_data;
    let values: Vec<f64> = ops.merchants.iter().map(|m| *m as f64).collect();
    let text = ops
        .merchants
        .iter()
        .map(|m| format::thousands(*m as u64))
        .collect();
    Plot::Cartesian(
        Cartesian::new(XAxis::years(&ops.year), "Year", "Merchant Partners")
            .series(Series::bar(values, theme::INFO).labels(text)),
    )
}

fn churn(a: &Analytics) -> Plot {
    let ops = &a.operational_data;
    Plot::Cartesian(
        Cartesian::new(XAxis::years(&ops.year), "Year", "Annual Churn Rate (%)")
            .series(Series::line(ops.churn_rate.clone(), theme::DANGER).filled())
            .reference(20.0, "Industry Average (20%)", theme::BENCHMARK),
    )
}

fn app_rating(a: &Analytics) -> Plot {
    let ops = &a.operational_data;
    Plot::Cartesian(
        Cartesian::new(XAxis::years(&ops.year), "Year", "App Rating")
            .series(Series::line(ops.app_rating.clone(), theme::WARNING).filled())
            .reference(4.0, "Good Rating (4.0)", theme::BENCHMARK),
    )
}

fn opportunity_matrix(a: &Analytics) -> Plot {
    let o = &a.opportunities;
    let bubbles = Bubbles {
        sizes: metrics::scaled(&o.tam_billions, 1.0 / 3.0),
        color_values: o.attractiveness.clone(),
        scale: ColorScale::Viridis,
        color_title: "Attractiveness Score".to_string(),
    };
    Plot::Cartesian(
        Cartesian::new(
            XAxis::Numeric(o.risk_score.clone()),
            "Risk Score (1=Low, 10=High)",
            "Revenue Potential (1=Low, 10=High)",
        )
        .series(Series::bubbles(o.revenue_potential.clone(), bubbles).labels(o.name.clone())),
    )
}

fn market_size(a: &Analytics) -> Plot {
    let o = &a.opportunities;
    Plot::Cartesian(
        Cartesian::new(
            XAxis::Category(o.name.clone()),
            "Opportunity",
            "Total Addressable Market ($B)",
        )
        .series(
            Series::bar(o.tam_billions.clone(), theme::PRIMARY)
                .labels(labels(&o.tam_billions, format::usd_billions)),
        ),
    )
}

const ROADMAP_PHASES: [&str; 5] = ["Foundation", "Planning", "Development", "Launch", "Scale"];
const ROADMAP_MONTHS: [f64; 5] = [3.0, 6.0, 15.0, 24.0, 36.0];
const ROADMAP_INVESTMENT: [f64; 5] = [10.0, 15.0, 25.0, 20.0, 15.0];

fn roadmap() -> Plot {
    Plot::Cartesian(
        Cartesian::new(
            XAxis::Numeric(ROADMAP_MONTHS.to_vec()),
            "Timeline (Months)",
            "Investment ($M)",
        )
        .series(
            Series::line(ROADMAP_INVESTMENT.to_vec(), theme::PRIMARY)
                .marker_size(12)
                .labels(ROADMAP_PHASES.iter().map(|p| p.to_string()).collect()),
        ),
    )
}

fn customer_segmentation(a: &Analytics) -> Plot {
    let c = &a.customer_data;
    let bubbles = Bubbles {
        sizes: metrics::scaled(&c.ltv, 1.0 / 4000.0),
        color_values: c.default_rate.clone(),
        scale: ColorScale::RdYlGnReversed,
        color_title: "Default Rate (%)".to_string(),
    };
    Plot::Cartesian(
        Cartesian::new(
            XAxis::Numeric(c.size_millions.clone()),
            "Segment Size (Millions)",
            "Profitability Score",
        )
        .series(Series::bubbles(c.profitability.clone(), bubbles).labels(c.segment.clone())),
    )
}

fn ltv_cac(a: &Analytics) -> Plot {
    let c = &a.customer_data;
    let ratio = a.ltv_cac_ratio();
    let text = labels(&ratio, format::multiple);
    Plot::Cartesian(
        Cartesian::new(
            XAxis::Category(c.segment.clone()),
            "Customer Segment",
            "LTV/CAC Ratio",
        )
        .series(Series::bar(ratio, theme::SUCCESS).labels(text))
        .reference(3.0, "Healthy Threshold (3x)", theme::THRESHOLD),
    )
}

fn market_segments(a: &Analytics) -> Plot {
    let m = &a.market_data;
    Plot::Cartesian(
        Cartesian::new(
            XAxis::Category(m.segment.clone()),
            "Market Segment",
            "Market Size ($B)",
        )
        .series(
            Series::bar(m.size_billions.clone(), theme::INFO)
                .labels(labels(&m.size_billions, format::usd_billions)),
        ),
    )
}

fn market_growth(a: &Analytics) -> Plot {
    let m = &a.market_data;
    Plot::Cartesian(
        Cartesian::new(XAxis::Category(m.segment.clone()), "Market Segment", "CAGR (%)").series(
            Series::bar(m.cagr.clone(), theme::SUCCESS)
                .labels(labels(&m.cagr, |v| format!("{}%", format::trim(v)))),
        ),
    )
}

fn addressable_market(a: &Analytics) -> Plot {
    let m = &a.market_data;
    let mut chart = Cartesian::new(
        XAxis::Category(m.segment.clone()),
        "Market Segment",
        "Market Size ($B)",
    )
    .series(
        Series::bar(m.size_billions.clone(), theme::INFO)
            .named("Total Market")
            .opacity(0.6),
    )
    .series(Series::bar(a.addressable_market(), theme::PRIMARY).named("Addressable Market"));
    chart.bar_mode = BarMode::Overlay;
    Plot::Cartesian(chart)
}

fn risk_matrix(a: &Analytics) -> Plot {
    let r = &a.risk_data;
    let bubbles = Bubbles {
        sizes: metrics::scaled(&r.mitigation_cost, 2.0),
        color_values: r.mitigation_cost.clone(),
        scale: ColorScale::Reds,
        color_title: "Mitigation Cost ($M)".to_string(),
    };
    Plot::Cartesian(
        Cartesian::new(
            XAxis::Numeric(r.probability.clone()),
            "Probability Score",
            "Impact Severity",
        )
        .series(Series::bubbles(r.impact.clone(), bubbles).labels(r.category.clone())),
    )
}

fn risk_mitigation(a: &Analytics) -> Plot {
    let r = &a.risk_data;
    Plot::Cartesian(
        Cartesian::new(
            XAxis::Category(r.category.clone()),
            "Risk Category",
            "Mitigation Cost ($M)",
        )
        .series(
            Series::bar(r.mitigation_cost.clone(), theme::DANGER)
                .labels(labels(&r.mitigation_cost, format::usd_millions)),
        ),
    )
}
