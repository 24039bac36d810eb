use serde::Serialize;

use crate::error::{DashboardError, DashboardResult};

/// A single value in a table column
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'a> {
    Int(i64),
    Number(f64),
    Text(&'a str),
}

impl std::fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Number(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
        }
    }
}

/// A named column of a table
#[derive(Clone, Debug)]
pub struct Column<'a> {
    pub name: &'static str,
    pub values: Vec<Value<'a>>,
}

impl<'a> Column<'a> {
    fn numbers(name: &'static str, values: &[f64]) -> Self {
        Self {
            name,
            values: values.iter().map(|v| Value::Number(*v)).collect(),
        }
    }

    fn ints<T: Copy + Into<i64>>(name: &'static str, values: &[T]) -> Self {
        Self {
            name,
            values: values.iter().map(|v| Value::Int((*v).into())).collect(),
        }
    }

    fn texts(name: &'static str, values: &'a [String]) -> Self {
        Self {
            name,
            values: values.iter().map(|v| Value::Text(v.as_str())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Common view over the literal tables
///
/// Columns are aligned by position: index `i` of every column describes the
/// same year, segment or category.
pub trait Table {
    /// Short identifier used in URLs and exports
    fn name(&self) -> &'static str;

    /// Every column of the table, in display order
    fn columns(&self) -> Vec<Column<'_>>;

    /// Number of rows, taken from the first column
    fn row_count(&self) -> usize {
        self.columns().first().map(Column::len).unwrap_or(0)
    }

    /// Checks that every column has the same length as the first one
    fn validate(&self) -> DashboardResult<()> {
        let columns = self.columns();
        let Some(first) = columns.first() else {
            return Ok(());
        };
        let expected = first.len();

        for column in &columns[1..] {
            if column.len() != expected {
                return Err(DashboardError::InconsistentTable {
                    table: self.name(),
                    column: column.name,
                    expected,
                    found: column.len(),
                });
            }
        }

        Ok(())
    }
}

/// Yearly financial performance, amounts in ₹ crores
#[derive(Clone, Debug, Serialize)]
pub struct FinancialData {
    pub year: Vec<i32>,
    pub revenue_cr: Vec<f64>,
    pub loss_cr: Vec<f64>,
    pub expenses_cr: Vec<f64>,
    pub growth_rate: Vec<f64>,
    pub burn_multiple: Vec<f64>,
    pub gross_margin: Vec<f64>,
    pub marketing_expenses: Vec<f64>,
    pub employee_costs: Vec<f64>,
    pub bad_debt_provisions: Vec<f64>,
}

impl Table for FinancialData {
    fn name(&self) -> &'static str {
        "financial"
    }

    fn columns(&self) -> Vec<Column<'_>> {
        vec![
            Column::ints("year", &self.year),
            Column::numbers("revenue_cr", &self.revenue_cr),
            Column::numbers("loss_cr", &self.loss_cr),
            Column::numbers("expenses_cr", &self.expenses_cr),
            Column::numbers("growth_rate", &self.growth_rate),
            Column::numbers("burn_multiple", &self.burn_multiple),
            Column::numbers("gross_margin", &self.gross_margin),
            Column::numbers("marketing_expenses", &self.marketing_expenses),
            Column::numbers("employee_costs", &self.employee_costs),
            Column::numbers("bad_debt_provisions", &self.bad_debt_provisions),
        ]
    }
}

/// Yearly user, merchant and loan-quality figures
#[derive(Clone, Debug, Serialize)]
pub struct OperationalData {
    pub year: Vec<i32>,
    pub users_millions: Vec<f64>,
    pub active_users_millions: Vec<f64>,
    pub merchants: Vec<u32>,
    pub npa_rate: Vec<f64>,
    pub industry_npa: Vec<f64>,
    pub churn_rate: Vec<f64>,
    pub nps_score: Vec<i32>,
    pub app_rating: Vec<f64>,
}

impl Table for OperationalData {
    fn name(&self) -> &'static str {
        "operational"
    }

    fn columns(&self) -> Vec<Column<'_>> {
        vec![
            Column::ints("year", &self.year),
            Column::numbers("users_millions", &self.users_millions),
            Column::numbers("active_users_millions", &self.active_users_millions),
            Column::ints("merchants", &self.merchants),
            Column::numbers("npa_rate", &self.npa_rate),
            Column::numbers("industry_npa", &self.industry_npa),
            Column::numbers("churn_rate", &self.churn_rate),
            Column::ints("nps_score", &self.nps_score),
            Column::numbers("app_rating", &self.app_rating),
        ]
    }
}

/// Strategic opportunities; scores are on a 1-10 scale
#[derive(Clone, Debug, Serialize)]
pub struct Opportunities {
    pub name: Vec<String>,
    pub tam_billions: Vec<f64>,
    pub capital_required: Vec<f64>,
    pub time_to_market: Vec<f64>,
    pub revenue_potential: Vec<f64>,
    pub risk_score: Vec<f64>,
    pub attractiveness: Vec<f64>,
}

impl Table for Opportunities {
    fn name(&self) -> &'static str {
        "opportunities"
    }

    fn columns(&self) -> Vec<Column<'_>> {
        vec![
            Column::texts("name", &self.name),
            Column::numbers("tam_billions", &self.tam_billions),
            Column::numbers("capital_required", &self.capital_required),
            Column::numbers("time_to_market", &self.time_to_market),
            Column::numbers("revenue_potential", &self.revenue_potential),
            Column::numbers("risk_score", &self.risk_score),
            Column::numbers("attractiveness", &self.attractiveness),
        ]
    }
}

/// Funding rounds, amounts and valuations in $ millions
#[derive(Clone, Debug, Serialize)]
pub struct FundingData {
    pub round: Vec<String>,
    pub amount: Vec<f64>,
    pub year: Vec<i32>,
    pub valuation: Vec<f64>,
}

impl Table for FundingData {
    fn name(&self) -> &'static str {
        "funding"
    }

    fn columns(&self) -> Vec<Column<'_>> {
        vec![
            Column::texts("round", &self.round),
            Column::numbers("amount", &self.amount),
            Column::ints("year", &self.year),
            Column::numbers("valuation", &self.valuation),
        ]
    }
}

/// Market segments, sizes in $ billions
#[derive(Clone, Debug, Serialize)]
pub struct MarketData {
    pub segment: Vec<String>,
    pub size_billions: Vec<f64>,
    pub cagr: Vec<f64>,
    pub addressable_pct: Vec<f64>,
}

impl Table for MarketData {
    fn name(&self) -> &'static str {
        "market"
    }

    fn columns(&self) -> Vec<Column<'_>> {
        vec![
            Column::texts("segment", &self.segment),
            Column::numbers("size_billions", &self.size_billions),
            Column::numbers("cagr", &self.cagr),
            Column::numbers("addressable_pct", &self.addressable_pct),
        ]
    }
}

/// Customer segments, monetary values in ₹
#[derive(Clone, Debug, Serialize)]
pub struct CustomerData {
    pub segment: Vec<String>,
    pub size_millions: Vec<f64>,
    pub avg_transaction: Vec<f64>,
    pub default_rate: Vec<f64>,
    pub ltv: Vec<f64>,
    pub cac: Vec<f64>,
    pub profitability: Vec<f64>,
}

impl Table for CustomerData {
    fn name(&self) -> &'static str {
        "customer"
    }

    fn columns(&self) -> Vec<Column<'_>> {
        vec![
            Column::texts("segment", &self.segment),
            Column::numbers("size_millions", &self.size_millions),
            Column::numbers("avg_transaction", &self.avg_transaction),
            Column::numbers("default_rate", &self.default_rate),
            Column::numbers("ltv", &self.ltv),
            Column::numbers("cac", &self.cac),
            Column::numbers("profitability", &self.profitability),
        ]
    }
}

/// Risk categories scored 1-10, mitigation cost in $ millions
#[derive(Clone, Debug, Serialize)]
pub struct RiskData {
    pub category: Vec<String>,
    pub probability: Vec<f64>,
    pub impact: Vec<f64>,
    pub mitigation_cost: Vec<f64>,
}

impl Table for RiskData {
    fn name(&self) -> &'static str {
        "risk"
    }

    fn columns(&self) -> Vec<Column<'_>> {
        vec![
            Column::texts("category", &self.category),
            Column::numbers("probability", &self.probability),
            Column::numbers("impact", &self.impact),
            Column::numbers("mitigation_cost", &self.mitigation_cost),
        ]
    }
}

/// The complete, immutable dataset behind the dashboard
#[derive(Clone, Debug, Serialize)]
pub struct Analytics {
    pub financial_data: FinancialData,
    pub operational_data: OperationalData,
    pub opportunities: Opportunities,
    pub funding_data: FundingData,
    pub market_data: MarketData,
    pub customer_data: CustomerData,
    pub risk_data: RiskData,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for Analytics {
    fn default() -> Self {
        Self::new()
    }
}

impl Analytics {
    /// Builds the literal tables
    pub fn new() -> Self {
        let financial_data = FinancialData {
            year: vec![2018, 2019, 2020, 2021, 2022, 2023, 2024],
            revenue_cr: vec![8.2, 26.7, 72.4, 89.3, 138.4, 243.7, 320.0],
            loss_cr: vec![15.2, 45.0, 78.0, 125.8, 398.8, 412.4, 485.0],
            expenses_cr: vec![23.4, 71.7, 150.4, 215.1, 543.8, 662.2, 805.0],
            growth_rate: vec![0.0, 225.6, 171.2, 23.3, 55.0, 76.0, 31.3],
            burn_multiple: vec![2.85, 2.68, 2.08, 2.41, 3.93, 2.72, 2.52],
            gross_margin: vec![28.5, 12.5, 18.7, 22.1, 15.3, 8.9, 12.5],
            marketing_expenses: vec![0.0, 0.0, 28.5, 48.2, 125.0, 165.0, 220.0],
            employee_costs: vec![0.0, 0.0, 32.4, 52.8, 93.3, 130.4, 165.0],
            bad_debt_provisions: vec![0.0, 0.0, 38.2, 78.5, 198.5, 142.8, 195.0],
        };

        let operational_data = OperationalData {
            year: vec![2018, 2019, 2020, 2021, 2022, 2023, 2024],
            users_millions: vec![0.5, 1.2, 3.0, 6.0, 12.0, 17.0, 17.0],
            active_users_millions: vec![0.2, 0.5, 1.2, 2.8, 6.5, 8.5, 6.8],
            merchants: vec![50, 200, 1000, 3000, 7500, 10000, 12000],
            npa_rate: vec![2.5, 3.5, 4.2, 5.0, 6.5, 6.8, 7.2],
            industry_npa: vec![1.5; 7],
            churn_rate: vec![15.0, 18.0, 20.0, 25.0, 30.0, 35.0, 40.0],
            nps_score: vec![65, 70, 75, 70, 65, 60, 55],
            app_rating: vec![4.2, 4.1, 3.9, 3.7, 3.4, 3.1, 2.9],
        };

        let opportunities = Opportunities {
            name: strings(&[
                "B2B Credit Infrastructure",
                "SME Lending Platform",
                "Credit Scoring APIs",
                "RegTech Solutions",
                "Open Banking APIs",
                "AI Risk Management",
            ]),
            tam_billions: vec![25.0, 195.0, 18.0, 12.0, 32.0, 28.0],
            capital_required: vec![20.0, 60.0, 12.0, 8.0, 35.0, 25.0],
            time_to_market: vec![15.0, 24.0, 10.0, 8.0, 24.0, 20.0],
            revenue_potential: vec![9.0, 8.0, 8.0, 7.0, 9.0, 8.0],
            risk_score: vec![4.0, 8.0, 3.0, 2.0, 5.0, 6.0],
            attractiveness: vec![7.8, 6.1, 7.5, 7.6, 7.4, 7.3],
        };

        let funding_data = FundingData {
            round: strings(&["Seed", "Series A", "Series B", "Series C", "Bridge", "Emergency"]),
            amount: vec![4.7, 22.0, 20.0, 50.0, 15.0, 8.5],
            year: vec![2016, 2017, 2019, 2021, 2022, 2023],
            valuation: vec![20.0, 85.0, 180.0, 435.0, 420.0, 380.0],
        };

        let market_data = MarketData {
            segment: strings(&[
                "Digital Payments",
                "SME Lending",
                "Credit APIs",
                "RegTech",
                "Open Banking",
                "AI Fintech",
            ]),
            size_billions: vec![85.0, 195.0, 18.0, 12.0, 32.0, 28.0],
            cagr: vec![45.0, 24.0, 32.0, 36.0, 52.0, 59.0],
            addressable_pct: vec![25.0, 55.0, 85.0, 70.0, 50.0, 35.0],
        };

        let customer_data = CustomerData {
            segment: strings(&[
                "Young Professionals",
                "Students",
                "SME Owners",
                "Freelancers",
                "Tech Workers",
                "Urban Salaried",
            ]),
            size_millions: vec![28.0, 22.0, 15.0, 12.0, 18.0, 65.0],
            avg_transaction: vec![25000.0, 18000.0, 45000.0, 22000.0, 48000.0, 35000.0],
            default_rate: vec![8.0, 15.0, 6.0, 12.0, 5.0, 7.0],
            ltv: vec![125000.0, 85000.0, 280000.0, 110000.0, 320000.0, 220000.0],
            cac: vec![3500.0, 2800.0, 5500.0, 4200.0, 4800.0, 3200.0],
            profitability: vec![8.0, 6.0, 9.0, 7.0, 10.0, 9.0],
        };

        let risk_data = RiskData {
            category: strings(&[
                "Credit Risk",
                "Regulatory Risk",
                "Market Risk",
                "Technology Risk",
                "Operational Risk",
                "Funding Risk",
            ]),
            probability: vec![9.0, 8.0, 7.0, 5.0, 6.0, 8.0],
            impact: vec![10.0, 9.0, 7.0, 6.0, 7.0, 9.0],
            mitigation_cost: vec![25.0, 12.0, 8.0, 15.0, 10.0, 35.0],
        };

        Self {
            financial_data,
            operational_data,
            opportunities,
            funding_data,
            market_data,
            customer_data,
            risk_data,
        }
    }

    /// All seven tables, in display order
    pub fn tables(&self) -> Vec<&dyn Table> {
        vec![
            &self.financial_data,
            &self.operational_data,
            &self.opportunities,
            &self.funding_data,
            &self.market_data,
            &self.customer_data,
            &self.risk_data,
        ]
    }

    /// Looks a table up by its short name
    pub fn table(&self, name: &str) -> Option<&dyn Table> {
        self.tables().into_iter().find(|t| t.name() == name)
    }

    /// Checks the equal-length invariant of every table
    pub fn validate(&self) -> DashboardResult<()> {
        for table in self.tables() {
            table.validate()?;
        }
        Ok(())
    }
}
