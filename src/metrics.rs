use serde::Serialize;

use crate::data::Analytics;

/// Divides two values, treating a zero denominator as a zero result
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Elementwise `numerators[i] / denominators[i]`
///
/// The output is as long as the shorter input.
pub fn ratio_series(numerators: &[f64], denominators: &[f64]) -> Vec<f64> {
    numerators
        .iter()
        .zip(denominators)
        .map(|(n, d)| ratio(*n, *d))
        .collect()
}

/// Share of active users in percent, per year
pub fn engagement_rate(active: &[f64], total: &[f64]) -> Vec<f64> {
    ratio_series(active, total)
        .into_iter()
        .map(|r| r * 100.0)
        .collect()
}

/// Lifetime value over acquisition cost, per segment
pub fn ltv_cac_ratio(ltv: &[f64], cac: &[f64]) -> Vec<f64> {
    ratio_series(ltv, cac)
}

/// `size[i] * pct[i] / 100`
pub fn addressable_market(size: &[f64], pct: &[f64]) -> Vec<f64> {
    size.iter().zip(pct).map(|(s, p)| s * p / 100.0).collect()
}

/// Multiplies every value by `factor`; used for bubble sizes
pub fn scaled(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|v| v * factor).collect()
}

pub fn last(values: &[f64]) -> f64 {
    values.last().copied().unwrap_or_default()
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or_default()
}

/// Indices of `values` sorted by descending value, stable for ties
pub fn rank_descending(values: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|a, b| values[*b].total_cmp(&values[*a]));
    order
}

/// Headline numbers shown above the tabs
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Kpis {
    /// Σ loss_cr, ₹ crores
    pub total_losses: f64,
    /// max valuation, $ millions
    pub peak_valuation: f64,
    pub current_revenue: f64,
    pub current_users: f64,
    /// Latest NPA rate over the industry benchmark
    pub npa_multiple: f64,
    pub revenue_growth: f64,
}

/// One slice of the latest-year expense split
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpenseShare {
    pub label: &'static str,
    pub amount: f64,
}

impl Analytics {
    pub fn kpis(&self) -> Kpis {
        let fin = &self.financial_data;
        let ops = &self.operational_data;

        Kpis {
            total_losses: fin.loss_cr.iter().sum(),
            peak_valuation: max(&self.funding_data.valuation),
            current_revenue: last(&fin.revenue_cr),
            current_users: last(&ops.users_millions),
            npa_multiple: ratio(last(&ops.npa_rate), last(&ops.industry_npa)),
            revenue_growth: last(&fin.growth_rate),
        }
    }

    pub fn engagement_rate(&self) -> Vec<f64> {
        let ops = &self.operational_data;
        engagement_rate(&ops.active_users_millions, &ops.users_millions)
    }

    /// NPA rate over the industry benchmark, per year
    pub fn npa_multiples(&self) -> Vec<f64> {
        let ops = &self.operational_data;
        ratio_series(&ops.npa_rate, &ops.industry_npa)
    }

    pub fn ltv_cac_ratio(&self) -> Vec<f64> {
        ltv_cac_ratio(&self.customer_data.ltv, &self.customer_data.cac)
    }

    pub fn addressable_market(&self) -> Vec<f64> {
        addressable_market(
            &self.market_data.size_billions,
            &self.market_data.addressable_pct,
        )
    }

    /// Latest-year expenses split into marketing, staff, bad debt and the rest
    pub fn expense_breakdown(&self) -> Vec<ExpenseShare> {
        let fin = &self.financial_data;
        let marketing = last(&fin.marketing_expenses);
        let employees = last(&fin.employee_costs);
        let bad_debt = last(&fin.bad_debt_provisions);
        let other = (last(&fin.expenses_cr) - marketing - employees - bad_debt).max(0.0);

        vec![
            ExpenseShare { label: "Marketing", amount: marketing },
            ExpenseShare { label: "Employee Costs", amount: employees },
            ExpenseShare { label: "Bad Debt", amount: bad_debt },
            ExpenseShare { label: "Other", amount: other },
        ]
    }

    /// Opportunity indices, most attractive first
    pub fn top_opportunities(&self, n: usize) -> Vec<usize> {
        rank_descending(&self.opportunities.attractiveness)
            .into_iter()
            .take(n)
            .collect()
    }

    /// Customer segment indices, highest lifetime value first
    pub fn top_segments_by_ltv(&self, n: usize) -> Vec<usize> {
        rank_descending(&self.customer_data.ltv)
            .into_iter()
            .take(n)
            .collect()
    }
}

/// Formatting helpers for KPI and label text
pub mod format {
    /// `₹1560Cr`
    pub fn crores(v: f64) -> String {
        format!("₹{:.0}Cr", v)
    }

    /// `$435M`
    pub fn usd_millions(v: f64) -> String {
        format!("${}M", trim(v))
    }

    /// `$25B`
    pub fn usd_billions(v: f64) -> String {
        format!("${}B", trim(v))
    }

    /// `17.0M`
    pub fn millions(v: f64) -> String {
        format!("{:.1}M", v)
    }

    /// `4.8x`
    pub fn multiple(v: f64) -> String {
        format!("{:.1}x", v)
    }

    /// `31.3%`
    pub fn percent(v: f64) -> String {
        format!("{:.1}%", v)
    }

    /// `₹3.2L` (lakhs)
    pub fn lakhs(v: f64) -> String {
        format!("₹{:.1}L", v / 100_000.0)
    }

    /// `12,000`
    pub fn thousands(v: u64) -> String {
        let digits = v.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }

    /// Whole numbers print without a fractional part: `22`, `4.7`
    pub fn trim(v: f64) -> String {
        if v.fract() == 0.0 {
            format!("{:.0}", v)
        } else {
            format!("{}", v)
        }
    }
}
