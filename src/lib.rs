/*!
# ZestMoney Strategic Intelligence Platform

A single-page analytics dashboard for the ZestMoney business case, served from Rust.

## Overview

The dashboard presents a fixed, literal dataset (financials, operations, funding,
market segments, customer segments, risks and strategic opportunities) as
twenty-one charts and a set of KPI and note cards, spread over seven tabbed views:
Executive Dashboard, Financial Analysis, Operational Metrics, Strategic Opportunities,
Customer Intelligence, Market Analysis and Risk Assessment.

## Architecture

### Data Layer
- **data**: The seven literal tables, each a struct of parallel columns, exposed
  through the `Table` trait for validation and export
- **metrics**: Derived series (engagement rate, LTV/CAC, addressable market,
  NPA multiple), the headline KPIs and display formatting

### Presentation Layer
- **theme**: Brand palette and continuous colour scales
- **charts**: One declarative `ChartSpec` per chart id
- **graph**: SVG/PNG rendering of chart specs with plotters
- **panels**: Per-tab layouts of KPI cards, chart slots and note cards
- **html**: Page and tab fragment markup

### Serving Layer
- **app**: axum router, chart image endpoints and exports
- **export**: CSV and XLSX export of the tables
- **config**: Environment-driven server configuration
- **error**: The crate-wide error type

## REST API Endpoints

- `/` - Full page with the Executive Dashboard selected
- `/api/tabs/{tab}` - HTML fragment for one tab
- `/api/tabs/{tab}/layout` - Tab layout as JSON
- `/api/kpis`, `/api/data` - KPIs and raw tables as JSON
- `/api/charts`, `/api/charts/{chart}` - Chart list and chart specs as JSON
- `/api/charts/{chart}/svg`, `/api/charts/{chart}/png` - Rendered charts
- `/api/export/{table}`, `/api/export.xlsx` - CSV and XLSX downloads
*/

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod html;
pub mod metrics;
pub mod panels;
pub mod theme;

#[cfg(feature = "web")]
pub mod app;
#[cfg(feature = "web")]
pub mod graph;

pub use charts::{ChartId, ChartSpec};
pub use data::{Analytics, Table};
pub use error::{DashboardError, DashboardResult};
pub use panels::{Panel, Tab};
