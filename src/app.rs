use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::charts::{self, ChartId};
use crate::config::ServerConfig;
use crate::data::Analytics;
use crate::error::{DashboardError, DashboardResult};
use crate::export;
use crate::graph::{self, RenderOptions};
use crate::html;
use crate::panels::{self, Tab};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Shared, read-only state handed to every handler
pub struct AppState {
    analytics: Analytics,
}

impl AppState {
    pub fn new(analytics: Analytics) -> Self {
        Self { analytics }
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }
}

/// Optional size and caption overrides for chart images
#[derive(Debug, Default, Deserialize)]
pub struct RenderQuery {
    width: Option<u32>,
    height: Option<u32>,
    caption: Option<bool>,
}

impl RenderQuery {
    fn options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            show_caption: self.caption.unwrap_or(defaults.show_caption),
        }
    }
}

/// Builds the dashboard router
///
/// # Arguments
/// * `state` - The shared dataset
/// * `static_dir` - Directory served under `/static`
///
/// # Returns
/// * A `Router` with every page, fragment, chart and export route attached
pub fn router(state: Arc<AppState>, static_dir: impl Into<PathBuf>) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/api/tabs/:tab", get(get_tab))
        .route("/api/tabs/:tab/layout", get(get_tab_layout))
        .route("/api/kpis", get(get_kpis))
        .route("/api/data", get(get_data))
        .route("/api/charts", get(list_charts))
        .route("/api/charts/:chart", get(get_chart))
        .route("/api/charts/:chart/svg", get(get_chart_svg))
        .route("/api/charts/:chart/png", get(get_chart_png))
        .route("/api/export/:table", get(export_table))
        .route("/api/export.xlsx", get(export_workbook))
        .nest_service("/static", ServeDir::new(static_dir.into()))
        .with_state(state)
}

/// Serves the dashboard until the listener fails
///
/// # Arguments
/// * `config` - Bind address, debug flag and static directory
/// * `analytics` - The validated dataset
pub async fn run(
    config: ServerConfig,
    analytics: Analytics,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(analytics));
    let app = router(state, config.static_dir.clone());

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    if config.debug {
        log::info!(
            "Debug mode: open http://127.0.0.1:{}/ in a browser",
            config.port
        );
        log::debug!("Serving static files from {}", config.static_dir.display());
    }

    axum::serve(listener, app).await?;

    Ok(())
}

async fn serve_index(State(state): State<Arc<AppState>>) -> Html<String> {
    log::debug!("GET /");
    Html(html::render_page(state.analytics(), Tab::Dashboard))
}

/// Unknown tabs fall back to the dashboard view
fn resolve_tab(slug: &str) -> Tab {
    let tab = Tab::resolve(slug);
    if tab.slug() != slug {
        log::warn!("Unknown tab '{}', showing {}", slug, tab);
    }
    tab
}

async fn get_tab(Path(tab): Path<String>, State(state): State<Arc<AppState>>) -> Html<String> {
    let tab = resolve_tab(&tab);
    log::debug!("Rendering tab {}", tab);
    let panel = panels::build(tab, state.analytics());
    Html(html::render_panel(&panel))
}

async fn get_tab_layout(
    Path(tab): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let tab = resolve_tab(&tab);
    Json(panels::build(tab, state.analytics()))
}

async fn get_kpis(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let analytics = state.analytics();
    Json(serde_json::json!({
        "values": analytics.kpis(),
        "cards": panels::header_kpis(analytics),
    }))
}

async fn get_data(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.analytics().clone())
}

async fn list_charts() -> impl IntoResponse {
    let charts: Vec<_> = ChartId::ALL
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id.slug(),
                "title": id.title(),
            })
        })
        .collect();
    Json(charts)
}

async fn get_chart(
    Path(chart): Path<String>,
    State(state): State<Arc<AppState>>,
) -> DashboardResult<impl IntoResponse> {
    let id: ChartId = chart.parse()?;
    Ok(Json(charts::build(id, state.analytics())))
}

async fn get_chart_svg(
    Path(chart): Path<String>,
    Query(query): Query<RenderQuery>,
    State(state): State<Arc<AppState>>,
) -> DashboardResult<Response> {
    let id: ChartId = chart.parse()?;
    let options = query.options();
    options.validate()?;
    log::debug!("Rendering {} as SVG at {}x{}", id, options.width, options.height);

    let svg = graph::render_svg(&charts::build(id, state.analytics()), &options)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

async fn get_chart_png(
    Path(chart): Path<String>,
    Query(query): Query<RenderQuery>,
    State(state): State<Arc<AppState>>,
) -> DashboardResult<Response> {
    let id: ChartId = chart.parse()?;
    let options = query.options();
    options.validate()?;
    log::debug!("Rendering {} as PNG at {}x{}", id, options.width, options.height);

    let png = graph::render_png(&charts::build(id, state.analytics()), &options)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

async fn export_table(
    Path(table): Path<String>,
    State(state): State<Arc<AppState>>,
) -> DashboardResult<Response> {
    let name = table.strip_suffix(".csv").unwrap_or(&table);
    let found = state
        .analytics()
        .table(name)
        .ok_or_else(|| DashboardError::UnknownTable(name.to_string()))?;

    let disposition = format!("attachment; filename=\"{}.csv\"", found.name());
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export::to_csv(found),
    )
        .into_response())
}

async fn export_workbook(State(state): State<Arc<AppState>>) -> DashboardResult<Response> {
    let workbook = export::to_xlsx(state.analytics())?;
    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"zestmoney_analytics.xlsx\"",
            ),
        ],
        workbook,
    )
        .into_response())
}
