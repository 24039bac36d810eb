use std::fmt::Write;

use crate::data::Analytics;
use crate::panels::{self, Block, ChartSlot, KpiCard, NoteCard, NoteItem, Panel, Tab};
use crate::theme;

const PAGE_TEMPLATE: &str = include_str!("./static/index.html");

/// Escapes text for use in element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders the full page with `initial` as the selected tab
///
/// The template's `{{kpis}}`, `{{tabs}}` and `{{content}}` markers are
/// replaced with the header cards, the tab bar and the selected panel.
pub fn render_page(analytics: &Analytics, initial: Tab) -> String {
    let kpis: String = panels::header_kpis(analytics)
        .iter()
        .map(|card| format!("<div class=\"col-md-2\">{}</div>", header_card(card)))
        .collect();

    let tabs: String = Tab::ALL
        .iter()
        .map(|tab| {
            let selected = if *tab == initial {
                " custom-tab--selected"
            } else {
                ""
            };
            format!(
                "<button class=\"custom-tab{}\" data-tab=\"{}\">{}</button>",
                selected,
                tab.slug(),
                escape(tab.label())
            )
        })
        .collect();

    let content = render_panel(&panels::build(initial, analytics));

    PAGE_TEMPLATE
        .replace("{{kpis}}", &kpis)
        .replace("{{tabs}}", &tabs)
        .replace("{{content}}", &content)
}

/// Renders one tab's panel as an HTML fragment
pub fn render_panel(panel: &Panel) -> String {
    let mut html = format!("<div class=\"tab-panel\" data-tab=\"{}\">", panel.tab.slug());

    for row in &panel.rows {
        html.push_str("<div class=\"row mb-4\">");
        for cell in row {
            let _ = write!(html, "<div class=\"col-md-{}\">", cell.width);
            match &cell.block {
                Block::Kpi(card) => html.push_str(&panel_card(card)),
                Block::Chart(slot) => html.push_str(&chart_slot(slot)),
                Block::Note(card) => html.push_str(&note_card(card)),
            }
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}

fn header_card(card: &KpiCard) -> String {
    format!(
        "<div class=\"card kpi-card\"><div class=\"card-body\">\
         <h3 style=\"color: {}\">{}</h3>\
         <p class=\"kpi-title\">{}</p>\
         </div></div>",
        card.color.hex(),
        escape(&card.value),
        escape(&card.title)
    )
}

fn panel_card(card: &KpiCard) -> String {
    let caption = card
        .caption
        .as_deref()
        .map(|c| format!("<p class=\"kpi-caption\">{}</p>", escape(c)))
        .unwrap_or_default();

    format!(
        "<div class=\"card kpi-card\"><div class=\"card-body\">\
         <h5 style=\"color: {}\">{}</h5>\
         <h3 style=\"color: {}\">{}</h3>{}\
         </div></div>",
        theme::PRIMARY.hex(),
        escape(&card.title),
        card.color.hex(),
        escape(&card.value),
        caption
    )
}

fn chart_slot(slot: &ChartSlot) -> String {
    format!(
        "<div class=\"chart-container\" data-chart=\"{id}\">\
         <h4>{title}</h4>\
         <img class=\"chart\" alt=\"{title}\" loading=\"lazy\" \
         src=\"/api/charts/{id}/svg?height={height}&amp;caption=false\">\
         </div>",
        id = slot.chart.slug(),
        title = escape(&slot.title),
        height = slot.height
    )
}

fn note_card(card: &NoteCard) -> String {
    let mut body = String::new();
    for item in &card.items {
        match item {
            NoteItem::Check { text } => {
                let _ = write!(
                    body,
                    "<div class=\"note-check\"><span style=\"color: {}\">✓</span>{}</div>",
                    theme::SUCCESS.hex(),
                    escape(text)
                );
            }
            NoteItem::Heading { text, color } => match color {
                Some(color) => {
                    let _ = write!(
                        body,
                        "<h6 style=\"color: {}\">{}</h6>",
                        color.hex(),
                        escape(text)
                    );
                }
                None => {
                    let _ = write!(body, "<h6>{}</h6>", escape(text));
                }
            },
            NoteItem::Paragraph { text } => {
                let _ = write!(body, "<p>{}</p>", escape(text));
            }
            NoteItem::List { items } => {
                body.push_str("<ul>");
                for entry in items {
                    let _ = write!(body, "<li>{}</li>", escape(entry));
                }
                body.push_str("</ul>");
            }
            NoteItem::Rule => body.push_str("<hr>"),
        }
    }

    format!(
        "<div class=\"card note-card h-100\">\
         <div class=\"card-header\"><h5 style=\"color: {}\">{}</h5></div>\
         <div class=\"card-body\">{}</div></div>",
        card.accent.hex(),
        escape(&card.header),
        body
    )
}
