//! HTML rendering for the dashboard page.
//!
//! Charts are drawn client-side with Chart.js; the metrics are embedded as a
//! JSON document the page script reads on load.

use std::fmt::Write;

use dashboard_core::models::{DashboardMetrics, FrequencyEntry, MonthlyCount};
use serde::Serialize;

use crate::palette::Palette;

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js";

/// Labels and values in the parallel-array shape Chart.js expects.
#[derive(Debug, Serialize, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

impl ChartSeries {
    fn from_frequencies(entries: &[FrequencyEntry]) -> Self {
        Self {
            labels: entries.iter().map(|e| e.label.clone()).collect(),
            values: entries.iter().map(|e| e.count).collect(),
        }
    }

    fn from_timeline(points: &[MonthlyCount]) -> Self {
        Self {
            labels: points.iter().map(|p| p.month.clone()).collect(),
            values: points.iter().map(|p| p.count).collect(),
        }
    }
}

/// Everything the page script consumes.
#[derive(Debug, Serialize)]
struct ChartData {
    medicos: ChartSeries,
    exames: ChartSeries,
    origem: ChartSeries,
    prioridade: ChartSeries,
    cids: ChartSeries,
    timeline: ChartSeries,
    colors: &'static [&'static str],
}

/// One chart card on the page: canvas id, title and chart type.
const CHARTS: &[(&str, &str, &str)] = &[
    ("timeline", "Atendimentos por mês", "line"),
    ("medicos", "Top 10 médicos solicitantes", "bar"),
    ("exames", "Top 10 exames", "bar"),
    ("cids", "Top 10 diagnósticos (CID)", "bar"),
    ("origem", "Origem do paciente", "doughnut"),
    ("prioridade", "Prioridade de atendimento", "pie"),
];

/// Download links: URL segment and button text.
const DOWNLOADS: &[(&str, &str)] = &[
    ("medicos", "Relatório de médicos"),
    ("exames", "Relatório de exames"),
    ("cids", "Relatório de CIDs"),
    ("geral", "Base completa"),
];

/// Render the full dashboard page.
pub fn render_dashboard(metrics: &DashboardMetrics) -> String {
    let palette = Palette::default();
    let data = ChartData {
        medicos: ChartSeries::from_frequencies(&metrics.physicians),
        exames: ChartSeries::from_frequencies(&metrics.exams),
        origem: ChartSeries::from_frequencies(&metrics.origins),
        prioridade: ChartSeries::from_frequencies(&metrics.priorities),
        cids: ChartSeries::from_frequencies(&metrics.diagnoses),
        timeline: ChartSeries::from_timeline(&metrics.timeline),
        colors: palette.series,
    };

    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"pt-BR\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"utf-8\">");
    let _ = writeln!(out, "<title>Dashboard de Atendimentos</title>");
    let _ = writeln!(out, "<script src=\"{}\"></script>", CHART_JS_URL);
    let _ = writeln!(out, "<style>{}</style>", palette.stylesheet());
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "<header><h1>Dashboard de Atendimentos</h1></header>");

    let _ = writeln!(out, "<section class=\"kpis\">");
    let _ = writeln!(
        out,
        "<div class=\"kpi\"><span>Total de exames</span><strong id=\"kpi-total\">{}</strong></div>",
        metrics.total_records
    );
    let _ = writeln!(
        out,
        "<div class=\"kpi\"><span>Faturamento</span><strong id=\"kpi-revenue\">{}</strong></div>",
        escape_html(&metrics.total_revenue)
    );
    let _ = writeln!(out, "</section>");

    let _ = writeln!(out, "<nav class=\"downloads\">");
    for (slug, text) in DOWNLOADS {
        let _ = writeln!(out, "<a href=\"/download/{}\">{}</a>", slug, text);
    }
    let _ = writeln!(out, "</nav>");

    let _ = writeln!(out, "<section class=\"charts\">");
    for (id, title, _) in CHARTS {
        let _ = writeln!(
            out,
            "<div class=\"card\"><h2>{}</h2><canvas id=\"chart-{}\"></canvas></div>",
            title, id
        );
    }
    let _ = writeln!(out, "</section>");

    let _ = writeln!(
        out,
        "<script id=\"dashboard-data\" type=\"application/json\">{}</script>",
        script_safe_json(&data)
    );
    let _ = writeln!(out, "<script>{}</script>", chart_script());
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");

    out
}

/// Render the inline failure page shown when the pipeline fails.
pub fn render_error(message: &str) -> String {
    let palette = Palette::default();
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head><meta charset=\"utf-8\"><title>Erro</title></head>\n<body>\n<div style=\"color:{}\"><h1>Erro:</h1><p>{}</p></div>\n</body>\n</html>\n",
        palette.error,
        escape_html(message)
    )
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn chart_script() -> String {
    let mut script = String::from(
        "const data = JSON.parse(document.getElementById('dashboard-data').textContent);\n",
    );
    for (id, _, kind) in CHARTS {
        let _ = writeln!(
            script,
            "new Chart(document.getElementById('chart-{id}'), {{ type: '{kind}', data: {{ labels: data.{id}.labels, datasets: [{{ data: data.{id}.values, backgroundColor: data.colors }}] }}, options: {{ plugins: {{ legend: {{ display: {legend} }} }} }} }});",
            id = id,
            kind = kind,
            legend = matches!(*kind, "pie" | "doughnut"),
        );
    }
    script
}

/// Serialise `value` so it can sit inside a `<script>` element.
fn script_safe_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}

/// Escape the five HTML-significant characters.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

// ── Tests ─────────────────────────────────────────────────────────────────────
