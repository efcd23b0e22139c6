/// Colours used by the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    // ── Page ─────────────────────────────────────────────────────────────────
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub dim: &'static str,

    // ── Status ───────────────────────────────────────────────────────────────
    pub accent: &'static str,
    pub error: &'static str,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Fill colours cycled across chart bars and slices.
    pub series: &'static [&'static str],
}

const SERIES: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#f4f6f9",
            card: "#ffffff",
            text: "#1d2733",
            dim: "#6b7785",
            accent: "#0b6efd",
            error: "red",
            series: SERIES,
        }
    }
}

impl Palette {
    /// Page stylesheet built from this palette.
    pub fn stylesheet(&self) -> String {
        format!(
            "body{{margin:0;font-family:sans-serif;background:{bg};color:{text}}}\
             header{{padding:16px 24px;background:{accent};color:#fff}}\
             .kpis{{display:flex;gap:16px;padding:16px 24px}}\
             .kpi{{background:{card};padding:16px;border-radius:8px;flex:1}}\
             .kpi span{{display:block;color:{dim}}}\
             .kpi strong{{font-size:1.8em}}\
             .downloads{{padding:0 24px;display:flex;gap:12px}}\
             .downloads a{{color:{accent}}}\
             .charts{{display:grid;grid-template-columns:repeat(auto-fit,minmax(420px,1fr));gap:16px;padding:16px 24px}}\
             .card{{background:{card};padding:16px;border-radius:8px}}",
            bg = self.background,
            text = self.text,
            accent = self.accent,
            card = self.card,
            dim = self.dim,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_has_ten_series_colours() {
        // One colour per bar of a top-10 chart.
        assert_eq!(Palette::default().series.len(), 10);
    }

    #[test]
    fn test_stylesheet_uses_palette_colours() {
        let palette = Palette::default();
        let css = palette.stylesheet();
        assert!(css.contains(palette.background));
        assert!(css.contains(palette.accent));
        assert!(css.contains(palette.card));
    }
}
