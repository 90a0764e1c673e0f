//! Text tables for the dashboard views.

use std::collections::BTreeSet;

use crate::views::{ComparisonProfile, ComparisonSide, ComparisonView, CorrelationView, MapView, TrendView};

/// Widest bar drawn next to a map entry.
pub const BAR_WIDTH: usize = 30;

pub const ICON: char = '●';

/// Ranked country table with a proportional bar per entry.
pub fn format_map(view: &MapView, top: Option<usize>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}), {}\n",
        view.kind.title(),
        view.kind.unit(),
        view.year
    ));
    if let (Some(min), Some(max)) = (view.min(), view.max()) {
        out.push_str(&format!(
            "Countries: {} | range=[{min:.2}, {max:.2}]\n\n",
            view.entries.len()
        ));
    }

    out.push_str(format!("{:>4} {:<4} {:<24} {:>10}", "rank", "code", "country", "value").trim_end());
    out.push('\n');
    out.push_str(format!("{:-<4} {:-<4} {:-<24} {:-<10}", "", "", "", "").trim_end());
    out.push('\n');

    let max = view.max().unwrap_or(0.0);
    let limit = top.unwrap_or(usize::MAX);
    for e in view.entries.iter().take(limit) {
        out.push_str(
            format!(
                "{:>4} {:<4} {:<24} {:>10.2} {}",
                e.rank,
                e.code.unwrap_or(""),
                truncate(&e.country, 24),
                e.value,
                bar(e.value, max)
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Country-by-year table; `-` marks a missing year.
pub fn format_trend_table(view: &TrendView) -> String {
    let years: BTreeSet<i32> = view
        .series
        .iter()
        .flat_map(|s| s.points.iter().map(|p| p.0))
        .collect();

    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", view.kind.title(), view.kind.unit()));

    let mut header = format!("{:<24}", "country");
    for y in &years {
        header.push_str(&format!(" {y:>8}"));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for s in &view.series {
        let mut line = format!("{:<24}", truncate(&s.country, 24));
        for y in &years {
            match s.points.iter().find(|p| p.0 == *y) {
                Some(&(_, v)) => line.push_str(&format!(" {v:>8.2}")),
                None => line.push_str(&format!(" {:>8}", "-")),
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Fit summary followed by the joined points.
pub fn format_correlation(view: &CorrelationView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} vs {}, {}\n",
        view.y_kind.title(),
        view.x_kind.title(),
        view.year
    ));
    if let Some(region) = view.region {
        out.push_str(&format!("Highlighted: {} (*)\n", region.display_name()));
    }
    match view.fit {
        Some(fit) => out.push_str(&format!(
            "OLS: y = {:.4} + {:.4}x | R²={:.3} | n={}\n",
            fit.intercept, fit.slope, fit.r_squared, fit.n
        )),
        None => out.push_str(&format!(
            "OLS: not enough variation to fit a line (n={})\n",
            view.points.len()
        )),
    }
    out.push('\n');

    out.push_str(
        format!(
            "  {:<4} {:<24} {:>12} {:>12}",
            "code",
            "country",
            short_unit(view.x_kind.unit()),
            short_unit(view.y_kind.unit())
        )
        .trim_end(),
    );
    out.push('\n');
    for p in &view.points {
        let mark = if p.highlighted { '*' } else { ' ' };
        out.push_str(
            format!(
                "{mark} {:<4} {:<24} {:>12.2} {:>12.2}",
                p.code.unwrap_or(""),
                truncate(&p.country, 24),
                p.x,
                p.y
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Two pictogram rows, one icon per five percentage points.
pub fn format_comparison(view: &ComparisonView) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({}), {}\n",
        view.kind.title(),
        view.kind.unit(),
        view.year
    ));
    out.push_str(&comparison_line(&view.a));
    out.push_str(&comparison_line(&view.b));
    out
}

/// One pictogram block per indicator, blank line between blocks.
pub fn format_comparison_profile(profile: &ComparisonProfile) -> String {
    let mut out = format!(
        "{} vs {}, {}\n",
        profile.country_a, profile.country_b, profile.year
    );
    for row in &profile.rows {
        out.push('\n');
        out.push_str(&format!("{} ({})\n", row.kind.title(), row.kind.unit()));
        out.push_str(&comparison_line(&row.a));
        out.push_str(&comparison_line(&row.b));
    }
    out
}

fn comparison_line(side: &ComparisonSide) -> String {
    let value = side
        .value
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "n/a".to_string());
    let icons: String = std::iter::repeat_n(ICON, side.icons).collect();
    format!("{:<24} {:>8} {icons}", truncate(&side.country, 24), value)
        .trim_end()
        .to_string()
        + "\n"
}

fn bar(value: f64, max: f64) -> String {
    if max <= 0.0 || !value.is_finite() || value <= 0.0 {
        return String::new();
    }
    let n = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(n.min(BAR_WIDTH))
}

fn short_unit(unit: &str) -> &str {
    match unit {
        "EUR per capita" => "EUR/cap",
        other => other,
    }
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
