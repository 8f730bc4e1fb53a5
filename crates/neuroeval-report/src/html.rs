//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined and the
//! charts drawn as inline SVG.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use neuroeval_core::chart::{membership_curves, MembershipCurve};
use neuroeval_core::model::Category;
use neuroeval_core::registry::InputVariable;
use neuroeval_core::report::CohortReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn category_class(category: Category) -> &'static str {
    match category {
        Category::Excellent => "excellent",
        Category::Good => "good",
        Category::Average => "average",
        Category::Poor => "poor",
    }
}

fn category_color(category: Category) -> &'static str {
    match category {
        Category::Excellent => "#22c55e",
        Category::Good => "#3b82f6",
        Category::Average => "#eab308",
        Category::Poor => "#ef4444",
    }
}

/// Generate an HTML report from a cohort report.
pub fn generate_html(report: &CohortReport) -> String {
    let mut html = String::new();
    let stats = &report.stats;

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>neuroeval report: {}</title>\n",
        html_escape(&report.cohort.name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str("<h1>neuroeval report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Cohort: <strong>{}</strong> | {} of {} students | step {} | {}</p>\n",
        html_escape(&report.cohort.name),
        stats.count,
        report.cohort.student_count,
        report.resolution.step(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Mean</th><th>Median</th><th>Min</th><th>Max</th><th>Std dev</th></tr></thead>\n");
    html.push_str(&format!(
        "<tbody><tr><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td></tr></tbody>\n",
        stats.mean_score, stats.median_score, stats.min_score, stats.max_score, stats.std_dev
    ));
    html.push_str("</table>\n");

    html.push_str("<table class=\"summary\">\n<thead><tr>");
    for variable in InputVariable::ALL {
        html.push_str(&format!("<th>Mean {variable}</th>"));
    }
    html.push_str("</tr></thead>\n<tbody><tr>");
    for variable in InputVariable::ALL {
        let mean = stats.metric_means.get(&variable).copied().unwrap_or(0.0);
        html.push_str(&format!("<td>{mean:.1}</td>"));
    }
    html.push_str("</tr></tbody>\n</table>\n");

    html.push_str(&generate_category_chart(&stats.category_counts));
    html.push_str("</section>\n");

    // Per-student results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Results</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Student</th><th onclick=\"sortTable(1)\">Name</th><th onclick=\"sortTable(2)\">Attendance</th><th onclick=\"sortTable(3)\">Assignment</th><th onclick=\"sortTable(4)\">Exam</th><th onclick=\"sortTable(5)\">Participation</th><th onclick=\"sortTable(6)\">Score</th><th onclick=\"sortTable(7)\">Category</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for r in &report.results {
        let class = category_class(r.category());
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td class=\"{}\">{}</td></tr>\n",
            html_escape(&r.student_id),
            html_escape(&r.name),
            r.inputs.attendance,
            r.inputs.assignment,
            r.inputs.exam,
            r.inputs.participation,
            r.score(),
            class,
            r.category()
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Membership functions
    html.push_str("<section class=\"membership\">\n");
    html.push_str("<h2>Membership functions</h2>\n");
    for variable in InputVariable::ALL {
        let curves = membership_curves(variable.variable(), report.resolution);
        html.push_str(&format!("<h3>{variable}</h3>\n"));
        html.push_str(&generate_line_chart(&curves));
    }
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &CohortReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn generate_category_chart(counts: &BTreeMap<Category, usize>) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 120;

    let total: usize = counts.values().sum();
    let total_height = Category::ALL.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg class=\"categories\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 80,
        total_height
    );

    // Best category on top.
    for (i, category) in Category::ALL.iter().rev().enumerate() {
        let count = counts.get(category).copied().unwrap_or(0);
        let share = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        };
        let y = i * (bar_height + padding) + padding;
        let width = (share * max_width as f64) as usize;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            category
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width,
            y,
            width,
            bar_height,
            category_color(*category)
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{} ({:.1}%)</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            count,
            share * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CURVE_COLORS: [&str; 4] = ["#ef4444", "#eab308", "#3b82f6", "#22c55e"];

fn generate_line_chart(curves: &[MembershipCurve]) -> String {
    let width = 500.0;
    let height = 160.0;
    let margin = 30.0;
    let legend_width = 120.0;

    let to_x = |x: f64| margin + x / 100.0 * width;
    let to_y = |y: f64| margin + (1.0 - y) * height;

    let mut svg = format!(
        "<svg class=\"membership\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        width + 2.0 * margin + legend_width,
        height + 2.0 * margin
    );

    // Axes
    svg.push_str(&format!(
        "  <line x1=\"{0}\" y1=\"{1}\" x2=\"{2}\" y2=\"{1}\" stroke=\"currentColor\"/>\n",
        to_x(0.0),
        to_y(0.0),
        to_x(100.0)
    ));
    svg.push_str(&format!(
        "  <line x1=\"{0}\" y1=\"{1}\" x2=\"{0}\" y2=\"{2}\" stroke=\"currentColor\"/>\n",
        to_x(0.0),
        to_y(0.0),
        to_y(1.0)
    ));
    for tick in [0.0, 25.0, 50.0, 75.0, 100.0] {
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"10\" fill=\"currentColor\" text-anchor=\"middle\">{}</text>\n",
            to_x(tick),
            to_y(0.0) + 14.0,
            tick
        ));
    }

    for (i, curve) in curves.iter().enumerate() {
        let color = CURVE_COLORS[i % CURVE_COLORS.len()];
        let points: Vec<String> = curve
            .points
            .iter()
            .map(|p| format!("{:.1},{:.1}", to_x(p.x), to_y(p.y)))
            .collect();
        svg.push_str(&format!(
            "  <polyline fill=\"none\" stroke=\"{}\" stroke-width=\"2\" points=\"{}\"/>\n",
            color,
            points.join(" ")
        ));
        let legend_y = margin + i as f64 * 18.0;
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"12\" height=\"12\" fill=\"{}\"/>\n",
            width + margin + 20.0,
            legend_y,
            color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\">{}</text>\n",
            width + margin + 38.0,
            legend_y + 10.0,
            html_escape(&curve.term)
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --excellent: #dcfce7; --good: #dbeafe; --average: #fef9c3; --poor: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --excellent: #064e3b; --good: #1e3a8a; --average: #713f12; --poor: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.excellent { background: var(--excellent); }
.good { background: var(--good); }
.average { background: var(--average); }
.poor { background: var(--poor); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; display: block; }
"#;

// Numeric columns compare as numbers, the rest as text.
const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = !isNaN(na) && !isNaN(nb) ? na - nb : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
