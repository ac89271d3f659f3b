use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::compare::LeagueAverages;
use crate::stats::{PlayerStatRow, StatField};

const HEIGHT: f64 = 600.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 180.0;
const MIN_WIDTH: f64 = 800.0;
const BAND_WIDTH: f64 = 26.0;
const Y_TICKS: usize = 5;

const FALLBACK_COLORS: &[&str] = &["#667eea", "#ff8c00", "#2ecc71", "#e74c3c", "#9b59b6"];

pub fn chart_color(field: StatField) -> &'static str {
    match field {
        StatField::Points => "skyblue",
        StatField::Rebounds => "lightgreen",
        StatField::Assists => "salmon",
        StatField::Games => FALLBACK_COLORS[0],
        StatField::Minutes => FALLBACK_COLORS[1],
        StatField::Steals => FALLBACK_COLORS[2],
        StatField::Blocks => FALLBACK_COLORS[3],
    }
}

pub fn chart_file_name(field: StatField) -> String {
    format!("{}_chart.svg", field.key())
}

/// One chart per stat that at least one player carries. Returns the files
/// written, in canonical stat order.
pub fn render_document_charts(players: &[PlayerStatRow], out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    let labels = players.iter().map(|p| p.player.as_str()).collect::<Vec<_>>();
    let mut written = Vec::new();
    for field in StatField::ALL {
        if players.iter().all(|p| p.get(field).is_none()) {
            continue;
        }
        let values = players
            .iter()
            .map(|p| p.get(field).unwrap_or(0.0))
            .collect::<Vec<_>>();
        let svg = render_bar_chart(
            &format!("{} by Player", field.label()),
            field.label(),
            &labels,
            &values,
            chart_color(field),
        );
        let path = out_dir.join(chart_file_name(field));
        fs::write(&path, svg).with_context(|| format!("write {}", path.display()))?;
        debug!(path = %path.display(), "chart written");
        written.push(path);
    }
    Ok(written)
}

pub fn render_bar_chart(
    title: &str,
    y_label: &str,
    labels: &[&str],
    values: &[f64],
    color: &str,
) -> String {
    let n = labels.len().min(values.len());
    let width = chart_width(n);
    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let y_max = nice_ceiling(values[..n].iter().copied().fold(0.0, f64::max));

    let mut svg = String::new();
    open_svg(&mut svg, width, title);
    draw_y_axis(&mut svg, width, y_max, y_label);

    let band = if n == 0 { plot_w } else { plot_w / n as f64 };
    let bar_w = band * 0.8;
    let base_y = MARGIN_TOP + plot_h;
    for (i, (label, value)) in labels.iter().zip(values).take(n).enumerate() {
        let h = (value.max(0.0) / y_max) * plot_h;
        let x = MARGIN_LEFT + band * i as f64 + (band - bar_w) / 2.0;
        let _ = writeln!(
            svg,
            "  <rect x='{x:.1}' y='{:.1}' width='{bar_w:.1}' height='{h:.1}' fill='{color}'><title>{}: {value}</title></rect>",
            base_y - h,
            escape_xml(label)
        );
        draw_x_label(&mut svg, MARGIN_LEFT + band * (i as f64 + 0.5), base_y, label);
    }

    close_svg(&mut svg);
    svg
}

/// Grouped bars for points, rebounds and assists, one series per league.
pub fn render_league_comparison(
    primary_label: &str,
    primary: &LeagueAverages,
    other_label: &str,
    other: &LeagueAverages,
) -> String {
    let categories = ["Points", "Rebounds", "Assists"];
    let series = [
        (
            primary_label,
            [primary.points, primary.rebounds, primary.assists],
            FALLBACK_COLORS[0],
        ),
        (
            other_label,
            [other.points, other.rebounds, other.assists],
            FALLBACK_COLORS[1],
        ),
    ];

    let width = MIN_WIDTH;
    let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let y_max = nice_ceiling(
        series
            .iter()
            .flat_map(|(_, values, _)| values.iter().copied())
            .fold(0.0, f64::max),
    );

    let mut svg = String::new();
    open_svg(&mut svg, width, "League Averages");
    draw_y_axis(&mut svg, width, y_max, "Per game");

    let band = plot_w / categories.len() as f64;
    let bar_w = band * 0.8 / series.len() as f64;
    let base_y = MARGIN_TOP + plot_h;
    for (ci, category) in categories.iter().enumerate() {
        let group_x = MARGIN_LEFT + band * ci as f64 + band * 0.1;
        for (si, (name, values, color)) in series.iter().enumerate() {
            let value = values[ci];
            let h = (value.max(0.0) / y_max) * plot_h;
            let x = group_x + bar_w * si as f64;
            let _ = writeln!(
                svg,
                "  <rect x='{x:.1}' y='{:.1}' width='{bar_w:.1}' height='{h:.1}' fill='{color}'><title>{}: {value:.2}</title></rect>",
                base_y - h,
                escape_xml(name)
            );
        }
        let _ = writeln!(
            svg,
            "  <text x='{:.1}' y='{:.1}' text-anchor='middle' font-size='13'>{category}</text>",
            MARGIN_LEFT + band * (ci as f64 + 0.5),
            base_y + 20.0
        );
    }

    for (si, (name, _, color)) in series.iter().enumerate() {
        let y = MARGIN_TOP - 30.0 + 16.0 * si as f64;
        let _ = writeln!(
            svg,
            "  <rect x='{:.1}' y='{:.1}' width='12' height='12' fill='{color}'/>",
            width - MARGIN_RIGHT - 160.0,
            y - 10.0
        );
        let _ = writeln!(
            svg,
            "  <text x='{:.1}' y='{y:.1}' font-size='12'>{}</text>",
            width - MARGIN_RIGHT - 142.0,
            escape_xml(name)
        );
    }

    close_svg(&mut svg);
    svg
}

fn chart_width(bars: usize) -> f64 {
    (MARGIN_LEFT + MARGIN_RIGHT + BAND_WIDTH * bars as f64).max(MIN_WIDTH)
}

fn open_svg(svg: &mut String, width: f64, title: &str) {
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width:.0}' height='{HEIGHT:.0}' viewBox='0 0 {width:.0} {HEIGHT:.0}' role='img' font-family='sans-serif'>"
    );
    let _ = writeln!(svg, "  <rect width='100%' height='100%' fill='white'/>");
    let _ = writeln!(
        svg,
        "  <text x='{:.1}' y='32' text-anchor='middle' font-size='20' font-weight='bold'>{}</text>",
        width / 2.0,
        escape_xml(title)
    );
}

fn close_svg(svg: &mut String) {
    let _ = writeln!(svg, "</svg>");
}

fn draw_y_axis(svg: &mut String, width: f64, y_max: f64, y_label: &str) {
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let base_y = MARGIN_TOP + plot_h;
    for tick in 0..=Y_TICKS {
        let value = y_max * tick as f64 / Y_TICKS as f64;
        let y = base_y - plot_h * tick as f64 / Y_TICKS as f64;
        let _ = writeln!(
            svg,
            "  <line x1='{MARGIN_LEFT:.1}' y1='{y:.1}' x2='{:.1}' y2='{y:.1}' stroke='#e5e5e5'/>",
            width - MARGIN_RIGHT
        );
        let _ = writeln!(
            svg,
            "  <text x='{:.1}' y='{:.1}' text-anchor='end' font-size='11'>{}</text>",
            MARGIN_LEFT - 6.0,
            y + 4.0,
            format_tick(value)
        );
    }
    let _ = writeln!(
        svg,
        "  <line x1='{MARGIN_LEFT:.1}' y1='{MARGIN_TOP:.1}' x2='{MARGIN_LEFT:.1}' y2='{base_y:.1}' stroke='#333'/>"
    );
    let _ = writeln!(
        svg,
        "  <line x1='{MARGIN_LEFT:.1}' y1='{base_y:.1}' x2='{:.1}' y2='{base_y:.1}' stroke='#333'/>",
        width - MARGIN_RIGHT
    );
    let mid_y = MARGIN_TOP + plot_h / 2.0;
    let _ = writeln!(
        svg,
        "  <text x='20' y='{mid_y:.1}' text-anchor='middle' font-size='13' transform='rotate(-90 20 {mid_y:.1})'>{}</text>",
        escape_xml(y_label)
    );
}

// Rotated 90 degrees so long names stay legible.
fn draw_x_label(svg: &mut String, x: f64, base_y: f64, label: &str) {
    let y = base_y + 8.0;
    let _ = writeln!(
        svg,
        "  <text x='{x:.1}' y='{y:.1}' text-anchor='end' dominant-baseline='middle' font-size='11' transform='rotate(-90 {x:.1} {y:.1})'>{}</text>",
        escape_xml(label)
    );
}

/// Smallest 1, 2 or 5 times a power of ten at or above `v`.
fn nice_ceiling(v: f64) -> f64 {
    if !v.is_finite() || v <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(v.log10().floor());
    let scaled = v / magnitude;
    let step = if scaled <= 1.0 {
        1.0
    } else if scaled <= 2.0 {
        2.0
    } else if scaled <= 5.0 {
        5.0
    } else {
        10.0
    };
    step * magnitude
}

fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
