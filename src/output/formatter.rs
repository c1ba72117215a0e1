use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::color::{hex_to_rgb, OpacityClass, SwatchSet};
use crate::metrics::{CelebMatch, Difficulty};
use crate::scoring::{FactorContribution, ScoredProduct};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a match score: whole numbers without decimals ("85"),
/// fractional ones with one decimal ("72.5")
pub fn format_score(score: f64) -> String {
    let rounded = (score * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        format!("{:.1}", rounded)
    }
}

/// Signed points for breakdown lines ("+25", "-4", "+7.5")
fn format_points(points: f64) -> String {
    let formatted = format_score(points.abs());
    if points < 0.0 {
        format!("-{}", formatted)
    } else {
        format!("+{}", formatted)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a product name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format recommendations as a ranked table: Index, Score, Category, Name.
/// With `explain`, each row is followed by its factor breakdown.
pub fn format_recommendations(
    products: &[ScoredProduct],
    use_colors: bool,
    explain: bool,
) -> String {
    if products.is_empty() {
        return "No matching products found.".to_string();
    }

    let term_width = get_terminal_width();

    // Index column: 3 chars ("99."), score: 5 chars ("100.0"),
    // category: widest category in the list
    let index_width = 3;
    let score_width = 5;
    let separator = "  ";
    let category_width = products
        .iter()
        .map(|p| p.category().chars().count())
        .max()
        .unwrap_or(0);

    products
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_padded =
                format!("{:>width$}", format_score(scored.match_score), width = score_width);
            let category_padded =
                format!("{:<width$}", scored.category(), width = category_width);

            let fixed_width = index_width + 1 + score_width + category_width + separator.len() * 2;
            let display_name = scored.product.display_name();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&display_name, width - fixed_width)
                }
                // Very narrow terminal
                Some(_) => truncate_name(&display_name, 20),
                // No terminal (pipe), don't truncate
                None => display_name,
            };

            let mut row = if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    category_padded.cyan(),
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, category_padded, separator, name
                )
            };

            if explain {
                if let Some(breakdown) = &scored.breakdown {
                    for factor in &breakdown.factors {
                        row.push('\n');
                        row.push_str(&format_factor(factor, use_colors));
                    }
                }
            }
            row
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_factor(factor: &FactorContribution, use_colors: bool) -> String {
    let points = format!("{:>4}", format_points(factor.points));
    let points = if !use_colors {
        points
    } else if factor.points < 0.0 {
        points.red().to_string()
    } else if factor.points > 0.0 {
        points.green().to_string()
    } else {
        points.dimmed().to_string()
    };
    format!("      {:<11} {}  {}", factor.label, points, factor.description)
}

/// Format recommendations as tab-separated values for scripting
/// Columns: score, id, category, name (no headers, no colors)
pub fn format_tsv(products: &[ScoredProduct]) -> String {
    products
        .iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{}",
                format_score(scored.match_score),
                scored.product.id,
                scored.category(),
                scored.product.display_name()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A two-space block painted with the hex color, or nothing if it won't parse
fn color_chip(hex: &str) -> String {
    match hex_to_rgb(hex) {
        Ok(rgb) => {
            let [r, g, b] = rgb.channels().map(|c| c.round().clamp(0.0, 255.0) as u8);
            format!("{} ", "  ".on_truecolor(r, g, b))
        }
        Err(_) => String::new(),
    }
}

/// One rendered color per line, with a chip when colors are enabled
pub fn format_rendered(hex: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}{}", color_chip(hex), hex)
    } else {
        hex.to_string()
    }
}

/// Format a swatch set as one line per coverage tier
pub fn format_swatch_set(set: &SwatchSet, use_colors: bool) -> String {
    OpacityClass::ALL
        .iter()
        .map(|&class| {
            let hex = set.get(class);
            let label = format!("{:<8}", class.as_str());
            if use_colors {
                format!("{}{}{}", label.bold(), color_chip(hex), hex)
            } else {
                format!("{}{}", label, hex)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a celeb comparison: header, per-metric gaps, then suggestions
pub fn format_gap_report(report: &CelebMatch, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let header = format!("{} ({}% match)", report.celeb_name, report.match_rate);
    let difficulty = format!("difficulty: {}", report.difficulty.as_str());
    if use_colors {
        let difficulty = match report.difficulty {
            Difficulty::Easy => difficulty.green().to_string(),
            Difficulty::Moderate => difficulty.yellow().to_string(),
            Difficulty::Challenging => difficulty.red().to_string(),
        };
        lines.push(format!("{}  {}", header.bold(), difficulty));
    } else {
        lines.push(format!("{}  {}", header, difficulty));
    }

    if let Some(look) = &report.signature_look {
        lines.push(format!("  Look: {}", look));
    }

    for gap in &report.per_metric_gap {
        lines.push(format!(
            "  {:<15} you {:>5}  them {:>5}  gap {:>6}",
            gap.metric,
            format_score(gap.user_value),
            format_score(gap.celeb_value),
            format_points(gap.gap)
        ));
    }
    lines.push(format!("  Average gap: {}", format_score(report.average_gap)));

    if !report.solutions.is_empty() {
        lines.push("Suggestions:".to_string());
        for solution in &report.solutions {
            lines.push(format!("  - {}", solution));
        }
    }

    lines.join("\n")
}
