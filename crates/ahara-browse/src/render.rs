//! Plain-text and JSON output.

use ahara_seeker::{FacetCounts, Query, QueryResult, Record};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a table cell may grow before it is truncated.
const MAX_CELL_WIDTH: usize = 28;

/// Column separator.
const GUTTER: &str = "  ";

/// Everything one invocation produces.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub dataset: &'static str,
    pub query: &'a Query,
    #[serde(flatten)]
    pub result: QueryResult<'a, Record>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub facets: Vec<FacetCounts>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub compare: Vec<&'a Record>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored_compare: Vec<String>,
}

/// Serializes the report as pretty JSON.
pub fn to_json(report: &Report<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// Renders the report as text: results table, footer, facets, compare panel.
pub fn to_text(report: &Report<'_>, columns: &[&str]) -> String {
    let mut out = String::new();

    let headers: Vec<&str> = std::iter::once("id").chain(columns.iter().copied()).collect();
    let rows: Vec<Vec<String>> = report
        .result
        .items
        .iter()
        .map(|record| headers.iter().map(|field| record.display(field)).collect())
        .collect();

    if rows.is_empty() {
        out.push_str(&format!("No {} match.\n", report.dataset));
    } else {
        out.push_str(&table(&headers, &rows));
    }

    out.push_str(&footer(&report.result));

    for counts in &report.facets {
        out.push('\n');
        out.push_str(&facet_line(counts));
    }

    if !report.compare.is_empty() {
        out.push_str("\n\nCompare\n");
        let rows: Vec<Vec<String>> = columns
            .iter()
            .map(|field| {
                std::iter::once(field.to_string())
                    .chain(report.compare.iter().map(|record| record.display(field)))
                    .collect()
            })
            .collect();
        let headers: Vec<&str> = std::iter::once("")
            .chain(report.compare.iter().map(|record| record.id.as_str()))
            .collect();
        out.push_str(&table(&headers, &rows));
    }

    for id in &report.ignored_compare {
        out.push_str(&format!("\n(compare is full, skipped {})", id));
    }

    out.push('\n');
    out
}

fn footer(result: &QueryResult<'_, Record>) -> String {
    let pages = result.page_count().max(1);
    format!(
        "Showing {} (page {} of {})",
        result.range_label(),
        result.page.index.saturating_add(1),
        pages
    )
}

fn facet_line(counts: &FacetCounts) -> String {
    if counts.is_empty() {
        return format!("{}: (none)", counts.field());
    }
    let parts: Vec<String> = counts
        .iter()
        .map(|(value, n)| format!("{} ({})", value, n))
        .collect();
    format!("{}: {}", counts.field(), parts.join(", "))
}

/// Lays out rows under headers with left-aligned, width-capped columns.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
                .min(MAX_CELL_WIDTH)
        })
        .collect();

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    out.push_str(&line(&header_cells, &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(&rule, &widths));
    for row in rows {
        out.push_str(&line(row, &widths));
    }
    out
}

fn line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_right(&truncate_to_width(cell, *width), *width))
        .collect();
    let mut line = padded.join(GUTTER).trim_end().to_string();
    line.push('\n');
    line
}

/// Truncates to a display width, marking the cut with an ellipsis.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(pad))
}
