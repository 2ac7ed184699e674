/*
    This module turns computed sets into text for the terminal
*/

use itertools::Itertools;

use crate::analysis::{Lookahead, Row};

const HEADERS: [&str; 3] = ["Non-Terminal", "FIRST Set", "FOLLOW Set"];

pub fn format_set<'a>(set: impl IntoIterator<Item = &'a Lookahead>) -> String {
    let members = set.into_iter().join(", ");
    if members.is_empty() {
        "{ }".to_string()
    } else {
        format!("{{ {} }}", members)
    }
}

fn border(widths: &[usize; 3], left: char, middle: char, right: char) -> String {
    let segments = widths.iter().map(|w| "─".repeat(w + 2)).join(&middle.to_string());
    format!("{}{}{}", left, segments, right)
}

fn table_line(cells: &[String; 3], widths: &[usize; 3]) -> String {
    let padded = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!(" {:<width$} ", cell, width = width))
        .join("│");
    format!("│{}│", padded)
}

/// Boxed table with one line per nonterminal. Columns grow to fit the
/// widest cell.
pub fn table<'a>(rows: impl IntoIterator<Item = Row<'a>>) -> String {
    let cells = rows
        .into_iter()
        .map(|row| [row.nonterminal.to_string(), format_set(row.first), format_set(row.follow)])
        .collect_vec();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![
        border(&widths, '┌', '┬', '┐'),
        table_line(&HEADERS.map(str::to_string), &widths),
        border(&widths, '├', '┼', '┤'),
    ];
    lines.extend(cells.iter().map(|line| table_line(line, &widths)));
    lines.push(border(&widths, '└', '┴', '┘'));

    lines.join("\n")
}

/// `FIRST(A) = { ... }` and `FOLLOW(A) = { ... }` lines, easy to grep.
pub fn plain<'a>(rows: impl IntoIterator<Item = Row<'a>>) -> String {
    rows.into_iter()
        .flat_map(|row| {
            [
                format!("FIRST({}) = {}", row.nonterminal, format_set(row.first)),
                format!("FOLLOW({}) = {}", row.nonterminal, format_set(row.follow)),
            ]
        })
        .join("\n")
}
