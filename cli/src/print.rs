//! Code for printing [`Block`]s to the terminal.

use colored::Colorize;
use itertools::Itertools;
use touchframe::{row::CallMarker, Block, CallType, Row};

/// Formats every [`Row`] of `block` (including the starting row) on its own line, followed by
/// a one-line summary.
pub(crate) fn block_string(block: &Block, colour: bool) -> String {
    let rows = block
        .rows()
        .iter()
        .enumerate()
        .map(|(idx, row)| row_string(idx, row, colour))
        .join("\n");
    format!("{}\n{}", rows, summary_string(block))
}

/// Formats one [`Row`] as `<index> <call> <bells><*> <place notation> <annotation>`.  Lead ends
/// are printed in bold and calls are coloured by their type.
pub(crate) fn row_string(idx: usize, row: &Row, colour: bool) -> String {
    let call = match row.call() {
        Some(marker) => {
            let symbol = marker.symbol().to_string();
            match (colour, marker) {
                (false, _) => symbol,
                (true, CallMarker::Call(CallType::Bob)) => symbol.yellow().bold().to_string(),
                (true, CallMarker::Call(CallType::Single)) => symbol.red().bold().to_string(),
                (true, CallMarker::CallChange(_)) => symbol.cyan().bold().to_string(),
            }
        }
        None => " ".to_owned(),
    };
    let bells = match (colour, row.is_lead_end()) {
        (true, true) => row.to_string().bold().to_string(),
        _ => row.to_string(),
    };
    let lead_end = if row.is_lead_end() { '*' } else { ' ' };

    let mut s = format!("{:>5} {} {}{}", idx, call, bells, lead_end);
    if !row.place_not().is_empty() {
        s.push(' ');
        s.push_str(row.place_not());
    }
    if !row.annotation().is_empty() {
        let annotation = match colour {
            true => row.annotation().dimmed().to_string(),
            false => row.annotation().to_owned(),
        };
        s.push_str("  ");
        s.push_str(&annotation);
    }
    s.trim_end().to_owned()
}

/// A line like `40 rows (2 calls), came round`.
pub(crate) fn summary_string(block: &Block) -> String {
    let num_calls = block
        .changes()
        .iter()
        .filter(|r| matches!(r.call(), Some(CallMarker::Call(_))))
        .count();
    let ending = if block.came_round() {
        "came round".to_owned()
    } else {
        format!("ended on {}", block.last_row())
    };
    format!(
        "{} rows ({} call{}), {}",
        block.len(),
        num_calls,
        if num_calls == 1 { "" } else { "s" },
        ending
    )
}
