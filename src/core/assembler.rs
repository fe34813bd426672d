//! Match assembly: header, innings sections and the result, in reading order.

use crate::core::formatter::{FormatOptions, InningsFormatter};
use crate::core::header::build_header;
use crate::core::narrator::SchemaAssumptionError;
use crate::core::table::TableRenderer;
use crate::core::text::plural;
use crate::schema::record::{MatchRecord, Outcome};

/// The complete narrative for one match.
#[derive(Debug, Clone, Default)]
pub struct MatchNarrative {
    pub lines: Vec<String>,
    /// Placeholders substituted while narrating, in delivery order.
    pub gaps: Vec<SchemaAssumptionError>,
}

impl MatchNarrative {
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

pub fn assemble(
    record: &MatchRecord,
    options: &FormatOptions,
    renderer: &dyn TableRenderer,
) -> MatchNarrative {
    let mut lines = build_header(record, options.wrap_width);
    let mut gaps = Vec::new();
    let formatter = InningsFormatter::new(options, renderer);

    for (index, innings) in record.innings.iter().enumerate() {
        let block = formatter.format(index, innings, &record.info);
        lines.push(String::new());
        lines.push(String::new());
        lines.extend(block.lines);
        gaps.extend(block.gaps);
    }

    lines.push(String::new());
    lines.push(result_sentence(&record.info.outcome));
    if !record.info.player_of_match.is_empty() {
        lines.push(format!(
            "Player of the match: {}",
            record.info.player_of_match.join(", ")
        ));
    }

    MatchNarrative { lines, gaps }
}

/// One sentence describing how the match ended.
pub fn result_sentence(outcome: &Outcome) -> String {
    let method = outcome
        .method
        .as_deref()
        .map(|m| format!(" ({m})"))
        .unwrap_or_default();

    if let Some(winner) = &outcome.winner {
        let margin = outcome.by.as_ref().and_then(|by| {
            match (by.innings, by.runs, by.wickets) {
                (Some(_), Some(runs), _) => Some(format!("an innings and {}", plural(runs, "run"))),
                (_, Some(runs), _) => Some(plural(runs, "run")),
                (_, _, Some(wickets)) => Some(plural(wickets, "wicket")),
                _ => None,
            }
        });
        return match margin {
            Some(margin) => format!("{winner} won by {margin}{method}."),
            None => format!("{winner} won{method}."),
        };
    }

    match outcome.result.as_deref() {
        Some("tie") => {
            if let Some(team) = &outcome.eliminator {
                format!("Match tied, {team} won the Super Over{method}.")
            } else if let Some(team) = &outcome.bowl_out {
                format!("Match tied, {team} won the bowl-out{method}.")
            } else {
                format!("Match tied{method}.")
            }
        }
        Some("draw") => "Match drawn.".to_string(),
        Some("no result") => "No result.".to_string(),
        Some(other) => format!("Result: {other}{method}."),
        None => "Result unknown.".to_string(),
    }
}
