//! Delivery narration: one ball in, one sentence and the next score out.

use thiserror::Error;

use crate::core::text::{humanize, plural};
use crate::schema::record::{DeliveryRecord, Extras, Review, Wicket};
use crate::schema::score::RunningScore;

/// Stand-in for any name the record leaves out.
pub const PLACEHOLDER: &str = "Unknown";

/// A field the narrator needed but the record did not carry. Recovered by
/// substituting [`PLACEHOLDER`]; reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaAssumptionError {
    #[error("delivery is missing `{field}`, narrated as \"Unknown\"")]
    MissingField { field: &'static str },
}

/// Everything said about one delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Narration {
    /// `"<bowler> to <batter>, <outcome>"`.
    pub sentence: String,
    /// The sentence without its `"<bowler> to <batter>, "` lead-in.
    pub outcome: String,
    /// Review and substitution notes that follow the main sentence.
    pub asides: Vec<String>,
    pub gaps: Vec<SchemaAssumptionError>,
}

impl Narration {
    /// Sentence and asides as one line of prose.
    pub fn text(&self) -> String {
        std::iter::once(self.sentence.as_str())
            .chain(self.asides.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Narrate `delivery` given the score before it was bowled.
pub fn narrate(delivery: &DeliveryRecord, before: RunningScore) -> (Narration, RunningScore) {
    let mut gaps = Vec::new();
    let bowler = name_or_placeholder(delivery.bowler.as_deref(), "bowler", &mut gaps);
    let batter = name_or_placeholder(delivery.batter.as_deref(), "batter", &mut gaps);

    let mut clauses = Vec::new();
    let bat = delivery.runs.batter;

    let extra = match delivery.extras {
        Some(extras) if extras.total() > 0 || extras.is_illegal() => Some(extras_clause(&extras)),
        Some(_) => None,
        // Only the summed figure is present, with no breakdown by kind.
        None if delivery.runs.extras > 0 => Some(plural(delivery.runs.extras, "extra")),
        None => None,
    };

    match extra {
        Some(extra) => {
            clauses.push(extra);
            if bat > 0 {
                clauses.push(format!("{} off the bat", plural(bat, "run")));
            }
        }
        None if !delivery.wickets.is_empty() => {
            if bat > 0 {
                clauses.push(plural(bat, "run"));
            }
        }
        None => clauses.push(runs_clause(delivery)),
    }

    for wicket in &delivery.wickets {
        clauses.push(dismissal_clause(wicket, batter, &mut gaps));
    }

    let mut outcome = clauses.join(", ");
    if !outcome.ends_with('!') {
        outcome.push('.');
    }
    let sentence = format!("{bowler} to {batter}, {outcome}");

    let mut asides = Vec::new();
    if let Some(review) = &delivery.review {
        asides.push(review_note(review, !delivery.wickets.is_empty(), batter));
    }
    if let Some(replacements) = &delivery.replacements {
        for r in &replacements.match_replacements {
            asides.push(format!(
                "{} replaces {}{}.",
                r.player_in,
                r.player_out.as_deref().unwrap_or(PLACEHOLDER),
                reason_suffix(r.reason.as_deref()),
            ));
        }
        for r in &replacements.role {
            let role = r.role.as_deref().map(humanize).unwrap_or_else(|| "player".to_string());
            asides.push(match r.player_out.as_deref() {
                Some(out) => format!(
                    "{} replaces {out} as {role}{}.",
                    r.player_in,
                    reason_suffix(r.reason.as_deref())
                ),
                None => format!(
                    "{} takes over as {role}{}.",
                    r.player_in,
                    reason_suffix(r.reason.as_deref())
                ),
            });
        }
    }

    let narration = Narration {
        sentence,
        outcome,
        asides,
        gaps,
    };
    (narration, before.after(delivery))
}

/// A recorded name, trimmed; `None` when absent or blank.
pub fn recorded_name(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}

/// A recorded name, or [`PLACEHOLDER`] when absent or blank.
pub fn display_name(name: Option<&str>) -> &str {
    recorded_name(name).unwrap_or(PLACEHOLDER)
}

fn name_or_placeholder<'a>(
    name: Option<&'a str>,
    field: &'static str,
    gaps: &mut Vec<SchemaAssumptionError>,
) -> &'a str {
    recorded_name(name).unwrap_or_else(|| {
        gaps.push(SchemaAssumptionError::MissingField { field });
        PLACEHOLDER
    })
}

fn runs_clause(delivery: &DeliveryRecord) -> String {
    let runs = delivery.runs;
    if runs.is_boundary() {
        return if runs.batter == 6 {
            "SIX runs!".to_string()
        } else {
            "FOUR runs!".to_string()
        };
    }
    match runs.batter {
        0 => "no run".to_string(),
        n => plural(n, "run"),
    }
}

fn extras_clause(extras: &Extras) -> String {
    extras
        .entries()
        .into_iter()
        .map(|(kind, runs)| plural(runs, kind.singular()))
        .collect::<Vec<_>>()
        .join(" and ")
}

fn dismissal_clause(
    wicket: &Wicket,
    striker: &str,
    gaps: &mut Vec<SchemaAssumptionError>,
) -> String {
    let out = match recorded_name(wicket.player_out.as_deref()) {
        Some(name) => name,
        None => {
            gaps.push(SchemaAssumptionError::MissingField {
                field: "wickets.player_out",
            });
            striker
        }
    };
    let fielders = wicket
        .fielders
        .iter()
        .map(|f| {
            let name = display_name(f.name.as_deref());
            if f.substitute {
                format!("{name} (sub)")
            } else {
                name.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" and ");

    match (wicket.kind.as_str(), fielders.is_empty()) {
        ("caught", false) => format!("{out} caught by {fielders}!"),
        ("run out", false) => format!("{out} run out by {fielders}!"),
        ("stumped", false) => format!("{out} stumped by {fielders}!"),
        (kind, true) => format!("{out} {kind}!"),
        (kind, false) => format!("{out} {kind}, {fielders}!"),
    }
}

fn review_note(review: &Review, wicket_fell: bool, striker: &str) -> String {
    let by = review.by.as_deref().unwrap_or(PLACEHOLDER);
    match (wicket_fell, review.upheld()) {
        (true, true) => format!("Review by {by} upheld."),
        (true, false) => format!("Review by {by} struck down, the decision stands."),
        (false, true) => format!(
            "{} was given out, overturned on review by {by}.",
            review.batter.as_deref().unwrap_or(striker)
        ),
        (false, false) => format!("Review by {by} for a dismissal struck down."),
    }
}

fn reason_suffix(reason: Option<&str>) -> String {
    reason
        .map(|r| format!(" ({})", humanize(r)))
        .unwrap_or_default()
}
