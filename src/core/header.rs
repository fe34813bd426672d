//! Match header: title, event, venue, dates, toss, squads and officials.

use chrono::NaiveDate;

use crate::core::narrator::PLACEHOLDER;
use crate::core::text::{capitalize, wrap_list};
use crate::schema::record::{MatchEvent, MatchInfo, MatchRecord, Officials};

/// Build the header lines for a match.
pub fn build_header(record: &MatchRecord, wrap_width: usize) -> Vec<String> {
    let info = &record.info;
    let mut lines = vec![format!(
        "{} vs {}",
        record.home_team().to_uppercase(),
        record.away_team().to_uppercase()
    )];

    if let Some(event) = &info.event {
        lines.push(event_line(event));
    }

    lines.push(String::new());
    lines.push(venue_line(info));
    lines.push(format!("Date: {}", date_range(&info.dates)));
    if let Some(description) = format_line(info) {
        lines.push(description);
    }

    lines.push(String::new());
    lines.push(toss_line(info));

    for team in &info.teams {
        if let Some(players) = info.players.get(team).filter(|p| !p.is_empty()) {
            lines.push(String::new());
            lines.push(team.to_uppercase());
            lines.extend(wrap_list(players, wrap_width));
        }
    }

    if let Some(officials) = &info.officials {
        let official_lines = officials_lines(officials);
        if !official_lines.is_empty() {
            lines.push(String::new());
            lines.extend(official_lines);
        }
    }

    lines
}

fn event_line(event: &MatchEvent) -> String {
    let mut line = event.name.clone();
    if let Some(number) = &event.match_number {
        line.push_str(&format!(", match {number}"));
    }
    if let Some(group) = &event.group {
        line.push_str(&format!(", Group: {group}"));
    }
    if let Some(stage) = &event.stage {
        line.push_str(&format!(", Stage: {stage}"));
    }
    line
}

fn venue_line(info: &MatchInfo) -> String {
    let venue = info.venue.as_deref().unwrap_or(PLACEHOLDER);
    match info.city.as_deref() {
        Some(city) if !venue.contains(city) => format!("Venue: {venue}, {city}"),
        _ => format!("Venue: {venue}"),
    }
}

/// `2023-11-19` → `19 November 2023`; anything unparseable is shown as-is.
pub fn long_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%d %B %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn date_range(dates: &[String]) -> String {
    match dates {
        [] => PLACEHOLDER.to_string(),
        [only] => long_date(only),
        [first, .., last] => format!("{} to {}", long_date(first), long_date(last)),
    }
}

fn format_line(info: &MatchInfo) -> Option<String> {
    let match_type = info.match_type.as_deref()?;
    let mut line = String::from("Match: ");
    if let Some(team_type) = &info.team_type {
        line.push_str(&capitalize(team_type));
        line.push(' ');
    }
    line.push_str(match_type);
    if let Some(gender) = &info.gender {
        line.push_str(&format!(" ({gender})"));
    }
    Some(line)
}

fn toss_line(info: &MatchInfo) -> String {
    let Some(toss) = &info.toss else {
        return format!("Toss: {PLACEHOLDER}");
    };
    let winner = toss.winner.as_deref().unwrap_or(PLACEHOLDER);
    let mut line = match toss.decision.as_deref() {
        Some(decision) => format!("{winner} won the toss and elected to {decision}."),
        None => format!("{winner} won the toss."),
    };
    if toss.uncontested == Some(true) {
        line.push_str(" (uncontested)");
    }
    line
}

fn officials_lines(officials: &Officials) -> Vec<String> {
    [
        ("Umpires", &officials.umpires),
        ("TV umpire", &officials.tv_umpires),
        ("Match referee", &officials.match_referees),
    ]
    .into_iter()
    .filter(|(_, names)| !names.is_empty())
    .map(|(label, names)| format!("{label}: {}", names.join(", ")))
    .collect()
}
