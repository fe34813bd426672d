//! Typed Cricsheet match schema and the JSON loader.
//!
//! Only the fields the narrative uses are modelled; anything else in the
//! file is ignored by serde.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid match record: {0}")]
    Invalid(String),
}

/// One match file: metadata plus the ordered innings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub info: MatchInfo,
    pub innings: Vec<InningsRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchInfo {
    pub teams: Vec<String>,
    #[serde(default = "default_balls_per_over")]
    pub balls_per_over: u32,
    #[serde(default)]
    pub dates: Vec<String>,
    pub venue: Option<String>,
    pub city: Option<String>,
    pub gender: Option<String>,
    pub match_type: Option<String>,
    pub team_type: Option<String>,
    pub toss: Option<Toss>,
    #[serde(default)]
    pub outcome: Outcome,
    pub event: Option<MatchEvent>,
    pub officials: Option<Officials>,
    #[serde(default)]
    pub players: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub player_of_match: Vec<String>,
}

fn default_balls_per_over() -> u32 {
    6
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Toss {
    pub winner: Option<String>,
    pub decision: Option<String>,
    pub uncontested: Option<bool>,
}

/// Cricsheet writes some labels (event groups, match numbers) as either
/// strings or integers depending on the competition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(i64),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEvent {
    pub name: String,
    pub match_number: Option<Label>,
    pub group: Option<Label>,
    pub stage: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Officials {
    #[serde(default)]
    pub umpires: Vec<String>,
    #[serde(default)]
    pub tv_umpires: Vec<String>,
    #[serde(default)]
    pub match_referees: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Outcome {
    pub winner: Option<String>,
    pub by: Option<Margin>,
    pub result: Option<String>,
    pub method: Option<String>,
    pub eliminator: Option<String>,
    pub bowl_out: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Margin {
    pub runs: Option<u32>,
    pub wickets: Option<u32>,
    pub innings: Option<u32>,
}

/// One team's batting turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InningsRecord {
    pub team: String,
    #[serde(default)]
    pub overs: Vec<OverRecord>,
    pub target: Option<Target>,
    #[serde(default)]
    pub declared: bool,
    #[serde(default)]
    pub forfeited: bool,
    #[serde(default)]
    pub super_over: bool,
    #[serde(default)]
    pub absent_hurt: Vec<String>,
    pub penalty_runs: Option<PenaltyRuns>,
    #[serde(default)]
    pub powerplays: Vec<Powerplay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub runs: Option<u32>,
    pub overs: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PenaltyRuns {
    pub pre: Option<u32>,
    pub post: Option<u32>,
}

/// Powerplay window; `from`/`to` are `over.ball` decimals as Cricsheet writes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerplay {
    pub from: f64,
    pub to: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverRecord {
    /// Zero-based over number as stored in the file.
    pub over: u32,
    #[serde(default)]
    pub deliveries: Vec<DeliveryRecord>,
}

/// One ball bowled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub batter: Option<String>,
    pub bowler: Option<String>,
    pub non_striker: Option<String>,
    #[serde(default)]
    pub runs: Runs,
    pub extras: Option<Extras>,
    #[serde(default)]
    pub wickets: Vec<Wicket>,
    pub review: Option<Review>,
    pub replacements: Option<Replacements>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runs {
    #[serde(default)]
    pub batter: u32,
    #[serde(default)]
    pub extras: u32,
    #[serde(default)]
    pub total: u32,
    pub non_boundary: Option<bool>,
}

impl Runs {
    /// A four or six that actually crossed the rope.
    pub fn is_boundary(&self) -> bool {
        matches!(self.batter, 4 | 6) && self.non_boundary != Some(true)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    pub wides: Option<u32>,
    pub noballs: Option<u32>,
    pub byes: Option<u32>,
    pub legbyes: Option<u32>,
    pub penalty: Option<u32>,
}

impl Extras {
    /// Extra types in the order they are narrated, with their run counts.
    pub fn entries(&self) -> Vec<(ExtraKind, u32)> {
        [
            (ExtraKind::Wide, self.wides),
            (ExtraKind::NoBall, self.noballs),
            (ExtraKind::Bye, self.byes),
            (ExtraKind::LegBye, self.legbyes),
            (ExtraKind::Penalty, self.penalty),
        ]
        .into_iter()
        .filter_map(|(kind, runs)| runs.map(|r| (kind, r)))
        .collect()
    }

    pub fn total(&self) -> u32 {
        self.entries().iter().map(|(_, r)| r).sum()
    }

    /// Wides and no-balls have to be bowled again.
    pub fn is_illegal(&self) -> bool {
        self.wides.is_some() || self.noballs.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtraKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
    Penalty,
}

impl ExtraKind {
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Wide => "wide",
            Self::NoBall => "no-ball",
            Self::Bye => "bye",
            Self::LegBye => "leg-bye",
            Self::Penalty => "penalty run",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wicket {
    pub kind: String,
    pub player_out: Option<String>,
    #[serde(default)]
    pub fielders: Vec<Fielder>,
}

impl Wicket {
    /// Retirements are recorded as wickets but do not count against the total.
    pub fn counts_against_team(&self) -> bool {
        !matches!(self.kind.as_str(), "retired hurt" | "retired not out")
    }

    /// Dismissals that go into the bowler's figures.
    pub fn credited_to_bowler(&self) -> bool {
        matches!(
            self.kind.as_str(),
            "bowled" | "caught" | "caught and bowled" | "lbw" | "stumped" | "hit wicket"
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fielder {
    pub name: Option<String>,
    #[serde(default)]
    pub substitute: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub by: Option<String>,
    pub umpire: Option<String>,
    pub batter: Option<String>,
    pub decision: Option<String>,
}

impl Review {
    pub fn upheld(&self) -> bool {
        self.decision.as_deref() == Some("upheld")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Replacements {
    #[serde(default, rename = "match")]
    pub match_replacements: Vec<Replacement>,
    #[serde(default)]
    pub role: Vec<Replacement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replacement {
    #[serde(rename = "in")]
    pub player_in: String,
    #[serde(rename = "out")]
    pub player_out: Option<String>,
    pub reason: Option<String>,
    pub role: Option<String>,
    pub team: Option<String>,
}

impl MatchRecord {
    /// Load a match record from a Cricsheet JSON file.
    pub fn load_from_json(path: &Path) -> Result<MatchRecord, ParseError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_json(&contents)
    }

    /// Parse a match record from a JSON string and check the structure the
    /// narrative relies on.
    pub fn parse_json(input: &str) -> Result<MatchRecord, ParseError> {
        let record: MatchRecord = serde_json::from_str(input)?;
        record.validate()?;
        Ok(record)
    }

    fn validate(&self) -> Result<(), ParseError> {
        if self.info.teams.len() != 2 {
            return Err(ParseError::Invalid(format!(
                "expected two teams, found {}",
                self.info.teams.len()
            )));
        }
        if self.info.balls_per_over == 0 {
            return Err(ParseError::Invalid(
                "balls_per_over must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn home_team(&self) -> &str {
        &self.info.teams[0]
    }

    pub fn away_team(&self) -> &str {
        &self.info.teams[1]
    }

    /// The side fielding while `batting` is in.
    pub fn opponent_of(&self, batting: &str) -> &str {
        if batting == self.home_team() {
            self.away_team()
        } else {
            self.home_team()
        }
    }
}
