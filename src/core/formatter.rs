//! Over and innings formatting: threads the running score through every
//! delivery and lays the narration out over by over.

use rustc_hash::FxHashMap;

use crate::core::narrator::{display_name, narrate, recorded_name, SchemaAssumptionError};
use crate::core::table::{TableData, TableRenderer};
use crate::core::text::{plural, wrap_words};
use crate::schema::record::{DeliveryRecord, InningsRecord, MatchInfo, Powerplay, Wicket};
use crate::schema::score::RunningScore;

/// Width of the remarks column in the ball-by-ball grid.
const REMARKS_WIDTH: usize = 45;

/// What goes into each innings section besides the prose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Batting and bowling figures after each innings.
    pub scorecard: bool,
    /// A per-delivery grid after each innings.
    pub ball_by_ball_table: bool,
    /// Line width for the header's squad lists. Delivery prose is one line
    /// per ball and the grid's remarks column has its own fixed width.
    pub wrap_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            scorecard: true,
            ball_by_ball_table: false,
            wrap_width: 98,
        }
    }
}

/// One formatted innings.
#[derive(Debug, Clone, Default)]
pub struct InningsBlock {
    pub title: String,
    /// Every line of the section, title first.
    pub lines: Vec<String>,
    /// Score after the last delivery.
    pub score: RunningScore,
    pub gaps: Vec<SchemaAssumptionError>,
}

pub struct InningsFormatter<'a> {
    options: &'a FormatOptions,
    renderer: &'a dyn TableRenderer,
}

impl<'a> InningsFormatter<'a> {
    pub fn new(options: &'a FormatOptions, renderer: &'a dyn TableRenderer) -> Self {
        Self { options, renderer }
    }

    /// Format the `index`-th innings of a match.
    pub fn format(&self, index: usize, innings: &InningsRecord, info: &MatchInfo) -> InningsBlock {
        let balls_per_over = info.balls_per_over;
        let title = innings_title(index, innings, info.match_type.as_deref());
        let mut lines = vec![title.clone(), "-".repeat(title.chars().count())];
        lines.extend(preamble(innings));

        let mut score = RunningScore::default();
        let mut gaps = Vec::new();
        let mut scorecard = Scorecard::default();
        let mut grid = TableData::new(["Over", "Bowler", "Batter", "Ball", "Remarks"]);

        for over in &innings.overs {
            let number = over.over + 1;
            lines.push(String::new());
            lines.push(format!("Over {number}"));
            score = score.start_over();

            let mut previous: Option<(&str, &str)> = None;
            for (ball, delivery) in over.deliveries.iter().enumerate() {
                let (narration, next) = narrate(delivery, score);
                score = next;
                lines.push(narration.text());
                scorecard.record(delivery);

                if self.options.ball_by_ball_table {
                    let bowler = display_name(delivery.bowler.as_deref());
                    let batter = display_name(delivery.batter.as_deref());
                    let remarks = std::iter::once(narration.outcome.clone())
                        .chain(narration.asides.iter().cloned())
                        .collect::<Vec<_>>()
                        .join(" ");
                    grid.push_row([
                        if ball == 0 { number.to_string() } else { String::new() },
                        keep_if_changed(bowler, previous.map(|p| p.0)),
                        keep_if_changed(batter, previous.map(|p| p.1)),
                        (ball + 1).to_string(),
                        wrap_words(&remarks, REMARKS_WIDTH).join("\n"),
                    ]);
                    previous = Some((bowler, batter));
                }
                gaps.extend(narration.gaps);
            }

            lines.push(format!(
                "End of over {number}: {}, {}. Score: {score}",
                plural(score.over_runs, "run"),
                plural(score.over_wickets, "wicket"),
            ));
        }

        lines.push(String::new());
        lines.push(summary_line(innings, &score, balls_per_over));

        if self.options.scorecard && !scorecard.is_empty() {
            lines.push(String::new());
            lines.push(self.renderer.render(&scorecard.batting_table()));
            lines.push(String::new());
            lines.push(self.renderer.render(&scorecard.bowling_table(balls_per_over)));
        }
        if self.options.ball_by_ball_table && !grid.is_empty() {
            lines.push(String::new());
            lines.push(self.renderer.render(&grid));
        }

        InningsBlock {
            title,
            lines,
            score,
            gaps,
        }
    }
}

fn innings_title(index: usize, innings: &InningsRecord, match_type: Option<&str>) -> String {
    if innings.super_over {
        return format!("{} Super Over", innings.team);
    }
    match match_type {
        Some("Test" | "MDM") if index < 2 => format!("{} - 1st Innings", innings.team),
        Some("Test" | "MDM") => format!("{} - 2nd Innings", innings.team),
        _ => format!("{} Innings", innings.team),
    }
}

fn preamble(innings: &InningsRecord) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(target) = &innings.target {
        match (target.runs, target.overs) {
            (Some(runs), Some(overs)) => {
                lines.push(format!("Target: {} from {overs} overs", plural(runs, "run")))
            }
            (Some(runs), None) => lines.push(format!("Target: {}", plural(runs, "run"))),
            _ => {}
        }
    }
    for powerplay in &innings.powerplays {
        lines.push(powerplay_line(powerplay));
    }
    if !innings.absent_hurt.is_empty() {
        lines.push(format!("Absent hurt: {}", innings.absent_hurt.join(", ")));
    }
    if let Some(penalty) = &innings.penalty_runs {
        if let Some(pre) = penalty.pre.filter(|r| *r > 0) {
            lines.push(format!("Penalty runs awarded before the innings: {pre}"));
        }
        if let Some(post) = penalty.post.filter(|r| *r > 0) {
            lines.push(format!("Penalty runs awarded after the innings: {post}"));
        }
    }
    if innings.forfeited {
        lines.push("Innings forfeited.".to_string());
    }
    lines
}

fn powerplay_line(powerplay: &Powerplay) -> String {
    format!(
        "Powerplay ({}): {:.1} to {:.1}",
        powerplay.kind, powerplay.from, powerplay.to
    )
}

/// Innings total line. Penalty runs awarded outside any delivery count
/// towards the total shown here.
fn summary_line(innings: &InningsRecord, score: &RunningScore, balls_per_over: u32) -> String {
    let overs = score.overs(balls_per_over);
    let penalty = innings
        .penalty_runs
        .as_ref()
        .map_or(0, |p| p.pre.unwrap_or(0) + p.post.unwrap_or(0));
    let score = RunningScore {
        runs: score.runs + penalty,
        ..*score
    };
    if score.is_all_out() {
        format!("{} all out for {} ({overs} overs)", innings.team, score.runs)
    } else if innings.declared {
        format!("{} {score} declared ({overs} overs)", innings.team)
    } else {
        format!("{} {score} ({overs} overs)", innings.team)
    }
}

fn keep_if_changed(current: &str, previous: Option<&str>) -> String {
    if previous == Some(current) {
        String::new()
    } else {
        current.to_string()
    }
}

#[derive(Debug, Clone, Default)]
struct BattingFigures {
    name: String,
    runs: u32,
    balls: u32,
    fours: u32,
    sixes: u32,
    dismissal: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct BowlingFigures {
    name: String,
    legal_balls: u32,
    runs: u32,
    wickets: u32,
    wides: u32,
    noballs: u32,
}

/// Per-player figures, in order of first appearance.
#[derive(Debug, Default)]
struct Scorecard {
    batting: Vec<BattingFigures>,
    batting_index: FxHashMap<String, usize>,
    bowling: Vec<BowlingFigures>,
    bowling_index: FxHashMap<String, usize>,
}

impl Scorecard {
    fn is_empty(&self) -> bool {
        self.batting.is_empty() && self.bowling.is_empty()
    }

    fn batter(&mut self, name: &str) -> &mut BattingFigures {
        let next = self.batting.len();
        let idx = *self.batting_index.entry(name.to_string()).or_insert(next);
        if idx == next {
            self.batting.push(BattingFigures {
                name: name.to_string(),
                ..BattingFigures::default()
            });
        }
        &mut self.batting[idx]
    }

    fn bowler(&mut self, name: &str) -> &mut BowlingFigures {
        let next = self.bowling.len();
        let idx = *self.bowling_index.entry(name.to_string()).or_insert(next);
        if idx == next {
            self.bowling.push(BowlingFigures {
                name: name.to_string(),
                ..BowlingFigures::default()
            });
        }
        &mut self.bowling[idx]
    }

    fn record(&mut self, delivery: &DeliveryRecord) {
        let batter = display_name(delivery.batter.as_deref());
        let bowler = display_name(delivery.bowler.as_deref());
        let extras = delivery.extras.unwrap_or_default();
        let runs = delivery.runs;

        let figures = self.batter(batter);
        figures.runs += runs.batter;
        if extras.wides.is_none() {
            figures.balls += 1;
        }
        if runs.is_boundary() {
            match runs.batter {
                4 => figures.fours += 1,
                _ => figures.sixes += 1,
            }
        }
        if let Some(non_striker) = recorded_name(delivery.non_striker.as_deref()) {
            self.batter(non_striker);
        }

        let figures = self.bowler(bowler);
        figures.runs += runs.batter + extras.wides.unwrap_or(0) + extras.noballs.unwrap_or(0);
        figures.wides += extras.wides.unwrap_or(0);
        figures.noballs += extras.noballs.unwrap_or(0);
        if !extras.is_illegal() {
            figures.legal_balls += 1;
        }

        for wicket in &delivery.wickets {
            if wicket.credited_to_bowler() {
                self.bowler(bowler).wickets += 1;
            }
            let out = recorded_name(wicket.player_out.as_deref()).unwrap_or(batter);
            self.batter(out).dismissal = Some(dismissal_notation(wicket, bowler));
        }
    }

    fn batting_table(&self) -> TableData {
        let mut table = TableData::new(["Batter", "Dismissal", "Runs", "Balls", "4s", "6s"]);
        for b in &self.batting {
            table.push_row([
                b.name.clone(),
                b.dismissal.clone().unwrap_or_else(|| "not out".to_string()),
                b.runs.to_string(),
                b.balls.to_string(),
                b.fours.to_string(),
                b.sixes.to_string(),
            ]);
        }
        table
    }

    fn bowling_table(&self, balls_per_over: u32) -> TableData {
        let mut table = TableData::new(["Bowler", "Overs", "Runs", "Wickets", "Wides", "No-balls"]);
        for b in &self.bowling {
            let overs = RunningScore {
                legal_balls: b.legal_balls,
                ..RunningScore::default()
            }
            .overs(balls_per_over);
            table.push_row([
                b.name.clone(),
                overs,
                b.runs.to_string(),
                b.wickets.to_string(),
                b.wides.to_string(),
                b.noballs.to_string(),
            ]);
        }
        table
    }
}

/// Scorecard shorthand: `c Lee b Smith`, `lbw b Smith`, `run out (Lee)`.
fn dismissal_notation(wicket: &Wicket, bowler: &str) -> String {
    let fielder = display_name(wicket.fielders.first().and_then(|f| f.name.as_deref()));
    match wicket.kind.as_str() {
        "bowled" => format!("b {bowler}"),
        "caught" => format!("c {fielder} b {bowler}"),
        "caught and bowled" => format!("c & b {bowler}"),
        "lbw" => format!("lbw b {bowler}"),
        "stumped" => format!("st {fielder} b {bowler}"),
        "hit wicket" => format!("hit wicket b {bowler}"),
        "run out" if !wicket.fielders.is_empty() => format!("run out ({fielder})"),
        other => other.to_string(),
    }
}
