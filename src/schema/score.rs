use std::fmt;

use super::record::DeliveryRecord;

/// Most wickets an innings can lose.
pub const MAX_WICKETS: u32 = 10;

/// Score state threaded through an innings, one delivery at a time.
///
/// Values are replaced, never mutated in place: every delivery produces the
/// next score from the previous one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunningScore {
    pub runs: u32,
    pub wickets: u32,
    /// Legal deliveries faced in the innings so far.
    pub legal_balls: u32,
    pub over_runs: u32,
    pub over_wickets: u32,
    pub over_legal_balls: u32,
}

impl RunningScore {
    /// The same innings totals with a fresh over tally.
    pub fn start_over(self) -> Self {
        Self {
            over_runs: 0,
            over_wickets: 0,
            over_legal_balls: 0,
            ..self
        }
    }

    /// The score after `delivery` has been bowled.
    pub fn after(self, delivery: &DeliveryRecord) -> Self {
        let extras = delivery.extras.map(|e| e.total()).unwrap_or(delivery.runs.extras);
        let runs = delivery.runs.batter + extras;
        let fallen = delivery
            .wickets
            .iter()
            .filter(|w| w.counts_against_team())
            .count() as u32;
        let legal = delivery.extras.map_or(true, |e| !e.is_illegal());
        let wickets = (self.wickets + fallen).min(MAX_WICKETS);

        Self {
            runs: self.runs + runs,
            wickets,
            legal_balls: self.legal_balls + u32::from(legal),
            over_runs: self.over_runs + runs,
            over_wickets: self.over_wickets + wickets.saturating_sub(self.wickets),
            over_legal_balls: self.over_legal_balls + u32::from(legal),
        }
    }

    pub fn is_all_out(&self) -> bool {
        self.wickets >= MAX_WICKETS
    }

    /// Overs faced in `overs.balls` notation, e.g. `19.4`.
    pub fn overs(&self, balls_per_over: u32) -> String {
        let per_over = balls_per_over.max(1);
        format!("{}.{}", self.legal_balls / per_over, self.legal_balls % per_over)
    }
}

impl fmt::Display for RunningScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.runs, self.wickets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::record::{Extras, Runs, Wicket};

    fn make_delivery(batter_runs: u32, extras: Option<Extras>) -> DeliveryRecord {
        let extra_runs = extras.map(|e| e.total()).unwrap_or(0);
        DeliveryRecord {
            batter: Some("Jones".to_string()),
            bowler: Some("Smith".to_string()),
            runs: Runs {
                batter: batter_runs,
                extras: extra_runs,
                total: batter_runs + extra_runs,
                non_boundary: None,
            },
            extras,
            ..DeliveryRecord::default()
        }
    }

    #[test]
    fn legal_delivery_advances_ball_count() {
        let score = RunningScore::default().after(&make_delivery(2, None));
        assert_eq!(score.runs, 2);
        assert_eq!(score.legal_balls, 1);
        assert_eq!(score.over_legal_balls, 1);
    }

    #[test]
    fn wides_and_no_balls_are_rebowled() {
        let wide = make_delivery(
            0,
            Some(Extras {
                wides: Some(1),
                ..Extras::default()
            }),
        );
        let no_ball = make_delivery(
            4,
            Some(Extras {
                noballs: Some(1),
                ..Extras::default()
            }),
        );
        let score = RunningScore::default().after(&wide).after(&no_ball);
        assert_eq!(score.runs, 6);
        assert_eq!(score.legal_balls, 0);
        assert_eq!(score.over_legal_balls, 0);
    }

    #[test]
    fn byes_count_as_legal() {
        let byes = make_delivery(
            0,
            Some(Extras {
                byes: Some(4),
                ..Extras::default()
            }),
        );
        let score = RunningScore::default().after(&byes);
        assert_eq!(score.runs, 4);
        assert_eq!(score.legal_balls, 1);
    }

    #[test]
    fn wickets_clamp_at_ten() {
        let mut delivery = make_delivery(0, None);
        delivery.wickets.push(Wicket {
            kind: "bowled".to_string(),
            player_out: Some("Jones".to_string()),
            fielders: vec![],
        });
        let score = RunningScore {
            wickets: 10,
            ..RunningScore::default()
        }
        .after(&delivery);
        assert_eq!(score.wickets, 10);
        assert_eq!(score.over_wickets, 0);
        assert!(score.is_all_out());
    }

    #[test]
    fn retired_hurt_is_not_a_wicket() {
        let mut delivery = make_delivery(0, None);
        delivery.wickets.push(Wicket {
            kind: "retired hurt".to_string(),
            player_out: Some("Jones".to_string()),
            fielders: vec![],
        });
        let score = RunningScore::default().after(&delivery);
        assert_eq!(score.wickets, 0);
    }

    #[test]
    fn start_over_keeps_innings_totals() {
        let score = RunningScore::default()
            .after(&make_delivery(1, None))
            .start_over();
        assert_eq!(score.runs, 1);
        assert_eq!(score.legal_balls, 1);
        assert_eq!(score.over_runs, 0);
        assert_eq!(score.over_legal_balls, 0);
    }

    #[test]
    fn overs_notation_and_display() {
        let score = RunningScore {
            runs: 154,
            wickets: 7,
            legal_balls: 118,
            ..RunningScore::default()
        };
        assert_eq!(score.overs(6), "19.4");
        assert_eq!(score.overs(5), "23.3");
        assert_eq!(score.to_string(), "154/7");
    }
}
