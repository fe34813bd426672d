//! Narration properties checked across whole families of deliveries.

use cricsheet_narrative::core::narrator::narrate;
use cricsheet_narrative::schema::record::{DeliveryRecord, Extras, Fielder, Runs, Wicket};
use cricsheet_narrative::schema::score::RunningScore;

fn delivery(batter_runs: u32, extras: Option<Extras>, wicket: Option<&str>) -> DeliveryRecord {
    let extra_runs = extras.map(|e| e.total()).unwrap_or(0);
    DeliveryRecord {
        batter: Some("Jones".to_string()),
        bowler: Some("Smith".to_string()),
        non_striker: Some("Brown".to_string()),
        runs: Runs {
            batter: batter_runs,
            extras: extra_runs,
            total: batter_runs + extra_runs,
            non_boundary: None,
        },
        extras,
        wickets: wicket
            .map(|kind| Wicket {
                kind: kind.to_string(),
                player_out: Some("Jones".to_string()),
                fielders: vec![Fielder {
                    name: Some("Lee".to_string()),
                    substitute: false,
                }],
            })
            .into_iter()
            .collect(),
        ..DeliveryRecord::default()
    }
}

fn every_extra(runs: u32) -> Vec<Extras> {
    vec![
        Extras { wides: Some(runs), ..Extras::default() },
        Extras { noballs: Some(runs), ..Extras::default() },
        Extras { byes: Some(runs), ..Extras::default() },
        Extras { legbyes: Some(runs), ..Extras::default() },
    ]
}

#[test]
fn boundaries_without_extras_or_wickets() {
    for runs in 0..=7 {
        let (narration, _) = narrate(&delivery(runs, None, None), RunningScore::default());
        assert_eq!(narration.sentence.contains("FOUR"), runs == 4, "{}", narration.sentence);
        assert_eq!(narration.sentence.contains("SIX"), runs == 6, "{}", narration.sentence);
        assert!(narration.sentence.starts_with("Smith to Jones, "));
    }
}

#[test]
fn extra_and_wicket_together_end_with_the_dismissal() {
    let words = [("wide", "wides"), ("no-ball", "noballs"), ("bye", "byes"), ("leg-bye", "legbyes")];
    for (extras, (word, _)) in every_extra(1).into_iter().zip(words) {
        for kind in ["run out", "stumped", "caught"] {
            let (narration, after) =
                narrate(&delivery(0, Some(extras), Some(kind)), RunningScore::default());
            let sentence = &narration.sentence;
            let extra_at = sentence.find(word).unwrap_or_else(|| panic!("{sentence}"));
            let dismissal_at = sentence.rfind(kind).unwrap_or_else(|| panic!("{sentence}"));
            assert!(extra_at < dismissal_at, "{sentence}");
            assert!(sentence.ends_with('!'), "{sentence}");
            assert_eq!(after.wickets, 1);
        }
    }
}

#[test]
fn only_wides_and_no_balls_skip_the_ball_count() {
    for extras in every_extra(1) {
        let (_, after) = narrate(&delivery(0, Some(extras), None), RunningScore::default());
        let expected = if extras.is_illegal() { 0 } else { 1 };
        assert_eq!(after.legal_balls, expected, "{extras:?}");
        assert_eq!(after.over_legal_balls, expected, "{extras:?}");
    }
    let (_, after) = narrate(&delivery(3, None, None), RunningScore::default());
    assert_eq!(after.legal_balls, 1);
}

#[test]
fn folded_total_equals_sum_of_contributions() {
    let mut deliveries = Vec::new();
    for runs in 0..=6 {
        deliveries.push(delivery(runs, None, None));
        for extras in every_extra(runs % 3 + 1) {
            deliveries.push(delivery(runs % 2, Some(extras), None));
        }
    }
    let expected: u32 = deliveries
        .iter()
        .map(|d| d.runs.batter + d.runs.extras)
        .sum();

    let fold = || {
        deliveries
            .iter()
            .fold(RunningScore::default(), |score, d| narrate(d, score).1)
    };
    let first = fold();
    let second = fold();
    assert_eq!(first.runs, expected);
    assert_eq!(first, second);
}

#[test]
fn runs_never_decrease_through_an_innings() {
    let mut score = RunningScore::default();
    for runs in [0, 4, 1, 6, 0, 2] {
        let (_, next) = narrate(&delivery(runs, None, None), score);
        assert!(next.runs >= score.runs);
        score = next;
    }
    assert_eq!(score.to_string(), "13/0");
}
