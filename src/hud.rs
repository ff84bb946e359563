//! Text shown around and on top of the field.

use crate::pixel::Rgb;
use crate::race::{Race, RoundStatus};
use crate::scene::{GOLD, MUTED, WHITE, side_color};
use crate::tally::{ROUNDS_PER_SERIES, Side, Tally};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tint: Rgb,
}

impl Span {
    fn new(text: impl Into<String>, tint: Rgb) -> Self {
        Self {
            text: text.into(),
            tint,
        }
    }
}

pub type Line = Vec<Span>;

pub fn line_width(line: &[Span]) -> usize {
    line.iter().map(|s| s.text.chars().count()).sum()
}

pub fn plain(line: &[Span]) -> String {
    line.iter().map(|s| s.text.as_str()).collect()
}

pub const HEADER_ROWS: u16 = 4;

pub fn header(race: &Race) -> [Line; HEADER_ROWS as usize] {
    let rounds = race.rounds();
    let pips: String = (0..ROUNDS_PER_SERIES)
        .map(|i| if i < rounds { '■' } else { '□' })
        .collect();

    let mut action = vec![
        Span::new(format!("[Space] {}", action_label(race)), GOLD),
        Span::new("   [Q] Quit", MUTED),
    ];
    if rounds == 0 && race.status() == RoundStatus::Waiting {
        action.push(Span::new(
            "   Complete all 10 rolls for an official prediction",
            MUTED,
        ));
    }

    [
        vec![Span::new("ELECTION PREDICTOR", GOLD)],
        vec![
            Span::new(format!("Roll {rounds} of {ROUNDS_PER_SERIES}  "), GOLD),
            Span::new(pips, GOLD),
            Span::new(format!("  {}", status_message(rounds)), WHITE),
        ],
        tally_line(race.tally()),
        action,
    ]
}

fn tally_line(tally: Tally) -> Line {
    let (red, blue) = (Side::Red, Side::Blue);
    vec![
        Span::new(format!("{red} {}", tally.get(red)), side_color(red)),
        Span::new("   VS   ", GOLD),
        Span::new(format!("{} {blue}", tally.get(blue)), side_color(blue)),
    ]
}

pub fn status_message(rounds: u32) -> String {
    if rounds == 0 {
        return format!("All {ROUNDS_PER_SERIES} rolls needed for final prediction!");
    }
    match ROUNDS_PER_SERIES.saturating_sub(rounds) {
        0 => "Prediction complete!".to_string(),
        1 => "Final roll needed!".to_string(),
        remaining => format!("{remaining} more rolls needed for prediction"),
    }
}

pub fn action_label(race: &Race) -> &'static str {
    if race.status() == RoundStatus::Playing {
        "Predicting..."
    } else if race.series_complete() {
        "Start New 10-Roll Prediction"
    } else if race.rounds() == 0 {
        "Start 10-Roll Prediction"
    } else {
        "Next Roll"
    }
}

pub fn round_overlay(winner: Side, round: u32, remaining: u32) -> Vec<Line> {
    let follow_up = match remaining {
        0 => "Calculating final results...".to_string(),
        1 => "1 more roll needed!".to_string(),
        n => format!("{n} more rolls needed!"),
    };
    vec![
        vec![Span::new(
            format!("{winner} wins roll #{round}!"),
            side_color(winner),
        )],
        vec![Span::new(follow_up, GOLD)],
        vec![Span::new("[Space] Next Roll", MUTED)],
    ]
}

pub fn final_overlay(result: Side, tally: Tally) -> Vec<Line> {
    vec![
        vec![Span::new("Official Prediction", GOLD)],
        vec![Span::new(format!("{result} VICTORY"), side_color(result))],
        vec![Span::new(
            format!("Final Tally: {} - {}", tally.red(), tally.blue()),
            WHITE,
        )],
        vec![Span::new(
            format!("Based on full {ROUNDS_PER_SERIES}-roll prediction set"),
            MUTED,
        )],
        vec![Span::new("[Space] Start New 10-Roll Prediction", GOLD)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::Scripted;

    #[test]
    fn status_message_counts_down() {
        assert_eq!(
            status_message(0),
            "All 10 rolls needed for final prediction!"
        );
        assert_eq!(status_message(3), "7 more rolls needed for prediction");
        assert_eq!(status_message(9), "Final roll needed!");
        assert_eq!(status_message(10), "Prediction complete!");
    }

    #[test]
    fn action_label_tracks_round_state() {
        let mut race = Race::new();
        assert_eq!(action_label(&race), "Start 10-Roll Prediction");

        race.start_round();
        assert_eq!(action_label(&race), "Predicting...");

        let mut race = Race::new();
        race.run_round(&mut Scripted::calm());
        assert_eq!(action_label(&race), "Next Roll");

        for _ in 0..9 {
            race.run_round(&mut Scripted::calm());
        }
        assert_eq!(action_label(&race), "Start New 10-Roll Prediction");
    }

    #[test]
    fn header_shows_progress_and_tally() {
        let mut race = Race::new();
        for _ in 0..3 {
            race.run_round(&mut Scripted::new(vec![0.0]));
        }
        let [title, progress, tally, action] = header(&race);
        assert_eq!(plain(&title), "ELECTION PREDICTOR");
        assert_eq!(
            plain(&progress),
            "Roll 3 of 10  ■■■□□□□□□□  7 more rolls needed for prediction"
        );
        assert_eq!(plain(&tally), "RED 3   VS   0 BLUE");
        assert_eq!(plain(&action), "[Space] Next Roll   [Q] Quit");
    }

    #[test]
    fn tally_line_reads_each_side() {
        let mut tally = Tally::new();
        (0..2).for_each(|_| tally.record(Side::Red));
        (0..5).for_each(|_| tally.record(Side::Blue));
        let line = tally_line(tally);
        assert_eq!(plain(&line), "RED 2   VS   5 BLUE");
        assert_eq!(line[0].tint, side_color(Side::Red));
        assert_eq!(line[2].tint, side_color(Side::Blue));
    }

    #[test]
    fn first_round_hint_only_before_any_roll() {
        let race = Race::new();
        let [.., action] = header(&race);
        assert!(plain(&action).contains("Complete all 10 rolls"));
    }

    #[test]
    fn round_overlay_pluralizes() {
        let lines = round_overlay(Side::Red, 9, 1);
        assert_eq!(plain(&lines[0]), "RED wins roll #9!");
        assert_eq!(plain(&lines[1]), "1 more roll needed!");
        assert_eq!(plain(&round_overlay(Side::Blue, 2, 8)[1]), "8 more rolls needed!");
        assert_eq!(
            plain(&round_overlay(Side::Blue, 10, 0)[1]),
            "Calculating final results..."
        );
    }

    #[test]
    fn final_overlay_reports_tally() {
        let mut tally = Tally::new();
        (0..6).for_each(|_| tally.record(Side::Red));
        (0..4).for_each(|_| tally.record(Side::Blue));
        let lines = final_overlay(Side::Red, tally);
        assert_eq!(plain(&lines[1]), "RED VICTORY");
        assert_eq!(plain(&lines[2]), "Final Tally: 6 - 4");
        assert_eq!(line_width(&lines[0]), "Official Prediction".len());
    }
}
