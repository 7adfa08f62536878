//! Text rendering for cards, rounds and duel notifications.

use duelist_engine::cards::{Card, Stance};
use duelist_engine::duel::DuelResult;
use duelist_engine::events::DuelEvent;
use duelist_engine::rules::{Matchup, RoundReport};
use duelist_engine::side::Side;

/// One numbered line of a hand listing. `slot` is zero-based.
///
/// ```rust
/// # use duelist_cli::formatters::format_card_line;
/// use duelist_engine::cards::Card;
///
/// let card = Card::monster("Battle Ox", 1700, 1000);
/// assert_eq!(format_card_line(0, &card), "  1. Battle Ox (OFF: 1700, DEF: 1000)");
/// ```
pub fn format_card_line(slot: usize, card: &Card) -> String {
    format!(
        "  {}. {} (OFF: {}, DEF: {})",
        slot + 1,
        card.name(),
        card.offense(),
        card.defense()
    )
}

/// Card line for `cards` listings, with tier and artwork.
pub fn format_card_detail(card: &Card) -> String {
    let artwork = if card.has_artwork() {
        card.artwork()
    } else {
        "(no artwork)"
    };
    format!(
        "{} | {} | {:?} / {:?} | {}",
        card.compact(),
        card.category(),
        card.power_tier(),
        card.archetype(),
        artwork
    )
}

pub fn format_stance(stance: Stance) -> &'static str {
    match stance {
        Stance::Offense => "offense",
        Stance::Defense => "defense",
    }
}

pub fn format_score(player: u8, machine: u8) -> String {
    format!("Score: Player {} - {} Machine", player, machine)
}

pub fn format_round_report(report: &RoundReport) -> String {
    format!("Round {}\n{}", report.round, report)
}

pub fn format_duel_result(result: &DuelResult) -> String {
    let verdict = match result.winner {
        Some(Side::Player) => "You won the duel!",
        Some(Side::Machine) => "The machine won the duel.",
        None => "The duel ended in a draw.",
    };
    format!(
        "{} ({} after {} rounds)",
        verdict,
        format_score(result.player_score, result.machine_score),
        result.rounds_played
    )
}

/// Text for a notification, or `None` when the event has nothing to show.
/// `Error` events are rendered separately on the error stream.
pub fn format_event(event: &DuelEvent) -> Option<String> {
    match event {
        DuelEvent::CardsReady => Some("Cards are ready.".to_string()),
        DuelEvent::DuelStarted { first, .. } => Some(format!("Duel started! {} goes first.", first)),
        DuelEvent::RoundStarted {
            round,
            player_score,
            machine_score,
        } => Some(format!(
            "\n=== Round {} === {}",
            round,
            format_score(*player_score, *machine_score)
        )),
        DuelEvent::TurnStarted { is_human: true, .. } => Some("Your turn.".to_string()),
        DuelEvent::TurnStarted { .. } => Some("Machine is thinking...".to_string()),
        DuelEvent::CardSelected {
            side: Side::Player,
            card_name,
            ..
        } => Some(format!("You play {}", card_name)),
        // announced through the Status event
        DuelEvent::CardSelected { .. } => None,
        DuelEvent::StanceSet { side, stance } => {
            Some(format!("{} takes {} stance", side, format_stance(*stance)))
        }
        DuelEvent::RoundResult { report, .. } => Some(format_round_report(report)),
        DuelEvent::ScoreChanged {
            player_score,
            machine_score,
        } => Some(format_score(*player_score, *machine_score)),
        DuelEvent::DuelEnded { winner } => Some(match winner {
            Some(side) => format!("\nDuel over. Winner: {}", side),
            None => "\nDuel over. It's a draw.".to_string(),
        }),
        DuelEvent::Status { message } => Some(message.clone()),
        DuelEvent::DuelReset => Some("Duel reset.".to_string()),
        DuelEvent::Error { .. } => None,
    }
}

/// The resolution table shown by `rules`.
pub fn format_rules() -> String {
    let rows = [
        Matchup::OffenseVsOffense,
        Matchup::OffenseVsDefense,
        Matchup::DefenseVsOffense,
        Matchup::DefenseVsDefense,
    ];
    let mut s = String::from("Each side plays one card per round in a random stance.\n");
    s.push_str("First to 2 round wins takes the duel; it ends after round 3 regardless.\n\n");
    s.push_str("Player vs Machine stances:\n");
    for m in rows {
        s.push_str(&format!("  - {}\n", m.explanation()));
    }
    s.push_str("A defending card never wins a round; it can only prevent a loss.");
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use duelist_engine::errors::ErrorKind;

    #[test]
    fn machine_selection_is_silent_but_status_is_shown() {
        let sel = DuelEvent::CardSelected {
            side: Side::Machine,
            card_name: "Kuriboh".into(),
            index: None,
        };
        assert_eq!(format_event(&sel), None);
        let status = DuelEvent::Status {
            message: "Machine selected: Kuriboh".into(),
        };
        assert_eq!(format_event(&status).as_deref(), Some("Machine selected: Kuriboh"));
    }

    #[test]
    fn errors_are_not_rendered_as_game_text() {
        let e = DuelEvent::Error {
            message: "nope".into(),
            kind: ErrorKind::WrongTurn,
        };
        assert!(format_event(&e).is_none());
    }

    #[test]
    fn drawn_duel_result() {
        let r = DuelResult {
            winner: None,
            player_score: 1,
            machine_score: 1,
            rounds_played: 3,
        };
        assert_eq!(
            format_duel_result(&r),
            "The duel ended in a draw. (Score: Player 1 - 1 Machine after 3 rounds)"
        );
    }

    #[test]
    fn rules_list_every_matchup() {
        let text = format_rules();
        assert!(text.contains("Both in offense: higher offense wins"));
        assert!(text.contains("Both in defense: automatic draw"));
        assert_eq!(text.matches("attacker wins if offense > defense").count(), 2);
    }

    #[test]
    fn detail_marks_missing_artwork() {
        let card = Card::monster("Kuriboh", 300, 200);
        let line = format_card_detail(&card);
        assert!(line.starts_with("Kuriboh [300/200] | Normal Monster"));
        assert!(line.ends_with("(no artwork)"));
    }
}
