//! CLI card-counting advisor example.
//!
//! Type card labels as a detector would report them (`Th`, `10d`, `As`).
//! Set `RUST_LOG=debug` to see every ledger update.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use bjcount::{
    AdviceOptions, Advisor, Analysis, Card, ExplanationRequest, Explainer, Hand, LogObserver,
    Phase, Precision, Suit, TableReport,
};

const HELP: &str = "\
Commands:
  p <cards..>  record a player hand      d <card>     dealer upcard
  h <card>     hit the first hand        a            analyze
  e            explain the last play     f <cards..>  dealer cards, finish
  u            undo last step            n            new round
  r [decks]    reset shoe                s            show table
  q            quit";

/// Shows the prompt a text service would receive.
struct PromptEcho;

impl Explainer for PromptEcho {
    fn explain(&self, request: &ExplanationRequest) -> String {
        request.prompt()
    }
}

fn main() {
    env_logger::init();

    println!("Blackjack counting advisor (type '?' for help)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let decks = prompt_line("Decks (1): ").parse::<u8>().unwrap_or(1);
    let options = AdviceOptions::default().with_decks(decks);
    let advisor = Advisor::new(options, seed).with_observer(LogObserver);

    print_table(&advisor.report());

    loop {
        let line = prompt_line(&format!("[{}] > ", phase_name(advisor.phase())));
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let labels: Vec<&str> = words.collect();

        match command {
            "p" | "player" => match advisor.add_player_hand(&labels) {
                Ok(hand) => println!("Player: {}", format_hand(&hand)),
                Err(err) => println!("Player hand error: {err}"),
            },
            "d" | "dealer" => match advisor.set_dealer_upcard(&labels) {
                Ok(card) => println!("Dealer shows {}", format_card(card)),
                Err(err) => println!("Upcard error: {err}"),
            },
            "h" | "hit" => match advisor.hit(&labels) {
                Ok(hand) => println!("Player: {}", format_hand(&hand)),
                Err(err) => println!("Hit error: {err}"),
            },
            "a" | "analyze" => match advisor.analyze() {
                Ok(analysis) => print_analysis(&analysis),
                Err(err) => println!("Analysis error: {err}"),
            },
            "e" | "explain" => match advisor.explanation_request() {
                Some(request) => println!("{}\n", PromptEcho.explain(&request)),
                None => println!("Nothing to explain. Analyze first."),
            },
            "f" | "finish" => match advisor.finalize_dealer(&labels) {
                Ok(turn) => {
                    let dealer = Hand::from_cards(&turn.hand);
                    println!(
                        "Dealer: {} (value {}, {:?})",
                        format_hand(&dealer),
                        dealer.value(),
                        turn.state
                    );
                }
                Err(err) => println!("Dealer error: {err}"),
            },
            "u" | "undo" => match advisor.undo() {
                Ok(action) => println!("Undid {action:?}"),
                Err(err) => println!("Undo error: {err}"),
            },
            "n" | "new" => {
                advisor.new_round();
                println!("New round. Bet {}.", advisor.recommend_bet());
            }
            "r" | "reset" => {
                match labels.first().and_then(|decks| decks.parse::<u8>().ok()) {
                    Some(decks) => advisor.reset_shoe_with(decks),
                    None => advisor.reset_shoe(),
                }
                println!("Shoe reset: {} cards.", advisor.cards_remaining());
            }
            "s" | "show" => print_table(&advisor.report()),
            "?" | "help" => println!("{HELP}"),
            "q" | "quit" => break,
            _ => println!("Unknown command. Type '?' for help."),
        }

        if advisor.needs_reshuffle() {
            println!("{}", colorize("Penetration reached: consider a reshuffle.", "33"));
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_string()
}

const fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Start => "start",
        Phase::PlayerInput => "player",
        Phase::DealerInput => "dealer",
        Phase::RoundOver => "over",
    }
}

fn print_analysis(analysis: &Analysis) {
    println!(
        "\n{} vs {}: basic {}",
        format_cards(&analysis.player_hand),
        format_card(analysis.dealer_upcard),
        analysis.basic_action
    );

    let action = analysis.action.to_string();
    match analysis.reason {
        Some(reason) => println!("Play: {} ({reason})", colorize(&action, "33")),
        None => println!("Play: {}", colorize(&action, "32")),
    }
    if let Some(probability) = analysis.bust_probability {
        println!("Bust on hit: {:.1}%", probability * 100.0);
    }
    if let Some(insurance) = analysis.insurance {
        println!("{}", colorize(&insurance.to_string(), "36"));
    }
    if let Some(warning) = analysis.anomaly {
        println!("{}", colorize(&warning.to_string(), "31"));
    }
    println!("TC {:+.2} | next bet {}\n", analysis.true_count, analysis.bet);
}

fn print_table(report: &TableReport) {
    let precision = match report.precision {
        Precision::Exact => "exact",
        Precision::RankOnly => "rank only",
    };
    println!(
        "\nShoe: {} remaining, {} seen ({precision}) | A {} | T {}",
        report.cards_remaining, report.cards_seen, report.aces_remaining, report.tens_remaining
    );
    println!(
        "RC {:+} | TC {:+.2} | bet {}",
        report.running_count, report.true_count, report.bet
    );

    println!("Dealer: {}", format_hand(&report.dealer_hand));
    for (index, hand) in report.player_hands.iter().enumerate() {
        println!("Hand {index}: {} | value {}", format_hand(hand), hand.value());
    }

    if !report.hole_cards.is_empty() {
        let holes = report
            .hole_cards
            .iter()
            .map(|&(upcard, hole)| format!("{}/{}", format_card(upcard), format_card(hole)))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "Hole cards: {holes} ({} of {} ten or ace)",
            report.hole_tens_and_aces,
            report.hole_cards.len()
        );
    }
    if let Some(analysis) = &report.analysis {
        println!("Last play: {}", analysis.action);
    }
    println!();
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(no cards)".to_string();
    }
    format_cards(hand.cards())
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|&card| format_card(card))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: Card) -> String {
    let color_code = match card.suit {
        Some(Suit::Hearts | Suit::Diamonds) => "31",
        Some(Suit::Clubs) => "32",
        Some(Suit::Spades) => "34",
        None => "0",
    };
    colorize(&card.to_string(), color_code)
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
