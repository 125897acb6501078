//! Console output: narration coloring and the status sheet.
use colored::{ColoredString, Colorize};
use std::fmt::Write as _;
use treasure_hunter_game::{Expedition, ExpeditionStatus, Hunter};

/// How a narration line should stand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Gain,
    Loss,
    Scenery,
    Find,
    Plain,
}

pub fn tone(line: &str) -> Tone {
    let lower = line.to_ascii_lowercase();
    if ["lost", "can't", "pay ", "unfortunately", "no shovel"]
        .iter()
        .any(|word| lower.contains(word))
    {
        Tone::Loss
    } else if lower.contains("gold") && !lower.contains("don't have enough") {
        Tone::Gain
    } else if lower.contains("surrounded by") || lower.contains("to cross the") {
        Tone::Scenery
    } else if lower.starts_with("you found") || lower.contains("treasure") {
        Tone::Find
    } else {
        Tone::Plain
    }
}

fn paint(line: &str) -> ColoredString {
    match tone(line) {
        Tone::Gain => line.yellow(),
        Tone::Loss => line.red(),
        Tone::Scenery => line.cyan(),
        Tone::Find => line.green(),
        Tone::Plain => line.normal(),
    }
}

pub fn banner() {
    println!("{}", "💰 Treasure Hunter".bright_yellow().bold());
    println!("{}", "==================".yellow());
}

/// Print drained narration, one colored line at a time.
pub fn news(text: &str) {
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        println!("{}", paint(line));
    }
}

pub fn problem(message: &str) {
    println!("{}", message.red());
}

/// Plain-text status sheet for the current hunter.
pub fn status_sheet(expedition: &Expedition) -> String {
    let mut out = String::new();
    let Some(hunter) = expedition.hunter() else {
        out.push_str("Nobody is left on the expedition.");
        return out;
    };
    let kit = join_or_none(hunter.kit().iter().map(ToString::to_string));
    let bag = join_or_none(hunter.treasures().iter().map(ToString::to_string));
    let _ = writeln!(out, "Hunter: {}", hunter.name());
    let _ = writeln!(out, "Gold: {}", hunter.gold());
    let _ = writeln!(out, "Kit: {kit}");
    let _ = writeln!(out, "Treasures: {bag}");
    let _ = write!(out, "Towns visited: {}", expedition.towns_visited());
    out
}

fn join_or_none(parts: impl Iterator<Item = String>) -> String {
    let joined = parts.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined
    }
}

pub fn status(expedition: &Expedition) {
    println!("{}", status_sheet(expedition).bright_white());
}

/// Closing line once the loop ends.
pub fn finale(expedition: &Expedition) {
    match expedition.status() {
        ExpeditionStatus::Won => println!(
            "{}",
            "Congratulations, you found the crown, the trophy and the gem!"
                .bright_green()
                .bold()
        ),
        ExpeditionStatus::Lost => println!(
            "{}",
            "You are out of gold. The hunt is over.".bright_red().bold()
        ),
        ExpeditionStatus::Ongoing => println!(
            "{}",
            format!("Fare thee well, with {} gold to your name.", expedition.gold()).cyan()
        ),
    }
}
