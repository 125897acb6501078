//! Player commands typed at the prompt or passed with `--script`.
use std::str::FromStr;

use thiserror::Error;
use treasure_hunter_game::{Item, ParseItemError, ShopIntent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Shop(ShopIntent),
    Trouble,
    Search,
    Dig,
    Move,
    Look,
    Status,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs an item, e.g. '{0} rope'")]
    MissingItem(&'static str),
    #[error(transparent)]
    Item(#[from] ParseItemError),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or_default().to_ascii_lowercase();
        let item = words.next();
        let command = match verb.as_str() {
            "buy" | "b" => Self::Shop(ShopIntent::Buy(parse_item(item, "buy")?)),
            "sell" | "s" => Self::Shop(ShopIntent::Sell(parse_item(item, "sell")?)),
            "trouble" | "t" => Self::Trouble,
            "search" | "hunt" | "h" => Self::Search,
            "dig" | "d" => Self::Dig,
            "move" | "m" => Self::Move,
            "look" | "l" => Self::Look,
            "status" | "i" => Self::Status,
            "quit" | "q" => Self::Quit,
            _ => return Err(ParseCommandError::Unknown(line.trim().to_string())),
        };
        Ok(command)
    }
}

fn parse_item(word: Option<&str>, verb: &'static str) -> Result<Item, ParseCommandError> {
    let word = word.ok_or(ParseCommandError::MissingItem(verb))?;
    Ok(word.parse()?)
}

/// Split a `--script` argument into command lines, dropping blanks.
pub fn split_script(script: &str) -> Vec<String> {
    script
        .split([',', ';', '\n'])
        .map(str::trim)
        .filter(|cmd| !cmd.is_empty())
        .map(str::to_string)
        .collect()
}

/// One-line help shown for unknown input.
pub const HELP: &str = "Commands: (b)uy <item>, (s)ell <item>, (t)rouble, (h)unt/search, (d)ig, (m)ove, (l)ook, stat(i)s, (q)uit";
