mod commands;
mod render;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use commands::{Command, HELP, split_script};
use treasure_hunter_game::{Adventurer, Difficulty, Expedition, ExpeditionStatus, GameConfig};

#[derive(Debug, Parser)]
#[command(name = "treasure-hunter", version)]
#[command(about = "Roam from town to town hunting for a crown, a trophy and a gem")]
struct Args {
    /// Name of your hunter
    #[arg(long)]
    name: String,

    /// Seed for every town's dice
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Easy mode: double purse, gear never breaks, brawls rarely lost
    #[arg(long)]
    easy: bool,

    /// Probability that a town turns out tough (overrides the config file)
    #[arg(long)]
    toughness: Option<f64>,

    /// JSON game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Commands to run instead of reading stdin (comma-separated)
    #[arg(long)]
    script: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args)?;
    let hunter = Adventurer::new(args.name.trim(), config.opening_purse());
    let mut expedition =
        Expedition::new(config, hunter, args.seed).context("invalid game configuration")?;
    log::info!("starting expedition for {} (seed {})", args.name, args.seed);

    render::banner();
    render::news(&expedition.latest_news());
    render::news(&expedition.town().to_string());

    let interactive = args.script.is_none();
    let lines: Box<dyn Iterator<Item = io::Result<String>>> = match &args.script {
        Some(script) => Box::new(split_script(script).into_iter().map(Ok)),
        None => Box::new(io::stdin().lock().lines()),
    };
    play(&mut expedition, lines, interactive)?;

    render::finale(&expedition);
    Ok(())
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            GameConfig::from_json(&json)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => GameConfig::default_config(),
    };
    if let Some(toughness) = args.toughness {
        config.toughness = toughness;
    }
    if args.easy {
        config.difficulty = Difficulty::Easy;
    }
    if args.name.trim().is_empty() {
        bail!("a hunter needs a name");
    }
    Ok(config)
}

fn play(
    expedition: &mut Expedition,
    lines: impl Iterator<Item = io::Result<String>>,
    interactive: bool,
) -> Result<()> {
    prompt(interactive)?;
    for line in lines {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            prompt(interactive)?;
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => run(expedition, command)?,
            Err(err) => {
                render::problem(&err.to_string());
                render::problem(HELP);
            }
        }
        if expedition.status() != ExpeditionStatus::Ongoing {
            break;
        }
        prompt(interactive)?;
    }
    Ok(())
}

fn run(expedition: &mut Expedition, command: Command) -> Result<()> {
    log::debug!("command: {command:?}");
    match command {
        Command::Shop(intent) => {
            let town = expedition.town_mut();
            town.enter_shop(intent).context("visiting the shop")?;
            render::news(&town.shop_mut().take_receipt());
        }
        Command::Trouble => {
            expedition
                .town_mut()
                .look_for_trouble()
                .context("looking for trouble")?;
        }
        Command::Search => {
            expedition
                .town_mut()
                .find_treasure()
                .context("searching for treasure")?;
        }
        Command::Dig => {
            expedition.town_mut().dig().context("digging for gold")?;
        }
        Command::Move => {
            if expedition.travel().context("leaving town")?.is_success() {
                render::news(&expedition.latest_news());
                render::news(&expedition.town().to_string());
                return Ok(());
            }
        }
        Command::Look => {
            render::news(&expedition.town().to_string());
            render::news(&expedition.town().shop().listing());
        }
        Command::Status => render::status(expedition),
        Command::Quit => {}
    }
    render::news(&expedition.latest_news());
    Ok(())
}

fn prompt(interactive: bool) -> Result<()> {
    if interactive {
        print!("> ");
        io::stdout().flush().context("flushing prompt")?;
    }
    Ok(())
}
