//! lutfiy - Southern Uzbek ZWNJ correction and transliteration

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use lutfiy::config::{load_config, load_config_from, LutfiyConfig};
use lutfiy::ngram::{NgramConfig, NgramModel, DEFAULT_ORDER, DEFAULT_SMOOTHING};
use lutfiy::Lutfiy;

/// ZWNJ correction and Latin transliteration for Arabic-script Southern Uzbek
#[derive(Parser, Debug)]
#[command(name = "lutfiy", version, about)]
struct Cli {
    /// N-gram model file (overrides the config file)
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    /// Scoring window in characters (default: twice the model order)
    #[arg(short, long, global = true)]
    window: Option<usize>,

    /// Config file (default: ~/.config/lutfiy/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Correct ZWNJ placement (TEXT or stdin)
    Fix { text: Option<String> },

    /// Transliterate to Latin (TEXT or stdin)
    Translit { text: Option<String> },

    /// ZWNJ correction then transliteration, as configured
    Process {
        text: Option<String>,
        /// Skip ZWNJ correction
        #[arg(long)]
        no_fix: bool,
        /// Also transliterate
        #[arg(long)]
        translit: bool,
    },

    /// Print per-marker decisions as JSON
    Analyze {
        text: Option<String>,
        #[arg(long)]
        pretty: bool,
    },

    /// Train a model from a corpus file, one text per line
    Train {
        #[arg(short, long)]
        corpus: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long, default_value_t = DEFAULT_ORDER)]
        order: usize,
        #[arg(long, default_value_t = DEFAULT_SMOOTHING)]
        smoothing: f64,
    },

    /// Show model statistics
    Info { path: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    // warn unless -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };
    if cli.model.is_some() {
        config.model_path = cli.model.clone();
    }
    if cli.window.is_some() {
        config.window_size = cli.window;
    }

    match cli.command {
        Command::Fix { text } => {
            let lutfiy = require_model(&config)?;
            println!("{}", lutfiy.fix_zwnj(&read_input(text)?, None)?);
        }
        Command::Translit { text } => {
            println!("{}", lutfiy::transliterate(&read_input(text)?));
        }
        Command::Process {
            text,
            no_fix,
            translit,
        } => {
            let lutfiy = Lutfiy::from_config(&config);
            let fix = config.fix_zwnj && !no_fix;
            let result = lutfiy.process(&read_input(text)?, fix, config.transliterate || translit)?;
            println!("{}", result);
        }
        Command::Analyze { text, pretty } => {
            let lutfiy = require_model(&config)?;
            let records = lutfiy.analyze_zwnj(&read_input(text)?, None)?;
            let json = if pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            println!("{}", json);
        }
        Command::Train {
            corpus,
            output,
            order,
            smoothing,
        } => {
            let content = fs::read_to_string(&corpus)
                .map_err(|e| format!("cannot read corpus {}: {}", corpus.display(), e))?;
            let texts = content.lines().filter(|line| !line.trim().is_empty());

            let settings = NgramConfig::new().with_order(order).with_smoothing(smoothing);
            let model = NgramModel::from_corpus(&settings, texts)?;
            model.save(&output)?;
            print_info(&model);
        }
        Command::Info { path } => {
            print_info(&NgramModel::load(&path)?);
        }
    }

    Ok(())
}

/// Facade with a loaded model, or an error saying why there is none
fn require_model(config: &LutfiyConfig) -> Result<Lutfiy, Box<dyn Error>> {
    let path = config
        .model_path
        .as_ref()
        .ok_or("no model given: pass --model or set model_path in the config file")?;

    let lutfiy = Lutfiy::try_from_model_path(path)?;
    Ok(match config.window_size {
        Some(window) => lutfiy.with_window_size(window),
        None => lutfiy,
    })
}

/// TEXT argument, or all of stdin without the trailing newline
fn read_input(text: Option<String>) -> io::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            let trimmed = buffer.trim_end_matches(['\n', '\r']).len();
            buffer.truncate(trimmed);
            Ok(buffer)
        }
    }
}

fn print_info(model: &NgramModel) {
    println!("order:         {}", model.order());
    println!("smoothing:     {}", model.smoothing());
    println!("vocabulary:    {}", model.vocab_size());
    println!("total n-grams: {}", model.total_ngrams());
    println!("unique:        {}", model.unique_ngrams());
}
