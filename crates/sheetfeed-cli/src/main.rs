use std::io::{Write, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sheetfeed::gacha::{GachaPool, ImpactSummary, Picker};
use sheetfeed::video::{self, EmbedOptions};
use sheetfeed::{Delimiter, HeaderNormalization, Options, Table, TrimPolicy};
use tracing_subscriber::{EnvFilter, fmt};

mod config;
mod input;

use config::Config;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DelimArg {
    Comma,
    Tab,
    Semicolon,
    Pipe,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeaderArg {
    /// lowercase, `[a-z0-9_]` only
    Snake,
    /// lowercase, `[a-z0-9]` only
    Alnum,
    /// surrounding whitespace removed
    Trim,
}

#[derive(Parser, Debug)]
#[command(
    name = "sheetfeed",
    about = "Parse published spreadsheet CSV feeds",
    version
)]
struct Cli {
    /// Debug logging on stderr (repeat for trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// TOML file with named feeds
    #[arg(long, global = true, default_value = config::DEFAULT_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Source {
    /// File path or http(s) URL (defaults to stdin)
    input: Option<String>,

    /// Named feed from the config file
    #[arg(long, conflicts_with = "input")]
    feed: Option<String>,

    #[arg(long, value_enum, default_value_t = DelimArg::Comma)]
    delimiter: DelimArg,

    /// Keep whitespace around cells
    #[arg(long)]
    raw: bool,

    /// Drop rows whose cells are all empty
    #[arg(long)]
    skip_blank: bool,
}

impl Source {
    fn options(&self) -> Options {
        Options {
            delimiter: match self.delimiter {
                DelimArg::Comma => Delimiter::Comma,
                DelimArg::Tab => Delimiter::Tab,
                DelimArg::Semicolon => Delimiter::Semicolon,
                DelimArg::Pipe => Delimiter::Pipe,
            },
            trim: if self.raw {
                TrimPolicy::None
            } else {
                TrimPolicy::Cells
            },
            skip_blank_rows: self.skip_blank,
        }
    }

    fn load(&self, config: &Config) -> Result<Table> {
        let text = match &self.feed {
            Some(name) => input::read_feed(config, name)?,
            None => input::read_source(self.input.as_deref())?,
        };
        let table = sheetfeed::parse_with(&text, &self.options());
        tracing::debug!(rows = table.len(), "parsed");
        Ok(table)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// CSV to JSON (rows as arrays, or header-keyed records)
    Parse {
        #[command(flatten)]
        source: Source,

        /// Emit one object per body row keyed by the header
        #[arg(long)]
        records: bool,

        /// Header normalization used to index records
        #[arg(long, value_enum, default_value_t = HeaderArg::Snake)]
        headers: HeaderArg,

        #[arg(long)]
        pretty: bool,
    },
    /// Re-emit canonical CSV (minimal quoting, `\n` line ends)
    Normalize {
        #[command(flatten)]
        source: Source,
    },
    /// List the enabled entries of a gacha feed, or spin it
    Gacha {
        #[command(flatten)]
        source: Source,

        /// Number of random picks to print
        #[arg(long)]
        spin: Option<usize>,

        /// Seed for reproducible picks
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },
    /// Total views and estimated CO2 across gacha feeds
    Impact {
        /// Files or URLs
        inputs: Vec<String>,

        /// Named feeds from the config file
        #[arg(long = "feed")]
        feeds: Vec<String>,

        #[arg(long)]
        json: bool,
    },
    /// Extract a video id from a watch/share URL
    Video {
        url: String,

        /// Print the embed URL instead of the id
        #[arg(long)]
        embed: bool,

        #[arg(long, requires = "embed")]
        autoplay: bool,
    },
    /// Result page URL for a string of quiz answers (`-` for unanswered)
    Quiz {
        answers: String,

        #[arg(long, default_value = sheetfeed::quiz::RESULT_URL)]
        base: String,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = Config::load_from(&cli.config)?;

    match cli.command {
        Command::Parse {
            source,
            records,
            headers,
            pretty,
        } => {
            let table = source.load(&config)?;
            if records {
                let normalization = match headers {
                    HeaderArg::Snake => HeaderNormalization::SnakeKey,
                    HeaderArg::Alnum => HeaderNormalization::Alphanumeric,
                    HeaderArg::Trim => HeaderNormalization::Trimmed,
                };
                print_json(&sheetfeed::records_to_json(&table, normalization), pretty)?;
            } else {
                print_json(&table, pretty)?;
            }
        }
        Command::Normalize { source } => {
            let options = source.options();
            let table = source.load(&config)?;
            sheetfeed::to_csv_writer(stdout().lock(), &table, &options)?;
        }
        Command::Gacha {
            source,
            spin,
            seed,
            json,
        } => {
            let table = source.load(&config)?;
            let pool = GachaPool::from_table(&table).context("failed to load gacha feed")?;
            match spin {
                None if json => print_json(&pool, true)?,
                None => {
                    let mut out = stdout().lock();
                    for item in pool.items() {
                        writeln!(out, "{}\t{}", item.item, item.yt_url)?;
                    }
                }
                Some(n) => {
                    if pool.is_empty() {
                        bail!("gacha feed has no enabled entries");
                    }
                    let mut rng = match seed {
                        Some(s) => StdRng::seed_from_u64(s),
                        None => StdRng::from_entropy(),
                    };
                    let mut picker = Picker::new(pool);
                    let mut out = stdout().lock();
                    for _ in 0..n {
                        if let Some(item) = picker.spin(&mut rng) {
                            writeln!(out, "{}\t{}", item.item, item.embed_url())?;
                        }
                    }
                }
            }
        }
        Command::Impact {
            inputs,
            feeds,
            json,
        } => {
            let mut texts = Vec::new();
            for name in &feeds {
                texts.push(input::read_feed(&config, name)?);
            }
            for path in &inputs {
                texts.push(input::read_source(Some(path))?);
            }
            if texts.is_empty() {
                texts.push(input::read_source(None)?);
            }
            let tables: Vec<Table> = texts.iter().map(|t| sheetfeed::parse(t)).collect();
            let summary = ImpactSummary::from_tables(&tables);
            if json {
                print_json(&summary, false)?;
            } else {
                println!(
                    "{} views, {} kg CO2",
                    summary.total_views,
                    summary.co2_display()
                );
            }
        }
        Command::Video {
            url,
            embed,
            autoplay,
        } => {
            let Some(id) = video::youtube_id(&url) else {
                bail!("no video id in {}", url);
            };
            if embed {
                let opts = if autoplay {
                    EmbedOptions::autoplay()
                } else {
                    EmbedOptions::default()
                };
                println!("{}", video::embed_url(&id, &opts));
            } else {
                println!("{}", id);
            }
        }
        Command::Quiz { answers, base } => {
            let answers = sheetfeed::quiz::parse_answers(&answers)?;
            if answers.len() != sheetfeed::quiz::QUESTION_COUNT {
                tracing::warn!(
                    answered = answers.len(),
                    expected = sheetfeed::quiz::QUESTION_COUNT,
                    "unexpected number of answers"
                );
            }
            println!("{}", sheetfeed::quiz::result_url(&base, &answers)?);
        }
    }

    Ok(())
}
