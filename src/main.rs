use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use kudos::corpus::{build_corpus, tone::epoch_bucket, Clock, SystemClock};
use kudos::history::{FileHistoryStore, Retention};
use kudos::picker::Picker;
use kudos::telemetry::TelemetryRecorder;
use kudos::{Engine, KudosConfig, OrderType, PersonalizeContext, Tone};

#[derive(Parser)]
#[command(name = "kudos")]
#[command(about = "Varied compliment sentences with persistent anti-repetition")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pick one sentence and record it in history
    Pick {
        /// morning, afternoon, evening, night or any; defaults to the current hour
        #[arg(long)]
        tone: Option<String>,
        /// dine-in, pickup, drive-thru or unknown
        #[arg(long, default_value = "unknown")]
        order: OrderType,
        /// Skip personalization
        #[arg(long)]
        raw: bool,
    },

    /// Print band and topic counts for one tone's corpus
    Corpus {
        #[arg(long, default_value = "any")]
        tone: String,
        /// Also print every sentence
        #[arg(long)]
        list: bool,
    },

    /// Forget every recorded pick
    Reset,

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let cli = Cli::parse();
    let config = KudosConfig::load()?;

    match cli.command {
        Command::Pick { tone, order, raw } => {
            let tone = match tone {
                Some(label) => Tone::parse(&label)?,
                None => Tone::for_hour(SystemClock.local_hour()),
            };
            let mut engine = Engine::from_config_for(&config, &[tone]).context("failed to build corpus")?;
            let pick = engine.pick(tone)?;
            let text = if raw {
                pick.sentence
            } else {
                engine.personalize(&pick.sentence, &PersonalizeContext::new(pick.tone, order))
            };
            println!("{text}");
        }
        Command::Corpus { tone, list } => {
            let tone = Tone::parse(&tone)?;
            let bucket = epoch_bucket(SystemClock.now(), config.corpus.bucket_days);
            let corpus = build_corpus(tone, &config.corpus, bucket)?;
            let [short, medium, long] = corpus.band_counts();
            println!("tone {tone} bucket {bucket} size {}", corpus.len());
            println!("bands short {short} medium {medium} long {long}");
            for (topic, count) in corpus.topic_counts() {
                println!("topic {} {count}", topic.as_str());
            }
            if list {
                for sentence in corpus.iter() {
                    println!("{sentence}");
                }
            }
        }
        Command::Reset => {
            let store = FileHistoryStore::new(config.history.dir.clone());
            let mut picker = Picker::new(store, config.picker.clone(), Retention::default());
            picker.reset(&mut TelemetryRecorder::new())?;
            tracing::info!(dir = %config.history.dir.display(), "history cleared");
        }
        Command::Config => {
            let rendered = toml::to_string_pretty(&config).context("failed to render config")?;
            print!("{rendered}");
        }
    }

    Ok(())
}
