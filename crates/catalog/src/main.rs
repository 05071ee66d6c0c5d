use anyhow::{Context, Result};
use catalog::cli::commands;
use catalog::config::{Config, Source};
use catalog::logging;
use catalog::store::{RecordDraft, SearchParams, DEFAULT_LIMIT};
use clap::{Args, Parser, Subcommand};
use matcher::{Channel, FlightProfile, Quantity, RawCriteria, SignalType};

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Signal Catalog - search and administer known radio signal emitters")]
#[command(version)]
struct Cli {
  /// Where records come from (defaults to the configured source)
  #[arg(long, global = true, value_enum)]
  source: Option<Source>,

  #[command(subcommand)]
  command: Command,
}

/// Search form fields, taken exactly as typed
#[derive(Args)]
struct SearchArgs {
  /// Case-insensitive part of the signal name
  #[arg(short, long)]
  name: Option<String>,
  /// Exact frequency in MHz
  #[arg(short, long)]
  frequency: Option<String>,
  /// Band as MIN-MAX in MHz, matches any overlapping record
  #[arg(short, long)]
  range: Option<String>,
  /// Signal type (ППРЧ or ФРЧ)
  #[arg(short = 't', long = "type")]
  signal_type: Option<String>,
}

impl From<SearchArgs> for RawCriteria {
  fn from(args: SearchArgs) -> Self {
    Self { name: args.name, frequency: args.frequency, range: args.range, signal_type: args.signal_type }
  }
}

/// Editable record fields other than the name
#[derive(Args)]
struct RecordFields {
  /// Centre frequency in MHz
  #[arg(short, long)]
  frequency: Option<i64>,
  /// Band as MIN-MAX in MHz
  #[arg(short, long)]
  range: Option<String>,
  /// Lower band bound in MHz
  #[arg(long)]
  min_freq: Option<i64>,
  /// Upper band bound in MHz
  #[arg(long)]
  max_freq: Option<i64>,
  /// Signal type (ППРЧ, ФРЧ, frequency-hopping or fixed-frequency)
  #[arg(short = 't', long = "type")]
  signal_type: Option<SignalType>,
  #[arg(short, long)]
  description: Option<String>,
  #[arg(short, long)]
  specs: Option<String>,
  /// Image URL
  #[arg(short, long)]
  image: Option<String>,
  #[arg(long)]
  max_height: Option<String>,
  #[arg(long)]
  work_height: Option<String>,
  #[arg(long)]
  flight_duration: Option<String>,
  #[arg(long)]
  flight_range: Option<String>,
  /// Cruising speed in km/h
  #[arg(long, value_parser = parse_quantity)]
  cruising_speed: Option<Quantity>,
  /// Top speed in km/h
  #[arg(long, value_parser = parse_quantity)]
  max_speed: Option<Quantity>,
  /// Communication link as NAME;FREQUENCY;FEATURES, repeat for several.
  /// Replaces every existing link.
  #[arg(long = "channel")]
  channels: Vec<Channel>,
}

fn parse_quantity(value: &str) -> std::result::Result<Quantity, String> {
  Ok(Quantity::from(value))
}

impl RecordFields {
  fn into_draft(self, name: Option<String>) -> RecordDraft {
    RecordDraft {
      name,
      frequency: self.frequency,
      range: self.range,
      min_freq: self.min_freq,
      max_freq: self.max_freq,
      signal_type: self.signal_type,
      description: self.description,
      specs: self.specs,
      image: self.image,
      flight: FlightProfile {
        max_height: self.max_height,
        work_height: self.work_height,
        flight_duration: self.flight_duration,
        flight_range: self.flight_range,
        cruising_speed: self.cruising_speed,
        max_speed: self.max_speed,
      },
      signals: (!self.channels.is_empty()).then_some(self.channels),
    }
  }
}

#[derive(Subcommand)]
enum Command {
  /// Search the catalog
  Search {
    #[command(flatten)]
    criteria: SearchArgs,
  },
  /// Run a raw backend query (name prefix, band bounds, type)
  Query {
    /// Case-sensitive name prefix
    #[arg(short, long)]
    name: Option<String>,
    /// Keep records whose lower bound is at least this
    #[arg(long)]
    min_freq: Option<i64>,
    /// Keep records whose upper bound is at most this
    #[arg(long)]
    max_freq: Option<i64>,
    #[arg(short = 't', long = "type")]
    signal_type: Option<SignalType>,
    /// Maximum number of records
    #[arg(short, long, default_value_t = DEFAULT_LIMIT)]
    limit: usize,
  },
  /// List every signal, newest first
  List,
  /// Show one signal in full
  Get {
    /// Signal id
    id: String,
  },
  /// Add a new signal
  Add {
    /// Signal name
    #[arg(short, long)]
    name: String,
    #[command(flatten)]
    fields: RecordFields,
  },
  /// Change fields of an existing signal
  Update {
    /// Signal id
    id: String,
    /// New name
    #[arg(short, long)]
    name: Option<String>,
    #[command(flatten)]
    fields: RecordFields,
  },
  /// Delete a signal
  Delete {
    /// Signal id
    id: String,
    /// Skip confirmation prompt
    #[arg(long)]
    force: bool,
  },
  /// Sign in to the remote catalog
  Login {
    email: String,
    /// Password (prompted for when omitted)
    #[arg(long, env = "CATALOG_PASSWORD", hide_env_values = true)]
    password: Option<String>,
  },
  /// Forget the saved remote session
  Logout,
  /// Show the current user
  Whoami,
}

async fn handle(command: Command, config: &Config) -> Result<()> {
  match command {
    Command::Search { criteria } => commands::search(config, criteria.into()).await,
    Command::Query { name, min_freq, max_freq, signal_type, limit } => {
      let params = SearchParams { name, min_freq, max_freq, signal_type, limit: Some(limit) };
      commands::query(config, params).await
    }
    Command::List => commands::list(config).await,
    Command::Get { id } => commands::get(config, &id).await,
    Command::Add { name, fields } => commands::add(config, fields.into_draft(Some(name))).await,
    Command::Update { id, name, fields } => {
      commands::update(config, &id, fields.into_draft(name)).await
    }
    Command::Delete { id, force } => commands::delete(config, &id, force).await,
    Command::Login { email, password } => commands::login(config, &email, password).await,
    Command::Logout => commands::logout(config).await,
    Command::Whoami => commands::whoami(config).await,
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  logging::init();
  let cli = Cli::parse();

  let mut config = Config::load().context("Failed to load configuration")?;
  if let Some(source) = cli.source {
    config.source = source;
  }

  handle(cli.command, &config).await
}
