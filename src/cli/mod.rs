pub mod dates;
pub mod entry;
pub mod output;
pub mod profile;
pub mod trend;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dates::DateStyle;
use entry::{EditCommand, WriteCommand};
use profile::ProfileCommand;
use tracing::level_filters::LevelFilter;
use trend::TrendCommand;

use crate::{
    journal::entry_store::EntryStore,
    profile::ProfileStore,
    storage::{file::FileBackend, Namespaces},
    utils::{
        clock::{Clock, DefaultClock},
        dir::{create_application_default_path, ensure_dir},
        logging::{enable_logging, CLI_PREFIX},
    },
};

#[derive(Parser, Debug)]
#[command(name = "moodlog", version, long_about = None)]
#[command(about = "Daily mood journal", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        global = true,
        help = "Application directory. By default uses $XDG_STATE_HOME/moodlog or $HOME/.local/state/moodlog"
    )]
    dir: Option<PathBuf>,
    #[arg(long, global = true, help = "Print trace logs to the console")]
    log: bool,
    #[arg(long, global = true, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing and printing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Write the entry of a day, replacing any previous one")]
    Write {
        #[command(flatten)]
        command: WriteCommand,
    },
    #[command(about = "Show the entry of a day")]
    Show {
        #[arg(help = "Day to show. Defaults to today")]
        date: Option<String>,
    },
    #[command(about = "Change an existing entry, optionally moving it to another day")]
    Edit {
        #[command(flatten)]
        command: EditCommand,
    },
    #[command(about = "Delete the entry of a day")]
    Delete { date: String },
    #[command(about = "List entries, most recent first")]
    List {
        #[arg(short = 'n', long, help = "Show at most this many entries")]
        limit: Option<usize>,
    },
    #[command(about = "Chart mood over time")]
    Trend {
        #[command(flatten)]
        command: TrendCommand,
    },
    #[command(about = "Show or change the profile")]
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
}

/// Everything a command needs to run.
pub struct Session {
    pub entries: EntryStore<Arc<FileBackend>>,
    pub profile: ProfileStore<Arc<FileBackend>>,
    pub clock: Box<dyn Clock>,
    pub date_style: DateStyle,
}

pub async fn run_cli() -> Result<()> {
    let args = Args::parse();

    let app_dir = match args.dir {
        Some(dir) => ensure_dir(dir)?,
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &app_dir.join("logs"), logging_level, args.log)?;

    let namespaces = Namespaces::open(&app_dir)
        .with_context(|| format!("Failed to open journal in {app_dir:?}"))?;
    let session = Session {
        entries: EntryStore::new(namespaces.entries),
        profile: ProfileStore::new(namespaces.profile),
        clock: Box::new(DefaultClock),
        date_style: args.date_style,
    };

    match args.commands {
        Commands::Write { command } => entry::process_write_command(&session, command).await,
        Commands::Show { date } => entry::process_show_command(&session, date).await,
        Commands::Edit { command } => entry::process_edit_command(&session, command).await,
        Commands::Delete { date } => entry::process_delete_command(&session, &date).await,
        Commands::List { limit } => entry::process_list_command(&session, limit).await,
        Commands::Trend { command } => trend::process_trend_command(&session, command).await,
        Commands::Profile { command } => profile::process_profile_command(&session, command).await,
    }
}
