use crate::export::ExportFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for projtime
#[derive(Parser)]
#[command(
    name = "projtime",
    version = env!("CARGO_PKG_VERSION"),
    about = "Tag Google Calendar events to projects by keyword and export hours per project per day",
    long_about = None
)]
pub struct Cli {
    /// Use another configuration file (useful for tests or several setups)
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fail on the first invalid answer instead of asking again
    #[arg(global = true, long = "batch")]
    pub batch: bool,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the configuration directory and a default configuration file
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Sign in to Google now and cache the access token
    Auth {
        #[arg(long, help = "Forget the cached token and ask for consent again")]
        reset: bool,
    },

    /// Build the hours-per-project report for a date range
    Report {
        #[arg(
            long,
            value_name = "FILE",
            help = "Output file (default: output_file from the configuration)"
        )]
        file: Option<PathBuf>,

        #[arg(
            long,
            value_enum,
            help = "Output format (default: from the file extension, else xlsx)"
        )]
        format: Option<ExportFormat>,

        #[arg(long, short = 'f', help = "Overwrite the output file without asking")]
        force: bool,

        #[arg(
            long = "events-file",
            value_name = "FILE",
            help = "Read events from a saved events.list JSON file instead of Google"
        )]
        events_file: Option<PathBuf>,
    },

    /// List the calendar events of a date range
    Events {
        #[arg(
            long = "events-file",
            value_name = "FILE",
            help = "Read events from a saved events.list JSON file instead of Google"
        )]
        events_file: Option<PathBuf>,
    },

    /// List the mail received in a date range
    Mail {
        #[arg(long, short = 'q', help = "Extra Gmail search terms, e.g. 'from:alice'")]
        query: Option<String>,

        #[arg(long, help = "Fetch full messages and print their text")]
        body: bool,
    },
}
