//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - issue: add a mobile credential and wait for it to be issued
//! - watch: wait for a credential that was requested elsewhere
//! - list: show mobile credentials on a cardholder
//! - revoke: delete a credential

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// credpoll - Issue mobile credentials and wait until they are ready
#[derive(Parser, Debug)]
#[command(name = "credpoll")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the number of fetch attempts
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Override the delay between fetch attempts in milliseconds
    #[arg(long, global = true)]
    pub interval_ms: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a mobile credential to a cardholder and wait for its invitation
    Issue {
        /// Cardholder href (absolute, or relative to the base URL)
        cardholder: String,

        /// Email address the invitation is sent to
        #[arg(short, long)]
        email: Option<String>,

        /// Mobile number the invitation is sent to
        #[arg(short, long)]
        mobile: Option<String>,

        /// Skip the second authentication factor on the phone
        #[arg(long)]
        single_factor_only: bool,

        /// Card number, used to pick out this credential when polling (generated if omitted)
        #[arg(short, long)]
        number: Option<String>,

        /// Card type href (defaults to credential.card_type_href)
        #[arg(short = 't', long)]
        card_type: Option<String>,
    },

    /// Wait for a mobile credential to be issued without adding one
    Watch {
        /// Cardholder href
        cardholder: String,

        /// Card number to wait for
        #[arg(short, long)]
        number: Option<String>,

        /// Card type href (defaults to credential.card_type_href)
        #[arg(short = 't', long)]
        card_type: Option<String>,
    },

    /// List mobile credentials on a cardholder
    List {
        /// Cardholder href
        cardholder: String,
    },

    /// Delete a credential
    Revoke {
        /// Card href
        card: String,
    },
}
