//! CLI module for credpoll - command-line interface and subcommands.
//!
//! Each subcommand maps onto one `CredentialService` operation.

pub mod commands;

pub use commands::Cli;
