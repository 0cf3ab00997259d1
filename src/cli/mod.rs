//! CLI module for the user service

pub mod serve;

use clap::Parser;

/// User service - validated user records over HTTP
#[derive(Parser)]
#[command(name = "user-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve(serve::ServeArgs),
}
