//! Qrseal - tamper-evident payloads for QR codes.
//!
//! CLI front-end over the payload codec: encode text into framed payload
//! strings, decode and validate scanned ones, inspect a frame's structure.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{CommandExecutor, DecodeCommand, EncodeCommand, InspectCommand};

/// Qrseal - tamper-evident payloads for QR codes
///
/// Turns text into checksummed, optionally encrypted payload strings for QR
/// symbols, and validates them on the way back: valid, expired, tampered or
/// malformed, always as an explicit outcome.
#[derive(Parser)]
#[command(name = "qrseal")]
#[command(version)]
#[command(about = "Tamper-evident, optionally encrypted payloads for QR codes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode text into one or more payload strings
    Encode(EncodeCommand),

    /// Decode and validate a payload string
    Decode(DecodeCommand),

    /// Show a payload's structure without decoding it
    Inspect(InspectCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode(cmd) => cmd.execute(),
        Commands::Decode(cmd) => cmd.execute(),
        Commands::Inspect(cmd) => cmd.execute(),
    }
}
