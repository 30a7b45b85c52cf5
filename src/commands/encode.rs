//! Encode command - produce framed payload strings for QR rendering.

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;

use qrseal::{encode_with_config, EncodeRequest, EncoderConfig};

use super::CommandExecutor;

/// Encode text into one or more tamper-evident payload strings.
///
/// Each payload is printed on its own line, ready to be rendered into a QR
/// symbol by whatever the host uses for that. With --count above 1, every
/// payload carries a visible label (`item-1: `, `item-2: `, ...) and is
/// independently timestamped, checksummed and encrypted.
#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// Text to encode (reads stdin when omitted)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Encryption key; omit to frame the text in the clear
    #[arg(short, long)]
    pub key: Option<String>,

    /// Number of payloads to produce
    #[arg(short = 'n', long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=50))]
    pub count: u32,

    /// Label prefix for batch items (only used with --count above 1)
    #[arg(long, default_value = "item-")]
    pub prefix: String,

    /// Checksum validation key (defaults to the embedded shared key)
    #[arg(long)]
    pub validation_key: Option<String>,

    /// Verbose output (shows per-item framing details on stderr)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for EncodeCommand {
    fn execute(&self) -> Result<()> {
        let text = match &self.message {
            Some(message) => message.clone(),
            None => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read message from stdin")?;
                // Keep interior whitespace; only the shell's trailing newline goes.
                buffer.trim_end_matches(['\r', '\n']).to_string()
            }
        };

        let request = EncodeRequest {
            text,
            encryption_key: self.key.clone(),
            batch_count: self.count,
            batch_prefix: self.prefix.clone(),
        };

        let mut config = EncoderConfig {
            verbose: self.verbose,
            ..EncoderConfig::default()
        };
        if let Some(key) = &self.validation_key {
            config.validation_key = key.clone();
        }

        let payloads = encode_with_config(&request, &config).context("Failed to encode payload")?;

        if self.verbose {
            eprintln!("Encoded {} payload(s)", payloads.len());
            if request.encryption_key.as_deref().is_some_and(|k| !k.is_empty()) {
                eprintln!("Bodies are encrypted; decode needs the same key");
            }
        }

        for payload in &payloads {
            println!("{}", payload);
        }

        Ok(())
    }
}
