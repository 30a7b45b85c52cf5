//! Inspect command - take a payload apart without decoding it.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Args;

use qrseal::{checksum, strip_batch_label, Frame, DEFAULT_VALIDATION_KEY, FRESHNESS_WINDOW_MILLIS};

use super::decode::format_age;
use super::CommandExecutor;

/// Show the structure of a payload: label, fields, age, checksum status.
///
/// Nothing is decrypted; this is the diagnostic view for a payload that will
/// not validate, or for checking what a printed code still has left on the
/// clock.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// The payload string to inspect
    #[arg(short, long)]
    pub payload: String,

    /// Checksum validation key (defaults to the embedded shared key)
    #[arg(long)]
    pub validation_key: Option<String>,
}

impl CommandExecutor for InspectCommand {
    fn execute(&self) -> Result<()> {
        let raw = self.payload.as_str();

        println!("Payload Structure");
        println!("=================");

        if raw.is_empty() {
            println!("  (empty input)");
            return Ok(());
        }

        let unlabeled = strip_batch_label(raw);
        if unlabeled.len() < raw.len() {
            println!("  Batch label: {:?}", &raw[..raw.len() - unlabeled.len()]);
        } else {
            println!("  Batch label: none");
        }

        let Some(frame) = Frame::parse(unlabeled) else {
            println!(
                "  Fields: {} (expected 3: body|timestamp|checksum)",
                unlabeled.split('|').count()
            );
            println!("  Status: malformed");
            return Ok(());
        };

        println!("  Body: {} chars", frame.body.chars().count());
        println!("  Timestamp: {}", frame.timestamp);

        match frame.timestamp.parse::<i64>() {
            Ok(generated_at) => {
                let now = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_millis() as i64;
                let age = now - generated_at;
                println!("  Age: {}", format_age(age));
                if age > FRESHNESS_WINDOW_MILLIS {
                    println!("  Freshness: expired ({} past the 24h window)",
                        format_age(age - FRESHNESS_WINDOW_MILLIS));
                } else {
                    println!("  Freshness: {} remaining of 24h",
                        format_age(FRESHNESS_WINDOW_MILLIS - age));
                }
            }
            Err(_) => println!("  Age: timestamp is not a number"),
        }

        let key = self
            .validation_key
            .as_deref()
            .unwrap_or(DEFAULT_VALIDATION_KEY);
        let expected = checksum(&frame.checksum_input(), key);

        println!("  Checksum: {}", frame.checksum);
        if expected == frame.checksum {
            println!("  Integrity: verified");
        } else {
            println!("  Integrity: MISMATCH (expected {})", expected);
        }

        Ok(())
    }
}
