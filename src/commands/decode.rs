//! Decode command - validate a scanned payload and render the outcome.

use std::io::{self, Read};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Args;

use qrseal::{decode_with_config, DecodeResult, DecoderConfig};

use super::CommandExecutor;

/// Decode and validate one payload string.
///
/// The recovered text goes to stdout; status lines go to stderr. A rejected
/// payload (tampered, malformed, wrong key) exits non-zero with the reason.
/// With --json the full result is printed as one JSON object instead, for
/// host UIs that render their own panel.
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// Payload to decode (reads stdin when omitted)
    #[arg(short, long)]
    pub payload: Option<String>,

    /// Decryption key (must match the key used for encoding)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Checksum validation key (defaults to the embedded shared key)
    #[arg(long)]
    pub validation_key: Option<String>,

    /// Print the result as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Verbose output (shows classification steps on stderr)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for DecodeCommand {
    fn execute(&self) -> Result<()> {
        let raw = match &self.payload {
            Some(payload) => payload.clone(),
            None => {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read payload from stdin")?;
                buffer.trim_end_matches(['\r', '\n']).to_string()
            }
        };

        let mut config = DecoderConfig {
            encryption_key: self.key.clone(),
            verbose: self.verbose,
            ..DecoderConfig::default()
        };
        if let Some(key) = &self.validation_key {
            config.validation_key = key.clone();
        }

        let result = decode_with_config(&raw, &config);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&result).context("Failed to serialize result")?
            );
            return Ok(());
        }

        match result {
            DecodeResult::Valid {
                text,
                generated_at_millis,
            } => {
                eprintln!(
                    "Status: valid (generated {} ago)",
                    format_age(age_millis(generated_at_millis))
                );
                println!("{}", text);
                Ok(())
            }
            DecodeResult::ValidButExpired {
                text,
                generated_at_millis,
            } => {
                eprintln!(
                    "Status: EXPIRED (generated {} ago, window is 24h)",
                    format_age(age_millis(generated_at_millis))
                );
                if self.key.as_deref().is_some_and(|k| !k.is_empty()) {
                    eprintln!("Note: expired bodies are returned undecrypted");
                }
                println!("{}", text);
                Ok(())
            }
            DecodeResult::Invalid { reason } => {
                anyhow::bail!("Payload rejected: {}", reason)
            }
        }
    }
}

fn age_millis(generated_at_millis: i64) -> i64 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64;
    now - generated_at_millis
}

/// Formats a millisecond age as the largest two sensible units.
pub(super) fn format_age(age_millis: i64) -> String {
    if age_millis < 0 {
        return "the future".to_string();
    }
    let seconds = age_millis / 1000;
    let (days, hours, minutes) = (seconds / 86_400, (seconds / 3_600) % 24, (seconds / 60) % 60);
    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::format_age;

    #[test]
    fn test_format_age_units() {
        assert_eq!(format_age(5_000), "5s");
        assert_eq!(format_age(125_000), "2m 5s");
        assert_eq!(format_age(3_720_000), "1h 2m");
        assert_eq!(format_age(90_000_000), "1d 1h");
        assert_eq!(format_age(-10), "the future");
    }
}
