//! Payload decoding and classification.
//!
//! This module orchestrates the consumer side of the protocol:
//! 1. Reject empty input
//! 2. Strip an optional batch label
//! 3. Split into body, timestamp, checksum - exactly three fields
//! 4. Re-verify the checksum under the validation key
//! 5. Apply the 24-hour freshness window
//! 6. Decrypt the body when a key is configured
//!
//! Decoding is a pure computation: the first applicable outcome is returned
//! as a value, nothing is retried, and no failure escapes as a panic. A
//! caller with corrected input (say, a different key) simply decodes again.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checksum::{checksum, DEFAULT_VALIDATION_KEY};
use crate::cipher;
use crate::frame::{strip_batch_label, Frame};
use crate::{now_millis, FRESHNESS_WINDOW_MILLIS};

/// Why a payload failed to decode.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// Nothing to decode.
    #[error("empty input")]
    EmptyInput,

    /// Wrong field count after the optional label was stripped.
    #[error("malformed payload format")]
    MalformedFormat,

    /// Integrity check failed: the payload was altered, or the two sides
    /// disagree on the validation key.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// Wrong encryption key, or the ciphertext was corrupted in a way the
    /// checksum cannot see (it only covers the transmitted characters).
    #[error("decryption failed")]
    DecryptionFailed,
}

/// Outcome of decoding one payload string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecodeResult {
    /// Checksum verified, within the freshness window, decrypted if needed.
    Valid {
        text: String,
        generated_at_millis: i64,
    },

    /// Checksum verified but the payload is older than the freshness window.
    ///
    /// `text` is the body exactly as transmitted - when the payload was
    /// encrypted it is still ciphertext here. Hosts should present the
    /// expiry, not the text, in that case.
    ValidButExpired {
        text: String,
        generated_at_millis: i64,
    },

    /// The payload could not be accepted at all.
    Invalid { reason: InvalidReason },
}

impl DecodeResult {
    fn invalid(reason: InvalidReason) -> Self {
        Self::Invalid { reason }
    }

    /// The recovered text, when the checksum verified.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Valid { text, .. } | Self::ValidButExpired { text, .. } => Some(text),
            Self::Invalid { .. } => None,
        }
    }

    /// Encode-side timestamp, when the checksum verified.
    pub fn generated_at_millis(&self) -> Option<i64> {
        match self {
            Self::Valid {
                generated_at_millis, ..
            }
            | Self::ValidButExpired {
                generated_at_millis, ..
            } => Some(*generated_at_millis),
            Self::Invalid { .. } => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::ValidButExpired { .. })
    }
}

/// Configuration for the decoder.
#[derive(Debug, Clone)]
pub struct DecoderConfig {
    /// Shared secret folded into every checksum. Must match the encoder's.
    pub validation_key: String,
    /// Decrypt bodies under this key when present and non-empty.
    pub encryption_key: Option<String>,
    /// Whether to output verbose information on stderr.
    pub verbose: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            validation_key: DEFAULT_VALIDATION_KEY.to_string(),
            encryption_key: None,
            verbose: false,
        }
    }
}

/// Decodes a payload string with the default configuration (stock validation
/// key, no decryption).
pub fn decode(raw: &str) -> DecodeResult {
    decode_with_config(raw, &DecoderConfig::default())
}

/// Decodes a payload string with custom configuration.
pub fn decode_with_config(raw: &str, config: &DecoderConfig) -> DecodeResult {
    decode_at(raw, config, now_millis())
}

/// The state machine proper, against an explicit clock.
///
/// Kept separate so the freshness boundary is testable to the millisecond.
fn decode_at(raw: &str, config: &DecoderConfig, now: i64) -> DecodeResult {
    if raw.is_empty() {
        return DecodeResult::invalid(InvalidReason::EmptyInput);
    }

    let unlabeled = strip_batch_label(raw);

    let Some(frame) = Frame::parse(unlabeled) else {
        if config.verbose {
            eprintln!("Expected body|timestamp|checksum, got {} field(s)",
                unlabeled.split(crate::frame::FIELD_SEPARATOR).count());
        }
        return DecodeResult::invalid(InvalidReason::MalformedFormat);
    };

    let expected = checksum(&frame.checksum_input(), &config.validation_key);
    if expected != frame.checksum {
        if config.verbose {
            eprintln!("Checksum mismatch: expected {}, got {}", expected, frame.checksum);
        }
        return DecodeResult::invalid(InvalidReason::ChecksumMismatch);
    }

    // The checksum covers the timestamp as an opaque string; only now does
    // its numeric value matter.
    let Ok(generated_at) = frame.timestamp.parse::<i64>() else {
        if config.verbose {
            eprintln!("Timestamp {:?} is not a number", frame.timestamp);
        }
        return DecodeResult::invalid(InvalidReason::MalformedFormat);
    };

    let age = now - generated_at;
    if age > FRESHNESS_WINDOW_MILLIS {
        if config.verbose {
            eprintln!("Payload expired {} ms ago", age - FRESHNESS_WINDOW_MILLIS);
        }
        // No decryption attempt past the window, even when a key is
        // configured: the body goes back exactly as transmitted.
        return DecodeResult::ValidButExpired {
            text: frame.body,
            generated_at_millis: generated_at,
        };
    }

    let text = match config.encryption_key.as_deref() {
        Some(key) if !key.is_empty() => match cipher::decrypt(&frame.body, key) {
            Ok(plaintext) if !plaintext.is_empty() => plaintext,
            Ok(_) | Err(_) => {
                if config.verbose {
                    eprintln!("Decryption produced no usable plaintext");
                }
                return DecodeResult::invalid(InvalidReason::DecryptionFailed);
            }
        },
        _ => frame.body,
    };

    DecodeResult::Valid {
        text,
        generated_at_millis: generated_at,
    }
}
