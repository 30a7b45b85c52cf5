//! Payload encoding.
//!
//! This module orchestrates the producer side of the protocol:
//! 1. Optionally encrypt the text (passphrase-based, per batch item)
//! 2. Capture a fresh millisecond timestamp per item
//! 3. Checksum body + timestamp under the validation key
//! 4. Frame as `body|timestamp|checksum`
//! 5. Label batch items (`item-1: `, `item-2: `, ...) when more than one

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checksum::{checksum, DEFAULT_VALIDATION_KEY};
use crate::cipher::{self, CipherError};
use crate::frame::{batch_label, Frame};
use crate::now_millis;

/// Errors that can occur during encoding.
///
/// Framing itself cannot fail for any input text; the only fallible step is
/// the cipher, and only when encryption was requested.
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("Encryption error: {0}")]
    EncryptionError(#[from] CipherError),
}

/// What to encode, and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeRequest {
    /// The text to carry in the payload.
    pub text: String,
    /// Encrypt the body under this key when present and non-empty.
    /// Leaving it out is a caller policy decision, not an error.
    pub encryption_key: Option<String>,
    /// Number of payloads to produce. Values below 1 are treated as 1.
    pub batch_count: u32,
    /// Visible label prefix for batch items (only used when the effective
    /// count is above 1).
    pub batch_prefix: String,
}

impl EncodeRequest {
    /// A single unencrypted payload for `text`, with the stock batch prefix.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            encryption_key: None,
            batch_count: 1,
            batch_prefix: "item-".to_string(),
        }
    }
}

/// Configuration for the encoder.
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Shared secret folded into every checksum. Must match the decoder's.
    pub validation_key: String,
    /// Whether to output verbose information on stderr.
    pub verbose: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            validation_key: DEFAULT_VALIDATION_KEY.to_string(),
            verbose: false,
        }
    }
}

/// Encodes a request into one framed payload string per batch item.
///
/// Items are independent artifacts: each gets its own timestamp, its own
/// checksum, and (when encryption is on) its own ciphertext, so any one of
/// them can be scanned and validated on its own.
pub fn encode(request: &EncodeRequest) -> Result<Vec<String>, EncodeError> {
    encode_with_config(request, &EncoderConfig::default())
}

/// Encodes a request with custom configuration.
pub fn encode_with_config(
    request: &EncodeRequest,
    config: &EncoderConfig,
) -> Result<Vec<String>, EncodeError> {
    let count = request.batch_count.max(1) as usize;
    let labeled = count > 1;

    let mut payloads = Vec::with_capacity(count);

    for index in 0..count {
        let body = match request.encryption_key.as_deref() {
            Some(key) if !key.is_empty() => cipher::encrypt(&request.text, key)?,
            _ => request.text.clone(),
        };

        let timestamp = now_millis();
        let digest = checksum(
            &format!("{}{}", body, timestamp),
            &config.validation_key,
        );
        let frame = Frame::new(body, timestamp.to_string(), digest);

        if config.verbose {
            eprintln!(
                "Item {}: {} body chars, timestamp {}",
                index + 1,
                frame.body.chars().count(),
                frame.timestamp
            );
        }

        let payload = if labeled {
            format!("{}{}", batch_label(&request.batch_prefix, index), frame)
        } else {
            frame.to_string()
        };

        payloads.push(payload);
    }

    Ok(payloads)
}
