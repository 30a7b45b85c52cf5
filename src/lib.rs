//! # Qrseal - Tamper-evident payloads for QR codes
//!
//! Qrseal turns arbitrary text into a framed, checksummed, optionally
//! encrypted payload string suitable for rendering into a QR symbol, and
//! recovers and classifies such payloads on the way back in.
//!
//! ## Overview
//!
//! A producer encodes, a consumer decodes; both share one wire format:
//!
//! ```text
//! [<label>: ]<body>|<timestamp-millis>|<checksum-hex>
//! ```
//!
//! - The **body** is the raw text, or a self-contained ciphertext string when
//!   an encryption key is supplied (HKDF-SHA256 + ChaCha20-Poly1305, base64).
//! - The **timestamp** is captured at encode time and drives a 24-hour
//!   freshness window on the decode side.
//! - The **checksum** is a keyed rolling hash over body + timestamp that
//!   detects accidental corruption and casual tampering.
//! - The **label** is only present on batch items (`item-1: `, `item-2: `, ...)
//!   so a stack of printed codes stays sortable by eye.
//!
//! Decoding never panics and never retries: every outcome - valid, expired,
//! tampered, malformed - comes back as a [`DecodeResult`] value for the host
//! to render. Rendering the QR symbol itself, scanning camera frames, and
//! shipping files around are the host's problem; this crate only speaks the
//! payload protocol.
//!
//! ## Example Usage
//!
//! ```rust
//! use qrseal::{decode_with_config, encode, DecoderConfig, EncodeRequest};
//!
//! // Producer side: one encrypted payload
//! let mut request = EncodeRequest::new("crate 7, dock B");
//! request.encryption_key = Some("warehouse-key".to_string());
//! let payloads = encode(&request).unwrap();
//!
//! // Consumer side: same key, fresh payload => valid
//! let config = DecoderConfig {
//!     encryption_key: Some("warehouse-key".to_string()),
//!     ..DecoderConfig::default()
//! };
//! let result = decode_with_config(&payloads[0], &config);
//! assert_eq!(result.text(), Some("crate 7, dock B"));
//! ```
//!
//! ## Modules
//!
//! - [`checksum`]: keyed rolling checksum (wire-compatible integrity check)
//! - [`frame`]: payload framing, parsing, and batch labels
//! - [`cipher`]: passphrase-based symmetric encryption
//! - [`encoder`]: text -> framed payload strings
//! - [`decoder`]: framed payload string -> classified result

use std::time::{SystemTime, UNIX_EPOCH};

/// Freshness window for decoded payloads: 24 hours, in milliseconds.
/// A payload strictly older than this decodes as expired.
pub const FRESHNESS_WINDOW_MILLIS: i64 = 86_400_000;

pub mod checksum;
pub mod cipher;
pub mod decoder;
pub mod encoder;
pub mod frame;

// Re-export commonly used types at the crate root
pub use checksum::{checksum, DEFAULT_VALIDATION_KEY};
pub use cipher::CipherError;
pub use decoder::{decode, decode_with_config, DecodeResult, DecoderConfig, InvalidReason};
pub use encoder::{encode, encode_with_config, EncodeError, EncodeRequest, EncoderConfig};
pub use frame::{batch_label, strip_batch_label, Frame};

/// Milliseconds since the Unix epoch, per the system wall clock.
pub(crate) fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
