//! Keyed rolling checksum over payload bodies.
//!
//! This is the integrity check both sides of the wire agree on. It is NOT a
//! cryptographic MAC: it detects accidental corruption and casual tampering,
//! and anyone holding the validation key can forge it. Deployments that need
//! a real authenticity guarantee should encrypt (the AEAD tag in [`crate::cipher`]
//! is authenticated) rather than lean on this.

/// Validation key shared by encoder and decoder when the caller does not
/// inject one. Matches the key already baked into deployed payloads, so
/// existing codes keep verifying. Rotate by setting the key on both configs.
pub const DEFAULT_VALIDATION_KEY: &str = "your-secret-key-here";

/// Computes the keyed checksum of `input`, as a lowercase hex string.
///
/// The accumulator is a 32-bit signed integer folded as
/// `acc = (acc << 5) - acc + unit` over every UTF-16 code unit of `input`,
/// then over every code unit of `key`. Overflow wraps (two's complement);
/// that wraparound is part of the wire format, not an accident. The final
/// value is the absolute value of the accumulator in lowercase hex, with no
/// padding beyond what the number needs.
///
/// Pure function of `(input, key)`; same inputs always give the same digest.
pub fn checksum(input: &str, key: &str) -> String {
    let mut acc: i32 = 0;
    for unit in input.encode_utf16() {
        acc = fold(acc, unit);
    }
    for unit in key.encode_utf16() {
        acc = fold(acc, unit);
    }
    // i32::MIN has no i32 absolute value; widen before taking it.
    format!("{:x}", (acc as i64).unsigned_abs())
}

fn fold(acc: i32, unit: u16) -> i32 {
    acc.wrapping_shl(5).wrapping_sub(acc).wrapping_add(unit as i32)
}
