//! Human-facing tracking numbers.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SUFFIX_LEN: usize = 8;

/// A tracking number of the form `<PREFIX>-XXXXXXXX`.
///
/// Stored uppercase; lookups are case-insensitive.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackingNumber(String);

impl TrackingNumber {
    /// Generate a number with eight random base-36 uppercase characters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use waybill::shipment::TrackingNumber;
    ///
    /// let number = TrackingNumber::generate("SHP", &mut rand::thread_rng());
    /// assert!(number.as_str().starts_with("SHP-"));
    /// assert_eq!(number.as_str().len(), 12);
    /// ```
    pub fn generate<R: Rng>(prefix: &str, rng: &mut R) -> Self {
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
            .collect();
        Self(format!("{}-{}", prefix.trim().to_ascii_uppercase(), suffix))
    }

    /// Normalize user input for lookup.
    pub fn normalize(input: &str) -> Self {
        Self(input.trim().to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
