//! Tags records with a per-processor random identifier

use crate::core::{LogRecord, LoggerError, Processor, Result};
use parking_lot::RwLock;
use rand::Rng;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Sets `extra["uid"]` to a random hex string
///
/// Every record passing through the same processor carries the same uid until
/// [`UidProcessor::reset`] draws a new one. Useful for correlating the records
/// of one request.
#[derive(Debug)]
pub struct UidProcessor {
    length: usize,
    uid: RwLock<String>,
}

impl UidProcessor {
    pub const DEFAULT_LENGTH: usize = 7;
    pub const MAX_LENGTH: usize = 32;

    pub fn new() -> Self {
        Self {
            length: Self::DEFAULT_LENGTH,
            uid: RwLock::new(generate(Self::DEFAULT_LENGTH)),
        }
    }

    /// Fails unless `1 <= length <= 32`
    pub fn with_length(length: usize) -> Result<Self> {
        if length == 0 || length > Self::MAX_LENGTH {
            return Err(LoggerError::other(format!(
                "The uid length must be an integer between 1 and {}, got {}",
                Self::MAX_LENGTH,
                length
            )));
        }
        Ok(Self {
            length,
            uid: RwLock::new(generate(length)),
        })
    }

    pub fn uid(&self) -> String {
        self.uid.read().clone()
    }

    pub fn reset(&self) {
        *self.uid.write() = generate(self.length);
    }
}

impl Default for UidProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn generate(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| HEX_DIGITS[rng.gen_range(0..HEX_DIGITS.len())] as char)
        .collect()
}

impl Processor for UidProcessor {
    fn process(&self, mut record: LogRecord) -> LogRecord {
        record.extra_mut().insert("uid", self.uid());
        record
    }
}
