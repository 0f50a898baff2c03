//! # Receipt Numbers
//!
//! Receipt identifiers are `V` followed by four zero-padded digits drawn at
//! random when a sale is committed. Collisions are possible and accepted:
//! receipts are never stored, so nothing checks uniqueness.
//!
//! The source is a trait so tests (and a configured seed) get repeatable
//! numbers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Receipt;

/// Prefix of every receipt number.
pub const RECEIPT_PREFIX: &str = "V";

/// Upper bound (exclusive) of the numeric part.
const RECEIPT_SPACE: u32 = 10_000;

/// Hands out receipt numbers at commit time.
pub trait ReceiptIssuer {
    fn issue(&mut self) -> Receipt;
}

/// Random receipt numbers backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomReceipts<R = StdRng> {
    rng: R,
}

impl RandomReceipts<StdRng> {
    /// Seeded from the operating system.
    pub fn from_entropy() -> Self {
        RandomReceipts {
            rng: StdRng::from_entropy(),
        }
    }

    /// Same seed, same sequence of receipts.
    pub fn seeded(seed: u64) -> Self {
        RandomReceipts {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> RandomReceipts<R> {
    pub fn new(rng: R) -> Self {
        RandomReceipts { rng }
    }
}

impl Default for RandomReceipts<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> ReceiptIssuer for RandomReceipts<R> {
    fn issue(&mut self) -> Receipt {
        let n = self.rng.gen_range(0..RECEIPT_SPACE);
        Receipt {
            receipt_number: format!("{RECEIPT_PREFIX}{n:04}"),
        }
    }
}
