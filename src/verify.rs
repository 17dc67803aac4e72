use crate::errors::BenchError;
use crate::triples::count_triples;

/// Contains 1 + 2 - 3, 10 + 11 - 21 and 50 + 51 - 101.
pub const WITH_TRIPLES: [i64; 9] = [1, 2, -3, 10, 11, -21, 50, 51, -101];

/// All positive, so no triple can sum to zero.
pub const WITHOUT_TRIPLES: [i64; 9] = [1, 2, 3, 10, 11, 21, 50, 51, 101];

/// Counts from running the counter on the two fixed arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfCheck {
    pub with_triples: u64,
    pub without_triples: u64,
}

impl SelfCheck {
    pub fn passed(&self) -> bool {
        self.with_triples > 0 && self.without_triples == 0
    }

    pub fn into_result(self) -> Result<Self, BenchError> {
        if self.passed() {
            Ok(self)
        } else {
            Err(BenchError::SelfCheckFailed {
                with_triples: self.with_triples,
                without_triples: self.without_triples,
            })
        }
    }
}

pub fn self_check() -> SelfCheck {
    SelfCheck {
        with_triples: count_triples(&WITH_TRIPLES),
        without_triples: count_triples(&WITHOUT_TRIPLES),
    }
}
