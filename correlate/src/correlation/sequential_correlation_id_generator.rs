use std::sync::atomic::{AtomicU64, Ordering};

use crate::correlation::correlation_id::{CorrelationId, CorrelationIdGenerator, RESERVED_CORRELATION_ID};

pub struct SequentialCorrelationIdGenerator {
    next: AtomicU64,
}

impl CorrelationIdGenerator for SequentialCorrelationIdGenerator {
    fn generate(&self) -> CorrelationId {
        return self.next.fetch_add(1, Ordering::Relaxed);
    }
}

impl SequentialCorrelationIdGenerator {
    pub fn new() -> Self {
        return Self::starting_at(1);
    }

    pub fn starting_at(first: CorrelationId) -> Self {
        let first = if first == RESERVED_CORRELATION_ID { 1 } else { first };
        return SequentialCorrelationIdGenerator { next: AtomicU64::new(first) };
    }
}

impl Default for SequentialCorrelationIdGenerator {
    fn default() -> Self {
        return Self::new();
    }
}
