pub type CorrelationId = u64;

/// Events carrying this id are unsolicited updates, never responses.
pub const RESERVED_CORRELATION_ID: CorrelationId = 0;

pub trait CorrelationIdGenerator: Send + Sync {
    fn generate(&self) -> CorrelationId;
}

pub fn is_response(correlation_id: CorrelationId) -> bool {
    return correlation_id != RESERVED_CORRELATION_ID;
}
