pub mod correlation_id;
pub mod pending_requests;
pub mod sequential_correlation_id_generator;
