pub mod event_dispatch;
pub mod pending_requests;
