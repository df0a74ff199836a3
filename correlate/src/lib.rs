pub mod client;
pub mod correlation;
pub mod error;
pub mod handler;
pub mod native;
