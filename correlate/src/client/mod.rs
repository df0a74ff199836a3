pub mod client;
pub mod client_lifecycle;
pub mod client_manager;
pub mod client_manager_config;
pub(crate) mod event_dispatcher;
