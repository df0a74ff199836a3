pub mod delivery_queue;
pub mod loopback_native_source;
pub mod native_source;
pub mod payload;
