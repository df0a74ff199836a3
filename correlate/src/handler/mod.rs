pub mod completion_handler;
pub mod exception_isolation;
pub mod handler;
pub mod response_handler;
