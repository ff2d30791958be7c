pub mod config;
pub mod elevator;
pub mod error;
pub mod event;
pub mod logging;
pub mod request;
