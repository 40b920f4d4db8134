/// Adapters - concrete implementations of the port traits
pub mod notify;
pub mod services;
pub mod storage;
