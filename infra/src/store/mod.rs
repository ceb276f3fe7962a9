//! Record store implementations for the verification core.

pub mod memory_store;
pub mod redis_store;

pub use memory_store::InMemoryCodeStore;
pub use redis_store::{RedisCodeStore, RedisStoreConfig};
