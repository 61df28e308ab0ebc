pub mod booking_storage;
pub mod cursor_store;
pub mod hooks;
pub mod kv_store;
pub mod plugins;
pub mod repository;

#[cfg(test)]
pub mod test_utils;

pub use booking_storage::*;
pub use cursor_store::*;
pub use hooks::*;
pub use kv_store::*;
pub use plugins::*;
pub use repository::*;
