pub mod cursor_persistence;
pub mod simple_logger;

pub use cursor_persistence::*;
pub use simple_logger::*;
