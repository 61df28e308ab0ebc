pub mod booking;
pub mod calendar_date;
pub mod grid;
pub mod selection;
pub mod session;
pub mod view_cursor;

pub use booking::*;
pub use calendar_date::*;
pub use grid::*;
pub use selection::*;
pub use session::*;
pub use view_cursor::*;
