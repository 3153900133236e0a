//! Calendar handling: the injectable clock and the named reporting windows.

pub mod clock;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use window::{date_window, DateWindow, View};
