pub mod tui;
pub mod viewport;
