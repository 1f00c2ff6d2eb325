mod counter;
mod popup;
mod status_bar;

pub use counter::CounterWidget;
pub use popup::{PopupWidget, HELP_LINES};
pub use status_bar::StatusBarWidget;
