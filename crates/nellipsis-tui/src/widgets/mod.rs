//! Custom widget components

mod ellipsis_view;
mod status_bar;

pub use ellipsis_view::EllipsisView;
pub use status_bar::StatusBar;
