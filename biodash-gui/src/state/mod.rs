//! Application state modules.

mod statistics;
mod ui;
mod view;

pub use statistics::Statistics;
pub use ui::UiState;
pub use view::DashboardView;
