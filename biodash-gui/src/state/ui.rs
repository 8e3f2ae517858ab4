//! UI state for panel visibility and view options.

/// UI panel visibility and toggle state.
pub struct UiState {
    /// Whether the request statistics block is visible.
    pub show_statistics: bool,
    /// Whether pie slices carry percentage labels.
    pub show_percentages: bool,
    /// Result of the last export, shown in the top bar.
    pub export_status: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_statistics: true,
            show_percentages: true,
            export_status: None,
        }
    }
}
