//! Page Configuration
//!
//! Presentation constants, provided to components via context.

/// Labels, CSS hooks and log level for the list page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    pub add_label: &'static str,
    /// Class added to a row once it has been highlighted
    pub highlight_class: &'static str,
    pub log_level: log::Level,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            add_label: "Add list item",
            highlight_class: "string-highlight",
            log_level: log::Level::Info,
        }
    }
}

impl ListConfig {
    /// Class attribute for a row
    pub fn row_class(&self, highlighted: bool) -> String {
        if highlighted {
            format!("item-row {}", self.highlight_class)
        } else {
            "item-row".to_string()
        }
    }
}
