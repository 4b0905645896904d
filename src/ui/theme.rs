//! Visual theme and styling.

use console::Style;

/// Styles for terminal output. The plain theme applies no styling.
#[derive(Debug, Clone)]
pub struct OrdertrackTheme {
    /// Finished operations and success messages (green).
    pub success: Style,
    /// Warnings (orange).
    pub warning: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Running operations (magenta).
    pub info: Style,
    /// Pending operations and secondary text.
    pub dim: Style,
    pub highlight: Style,
    pub header: Style,
}

impl Default for OrdertrackTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl OrdertrackTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().magenta(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
        }
    }

    /// Theme without colors, for non-TTY output and `--no-color`.
    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            success: none.clone(),
            warning: none.clone(),
            error: none.clone(),
            info: none.clone(),
            dim: none.clone(),
            highlight: none.clone(),
            header: none,
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        self.success.apply_to(format!("✓ {}", msg)).to_string()
    }

    pub fn format_warning(&self, msg: &str) -> String {
        self.warning.apply_to(format!("⚠ {}", msg)).to_string()
    }

    pub fn format_error(&self, msg: &str) -> String {
        self.error.apply_to(format!("✗ {}", msg)).to_string()
    }

    /// Banner shown above a plan: `◆ title`.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("◆"),
            self.highlight.apply_to(title)
        )
    }
}

/// Colors are used on a terminal unless `NO_COLOR` is set.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term()
}
