//! Color palette for provctl's human output.

use owo_colors::Style;

/// One owo-colors [`Style`] per kind of output line. The default palette is
/// plain text.
#[derive(Default, Clone)]
pub struct Styles {
    /// `✓` after a provider command succeeds.
    pub success: Style,
    /// `⚠` for incomplete providers and other follow-ups.
    pub warning: Style,
    /// `ℹ` for empty listings and hints.
    pub info: Style,
    /// Keys in provider and option listings.
    pub dim: Style,
    /// Listing titles.
    pub header: Style,
}

impl Styles {
    /// Colored palette when `colors` is set, plain otherwise.
    #[must_use]
    pub fn for_terminal(colors: bool) -> Self {
        let mut styles = Self::default();
        if colors {
            styles.colorize();
        }
        styles
    }

    pub fn colorize(&mut self) {
        *self = Self {
            success: Style::new().green(),
            warning: Style::new().yellow().bold(),
            info: Style::new().blue(),
            dim: Style::new().dimmed(),
            header: Style::new().bold().cyan(),
        };
    }
}
