//! Human and JSON rendering for provctl commands.
//!
//! Human lines go to stdout with a status marker; `--quiet` silences them
//! while errors still reach stderr through `main`. JSON envelopes live in
//! [`json`].

pub mod json;
pub mod styles;

use console::Term;
use owo_colors::{OwoColorize as _, Style};
pub use styles::Styles;

/// Status marker shown in front of a message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Success,
    Warning,
    Info,
}

impl Marker {
    fn glyph(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }
}

/// Styling and verbosity for human-readable command output.
pub struct OutputContext {
    pub styles: Styles,
    /// Suppress everything except errors.
    pub quiet: bool,
}

impl OutputContext {
    /// Colors are used only on a stdout terminal, and never when `--no-color`
    /// or `NO_COLOR` is set.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let colors = !no_color && std::env::var_os("NO_COLOR").is_none() && Term::stdout().is_term();
        Self {
            styles: Styles::for_terminal(colors),
            quiet,
        }
    }

    /// Render one marked line without printing it.
    #[must_use]
    pub fn render(&self, marker: Marker, msg: &str) -> String {
        let style = match marker {
            Marker::Success => self.styles.success,
            Marker::Warning => self.styles.warning,
            Marker::Info => self.styles.info,
        };
        format!("  {} {msg}", marker.glyph().style(style))
    }

    /// A provider command completed.
    pub fn success(&self, msg: &str) {
        self.emit(|| self.render(Marker::Success, msg));
    }

    /// Something the user should act on, such as an incomplete provider.
    pub fn warn(&self, msg: &str) {
        self.emit(|| self.render(Marker::Warning, msg));
    }

    pub fn info(&self, msg: &str) {
        self.emit(|| self.render(Marker::Info, msg));
    }

    /// Title above a provider or option listing.
    pub fn header(&self, title: &str) {
        self.emit(|| Self::plain(title, self.styles.header));
    }

    /// One listing row: provider id or option name, then its value.
    pub fn kv(&self, key: &str, value: &str) {
        self.emit(|| format!("{}  {value}", Self::plain(key, self.styles.dim)));
    }

    fn plain(text: &str, style: Style) -> String {
        format!("  {}", text.style(style))
    }

    fn emit(&self, line: impl FnOnce() -> String) {
        if !self.quiet {
            println!("{}", line());
        }
    }
}
