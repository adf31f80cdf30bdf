//! Output mode routing logic.

/// How a command renders its results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Machine-readable JSON only
    Json,
    /// Stable line-oriented text for scripts and pipes
    #[default]
    Plain,
    /// Tables and colors for a terminal
    Pretty,
}

impl OutputMode {
    /// `--json` wins over `--plain`, which wins over terminal detection.
    /// A dumb terminal or a pipe always gets plain text.
    pub fn resolve(json: bool, plain: bool, is_tty: bool, term_is_dumb: bool) -> Self {
        if json {
            Self::Json
        } else if plain || term_is_dumb || !is_tty {
            Self::Plain
        } else {
            Self::Pretty
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
