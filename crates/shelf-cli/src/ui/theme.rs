//! Theme definitions for colors, symbols, and badges.

use owo_colors::{OwoColorize, Style};

use shelf_core::MediaStatus;

/// Apply `style` when color is enabled, otherwise return the text as is.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn green() -> Style {
        Style::new().green()
    }

    pub fn yellow() -> Style {
        Style::new().yellow()
    }

    pub fn red() -> Style {
        Style::new().red()
    }

    pub fn cyan() -> Style {
        Style::new().cyan()
    }

    pub fn magenta() -> Style {
        Style::new().magenta()
    }
}

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Info,
}

impl Badge {
    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Self::Ok, true) => "[\u{2713}]",
            (Self::Ok, false) => "[OK]",
            (Self::Warn, true) => "[\u{26A0}]",
            (Self::Warn, false) => "[WARN]",
            (Self::Err, true) => "[\u{2717}]",
            (Self::Err, false) => "[ERR]",
            (Self::Info, true) => "[\u{2139}]",
            (Self::Info, false) => "[INFO]",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::green(),
            Self::Warn => styles::yellow(),
            Self::Err => styles::red(),
            Self::Info => styles::cyan(),
        }
    }
}

/// Color for a status label.
pub fn status_style(status: MediaStatus) -> Style {
    match status {
        MediaStatus::Watching | MediaStatus::Reading => styles::cyan(),
        MediaStatus::Completed => styles::green(),
        MediaStatus::Planned => styles::magenta(),
        MediaStatus::OnHold => styles::yellow(),
        MediaStatus::Dropped => styles::red(),
    }
}

pub fn favorite_marker(unicode: bool) -> &'static str {
    if unicode {
        "\u{2605}"
    } else {
        "*"
    }
}

/// Fixed-width bar for progress over total. Unbounded entries get an
/// empty string.
pub fn progress_bar(progress: i64, total: Option<i64>, width: usize, unicode: bool) -> String {
    let Some(total) = total.filter(|total| *total > 0) else {
        return String::new();
    };
    let ratio = (progress.max(0) as f64 / total as f64).min(1.0);
    let filled = (ratio * width as f64).round() as usize;
    let (full, empty) = if unicode {
        ("\u{2588}", "\u{2591}")
    } else {
        ("#", "-")
    };
    format!("{}{}", full.repeat(filled), empty.repeat(width - filled))
}
