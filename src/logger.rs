//! Terminal output: `[module]` prefixed log lines and a fetch progress line.
//!
//! ```ignore
//! log!("store"; "{} in {}", plural_count(n, "post"), location);
//! debug!("render"; "{} bytes", html.len());
//!
//! let progress = ProgressLine::new("fetch", 12);
//! progress.inc();
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{AnsiColors, OwoColorize};
use std::{
    cell::Cell,
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set while a [`ProgressLine`] owns the current terminal line.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Enable `debug!` output (`--verbose`).
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Log a message with a colored module prefix
///
/// ```ignore
/// log!("feed"; "wrote {}", path.display());
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like `log!`, but only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut out = stdout().lock();

    // Print above a parked progress line; it redraws on the next tick
    if PROGRESS_ACTIVE.load(Ordering::Relaxed) {
        execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    }

    writeln!(out, "{prefix} {message}").ok();
    out.flush().ok();
}

fn prefix_color(module: &str) -> AnsiColors {
    match module.to_ascii_lowercase().as_str() {
        "store" => AnsiColors::BrightBlue,
        "publish" => AnsiColors::BrightGreen,
        "error" => AnsiColors::BrightRed,
        "warning" => AnsiColors::BrightMagenta,
        _ => AnsiColors::BrightYellow,
    }
}

fn colorize_prefix(module: &str) -> String {
    format!("[{module}]")
        .color(prefix_color(module))
        .bold()
        .to_string()
}

// ============================================================================
// Progress Line
// ============================================================================

/// One counter redrawn in place: `[build] fetch(4/12)`.
pub struct ProgressLine {
    label: &'static str,
    total: usize,
    done: Cell<usize>,
}

impl ProgressLine {
    pub fn new(label: &'static str, total: usize) -> Self {
        PROGRESS_ACTIVE.store(true, Ordering::Relaxed);
        let progress = Self {
            label,
            total,
            done: Cell::new(0),
        };
        progress.draw(false);
        progress
    }

    pub fn inc(&self) {
        self.done.set(self.done.get() + 1);
        self.draw(false);
    }

    fn render_line(&self) -> String {
        format!("{}({}/{})", self.label, self.done.get(), self.total)
    }

    fn draw(&self, newline: bool) {
        let mut out = stdout().lock();
        execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        let prefix = colorize_prefix("build");
        if newline {
            writeln!(out, "{prefix} {}", self.render_line()).ok();
        } else {
            write!(out, "{prefix} {}", self.render_line()).ok();
        }
        out.flush().ok();
    }

    /// Leave the final counts on screen.
    pub fn finish(self) {
        PROGRESS_ACTIVE.store(false, Ordering::Relaxed);
        self.draw(true);
    }

    /// Erase the line, e.g. before an error is reported.
    pub fn abandon(self) {
        PROGRESS_ACTIVE.store(false, Ordering::Relaxed);
        let mut out = stdout().lock();
        execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        out.flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_progress_counts() {
        let progress = ProgressLine::new("fetch", 3);
        progress.inc();
        progress.inc();
        assert_eq!(progress.render_line(), "fetch(2/3)");
        progress.finish();
    }

    #[test]
    fn test_prefix_colors() {
        assert!(matches!(prefix_color("Store"), AnsiColors::BrightBlue));
        assert!(matches!(prefix_color("feed"), AnsiColors::BrightYellow));
        assert!(colorize_prefix("store").contains("[store]"));
    }
}
