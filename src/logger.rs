//! Terminal output: prefixed log lines and the build progress line.
//!
//! Everything goes to stderr; stdout is reserved for JSON emitted by `query`
//! and `cards`.
//!
//! ```ignore
//! log!("build"; "transforming {} files", count);
//! debug!("load"; "{} is not an AST array", path.display());
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Style};
use parking_lot::Mutex;
use std::io::{Write, stderr};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::core::ContentKind;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set while a progress line owns the bottom row of the terminal.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print `[module] message` to stderr.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], only under `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let mut out = stderr().lock();
    if PROGRESS_ACTIVE.load(Ordering::Relaxed) {
        clear_line(&mut out);
    }
    writeln!(out, "{} {message}", prefix(module)).ok();
    out.flush().ok();
}

fn prefix_style(module: &str) -> Style {
    let style = Style::new().bold();
    match module {
        "build" | "query" | "cards" => style.bright_blue(),
        "validate" => style.bright_green(),
        "error" => style.bright_red(),
        _ => style.bright_yellow(),
    }
}

fn prefix(module: &str) -> String {
    format!("[{module}]")
        .style(prefix_style(&module.to_ascii_lowercase()))
        .to_string()
}

fn clear_line(out: &mut impl Write) {
    execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
}

/// In-place `[build] markdown(3/12) json(1/2)` counter line.
///
/// Workers call [`tick`](Self::tick) concurrently. Redraws are skipped while
/// another thread is drawing, the final state is always printed by
/// [`finish`](Self::finish).
pub struct BuildProgress {
    kinds: Vec<KindCount>,
    draw: Mutex<()>,
    finished: bool,
}

struct KindCount {
    kind: ContentKind,
    total: usize,
    done: AtomicUsize,
}

impl BuildProgress {
    /// Start drawing. Kinds with nothing to build are left out.
    pub fn start(totals: &[(ContentKind, usize)]) -> Self {
        let progress = Self::with_totals(totals);
        PROGRESS_ACTIVE.store(true, Ordering::Relaxed);
        progress.redraw(false);
        progress
    }

    fn with_totals(totals: &[(ContentKind, usize)]) -> Self {
        let kinds = totals
            .iter()
            .filter(|(_, total)| *total > 0)
            .map(|&(kind, total)| KindCount {
                kind,
                total,
                done: AtomicUsize::new(0),
            })
            .collect();
        Self {
            kinds,
            draw: Mutex::new(()),
            finished: false,
        }
    }

    /// Count one processed file of `kind`.
    pub fn tick(&self, kind: ContentKind) {
        let Some(entry) = self.kinds.iter().find(|k| k.kind == kind) else {
            return;
        };
        entry.done.fetch_add(1, Ordering::Relaxed);
        if let Some(_guard) = self.draw.try_lock() {
            self.redraw(false);
        }
    }

    fn render(&self) -> String {
        self.kinds
            .iter()
            .map(|k| format!("{}({}/{})", k.kind.name(), k.done.load(Ordering::Relaxed), k.total))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn redraw(&self, newline: bool) {
        let mut out = stderr().lock();
        clear_line(&mut out);
        write!(out, "{} {}", prefix("build"), self.render()).ok();
        if newline {
            writeln!(out).ok();
        }
        out.flush().ok();
    }

    /// Leave the final counts on screen.
    pub fn finish(mut self) {
        let _guard = self.draw.lock();
        PROGRESS_ACTIVE.store(false, Ordering::Relaxed);
        self.redraw(true);
        self.finished = true;
    }
}

impl Drop for BuildProgress {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        PROGRESS_ACTIVE.store(false, Ordering::Relaxed);
        let mut out = stderr().lock();
        clear_line(&mut out);
        out.flush().ok();
    }
}
