//! Terminal output on stderr: right-aligned status labels and a spinner for
//! the upload phase.

use std::io::Write;
use std::time::Duration;

use console::{Style, Term};
use indicatif::{ProgressBar, ProgressStyle};

const LABEL_WIDTH: usize = 12;

fn print_labelled(style: Style, label: &str, message: &str) {
    let mut err = std::io::stderr().lock();
    let _ = writeln!(
        err,
        "{:>width$} {message}",
        style.apply_to(label),
        width = LABEL_WIDTH
    );
}

/// An action taken, e.g. `   Packaging Protify Core ai.protify:protify-core:0.1.1`.
pub fn status(label: &str, message: &str) {
    print_labelled(Style::new().green().bold(), label, message);
}

/// Something worth knowing that is not an action (dry-run plans, ids).
pub fn status_info(label: &str, message: &str) {
    print_labelled(Style::new().cyan().bold(), label, message);
}

pub fn status_warn(label: &str, message: &str) {
    print_labelled(Style::new().yellow().bold(), label, message);
}

/// Spinner for work of unknown length. Hidden when stderr is not a terminal,
/// so piped and test output stays clean.
pub fn spinner(message: &str) -> ProgressBar {
    if !Term::stderr().is_term() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner().with_message(message.to_string());
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
