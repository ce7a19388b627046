//! Terminal presenter.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use super::{Level, Notice, Presenter, Visibility};

const BAR_WIDTH: usize = 30;

/// Presenter that prints notices to the terminal and reads confirmations
/// from stdin.
pub struct ConsolePresenter {
    assume_yes: bool,
    /// A progress bar is on the current stderr line.
    bar_open: AtomicBool,
}

impl ConsolePresenter {
    /// Create a console presenter. With `assume_yes`, every confirmation is
    /// accepted without prompting.
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            bar_open: AtomicBool::new(false),
        }
    }

    /// End an unfinished progress bar line so the next message starts clean.
    fn close_bar(&self) {
        if self.bar_open.swap(false, Ordering::SeqCst) {
            eprintln!();
        }
    }
}

/// Render a progress bar line such as `[#######.......]  45%`.
fn render_bar(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        percent
    )
}

/// Accept `y` / `yes` in any case.
fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

impl Presenter for ConsolePresenter {
    fn notify(&self, notice: Notice) {
        notice.trace();

        if notice.visibility == Visibility::LogOnly {
            return;
        }

        self.close_bar();
        match notice.level {
            Level::Success | Level::Info => println!("{}", notice.message),
            Level::Warning => eprintln!("warning: {}", notice.message),
            Level::Error => eprintln!("error: {}", notice.message),
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        self.close_bar();
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                tracing::warn!("could not read confirmation: {e}");
                false
            }
        }
    }

    fn progress(&self, percent: u8) {
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "\r{}", render_bar(percent));
        if percent >= 100 {
            let _ = writeln!(stderr);
            self.bar_open.store(false, Ordering::SeqCst);
        } else {
            self.bar_open.store(true, Ordering::SeqCst);
        }
        let _ = stderr.flush();
    }
}
