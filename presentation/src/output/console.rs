//! Console reporting during a scan
//!
//! One block per notable post, warnings and errors inline, the posted
//! vote count after a hammer. Everything prints above the page progress
//! bar so the stream stays readable on long threads.

use crate::output::bbcode::BbcodeFormatter;
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use modtool_application::{PostNote, ScanObserver};
use modtool_domain::VoteCount;
use std::sync::Mutex;

/// Force-disable colored output for the whole process. When never
/// called, color support is auto-detected from the terminal.
pub fn disable_color() {
    colored::control::set_override(false);
}

/// Styling for scan output.
///
/// The default mirrors the classic scheme: votes bright green, unvotes
/// dimmed, hammers bright cyan, @mod bright blue, V/LA magenta,
/// replacements cyan. `Plain` drops styling entirely; the config's
/// `display.theme` picks one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Default,
    Plain,
}

impl Theme {
    /// Look up a theme by config name. Unknown names fall back to the
    /// default scheme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "plain" => Theme::Plain,
            _ => Theme::Default,
        }
    }

    fn note(&self, note: &PostNote) -> ColoredString {
        match self {
            Theme::Plain => note.text().normal(),
            Theme::Default => match note {
                PostNote::ModMention(text) => text.bright_blue(),
                PostNote::Vla(text) => text.magenta(),
                PostNote::Replacement(text) => text.cyan(),
                PostNote::Vote(text) => text.bright_green(),
                PostNote::Unvote(text) => text.green().dimmed(),
                PostNote::Hammer(text) => text.bright_cyan(),
            },
        }
    }

    fn warning(&self, text: &str) -> ColoredString {
        match self {
            Theme::Plain => text.normal(),
            Theme::Default => text.bright_yellow(),
        }
    }

    fn error(&self, text: &str) -> ColoredString {
        match self {
            Theme::Plain => text.normal(),
            Theme::Default => text.bright_red(),
        }
    }

    fn author(&self, text: &str) -> ColoredString {
        match self {
            Theme::Plain => text.normal(),
            Theme::Default => text.reversed(),
        }
    }

    fn post_number(&self, text: &str) -> ColoredString {
        match self {
            Theme::Plain => text.normal(),
            Theme::Default => text.underline(),
        }
    }
}

/// Prints scan events for the moderator to skim.
///
/// Quiet mode keeps warnings and errors (they decide whether the final
/// count can be trusted) and drops everything else.
pub struct ConsoleReporter {
    theme: Theme,
    quiet: bool,
    progress: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new(theme: Theme, quiet: bool) -> Self {
        Self {
            theme,
            quiet,
            progress: Mutex::new(None),
        }
    }

    /// Clear the progress bar once the scan is done.
    pub fn finish(&self) {
        if let Some(bar) = self.progress.lock().unwrap().take() {
            bar.finish_and_clear();
        }
    }

    fn page_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("=>-")
    }

    /// Print above the live progress bar when one is running.
    fn emit(&self, text: &str) {
        let guard = self.progress.lock().unwrap();
        match guard.as_ref() {
            Some(bar) => bar.suspend(|| println!("{}", text)),
            None => println!("{}", text),
        }
    }
}

impl ScanObserver for ConsoleReporter {
    fn on_post(&self, author: &str, number: u32, notes: &[PostNote]) {
        if self.quiet {
            return;
        }
        let mut block = format!(
            "{} - {}:",
            self.theme.author(author),
            self.theme.post_number(&format!("Post #{}", number))
        );
        for note in notes {
            block.push_str(&format!("\n    {}", self.theme.note(note)));
        }
        block.push('\n');
        self.emit(&block);
    }

    fn on_warning(&self, message: &str) {
        self.emit(&format!(
            "{}",
            self.theme.warning(&format!("WARNING: {}", message))
        ));
    }

    fn on_error(&self, message: &str) {
        self.emit(&format!(
            "{}",
            self.theme.error(&format!("ERROR: {}", message))
        ));
    }

    fn on_vote_count(&self, count: &VoteCount) {
        if self.quiet {
            return;
        }
        // A hammer count is for posting, so it prints as BBCode.
        self.emit(&format!("{}\n", BbcodeFormatter::format(count, None)));
    }

    fn on_page(&self, fetched: u32, total: Option<u32>) {
        if self.quiet {
            return;
        }
        let mut guard = self.progress.lock().unwrap();
        let bar = guard.get_or_insert_with(|| {
            let bar = ProgressBar::new(total.unwrap_or(1) as u64);
            bar.set_style(Self::page_style());
            bar.set_prefix("Fetching pages");
            bar
        });
        if let Some(total) = total {
            bar.set_length(total as u64);
        }
        bar.set_position(fetched as u64);
    }
}
