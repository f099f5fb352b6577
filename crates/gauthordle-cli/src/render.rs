//! Terminal frontend for a puzzle session.

use std::thread;
use std::time::Duration;

use colored::*;
use dialoguer::console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::FuzzySelect;
use gauthordle_core::{
    AuthorChoice, GauthordleError, GuessOutcome, PuzzleMode, Result, SessionFrontend, StageView,
};

/// How long a verdict stays on screen.
const VERDICT_PAUSE: Duration = Duration::from_secs(1);

/// Rows of the author menu visible at once.
const MENU_ROWS: usize = 5;

const TITLE_ART: &str = r#"                   _   _                   _ _
  __ _  __ _ _   _| |_| |__   ___  _ __ __| | | ___
 / _` |/ _` | | | | __| '_ \ / _ \| '__/ _` | |/ _ \
| (_| | (_| | |_| | |_| | | | (_) | | | (_| | |  __/
 \__, |\__,_|\__,_|\__|_| |_|\___/|_|  \__,_|_|\___|
 |___/"#;

const WIN_ART: &str = r#"                              _
 _   _  ___  _   _  __      _(_)_ __
| | | |/ _ \| | | | \ \ /\ / / | '_ \
| |_| | (_) | |_| |  \ V  V /| | | | |
 \__, |\___/ \__,_|   \_/\_/ |_|_| |_|
 |___/"#;

const LOSE_ART: &str = r#"                     _
 _   _  ___  _   _  | | ___  ___  ___
| | | |/ _ \| | | | | |/ _ \/ __|/ _ \
| |_| | (_) | |_| | | | (_) \__ \  __/
 \__, |\___/ \__,_| |_|\___/|___/\___|
 |___/"#;

const NOPE_ART: &str = r#" _ __   ___  _ __   ___
| '_ \ / _ \| '_ \ / _ \
| | | | (_) | |_) |  __/
|_| |_|\___/| .__/ \___|
            |_|"#;

pub struct TerminalFrontend {
    term: Term,
    banner: String,
}

impl TerminalFrontend {
    pub fn new(mode: PuzzleMode, fingerprint: &str) -> Self {
        Self {
            term: Term::stdout(),
            banner: banner(mode, fingerprint),
        }
    }

    fn header(&self) -> Result<()> {
        self.term.clear_screen()?;
        println!("{}", TITLE_ART.yellow());
        println!("      {}", self.banner.yellow().bold());
        println!();
        Ok(())
    }
}

impl SessionFrontend for TerminalFrontend {
    fn show_stage(&mut self, view: &StageView<'_>) -> Result<()> {
        self.header()?;

        let noun = if view.commits.len() > 1 { "commits" } else { "commit" };
        println!("Guess the author of the following {noun}:");
        println!();
        for (i, commit) in view.commits.iter().enumerate() {
            println!(
                "{} {}",
                format!("Commit #{}:", i + 1).green(),
                commit.subject_line
            );
        }

        if let Some(count) = view.total_commit_count {
            println!();
            println!("{}", "Hints".green().bold());
            println!(
                "{} {count}",
                "Commits by this author in the puzzle window:".green()
            );
        }
        if let Some(file) = view.most_touched_file {
            println!(
                "{} {}",
                "Author's most touched file:".green(),
                file_or_unknown(file)
            );
        }
        println!();
        Ok(())
    }

    fn choose_author(&mut self, choices: &[AuthorChoice]) -> Result<String> {
        if choices.is_empty() {
            return Err(GauthordleError::Session("no authors to choose from".to_string()));
        }

        let labels: Vec<String> = choices.iter().map(menu_label).collect();
        let picked = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Who is the author?")
            .items(&labels)
            .default(0)
            .max_length(MENU_ROWS)
            .interact_on(&self.term)
            .map_err(|e| GauthordleError::Session(format!("author prompt failed: {e}")))?;

        Ok(choices[picked].email.clone())
    }

    fn show_verdict(&mut self, outcome: GuessOutcome) -> Result<()> {
        self.header()?;
        let (art, color) = verdict(outcome);
        println!("{}", art.color(color));
        thread::sleep(VERDICT_PAUSE);
        Ok(())
    }

    fn show_answer(&mut self, name: &str, email: &str) -> Result<()> {
        println!();
        println!("The answer was: {} ({email})", name.bold());
        println!();
        Ok(())
    }
}

fn banner(mode: PuzzleMode, fingerprint: &str) -> String {
    let kind = match mode {
        PuzzleMode::Daily => "daily puzzle",
        PuzzleMode::Random => "random puzzle",
    };
    format!("The git author guessing game :: {kind} {fingerprint}")
}

fn menu_label(choice: &AuthorChoice) -> String {
    format!("{} <{}>", choice.name, choice.email)
}

fn file_or_unknown(file: &str) -> &str {
    if file.is_empty() {
        "unknown"
    } else {
        file
    }
}

fn verdict(outcome: GuessOutcome) -> (&'static str, Color) {
    match outcome {
        GuessOutcome::Correct => (WIN_ART, Color::Green),
        GuessOutcome::Incorrect { .. } => (NOPE_ART, Color::Red),
        GuessOutcome::OutOfGuesses => (LOSE_ART, Color::Red),
    }
}
