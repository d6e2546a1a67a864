//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use pekanit_core::{Rating, RatingItem, RatingsDraft};

use crate::cli::{GlobalOpts, RatingArgs};
use crate::error::CliError;

/// Whether prompts can be shown: both stdin and stderr are terminals.
pub fn interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !interactive() {
        return Ok(false);
    }
    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Use `value` if given; otherwise prompt on a terminal, or fall back to
/// an empty string so validation reports the missing field.
pub fn text_or_prompt(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None if interactive() => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(prompt_err),
        None => Ok(String::new()),
    }
}

/// Like [`text_or_prompt`] but an empty answer is accepted.
pub fn optional_text(value: Option<String>, prompt: &str) -> Result<String, CliError> {
    match value {
        Some(v) => Ok(v),
        None if interactive() => Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err),
        None => Ok(String::new()),
    }
}

/// Pick one entry from `items` on a terminal; `None` otherwise.
pub fn select(prompt: &str, items: &[&str]) -> Result<Option<usize>, CliError> {
    if !interactive() {
        return Ok(None);
    }
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map(Some)
        .map_err(prompt_err)
}

/// Collect the four ratings from flags, prompting for the rest on a
/// terminal. Unset items are left for validation to report.
pub fn collect_ratings(args: RatingArgs) -> Result<RatingsDraft, CliError> {
    let RatingArgs {
        tampilan_produk,
        tampilan_stand,
        penjelasan_produk,
        hiburan,
    } = args;

    let mut draft = RatingsDraft::default();
    let given = [
        (RatingItem::TampilanProduk, tampilan_produk),
        (RatingItem::TampilanStand, tampilan_stand),
        (RatingItem::PenjelasanProduk, penjelasan_produk),
        (RatingItem::Hiburan, hiburan),
    ];

    let scale = Rating::ALL;
    let labels: Vec<&str> = scale.iter().map(AsRef::as_ref).collect();

    for (item, value) in given {
        if let Some(value) = value {
            draft.set_str(item, &value)?;
            continue;
        }
        if let Some(rating) = select(item.prompt(), &labels)?.and_then(|i| scale.get(i)) {
            draft.set(item, *rating);
        }
    }
    Ok(draft)
}

/// Run `fut` behind a spinner on stderr when attached to a terminal.
pub async fn with_spinner<F, T>(global: &GlobalOpts, message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = (!global.quiet && std::io::stderr().is_terminal()).then(|| {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_owned());
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    });

    let out = fut.await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    out
}
