//! Queue number handlers.

use serde::Serialize;
use tabled::Tabled;

use pekanit_core::{ClassQueueEntry, KNOWN_CLASSES, Portal, QueueNumber};

use crate::cli::{AntrianArgs, AntrianCommand, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClassQueueRow {
    #[tabled(rename = "No")]
    no: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Queue")]
    queue: String,
}

#[derive(Tabled)]
struct ClassRow {
    #[tabled(rename = "Class")]
    class: &'static str,
}

/// A class queue row with its 1-based position in the listing.
#[derive(Serialize)]
struct NumberedEntry<'a> {
    no: usize,
    #[serde(flatten)]
    entry: &'a ClassQueueEntry,
}

#[derive(Serialize)]
struct QueueView<'a> {
    queue_number: &'a QueueNumber,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(portal: &Portal, args: AntrianArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AntrianCommand::Get => {
            let number =
                util::with_spinner(global, "Fetching queue number...", portal.ensure_queue_number())
                    .await?;
            print_queue_number(&number, global)
        }

        AntrianCommand::Kelas { kelas } => {
            let kelas = match kelas {
                Some(k) => k,
                None => pick_class()?,
            };
            let entries =
                util::with_spinner(global, "Loading class queue...", portal.class_queue(&kelas))
                    .await?;
            if entries.is_empty() {
                output::notice(&format!("No queue numbers issued for {}", kelas.trim()), global.quiet);
                return Ok(());
            }

            let numbered: Vec<NumberedEntry<'_>> = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| NumberedEntry { no: i + 1, entry })
                .collect();
            let out = output::render_list(
                global.output,
                &numbered,
                |n| ClassQueueRow {
                    no: n.no,
                    name: n.entry.name.clone(),
                    queue: n
                        .entry
                        .no_antrian
                        .as_ref()
                        .map_or_else(|| "-".into(), ToString::to_string),
                },
                |n| {
                    let queue = n.entry.no_antrian.as_ref().map_or("-", QueueNumber::as_str);
                    format!("{queue}\t{}", n.entry.name)
                },
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AntrianCommand::Classes => classes(global),
    }
}

/// Let the user pick a class on a terminal. Off a terminal the empty
/// answer is left for validation to reject.
fn pick_class() -> Result<String, CliError> {
    Ok(util::select("Class", KNOWN_CLASSES)?
        .and_then(|i| KNOWN_CLASSES.get(i))
        .map_or_else(String::new, |k| (*k).to_owned()))
}

/// Print the class list. Needs no backend.
pub fn classes(global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        global.output,
        KNOWN_CLASSES,
        |c| ClassRow { class: *c },
        |c| (*c).to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_queue_number(number: &QueueNumber, global: &GlobalOpts) -> Result<(), CliError> {
    let paint = Painter::new(global.color);
    let out = output::render_single(
        global.output,
        &QueueView {
            queue_number: number,
        },
        |v| format!("Your queue number: {}", paint.highlight(v.queue_number.as_str())),
        |v| v.queue_number.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
