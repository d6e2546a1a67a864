//! Questionnaire handlers for students and guests.

use serde::Serialize;

use pekanit_core::{GuestDraft, Portal, QueueOutcome, StudentDraft};

use crate::cli::{GlobalOpts, KuesionerArgs, TamuArgs};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

#[derive(Serialize)]
struct StudentReceiptView {
    submitted: bool,
    queue_number: Option<String>,
}

/// Send the student questionnaire, then obtain the queue number.
///
/// A queue failure after a successful submission still exits non-zero,
/// but the submission itself is reported as done.
pub async fn student(
    portal: &Portal,
    args: KuesionerArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let draft = StudentDraft {
        guardian_name: util::text_or_prompt(args.wali, "Nama wali siswa")?,
        ratings: util::collect_ratings(args.ratings)?,
        remarks: util::optional_text(args.saran, "Kritik dan saran")?,
    };

    let receipt =
        util::with_spinner(global, "Sending questionnaire...", portal.submit_student(&draft))
            .await?;

    match receipt.queue {
        QueueOutcome::Issued(number) => {
            let paint = Painter::new(global.color);
            let view = StudentReceiptView {
                submitted: true,
                queue_number: Some(number.to_string()),
            };
            let out = output::render_single(
                global.output,
                &view,
                |v| {
                    format!(
                        "Questionnaire sent\nYour queue number: {}",
                        paint.highlight(v.queue_number.as_deref().unwrap_or("-"))
                    )
                },
                |v| v.queue_number.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
        QueueOutcome::Failed(err) => {
            output::notice("Questionnaire sent", global.quiet);
            Err(err.into())
        }
    }
}

/// Send a guest questionnaire. No login is involved.
pub async fn guest(portal: &Portal, args: TamuArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let draft = GuestDraft {
        name: util::text_or_prompt(args.nama, "Nama")?,
        affiliation: util::optional_text(args.instansi, "Instansi")?,
        ratings: util::collect_ratings(args.ratings)?,
        remarks: util::optional_text(args.saran, "Kritik dan saran")?,
    };

    util::with_spinner(global, "Sending questionnaire...", portal.submit_guest(&draft)).await?;
    output::notice("Questionnaire sent. Thank you!", global.quiet);
    Ok(())
}
