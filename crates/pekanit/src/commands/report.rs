//! Report handlers: paged response lists and spreadsheet exports.

use std::path::PathBuf;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;
use tabled::Tabled;

use pekanit_core::{Audience, GuestResponse, Paginator, Portal, StudentResponse};

use crate::cli::{AudienceArg, GlobalOpts, ReportArgs, ReportCommand};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util;

impl From<AudienceArg> for Audience {
    fn from(arg: AudienceArg) -> Self {
        match arg {
            AudienceArg::Siswa => Self::Siswa,
            AudienceArg::Tamu => Self::Tamu,
        }
    }
}

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct StudentRow {
    #[tabled(rename = "No")]
    no: usize,
    #[tabled(rename = "Guardian")]
    guardian: String,
    #[tabled(rename = "Student")]
    student: String,
    #[tabled(rename = "Class")]
    class: String,
    #[tabled(rename = "Product")]
    tampilan_produk: String,
    #[tabled(rename = "Stand")]
    tampilan_stand: String,
    #[tabled(rename = "Explanation")]
    penjelasan_produk: String,
    #[tabled(rename = "Entertainment")]
    hiburan: String,
    #[tabled(rename = "Suggestions")]
    saran: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
}

impl StudentRow {
    fn new(no: usize, r: &StudentResponse) -> Self {
        Self {
            no,
            guardian: r.nama_wali_siswa.clone(),
            student: r.nama_siswa.clone().unwrap_or_default(),
            class: r.kelas.clone().unwrap_or_default(),
            tampilan_produk: r.tampilan_produk.clone(),
            tampilan_stand: r.tampilan_stand.clone(),
            penjelasan_produk: r.penjelasan_produk.clone(),
            hiburan: r.hiburan.clone(),
            saran: r.kritik_saran.clone().unwrap_or_default(),
            submitted: format_timestamp(r.created_at.as_deref()),
        }
    }
}

#[derive(Tabled)]
struct GuestRow {
    #[tabled(rename = "No")]
    no: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Institution")]
    instansi: String,
    #[tabled(rename = "Product")]
    tampilan_produk: String,
    #[tabled(rename = "Stand")]
    tampilan_stand: String,
    #[tabled(rename = "Explanation")]
    penjelasan_produk: String,
    #[tabled(rename = "Entertainment")]
    hiburan: String,
    #[tabled(rename = "Suggestions")]
    saran: String,
    #[tabled(rename = "Submitted")]
    submitted: String,
}

impl GuestRow {
    fn new(no: usize, r: &GuestResponse) -> Self {
        Self {
            no,
            name: r.nama.clone(),
            instansi: r.instansi.clone().unwrap_or_default(),
            tampilan_produk: r.tampilan_produk.clone(),
            tampilan_stand: r.tampilan_stand.clone(),
            penjelasan_produk: r.penjelasan_produk.clone(),
            hiburan: r.hiburan.clone(),
            saran: r.kritik_saran.clone().unwrap_or_default(),
            submitted: format_timestamp(r.created_at.as_deref()),
        }
    }
}

/// A response with its 1-based position in the whole listing.
#[derive(Serialize)]
struct Numbered<'a, T> {
    no: usize,
    #[serde(flatten)]
    row: &'a T,
}

/// Render a backend timestamp in local time, or pass it through as-is.
fn format_timestamp(raw: Option<&str>) -> String {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return String::new();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    raw.to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    portal: &Portal,
    args: ReportArgs,
    config: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ReportCommand::List {
            audience,
            page,
            page_size,
            all,
        } => {
            let page_size = config::page_size(page_size, config);
            let view = PageRequest {
                page,
                page_size,
                all,
            };
            match Audience::from(audience) {
                Audience::Siswa => {
                    let rows = util::with_spinner(
                        global,
                        "Loading responses...",
                        portal.student_responses(),
                    )
                    .await?;
                    print_page(rows, &view, global, StudentRow::new, |r| r.id.clone())
                }
                Audience::Tamu => {
                    let rows = util::with_spinner(
                        global,
                        "Loading responses...",
                        portal.guest_responses(),
                    )
                    .await?;
                    print_page(rows, &view, global, GuestRow::new, |r| r.id.clone())
                }
            }
        }

        ReportCommand::Export { audience, out } => {
            let audience = Audience::from(audience);
            let path = out.unwrap_or_else(|| PathBuf::from(audience.export_file_name()));
            if path.exists()
                && !util::confirm(
                    &format!("{} exists. Overwrite?", path.display()),
                    global.yes,
                )?
            {
                return Err(CliError::Validation {
                    field: "out".into(),
                    reason: format!("{} already exists (pass --yes to overwrite)", path.display()),
                });
            }

            let bytes =
                util::with_spinner(global, "Downloading export...", portal.export(audience))
                    .await?;
            std::fs::write(&path, &bytes)?;
            tracing::info!(path = %path.display(), bytes = bytes.len(), "export saved");
            output::notice(
                &format!("Saved {} bytes to {}", bytes.len(), path.display()),
                global.quiet,
            );
            Ok(())
        }
    }
}

struct PageRequest {
    page: usize,
    page_size: usize,
    all: bool,
}

fn print_page<T, R>(
    rows: Vec<T>,
    request: &PageRequest,
    global: &GlobalOpts,
    to_row: impl Fn(usize, &T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<(), CliError>
where
    T: Serialize,
    R: Tabled,
{
    let page_size = if request.all { rows.len() } else { request.page_size };
    let mut pager = Paginator::new(rows, page_size);

    if pager.is_empty() {
        output::notice("No responses yet", global.quiet);
        return Ok(());
    }
    if !pager.go_to(request.page) {
        output::notice(
            &format!(
                "Page {} is out of range (1-{}); showing page {}",
                request.page,
                pager.total_pages(),
                pager.current_page()
            ),
            global.quiet,
        );
    }

    let first = pager.first_row_number();
    let numbered: Vec<Numbered<'_, T>> = pager
        .page()
        .iter()
        .enumerate()
        .map(|(i, row)| Numbered { no: first + i, row })
        .collect();

    let out = output::render_list(
        global.output,
        &numbered,
        |n| to_row(n.no, n.row),
        |n| id_fn(n.row),
    )?;
    output::print_output(&out, global.quiet);
    output::notice(
        &format!(
            "Page {} of {} ({} responses)",
            pager.current_page(),
            pager.total_pages(),
            pager.len()
        ),
        global.quiet,
    );
    Ok(())
}
