//! Login, logout and status handlers.

use serde::Serialize;

use pekanit_core::{FileStore, Portal, Route, Session, SessionKey, SessionStore};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output::{self, Painter};

use super::util;

// ── Views ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct LoginView {
    user_id: String,
    name: String,
    class: String,
    next: String,
}

#[derive(Serialize)]
struct StatusView {
    logged_in: bool,
    user_id: Option<String>,
    name: Option<String>,
    class: Option<String>,
    questionnaire_submitted: bool,
    route: String,
    queue_number: Option<String>,
    session_file: String,
}

fn next_step(route: Route) -> &'static str {
    match route {
        Route::Login => "pekanit login",
        Route::Questionnaire => "pekanit kuesioner",
        Route::Queue => "pekanit antrian get",
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn login(portal: &Portal, args: LoginArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let nis = util::text_or_prompt(args.nis, "NIS")?;
    let session = util::with_spinner(global, "Logging in...", portal.login(&nis)).await?;
    let route = portal.route()?;

    let view = LoginView {
        user_id: session.user_id.clone(),
        name: session.user_name.clone(),
        class: session.user_class.clone(),
        next: next_step(route).into(),
    };
    let paint = Painter::new(global.color);
    let out = output::render_single(
        global.output,
        &view,
        |v| {
            format!(
                "Logged in as {} ({})\nNext: {}",
                paint.highlight(&v.name),
                v.class,
                paint.label(&v.next)
            )
        },
        |v| v.user_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Clear every session key. Works without a configured backend.
pub fn logout(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let store = FileStore::new(config::session_path(global, config));
    Session::clear(&store)?;
    output::notice("Logged out", global.quiet);
    Ok(())
}

/// Show what the stored session holds. The token itself is never printed.
pub fn status(config: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::session_path(global, config);
    let store = FileStore::new(&path);

    let session = Session::load(&store)?;
    let route = Route::resolve(&store)?;
    let queue_number = store
        .get(SessionKey::QueueNumber)?
        .filter(|q| !q.is_empty());

    let view = StatusView {
        logged_in: session.is_some(),
        user_id: session.as_ref().map(|s| s.user_id.clone()),
        name: session.as_ref().map(|s| s.user_name.clone()),
        class: session.as_ref().map(|s| s.user_class.clone()),
        questionnaire_submitted: session
            .as_ref()
            .is_some_and(|s| s.has_submitted_questionnaire),
        route: route.to_string(),
        queue_number,
        session_file: path.display().to_string(),
    };

    let paint = Painter::new(global.color);
    let out = output::render_single(
        global.output,
        &view,
        |v| status_detail(v, route, paint),
        |v| v.route.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn status_detail(v: &StatusView, route: Route, paint: Painter) -> String {
    let dash = || "-".to_owned();
    let mut lines = vec![
        format!("{}  {}", paint.label("Logged in: "), v.logged_in),
        format!(
            "{}  {}",
            paint.label("Name:      "),
            v.name.clone().unwrap_or_else(dash)
        ),
        format!(
            "{}  {}",
            paint.label("Class:     "),
            v.class.clone().unwrap_or_else(dash)
        ),
        format!(
            "{}  {}",
            paint.label("Token:     "),
            if v.logged_in { "****" } else { "-" }
        ),
        format!(
            "{}  {}",
            paint.label("Submitted: "),
            v.questionnaire_submitted
        ),
        format!(
            "{}  {}",
            paint.label("Queue:     "),
            v.queue_number
                .as_deref()
                .map_or_else(dash, |q| paint.highlight(q))
        ),
        format!("{}  {}", paint.label("Next:      "), next_step(route)),
    ];
    lines.push(paint.dim(&format!("Session file: {}", v.session_file)));
    lines.join("\n")
}
