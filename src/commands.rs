//! Command flows behind the CLI subcommands.
//!
//! Generic over their input and output so the binary passes stdin/stdout
//! and tests pass byte buffers.

use anyhow::{bail, Result};
use futures_util::future::{self, BoxFuture, FutureExt};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::core::config::Settings;
use crate::core::validation::{extract_content_ref, validate_instagram_url};
use crate::download::save;
use crate::render::{self, Results, View};
use crate::session::{Session, SessionState};

/// File stem used by `--save` when the URL carries no content id.
pub const DEFAULT_STEM: &str = "instagram";

/// Write one view, as text or as the tagged JSON tree.
pub fn write_view<W: Write>(out: &mut W, view: &View, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(view)?)?;
    } else {
        writeln!(out, "{}", view)?;
    }
    out.flush()?;
    Ok(())
}

/// One-shot submit.
///
/// Results are written to `out`. On failure the user message becomes the
/// returned error; in JSON mode the error view is written as well.
pub async fn fetch<W: Write>(session: &Session, input: &str, json: bool, out: &mut W) -> Result<Results> {
    let state = match session.submit(input).await {
        Some(state) => state,
        None => session.state(),
    };
    if json || !state.is_error() {
        write_view(out, &render::view(&state), json)?;
    }

    match state {
        SessionState::Results(results) => Ok(results),
        SessionState::Error { message, .. } => bail!(message),
        other => bail!("request did not complete: {:?}", other),
    }
}

/// File stem for saved media: the shortcode (or story user), else [`DEFAULT_STEM`].
pub fn save_stem(input: &str) -> String {
    validate_instagram_url(input)
        .ok()
        .and_then(|url| extract_content_ref(&url))
        .map(|content| content.id)
        .unwrap_or_else(|| DEFAULT_STEM.to_string())
}

/// Save every download option of `results` into `dir`.
pub async fn save_results(settings: &Settings, input: &str, results: &Results, dir: &Path) -> Result<Vec<PathBuf>> {
    let client = save::build_client(&settings.upstream.user_agent)?;
    Ok(save::save_all(&client, results, &save_stem(input), dir).await?)
}

/// Validate without fetching: prints `<kind> <id> <url>`.
pub fn check<W: Write>(input: &str, out: &mut W) -> Result<()> {
    let url = validate_instagram_url(input)?;
    match extract_content_ref(&url) {
        Some(content) => writeln!(out, "{} {} {}", content.kind, content.id, url)?,
        None => writeln!(out, "{}", url)?,
    }
    Ok(())
}

/// Line-oriented front end.
///
/// Every line is a submission, `retry` resets, `quit`/`exit` stops and
/// abandons whatever is in flight. State changes are written as they are
/// observed. At end of input the pending submission is awaited and its final
/// state written before returning.
pub async fn interactive<R, W>(session: &Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut updates = session.subscribe();
    write_view(out, &render::view(&updates.borrow_and_update()), false)?;

    // The in-flight submission lives in this loop, so lines apply in order.
    let mut current: BoxFuture<'static, Option<SessionState>> = future::pending().boxed();
    let mut in_flight = false;
    let mut input_open = true;

    loop {
        if !input_open && !in_flight {
            break;
        }

        tokio::select! {
            biased;
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = render::view(&updates.borrow_and_update());
                write_view(out, &view, false)?;
            }
            _ = &mut current, if in_flight => {
                in_flight = false;
            }
            line = lines.next_line(), if input_open => {
                let Some(line) = line? else {
                    input_open = false;
                    continue;
                };
                match line.trim() {
                    "quit" | "exit" => break,
                    "retry" => {
                        current = future::pending().boxed();
                        in_flight = false;
                        session.retry();
                    }
                    submitted => {
                        let session = session.clone();
                        let submitted = submitted.to_string();
                        current = async move { session.submit(&submitted).await }.boxed();
                        in_flight = true;
                    }
                }
            }
        }
    }

    // Last transition may have landed after the final select
    if matches!(updates.has_changed(), Ok(true)) {
        let view = render::view(&updates.borrow_and_update());
        write_view(out, &view, false)?;
    }
    Ok(())
}
