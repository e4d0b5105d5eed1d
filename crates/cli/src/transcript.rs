//! `overlay transcript`: headless rendering of a recorded stream.

use std::io::{self, Write};

use ao_core::channel::load_frames;
use ao_core::transcript::fold_frames;
use ao_core::view::{OutputStyle, RenderItem};
use ao_protocol::NoticeKind;
use color_eyre::eyre::{Result, WrapErr};
use colored::Colorize;

use crate::cli::TranscriptCommand;

pub async fn run_transcript(cmd: TranscriptCommand) -> Result<()> {
    let script = load_frames(&cmd.file)
        .await
        .wrap_err_with(|| format!("Failed to load stream {}", cmd.file.display()))?;

    for rejected in &script.rejected {
        eprintln!(
            "{} line {} skipped: {}",
            "warning:".yellow().bold(),
            rejected.line_number,
            rejected.reason
        );
    }

    let (session, _ops) = fold_frames(&cmd.task, !cmd.hide_details, script.frames);
    let view = session.view();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_items(&mut out, &view.items())?;
    out.flush()?;
    Ok(())
}

/// Print the threaded conversation, one item per block.
pub fn write_items(out: &mut impl Write, items: &[RenderItem<'_>]) -> io::Result<()> {
    for item in items {
        match item {
            RenderItem::User(text) => {
                writeln!(out)?;
                writeln!(out, "{} {text}", "You:".bold().blue())?;
            }
            RenderItem::TurnHeader => writeln!(out, "{}", "Agent".bold().magenta())?,
            RenderItem::Narrative(text) => writeln!(out, "  {} {text}", "▸".magenta())?,
            RenderItem::AgentHeader(name) => writeln!(out, "  {}", name.bold().cyan())?,
            RenderItem::Instructions(text) => writeln!(out, "    {}", text.italic())?,
            RenderItem::StepsLabel => writeln!(out, "    {}", "Steps:".dimmed())?,
            RenderItem::Step(text) => writeln!(out, "      • {text}")?,
            RenderItem::OutputLabel => writeln!(out, "    {}", "Output:".dimmed())?,
            RenderItem::Output { text, style } => {
                for line in text.lines() {
                    match style {
                        OutputStyle::Terminal => writeln!(out, "    $ {}", line.green())?,
                        OutputStyle::Code => writeln!(out, "    {}", line.yellow())?,
                        OutputStyle::Prose => writeln!(out, "    {line}")?,
                    }
                }
            }
            RenderItem::Notice { kind, text } => {
                let text = match kind {
                    NoticeKind::Error => text.red().to_string(),
                    NoticeKind::Answer => text.bold().to_string(),
                    NoticeKind::Step => text.dimmed().to_string(),
                    NoticeKind::Plan | NoticeKind::Processing => text.clone(),
                };
                writeln!(out, "  {text}")?;
            }
            RenderItem::Summary(text) => {
                writeln!(out, "{}", "Summary".bold().green())?;
                writeln!(out, "{text}")?;
            }
            RenderItem::Failure(text) => {
                writeln!(out, "{}", "✗ Task failed".bold().red())?;
                writeln!(out, "{}", text.red())?;
            }
            RenderItem::Loading => writeln!(out, "{}", "Working on it...".dimmed())?,
        }
    }
    Ok(())
}
