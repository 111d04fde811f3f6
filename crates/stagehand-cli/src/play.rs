//! The read-dispatch-print loop.

use std::io::Write;

use stagehand_character::CharacterRepository;
use stagehand_narrative::GameLoop;
use stagehand_narrative::application::query_handlers::{StageView, get_stage_view};
use stagehand_narrative::domain::commands::{GetStage, TakeAction};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;

/// Shows the character's stage, then takes one action id per input line
/// until the input ends.
///
/// Unknown action ids are reported and the loop carries on; any other
/// failure ends it.
///
/// # Errors
///
/// Returns `AppError::Domain` for unrecoverable engine errors and
/// `AppError::Io` if reading input or writing output fails.
pub async fn play<R, W>(
    game: &GameLoop<'_>,
    repo: &dyn CharacterRepository,
    character_id: Uuid,
    input: R,
    out: &mut W,
) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    game.get_stage(&GetStage {
        correlation_id: Uuid::now_v7(),
        character_id,
    })
    .await?;
    print_stage(out, &get_stage_view(character_id, repo).await?)?;

    let mut lines = input.lines();
    let mut taken = 0_usize;
    while let Some(line) = lines.next_line().await? {
        let action_id = line.trim();
        if action_id.is_empty() {
            continue;
        }
        let command = TakeAction {
            correlation_id: Uuid::now_v7(),
            character_id,
            action_id: action_id.to_owned(),
        };
        match game.take_action(&command).await {
            Ok(_) => {
                taken += 1;
                print_stage(out, &get_stage_view(character_id, repo).await?)?;
            }
            Err(e) if e.is_recoverable() => {
                warn!(action_id, "rejected action");
                writeln!(out, "{e}")?;
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(actions = taken, "input closed");
    Ok(())
}

/// Writes a stage as plain text: heading, description, attachments, then
/// each group with its action ids.
///
/// # Errors
///
/// Returns `AppError::Io` if writing fails.
pub fn print_stage<W: Write>(out: &mut W, view: &StageView) -> Result<(), AppError> {
    writeln!(out, "== {} ==", view.title)?;
    if !view.description.is_empty() {
        writeln!(out, "{}", view.description)?;
    }
    for attachment in &view.attachments {
        writeln!(out, "({})", attachment.kind)?;
    }
    for group in &view.action_groups {
        writeln!(out, "[{}]", group.title)?;
        for action in &group.actions {
            writeln!(out, "  {}  {}", action.id, action.title)?;
        }
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
