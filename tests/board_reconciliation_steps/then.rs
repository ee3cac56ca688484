//! Then steps for board reconciliation BDD scenarios.

use super::world::ReconciliationWorld;
use rstest_bdd_macros::then;
use trellis::board::domain::{BoardColumn, SortBy};
use trellis::board::services::{DragOutcome, WriteOp};

#[then("the drag reports the move as committed")]
fn drag_reports_committed(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    match &world.last_drag {
        Some(Ok(DragOutcome::Moved)) => Ok(()),
        other => Err(eyre::eyre!("expected a committed move, got {other:?}")),
    }
}

#[then("the drag reports a refused write")]
fn drag_reports_refused(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    match &world.last_drag {
        Some(Err(error)) if error.op == WriteOp::MoveTask => Ok(()),
        other => Err(eyre::eyre!("expected a refused move, got {other:?}")),
    }
}

#[then("the drag reports no drop target")]
fn drag_reports_no_target(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    match &world.last_drag {
        Some(Ok(DragOutcome::NoTarget)) => Ok(()),
        other => Err(eyre::eyre!("expected a discarded gesture, got {other:?}")),
    }
}

#[then("the drag reports the task as already in place")]
fn drag_reports_already_in_place(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    match &world.last_drag {
        Some(Ok(DragOutcome::AlreadyThere)) => Ok(()),
        other => Err(eyre::eyre!("expected an unchanged board, got {other:?}")),
    }
}

#[then(r#"the task "{title}" sits in the "{column}" column"#)]
fn the_task_sits_in_the_column(
    world: &ReconciliationWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let task = *world
        .task_ids
        .get(&title)
        .ok_or_else(|| eyre::eyre!("no seeded task titled '{title}'"))?;
    let target = BoardColumn::from_identifier(&column)
        .ok_or_else(|| eyre::eyre!("unknown column '{column}' in scenario"))?;
    let listed = world.store.column(target, SortBy::DueDate);
    if !listed.iter().any(|entry| entry.id() == task) {
        return Err(eyre::eyre!("expected '{title}' in the {column} column"));
    }
    Ok(())
}

#[then(r#"the stored row shows the "{column}" column"#)]
fn the_stored_row_shows_the_column(
    world: &ReconciliationWorld,
    column: String,
) -> Result<(), eyre::Report> {
    let target = BoardColumn::from_identifier(&column)
        .ok_or_else(|| eyre::eyre!("unknown column '{column}' in scenario"))?;
    let rows = world.gateway.rows("tasks");
    let row = rows.first().ok_or_else(|| eyre::eyre!("no stored task row"))?;
    let status = row
        .read_i64("status")
        .map_err(|err| eyre::eyre!("stored status column: {err}"))?;
    if status != target.status().code() {
        return Err(eyre::eyre!(
            "expected status {}, found {status}",
            target.status().code()
        ));
    }
    Ok(())
}

#[then("no write reaches the backend")]
fn no_write_reaches_the_backend(world: &ReconciliationWorld) -> Result<(), eyre::Report> {
    let journal = world.gateway.journal();
    if !journal.is_empty() {
        return Err(eyre::eyre!("expected an empty journal, found {journal:?}"));
    }
    Ok(())
}
