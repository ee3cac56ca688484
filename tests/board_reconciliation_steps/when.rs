//! When steps for board reconciliation BDD scenarios.

use super::world::{ReconciliationWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the task "{title}" is dragged to the "{column}" column"#)]
fn the_task_is_dragged(
    world: &mut ReconciliationWorld,
    title: String,
    column: String,
) -> Result<(), eyre::Report> {
    let task = *world
        .task_ids
        .get(&title)
        .ok_or_else(|| eyre::eyre!("no seeded task titled '{title}'"))?;
    world.last_drag = Some(run_async(world.reconciler.drag_end(task, Some(&column))));
    Ok(())
}

#[when(r#"the task "{title}" is dropped outside every column"#)]
fn the_task_is_dropped_outside(
    world: &mut ReconciliationWorld,
    title: String,
) -> Result<(), eyre::Report> {
    let task = *world
        .task_ids
        .get(&title)
        .ok_or_else(|| eyre::eyre!("no seeded task titled '{title}'"))?;
    world.last_drag = Some(run_async(world.reconciler.drag_end(task, None)));
    Ok(())
}
