use anyhow::Result;
use owo_colors::OwoColorize;
use seminar_core::{AppContext, SeminarId};

use crate::commands::open_seminar;

pub async fn run(ctx: &AppContext, id: SeminarId) -> Result<()> {
    let mut controller = open_seminar(ctx, id).await?;
    controller.cancel_registration(id).await?;

    println!("{} Registration for seminar #{} cancelled", "✓".green(), id);
    Ok(())
}
