use anyhow::Result;
use owo_colors::OwoColorize;
use seminar_core::{AppContext, SeminarId};

use crate::commands::open_seminar;

pub async fn run(ctx: &AppContext, id: SeminarId) -> Result<()> {
    let controller = open_seminar(ctx, id).await?;

    match controller.export_calendar(id).await {
        Some(path) => println!("{} Saved {}", "✓".green(), path.display()),
        None => println!(
            "{}",
            "Could not export the calendar file (run with RUST_LOG=warn for details)".dimmed()
        ),
    }

    Ok(())
}
