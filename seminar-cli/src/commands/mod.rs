pub mod cancel;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod list;
pub mod rate;
pub mod register;
pub mod show;

use anyhow::Result;
use seminar_core::{AppContext, SeminarController, SeminarId};

/// Load the seminar list and open the details of `id`.
pub async fn open_seminar(ctx: &AppContext, id: SeminarId) -> Result<SeminarController<'_>> {
    let mut controller = ctx.seminar_controller();
    controller.refresh().await?;
    controller.select_id(id)?;
    Ok(controller)
}
