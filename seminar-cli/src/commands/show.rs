use anyhow::Result;
use seminar_core::view::View;
use seminar_core::{AppContext, SeminarId};

use crate::commands::open_seminar;
use crate::render::render_details;

pub async fn run(ctx: &AppContext, id: SeminarId) -> Result<()> {
    let controller = open_seminar(ctx, id).await?;

    if let View::Details(ref seminar) = *controller.view() {
        for line in render_details(seminar, controller.is_registered(seminar.id)) {
            println!("{line}");
        }
    }

    Ok(())
}
