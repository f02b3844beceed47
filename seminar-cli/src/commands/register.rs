use anyhow::Result;
use owo_colors::OwoColorize;
use seminar_core::registration::RegistrationForm;
use seminar_core::{AppContext, SeminarId};

use crate::commands::open_seminar;

pub async fn run(ctx: &AppContext, id: SeminarId, form: RegistrationForm) -> Result<()> {
    let mut controller = open_seminar(ctx, id).await?;
    controller.begin_registration()?;

    let title = controller
        .view()
        .seminar()
        .map(|s| s.title.clone())
        .unwrap_or_default();

    controller.submit_registration(&form).await?;

    println!("{} Registered for {}", "✓".green(), title.bold());
    if let Some(banner) = controller.banner() {
        println!("{}", banner.yellow());
    }

    Ok(())
}
