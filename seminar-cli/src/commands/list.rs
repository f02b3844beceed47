use anyhow::Result;
use owo_colors::OwoColorize;
use seminar_core::AppContext;
use seminar_core::view::Tab;

use crate::render::{Render, pluralize};

pub async fn run(ctx: &AppContext, past: bool) -> Result<()> {
    let mut controller = ctx.seminar_controller();
    controller.refresh().await?;

    let tab = if past { Tab::Past } else { Tab::Upcoming };
    controller.set_tab(tab);

    let seminars = controller.visible();
    let heading = match tab {
        Tab::Upcoming => "Upcoming Seminars",
        Tab::Past => "Past Seminars",
    };

    println!("{}", heading.bold());

    if let Some(partition) = controller.partition() {
        let as_of = partition.reference.with_timezone(&chrono::Local);
        println!(
            "{}",
            format!(
                "Showing {} {} {} as of {}",
                seminars.len(),
                tab,
                pluralize("seminar", seminars.len()),
                as_of.format("%Y-%m-%d %H:%M")
            )
            .dimmed()
        );

        for (seminar, err) in &partition.unparseable {
            println!(
                "{} {} {}",
                "!".yellow(),
                seminar.title,
                format!("(skipped: {err})").dimmed()
            );
        }
    }

    println!();

    if seminars.is_empty() {
        println!("{}", format!("No {tab} seminars.").dimmed());
        return Ok(());
    }

    for seminar in seminars {
        let marker = if controller.is_registered(seminar.id) {
            "✓".green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {}", marker, seminar.render());
    }

    Ok(())
}
