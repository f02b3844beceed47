use anyhow::Result;
use owo_colors::OwoColorize;
use seminar_core::rating::{Rating, RatingDimension, RatingScore};
use seminar_core::{AppContext, SeminarId};

use crate::commands::open_seminar;
use crate::render::Render;

pub async fn run(
    ctx: &AppContext,
    id: SeminarId,
    skill: Option<u8>,
    quality: Option<u8>,
    usefulness: Option<u8>,
) -> Result<()> {
    let mut rating = Rating::default();
    for (dimension, value) in [
        (RatingDimension::Skill, skill),
        (RatingDimension::Quality, quality),
        (RatingDimension::Usefulness, usefulness),
    ] {
        let score = value.map(RatingScore::new).transpose()?;
        rating.set(dimension, score);
    }

    let mut controller = open_seminar(ctx, id).await?;
    let response = controller.submit_rating(id, &rating).await?;

    println!("{} Rated seminar #{}: {}", "✓".green(), id, rating.render());
    println!("{}", serde_json::to_string_pretty(&response)?.dimmed());

    Ok(())
}
