//! CLI habit commands — `list`, `add`, and `toggle`.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use lifegarden::config::GardenConfig;
use lifegarden::garden::store::NewHabit;
use lifegarden::garden::today;
use lifegarden::garden::types::Area;

pub fn list(config: &GardenConfig) -> Result<()> {
    let (_, store) = super::open_garden(config)?;
    let today = today();

    if store.habits().is_empty() {
        println!("No habits yet. Plant one with `lifegarden add`.");
        return Ok(());
    }

    for habit in store.habits() {
        let mark = if habit.is_completed_on(today) { "x" } else { " " };
        println!(
            "[{mark}] {} {:<28} {:<14} streak {:>3}  ({})",
            habit.emoji, habit.title, habit.area, habit.streak, habit.id
        );
        if !habit.description.is_empty() {
            println!("      {}", habit.description);
        }
    }
    Ok(())
}

pub fn add(
    config: &GardenConfig,
    title: &str,
    area: &str,
    description: Option<String>,
    emoji: Option<String>,
) -> Result<()> {
    let area: Area = area.parse().map_err(anyhow::Error::msg)?;
    let (_, mut store) = super::open_garden(config)?;

    let mut new = NewHabit::new(title, area);
    new.description = description;
    new.emoji = emoji;
    let habit = store.create(new)?;

    println!("Planted {} {} ({})", habit.emoji, habit.title, habit.id);
    Ok(())
}

pub fn toggle(config: &GardenConfig, id: &str, date: Option<&str>) -> Result<()> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date {raw:?}, expected YYYY-MM-DD"))?,
        None => today(),
    };
    let (_, mut store) = super::open_garden(config)?;

    let Some(outcome) = store.toggle_completion(id, date) else {
        bail!("no habit with id {id}");
    };

    let verb = if outcome.completed { "Completed" } else { "Undid" };
    let stats = store.stats();
    println!(
        "{verb} on {date}: streak {}, {:+} XP (level {}, {} XP)",
        outcome.streak, outcome.xp_delta, stats.level, stats.xp
    );
    Ok(())
}
