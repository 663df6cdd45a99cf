use anyhow::Result;
use lifegarden::config::GardenConfig;
use lifegarden::garden::growth::{self, PlantStage};
use lifegarden::garden::progress::XP_PER_LEVEL;

/// Display level, XP and life balance in the terminal.
pub fn stats(config: &GardenConfig) -> Result<()> {
    let (_, store) = super::open_garden(config)?;
    let stats = store.stats();

    println!("Garden Statistics");
    println!("{}", "=".repeat(40));
    println!("  Level:               {}", stats.level);
    println!("  Total XP:            {}", stats.xp);
    println!(
        "  Next level in:       {} XP",
        XP_PER_LEVEL - stats.xp.rem_euclid(XP_PER_LEVEL)
    );
    println!();

    println!("Life Balance:");
    for (area, xp) in growth::area_balance(stats) {
        println!("  {} {:<14} {}", area.emoji(), area, xp);
    }
    println!();

    println!("Top Streaks:");
    let top = growth::top_streaks(store.habits());
    if top.is_empty() {
        println!("  (none yet)");
    }
    for habit in top {
        println!("  {:<28} {}", habit.title, habit.streak);
    }

    Ok(())
}

/// Draw each habit as a plant sized by its streak.
pub fn garden(config: &GardenConfig) -> Result<()> {
    let (_, store) = super::open_garden(config)?;
    let habits = store.habits();

    println!("My Life Garden — {} active plants", growth::active_plants(habits));
    println!("{}", "=".repeat(40));
    if habits.is_empty() {
        println!("  Plant your first seed...");
    }
    for habit in habits {
        let stage = PlantStage::for_streak(habit.streak);
        let filled = (growth::growth_percent(habit.streak) / 10) as usize;
        println!(
            "  {:<3} {:<28} [{}{}] {} days",
            stage.glyph(),
            habit.title,
            "#".repeat(filled),
            "-".repeat(10 - filled),
            habit.streak
        );
    }
    Ok(())
}
