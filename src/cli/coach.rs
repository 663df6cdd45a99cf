//! CLI advisor commands — `wisdom`, `suggest`, and the `chat` REPL.

use anyhow::{bail, Result};
use lifegarden::advisor::Advisor;
use lifegarden::config::GardenConfig;
use lifegarden::garden::coach::ChatSession;
use lifegarden::garden::today;
use lifegarden::garden::wisdom::WisdomCache;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub async fn wisdom(config: &GardenConfig) -> Result<()> {
    let (kv, store) = super::open_garden(config)?;
    let advisor = Advisor::from_config(&config.advisor);
    let cache = WisdomCache::new(kv);

    let message = cache.message_for(today(), store.habits(), &advisor).await;
    println!("{message}");
    Ok(())
}

pub async fn suggest(config: &GardenConfig, goal: &str, accept: Option<usize>) -> Result<()> {
    if goal.trim().is_empty() {
        bail!("goal must not be empty");
    }
    let (_, mut store) = super::open_garden(config)?;
    let advisor = Advisor::from_config(&config.advisor);

    let mut suggestions = advisor.suggest_habits(goal, &store.titles()).await;
    if suggestions.is_empty() {
        println!("No suggestions right now. Try again in a little while.");
        return Ok(());
    }

    for (i, s) in suggestions.iter().enumerate() {
        println!("{}. {} {} [{}]", i + 1, s.emoji, s.title, s.area);
        println!("   {}", s.description);
    }

    if let Some(n) = accept {
        if n == 0 || n > suggestions.len() {
            bail!("suggestion {n} does not exist (1-{})", suggestions.len());
        }
        let habit = store.adopt(suggestions.swap_remove(n - 1))?;
        println!("\nPlanted {} {} ({})", habit.emoji, habit.title, habit.id);
    }
    Ok(())
}

pub async fn chat(config: &GardenConfig) -> Result<()> {
    let advisor = Advisor::from_config(&config.advisor);
    let mut session = ChatSession::new();

    if let Some(greeting) = session.history().first() {
        println!("Sage: {}", greeting.text);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }
        if let Some(reply) = session.send(&advisor, &line).await {
            println!("Sage: {reply}");
        }
    }
    Ok(())
}
