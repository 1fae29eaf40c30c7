use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use crate::journal::entities::{JournalEntry, DEFAULT_MOOD};

use super::{
    dates::{parse_day, parse_day_or_today},
    output::{format_mood, preview},
    Session,
};

/// Characters of the body shown by `list`.
const PREVIEW_LENGTH: usize = 40;

#[derive(Debug, Parser)]
pub struct WriteCommand {
    #[arg(
        long,
        short,
        help = "Day of the entry. Examples are \"yesterday\", \"2 days ago\", \"15/03/2025\", \"2025-03-15\". Defaults to today"
    )]
    date: Option<String>,
    #[arg(long, short, default_value = "")]
    title: String,
    #[arg(long, short, default_value = "")]
    body: String,
    #[arg(long, short, default_value_t = DEFAULT_MOOD, help = "Mood from 0 (sad) to 3 (happy)")]
    mood: f64,
}

#[derive(Debug, Parser)]
pub struct EditCommand {
    #[arg(help = "Day of the entry to change")]
    date: String,
    #[arg(long, help = "Move the entry to this day")]
    to: Option<String>,
    #[arg(long, short)]
    title: Option<String>,
    #[arg(long, short)]
    body: Option<String>,
    #[arg(long, short)]
    mood: Option<f64>,
}

pub async fn process_write_command(
    session: &Session,
    WriteCommand {
        date,
        title,
        body,
        mood,
    }: WriteCommand,
) -> Result<()> {
    let key = parse_day_or_today(date.as_deref(), session.date_style, session.clock.as_ref())?;
    let entry = JournalEntry::new(title, body, mood);

    session
        .entries
        .save(key, &entry, session.clock.today())
        .await
        .with_context(|| format!("Failed to save entry for {key}"))?;

    println!("Saved entry for {}", session.date_style.display(key));
    Ok(())
}

pub async fn process_show_command(session: &Session, date: Option<String>) -> Result<()> {
    let key = parse_day_or_today(date.as_deref(), session.date_style, session.clock.as_ref())?;

    let profile = session.profile.load().await?;
    if profile.display_name.is_empty() {
        println!("Welcome");
    } else {
        println!("Welcome, {}", profile.display_name);
    }
    println!();

    match session.entries.load(key).await? {
        Some(entry) => {
            println!("{}", session.date_style.display(key));
            println!("{}", entry.title);
            if !entry.body.is_empty() {
                println!();
                println!("{}", entry.body);
            }
            println!();
            println!("Mood: {}", format_mood(entry.mood, true));
        }
        None => println!("Nothing written for {}", session.date_style.display(key)),
    }
    Ok(())
}

pub async fn process_edit_command(
    session: &Session,
    EditCommand {
        date,
        to,
        title,
        body,
        mood,
    }: EditCommand,
) -> Result<()> {
    let style = session.date_style;
    let clock = session.clock.as_ref();
    let old_key = parse_day(&date, style, clock)?;
    let new_key = match to {
        Some(to) => parse_day(&to, style, clock)?,
        None => old_key,
    };

    let Some(mut entry) = session.entries.load(old_key).await? else {
        return Err(anyhow!("No entry for {}", style.display(old_key)));
    };
    if let Some(title) = title {
        entry = entry.with_title(title);
    }
    if let Some(body) = body {
        entry = entry.with_body(body);
    }
    if let Some(mood) = mood {
        entry = entry.with_mood(mood);
    }

    session
        .entries
        .rename(old_key, new_key, &entry, clock.today())
        .await
        .with_context(|| format!("Failed to update entry for {old_key}"))?;

    if new_key != old_key {
        info!("Moved entry {old_key} to {new_key}");
        println!(
            "Moved entry from {} to {}",
            style.display(old_key),
            style.display(new_key)
        );
    } else {
        println!("Updated entry for {}", style.display(new_key));
    }
    Ok(())
}

pub async fn process_delete_command(session: &Session, date: &str) -> Result<()> {
    let key = parse_day(date, session.date_style, session.clock.as_ref())?;
    session.entries.delete(key).await?;
    println!("Deleted entry for {}", session.date_style.display(key));
    Ok(())
}

pub async fn process_list_command(session: &Session, limit: Option<usize>) -> Result<()> {
    let entries = session.entries.list_all().await?;
    if entries.is_empty() {
        println!("The journal is empty");
        return Ok(());
    }

    for (key, entry) in entries.into_iter().take(limit.unwrap_or(usize::MAX)) {
        println!(
            "{}\t{}\t{}\t{}",
            session.date_style.display(key),
            format_mood(entry.mood, true),
            entry.title,
            preview(&entry.body, PREVIEW_LENGTH)
        );
    }
    Ok(())
}
