use anyhow::Result;
use clap::Parser;

use crate::analysis::mood::{MoodAggregator, MoodClass, MoodPoint, MoodSummary};

use super::{
    dates::{parse_day, DateStyle},
    output::{format_mood, mood_bar, mood_emoji},
    Session,
};

#[derive(Debug, Parser)]
pub struct TrendCommand {
    #[arg(
        long = "start",
        short,
        help = "First day of the chart. Examples are \"1 week ago\", \"15/03/2025\", \"2025-03-15\""
    )]
    start_date: Option<String>,
    #[arg(
        long = "end",
        short,
        help = "Last day of the chart. Examples are \"yesterday\", \"15/03/2025\", \"2025-03-15\""
    )]
    end_date: Option<String>,
}

/// Command to process `trend`. Prints mood per day, oldest first, followed by how the days split
/// between sad, neutral and happy.
pub async fn process_trend_command(
    session: &Session,
    TrendCommand {
        start_date,
        end_date,
    }: TrendCommand,
) -> Result<()> {
    let style = session.date_style;
    let clock = session.clock.as_ref();
    let aggregator = MoodAggregator::new(&session.entries);

    let series = match (start_date, end_date) {
        (None, None) => aggregator.series().await?,
        (start, end) => {
            let start = match start {
                Some(s) => parse_day(&s, style, clock)?.date(),
                None => chrono::NaiveDate::MIN,
            };
            let end = match end {
                Some(s) => parse_day(&s, style, clock)?.date(),
                None => clock.today(),
            };
            aggregator.series_between(start, end).await?
        }
    };

    if series.is_empty() {
        println!("No moods recorded for this period");
        return Ok(());
    }

    print_chart(&series, style);
    println!();
    print_summary(&MoodSummary::from_series(&series));
    Ok(())
}

fn print_chart(series: &[MoodPoint], style: DateStyle) {
    for point in series {
        println!(
            "{}\t{}\t{}",
            style.display(point.key),
            format_mood(point.mood, true),
            mood_bar(point.mood, true)
        );
    }
}

fn print_summary(summary: &MoodSummary) {
    for class in MoodClass::ALL {
        println!(
            "{} {}\t{}\t{}",
            mood_emoji(class),
            class,
            summary.count(class),
            summary.share(class)
        );
    }
    if let Some(average) = summary.average {
        println!("Average\t{}", format_mood(average, true));
    }
}
