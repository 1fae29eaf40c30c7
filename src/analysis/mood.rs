use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate};
use tracing::debug;

use crate::{
    journal::{
        date_key::DateKey,
        entities::has_valid_mood,
        entry_store::EntryStore,
        errors::StoreResult,
    },
    storage::backend::KeyValueBackend,
    utils::percentage::{count_percentage, Percentage},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoodClass {
    Sad,
    Neutral,
    Happy,
}

impl MoodClass {
    pub const ALL: [MoodClass; 3] = [MoodClass::Sad, MoodClass::Neutral, MoodClass::Happy];
}

impl Display for MoodClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoodClass::Sad => write!(f, "sad"),
            MoodClass::Neutral => write!(f, "neutral"),
            MoodClass::Happy => write!(f, "happy"),
        }
    }
}

/// One day of the mood chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodPoint {
    pub key: DateKey,
    pub mood: f64,
}

impl MoodPoint {
    /// Local midnight of the day, the x coordinate of the point.
    pub fn at(&self) -> DateTime<Local> {
        self.key.local_midnight()
    }
}

/// Number of days in each [MoodClass] plus the mean mood of a series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoodSummary {
    pub sad: usize,
    pub neutral: usize,
    pub happy: usize,
    pub average: Option<f64>,
}

impl MoodSummary {
    pub fn from_series(series: &[MoodPoint]) -> Self {
        let mut summary = MoodSummary::default();
        for point in series {
            match classify(point.mood) {
                MoodClass::Sad => summary.sad += 1,
                MoodClass::Neutral => summary.neutral += 1,
                MoodClass::Happy => summary.happy += 1,
            }
        }
        if !series.is_empty() {
            summary.average =
                Some(series.iter().map(|p| p.mood).sum::<f64>() / series.len() as f64);
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.sad + self.neutral + self.happy
    }

    pub fn count(&self, class: MoodClass) -> usize {
        match class {
            MoodClass::Sad => self.sad,
            MoodClass::Neutral => self.neutral,
            MoodClass::Happy => self.happy,
        }
    }

    pub fn share(&self, class: MoodClass) -> Percentage {
        count_percentage(self.count(class), self.total())
    }
}

/// Buckets a mood: `[0, 1)` is sad, `[1, 2)` neutral, `[2, 3]` happy.
pub fn classify(mood: f64) -> MoodClass {
    if mood < 1.0 {
        MoodClass::Sad
    } else if mood < 2.0 {
        MoodClass::Neutral
    } else {
        MoodClass::Happy
    }
}

/// Turns the entries of an [EntryStore] into a chart ready series.
pub struct MoodAggregator<'a, B: KeyValueBackend> {
    store: &'a EntryStore<B>,
}

impl<'a, B: KeyValueBackend> MoodAggregator<'a, B> {
    pub fn new(store: &'a EntryStore<B>) -> Self {
        Self { store }
    }

    /// Moods of every entry, oldest first. Entries with a mood outside of the valid range are
    /// left out of the chart.
    pub async fn series(&self) -> StoreResult<Vec<MoodPoint>> {
        let mut series = self
            .store
            .list_all()
            .await?
            .into_iter()
            .filter(|(_, entry)| has_valid_mood(entry.mood))
            .map(|(key, entry)| MoodPoint {
                key,
                mood: entry.mood,
            })
            .collect::<Vec<_>>();

        series.sort_by_key(|point| point.key);
        debug!("Built series of {} points", series.len());
        Ok(series)
    }

    /// [MoodAggregator::series] limited to the days from `start` to `end`, both inclusive.
    pub async fn series_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<MoodPoint>> {
        let mut series = self.series().await?;
        series.retain(|point| (start..=end).contains(&point.key.date()));
        Ok(series)
    }

    pub async fn summary(&self) -> StoreResult<MoodSummary> {
        Ok(MoodSummary::from_series(&self.series().await?))
    }

    pub fn classify(mood: f64) -> MoodClass {
        classify(mood)
    }
}
