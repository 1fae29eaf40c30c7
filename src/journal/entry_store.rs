use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::storage::backend::KeyValueBackend;

use super::{
    date_key::DateKey,
    entities::{decode, encode, JournalEntry},
    errors::{StoreError, StoreResult, ValidationError},
};

/// CRUD over the date indexed namespace of a [KeyValueBackend]. The store is the only writer of
/// date shaped keys; any other key in the namespace is left alone and never read as an entry.
pub struct EntryStore<B: KeyValueBackend> {
    backend: B,
}

impl<B: KeyValueBackend> EntryStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Writes `entry` under `key`, replacing whatever was there. `today` is the current local
    /// day; entries for later days are refused.
    #[instrument(skip(self, entry))]
    pub async fn save(
        &self,
        key: DateKey,
        entry: &JournalEntry,
        today: NaiveDate,
    ) -> StoreResult<()> {
        validate(key, entry, today)?;
        self.backend.set(&key.to_string(), &encode(entry)).await?;
        info!("Saved entry");
        Ok(())
    }

    /// Reads the entry of a day. `Ok(None)` means there is no entry; a value that doesn't decode
    /// is [StoreError::CorruptEntry].
    #[instrument(skip(self))]
    pub async fn load(&self, key: DateKey) -> StoreResult<Option<JournalEntry>> {
        let Some(value) = self.backend.get(&key.to_string()).await? else {
            debug!("No entry");
            return Ok(None);
        };
        decode(&value)
            .map(Some)
            .map_err(|source| StoreError::CorruptEntry { key, source })
    }

    /// Like [EntryStore::load], with a blank draft standing in for a missing entry.
    pub async fn load_or_draft(&self, key: DateKey) -> StoreResult<JournalEntry> {
        Ok(self.load(key).await?.unwrap_or_else(JournalEntry::draft))
    }

    /// Removes the entry of a day. Removing a missing entry succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: DateKey) -> StoreResult<()> {
        self.backend.remove(&key.to_string()).await?;
        info!("Deleted entry");
        Ok(())
    }

    /// Moves an edited entry from `old_key` to `new_key`.
    ///
    /// The new key is written before the old one is removed. If the write fails the old entry
    /// is untouched; if the removal fails (or the process dies in between) both keys hold the
    /// entry. A duplicate can be cleaned up, a lost entry can't.
    #[instrument(skip(self, entry))]
    pub async fn rename(
        &self,
        old_key: DateKey,
        new_key: DateKey,
        entry: &JournalEntry,
        today: NaiveDate,
    ) -> StoreResult<()> {
        self.save(new_key, entry, today).await?;
        if new_key != old_key {
            self.backend.remove(&old_key.to_string()).await?;
            info!("Removed entry at previous date");
        }
        Ok(())
    }

    /// All entries of the namespace, most recent first. Keys that aren't dates are ignored and
    /// values that don't decode are skipped so one damaged entry can't hide the others.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> StoreResult<Vec<(DateKey, JournalEntry)>> {
        let keys = self
            .backend
            .list_keys()
            .await?
            .into_iter()
            .filter(|key| DateKey::is_valid(key))
            .collect::<Vec<_>>();

        let values = self.backend.get_many(&keys).await?;

        let mut entries = values
            .into_iter()
            .filter_map(|(raw_key, value)| {
                let key = DateKey::parse(&raw_key).ok()?;
                // A key listed a moment ago can be gone by the time it's fetched.
                let value = value?;
                match decode(&value) {
                    Ok(entry) => Some((key, entry)),
                    Err(e) => {
                        warn!("Skipping corrupted entry {key}: {e}");
                        None
                    }
                }
            })
            .collect::<Vec<_>>();

        entries.sort_by(|a, b| b.0.cmp(&a.0));
        debug!("Listed {} entries", entries.len());
        Ok(entries)
    }
}

fn validate(key: DateKey, entry: &JournalEntry, today: NaiveDate) -> Result<(), ValidationError> {
    entry.validate()?;
    if key.is_after(today) {
        return Err(ValidationError::FutureDate { key, today });
    }
    Ok(())
}
