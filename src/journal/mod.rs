//! The journal: at most one [entities::JournalEntry] per [date_key::DateKey], kept in a
//! [KeyValueBackend](crate::storage::backend::KeyValueBackend) namespace by
//! [entry_store::EntryStore].

pub mod date_key;
pub mod entities;
pub mod entry_store;
pub mod errors;
