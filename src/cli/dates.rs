use std::fmt::Display;

use anyhow::Result;
use chrono_english::parse_date_string;
use clap::{CommandFactory, ValueEnum};

use crate::{journal::date_key::DateKey, utils::clock::Clock};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DateStyle {
    Uk,
    Us,
}

impl DateStyle {
    /// How days are shown to the user.
    pub fn display_format(&self) -> &'static str {
        match self {
            DateStyle::Uk => "%d/%m/%Y",
            DateStyle::Us => "%m/%d/%Y",
        }
    }

    pub fn display(&self, key: DateKey) -> String {
        key.date().format(self.display_format()).to_string()
    }
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Reads a day given on the command line. Canonical keys are taken as is, anything else goes
/// through natural language parsing: "yesterday", "3 days ago", "15/03/2025".
pub fn parse_day(input: &str, style: DateStyle, clock: &dyn Clock) -> Result<DateKey> {
    if let Ok(key) = DateKey::parse(input) {
        return Ok(key);
    }
    match parse_date_string(input, clock.time(), style.into()) {
        Ok(moment) => Ok(DateKey::format(&moment)),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to read date '{input}': {e}"),
            )
            .into()),
    }
}

/// [parse_day] with today as the default.
pub fn parse_day_or_today(
    input: Option<&str>,
    style: DateStyle,
    clock: &dyn Clock,
) -> Result<DateKey> {
    match input {
        Some(input) => parse_day(input, style, clock),
        None => Ok(DateKey::from_date(clock.today())),
    }
}
