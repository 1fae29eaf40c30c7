use chrono::{DateTime, Local, NaiveDate};

/// Represents an entity responsible for providing dates across application. The "current day"
/// used by entry validation is taken from here and passed explicitly, so tests can pin it.
pub trait Clock: Sync + Send + 'static {
    fn time(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.time().date_naive()
    }
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock stuck at a single moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Local> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::utils::time::local_day_start;

    use super::{Clock, FixedClock};

    #[test]
    fn fixed_clock_reports_its_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let clock = FixedClock(local_day_start(date));
        assert_eq!(clock.today(), date);
    }
}
