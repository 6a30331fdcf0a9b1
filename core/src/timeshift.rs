use crate::errors::TimestampError;
use crate::subsurface::models::{ComputerDive, Dive, DiveLog};
use chrono::{Duration, NaiveDateTime};

/// Outcome of applying a [`TimeShift`] to a dive log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftReport {
    pub shifted: usize,
    /// Dives left untouched because their timestamp could not be read
    pub skipped: usize,
}

/// Moves every dive of a log by a fixed, possibly negative, duration
///
/// Dive computer records carry their own `date`/`time` attributes. Those are
/// left alone unless [`TimeShift::with_dive_computers`] is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeShift {
    duration: Duration,
    dive_computers: bool,
}

impl Default for TimeShift {
    fn default() -> Self {
        Self::new(Duration::zero())
    }
}

fn shift(instant: NaiveDateTime, duration: Duration) -> Result<NaiveDateTime, TimestampError> {
    instant
        .checked_add_signed(duration)
        .ok_or(TimestampError::OutOfRange)
}

impl TimeShift {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            dive_computers: false,
        }
    }

    pub fn with_dive_computers(mut self, enabled: bool) -> Self {
        self.dive_computers = enabled;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Shift all dives in place, in document order
    ///
    /// A dive without a readable timestamp is skipped and keeps all of its
    /// attributes, including those of its dive computers.
    pub fn apply(&self, log: &mut DiveLog) -> ShiftReport {
        let mut report = ShiftReport::default();

        for (index, dive) in log.dives_mut().enumerate() {
            if let Err(e) = self.shift_dive(dive) {
                tracing::warn!(
                    position = index + 1,
                    number = ?dive.number,
                    "Skipping dive: {e}"
                );
                report.skipped += 1;
                continue;
            }
            report.shifted += 1;

            if self.dive_computers {
                for computer in dive.computers.iter_mut() {
                    if let Err(e) = self.shift_computer(computer) {
                        tracing::debug!(
                            position = index + 1,
                            model = computer.model.as_str(),
                            "Leaving dive computer timestamp unchanged: {e}"
                        );
                    }
                }
            }
        }

        tracing::debug!(
            shifted = report.shifted,
            skipped = report.skipped,
            "Applied time shift of {}",
            self.duration
        );
        report
    }

    fn shift_dive(&self, dive: &mut Dive) -> Result<(), TimestampError> {
        let instant = dive.timestamp()?;
        let shifted = shift(instant, self.duration)?;

        tracing::trace!(
            number = ?dive.number,
            dive_time = ?dive.duration(),
            from = %instant,
            to = %shifted,
            "Shifting dive"
        );

        // Keep the original spelling when nothing moves
        if shifted != instant {
            dive.set_timestamp(&shifted);
        }
        Ok(())
    }

    fn shift_computer(&self, computer: &mut ComputerDive) -> Result<(), TimestampError> {
        let instant = computer.timestamp()?;
        let shifted = shift(instant, self.duration)?;

        if shifted != instant {
            computer.set_timestamp(&shifted);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::subsurface::{decode, encode};

    const DIVELOG: &str = include_str!("subsurface/test-data/divelog.xml");

    fn single_dive(date: &str, time: &str) -> DiveLog {
        let xml = format!(
            r#"<divelog program="subsurface" version="3"><dives><dive number="1" date="{date}" time="{time}" duration="42:00 min"/></dives></divelog>"#
        );
        decode(xml.as_bytes()).unwrap()
    }

    fn shifted(date: &str, time: &str, duration: Duration) -> (String, String) {
        let mut log = single_dive(date, time);
        TimeShift::new(duration).apply(&mut log);

        let dive = log.dives().next().unwrap();
        (dive.date.clone().unwrap(), dive.time.clone().unwrap())
    }

    fn pair(date: &str, time: &str) -> (String, String) {
        (date.to_string(), time.to_string())
    }

    #[test]
    fn test_shift_forward() {
        let duration = Duration::hours(2) + Duration::minutes(30);
        assert_eq!(
            pair("2023-06-15", "12:30:00"),
            shifted("2023-06-15", "10:00:00", duration)
        );
    }

    #[test]
    fn test_shift_into_next_day() {
        assert_eq!(
            pair("2023-06-16", "00:00:00"),
            shifted("2023-06-15", "10:00:00", Duration::hours(14))
        );
    }

    #[test]
    fn test_shift_backwards_into_previous_year() {
        assert_eq!(
            pair("2022-12-31", "23:30:00"),
            shifted("2023-01-01", "00:30:00", Duration::hours(-1))
        );
    }

    #[test]
    fn test_shift_across_month_end() {
        assert_eq!(
            pair("2024-03-01", "01:00:00"),
            shifted("2024-02-29", "23:00:00", Duration::hours(2))
        );
        assert_eq!(
            pair("2023-01-31", "22:00:00"),
            shifted("2023-02-01", "02:00:00", Duration::hours(-4))
        );
    }

    #[test]
    fn test_zero_shift_keeps_spelling() {
        // Single digit hours are accepted but would be written back padded
        assert_eq!(
            pair("2023-06-15", "9:05:00"),
            shifted("2023-06-15", "9:05:00", Duration::zero())
        );
    }

    #[test]
    fn test_zero_shift_is_identity() {
        let original = decode(DIVELOG.as_bytes()).unwrap();
        let mut log = original.clone();
        let report = TimeShift::default().apply(&mut log);

        assert_eq!(original, log);
        assert_eq!(ShiftReport { shifted: 2, skipped: 1 }, report);
    }

    #[test]
    fn test_skip_malformed_dive() {
        let mut log = decode(DIVELOG.as_bytes()).unwrap();
        let report = TimeShift::new(Duration::hours(1)).apply(&mut log);
        assert_eq!(ShiftReport { shifted: 2, skipped: 1 }, report);

        let dives = log.dives().collect::<Vec<_>>();
        assert_eq!(Some("11:00:00"), dives[0].time.as_deref());
        assert_eq!(Some("15:30:00"), dives[1].time.as_deref());
        assert_eq!(Some("not-a-date"), dives[2].date.as_deref());
        assert_eq!(Some("09:00:00"), dives[2].time.as_deref());
    }

    #[test]
    fn test_skip_loose_layouts() {
        let cases = [
            ("2023-6-5", "10:00:00"),
            ("23-06-15", "10:00:00"),
            ("2023-06-15", "10:0:0"),
            ("+2023-06-15", "10:00:00"),
            ("2023-06-15", "23:59:60"),
        ];

        for (date, time) in cases {
            let mut log = single_dive(date, time);
            let report = TimeShift::new(Duration::hours(1)).apply(&mut log);

            assert_eq!(ShiftReport { shifted: 0, skipped: 1 }, report, "{date} {time}");
            let dive = log.dives().next().unwrap();
            assert_eq!(Some(date), dive.date.as_deref());
            assert_eq!(Some(time), dive.time.as_deref());
        }
    }

    #[test]
    fn test_malformed_dive_does_not_stop_later_dives() {
        let xml = r#"<divelog><dives><dive date="not-a-date" time="10:00:00"/><dive date="2023-06-15" time="99:00:00"/><dive time="10:00:00"/><dive date="2023-06-15" time="10:00:00"/></dives></divelog>"#;
        let mut log = decode(xml.as_bytes()).unwrap();
        let original = log.clone();

        let report = TimeShift::new(Duration::minutes(5)).apply(&mut log);
        assert_eq!(ShiftReport { shifted: 1, skipped: 3 }, report);

        let dives = log.dives().collect::<Vec<_>>();
        let before = original.dives().collect::<Vec<_>>();
        for index in 0..3 {
            assert_eq!(before[index], dives[index]);
        }
        assert_eq!(Some("10:05:00"), dives[3].time.as_deref());
    }

    #[test]
    fn test_only_timestamps_change() {
        let original = decode(DIVELOG.as_bytes()).unwrap();
        let mut log = original.clone();
        TimeShift::new(Duration::hours(-3)).apply(&mut log);

        for (before, after) in original.dives().zip(log.dives()) {
            assert_eq!(
                Dive {
                    date: None,
                    time: None,
                    ..before.clone()
                },
                Dive {
                    date: None,
                    time: None,
                    ..after.clone()
                }
            );
        }
        assert_eq!(original.settings, log.settings);
    }

    #[test]
    fn test_absent_location_stays_absent() {
        for hours in [-36, -1, 1, 14, 48] {
            let mut log = decode(DIVELOG.as_bytes()).unwrap();
            TimeShift::new(Duration::hours(hours)).apply(&mut log);

            let mut output = Vec::new();
            encode(&log, &mut output).unwrap();
            let xml = String::from_utf8(output).unwrap();

            let second = xml
                .split("<dive ")
                .nth(2)
                .expect("second dive should be present");
            assert!(!second.contains("<location"), "shift: {hours}h");
        }
    }

    #[test]
    fn test_dive_computers_unchanged_by_default() {
        let mut log = decode(DIVELOG.as_bytes()).unwrap();
        TimeShift::new(Duration::hours(2)).apply(&mut log);

        let dive = log.dives().next().unwrap();
        assert_eq!(Some("12:00:00"), dive.time.as_deref());
        assert_eq!(Some("10:00:00"), dive.computers[0].time.as_deref());
    }

    #[test]
    fn test_dive_computers_opt_in() {
        let mut log = decode(DIVELOG.as_bytes()).unwrap();
        TimeShift::new(Duration::hours(-11))
            .with_dive_computers(true)
            .apply(&mut log);

        let dive = log.dives().next().unwrap();
        assert_eq!(Some("2023-06-14"), dive.date.as_deref());
        assert_eq!(Some("23:00:00"), dive.time.as_deref());
        assert_eq!(Some("2023-06-14"), dive.computers[0].date.as_deref());
        assert_eq!(Some("23:00:00"), dive.computers[0].time.as_deref());
    }

    #[test]
    fn test_overflowing_shift_skips_dive() {
        let mut log = single_dive("2023-06-15", "10:00:00");
        let original = log.clone();

        let report = TimeShift::new(Duration::MAX).apply(&mut log);
        assert_eq!(ShiftReport { shifted: 0, skipped: 1 }, report);
        assert_eq!(original, log);
    }
}
