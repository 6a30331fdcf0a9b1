use crate::arguments::OffsetOptions;
use anyhow::Result;
use chrono::NaiveDateTime;
use subsurface_toolbox_core::errors::DurationError;
use subsurface_toolbox_core::format_duration;

fn difference(from: &NaiveDateTime, to: &NaiveDateTime) -> Result<String, DurationError> {
    format_duration(&(*to - *from))
}

pub(crate) fn offset(options: &OffsetOptions) -> Result<()> {
    let shift = difference(&options.from, &options.to)?;
    tracing::debug!(from = %options.from, to = %options.to, "Computed offset {shift}");

    println!("{shift}");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use subsurface_toolbox_core::parse_duration;
    use subsurface_toolbox_core::subsurface::timestamp::parse_compact;

    fn offset_between(from: &str, to: &str) -> String {
        difference(&parse_compact(from).unwrap(), &parse_compact(to).unwrap()).unwrap()
    }

    #[test]
    fn test_offset() {
        assert_eq!(
            "2h30m0s",
            offset_between("2023-06-15-10:00:00", "2023-06-15-12:30:00")
        );
        assert_eq!(
            "-2h30m0s",
            offset_between("2023-06-15-12:30:00", "2023-06-15-10:00:00")
        );
        assert_eq!(
            "0s",
            offset_between("2023-06-15-10:00:00", "2023-06-15-10:00:00")
        );
    }

    #[test]
    fn test_offset_across_years() {
        assert_eq!(
            "1h0m0s",
            offset_between("2022-12-31-23:30:00", "2023-01-01-00:30:00")
        );
        assert_eq!(
            "8784h0m0s",
            offset_between("2024-01-01-00:00:00", "2025-01-01-00:00:00")
        );
    }

    #[test]
    fn test_offset_is_valid_shift() {
        let from = "2023-03-01-08:15:30";
        let to = "2023-02-27-22:00:00";
        let shift = parse_duration(&offset_between(from, to)).unwrap();

        assert_eq!(
            parse_compact(to).unwrap(),
            parse_compact(from).unwrap() + shift
        );
    }
}
