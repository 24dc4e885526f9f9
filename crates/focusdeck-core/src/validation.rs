//! Input checks for collaborators, applied before an action is built.
//!
//! The reducer tolerates bad input by ignoring it; these functions let a
//! caller tell the user why instead.

use crate::date::TimeOfDay;
use crate::error::ValidationError;
use crate::timer::TimerSettingsPatch;

/// Longest accepted interval length, in minutes.
pub const MAX_DURATION_MINUTES: u32 = 180;

/// Trimmed, non-empty text.
pub fn title<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field.to_string()));
    }
    Ok(trimmed)
}

pub fn pin_snippet(text: &str) -> Result<&str, ValidationError> {
    title("note", text)
}

pub fn time_range(start: TimeOfDay, end: TimeOfDay) -> Result<(), ValidationError> {
    if start >= end {
        return Err(ValidationError::InvalidTimeRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

/// A block needs a title and must end after it starts.
pub fn schedule_block(
    block_title: &str,
    start: TimeOfDay,
    end: TimeOfDay,
) -> Result<(), ValidationError> {
    title("title", block_title)?;
    time_range(start, end)
}

/// Every provided value is positive; durations are capped at
/// [`MAX_DURATION_MINUTES`].
pub fn timer_settings_patch(patch: &TimerSettingsPatch) -> Result<(), ValidationError> {
    let durations = [
        ("focusMinutes", patch.focus_minutes),
        ("shortBreakMinutes", patch.short_break_minutes),
        ("longBreakMinutes", patch.long_break_minutes),
    ];
    for (field, value) in durations {
        match value {
            Some(0) => return Err(ValidationError::NonPositive(field.to_string())),
            Some(v) if v > MAX_DURATION_MINUTES => {
                return Err(ValidationError::TooLong {
                    field: field.to_string(),
                    max: MAX_DURATION_MINUTES,
                })
            }
            _ => {}
        }
    }
    if patch.long_break_interval == Some(0) {
        return Err(ValidationError::NonPositive("longBreakInterval".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    #[test]
    fn title_trims_and_rejects_blank() {
        assert_eq!(title("title", "  Write report ").unwrap(), "Write report");
        assert_eq!(
            title("title", "   "),
            Err(ValidationError::EmptyField("title".into()))
        );
        assert!(pin_snippet("\n").is_err());
    }

    #[test]
    fn block_must_end_after_start() {
        assert!(schedule_block("Standup", at("09:00"), at("09:15")).is_ok());
        assert_eq!(
            schedule_block("Standup", at("10:00"), at("10:00")),
            Err(ValidationError::InvalidTimeRange {
                start: "10:00".into(),
                end: "10:00".into()
            })
        );
        assert!(schedule_block("", at("09:00"), at("10:00")).is_err());
    }

    #[test]
    fn settings_bounds() {
        assert!(timer_settings_patch(&TimerSettingsPatch::focus(180)).is_ok());
        assert_eq!(
            timer_settings_patch(&TimerSettingsPatch::focus(0)),
            Err(ValidationError::NonPositive("focusMinutes".into()))
        );
        assert!(matches!(
            timer_settings_patch(&TimerSettingsPatch::focus(181)),
            Err(ValidationError::TooLong { max: 180, .. })
        ));
        let interval = TimerSettingsPatch {
            long_break_interval: Some(0),
            ..TimerSettingsPatch::default()
        };
        assert!(timer_settings_patch(&interval).is_err());
        assert!(timer_settings_patch(&TimerSettingsPatch::default()).is_ok());
    }
}
