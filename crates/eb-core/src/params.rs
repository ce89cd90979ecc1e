//! Run parameters for a single simulation invocation.

use core::fmt;

use crate::error::{CoreError, CoreResult};

/// Days per month in a climate year. Climate files always hold 365 days.
const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A calendar day within the climate year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayMonth {
    pub day: u8,
    pub month: u8,
}

impl DayMonth {
    pub fn new(day: u8, month: u8) -> Self {
        Self { day, month }
    }

    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= DAYS_IN_MONTH[usize::from(self.month - 1)]
    }

    /// 1-based day of the climate year. Only meaningful for valid dates;
    /// months past December count as December.
    pub fn day_of_year(&self) -> u16 {
        let before: u16 = DAYS_IN_MONTH[..usize::from(self.month.saturating_sub(1).min(11))]
            .iter()
            .map(|d| u16::from(*d))
            .sum();
        before + u16::from(self.day)
    }
}

impl fmt::Display for DayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.", self.day, self.month)
    }
}

/// Everything that varies between two simulation invocations of one model.
///
/// Built once per variant and never mutated while the engine runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunParameters {
    pub start: DayMonth,
    pub end: DayMonth,
    /// Start-up period in days.
    pub pre_days: u32,
    /// Building time steps per hour.
    pub building_steps: u32,
    /// Plant time steps per building time step.
    pub plant_steps: u32,
    pub variant: String,
    /// Model configuration file name without extension.
    pub config: String,
}

impl RunParameters {
    pub fn validate(&self) -> CoreResult<()> {
        validate_label(&self.variant)?;
        if self.config.trim().is_empty() {
            return Err(CoreError::InvalidLabel {
                label: self.config.clone(),
                reason: "configuration name is empty",
            });
        }
        if !self.start.is_valid() {
            return Err(CoreError::InvalidDate {
                what: "start",
                day: self.start.day,
                month: self.start.month,
            });
        }
        if !self.end.is_valid() {
            return Err(CoreError::InvalidDate {
                what: "end",
                day: self.end.day,
                month: self.end.month,
            });
        }
        if self.end.day_of_year() < self.start.day_of_year() {
            return Err(CoreError::InvertedPeriod {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        for (what, value) in [
            ("pre_days", self.pre_days),
            ("building_steps", self.building_steps),
            ("plant_steps", self.plant_steps),
        ] {
            if value == 0 {
                return Err(CoreError::NonPositive { what, value });
            }
        }
        Ok(())
    }

    /// Plant time steps per hour.
    pub fn plant_steps_per_hour(&self) -> u32 {
        self.building_steps.saturating_mul(self.plant_steps)
    }

    /// `<config>.cfg`
    pub fn config_file(&self) -> String {
        format!("{}.cfg", self.config)
    }
}

/// Checks that a variant label can prefix file names and name directories.
pub fn validate_label(label: &str) -> CoreResult<()> {
    let reason = if label.is_empty() {
        Some("label is empty")
    } else if label.contains(['/', '\\']) {
        Some("label contains a path separator")
    } else if label.contains('.') {
        Some("label contains '.'")
    } else if label.chars().any(|c| c.is_whitespace() || c.is_control()) {
        Some("label contains whitespace or control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(CoreError::InvalidLabel {
            label: label.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RunParameters {
        RunParameters {
            start: DayMonth::new(1, 1),
            end: DayMonth::new(31, 12),
            pre_days: 7,
            building_steps: 4,
            plant_steps: 2,
            variant: "base".to_string(),
            config: "house".to_string(),
        }
    }

    #[test]
    fn full_year_is_valid() {
        params().validate().unwrap();
        assert_eq!(DayMonth::new(31, 12).day_of_year(), 365);
        assert_eq!(DayMonth::new(1, 3).day_of_year(), 60);
    }

    #[test]
    fn rejects_bad_dates() {
        let mut p = params();
        p.start = DayMonth::new(29, 2);
        assert!(matches!(
            p.validate(),
            Err(CoreError::InvalidDate { what: "start", .. })
        ));

        let mut p = params();
        p.end = DayMonth::new(1, 13);
        assert!(matches!(
            p.validate(),
            Err(CoreError::InvalidDate { what: "end", .. })
        ));
    }

    #[test]
    fn rejects_inverted_period() {
        let mut p = params();
        p.start = DayMonth::new(15, 6);
        p.end = DayMonth::new(14, 6);
        assert!(matches!(p.validate(), Err(CoreError::InvertedPeriod { .. })));
    }

    #[test]
    fn rejects_zero_steps() {
        let mut p = params();
        p.plant_steps = 0;
        assert_eq!(
            p.validate(),
            Err(CoreError::NonPositive {
                what: "plant_steps",
                value: 0
            })
        );
    }

    #[test]
    fn labels() {
        assert!(validate_label("ctl_a-1").is_ok());
        for bad in ["", "a/b", "a\\b", "a.b", "a b"] {
            assert!(validate_label(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn day_of_year_tolerates_out_of_range_months() {
        assert_eq!(DayMonth::new(1, 0).day_of_year(), 1);
        assert_eq!(DayMonth::new(1, 13).day_of_year(), DayMonth::new(1, 12).day_of_year());
        assert_eq!(DayMonth::new(1, 200).day_of_year(), 335);
    }

    #[test]
    fn plant_steps_per_hour_multiplies() {
        assert_eq!(params().plant_steps_per_hour(), 8);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn valid_dates_fall_inside_the_climate_year(day in 0u8..40, month in 0u8..15) {
            let date = DayMonth::new(day, month);
            if date.is_valid() {
                prop_assert!((1..=365).contains(&date.day_of_year()));
            } else {
                prop_assert!(month == 0 || month > 12 || day == 0 || day > 28);
            }
        }

        #[test]
        fn day_of_year_orders_like_the_calendar(
            a in (1u8..=12, 1u8..=28),
            b in (1u8..=12, 1u8..=28),
        ) {
            let da = DayMonth::new(a.1, a.0);
            let db = DayMonth::new(b.1, b.0);
            prop_assert_eq!(da.day_of_year() < db.day_of_year(), (a.0, a.1) < (b.0, b.1));
        }
    }
}
