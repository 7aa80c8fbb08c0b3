use super::{ChronologyAlgorithm, invalid_date, locate_in_year, pivot_out_of_range};
use crate::date::ChronologyDate;
use crate::definition::{AlgorithmKind, ChronologyDefinition, MonthDefinition};
use crate::error::{ChronologyError, ChronologyResult};
use crate::formula::LeapYearRule;

/// A calendar system described entirely by data: an epoch, a month table
/// and a compiled leap-year rule.
///
/// Year 1 month 1 day 1 falls on `epoch_pivot`. Years are laid end to end
/// in both directions from there, so conversions walk year by year.
#[derive(Debug, Clone)]
pub struct FormulaCalendar {
    id: String,
    epoch_pivot: i64,
    months: Vec<MonthDefinition>,
    leap_rule: LeapYearRule,
}

impl FormulaCalendar {
    /// ## Summary
    /// Builds a calendar from a `FORMULA` chronology document, compiling
    /// its leap-year rule.
    ///
    /// ## Errors
    /// - `UnsupportedAlgorithm` for any other algorithm type.
    /// - `InvalidDefinition` for an empty month table, a zero-length month
    ///   or a missing leap-year rule.
    /// - `Formula` if the leap-year rule does not compile.
    pub fn from_definition(definition: &ChronologyDefinition) -> ChronologyResult<Self> {
        let id = definition.id.trim();
        if id.is_empty() {
            return Err(invalid_definition(id, "identifier is empty"));
        }

        if definition.algorithms.kind != AlgorithmKind::Formula {
            return Err(ChronologyError::UnsupportedAlgorithm(
                definition.algorithms.kind.to_string(),
            ));
        }

        let months = &definition.structure.months;
        if months.is_empty() {
            return Err(invalid_definition(id, "no months defined"));
        }
        if let Some(month) = months
            .iter()
            .find(|month| month.days == 0 || month.leap_days == Some(0))
        {
            return Err(invalid_definition(
                id,
                &format!("month {} has no days", month.name),
            ));
        }

        let Some(source) = definition.algorithms.leap_year.as_deref() else {
            return Err(invalid_definition(id, "missing leap_year formula"));
        };
        let leap_rule = LeapYearRule::compile(source)?;

        Ok(Self {
            id: id.to_string(),
            epoch_pivot: definition.structure.epoch_pivot,
            months: months.clone(),
            leap_rule,
        })
    }

    #[must_use]
    pub fn leap_rule(&self) -> &LeapYearRule {
        &self.leap_rule
    }

    fn year_length(&self, year: i32) -> i64 {
        let leap = self.is_leap_year(year);
        self.months
            .iter()
            .map(|month| i64::from(month.days_in(leap)))
            .sum()
    }

    fn year_start(&self, year: i32) -> i64 {
        let mut start = self.epoch_pivot;
        if year >= 1 {
            for y in 1..year {
                start += self.year_length(y);
            }
        } else {
            for y in year..1 {
                start -= self.year_length(y);
            }
        }
        start
    }
}

fn invalid_definition(id: &str, reason: &str) -> ChronologyError {
    ChronologyError::InvalidDefinition {
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

impl ChronologyAlgorithm for FormulaCalendar {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_pivot(&self, year: i32, month: u32, day: u32) -> ChronologyResult<i64> {
        if !self.is_valid_date(year, month, day) {
            return Err(invalid_date(&self.id, year, month, day));
        }
        let leap = self.is_leap_year(year);
        let preceding: i64 = self
            .months
            .iter()
            .take(usize::try_from(month - 1).unwrap_or_default())
            .map(|m| i64::from(m.days_in(leap)))
            .sum();
        Ok(self.year_start(year) + preceding + i64::from(day) - 1)
    }

    fn from_pivot(&self, pivot: i64) -> ChronologyResult<ChronologyDate> {
        let out_of_range = || pivot_out_of_range(&self.id, pivot);
        let mut year: i32 = 1;
        let mut start = self.epoch_pivot;

        if pivot >= start {
            loop {
                let next = start + self.year_length(year);
                if pivot < next {
                    break;
                }
                start = next;
                year = year.checked_add(1).ok_or_else(out_of_range)?;
            }
        } else {
            while pivot < start {
                year = year.checked_sub(1).ok_or_else(out_of_range)?;
                start -= self.year_length(year);
            }
        }

        locate_in_year(self, year, start, pivot)
    }

    fn is_leap_year(&self, year: i32) -> bool {
        self.leap_rule.is_leap_year(year)
    }

    fn months_in_year(&self) -> u32 {
        u32::try_from(self.months.len()).unwrap_or(u32::MAX)
    }

    fn days_in_month(&self, year: i32, month: u32) -> Option<u32> {
        let index = usize::try_from(month.checked_sub(1)?).ok()?;
        let leap = self.is_leap_year(year);
        self.months.get(index).map(|m| m.days_in(leap))
    }
}
