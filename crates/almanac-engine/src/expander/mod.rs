//! Expansion of declarative rules into dated occurrences.

use almanac_chronology::ChronologyRegistry;
use almanac_core::constants::CIVIL_CALENDAR_SYSTEM;
use almanac_core::types::DateRange;
use almanac_spec::{AnnotatedDate, Direction, EventSource, MonthDay, Rule, WeekdayOffset};
use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::error::{EngineError, EngineResult};
use crate::occurrence::Occurrence;
use crate::reference::ReferenceResolver;

/// Turns one event source's rule into occurrences inside a range.
#[derive(Debug, Clone, Copy)]
pub struct RuleExpander<'a> {
    registry: &'a ChronologyRegistry,
    references: Option<&'a ReferenceResolver>,
    default_system: &'a str,
}

impl<'a> RuleExpander<'a> {
    #[must_use]
    pub fn new(registry: &'a ChronologyRegistry) -> Self {
        Self {
            registry,
            references: None,
            default_system: CIVIL_CALENDAR_SYSTEM,
        }
    }

    /// Reference dates used by `relative_to_reference` rules.
    #[must_use]
    pub fn with_references(mut self, references: &'a ReferenceResolver) -> Self {
        self.references = Some(references);
        self
    }

    /// Calendar system for fixed-month-day rules that do not name one.
    #[must_use]
    pub fn with_default_system(mut self, system: &'a str) -> Self {
        self.default_system = system;
        self
    }

    /// ## Summary
    /// Expands `source`'s rule to occurrences dated inside `range`, tagged
    /// with `provenance`.
    ///
    /// Dates that do not exist in a given year, and ordinals a month does not
    /// have, produce nothing rather than an error.
    ///
    /// ## Errors
    /// - chronology errors for an unregistered calendar system,
    /// - `ReferencesUnavailable` / `UnknownReference` for a reference that
    ///   was not resolved,
    /// - `MissingAnchor`, `MissingOffset` or `InvalidWeekdayOffset` for an
    ///   incomplete relative rule.
    pub fn expand(
        &self,
        source: &EventSource,
        range: &DateRange,
        provenance: &str,
    ) -> EngineResult<Vec<Occurrence>> {
        let occurrence = |date: NaiveDate| Occurrence::new(&source.key, date, &source.name, provenance);

        let occurrences = match &source.rule {
            Rule::ExplicitDates { dates } => explicit_dates(source, dates, range, provenance),
            Rule::FixedMonthDay {
                month,
                day,
                calendar_system,
            } => {
                let system = calendar_system.as_deref().unwrap_or(self.default_system);
                self.fixed_month_day(*month, *day, system, range)?
                    .into_iter()
                    .map(occurrence)
                    .collect()
            }
            Rule::NthWeekdayOfMonth {
                month,
                weekday,
                nth,
            } => range
                .years()
                .filter_map(|year| nth_weekday_of_month(year, *month, *weekday, *nth))
                .filter(|date| range.contains(*date))
                .map(occurrence)
                .collect(),
            Rule::RelativeToReference {
                reference,
                anchor,
                offset_days,
                weekday_offset,
            } => {
                let offset = Offset::select(&source.key, *offset_days, *weekday_offset)?;
                self.anchor_dates(&source.key, reference.as_deref(), *anchor, range)?
                    .into_iter()
                    .filter_map(|anchor| offset.apply(anchor))
                    .filter(|date| range.contains(*date))
                    .map(occurrence)
                    .collect()
            }
        };

        tracing::trace!(
            key = %source.key,
            rule = source.rule.type_name(),
            count = occurrences.len(),
            "Expanded rule"
        );
        Ok(occurrences)
    }

    fn fixed_month_day(
        &self,
        month: u32,
        day: u32,
        system: &str,
        range: &DateRange,
    ) -> EngineResult<Vec<NaiveDate>> {
        if system == CIVIL_CALENDAR_SYSTEM {
            return Ok(range
                .years()
                .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
                .filter(|date| range.contains(*date))
                .collect());
        }

        // Walk the years of the rule's own calendar that overlap the range.
        let algorithm = self.registry.get(system)?;
        let first = self.registry.from_civil(range.from(), system)?.year;
        let last = self.registry.from_civil(range.to(), system)?.year;

        let mut dates = Vec::new();
        for year in first..=last {
            if !algorithm.is_valid_date(year, month, day) {
                tracing::trace!(system, year, month, day, "Skipping nonexistent date");
                continue;
            }
            let pivot = algorithm.to_pivot(year, month, day)?;
            let civil = self.registry.from_pivot(CIVIL_CALENDAR_SYSTEM, pivot)?;
            if let Some(date) = civil.to_naive().filter(|date| range.contains(*date)) {
                dates.push(date);
            }
        }
        Ok(dates)
    }

    /// Anchor dates for a relative rule: a named reference wins over a fixed
    /// anchor. Fixed anchors cover one year on either side of the range.
    fn anchor_dates(
        &self,
        key: &str,
        reference: Option<&str>,
        anchor: Option<MonthDay>,
        range: &DateRange,
    ) -> EngineResult<Vec<NaiveDate>> {
        if let Some(reference) = reference {
            let references = self
                .references
                .ok_or_else(|| EngineError::ReferencesUnavailable(key.to_string()))?;
            if !references.has_reference(reference) {
                return Err(EngineError::UnknownReference(reference.to_string()));
            }
            return Ok(references.get_dates(reference).to_vec());
        }

        let Some(MonthDay { month, day }) = anchor else {
            return Err(EngineError::MissingAnchor(key.to_string()));
        };
        let years = (range.from().year() - 1)..=(range.to().year() + 1);
        Ok(years
            .filter_map(|year| NaiveDate::from_ymd_opt(year, month, day))
            .collect())
    }
}

fn explicit_dates(
    source: &EventSource,
    dates: &[AnnotatedDate],
    range: &DateRange,
    provenance: &str,
) -> Vec<Occurrence> {
    dates
        .iter()
        .filter(|annotated| range.contains(annotated.date))
        .map(|annotated| {
            let name = match &annotated.comment {
                Some(comment) => format!("{} ({comment})", source.name),
                None => source.name.clone(),
            };
            Occurrence::new(&source.key, annotated.date, name, provenance)
        })
        .collect()
}

/// ## Summary
/// Returns the `nth` `weekday` of a civil month, or the last one for `-1`.
///
/// `None` when the month lacks that many such weekdays, the month does not
/// exist, or `nth` is neither positive nor `-1`.
#[must_use]
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, nth: i32) -> Option<NaiveDate> {
    match nth {
        -1 => {
            let first = NaiveDate::from_ymd_opt(year, month, 1)?;
            let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
            let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
            last.checked_sub_days(Days::new(u64::from(back)))
        }
        1.. => NaiveDate::from_weekday_of_month_opt(year, month, weekday, u8::try_from(nth).ok()?),
        _ => None,
    }
}

/// The single offset a relative rule applies to each anchor.
#[derive(Debug, Clone, Copy)]
enum Offset {
    Days(i64),
    Weekday(WeekdayOffset),
}

impl Offset {
    /// `offset_days` wins over `weekday_offset`.
    fn select(
        key: &str,
        offset_days: Option<i64>,
        weekday_offset: Option<WeekdayOffset>,
    ) -> EngineResult<Self> {
        match (offset_days, weekday_offset) {
            (Some(days), _) => Ok(Self::Days(days)),
            (None, Some(offset)) if offset.nth == 0 => {
                Err(EngineError::InvalidWeekdayOffset(key.to_string()))
            }
            (None, Some(offset)) => Ok(Self::Weekday(offset)),
            (None, None) => Err(EngineError::MissingOffset(key.to_string())),
        }
    }

    fn apply(self, anchor: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Days(days) => shift_days(anchor, days),
            Self::Weekday(offset) => weekday_search(anchor, offset),
        }
    }
}

fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    }
}

/// ## Summary
/// Finds the nth `offset.weekday` strictly before or after `anchor`.
///
/// The anchor itself never qualifies, even when it falls on the weekday.
fn weekday_search(anchor: NaiveDate, offset: WeekdayOffset) -> Option<NaiveDate> {
    let step: i64 = match offset.direction {
        Direction::After => 1,
        Direction::Before => -1,
    };
    let mut date = shift_days(anchor, step)?;
    while date.weekday() != offset.weekday {
        date = shift_days(date, step)?;
    }
    let weeks = i64::from(offset.nth.saturating_sub(1));
    shift_days(date, step * 7 * weeks)
}
