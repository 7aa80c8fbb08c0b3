//! Observance of holidays that fall on weekend days.

use std::collections::{BTreeSet, HashSet};

use almanac_core::constants::OBSERVED_PROVENANCE_SUFFIX;
use almanac_core::types::{DateRange, WeekendDays, WeekendShiftPolicy};
use chrono::{Days, NaiveDate};

use crate::occurrence::Occurrence;

/// Moves shiftable weekend occurrences according to a policy.
#[derive(Debug, Clone, Copy)]
pub struct WeekendShiftEngine {
    policy: WeekendShiftPolicy,
    weekend_days: WeekendDays,
}

impl WeekendShiftEngine {
    #[must_use]
    pub const fn new(policy: WeekendShiftPolicy, weekend_days: WeekendDays) -> Self {
        Self {
            policy,
            weekend_days,
        }
    }

    /// ## Summary
    /// Applies the policy to `occurrences`, keeping their relative order.
    ///
    /// Under any policy other than `None`, an occurrence on a weekend day
    /// whose key is not in `shiftable` is dropped, and a shifted occurrence
    /// that leaves `range` is dropped. Shifted occurrences record their
    /// original date in the provenance.
    #[must_use]
    pub fn apply(
        &self,
        occurrences: Vec<Occurrence>,
        shiftable: &HashSet<String>,
        range: &DateRange,
    ) -> Vec<Occurrence> {
        if self.policy == WeekendShiftPolicy::None {
            return occurrences;
        }

        let weekend = self.weekend_days;
        let occurrences: Vec<Occurrence> = occurrences
            .into_iter()
            .filter(|occurrence| {
                let keep = shiftable.contains(&occurrence.key) || !weekend.is_weekend(occurrence.date);
                if !keep {
                    tracing::debug!(
                        key = %occurrence.key,
                        date = %occurrence.date,
                        "Dropping non-shiftable weekend occurrence"
                    );
                }
                keep
            })
            .collect();

        let targets = if self.policy == WeekendShiftPolicy::NextAvailableWeekday {
            self.next_available_targets(&occurrences)
        } else {
            self.nearest_targets(&occurrences)
        };

        occurrences
            .into_iter()
            .zip(targets)
            .filter_map(|(occurrence, target)| {
                let target = target?;
                if target == occurrence.date {
                    return Some(occurrence);
                }
                if !range.contains(target) {
                    tracing::trace!(key = %occurrence.key, from = %occurrence.date, to = %target, "Observed date outside range");
                    return None;
                }
                Some(observed(occurrence, target))
            })
            .collect()
    }

    fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days.is_weekend(date)
    }

    /// Every weekday is a weekend day; nothing can be shifted.
    fn no_business_days(&self) -> bool {
        self.weekend_days.iter().count() == 7
    }

    /// Independent per occurrence: the closest business day, the later one
    /// on a tie. With a Saturday/Sunday weekend, Saturday moves to Friday
    /// and Sunday to Monday.
    fn nearest_targets(&self, occurrences: &[Occurrence]) -> Vec<Option<NaiveDate>> {
        occurrences
            .iter()
            .map(|occurrence| {
                if !self.is_weekend(occurrence.date) {
                    return Some(occurrence.date);
                }
                (1..=7_u64).find_map(|distance| {
                    let days = Days::new(distance);
                    [
                        occurrence.date.checked_add_days(days),
                        occurrence.date.checked_sub_days(days),
                    ]
                    .into_iter()
                    .flatten()
                    .find(|candidate| !self.is_weekend(*candidate))
                })
            })
            .collect()
    }

    /// Cascading: business-day occurrences claim their dates first, then
    /// weekend occurrences in ascending date order each take the next day
    /// that is neither a weekend day nor already claimed.
    fn next_available_targets(&self, occurrences: &[Occurrence]) -> Vec<Option<NaiveDate>> {
        let mut targets: Vec<Option<NaiveDate>> = occurrences
            .iter()
            .map(|occurrence| Some(occurrence.date))
            .collect();
        if self.no_business_days() {
            for (target, occurrence) in targets.iter_mut().zip(occurrences) {
                if self.is_weekend(occurrence.date) {
                    *target = None;
                }
            }
            return targets;
        }

        let mut claimed: BTreeSet<NaiveDate> = occurrences
            .iter()
            .map(|occurrence| occurrence.date)
            .filter(|date| !self.is_weekend(*date))
            .collect();

        let mut pending: Vec<usize> = (0..occurrences.len())
            .filter(|index| self.is_weekend(occurrences[*index].date))
            .collect();
        pending.sort_by_key(|index| occurrences[*index].date);

        for index in pending {
            let mut candidate = occurrences[index].date.succ_opt();
            while let Some(date) = candidate {
                if !self.is_weekend(date) && !claimed.contains(&date) {
                    break;
                }
                candidate = date.succ_opt();
            }
            if let Some(date) = candidate {
                claimed.insert(date);
            }
            targets[index] = candidate;
        }
        targets
    }
}

fn observed(mut occurrence: Occurrence, target: NaiveDate) -> Occurrence {
    tracing::debug!(
        key = %occurrence.key,
        from = %occurrence.date,
        to = %target,
        "Shifted weekend occurrence"
    );
    occurrence.provenance = format!(
        "{}{OBSERVED_PROVENANCE_SUFFIX}{}",
        occurrence.provenance, occurrence.date
    );
    occurrence.date = target;
    occurrence
}
