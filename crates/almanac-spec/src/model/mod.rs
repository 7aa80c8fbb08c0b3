//! Serde model of calendar, module and normalized specifications.

mod calendar;
mod delta;
mod event_source;
mod module;
mod normalized;
mod rule;

pub use calendar::{CalendarMetadata, CalendarSpecification};
pub use delta::Delta;
pub use event_source::{ActiveYears, EventSource, YearRange};
pub use module::{ModulePolicies, ModuleSpecification, Reference};
pub use normalized::NormalizedSpecification;
pub use rule::{AnnotatedDate, Direction, MonthDay, Rule, WeekdayOffset};
