//! Declarative calendar specifications and their resolution.
//!
//! Calendars inherit from other calendars (`extends`) and compose modules
//! (`uses`). [`SpecificationResolver`] flattens that graph into a single
//! [`NormalizedSpecification`] that the event engine consumes.

pub mod catalog;
pub mod error;
pub mod model;
pub mod resolver;

pub use catalog::{InMemoryCatalog, SpecCatalog};
pub use error::{SpecError, SpecResult};
pub use model::{
    ActiveYears, AnnotatedDate, CalendarMetadata, CalendarSpecification, Delta, Direction,
    EventSource, ModulePolicies, ModuleSpecification, MonthDay, NormalizedSpecification,
    Reference, Rule, WeekdayOffset, YearRange,
};
pub use resolver::SpecificationResolver;
