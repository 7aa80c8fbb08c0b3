//! Calendar-system conversion through a Julian Day Number pivot.
//!
//! Every calendar system implements [`ChronologyAlgorithm`]; the
//! [`ChronologyRegistry`] routes conversions `source -> pivot -> target`.
//! Custom calendars can be described as data ([`ChronologyDefinition`]) with a
//! leap-year rule written in a small boolean formula language.

pub mod algorithm;
pub mod date;
pub mod definition;
pub mod error;
pub mod formula;
pub mod registry;

pub use algorithm::{
    ChronologyAlgorithm, FormulaCalendar, GregorianCalendar, IslamicTabularCalendar,
    JulianCalendar,
};
pub use date::{ChronologyDate, weekday_of_pivot};
pub use definition::{AlgorithmKind, ChronologyDefinition, MonthDefinition};
pub use error::{ChronologyError, ChronologyResult};
pub use formula::{FormulaError, FormulaErrorKind, LeapYearRule};
pub use registry::ChronologyRegistry;
