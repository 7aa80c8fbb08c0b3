/// Identifier of the civil (proleptic Gregorian) calendar system.
pub const CIVIL_CALENDAR_SYSTEM: &str = "gregorian";
/// Identifier of the proleptic Julian calendar system.
pub const JULIAN_CALENDAR_SYSTEM: &str = "julian";
/// Identifier of the tabular Islamic calendar system.
pub const ISLAMIC_CALENDAR_SYSTEM: &str = "islamic";

/// Resolution chain entry prefixes
pub const CALENDAR_CHAIN_PREFIX: &str = "calendar";
pub const MODULE_CHAIN_PREFIX: &str = "module";

/// Provenance strings attached to generated occurrences and events
pub const RULE_PROVENANCE_PREFIX: &str = "rule";
pub const DELTA_PROVENANCE_PREFIX: &str = "delta";
pub const DELTA_ADD_PROVENANCE: &str = const_str::concat!(DELTA_PROVENANCE_PREFIX, ":add");
pub const WEEKEND_PROVENANCE: &str = "weekend";
pub const OBSERVED_PROVENANCE_SUFFIX: &str = ";observed-from=";

/// Description used for synthesized weekend events
pub const WEEKEND_DESCRIPTION: &str = "Weekend";

/// Days added on each side of the query range while a shift policy is active
pub const SHIFT_PADDING_DAYS: u64 = 7;
