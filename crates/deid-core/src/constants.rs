/// Number of equal-frequency bins the deprivation score is cut into.
pub const DECILE_COUNT: usize = 10;

/// Hour-of-day windows, each covering four consecutive hours from 00.
pub const HOUR_RANGE_LABELS: [&str; 6] = ["00-03", "04-07", "08-11", "12-15", "16-19", "20-23"];

/// Age bracket labels with their inclusive lower bounds, ascending.
pub const AGE_BRACKETS: [(i64, &str); 6] = [
    (0, "0-17"),
    (18, "18-24"),
    (25, "25-44"),
    (45, "45-64"),
    (65, "65-84"),
    (85, "85-"),
];
