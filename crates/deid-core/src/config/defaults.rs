// Single source of truth for all default values.

// --- Raw event columns ---
pub const DEFAULT_IDENTIFIER_COLUMNS: &[&str] = &["Attendance ID", "Health Service ID"];
pub const DEFAULT_POSTCODE_COLUMN: &str = "Postcode";
pub const DEFAULT_FACILITY_COLUMN: &str = "Hospital";
pub const DEFAULT_ARRIVAL_TIME_COLUMN: &str = "Arrival Time";
pub const DEFAULT_DURATION_COLUMN: &str = "Time in A&E (mins)";
pub const DEFAULT_TREATMENT_COLUMN: &str = "Treatment";
pub const DEFAULT_GENDER_COLUMN: &str = "Gender";
pub const DEFAULT_AGE_COLUMN: &str = "Age";

// --- Derived columns ---
pub const DEFAULT_AREA_COLUMN: &str = "Lower layer super output area";
pub const DEFAULT_SCORE_COLUMN: &str = "Index of Multiple Deprivation";
pub const DEFAULT_DECILE_COLUMN: &str = "Index of Multiple Deprivation Decile";
pub const DEFAULT_FACILITY_ID_COLUMN: &str = "Hospital ID";
pub const DEFAULT_ARRIVAL_DATE_COLUMN: &str = "Arrival Date";
pub const DEFAULT_HOUR_RANGE_COLUMN: &str = "Arrival hour range";
pub const DEFAULT_AGE_BRACKET_COLUMN: &str = "Age bracket";

// --- Reference table ---
pub const DEFAULT_REFERENCE_KEY_COLUMN: &str = "Postcode";
pub const DEFAULT_REFERENCE_IN_USE_COLUMN: &str = "In Use?";

// --- Pipeline ---
pub const DEFAULT_IMPUTE_AREA_LABEL: &str = "UNKNOWN";
pub const DEFAULT_FAIL_ON_EMPTY_JOIN: bool = false;
pub const DEFAULT_ALLOWED_GENDERS: &[&str] = &["Male", "Female"];
pub const DEFAULT_PSEUDONYM_DIGITS: usize = 6;
pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.8;

// --- Correlated pair (age, duration) ---
pub const DEFAULT_PAIR_ROWS: usize = 10_000;
pub const DEFAULT_PAIR_RHO: f64 = 0.95;
pub const DEFAULT_PAIR_MEAN_FIRST: f64 = 40.0;
pub const DEFAULT_PAIR_STD_DEV_FIRST: f64 = 20.0;
pub const DEFAULT_PAIR_FLOOR_FIRST: i64 = 0;
pub const DEFAULT_PAIR_MEAN_SECOND: f64 = 120.0;
pub const DEFAULT_PAIR_STD_DEV_SECOND: f64 = 60.0;
pub const DEFAULT_PAIR_FLOOR_SECOND: i64 = 1;

// --- Mock raw dataset ---
pub const DEFAULT_MOCK_ROWS: usize = 10_000;
pub const DEFAULT_MOCK_START: &str = "2019-04-01 00:00:00";
pub const DEFAULT_MOCK_END: &str = "2019-04-06 23:59:59";
pub const DEFAULT_MOCK_HOSPITALS: &[&str] = &[
    "Barnet Hospital",
    "Charing Cross Hospital",
    "Homerton University Hospital",
    "King's College Hospital",
    "Royal London Hospital",
    "St Thomas' Hospital",
    "University College Hospital",
    "Whittington Hospital",
];
pub const DEFAULT_MOCK_TREATMENTS: &[&str] = &[
    "Dressing",
    "Bandage or support",
    "Sutures",
    "Wound closure",
    "Plaster of Paris",
    "Splint",
    "Prescription or medicines",
    "Guidance or advice only",
    "Observation",
    "None",
];
pub const DEFAULT_MOCK_GENDER_CODES: &[&str] = &["Not known", "Male", "Female", "Not specified"];
pub const DEFAULT_MOCK_GENDER_WEIGHTS: &[f64] = &[0.005, 0.495, 0.495, 0.005];
/// Start of each 5-year age bracket; the last bracket covers 90..=100.
pub const DEFAULT_MOCK_AGE_BRACKET_STARTS: &[i64] = &[
    0, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50, 55, 60, 65, 70, 75, 80, 85, 90,
];
pub const DEFAULT_MOCK_AGE_BRACKET_WEIGHTS: &[f64] = &[
    606.0, 495.0, 431.0, 464.0, 622.0, 830.0, 838.0, 712.0, 603.0, 562.0, 488.0, 392.0, 321.0,
    244.0, 203.0, 163.0, 123.0, 78.0, 51.0,
];
pub const DEFAULT_MOCK_DURATION_MEAN: f64 = 30.0;
pub const DEFAULT_MOCK_DURATION_STD_DEV: f64 = 100.0;
pub const DEFAULT_MOCK_DURATION_MIN: f64 = 1.0;
pub const DEFAULT_MOCK_DURATION_MAX: f64 = 720.0;
pub const DEFAULT_MOCK_POSTCODE_IN_USE: &str = "No";
pub const DEFAULT_MOCK_CORRELATE_AGE_DURATION: bool = false;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = false;

pub(crate) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
