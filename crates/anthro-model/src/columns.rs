//! Column names of the biography, event-result and summary tables.

/// Athlete identifier shared by the biography and event-result tables.
pub const ATHLETE_ID: &str = "athlete_id";
/// Raw height text on the biography table, normalized to Float64 in place.
pub const HEIGHT: &str = "height";
/// Raw weight text on the biography table, normalized to Float64 in place.
pub const WEIGHT: &str = "weight";
/// National olympic committee code.
pub const COUNTRY_NOC: &str = "country_noc";
pub const SEX: &str = "sex";
pub const SPORT: &str = "sport";
pub const MEDAL: &str = "medal";

pub const AVG_HEIGHT: &str = "avg_height";
pub const AVG_WEIGHT: &str = "avg_weight";
/// Aggregation time of a run, identical for every summary row.
pub const TIMESTAMP: &str = "timestamp";

/// Prefix given to biography columns that collide with event-result columns.
pub const BIO_PREFIX: &str = "bio_";

/// Prefix given to event-result columns that collide with biography-owned
/// columns.
pub const RESULTS_PREFIX: &str = "results_";

/// Biography columns the aggregation reads; an event-result column of the
/// same name is moved aside instead.
pub const BIO_OWNED: [&str; 3] = [HEIGHT, WEIGHT, SEX];

/// Columns the biography table must carry.
pub const BIO_REQUIRED: [&str; 5] = [ATHLETE_ID, HEIGHT, WEIGHT, COUNTRY_NOC, SEX];

/// Columns the event-result table must carry.
pub const RESULTS_REQUIRED: [&str; 3] = [ATHLETE_ID, SPORT, MEDAL];

/// Measurement columns normalized before aggregation, in order.
pub const MEASUREMENTS: [&str; 2] = [HEIGHT, WEIGHT];

/// Composite grouping key of the summary table.
pub const GROUP_KEY: [&str; 4] = [SPORT, MEDAL, SEX, COUNTRY_NOC];

/// Summary table columns in output order.
pub const SUMMARY_COLUMNS: [&str; 7] = [
    SPORT,
    MEDAL,
    SEX,
    COUNTRY_NOC,
    AVG_HEIGHT,
    AVG_WEIGHT,
    TIMESTAMP,
];

/// Name a biography column takes when it collides with an event-result column.
///
/// ```
/// use anthro_model::columns::bio_prefixed;
///
/// assert_eq!(bio_prefixed("country_noc"), "bio_country_noc");
/// ```
pub fn bio_prefixed(name: &str) -> String {
    format!("{BIO_PREFIX}{name}")
}

/// Name an event-result column takes when it collides with a biography-owned
/// column.
pub fn results_prefixed(name: &str) -> String {
    format!("{RESULTS_PREFIX}{name}")
}
