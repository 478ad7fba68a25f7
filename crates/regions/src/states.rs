//! Static U.S. state tables and incentive coverage lists.

/// The 50 states plus DC, in the order the coverage lists are derived from.
pub const STATES_PLUS_DC: [&str; 51] = [
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "IA", "ID", "IL", "IN", "KS",
    "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE", "NH", "NJ", "NM",
    "NV", "NY", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VA", "VT", "WA", "WI",
    "WV", "WY", "DC",
];

pub const TERRITORIES: [&str; 5] = ["PR", "GU", "MP", "VI", "AS"];

pub const BETA_STATES: [&str; 5] = ["AK", "CA", "DE", "MA", "TX"];

pub const LAUNCHED_STATES: [&str; 18] = [
    "AZ", "CO", "CT", "DC", "GA", "IL", "IN", "ME", "MI", "NM", "NV", "NY", "OR", "PA", "RI", "VA",
    "VT", "WI",
];

const ABBREVIATION_TO_NAME: [(&str, &str); 56] = [
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AR", "Arkansas"),
    ("AZ", "Arizona"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DC", "District of Columbia"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("IA", "Iowa"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("MA", "Massachusetts"),
    ("MD", "Maryland"),
    ("ME", "Maine"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MO", "Missouri"),
    ("MS", "Mississippi"),
    ("MT", "Montana"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("NE", "Nebraska"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NV", "Nevada"),
    ("NY", "New York"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VA", "Virginia"),
    ("VT", "Vermont"),
    ("WA", "Washington"),
    ("WI", "Wisconsin"),
    ("WV", "West Virginia"),
    ("WY", "Wyoming"),
    ("PR", "Puerto Rico"),
    ("GU", "Guam"),
    ("MP", "Northern Mariana Islands"),
    ("VI", "U.S. Virgin Islands"),
    ("AS", "American Samoa"),
];

/// Census FIPS state codes.
const FIPS_TO_ABBREVIATION: [(&str, &str); 56] = [
    ("01", "AL"),
    ("02", "AK"),
    ("04", "AZ"),
    ("05", "AR"),
    ("06", "CA"),
    ("08", "CO"),
    ("09", "CT"),
    ("10", "DE"),
    ("11", "DC"),
    ("12", "FL"),
    ("13", "GA"),
    ("15", "HI"),
    ("16", "ID"),
    ("17", "IL"),
    ("18", "IN"),
    ("19", "IA"),
    ("20", "KS"),
    ("21", "KY"),
    ("22", "LA"),
    ("23", "ME"),
    ("24", "MD"),
    ("25", "MA"),
    ("26", "MI"),
    ("27", "MN"),
    ("28", "MS"),
    ("29", "MO"),
    ("30", "MT"),
    ("31", "NE"),
    ("32", "NV"),
    ("33", "NH"),
    ("34", "NJ"),
    ("35", "NM"),
    ("36", "NY"),
    ("37", "NC"),
    ("38", "ND"),
    ("39", "OH"),
    ("40", "OK"),
    ("41", "OR"),
    ("42", "PA"),
    ("44", "RI"),
    ("45", "SC"),
    ("46", "SD"),
    ("47", "TN"),
    ("48", "TX"),
    ("49", "UT"),
    ("50", "VT"),
    ("51", "VA"),
    ("53", "WA"),
    ("54", "WV"),
    ("55", "WI"),
    ("56", "WY"),
    ("60", "AS"),
    ("66", "GU"),
    ("69", "MP"),
    ("72", "PR"),
    ("78", "VI"),
];

/// Alternate spellings seen in boundary datasets.
const NAME_ALIASES: [(&str, &str); 1] = [("Washington, D.C.", "DC")];

/// Incentive coverage of a state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Coverage {
    Launched,
    Beta,
    Uncovered,
}

impl Coverage {
    /// Whether clicking the state opens it.
    pub fn is_selectable(self) -> bool {
        !matches!(self, Coverage::Uncovered)
    }
}

pub fn state_name(abbreviation: &str) -> Option<&'static str> {
    ABBREVIATION_TO_NAME
        .iter()
        .find(|(abbr, _)| *abbr == abbreviation)
        .map(|(_, name)| *name)
}

pub fn state_abbreviation(name: &str) -> Option<&'static str> {
    ABBREVIATION_TO_NAME
        .iter()
        .find(|(_, n)| *n == name)
        .map(|(abbr, _)| *abbr)
        .or_else(|| {
            NAME_ALIASES
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, abbr)| *abbr)
        })
}

pub fn state_abbreviation_for_fips(fips: &str) -> Option<&'static str> {
    FIPS_TO_ABBREVIATION
        .iter()
        .find(|(code, _)| *code == fips)
        .map(|(_, abbr)| *abbr)
}

pub fn coverage_of(abbreviation: &str) -> Coverage {
    if LAUNCHED_STATES.contains(&abbreviation) {
        Coverage::Launched
    } else if BETA_STATES.contains(&abbreviation) {
        Coverage::Beta
    } else {
        Coverage::Uncovered
    }
}

/// Coverage by full state name; unknown names are uncovered.
pub fn coverage_of_name(name: &str) -> Coverage {
    state_abbreviation(name)
        .map(coverage_of)
        .unwrap_or(Coverage::Uncovered)
}

/// Full names of `STATES_PLUS_DC` entries with the given coverage, in table order.
pub fn state_names_with_coverage(coverage: Coverage) -> Vec<&'static str> {
    STATES_PLUS_DC
        .iter()
        .filter(|abbr| coverage_of(abbr) == coverage)
        .filter_map(|abbr| state_name(abbr))
        .collect()
}
