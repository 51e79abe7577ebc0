use crate::models::Sex;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

pub const FEMALE_MATURITY_MONTHS: u32 = 7;
pub const MALE_MATURITY_MONTHS: u32 = 8;
pub const FEMALE_MAX_BREEDING_YEARS: u32 = 10;
pub const MALE_MAX_BREEDING_YEARS: u32 = 8;

/// Outcome of a check that needs data which may be missing.
///
/// `Unknown` never blocks: a missing birth date is not a reason to refuse a mating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    Yes,
    No,
    Unknown,
}

impl Evaluation {
    pub fn from_bool(value: bool) -> Self {
        if value {
            Evaluation::Yes
        } else {
            Evaluation::No
        }
    }

    pub fn is_yes(&self) -> bool {
        *self == Evaluation::Yes
    }

    pub fn is_no(&self) -> bool {
        *self == Evaluation::No
    }

    pub fn is_unknown(&self) -> bool {
        *self == Evaluation::Unknown
    }

    /// Only a definite `No` fails a required check.
    pub fn is_blocking_when_required(&self) -> bool {
        matches!(self, Evaluation::No)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Evaluation::Yes => "Yes",
            Evaluation::No => "No",
            Evaluation::Unknown => "Cannot evaluate",
        }
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Days from birth to `as_of`, clamped at zero.
pub fn age_in_days(birth: NaiveDate, as_of: NaiveDate) -> i64 {
    (as_of - birth).num_days().max(0)
}

/// Whole calendar months elapsed. A month counts once its day-of-month is
/// reached; month-end births complete on the last day of shorter months.
pub fn age_in_months(birth: NaiveDate, as_of: NaiveDate) -> u32 {
    if as_of <= birth {
        return 0;
    }

    let year_diff = (as_of.year() - birth.year()) as i64;
    let month_diff = as_of.month0() as i64 - birth.month0() as i64;
    let mut months = (year_diff * 12 + month_diff).max(0) as u32;

    while months > 0 {
        match birth.checked_add_months(Months::new(months)) {
            Some(anniversary) if anniversary <= as_of => break,
            _ => months -= 1,
        }
    }

    months
}

pub fn age_in_years(birth: NaiveDate, as_of: NaiveDate) -> u32 {
    age_in_months(birth, as_of) / 12
}

fn maturity_months(sex: Sex) -> u32 {
    match sex {
        Sex::Female => FEMALE_MATURITY_MONTHS,
        Sex::Male => MALE_MATURITY_MONTHS,
    }
}

fn max_breeding_years(sex: Sex) -> u32 {
    match sex {
        Sex::Female => FEMALE_MAX_BREEDING_YEARS,
        Sex::Male => MALE_MAX_BREEDING_YEARS,
    }
}

pub fn is_reproductively_mature(sex: Sex, birth: Option<NaiveDate>, as_of: NaiveDate) -> Evaluation {
    match birth {
        Some(birth) => Evaluation::from_bool(age_in_months(birth, as_of) >= maturity_months(sex)),
        None => Evaluation::Unknown,
    }
}

pub fn is_past_recommended_breeding_age(
    sex: Sex,
    birth: Option<NaiveDate>,
    as_of: NaiveDate,
) -> Evaluation {
    let Some(birth) = birth else {
        return Evaluation::Unknown;
    };

    // "More than N years": N whole years plus at least one extra day.
    let limit = max_breeding_years(sex);
    let years = age_in_years(birth, as_of);
    let past = years > limit
        || (years == limit
            && birth
                .checked_add_months(Months::new(limit * 12))
                .map(|anniversary| as_of > anniversary)
                .unwrap_or(false));

    Evaluation::from_bool(past)
}

/// Human-readable age such as "2y 3m" or "45d" for kids under a month.
pub fn describe_age(birth: NaiveDate, as_of: NaiveDate) -> String {
    let months = age_in_months(birth, as_of);
    if months == 0 {
        return format!("{}d", age_in_days(birth, as_of));
    }

    let (years, rem) = (months / 12, months % 12);
    match (years, rem) {
        (0, m) => format!("{}m", m),
        (y, 0) => format!("{}y", y),
        (y, m) => format!("{}y {}m", y, m),
    }
}
