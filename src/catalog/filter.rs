//! Catalog filters.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::Pet;

/// Age group derived from the free-text `years` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBucket {
    /// Under 3 years.
    Young,
    /// 3 to 7 years.
    Adult,
    /// 8 years and over.
    Senior,
}

impl AgeBucket {
    pub fn of_years(years: i64) -> Self {
        match years {
            i64::MIN..=2 => Self::Young,
            3..=7 => Self::Adult,
            _ => Self::Senior,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown age group '{0}' (expected young, adult or senior)")]
pub struct ParseAgeBucketError(String);

impl FromStr for AgeBucket {
    type Err = ParseAgeBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "young" => Ok(Self::Young),
            "adult" => Ok(Self::Adult),
            "senior" => Ok(Self::Senior),
            _ => Err(ParseAgeBucketError(s.to_string())),
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Young => "young",
            Self::Adult => "adult",
            Self::Senior => "senior",
        })
    }
}

/// Leading integer of a `years` string ("2 Years" is 2); 0 when there is none.
/// Values past the `i64` range saturate.
pub fn age_in_years(years: &str) -> i64 {
    let text = years.trim_start();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].bytes().fold(0_i64, |acc, b| {
        acc.saturating_mul(10)
            .saturating_add(sign * i64::from(b - b'0'))
    })
}

/// Catalog query. Each `None` field matches every pet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    pub kind: Option<String>,
    pub age: Option<AgeBucket>,
    pub gender: Option<String>,
    pub search: Option<String>,
}

impl CatalogFilter {
    /// True when the pet passes every set filter.
    pub fn matches(&self, pet: &Pet) -> bool {
        if let Some(kind) = &self.kind
            && !pet.kind.eq_ignore_ascii_case(kind.trim())
        {
            return false;
        }
        if let Some(gender) = &self.gender
            && !pet.gender.eq_ignore_ascii_case(gender.trim())
        {
            return false;
        }
        if let Some(age) = self.age
            && AgeBucket::of_years(age_in_years(&pet.years)) != age
        {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !pet.name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    /// Pets passing the filter, in their original order.
    pub fn apply<'a>(&self, pets: &'a [Pet]) -> Vec<&'a Pet> {
        pets.iter().filter(|pet| self.matches(pet)).collect()
    }
}
