//! How often interest is credited

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundingFrequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl CompoundingFrequency {
    pub const ALL: [CompoundingFrequency; 6] = [
        CompoundingFrequency::Daily,
        CompoundingFrequency::Weekly,
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Quarterly,
        CompoundingFrequency::SemiAnnually,
        CompoundingFrequency::Annually,
    ];

    /// Compounding periods in one year (k)
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Weekly => 52,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Annually => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundingFrequency::Daily => "daily",
            CompoundingFrequency::Weekly => "weekly",
            CompoundingFrequency::Monthly => "monthly",
            CompoundingFrequency::Quarterly => "quarterly",
            CompoundingFrequency::SemiAnnually => "semi-annually",
            CompoundingFrequency::Annually => "annually",
        }
    }
}

impl fmt::Display for CompoundingFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompoundingFrequency {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        CompoundingFrequency::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| CalcError::invalid("compounding_frequency", format!("unknown frequency `{}`", s)))
    }
}
