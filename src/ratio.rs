//! Crop ratio constraint and its string form.
//!
//! Accepted strings (case-insensitive): `none`, `square`, or two 1-2 digit
//! integers separated by a colon (`4:3`, `16:9`, `10:8`).

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::error::ConfigError;

/// How the crop pane's height derives from its width.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum Ratio {
    /// Height is free.
    #[default]
    None,
    /// Height equals width.
    Square,
    /// Width over height, e.g. `4:3`. Both terms are 1..=99.
    Aspect { numerator: u8, denominator: u8 },
}

impl Ratio {
    /// Width divided by height, or `None` when the height is free.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Square => Some(1.0),
            Self::Aspect {
                numerator,
                denominator,
            } => Some(f64::from(numerator) / f64::from(denominator)),
        }
    }

    /// Height the ratio demands for `width`, or `None` when unconstrained.
    pub fn height_for(self, width: f64) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Square => Some(width),
            Self::Aspect { .. } => self.value().map(|r| width / r),
        }
    }
}

impl FromStr for Ratio {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        match lower.as_str() {
            "none" => return Ok(Self::None),
            "square" => return Ok(Self::Square),
            _ => {}
        }

        let Some((num, den)) = lower.split_once(':') else {
            return Err(ConfigError::UnknownRatio(s.to_string()));
        };
        let (Some(numerator), Some(denominator)) = (parse_term(num), parse_term(den)) else {
            return Err(ConfigError::UnknownRatio(s.to_string()));
        };
        if numerator == 0 || denominator == 0 {
            return Err(ConfigError::ZeroRatio(s.to_string()));
        }
        Ok(Self::Aspect {
            numerator,
            denominator,
        })
    }
}

/// One or two ASCII digits.
fn parse_term(term: &str) -> Option<u8> {
    if term.is_empty() || term.len() > 2 || !term.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    term.parse().ok()
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Square => f.write_str("square"),
            Self::Aspect {
                numerator,
                denominator,
            } => write!(f, "{numerator}:{denominator}"),
        }
    }
}

impl TryFrom<String> for Ratio {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ratio> for String {
    fn from(ratio: Ratio) -> Self {
        ratio.to_string()
    }
}
