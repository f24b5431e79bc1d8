//! Clinical cutoffs used by the numeric engine.

use std::fmt;

/// Named cutoffs. Units follow the prompts: Hb g/dL, WBC /µL,
/// PLT ×10⁴/µL, Retic %, MCV fL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub hb_low_male: f64,
    pub hb_low_female: f64,
    pub wbc_low: f64,
    pub plt_low: f64,
    pub retic_high: f64,
    pub mcv_low: f64,
    pub mcv_high: f64,
}

pub const THRESHOLDS: Thresholds = Thresholds {
    hb_low_male: 13.0,
    hb_low_female: 12.0,
    wbc_low: 4000.0,
    plt_low: 10.0,
    retic_high: 2.0,
    mcv_low: 80.0,
    mcv_high: 101.0,
};

impl Thresholds {
    /// Hb below this value counts as anemia.
    pub fn hb_anemia(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.hb_low_male,
            Sex::Female => self.hb_low_female,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Accepts `m` / `f` in any case, surrounding whitespace ignored.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "m" => Some(Sex::Male),
            "f" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "m",
            Sex::Female => "f",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
