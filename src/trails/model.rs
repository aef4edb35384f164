#![forbid(unsafe_code)]

use serde::Serialize;

// Raw value that marks a boolean amenity column as set.
pub const YES: &str = "Yes";

// ***************************************************************************
//                                 Trail
// ***************************************************************************
/// One trailhead record built from a single dataset row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trail {
    pub name: String,
    pub access_type: String,
    pub restrooms: bool,
    pub picnic: bool,
    pub fishing: bool,
    pub address: String,
    pub fee: bool,
    pub bike_rack: bool,
    pub difficulty: String,
}

// ***************************************************************************
//                               Difficulty
// ***************************************************************************
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Moderate,
    Difficult,
    MostDifficult,
    Unrated,
}

impl Difficulty {
    /// Map a raw trail class code.  Unknown codes are `Unrated`.
    pub fn from_class_code(code: &str) -> Self {
        match code {
            "T1" => Difficulty::Easy,
            "T2" => Difficulty::Moderate,
            "T3" => Difficulty::Difficult,
            "T4" => Difficulty::MostDifficult,
            _ => Difficulty::Unrated,
        }
    }

    /// The display text, which is also the value matched by the difficulty filter.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Difficult => "Difficult",
            Difficulty::MostDifficult => "Most Difficult",
            Difficulty::Unrated => "No",
        }
    }
}

/// Amenity columns are set only by the exact text "Yes".
pub fn is_yes(raw: &str) -> bool {
    raw == YES
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_class_codes() {
        assert_eq!(Difficulty::from_class_code("T1").label(), "Easy");
        assert_eq!(Difficulty::from_class_code("T2").label(), "Moderate");
        assert_eq!(Difficulty::from_class_code("T3").label(), "Difficult");
        assert_eq!(Difficulty::from_class_code("T4").label(), "Most Difficult");
    }

    #[test]
    fn unknown_class_codes_are_unrated() {
        for code in ["T5", "T9", "t1", "", " T1", "T1 "] {
            assert_eq!(Difficulty::from_class_code(code), Difficulty::Unrated, "code {:?}", code);
            assert_eq!(Difficulty::from_class_code(code).label(), "No");
        }
    }

    #[test]
    fn only_exact_yes_is_true() {
        assert!(is_yes("Yes"));
        for raw in ["yes", "YES", "", "No", "Yes ", "Y"] {
            assert!(!is_yes(raw), "raw {:?}", raw);
        }
    }
}
