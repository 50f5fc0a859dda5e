use serde::{Deserialize, Serialize};

/// Coarse weather category derived from a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Clear,
    CloudyFoggy,
    Rainy,
    Severe,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Clear => "Clear/Partly Cloudy",
            Condition::CloudyFoggy => "Foggy/Cloudy",
            Condition::Rainy => "Rainy",
            Condition::Severe => "Severe Weather",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a WMO weather code by inclusive upper bounds.
///
/// The bounds follow the provider's code table ordering and are not a
/// per-code lookup: any code above 67 is severe, and anything at or below 3
/// (negative codes included) is clear.
pub fn classify(code: i64) -> Condition {
    match code {
        ..=3 => Condition::Clear,
        4..=48 => Condition::CloudyFoggy,
        49..=67 => Condition::Rainy,
        _ => Condition::Severe,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_match_code_table() {
        assert_eq!(classify(3), Condition::Clear);
        assert_eq!(classify(4), Condition::CloudyFoggy);
        assert_eq!(classify(48), Condition::CloudyFoggy);
        assert_eq!(classify(49), Condition::Rainy);
        assert_eq!(classify(67), Condition::Rainy);
        assert_eq!(classify(68), Condition::Severe);
    }

    #[test]
    fn every_code_in_range_lands_in_its_band() {
        for code in 0..=3 {
            assert_eq!(classify(code), Condition::Clear, "code {code}");
        }
        for code in 4..=48 {
            assert_eq!(classify(code), Condition::CloudyFoggy, "code {code}");
        }
        for code in 49..=67 {
            assert_eq!(classify(code), Condition::Rainy, "code {code}");
        }
        for code in [68, 71, 80, 95, 99, 1_000] {
            assert_eq!(classify(code), Condition::Severe, "code {code}");
        }
    }

    #[test]
    fn unvalidated_codes_follow_range_rule() {
        assert_eq!(classify(-1), Condition::Clear);
        assert_eq!(classify(i64::MIN), Condition::Clear);
        assert_eq!(classify(i64::MAX), Condition::Severe);
    }

    #[test]
    fn labels_are_human_readable() {
        assert_eq!(Condition::Clear.to_string(), "Clear/Partly Cloudy");
        assert_eq!(Condition::CloudyFoggy.label(), "Foggy/Cloudy");
        assert_eq!(Condition::Rainy.label(), "Rainy");
        assert_eq!(Condition::Severe.label(), "Severe Weather");
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Condition::CloudyFoggy).expect("serialize");
        assert_eq!(json, "\"cloudy_foggy\"");
    }
}
