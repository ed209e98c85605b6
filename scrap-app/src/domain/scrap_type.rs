use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapType {
    #[default]
    Paper,
    Plastic,
    Metal,
    #[serde(rename = "ewaste")]
    EWaste,
}

impl ScrapType {
    pub const ALL: [ScrapType; 4] = [Self::Paper, Self::Plastic, Self::Metal, Self::EWaste];

    /// Wire value used in form fields and JSON payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paper => "paper",
            Self::Plastic => "plastic",
            Self::Metal => "metal",
            Self::EWaste => "ewaste",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Paper => "Paper & Cardboard",
            Self::Plastic => "Plastic",
            Self::Metal => "Metal",
            Self::EWaste => "E-Waste",
        }
    }
}

impl fmt::Display for ScrapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scrap type: {0}")]
pub struct UnknownScrapType(pub String);

impl FromStr for ScrapType {
    type Err = UnknownScrapType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paper" => Ok(Self::Paper),
            "plastic" => Ok(Self::Plastic),
            "metal" => Ok(Self::Metal),
            "ewaste" | "e-waste" => Ok(Self::EWaste),
            other => Err(UnknownScrapType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(serde_json::to_string(&ScrapType::EWaste).unwrap(), "\"ewaste\"");
        assert_eq!(serde_json::to_string(&ScrapType::Paper).unwrap(), "\"paper\"");
        for scrap_type in ScrapType::ALL {
            assert_eq!(scrap_type.as_str().parse::<ScrapType>(), Ok(scrap_type));
        }
    }

    #[test]
    fn test_parse_accepts_hyphenated_ewaste() {
        assert_eq!("E-Waste".parse::<ScrapType>(), Ok(ScrapType::EWaste));
        assert!("glass".parse::<ScrapType>().is_err());
    }
}
