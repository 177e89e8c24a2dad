use std::{fmt::Display, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Half-star ratings. Serialized as decimal strings (`"3.5"`), accepted as either
/// strings or numbers since the server stores them numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    TwoAndHalf,
    Three,
    ThreeAndHalf,
    Four,
    FourAndHalf,
    Five,
}

impl Rating {
    pub const ALL: [Rating; 6] = [
        Rating::TwoAndHalf,
        Rating::Three,
        Rating::ThreeAndHalf,
        Rating::Four,
        Rating::FourAndHalf,
        Rating::Five,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::TwoAndHalf => "2.5",
            Rating::Three => "3.0",
            Rating::ThreeAndHalf => "3.5",
            Rating::Four => "4.0",
            Rating::FourAndHalf => "4.5",
            Rating::Five => "5.0",
        }
    }

    pub fn stars(&self) -> &'static str {
        match self {
            Rating::TwoAndHalf => "★★½",
            Rating::Three => "★★★",
            Rating::ThreeAndHalf => "★★★½",
            Rating::Four => "★★★★",
            Rating::FourAndHalf => "★★★★½",
            Rating::Five => "★★★★★",
        }
    }

    /// Option label shown in the rating select, e.g. `★★★½ (3.5)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.stars(), self.as_str())
    }

    pub fn from_f64(n: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| (r.as_f64() - n).abs() < f64::EPSILON)
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Rating::TwoAndHalf => 2.5,
            Rating::Three => 3.0,
            Rating::ThreeAndHalf => 3.5,
            Rating::Four => 4.0,
            Rating::FourAndHalf => 4.5,
            Rating::Five => 5.0,
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("{s:?} is not a rating"))?;
        Self::from_f64(n).ok_or_else(|| format!("{s} is not one of 2.5, 3.0, 3.5, 4.0, 4.5, 5.0"))
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(f64),
        }
        match Raw::deserialize(deserializer)? {
            Raw::Text(s) => s.parse().map_err(de::Error::custom),
            Raw::Number(n) => {
                Self::from_f64(n).ok_or_else(|| de::Error::custom(format!("{n} is not a rating")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn wire_form() {
        assert_eq!(serde_json::to_value(Rating::Four).unwrap(), json!("4.0"));
        assert_eq!(serde_json::from_value::<Rating>(json!(4.5)).unwrap(), Rating::FourAndHalf);
        assert_eq!(serde_json::from_value::<Rating>(json!("3")).unwrap(), Rating::Three);
        assert!(serde_json::from_value::<Rating>(json!("1.0")).is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(Rating::TwoAndHalf.label(), "★★½ (2.5)");
        assert_eq!(Rating::Five.label(), "★★★★★ (5.0)");
    }
}
