use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Tags offered by the themes multi-select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "Environmental collapse")]
    EnvironmentalCollapse,
    #[serde(rename = "Surveillance state")]
    SurveillanceState,
    #[serde(rename = "Artificial intelligence takeover")]
    ArtificialIntelligenceTakeover,
    #[serde(rename = "Post-apocalyptic survival")]
    PostApocalypticSurvival,
    #[serde(rename = "Totalitarian government")]
    TotalitarianGovernment,
    #[serde(rename = "Corporate control")]
    CorporateControl,
    #[serde(rename = "Biological warfare aftermath")]
    BiologicalWarfareAftermath,
    #[serde(rename = "Digital consciousness")]
    DigitalConsciousness,
    #[serde(rename = "Class warfare")]
    ClassWarfare,
    #[serde(rename = "Genetic engineering")]
    GeneticEngineering,
    #[serde(rename = "Mind control")]
    MindControl,
    #[serde(rename = "Resource depletion")]
    ResourceDepletion,
    #[serde(rename = "Technological dependence")]
    TechnologicalDependence,
    #[serde(rename = "Social media dystopia")]
    SocialMediaDystopia,
    #[serde(rename = "Reality manipulation")]
    RealityManipulation,
    #[serde(rename = "Memory erasure")]
    MemoryErasure,
    #[serde(rename = "Pandemic aftermath")]
    PandemicAftermath,
    #[serde(rename = "Climate disaster")]
    ClimateDisaster,
    #[serde(rename = "Robotic revolution")]
    RoboticRevolution,
    #[serde(rename = "Virtual reality imprisonment")]
    VirtualRealityImprisonment,
}

impl Theme {
    pub const ALL: [Theme; 20] = [
        Theme::EnvironmentalCollapse,
        Theme::SurveillanceState,
        Theme::ArtificialIntelligenceTakeover,
        Theme::PostApocalypticSurvival,
        Theme::TotalitarianGovernment,
        Theme::CorporateControl,
        Theme::BiologicalWarfareAftermath,
        Theme::DigitalConsciousness,
        Theme::ClassWarfare,
        Theme::GeneticEngineering,
        Theme::MindControl,
        Theme::ResourceDepletion,
        Theme::TechnologicalDependence,
        Theme::SocialMediaDystopia,
        Theme::RealityManipulation,
        Theme::MemoryErasure,
        Theme::PandemicAftermath,
        Theme::ClimateDisaster,
        Theme::RoboticRevolution,
        Theme::VirtualRealityImprisonment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::EnvironmentalCollapse => "Environmental collapse",
            Theme::SurveillanceState => "Surveillance state",
            Theme::ArtificialIntelligenceTakeover => "Artificial intelligence takeover",
            Theme::PostApocalypticSurvival => "Post-apocalyptic survival",
            Theme::TotalitarianGovernment => "Totalitarian government",
            Theme::CorporateControl => "Corporate control",
            Theme::BiologicalWarfareAftermath => "Biological warfare aftermath",
            Theme::DigitalConsciousness => "Digital consciousness",
            Theme::ClassWarfare => "Class warfare",
            Theme::GeneticEngineering => "Genetic engineering",
            Theme::MindControl => "Mind control",
            Theme::ResourceDepletion => "Resource depletion",
            Theme::TechnologicalDependence => "Technological dependence",
            Theme::SocialMediaDystopia => "Social media dystopia",
            Theme::RealityManipulation => "Reality manipulation",
            Theme::MemoryErasure => "Memory erasure",
            Theme::PandemicAftermath => "Pandemic aftermath",
            Theme::ClimateDisaster => "Climate disaster",
            Theme::RoboticRevolution => "Robotic revolution",
            Theme::VirtualRealityImprisonment => "Virtual reality imprisonment",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown theme {s:?}"))
    }
}
