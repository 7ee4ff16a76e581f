//! Ordered risk levels.

use serde::{Deserialize, Serialize};

/// Four-tier risk classification, in ascending order of severity.
///
/// The derived `Ord` follows declaration order, so aggregation is `max`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Reading inside the optimal band.
    #[default]
    Optimal,
    /// Acceptable but sub-optimal.
    Warning,
    /// Outside the acceptable band, correction needed.
    Danger,
    /// Far outside the acceptable band, immediate intervention.
    Critical,
}

impl RiskLevel {
    /// All levels, least severe first.
    pub const ALL: [Self; 4] = [Self::Optimal, Self::Warning, Self::Danger, Self::Critical];

    /// Numeric score (0 = optimal, 3 = critical).
    pub const fn score(self) -> u8 {
        match self {
            Self::Optimal => 0,
            Self::Warning => 1,
            Self::Danger => 2,
            Self::Critical => 3,
        }
    }

    /// Lowercase identifier used in documents and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Critical => "critical",
        }
    }

    /// Fixed subtitle shown under a global risk.
    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::Optimal => "Conditions excellentes",
            Self::Warning => "Surveillance accrue",
            Self::Danger => "Correction nécessaire",
            Self::Critical => "Intervention immédiate requise",
        }
    }

    /// Short label for the flock status banner.
    pub const fn status_label(self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Warning => "ATTENTION",
            Self::Danger => "DANGER",
            Self::Critical => "CRITIQUE",
        }
    }

    /// Recommended actions for a global risk at this level.
    pub const fn recommendations(self) -> &'static [&'static str] {
        match self {
            Self::Optimal => &[],
            Self::Warning => &[
                "Conditions sous-optimales",
                "Surveiller régulièrement",
                "Préparer des actions correctives",
            ],
            Self::Danger => &[
                "Ajuster la ventilation",
                "Corriger la température/humidité",
                "Surveiller les gaz toxiques",
            ],
            Self::Critical => &[
                "Ventiler immédiatement l'élevage",
                "Vérifier les systèmes de chauffage/refroidissement",
                "Contacter un vétérinaire si nécessaire",
            ],
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "optimal" => Ok(Self::Optimal),
            "warning" => Ok(Self::Warning),
            "danger" => Ok(Self::Danger),
            "critical" => Ok(Self::Critical),
            other => Err(format!("unknown risk level: {other}")),
        }
    }
}
