//! Known droppings classes and what they mean.

use crate::risk::RiskLevel;

/// Static description of one classifier class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DroppingsClass {
    /// Model label.
    pub label: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Severity of the condition.
    pub severity: RiskLevel,
    /// Short description.
    pub description: &'static str,
    /// Recommended actions.
    pub recommendations: &'static [&'static str],
}

static CLASSES: [DroppingsClass; 4] = [
    DroppingsClass {
        label: "cocci",
        name: "Coccidiose",
        severity: RiskLevel::Danger,
        description: "Infection parasitaire intestinale causee par des coccidies.",
        recommendations: &[
            "Consultation veterinaire urgente",
            "Traitement anticoccidien immediat",
            "Desinfection du poulailler",
            "Ameliorer la ventilation",
        ],
    },
    DroppingsClass {
        label: "healthy",
        name: "Sain",
        severity: RiskLevel::Optimal,
        description: "Les fientes indiquent un etat de sante normal.",
        recommendations: &[
            "Maintenir les conditions actuelles",
            "Surveillance reguliere",
            "Alimentation equilibree",
        ],
    },
    DroppingsClass {
        label: "ncd",
        name: "Newcastle (NCD)",
        severity: RiskLevel::Critical,
        description: "Maladie virale tres contagieuse et mortelle.",
        recommendations: &[
            "URGENCE VETERINAIRE",
            "Isoler immediatement les oiseaux",
            "Signaler aux autorites sanitaires",
            "Mise en quarantaine du lot",
        ],
    },
    DroppingsClass {
        label: "salmo",
        name: "Salmonellose",
        severity: RiskLevel::Warning,
        description: "Infection bacterienne pouvant affecter les humains.",
        recommendations: &[
            "Consultation veterinaire",
            "Antibiotherapie ciblee",
            "Hygiene renforcee",
            "Controle de la chaine alimentaire",
        ],
    },
];

/// Look up a class by model label.
pub fn find_class(label: &str) -> Option<&'static DroppingsClass> {
    CLASSES.iter().find(|class| class.label == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_lookup() {
        let severities: Vec<_> = CLASSES.iter().map(|c| c.severity).collect();
        assert!(severities.contains(&RiskLevel::Optimal));
        assert!(severities.contains(&RiskLevel::Critical));
        assert_eq!(find_class("salmo").map(|c| c.name), Some("Salmonellose"));
        assert!(find_class("Cocci").is_none());
    }
}
