//! Display lookup tables keyed by the closed enums
//!
//! Rendering layers read colours and labels from here instead of keeping
//! their own mutable maps.

use crate::persona::{PersonaType, ValidationStatus};

/// Colour palette for a persona type (hex strings)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypePalette {
    /// Human-readable type label
    pub label: &'static str,
    /// Accent colour
    pub primary: &'static str,
    /// Card background
    pub background: &'static str,
    /// Card border
    pub border: &'static str,
    /// Text on background
    pub text: &'static str,
}

/// Display configuration for a validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    /// Badge label
    pub label: &'static str,
    /// Badge colour
    pub badge: &'static str,
    /// Tooltip text
    pub description: &'static str,
}

const PARTNER: TypePalette = TypePalette {
    label: "Partner",
    primary: "#2563EB",
    background: "#EFF6FF",
    border: "#BFDBFE",
    text: "#1E3A8A",
};

const INNOVATOR: TypePalette = TypePalette {
    label: "Innovator",
    primary: "#7C3AED",
    background: "#F5F3FF",
    border: "#DDD6FE",
    text: "#4C1D95",
};

const STAKEHOLDER: TypePalette = TypePalette {
    label: "Stakeholder",
    primary: "#059669",
    background: "#ECFDF5",
    border: "#A7F3D0",
    text: "#064E3B",
};

const BENEFICIARY: TypePalette = TypePalette {
    label: "Beneficiary",
    primary: "#D97706",
    background: "#FFFBEB",
    border: "#FDE68A",
    text: "#78350F",
};

const VALIDATED: StatusDisplay = StatusDisplay {
    label: "Validated",
    badge: "#16A34A",
    description: "Confirmed by direct interview evidence",
};

const INFERRED: StatusDisplay = StatusDisplay {
    label: "Inferred",
    badge: "#9CA3AF",
    description: "Derived from secondary sources, not yet validated",
};

const HYBRID: StatusDisplay = StatusDisplay {
    label: "Hybrid",
    badge: "#F59E0B",
    description: "Partly confirmed by interviews, partly inferred",
};

impl PersonaType {
    /// Colour palette for this type
    #[inline]
    #[must_use]
    pub const fn palette(self) -> &'static TypePalette {
        match self {
            Self::Partner => &PARTNER,
            Self::Innovator => &INNOVATOR,
            Self::Stakeholder => &STAKEHOLDER,
            Self::Beneficiary => &BENEFICIARY,
        }
    }
}

impl ValidationStatus {
    /// Display configuration for this status
    #[inline]
    #[must_use]
    pub const fn display(self) -> &'static StatusDisplay {
        match self {
            Self::Validated => &VALIDATED,
            Self::Inferred => &INFERRED,
            Self::Hybrid => &HYBRID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_distinct_palette() {
        let primaries: Vec<_> = PersonaType::ALL.iter().map(|t| t.palette().primary).collect();
        for (i, a) in primaries.iter().enumerate() {
            for b in &primaries[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn labels_match_variants() {
        assert_eq!(PersonaType::Stakeholder.palette().label, "Stakeholder");
        assert_eq!(ValidationStatus::Hybrid.display().label, "Hybrid");
        assert!(ValidationStatus::Inferred
            .display()
            .description
            .contains("not yet validated"));
    }
}
