//! Score bands that select explanation wording

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchQuality {
    Excellent,
    Good,
    Moderate,
    Limited,
    Low,
}

impl MatchQuality {
    /// Band for a match score on the unit range
    pub fn from_unit(score: f64) -> Self {
        if score >= 0.85 {
            MatchQuality::Excellent
        } else if score >= 0.70 {
            MatchQuality::Good
        } else if score >= 0.50 {
            MatchQuality::Moderate
        } else if score >= 0.30 {
            MatchQuality::Limited
        } else {
            MatchQuality::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchQuality::Excellent => "excellent",
            MatchQuality::Good => "good",
            MatchQuality::Moderate => "moderate",
            MatchQuality::Limited => "limited",
            MatchQuality::Low => "low",
        }
    }

    pub fn summary_label(&self) -> &'static str {
        match self {
            MatchQuality::Excellent => "Excellent match",
            MatchQuality::Good => "Strong candidate",
            MatchQuality::Moderate => "Moderate fit",
            MatchQuality::Limited => "Limited alignment",
            MatchQuality::Low => "Poor match",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticFit {
    Strong,
    Good,
    Moderate,
    Weak,
}

impl SemanticFit {
    pub fn from_unit(similarity: f64) -> Self {
        if similarity > 0.8 {
            SemanticFit::Strong
        } else if similarity > 0.6 {
            SemanticFit::Good
        } else if similarity > 0.4 {
            SemanticFit::Moderate
        } else {
            SemanticFit::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapLevel {
    High,
    Good,
    Partial,
    Low,
}

impl OverlapLevel {
    pub fn from_ratio(overlap: f64) -> Self {
        if overlap > 0.7 {
            OverlapLevel::High
        } else if overlap > 0.5 {
            OverlapLevel::Good
        } else if overlap > 0.3 {
            OverlapLevel::Partial
        } else {
            OverlapLevel::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceBand {
    Extensive,
    Solid,
    Established,
    Early,
    Minimal,
}

impl ExperienceBand {
    pub fn from_years(years: f64) -> Self {
        if years >= 10.0 {
            ExperienceBand::Extensive
        } else if years >= 5.0 {
            ExperienceBand::Solid
        } else if years >= 2.0 {
            ExperienceBand::Established
        } else if years > 0.0 {
            ExperienceBand::Early
        } else {
            ExperienceBand::Minimal
        }
    }

    /// Short descriptor used in one-line summaries
    pub fn summary_descriptor(years: f64) -> &'static str {
        if years >= 8.0 {
            "experienced professional"
        } else if years >= 4.0 {
            "mid-level candidate"
        } else if years >= 1.0 {
            "early-career candidate"
        } else {
            "entry-level candidate"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Strong,
    Potential,
    Weak,
}

impl Recommendation {
    pub fn from_unit(score: f64) -> Self {
        if score >= 0.75 {
            Recommendation::Strong
        } else if score >= 0.50 {
            Recommendation::Potential
        } else {
            Recommendation::Weak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_quality_thresholds() {
        assert_eq!(MatchQuality::from_unit(0.85), MatchQuality::Excellent);
        assert_eq!(MatchQuality::from_unit(0.849), MatchQuality::Good);
        assert_eq!(MatchQuality::from_unit(0.70), MatchQuality::Good);
        assert_eq!(MatchQuality::from_unit(0.50), MatchQuality::Moderate);
        assert_eq!(MatchQuality::from_unit(0.30), MatchQuality::Limited);
        assert_eq!(MatchQuality::from_unit(0.29), MatchQuality::Low);
    }

    #[test]
    fn test_semantic_and_overlap_bounds_are_exclusive() {
        assert_eq!(SemanticFit::from_unit(0.8), SemanticFit::Good);
        assert_eq!(SemanticFit::from_unit(0.81), SemanticFit::Strong);
        assert_eq!(SemanticFit::from_unit(0.4), SemanticFit::Weak);
        assert_eq!(OverlapLevel::from_ratio(0.7), OverlapLevel::Good);
        assert_eq!(OverlapLevel::from_ratio(0.71), OverlapLevel::High);
        assert_eq!(OverlapLevel::from_ratio(0.3), OverlapLevel::Low);
    }

    #[test]
    fn test_experience_bands() {
        assert_eq!(ExperienceBand::from_years(10.0), ExperienceBand::Extensive);
        assert_eq!(ExperienceBand::from_years(5.0), ExperienceBand::Solid);
        assert_eq!(ExperienceBand::from_years(2.0), ExperienceBand::Established);
        assert_eq!(ExperienceBand::from_years(0.5), ExperienceBand::Early);
        assert_eq!(ExperienceBand::from_years(0.0), ExperienceBand::Minimal);
        assert_eq!(ExperienceBand::summary_descriptor(8.0), "experienced professional");
        assert_eq!(ExperienceBand::summary_descriptor(0.5), "entry-level candidate");
    }

    #[test]
    fn test_recommendation_bands() {
        assert_eq!(Recommendation::from_unit(0.75), Recommendation::Strong);
        assert_eq!(Recommendation::from_unit(0.5), Recommendation::Potential);
        assert_eq!(Recommendation::from_unit(0.49), Recommendation::Weak);
    }
}
