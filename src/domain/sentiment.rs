/// Directional bias of an annotation (trendline, breakout, order block...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bias {
    Bullish,
    #[default]
    Bearish,
}

impl Bias {
    /// Only the exact keyword `bullish` selects the bullish palette; anything else
    /// (missing, `bearish`, `neutral`, typos) draws bearish.
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword {
            Some("bullish") => Bias::Bullish,
            _ => Bias::Bearish,
        }
    }

    pub fn is_bullish(self) -> bool {
        self == Bias::Bullish
    }
}

/// Strength of a support/resistance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZoneStrength {
    Weak,
    #[default]
    Medium,
    Strong,
}

impl ZoneStrength {
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        match keyword {
            Some("strong") => ZoneStrength::Strong,
            Some("weak") => ZoneStrength::Weak,
            _ => ZoneStrength::Medium,
        }
    }

    /// Stroke alpha for the level line; the band fill derives from it.
    pub fn alpha(self) -> f32 {
        match self {
            ZoneStrength::Weak => 0.4,
            ZoneStrength::Medium => 0.6,
            ZoneStrength::Strong => 0.8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bias_keyword_is_exact() {
        assert_eq!(Bias::from_keyword(Some("bullish")), Bias::Bullish);
        assert_eq!(Bias::from_keyword(Some("Bullish")), Bias::Bearish);
        assert_eq!(Bias::from_keyword(None), Bias::Bearish);
    }

    #[test]
    fn strength_defaults_to_medium() {
        assert_eq!(ZoneStrength::from_keyword(None), ZoneStrength::Medium);
        assert_eq!(ZoneStrength::from_keyword(Some("huge")), ZoneStrength::Medium);
        assert_eq!(ZoneStrength::from_keyword(Some("strong")).alpha(), 0.8);
        assert_eq!(ZoneStrength::from_keyword(Some("weak")).alpha(), 0.4);
    }
}
