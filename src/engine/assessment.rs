use crate::engine::scoring::score_percent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum PerformanceTier {
    Beginner,
    KeepTrying,
    NotBad,
    Good,
    Great,
    Excellent,
    Champion,
}

/// Lower bound (inclusive) of each band, highest first.
const THRESHOLDS: [(u32, PerformanceTier); 6] = [
    (90, PerformanceTier::Champion),
    (80, PerformanceTier::Excellent),
    (70, PerformanceTier::Great),
    (60, PerformanceTier::Good),
    (50, PerformanceTier::NotBad),
    (30, PerformanceTier::KeepTrying),
];

impl PerformanceTier {
    pub fn from_percent(percent: u32) -> Self {
        THRESHOLDS
            .iter()
            .find(|(min, _)| percent >= *min)
            .map_or(PerformanceTier::Beginner, |(_, tier)| *tier)
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceTier::Champion => "Outstanding! You're a trivia champion!",
            PerformanceTier::Excellent => "Excellent work! You really know your stuff!",
            PerformanceTier::Great => "Great job! Well done on that performance!",
            PerformanceTier::Good => "Good effort! You're getting there!",
            PerformanceTier::NotBad => "Not bad! Keep studying and you'll improve!",
            PerformanceTier::KeepTrying => "Keep trying! Practice makes perfect!",
            PerformanceTier::Beginner => "Don't give up! Every expert was once a beginner!",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            PerformanceTier::Champion => "\u{1F3C6}",
            PerformanceTier::Excellent => "\u{1F31F}",
            PerformanceTier::Great => "\u{1F44F}",
            PerformanceTier::Good => "\u{1F44D}",
            PerformanceTier::NotBad => "\u{1F4DA}",
            PerformanceTier::KeepTrying => "\u{1F4AA}",
            PerformanceTier::Beginner => "\u{1F3AF}",
        }
    }
}

pub fn performance_tier(score: u32, total_possible: u32) -> PerformanceTier {
    if total_possible == 0 {
        return PerformanceTier::Beginner;
    }
    PerformanceTier::from_percent(score_percent(score, total_possible))
}

pub fn performance_icon(score: u32, total_possible: u32) -> &'static str {
    performance_tier(score, total_possible).icon()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_lower_bounds_are_inclusive() {
        assert_eq!(PerformanceTier::from_percent(100), PerformanceTier::Champion);
        assert_eq!(PerformanceTier::from_percent(90), PerformanceTier::Champion);
        assert_eq!(PerformanceTier::from_percent(89), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percent(80), PerformanceTier::Excellent);
        assert_eq!(PerformanceTier::from_percent(70), PerformanceTier::Great);
        assert_eq!(PerformanceTier::from_percent(60), PerformanceTier::Good);
        assert_eq!(PerformanceTier::from_percent(50), PerformanceTier::NotBad);
        assert_eq!(PerformanceTier::from_percent(49), PerformanceTier::KeepTrying);
        assert_eq!(PerformanceTier::from_percent(30), PerformanceTier::KeepTrying);
        assert_eq!(PerformanceTier::from_percent(29), PerformanceTier::Beginner);
        assert_eq!(PerformanceTier::from_percent(0), PerformanceTier::Beginner);
    }

    #[test]
    fn test_tier_rounds_percentage() {
        // 17/19 = 89.47% -> 89
        assert_eq!(performance_tier(17, 19), PerformanceTier::Excellent);
        // 9/10 exactly on the boundary
        assert_eq!(performance_tier(9, 10), PerformanceTier::Champion);
        // 179/200 = 89.5% rounds up to 90
        assert_eq!(performance_tier(179, 200), PerformanceTier::Champion);
    }

    #[test]
    fn test_tiers_are_ordered_by_score() {
        let total = 20;
        let mut last = PerformanceTier::Beginner;
        for score in 0..=total {
            let tier = performance_tier(score, total);
            assert!(tier >= last);
            last = tier;
        }
        assert_eq!(last, PerformanceTier::Champion);
    }

    #[test]
    fn test_zero_total_is_beginner() {
        assert_eq!(performance_tier(0, 0), PerformanceTier::Beginner);
        assert_eq!(performance_icon(0, 0), "\u{1F3AF}");
    }
}
