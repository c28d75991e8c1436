//! Score to level and title mapping.

/// Points needed to advance one level.
pub const POINTS_PER_LEVEL: u64 = 500;

/// `floor(score / 500) + 1`. Saturates at `u32::MAX`.
pub fn level_for_score(score: u64) -> u32 {
    u32::try_from(score / POINTS_PER_LEVEL)
        .unwrap_or(u32::MAX - 1)
        .saturating_add(1)
}

/// Points still missing before the next level is reached.
pub fn points_to_next_level(score: u64) -> u64 {
    POINTS_PER_LEVEL - score % POINTS_PER_LEVEL
}

/// Display title for a level band.
pub fn title_for_level(level: u32) -> &'static str {
    match level {
        0..=4 => "Goal Beginner",
        5..=9 => "Quest Adventurer",
        10..=14 => "Eternal Champion",
        15..=19 => "Master Achiever",
        _ => "Legendary Hero",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for_score(0), 1);
        assert_eq!(level_for_score(499), 1);
        assert_eq!(level_for_score(500), 2);
        assert_eq!(level_for_score(999), 2);
        assert_eq!(level_for_score(1000), 3);
    }

    #[test]
    fn level_saturates_on_huge_scores() {
        assert_eq!(level_for_score(u64::MAX), u32::MAX);
    }

    #[test]
    fn points_to_next_level_counts_down() {
        assert_eq!(points_to_next_level(0), 500);
        assert_eq!(points_to_next_level(499), 1);
        assert_eq!(points_to_next_level(500), 500);
    }

    #[test]
    fn title_bands() {
        assert_eq!(title_for_level(1), "Goal Beginner");
        assert_eq!(title_for_level(4), "Goal Beginner");
        assert_eq!(title_for_level(5), "Quest Adventurer");
        assert_eq!(title_for_level(10), "Eternal Champion");
        assert_eq!(title_for_level(15), "Master Achiever");
        assert_eq!(title_for_level(19), "Master Achiever");
        assert_eq!(title_for_level(20), "Legendary Hero");
    }
}
