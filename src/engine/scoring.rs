use crate::session::question::{Difficulty, QuestionSet};

pub fn total_possible_score(questions: &QuestionSet) -> u32 {
    questions.iter().map(|q| q.points()).sum()
}

/// Share of the quiz reached once the question at `index` is on screen.
pub fn progress_percent(index: usize, total: usize) -> u32 {
    if index >= total {
        return 100;
    }
    ((index + 1) as f64 / total as f64 * 100.0).round() as u32
}

pub fn score_percent(score: u32, total_possible: u32) -> u32 {
    if total_possible == 0 {
        return 0;
    }
    (score as f64 / total_possible as f64 * 100.0).round() as u32
}

/// "📂 History • 🟡 Medium"
pub fn category_label(category: &str, difficulty: Difficulty) -> String {
    format!(
        "\u{1F4C2} {category} \u{2022} {} {}",
        difficulty.icon(),
        difficulty.as_str()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::question::sample_question;

    #[test]
    fn test_total_possible_score_sums_difficulty_points() {
        let set = QuestionSet::new(vec![
            sample_question(1, 0, Difficulty::Easy),
            sample_question(2, 0, Difficulty::Medium),
            sample_question(3, 0, Difficulty::Hard),
            sample_question(4, 0, Difficulty::Hard),
        ])
        .unwrap();
        assert_eq!(total_possible_score(&set), 9);
    }

    #[test]
    fn test_progress_rounds_and_caps() {
        assert_eq!(progress_percent(0, 10), 10);
        assert_eq!(progress_percent(9, 10), 100);
        assert_eq!(progress_percent(10, 10), 100);
        assert_eq!(progress_percent(25, 10), 100);
        assert_eq!(progress_percent(0, 3), 33);
        assert_eq!(progress_percent(1, 3), 67);
    }

    #[test]
    fn test_progress_is_monotonic() {
        for total in 1..=12 {
            let mut last = 0;
            for index in 0..=total + 2 {
                let p = progress_percent(index, total);
                assert!(p >= last, "progress fell at {index}/{total}");
                assert!(p <= 100);
                last = p;
            }
            assert_eq!(last, 100);
        }
    }

    #[test]
    fn test_score_percent_handles_zero_total() {
        assert_eq!(score_percent(5, 0), 0);
        assert_eq!(score_percent(9, 10), 90);
        assert_eq!(score_percent(2, 3), 67);
    }

    #[test]
    fn test_category_label() {
        assert_eq!(
            category_label("Science", Difficulty::Hard),
            "\u{1F4C2} Science \u{2022} \u{1F534} Hard"
        );
    }
}
