use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Feedback {
    pub message: &'static str,
    pub icon: &'static str,
}

static CORRECT: [Feedback; 6] = [
    Feedback { message: "Awesome! You nailed it!", icon: "\u{1F389}" },
    Feedback { message: "Fantastic! You're on fire!", icon: "\u{1F680}" },
    Feedback { message: "Perfect! Keep it up!", icon: "\u{2B50}" },
    Feedback { message: "Brilliant! You got it right!", icon: "\u{1F3AF}" },
    Feedback { message: "Excellent! Well done!", icon: "\u{1F4AF}" },
    Feedback { message: "Amazing! You're crushing it!", icon: "\u{1F525}" },
];

static INCORRECT: [Feedback; 6] = [
    Feedback { message: "Oops! Better luck next time!", icon: "\u{1F4AA}" },
    Feedback { message: "Not quite! Keep trying!", icon: "\u{1F3AF}" },
    Feedback { message: "Close, but not quite right!", icon: "\u{1F4DA}" },
    Feedback { message: "Don't worry, learning is a journey!", icon: "\u{1F31F}" },
    Feedback { message: "Almost there! You'll get the next one!", icon: "\u{1F680}" },
    Feedback { message: "No worries, every mistake is a lesson!", icon: "\u{1F4A1}" },
];

pub fn messages(is_correct: bool) -> &'static [Feedback] {
    if is_correct { &CORRECT } else { &INCORRECT }
}

/// Pick one message uniformly from the matching pool.
pub fn feedback_for<R: Rng>(is_correct: bool, rng: &mut R) -> Feedback {
    let pool = messages(is_correct);
    pool[rng.gen_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand::rngs::mock::StepRng;

    use super::*;

    #[test]
    fn test_zero_rng_picks_first_message() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(feedback_for(true, &mut rng).message, "Awesome! You nailed it!");
        assert_eq!(feedback_for(false, &mut rng).message, "Oops! Better luck next time!");
    }

    #[test]
    fn test_pools_do_not_mix() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(CORRECT.contains(&feedback_for(true, &mut rng)));
            assert!(INCORRECT.contains(&feedback_for(false, &mut rng)));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SmallRng::seed_from_u64(42);
        let mut b = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(feedback_for(true, &mut a), feedback_for(true, &mut b));
        }
    }

    #[test]
    fn test_every_message_reachable() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let fb = feedback_for(false, &mut rng);
            let idx = INCORRECT.iter().position(|m| *m == fb).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
