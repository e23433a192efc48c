//! Tick delay staircase applied every time food is eaten.

/// Delay at which the staircase stops lowering the delay
pub const MIN_DELAY_MS: u64 = 25;

/// Delay after one more piece of food, given the current delay.
///
/// Smaller delays shrink in smaller steps so the game keeps accelerating
/// without becoming unplayable.
pub fn next_delay(delay_ms: u64) -> u64 {
    match delay_ms {
        d if d > 150 => d - 5,
        d if d > 100 => d - 3,
        d if d > 50 => d - 2,
        d if d > MIN_DELAY_MS => d - 1,
        d => d,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_boundaries() {
        assert_eq!(next_delay(200), 195);
        assert_eq!(next_delay(151), 146);
        assert_eq!(next_delay(150), 147);
        assert_eq!(next_delay(101), 98);
        assert_eq!(next_delay(100), 98);
        assert_eq!(next_delay(51), 49);
        assert_eq!(next_delay(50), 49);
        assert_eq!(next_delay(26), 25);
        assert_eq!(next_delay(25), 25);
        assert_eq!(next_delay(10), 10);
    }

    #[test]
    fn test_ten_eats_from_default() {
        let delay = (0..10).fold(200, |d, _| next_delay(d));
        assert_eq!(delay, 150);
    }

    #[test]
    fn test_staircase_reaches_floor() {
        let mut delay = 200;
        let mut eats = 0;
        while delay > MIN_DELAY_MS {
            let next = next_delay(delay);
            assert!(next < delay);
            delay = next;
            eats += 1;
        }
        assert_eq!(delay, MIN_DELAY_MS);
        assert_eq!(eats, 76);
        assert_eq!(next_delay(delay), MIN_DELAY_MS);
    }
}
