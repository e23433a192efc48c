use super::state::Position;
use rand::Rng;

/// Pick a food cell uniformly over the whole board.
///
/// Cells under the snake are not excluded, so food can land on the body.
pub fn generate_food<R: Rng + ?Sized>(rng: &mut R, grid_size: i32) -> Position {
    let x = rng.gen_range(1..=grid_size);
    let y = rng.gen_range(1..=grid_size);
    Position::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_food_always_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let food = generate_food(&mut rng, 20);
            assert!(food.is_within(20), "{:?} out of bounds", food);
        }
    }

    #[test]
    fn test_food_covers_both_edges() {
        let mut rng = StdRng::seed_from_u64(11);
        let cells: Vec<Position> = (0..2_000).map(|_| generate_food(&mut rng, 5)).collect();

        assert!(cells.iter().any(|c| c.x == 1));
        assert!(cells.iter().any(|c| c.x == 5));
        assert!(cells.iter().any(|c| c.y == 1));
        assert!(cells.iter().any(|c| c.y == 5));
    }

    #[test]
    fn test_same_seed_same_food() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(generate_food(&mut a, 20), generate_food(&mut b, 20));
    }
}
