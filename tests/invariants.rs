use std::collections::HashSet;

use classic_snake::config::GridSize;
use classic_snake::game::{GameState, TickOutcome};
use classic_snake::input::Direction;
use classic_snake::snake::Cell;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn segments(state: &GameState) -> Vec<Cell> {
    state.snake.segments().copied().collect()
}

#[test]
fn random_play_preserves_growth_food_and_body_rules() {
    let grid = GridSize::new(8);
    let mut state = GameState::new_with_seed(grid, 2024);
    let mut driver = StdRng::seed_from_u64(7);
    let mut meals = 0;
    let mut deaths = 0;

    for _ in 0..5_000 {
        if state.is_over() {
            state.restart();
        }

        let direction = DIRECTIONS[driver.gen_range(0..DIRECTIONS.len())];
        let reversal = direction == state.snake.direction().opposite();
        let accepted = state.buffer_direction(direction);
        assert_eq!(accepted, !reversal, "only reversals are rejected");

        let before = segments(&state);
        let food_before = state.food;
        let score_before = state.score;

        match state.step() {
            TickOutcome::Ate { score } => {
                meals += 1;
                assert_eq!(state.snake.len(), before.len() + 1);
                assert_eq!(state.snake.head(), food_before);
                assert_eq!(score, score_before + 10);
                assert_eq!(&segments(&state)[1..], &before[..]);
            }
            TickOutcome::Moved => {
                assert_eq!(state.snake.len(), before.len());
                assert_ne!(state.snake.head(), food_before);
                assert_eq!(&segments(&state)[1..], &before[..before.len() - 1]);
            }
            TickOutcome::Died(_) => {
                deaths += 1;
                assert_eq!(segments(&state), before);
                assert_eq!(state.food, food_before);
                assert_eq!(state.score, score_before);
            }
            TickOutcome::Idle => panic!("a running game never idles"),
        }

        let body = segments(&state);
        let unique: HashSet<Cell> = body.iter().copied().collect();
        assert_eq!(unique.len(), body.len(), "snake cells are distinct");
        assert!(body.iter().all(|cell| cell.is_within_bounds(grid)));
        if body.len() < grid.total_cells() {
            assert!(!state.snake.occupies(state.food), "food is never on the snake");
        }
    }

    assert!(meals > 0, "random play should eat at least once");
    assert!(deaths > 0, "random play should die at least once");
}

#[test]
fn steps_after_game_over_are_no_ops() {
    let mut state = GameState::new_with_seed(GridSize::new(6), 5);
    while !state.is_over() {
        state.step();
    }

    let body = segments(&state);
    let food = state.food;
    for direction in DIRECTIONS {
        assert!(!state.buffer_direction(direction));
        assert_eq!(state.step(), TickOutcome::Idle);
    }

    assert_eq!(segments(&state), body);
    assert_eq!(state.food, food);
}
