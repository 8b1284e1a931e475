//! Property tests for whole turns on generated boards.
//!
//! Invariants covered:
//! - A turn without a direction changes nothing.
//! - A rejected turn leaves the board exactly as it was, and an accepted
//!   one commits every actor at most once.
//! - Pushing a box chain moves every box one cell when there is room
//!   ahead, and nothing at all when the chain ends at a wall.

use proptest::prelude::*;
use slimesolver::{parse, Direction, Engine};

const CELLS: &[char] = &['.', '.', '.', '#', 'O', '@', 'o', 'B', 'x', 'D', '_', '^', '-', 'P'];

fn level_strategy() -> impl Strategy<Value = String> {
    (1usize..7, 1usize..5).prop_flat_map(|(w, h)| {
        prop::collection::vec(prop::sample::select(CELLS), w * h).prop_map(move |cells| {
            cells.chunks(w)
                .map(|row| row.iter().collect::<String>())
                .collect::<Vec<_>>()
                .join("\n")
        })
    })
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(vec![Direction::Up, Direction::Down, Direction::Left, Direction::Right])
}

fn engine(level: &str) -> Engine {
    let lvl = parse(level).expect("generated level is valid");
    Engine::new(lvl.board, lvl.actors)
}

proptest! {
    #[test]
    fn no_direction_is_idempotent(level in level_strategy()) {
        let mut e = engine(&level);
        let before = e.render();
        let report = e.step(Direction::None).expect("no-op turn");
        prop_assert!(report.is_noop());
        prop_assert_eq!(e.render(), before);
    }

    #[test]
    fn rejected_turns_leave_the_world_unchanged(
        level in level_strategy(),
        moves in prop::collection::vec(direction_strategy(), 1..6),
    ) {
        let mut e = engine(&level);
        for dir in moves {
            let before = e.render();
            match e.step(dir) {
                Ok(report) => {
                    let mut ids = report.commit_order.clone();
                    ids.sort();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), report.commit_order.len());
                }
                Err(_) => prop_assert_eq!(e.render(), before),
            }
        }
    }

    #[test]
    fn push_chain_moves_as_one(boxes in 1usize..7, room in 0usize..3) {
        let level = format!("@{}{}#", "B".repeat(boxes), ".".repeat(room));
        let mut e = engine(&level);
        e.step(Direction::Right).expect("push resolves");

        let expected = if room == 0 {
            level.clone()
        } else {
            format!(".@{}{}#", "B".repeat(boxes), ".".repeat(room - 1))
        };
        prop_assert_eq!(e.render(), expected);
    }
}
