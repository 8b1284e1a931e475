//! Whole-turn scenarios: parse a board, play moves, compare the render.
//!
//! Legend: `@` slime, `o` small slime, `B` box, `x` switch, `D`/`_` closed
//! and open door, `^`/`-` spike up/down, `P`/`p` pusher, `#` wall, `O` pit.

use slimesolver::{parse, Direction, Engine, EngineConfig, EngineError, Symbol, TurnEvent, Vector2};

use Direction::{Down, Left, Right, Up};

fn engine(level: &str) -> Engine {
    let lvl = parse(level).expect("valid level");
    Engine::new(lvl.board, lvl.actors)
}

fn play(level: &str, moves: &[Direction]) -> String {
    let mut e = engine(level);
    for &dir in moves {
        e.step(dir).expect("turn resolves");
    }
    e.render()
}

fn assert_moves(level: &str, moves: &[Direction], expected: &str) {
    assert_eq!(play(level, moves), expected, "level {level:?} after {moves:?}");
}

// ── Movement ──

#[test]
fn slime_moves_in_every_direction() {
    assert_moves("...\n.@.\n...", &[Up], ".@.\n...\n...");
    assert_moves("...\n.@.\n...", &[Down], "...\n...\n.@.");
    assert_moves("...\n.@.\n...", &[Left], "...\n@..\n...");
    assert_moves("...\n.@.\n...", &[Right], "...\n..@\n...");
}

#[test]
fn walls_and_edges_stop_slimes() {
    assert_moves("@#", &[Right], "@#");
    assert_moves("@.", &[Left, Up, Down], "@.");
}

#[test]
fn slimes_in_a_line_move_together() {
    assert_moves(".@@", &[Left], "@@.");
    assert_moves("@@.", &[Right], ".@@");
}

#[test]
fn slime_falls_into_pit() {
    assert_moves(".@.\n..O", &[Down, Right], "...\n..O");
}

// ── Boxes ──

#[test]
fn box_is_pushed_in_every_direction() {
    assert_moves("@B.", &[Right], ".@B");
    assert_moves(".B@", &[Left], "B@.");
    assert_moves(".\nB\n@", &[Up], "B\n@\n.");
    assert_moves("@\nB\n.", &[Down], ".\n@\nB");
}

#[test]
fn box_against_wall_blocks_the_slime() {
    assert_moves("@B#.", &[Right], "@B#.");
}

#[test]
fn pushed_box_stops_at_next_box_gap() {
    assert_moves("@B.B.", &[Right], ".@BB.");
}

#[test]
fn box_pushes_box() {
    assert_moves("@BB.", &[Right], ".@BB");
    assert_moves("@BBB#", &[Right], "@BBB#");
}

#[test]
fn two_pushers_in_a_row() {
    assert_moves("@B@B..", &[Right, Right], "..@B@B");
}

#[test]
fn box_fills_pit() {
    assert_moves("@BO.", &[Right, Right, Right], "...@");
    assert_moves(".@.B.O.#", &[Right; 5], "......@#");
}

#[test]
fn filling_a_pit_is_reported() {
    let mut e = engine("@BO");
    let report = e.step(Right).expect("resolves");
    assert!(report.events.contains(&TurnEvent::PitFilled { at: Vector2::new(2, 0) }));
    assert!(report.events.iter().any(|ev| matches!(ev, TurnEvent::ActorRemoved { symbol: Symbol::Box, .. })));
    assert_eq!(e.render(), ".@.");
}

// ── Switches and doors ──

#[test]
fn closed_door_blocks() {
    assert_moves("@D.", &[Right], "@D.");
    assert_moves("@BD.", &[Right], "@BD.");
}

#[test]
fn unlinked_open_door_closes_in_front_of_slime() {
    assert_moves("@_.", &[Right], "@D.");
}

#[test]
fn slime_walks_over_switch() {
    assert_moves("@x.", &[Right, Right], ".x@");
    assert_moves("@x.D", &[Right, Right], ".x@D");
}

#[test]
fn switch_opens_door_on_the_same_turn() {
    assert_moves("@xD.", &[Right], ".@_.");
    assert_moves("@x#D", &[Right, Right], ".@#_");
}

#[test]
fn pushed_box_presses_switch() {
    assert_moves("@BxD", &[Right], ".@B_");
    assert_moves("@Bx#D", &[Right, Right], ".@B#_");
    assert_moves("@Bx..D", &[Right, Right], "..@B._");
}

#[test]
fn slime_crosses_door_opened_by_another() {
    assert_moves("@x#.\n@.D.", &[Right; 3], ".@#.\n.._@");
    assert_moves("@x#..\n@BD..", &[Right; 3], ".@#..\n.._@B");
}

#[test]
fn door_shuts_when_switch_is_released() {
    assert_moves("@x.#.\n@.D..", &[Right; 3], ".x@#.\n.@D..");
}

#[test]
fn door_closing_crushes_what_stands_in_it() {
    assert_moves("@x.#@D#", &[Right, Right], ".x@#.D#");
    assert_moves("@x.#@BD#", &[Right, Right], ".x@#.@D#");
}

#[test]
fn convoy_through_switched_door() {
    assert_moves("@@D.@Bx..", &[Right; 3], "..D@@.x@B");
}

#[test]
fn box_carried_through_door() {
    assert_moves("@x#@BD..", &[Right; 3], ".@#.._@B");
}

#[test]
fn box_parked_on_switch_holds_door_open() {
    assert_moves("xB@#D", &[Left, Right], "B.@#_");
    assert_moves("xB@D.", &[Left, Right, Right, Right], "B.._@");
    assert_moves("xB@BD..", &[Left, Right, Right, Right, Right], "B..._@B");
}

// ── Small slimes ──

#[test]
fn small_slime_cannot_push() {
    assert_moves("oB.", &[Right], "oB.");
}

#[test]
fn small_slime_does_not_press_switch() {
    assert_moves("oxD", &[Right], ".oD");
}

#[test]
fn small_slimes_combine() {
    assert_moves("oo", &[Right], ".@");
    assert_moves("ooD", &[Right], ".@D");
    assert_moves("ooB.", &[Right], ".@B.");
    assert_moves("oo@", &[Right], ".@@");
}

#[test]
fn combine_is_reported_once() {
    let mut e = engine("oo");
    let report = e.step(Right).expect("resolves");
    let grew = report.events.iter().filter(|ev| matches!(ev, TurnEvent::SlimeGrew { .. })).count();
    let combined = report.events.iter().filter(|ev| matches!(ev, TurnEvent::SlimeCombined { .. })).count();
    assert_eq!((grew, combined), (1, 1));
    assert_eq!(e.actors().count(), 1);
}

#[test]
fn small_slimes_do_not_combine_while_the_front_one_moves() {
    assert_moves("oo@.", &[Right], ".oo@");
    assert_moves("ooD#@x", &[Right], ".oo#.@");
}

#[test]
fn big_slime_is_stopped_by_small_slime() {
    assert_moves("o@#@o", &[Right], "o@#@o");
}

#[test]
fn grown_slime_presses_switch() {
    assert_moves("oox#D", &[Right, Right], "..@#_");
    assert_moves("ooxBD", &[Right, Right], "..@B_");
}

// ── Spikes and pushers ──

#[test]
fn spikes_flip_every_turn() {
    assert_moves("-^", &[Right], "^-");
    assert_moves("-^", &[Right, Right], "-^");
}

#[test]
fn rising_spike_kills_small_slime() {
    assert_moves("o-", &[Right], ".^");
}

#[test]
fn rising_spike_splits_big_slime() {
    assert_moves(".@-", &[Right], ".oo");
    assert_moves(".@-", &[Right, Left], "oo-");
}

#[test]
fn boxes_ignore_spikes() {
    assert_moves(".@B-", &[Right], "..@B");
}

#[test]
fn pusher_blocks_and_toggles() {
    assert_moves("@P.", &[Right], "@p.");
    assert_moves("@P.", &[Right, Right], "@P.");
}

// ── Engine surface ──

#[test]
fn no_direction_changes_nothing() {
    let mut e = engine("@B.\n-x_\n.oO");
    let before = e.render();
    let report = e.step(Direction::None).expect("no-op");
    assert!(report.is_noop());
    assert_eq!(e.render(), before);
}

#[test]
fn slime_steps_off_switch_into_the_door_it_opened() {
    assert_moves("@xD.", &[Right], ".@_.");
    assert_moves("@xD.", &[Right, Right], ".x@.");
    assert_moves("@xD.", &[Right, Right, Right], ".xD@");
    assert_moves("@x_..", &[Right, Right], ".x@..");
    assert_moves("@x_..", &[Right, Right, Right, Left], ".xD@.");
}

#[test]
fn capped_turn_is_rejected_whole() {
    let lvl = parse("@xD.").expect("valid level");
    let mut e = Engine::new(lvl.board, lvl.actors).with_config(EngineConfig { max_rounds: 1 });
    let before = e.render();
    assert!(matches!(e.step(Right), Err(EngineError::NoFixpoint { rounds: 1 })));
    assert_eq!(e.render(), before);
    assert_eq!(e.turns(), 0);
}
