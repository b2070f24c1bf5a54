use log::info;

use cfop_astar::goal::default_pair_order;
use cfop_astar::moves::Axis;
use cfop_astar::{
    extract, parse_moves, progress, solve, Centers, Color, ConfigError, Cube, PairSlot,
    PlacementHeuristic, Progress, Rotation, Search, SearchError, SearchOptions, Solver, Stage,
    SubState, Turn,
};

const SCRAMBLE: &str = "L2 R' U2 D2 B L B2 F R D R' L' D2 B' F2 R2 F U L' R2";

fn scrambled(scramble: &str) -> Cube {
    let mut cube = Cube::solved();
    cube.apply_all(&parse_moves(scramble).unwrap());
    cube
}

fn cross_is_solved(cube: &Cube) -> bool {
    let centers = Centers::from_cube(cube).unwrap();
    centers
        .cross_keys()
        .iter()
        .all(|&key| centers.is_placed(cube, key))
}

#[test_log::test]
fn test_solved_cross_needs_no_moves() {
    let subgoal = extract(&Cube::solved(), Stage::Cross, &[]).unwrap();
    let solution = solve(&subgoal, SearchOptions::default()).unwrap();
    assert!(solution.moves.is_empty());
    assert!(solution.stats.expanded <= 1);
}

#[test_log::test]
fn test_scrambled_cross_within_cap() {
    let mut cube = scrambled(SCRAMBLE);
    assert!(!cross_is_solved(&cube));

    let report = Solver::default().solve_cross(&mut cube).unwrap();
    info!("cross: {report}");
    assert!(report.moves.len() <= 10);
    assert_eq!(report.stats.expanded, report.stats.closed_len);
    assert!(cross_is_solved(&cube));
    assert!(progress(&cube).unwrap() >= Progress::F2l);

    // every bottom edge shows the down color below and its side center's color
    let centers = Centers::from_cube(&cube).unwrap();
    for side in centers.side_ring() {
        let (x, _, z) = centers.position(side);
        let stickers = cube.stickers((x, -1, z));
        assert_eq!(stickers[1], Some(Color::Yellow));
        assert!(stickers.contains(&Some(side)));
    }
}

#[test_log::test]
fn test_white_cross_after_rotation() {
    let mut cube = scrambled(SCRAMBLE);
    cube.rotate(Rotation::new(Axis::X, Turn::Half));
    assert_eq!(Centers::from_cube(&cube).unwrap().down(), Color::White);

    let report = Solver::default().solve_cross(&mut cube).unwrap();
    assert!(report.moves.len() <= 10);
    for (x, z) in [(0, 1), (1, 0), (0, -1), (-1, 0)] {
        assert_eq!(cube.stickers((x, -1, z))[1], Some(Color::White));
    }
    assert!(cross_is_solved(&cube));
}

#[test_log::test]
fn test_solution_reaches_goal_exactly() {
    let subgoal = extract(&scrambled(SCRAMBLE), Stage::Cross, &[]).unwrap();
    let solution = solve(&subgoal, SearchOptions::default()).unwrap();
    assert_eq!(
        subgoal.initial.apply_all(&solution.moves).fingerprint(),
        subgoal.goal.fingerprint()
    );
}

#[test_log::test]
fn test_solved_pair_needs_no_moves() {
    // U leaves the cross and every pair in place
    let mut cube = scrambled("U");
    let slot = PairSlot::new(Color::Green, Color::Red);
    let subgoal = extract(&cube, Stage::Pair(slot), &[]).unwrap();
    let solution = solve(&subgoal, SearchOptions::for_pairs()).unwrap();
    assert!(solution.moves.is_empty());

    let reports = Solver::default().solve_pairs(&mut cube, &[slot]).unwrap();
    assert!(reports[0].moves.is_empty());
    assert!(cross_is_solved(&cube));
}

#[test_log::test]
fn test_cubie_mismatch_is_rejected() {
    let subgoal = extract(&Cube::solved(), Stage::Cross, &[]).unwrap();
    let short = SubState::new(subgoal.initial.pieces()[..3].to_vec());
    let heuristic = PlacementHeuristic::new(&subgoal, 2);

    let err = Search::new(&subgoal.goal, heuristic, SearchOptions::default())
        .run(&short)
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Configuration(ConfigError::MissingCubie(_))
    ));
}

#[test_log::test]
fn test_search_is_deterministic() {
    let subgoal = extract(&scrambled(SCRAMBLE), Stage::Cross, &[]).unwrap();
    let first = solve(&subgoal, SearchOptions::default()).unwrap();
    let second = solve(&subgoal, SearchOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test_log::test]
fn test_sexy_move_pairs() {
    let mut cube = scrambled("R U R' U'");
    let report = Solver::default().solve(&mut cube, None).unwrap();

    assert!(report.cross.moves.is_empty());
    assert_eq!(report.pairs.len(), 4);
    for stage in report.stages() {
        info!("{stage}");
        assert!(stage.moves.len() <= 14);
        assert_eq!(stage.stats.expanded, stage.stats.closed_len);
    }
    assert!(progress(&cube).unwrap() >= Progress::Oll);
}

#[test_log::test]
fn test_custom_pair_order_keeps_earlier_pairs() {
    let mut cube = scrambled("R U R' U' F' U2 F");
    let order = [
        PairSlot::new(Color::Green, Color::Red),
        PairSlot::new(Color::Green, Color::Orange),
    ];
    let solver = Solver::default();
    solver.solve_cross(&mut cube).unwrap();
    solver.solve_pairs(&mut cube, &order).unwrap();

    let centers = Centers::from_cube(&cube).unwrap();
    let down = centers.down();
    assert!(cross_is_solved(&cube));
    for slot in order {
        assert!(centers.is_placed(&cube, slot.edge_key()));
        assert!(centers.is_placed(&cube, slot.corner_key(down)));
    }
}

#[test_log::test]
fn test_full_solve_finishes_f2l() {
    let mut cube = scrambled(SCRAMBLE);
    let report = Solver::default().solve(&mut cube, None).unwrap();

    for stage in report.stages() {
        info!("{stage}");
    }
    assert!(report.cross.moves.len() <= 10);
    assert!(report.pairs.iter().all(|stage| stage.moves.len() <= 14));
    assert!(progress(&cube).unwrap() >= Progress::Oll);

    let mut replay = scrambled(SCRAMBLE);
    replay.apply_all(&report.moves());
    assert_eq!(replay, cube);
}

#[test_log::test]
fn test_cross_on_every_face() {
    let cube = scrambled(SCRAMBLE);
    let reports = Solver::default().cross_per_face(&cube).unwrap();
    assert_eq!(reports.len(), 6);

    for report in &reports {
        info!("{} down: {}", report.down, report.cross);
        assert!(report.cross.moves.len() <= 10);

        let mut rotated = cube.clone();
        for &rotation in &report.rotations {
            rotated.rotate(rotation);
        }
        assert_eq!(Centers::from_cube(&rotated).unwrap().down(), report.down);
        rotated.apply_all(&report.cross.moves);
        assert!(cross_is_solved(&rotated));
    }

    // the input cube is left alone
    assert_eq!(cube, scrambled(SCRAMBLE));
}

#[test_log::test]
fn test_default_pair_order_follows_orientation() {
    let mut cube = Cube::solved();
    cube.rotate(Rotation::new(Axis::Y, Turn::Clockwise));
    let order = default_pair_order(&cube).unwrap();
    // y brings red to the front and green to the left
    assert_eq!(order[0], PairSlot::new(Color::Red, Color::Green));
    assert_eq!(order[3], PairSlot::new(Color::Orange, Color::Blue));
}
