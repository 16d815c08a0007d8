use reindeer_maze::{read_map_from, Direction, Error, Map, INFINITE_SCORE, TURN_SCORE};

const STRAIGHT_CORRIDOR: &str = "#####
#S.E#
#####";

const SINGLE_BEND: &str = "#####
#S..#
###.#
###E#";

const SPLIT_CELLS: &str = "#####
#S#E#
#####";

fn read_map_text(text: &str) -> Map {
    read_map_from(text.as_bytes()).unwrap()
}

#[test]
fn start_vertex_score_is_zero() {
    let map = read_map_text(STRAIGHT_CORRIDOR);
    let start_vertex = map.vertex_index(map.start_pos(), Direction::East);
    let scores = map.score_graph(false).min_scores(&[start_vertex]);

    assert_eq!(scores[start_vertex], 0);
}

#[test]
fn corridor_costs_its_manhattan_length() {
    let map = read_map_text(STRAIGHT_CORRIDOR);

    assert_eq!(map.min_total_score().unwrap(), 2);
}

#[test]
fn south_facing_source_pays_one_turn() {
    let map = read_map_text(STRAIGHT_CORRIDOR);
    let source = map.vertex_index(map.start_pos(), Direction::South);
    let scores = map.score_graph(false).min_scores(&[source]);
    let best = Direction::all_dirs()
        .iter()
        .map(|dir| scores[map.vertex_index(map.end_pos(), *dir)])
        .min()
        .unwrap();

    assert_eq!(best, 1002);
}

#[test]
fn backward_scores_mirror_forward_scores() {
    let map = read_map_text(STRAIGHT_CORRIDOR);
    let start_vertex = map.vertex_index(map.start_pos(), Direction::East);
    let end_vertex = map.vertex_index(map.end_pos(), Direction::East);
    let forward_scores = map.score_graph(false).min_scores(&[start_vertex]);
    let backward_scores = map.score_graph(true).min_scores(&[end_vertex]);

    assert_eq!(backward_scores[end_vertex], 0);
    assert_eq!(backward_scores[start_vertex], forward_scores[end_vertex]);
}

#[test]
fn isolated_floor_cell_has_only_turn_edges() {
    let map = read_map_text(SPLIT_CELLS);
    let graph = map.score_graph(false);
    for dir in Direction::all_dirs() {
        let edges = graph.edges_from(map.vertex_index(map.start_pos(), *dir));
        let expect_targets = [
            map.vertex_index(map.start_pos(), dir.turn_clockwise()),
            map.vertex_index(map.start_pos(), dir.turn_counterclockwise()),
        ];

        assert_eq!(edges.len(), 2);
        for edge in edges {
            assert_eq!(edge.score(), TURN_SCORE);
            assert!(expect_targets.contains(&edge.target()));
        }
    }
}

#[test]
fn walled_off_end_stays_infinite() {
    let map = read_map_text(SPLIT_CELLS);
    let start_vertex = map.vertex_index(map.start_pos(), Direction::East);
    let scores = map.score_graph(false).min_scores(&[start_vertex]);

    assert!(Direction::all_dirs()
        .iter()
        .all(|dir| scores[map.vertex_index(map.end_pos(), *dir)] == INFINITE_SCORE));
}

#[test]
fn unreachable_end_is_an_error() {
    let map = read_map_text(SPLIT_CELLS);

    assert!(matches!(map.min_total_score(), Err(Error::NoPathToEnd)));
}

#[test]
fn best_path_covers_whole_single_bend() {
    let map = read_map_text(SINGLE_BEND);

    assert_eq!(map.best_path_pos_n().unwrap(), (1004, 5));
}

#[test]
fn solver_output_is_deterministic() {
    let map = read_map_text(SINGLE_BEND);

    assert_eq!(
        map.best_path_pos_n().unwrap(),
        map.best_path_pos_n().unwrap()
    );
}

#[test]
fn empty_map_text_is_an_error() {
    let result = read_map_from("".as_bytes());

    assert!(matches!(
        result.unwrap_err().downcast_ref::<Error>(),
        Some(Error::EmptyMap)
    ));
}

#[test]
fn ragged_map_text_is_an_error() {
    let result = read_map_from("#####\n####".as_bytes());

    assert!(matches!(
        result.unwrap_err().downcast_ref::<Error>(),
        Some(Error::InconsistentRow(5, 4))
    ));
}

#[test]
fn duplicate_start_position_is_an_error() {
    let result = read_map_from("######\n#S.SE#\n######".as_bytes());

    assert!(matches!(
        result.unwrap_err().downcast_ref::<Error>(),
        Some(Error::MultipleStartPosition(_, _))
    ));
}
