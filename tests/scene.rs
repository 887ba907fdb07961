use floorwright::config::FloorplanConfig;
use floorwright::editor::{EditorState, Handle};
use floorwright::geometry::Point;
use floorwright::ingest::create_from_matrix;
use floorwright::Scene;

fn editor() -> EditorState {
    let matrix = vec![vec![10_000.0, 7.0], vec![7.0, 10_000.0]];
    let names = vec!["A".to_string(), "B".to_string()];
    let cfg = FloorplanConfig::default();
    let fp = create_from_matrix(&matrix, &names, &cfg.layout).unwrap();
    EditorState::new(fp, cfg)
}

#[test]
fn scene_lists_blocks_and_routed_connections() {
    let mut state = editor();
    let scene = Scene::build(&mut state);
    assert_eq!(scene.summary, "Blocks: 2 | Connections: 1");
    assert_eq!(scene.blocks.len(), 2);
    assert_eq!(scene.blocks[0].label, "A\n10000 μm²\n100×100");
    assert!(scene.blocks.iter().all(|b| !b.selected && b.handles.is_empty()));

    let conn = &scene.connections[0];
    assert_eq!(conn.title, "A ↔ B");
    assert_eq!(conn.weight, 7.0);
    assert_eq!(conn.segments.len(), 5);
    assert_eq!(conn.segments[0].from, Point::new(200.0, 150.0));
    assert_eq!(conn.segments[4].to, Point::new(900.0, 150.0));
    assert_eq!(conn.label_anchor, Point::new(550.0, 100.0));
    assert_eq!(conn.active_port, None);

    // Auto-fit frames the blocks with 100 units of padding.
    assert_eq!(
        (scene.viewport.x_min, scene.viewport.x_max, scene.viewport.y_min, scene.viewport.y_max),
        (0.0, 1100.0, 0.0, 300.0)
    );
}

#[test]
fn building_twice_is_idempotent() {
    let mut state = editor();
    let first = Scene::build(&mut state);
    let model = state.floorplan.clone();
    let second = Scene::build(&mut state);
    assert_eq!(first, second);
    assert_eq!(state.floorplan, model);
}

#[test]
fn selected_block_shows_handles_with_hover() {
    let mut state = editor();
    state.press(Point::new(150.0, 150.0));
    state.release();
    state.pointer_move(Point::new(195.0, 150.0));
    let scene = Scene::build(&mut state);
    let a = &scene.blocks[0];
    assert!(a.selected);
    assert_eq!(a.handles.len(), 6);
    let hovered: Vec<Handle> = a.handles.iter().filter(|h| h.hovered).map(|h| h.handle).collect();
    assert_eq!(hovered, vec![Handle::EdgeRight]);
    assert!(scene.blocks[1].handles.is_empty());
}

#[test]
fn scene_serialises_to_json() {
    let mut state = editor();
    let scene = Scene::build(&mut state);
    let json = serde_json::to_value(&scene).unwrap();
    assert_eq!(json["summary"], "Blocks: 2 | Connections: 1");
    assert_eq!(json["connections"][0]["start_port"]["edge"], "right");
    assert_eq!(json["blocks"][1]["id"], 1);
}
