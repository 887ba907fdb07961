use floorwright::config::FloorplanConfig;
use floorwright::editor::{Corner, DragMode, EditorState, Handle, ResizeMode};
use floorwright::geometry::{Edge, Point};
use floorwright::ingest::create_from_matrix;
use floorwright::model::{BlockId, Port, PortEnd};
use floorwright::Scene;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// A at (100,100) and B at (900,100), both 100×100, connected once.
fn editor() -> EditorState {
    let matrix = vec![vec![10_000.0, 1.0], vec![1.0, 10_000.0]];
    let names = vec!["A".to_string(), "B".to_string()];
    let cfg = FloorplanConfig::default();
    let fp = create_from_matrix(&matrix, &names, &cfg.layout).unwrap();
    EditorState::new(fp, cfg)
}

fn block_a(state: &EditorState) -> (f64, f64, f64, f64) {
    let b = &state.floorplan.blocks[&BlockId(0)];
    (b.x, b.y, b.width, b.height)
}

fn start_port(state: &EditorState) -> Port {
    state.floorplan.connections[0].ports.unwrap().start
}

#[test]
fn dragging_the_body_moves_block_and_ports() {
    let mut state = editor();
    state.press(Point::new(150.0, 150.0));
    assert_eq!(
        state.drag_mode,
        DragMode::Block {
            block: BlockId(0),
            mode: ResizeMode::Move
        }
    );
    assert_eq!(start_port(&state), Port::at(Point::new(200.0, 150.0), Edge::Right));

    for i in 1..=10 {
        let i = i as f64;
        assert!(state.pointer_move(Point::new(150.0 + i, 150.0 + 2.0 * i)));
    }
    assert_eq!(block_a(&state), (110.0, 120.0, 100.0, 100.0));
    assert_eq!(start_port(&state), Port::at(Point::new(210.0, 170.0), Edge::Right));

    state.release();
    assert!(state.is_idle());
    assert_eq!(state.selected_block, Some(BlockId(0)));
    assert!(state.last_pointer.is_none());
}

#[test]
fn right_band_resizes_width() {
    let mut state = editor();
    state.press(Point::new(190.0, 130.0));
    assert_eq!(
        state.drag_mode,
        DragMode::Block {
            block: BlockId(0),
            mode: ResizeMode::Width
        }
    );
    state.pointer_move(Point::new(240.0, 130.0));
    let (_, _, w, h) = block_a(&state);
    assert_eq!(w, 150.0);
    assert!(approx(w * h, 10_000.0));
    let port = start_port(&state);
    assert_eq!((port.x, port.y, port.edge), (250.0, 150.0, Edge::Right));
}

#[test]
fn rejected_steps_still_advance_the_pointer() {
    let mut state = editor();
    state.press(Point::new(190.0, 130.0));
    // Width 10 is at the minimum: rejected.
    state.pointer_move(Point::new(100.0, 130.0));
    assert_eq!(block_a(&state).2, 100.0);
    // The next delta is measured from the rejected event's position.
    state.pointer_move(Point::new(110.0, 130.0));
    assert_eq!(block_a(&state).2, 110.0);
}

#[test]
fn height_band_resizes_height() {
    let mut state = editor();
    state.press(Point::new(150.0, 190.0));
    assert_eq!(
        state.drag_mode,
        DragMode::Block {
            block: BlockId(0),
            mode: ResizeMode::Height
        }
    );
    state.pointer_move(Point::new(150.0, 210.0));
    let (_, _, w, h) = block_a(&state);
    assert_eq!(h, 120.0);
    assert!(approx(w, 10_000.0 / 120.0));
    let port = start_port(&state);
    assert!(approx(port.x, 100.0 + 10_000.0 / 120.0));
    assert!(approx(port.y, 160.0));
}

#[test]
fn corner_handle_follows_width_only() {
    let mut state = editor();
    state.press(Point::new(105.0, 105.0));
    assert_eq!(
        state.drag_mode,
        DragMode::Block {
            block: BlockId(0),
            mode: ResizeMode::Corner
        }
    );
    state.pointer_move(Point::new(125.0, 115.0));
    let (x, y, w, h) = block_a(&state);
    assert_eq!((x, y, w), (100.0, 100.0, 120.0));
    assert!(approx(h, 10_000.0 / 120.0));
}

#[test]
fn ports_take_priority_over_blocks() {
    let mut state = editor();
    state.press(Point::new(200.0, 150.0));
    assert_eq!(
        state.drag_mode,
        DragMode::Port {
            connection: 0,
            end: PortEnd::Start
        }
    );
    assert_eq!(state.selected_block, None);
    state.pointer_move(Point::new(150.0, 205.0));
    assert_eq!(start_port(&state), Port::at(Point::new(150.0, 200.0), Edge::Top));
    assert_eq!(block_a(&state), (100.0, 100.0, 100.0, 100.0));
    state.release();
    assert!(state.is_idle());

    // The dragged placement survives later presses.
    state.press(Point::new(500.0, 500.0));
    assert_eq!(start_port(&state), Port::at(Point::new(150.0, 200.0), Edge::Top));
}

#[test]
fn hover_is_presentation_only() {
    let mut state = editor();
    state.press(Point::new(150.0, 150.0));
    state.release();
    let snapshot = state.floorplan.clone();

    assert!(state.pointer_move(Point::new(195.0, 195.0)));
    assert_eq!(state.hover_handle, Some(Handle::Corner(Corner::TopRight)));
    assert!(!state.pointer_move(Point::new(196.0, 196.0)));
    assert!(state.pointer_move(Point::new(150.0, 150.0)));
    assert_eq!(state.hover_handle, None);
    assert_eq!(state.floorplan, snapshot);

    state.pointer_move(Point::new(190.0, 150.0));
    assert_eq!(state.hover_handle, Some(Handle::EdgeRight));
    state.release();
    assert_eq!(state.hover_handle, None);
}

#[test]
fn moves_without_a_gesture_do_nothing() {
    let mut state = editor();
    let snapshot = state.floorplan.clone();
    assert!(!state.pointer_move(Point::new(150.0, 150.0)));
    assert_eq!(state.floorplan, snapshot);
}

#[test]
fn replayed_script_matches_live_events() {
    let mut live = editor();
    live.press(Point::new(150.0, 150.0));
    live.pointer_move(Point::new(170.0, 140.0));
    live.release();

    let mut replayed = editor();
    let n = replayed
        .replay("press 150 150\nmove 170 140\nrelease\n")
        .unwrap();
    assert_eq!(n, 3);
    assert_eq!(replayed.floorplan, live.floorplan);
}

#[test]
fn panning_a_fresh_editor_shifts_the_fitted_view() {
    let mut state = editor();
    state
        .replay("pan on\npress 500 150\nmove 510 150\nrelease\n")
        .unwrap();
    let scene = Scene::build(&mut state);
    let vp = scene.viewport;
    assert_eq!((vp.x_min, vp.x_max, vp.y_min, vp.y_max), (-10.0, 1090.0, 0.0, 300.0));
    assert!(!vp.auto_fit);
}

#[test]
fn zooming_before_the_first_draw_scales_the_fitted_view() {
    let mut state = editor();
    state.zoom_in();
    assert!(approx(state.viewport.width(), 880.0));
    assert!(approx(state.viewport.height(), 240.0));
    assert!(approx(state.viewport.center().x, 550.0));
    assert!(approx(state.viewport.center().y, 150.0));
}

#[test]
fn viewport_actions() {
    let mut state = editor();
    state.fit_to_screen();
    assert!(!state.viewport.auto_fit);
    assert_eq!(
        (state.viewport.x_min, state.viewport.x_max, state.viewport.y_min, state.viewport.y_max),
        (50.0, 1050.0, 50.0, 250.0)
    );
    state.zoom_in();
    assert!(approx(state.viewport.width(), 800.0));
    assert!(approx(state.viewport.center().x, 550.0));
    state.zoom_out();
    assert!(approx(state.viewport.width(), 960.0));
    state.reset_view();
    assert!(state.viewport.auto_fit);
}
