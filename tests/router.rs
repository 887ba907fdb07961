use floorwright::config::{RouteConfig, RouteMode};
use floorwright::geometry::{Edge, Point};
use floorwright::model::{Block, BlockId, Connection, Floorplan, Port, PortPair};
use floorwright::router::{build_path, lane_offset, overlap_count, route_all, route_connection};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn block(id: usize, x: f64, y: f64) -> Block {
    Block {
        id: BlockId(id),
        name: format!("M{id}"),
        area: 10_000.0,
        x,
        y,
        width: 100.0,
        height: 100.0,
    }
}

/// A on the left, B and C to its right; ports placed by hand.
fn fan_out(start_a: Port, start_b: Port) -> Floorplan {
    let mut fp = Floorplan::default();
    for b in [block(0, 0.0, 0.0), block(1, 400.0, 0.0), block(2, 400.0, 300.0)] {
        fp.blocks.insert(b.id, b);
    }
    let mut ab = Connection::new(BlockId(0), BlockId(1), 3.0);
    ab.ports = Some(PortPair {
        start: start_a,
        end: Port::at(Point::new(400.0, 50.0), Edge::Left),
    });
    let mut ac = Connection::new(BlockId(0), BlockId(2), 5.0);
    ac.ports = Some(PortPair {
        start: start_b,
        end: Port::at(Point::new(400.0, 350.0), Edge::Left),
    });
    fp.connections.push(ab);
    fp.connections.push(ac);
    fp
}

#[test]
fn straight_route_between_facing_ports() {
    let start = Port::at(Point::new(100.0, 50.0), Edge::Right);
    let fp = fan_out(start, Port::at(Point::new(100.0, 80.0), Edge::Right));
    let route = route_connection(&fp, 0, &RouteConfig::default()).unwrap();
    let points: Vec<(f64, f64)> = route.segments.iter().map(|s| (s.to.x, s.to.y)).collect();
    assert_eq!(
        points,
        vec![(150.0, 50.0), (150.0, 0.0), (350.0, 0.0), (350.0, 50.0), (400.0, 50.0)]
    );
    assert_eq!(route.lane_offset, 50.0);
    assert_eq!(route.length, 400.0);
    assert_eq!(route.label_anchor, Point::new(250.0, 0.0));
    assert_eq!(route.weight, 3.0);
}

#[test]
fn coinciding_ports_widen_the_jog() {
    let shared = Port::at(Point::new(100.0, 50.0), Edge::Right);
    let nearly = Port::at(Point::new(100.0, 53.0), Edge::Right);
    let fp = fan_out(shared, nearly);
    assert_eq!(overlap_count(&fp, 0, 5.0), 1);
    assert_eq!(overlap_count(&fp, 1, 5.0), 1);
    let cfg = RouteConfig::default();
    assert_eq!(lane_offset(&fp, 0, &cfg), 70.0);
    let route = route_connection(&fp, 0, &cfg).unwrap();
    assert_eq!(route.segments[0].to, Point::new(170.0, 50.0));
}

#[test]
fn ports_on_different_edges_do_not_overlap() {
    let fp = fan_out(
        Port::at(Point::new(100.0, 100.0), Edge::Right),
        Port::at(Point::new(100.0, 100.0), Edge::Top),
    );
    assert_eq!(overlap_count(&fp, 0, 5.0), 0);
    assert_eq!(lane_offset(&fp, 0, &RouteConfig::default()), 50.0);
}

#[test]
fn manhattan_bridge_is_axis_aligned() {
    let fp = fan_out(
        Port::at(Point::new(100.0, 50.0), Edge::Right),
        Port::at(Point::new(50.0, 100.0), Edge::Top),
    );
    let cfg = RouteConfig {
        mode: RouteMode::Manhattan,
        ..RouteConfig::default()
    };
    let route = route_connection(&fp, 1, &cfg).unwrap();
    assert_eq!(route.segments.len(), 6);
    for seg in &route.segments {
        assert!(seg.from.x == seg.to.x || seg.from.y == seg.to.y, "{seg:?}");
    }
    // Top port jogs up then right towards the end port.
    assert_eq!(route.segments[1].to, Point::new(100.0, 150.0));
    // Corner of the bridge at (outer1.x, outer2.y).
    assert_eq!(route.segments[2].to, Point::new(100.0, 300.0));
    let total: f64 = route.segments.iter().map(|s| s.length()).sum();
    assert!(approx(route.length, total));
}

#[test]
fn straight_bridge_uses_euclidean_length() {
    let start = Port::at(Point::new(0.0, 0.0), Edge::Right);
    let end = Port::at(Point::new(300.0, 400.0), Edge::Left);
    let segs = build_path(&start, &end, 50.0, RouteMode::Straight);
    assert_eq!(segs[2].from, Point::new(50.0, 50.0));
    assert_eq!(segs[2].to, Point::new(250.0, 350.0));
    let total: f64 = segs.iter().map(|s| s.length()).sum();
    assert!(approx(total, 200.0 + 130_000f64.sqrt()));
}

#[test]
fn label_anchor_sits_at_half_length() {
    let fp = fan_out(
        Port::at(Point::new(30.0, 0.0), Edge::Bottom),
        Port::at(Point::new(100.0, 20.0), Edge::Right),
    );
    for mode in [RouteMode::Straight, RouteMode::Manhattan] {
        let cfg = RouteConfig {
            mode,
            ..RouteConfig::default()
        };
        for route in route_all(&fp, &cfg) {
            let mut walked = 0.0;
            let mut found = false;
            for seg in &route.segments {
                let len = seg.length();
                if len > 0.0 && !found && walked + len >= route.length / 2.0 {
                    let d = seg.from.distance(route.label_anchor);
                    assert!(approx(walked + d, route.length / 2.0));
                    found = true;
                }
                walked += len;
            }
            assert!(found);
        }
    }
}

#[test]
fn routing_is_deterministic() {
    let fp = fan_out(
        Port::at(Point::new(100.0, 50.0), Edge::Right),
        Port::at(Point::new(100.0, 50.0), Edge::Right),
    );
    let cfg = RouteConfig::default();
    let first = route_all(&fp, &cfg);
    let second = route_all(&fp, &cfg);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn connections_without_ports_are_skipped() {
    let mut fp = fan_out(
        Port::at(Point::new(100.0, 50.0), Edge::Right),
        Port::at(Point::new(100.0, 80.0), Edge::Right),
    );
    fp.connections[1].ports = None;
    assert!(route_connection(&fp, 1, &RouteConfig::default()).is_none());
    assert_eq!(route_all(&fp, &RouteConfig::default()).len(), 1);
    assert!(route_connection(&fp, 7, &RouteConfig::default()).is_none());
}
