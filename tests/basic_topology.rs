use fractal_turtle::{PlanarConfig, PlanarInterpreter, SymbolMap, TurtleOp};
use glam::Vec2;

fn setup() -> PlanarInterpreter {
    // The spatial map draws no letter but F; swap that for B.
    let mut symbols = SymbolMap::spatial();
    symbols.set_op('F', TurtleOp::Ignore);
    symbols.set_op('B', TurtleOp::Draw); // Branch
    symbols.set_op('<', TurtleOp::Yaw(1.0)); // Left
    symbols.set_op('>', TurtleOp::Yaw(-1.0)); // Right

    PlanarInterpreter::new(PlanarConfig {
        angle: 90.0,
        step: 1.0,
        starting_rotation: 0.0,
        ..Default::default()
    })
    .with_map(symbols)
}

#[test]
fn test_simple_fork_topology() {
    let interpreter = setup();

    // Grammar: B [ < B ] [ > B ] B
    // 1. Trunk from (0, 0) to (1, 0), heading +X.
    // 2. Left branch from the trunk tip to (1, 1).
    // 3. Right branch from the trunk tip to (1, -1).
    // 4. Continuation from the trunk tip to (2, 0).
    let path = interpreter.interpret("B[<B][>B]BF").unwrap();

    assert_eq!(path.len(), 4, "Should have 4 segments");
    assert_eq!(path.open_branches, 0);

    let trunk = path.segments[0].segment;
    assert_eq!(trunk.start, Vec2::ZERO);
    assert_eq!(trunk.end, Vec2::new(1.0, 0.0));

    // Every branch hangs off the trunk tip exactly.
    for tagged in &path.segments[1..] {
        assert_eq!(tagged.segment.start, trunk.end);
        assert_eq!(tagged.symbol, 'B');
    }

    let left = path.segments[1].segment.end;
    let right = path.segments[2].segment.end;
    assert!(left.distance(Vec2::new(1.0, 1.0)) < 1e-5);
    assert!(right.distance(Vec2::new(1.0, -1.0)) < 1e-5);
    assert_eq!(path.segments[3].segment.end, Vec2::new(2.0, 0.0));
}
