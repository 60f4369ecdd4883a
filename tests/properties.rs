use fractal_turtle::{
    ColorMode, Grammar, PlanarConfig, PlanarInterpreter, SequenceSource, SpatialConfig,
    SpatialInterpreter, colorize_2d, colorize_3d, rewrite,
};
use proptest::prelude::*;
use std::collections::HashMap;

fn symbol_string() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!['F', 'L', 'X', '+', '-', '&', '^', '[', ']']),
        0..200,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    /// Coloring never changes how many segments there are.
    #[test]
    fn prop_colorizer_preserves_count(symbols in symbol_string(), angle in 1.0f32..180.0) {
        let interpreter = PlanarInterpreter::new(PlanarConfig { angle, ..Default::default() });
        if let Ok(path) = interpreter.interpret(&symbols) {
            let spectral = colorize_2d(&path.segments, &ColorMode::Spectral);
            let lookup = colorize_2d(&path.segments, &ColorMode::Symbols(HashMap::new()));
            prop_assert_eq!(spectral.len(), path.len());
            prop_assert_eq!(lookup.len(), path.len());
        }

        let interpreter = SpatialInterpreter::new(SpatialConfig { angle, ..Default::default() });
        if let Ok(path) = interpreter.interpret(&symbols) {
            let colored = colorize_3d(
                &path.segments,
                palette::named::BROWN,
                palette::named::GREEN,
                true,
            );
            prop_assert_eq!(colored.len(), path.len());
        }
    }

    /// Deterministic grammars never consult the random source.
    #[test]
    fn prop_deterministic_rewrite_is_pure(
        axiom in "[FX+\\-]{0,8}",
        iterations in 0usize..4,
        seed_a in 0.0f64..1.0,
        seed_b in 0.0f64..1.0,
    ) {
        let grammar = Grammar::new(axiom).with_rule('F', "F+X").with_rule('X', "F-[X]");
        let a = rewrite(&grammar, iterations, &mut SequenceSource::constant(seed_a)).unwrap();
        let b = rewrite(&grammar, iterations, &mut SequenceSource::constant(seed_b)).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Zero rounds leave any axiom untouched.
    #[test]
    fn prop_zero_iterations_identity(axiom in any::<String>()) {
        let grammar = Grammar::new(axiom.clone()).with_rule('F', "FF");
        prop_assert_eq!(rewrite(&grammar, 0, &mut SequenceSource::default()).unwrap(), axiom);
    }

    /// Balanced input leaves no open branches and draws one segment per letter.
    #[test]
    fn prop_balanced_brackets_close(depth in 0usize..20, angle in 1.0f32..90.0) {
        let symbols = format!("{}F{}", "[+F".repeat(depth), "]".repeat(depth));
        let interpreter = PlanarInterpreter::new(PlanarConfig { angle, ..Default::default() });
        let path = interpreter.interpret(&symbols).unwrap();
        prop_assert_eq!(path.open_branches, 0);
        prop_assert_eq!(path.len(), depth + 1);
        prop_assert_eq!(path.final_turtle.position, glam::Vec2::ZERO);
        prop_assert_eq!(path.final_turtle.heading, 90.0);
    }
}
