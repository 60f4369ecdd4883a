use fractal_turtle::{
    Color, LSystemError, Preset2d, PresetCatalog, RewriteOptions, RngSource, SequenceSource,
    rewrite,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_builtin_catalog_names() {
    let catalog = PresetCatalog::builtin();
    assert_eq!(catalog.names_2d().collect::<Vec<_>>(), vec!["gosper", "seaweed"]);
    assert_eq!(catalog.names_3d().collect::<Vec<_>>(), vec!["bush"]);
    assert!(catalog.get_2d("dragon").is_none());
}

#[test]
fn test_gosper_draws_every_letter() {
    let preset = PresetCatalog::builtin().get_2d("gosper").unwrap().clone();
    let mut rng = SequenceSource::default();
    let symbols = rewrite(&preset.grammar(), preset.iterations, &mut rng).unwrap();
    let letters = symbols.chars().filter(|c| c.is_alphabetic()).count();

    let drawing = preset.render(&mut rng).unwrap();
    assert_eq!(drawing.segments.len(), letters);
    assert_eq!(letters, 2401, "7^4 letters after four rounds");
    assert_eq!(drawing.segments[0].color, Color::new(255, 0, 0));
    assert!(drawing.bounds().is_some());
}

#[test]
fn test_seaweed_segment_chain_starts_at_origin() {
    let preset = PresetCatalog::builtin().get_2d("seaweed").unwrap().clone();
    let mut rng = SequenceSource::default();
    let drawing = preset.render(&mut rng).unwrap();
    assert_eq!(drawing.segments.len(), 8usize.pow(4));
    assert_eq!(drawing.segments[0].segment.start, glam::Vec2::ZERO);
}

#[test]
fn test_symbol_palette_from_json() {
    let json = r##"{
        "axiom": "X",
        "rules": { "X": "F[+X]F[-X]+X", "F": "FF" },
        "iterations": 2,
        "angle": 20,
        "step": 1,
        "colors": { "F": "#00ff00" }
    }"##;
    let preset: Preset2d = serde_json::from_str(json).unwrap();
    assert_eq!(preset.starting_rotation, 90.0);
    assert!(!preset.spectrum);

    let mut rng = SequenceSource::default();
    let symbols = rewrite(&preset.grammar(), 2, &mut rng).unwrap();
    let drawing = preset.render(&mut rng).unwrap();

    let green = Color::new(0, 255, 0);
    let white = Color::new(255, 255, 255);
    let greens = drawing.segments.iter().filter(|s| s.color == green).count();
    let whites = drawing.segments.iter().filter(|s| s.color == white).count();
    assert_eq!(greens, symbols.chars().filter(|&c| c == 'F').count());
    assert_eq!(whites, symbols.chars().filter(|&c| c == 'X').count());
}

#[test]
fn test_spectrum_flag_wins_over_palette() {
    let mut preset = PresetCatalog::builtin().get_2d("seaweed").unwrap().clone();
    preset.iterations = 1;
    preset.colors = Some([('F', "white".to_string())].into());
    let mut rng = SequenceSource::default();
    let drawing = preset.render(&mut rng).unwrap();
    assert_eq!(drawing.segments[0].color, Color::new(255, 0, 0));
}

#[test]
fn test_bad_color_fails_before_rewriting() {
    let mut preset = PresetCatalog::builtin().get_2d("seaweed").unwrap().clone();
    preset.spectrum = false;
    preset.colors = Some([('F', "chartreuse-ish".to_string())].into());
    preset.iterations = 50;
    let mut rng = SequenceSource::default();
    assert!(matches!(
        preset.render(&mut rng),
        Err(LSystemError::UnknownColor { .. })
    ));
}

#[test]
fn test_render_respects_length_ceiling() {
    let preset = PresetCatalog::builtin().get_2d("seaweed").unwrap().clone();
    let mut rng = SequenceSource::default();
    let options = RewriteOptions {
        max_length: Some(1_000),
    };
    assert!(matches!(
        preset.render_with(&mut rng, &options),
        Err(LSystemError::ExpansionLimit { .. })
    ));
}

#[test]
fn test_bush_is_reproducible_per_seed() {
    let preset = PresetCatalog::builtin().get_3d("bush").unwrap().clone();
    let a = preset
        .render(&mut RngSource(StdRng::seed_from_u64(3)))
        .unwrap();
    let b = preset
        .render(&mut RngSource(StdRng::seed_from_u64(3)))
        .unwrap();
    assert_eq!(a, b);

    assert!(!a.segments.is_empty());
    assert!(a.segments.iter().any(|s| s.leaf_tip));
    assert!(a.max_depth >= 1);
    assert!(a.view_cube().is_some());

    let (main, point) = preset.colors().unwrap();
    assert!(
        a.segments
            .iter()
            .all(|s| s.main_color == main && s.point_color == point)
    );

    let trunk = a.line_width(0).unwrap();
    assert_eq!(trunk, 1.5 + a.max_depth as f32 * 0.5);
    assert!(a.line_width(a.segments.len()).is_none());
}

#[test]
fn test_catalog_from_json() {
    let json = r##"{
        "2d": {
            "koch": { "axiom": "F", "rules": { "F": "F+F--F+F" }, "iterations": 2, "angle": 60, "step": 1 }
        },
        "3d": {
            "stalk": {
                "axiom": "F", "rules": { "F": [["F[&F]", 0.5], ["F[^F]", 0.5]] },
                "iterations": 3, "angle": 30, "step": 1,
                "main_color": "saddlebrown", "point_color": "#00ff00", "points": true
            }
        }
    }"##;
    let catalog = PresetCatalog::from_json(json).unwrap();
    let koch = catalog.get_2d("koch").unwrap();
    let mut rng = SequenceSource::default();
    assert_eq!(koch.render(&mut rng).unwrap().segments.len(), 16);

    let stalk = catalog.get_3d("stalk").unwrap();
    let drawing = stalk.render(&mut SequenceSource::constant(0.2)).unwrap();
    // Every F takes the first option: F -> F[&F], doubling each round.
    assert_eq!(drawing.segments.len(), 8);
}

#[test]
fn test_malformed_catalog() {
    assert!(matches!(
        PresetCatalog::from_json(r#"{"2d": {"bad": {"axiom": 3}}}"#),
        Err(LSystemError::Preset(_))
    ));
}

#[test]
fn test_catalog_insert_overrides() {
    let mut catalog = PresetCatalog::default();
    let mut seaweed = PresetCatalog::builtin().get_2d("seaweed").unwrap().clone();
    catalog.insert_2d("weed", seaweed.clone());
    seaweed.iterations = 1;
    catalog.insert_2d("weed", seaweed);
    assert_eq!(catalog.get_2d("weed").unwrap().iterations, 1);
}
