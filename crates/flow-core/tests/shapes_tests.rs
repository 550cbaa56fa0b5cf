// Host-side tests for the shape samplers and the pixel-text layout.
// Sampling is stochastic, so shape properties are checked statistically.

use flow_core::glyphs::{glyph, layout_text};
use flow_core::{sample, sample_with, FlowError, Shape};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn all_shapes() -> Vec<Shape> {
    let mut shapes = Shape::SELECTABLE.to_vec();
    shapes.push(Shape::Text("HELLO".to_string()));
    shapes.push(Shape::Text("?".to_string()));
    shapes.push(Shape::Text(String::new()));
    shapes
}

#[test]
fn every_shape_returns_exact_count_of_finite_points() {
    let mut rng = StdRng::seed_from_u64(1);
    for shape in all_shapes() {
        for &n in &[1usize, 7, 1000] {
            let pts = sample_with(&shape, n, &mut rng);
            assert_eq!(pts.len(), n, "{shape} returned wrong count");
            for p in &pts {
                assert!(p.is_finite(), "{shape} produced non-finite point {p:?}");
            }
        }
    }
}

#[test]
fn zero_count_is_empty() {
    assert!(sample(&Shape::Heart, 0).is_empty());
}

#[test]
fn saturn_sphere_fraction_matches_mixture_weight() {
    let mut rng = StdRng::seed_from_u64(2);
    let n = 20_000;
    let pts = sample_with(&Shape::Saturn, n, &mut rng);
    let inner = pts.iter().filter(|p| p.length() < 1.6).count() as f32 / n as f32;
    assert!((inner - 0.7).abs() < 0.02, "sphere fraction {inner}");
}

#[test]
fn saturn_ring_points_stay_in_annulus() {
    let mut rng = StdRng::seed_from_u64(3);
    let pts = sample_with(&Shape::Saturn, 5000, &mut rng);
    for p in pts.iter().filter(|p| p.length() >= 1.6) {
        let r = p.length();
        assert!((2.19..3.21).contains(&r), "ring point at radius {r}");
    }
}

#[test]
fn saturn_ring_is_tilted_off_the_equator() {
    let mut rng = StdRng::seed_from_u64(4);
    let pts = sample_with(&Shape::Saturn, 10_000, &mut rng);
    let max_ring_y = pts
        .iter()
        .filter(|p| p.length() >= 1.6)
        .map(|p| p.y.abs())
        .fold(0.0f32, f32::max);
    // A flat ring would stay within its 0.05 thickness.
    assert!(max_ring_y > 1.0, "ring not tilted, max |y| = {max_ring_y}");
}

#[test]
fn saturn_sphere_is_uniform_not_pole_clustered() {
    let mut rng = StdRng::seed_from_u64(5);
    let pts = sample_with(&Shape::Saturn, 20_000, &mut rng);
    let sphere: Vec<Vec3> = pts.into_iter().filter(|p| p.length() < 1.6).collect();
    let mean_z2 = sphere.iter().map(|p| p.z * p.z).sum::<f32>() / sphere.len() as f32;
    // Uniform on a sphere of radius r: E[z^2] = r^2 / 3.
    assert!((mean_z2 - 0.75).abs() < 0.05, "E[z^2] = {mean_z2}");
}

#[test]
fn fireworks_is_denser_toward_center_than_uniform_volume() {
    let mut rng = StdRng::seed_from_u64(6);
    let n = 5000;
    let pts = sample_with(&Shape::Fireworks, n, &mut rng);
    let mean_r2 = pts.iter().map(|p| p.length_squared()).sum::<f32>() / n as f32;
    let uniform_volume = 3.0 / 5.0 * 16.0;
    assert!(mean_r2 < uniform_volume * 0.8, "E[r^2] = {mean_r2}");
    assert!((mean_r2 - 16.0 / 3.0).abs() < 0.3, "E[r^2] = {mean_r2}");
    assert!(pts.iter().all(|p| p.length() <= 4.0 + 1e-4));
}

#[test]
fn heart_and_flower_stay_in_their_envelopes() {
    let mut rng = StdRng::seed_from_u64(7);
    for p in sample_with(&Shape::Heart, 4000, &mut rng) {
        assert!(p.x.abs() <= 1.7 && p.y.abs() <= 1.8, "heart point {p:?}");
        assert!(p.z.abs() <= 1.1, "heart depth {p:?}");
    }
    for p in sample_with(&Shape::Flower, 4000, &mut rng) {
        assert!(p.x.abs() <= 2.0 + 1e-4 && p.y.abs() <= 2.0 + 1e-4, "flower point {p:?}");
        assert!(p.z.abs() <= 1.0 + 1e-4, "flower depth {p:?}");
    }
}

#[test]
fn buddha_stays_in_its_bounding_box() {
    let mut rng = StdRng::seed_from_u64(8);
    for p in sample_with(&Shape::Buddha, 4000, &mut rng) {
        assert!(p.x.abs() <= 1.6 + 1e-4, "buddha point {p:?}");
        assert!(p.y >= -1.4 - 1e-4 && p.y <= 2.4 + 1e-4, "buddha point {p:?}");
    }
}

#[test]
fn question_mark_text_is_not_degenerate() {
    let mut rng = StdRng::seed_from_u64(9);
    let pts = sample_with(&Shape::Text("?".to_string()), 500, &mut rng);
    assert!(pts.iter().any(|p| p.truncate().length() > 0.1));
    assert!(pts.iter().all(|p| p.z.abs() <= 0.1 + 1e-6));
}

#[test]
fn blank_or_unknown_text_collapses_to_origin() {
    let mut rng = StdRng::seed_from_u64(10);
    for text in ["", "   ", "~~", "\u{263A}"] {
        let pts = sample_with(&Shape::Text(text.to_string()), 64, &mut rng);
        assert_eq!(pts.len(), 64);
        assert!(
            pts.iter().all(|p| *p == Vec3::ZERO),
            "text {text:?} should degenerate to the origin"
        );
    }
}

#[test]
fn text_points_land_on_lit_cells() {
    let mut rng = StdRng::seed_from_u64(11);
    let cells = layout_text("HI!");
    for p in sample_with(&Shape::Text("HI!".to_string()), 300, &mut rng) {
        assert!(
            cells.iter().any(|c| (*c - p.truncate()).length() < 1e-5),
            "point {p:?} is not on a lit cell"
        );
    }
}

#[test]
fn text_layout_is_case_insensitive_and_centered() {
    assert_eq!(layout_text("hello"), layout_text("HELLO"));

    // H is symmetric in both axes, so its lit cells center exactly.
    let cells = layout_text("H");
    let min = cells.iter().fold(glam::Vec2::splat(f32::MAX), |a, c| a.min(*c));
    let max = cells.iter().fold(glam::Vec2::splat(f32::MIN), |a, c| a.max(*c));
    assert!((min + max).length() < 1e-5, "bbox {min:?}..{max:?} not centered");
}

#[test]
fn glyph_table_covers_letters_digits_and_punctuation() {
    for c in ('A'..='Z').chain('0'..='9').chain([' ', '?', '!']) {
        assert!(glyph(c).is_some(), "missing glyph for {c:?}");
    }
    assert!(glyph('a').is_none(), "lookup expects upper-cased input");
    for c in ('A'..='Z').chain('0'..='9') {
        assert!(
            glyph(c).map(|g| g.iter().any(|row| *row != 0)).unwrap_or(false),
            "glyph {c:?} is blank"
        );
    }
}

#[test]
fn shape_names_parse() {
    for shape in Shape::SELECTABLE {
        assert_eq!(shape.name().parse::<Shape>(), Ok(shape.clone()));
    }
    assert_eq!("Saturn".parse::<Shape>(), Ok(Shape::Saturn));
    assert_eq!(
        "text:Hi".parse::<Shape>(),
        Ok(Shape::Text("Hi".to_string()))
    );
    assert_eq!(
        "cube".parse::<Shape>(),
        Err(FlowError::UnknownShape("cube".to_string()))
    );
    assert_eq!(Shape::default(), Shape::Fireworks);
}

#[test]
fn surrounding_whitespace_is_ignored_for_every_name() {
    assert_eq!(" heart ".parse::<Shape>(), Ok(Shape::Heart));
    assert_eq!(
        " text:HI\n".parse::<Shape>(),
        Ok(Shape::Text("HI".to_string()))
    );
    assert_eq!(
        "\ttext:A B ".parse::<Shape>(),
        Ok(Shape::Text("A B".to_string()))
    );
}
