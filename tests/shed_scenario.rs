use rand::SeedableRng;
use rand::rngs::StdRng;

use shed_viewer::scene::{ShedScene, TextureSettings};
use shed_viewer::texture::TEXTURE_SIZE;
use shed_viewer::{CorrugationParams, ShedParameters, Texture, build};

#[test]
fn reference_shed_numbers() {
    let model = build(&ShedParameters::new(40.0, 24.0, 10.0, 4.0));

    assert!((model.roof_angle.0.to_degrees() - 18.43).abs() < 0.01);
    assert!((model.ridge_rise - 4.0).abs() < 1e-3);
    assert!((model.roof_y - 12.0).abs() < 1e-3);
    assert!((model.panel_width - 12.65).abs() < 0.01);
    assert_eq!(model.roof_length, 44.0);
}

#[test]
fn clamping_examples() {
    for (input, expected) in [(5.0, 10.0), (200.0, 150.0), (12.0, 12.0)] {
        assert_eq!(ShedParameters::new(input, 24.0, 10.0, 4.0).length(), expected);
    }
    for (input, expected) in [(5.0, 10.0), (200.0, 100.0), (12.0, 12.0)] {
        assert_eq!(ShedParameters::new(40.0, input, 10.0, 4.0).width(), expected);
    }
    for (input, expected) in [(5.0, 8.0), (200.0, 80.0), (12.0, 12.0)] {
        assert_eq!(ShedParameters::new(40.0, 24.0, input, 4.0).height(), expected);
    }
    for (input, expected) in [(-5.0, 0.0), (200.0, 12.0), (12.0, 12.0)] {
        assert_eq!(ShedParameters::new(40.0, 24.0, 10.0, input).pitch(), expected);
    }
}

#[test]
fn texture_only_grain_differs_between_generations() {
    let params = CorrugationParams::roof();
    let mut rng = StdRng::seed_from_u64(11);
    let a = Texture::corrugated(&params, &mut rng);
    let b = Texture::corrugated(&params, &mut rng);
    let pattern = Texture::corrugated_pattern(&params);

    assert_eq!((a.width, a.height), (TEXTURE_SIZE, TEXTURE_SIZE));
    assert_ne!(a.data, b.data);
    for ((pa, pb), base) in a.data.iter().zip(&b.data).zip(&pattern.data) {
        let base = base.to_be_bytes();
        for px in [pa.to_be_bytes(), pb.to_be_bytes()] {
            assert_eq!(px[3], 255);
            for c in 0..3 {
                assert!((px[c] as i32 - base[c] as i32).abs() <= 5);
            }
        }
    }
}

#[test]
fn scene_follows_parameter_changes() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut scene = ShedScene::new(TextureSettings::default(), &mut rng);

    let mut params = ShedParameters::default();
    scene.rebuild(&params, &mut rng);
    let first_roof = scene.roof_texture().data.clone();

    params.set(shed_viewer::params::ShedField::Pitch, 0.0);
    let model = scene.rebuild(&params, &mut rng).clone();
    assert_eq!(model.roof_angle.0, 0.0);
    assert_eq!(model.ridge_rise, 0.0);
    assert_ne!(scene.roof_texture().data, first_roof);
    assert_eq!(scene.objects().len(), model.shapes().len());
}

#[test]
fn bundled_config_parses() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("configs/default.json");
    let config = shed_viewer::config::parse_json(&path).unwrap();
    assert_eq!(config.window.supersample(), 2);
    assert_eq!(config.background_color(), 0xFFA9C8E6);
    assert_eq!(ShedParameters::from(config.shed), ShedParameters::default());
    assert!(config.shader_kind().is_ok());
}
