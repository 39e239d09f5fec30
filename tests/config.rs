use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use treasure_map::config::MapConfig;
use treasure_map::{export, Error, MapSize, Pixel, Position};

/// Temporary directory holding a 200x100 background and two icons.
fn map_dir() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    std::fs::create_dir_all(dir.join("icons")).unwrap();

    RgbImage::from_pixel(200, 100, Rgb([90, 120, 60]))
        .save(dir.join("valley.png"))
        .unwrap();
    RgbaImage::from_pixel(16, 16, Rgba([180, 140, 40, 255]))
        .save(dir.join("icons/brass.png"))
        .unwrap();
    RgbaImage::from_pixel(16, 16, Rgba([200, 200, 210, 255]))
        .save(dir.join("icons/aluminium.png"))
        .unwrap();

    tmp
}

fn write_config(dir: &Path, icon_image: &str) -> PathBuf {
    write_config_with_scale(dir, icon_image, 0.5)
}

fn write_config_with_scale(dir: &Path, icon_image: &str, scale: f64) -> PathBuf {
    let path = dir.join("treasure_map.toml");
    std::fs::write(
        &path,
        format!(
            r#"
            background = "valley.png"
            scale = {scale}
            output_dir = "exports"
            treasure_position = [0.6, 0.6]
            initial_player_position = [0.25, 0.5]
            icon_scale = 0.2

            [player_icon]
            image = "icons/aluminium.png"

            [[icons]]
            name = "brass"
            true_position = [0.5, 0.2]
            image = "{icon_image}"
            radius = {{ kind = "constant", fraction = 0.1 }}
            angle = {{ kind = "linear", y = -3.0 }}
            show_true_position = true
            "#
        ),
    )
    .unwrap();
    path
}

#[test]
fn builds_and_renders_a_map_from_disk() {
    let tmp = map_dir();
    let dir = tmp.path();
    let config = MapConfig::load(&write_config(dir, "icons/brass.png")).unwrap();
    let map = config.build().unwrap();

    let size = MapSize::new(100, 50);
    assert_eq!(size, map.size());
    assert_eq!((100, 50), map.background().dimensions());
    assert_eq!(Pixel::new(25, 25), config.initial_player_position(size));

    let icon = &map.icons()[0];
    assert_eq!("brass", icon.name());
    assert_eq!((10, 10), icon.icon().size());
    assert_eq!(Some(dir.join("icons/brass.png").as_path()), icon.icon().image_path());
    assert!(icon.show_true_position());
    assert_eq!(Pixel::new(50, 10), icon.true_position());

    let treasure = Position::normalized(0.6, 0.6).to_absolute(size);
    assert_eq!(icon.true_position(), icon.location(treasure).unwrap());

    let frame = map.render(Pixel::new(25, 25), true).unwrap();
    assert_eq!((100, 50), frame.dimensions());
    // Corner of the true position marker not covered by the live icon,
    // drawn in negative colors.
    assert_eq!(Rgb([75, 115, 215]), *frame.get_pixel(48, 9));
}

#[test]
fn exports_go_to_the_configured_directory() {
    let tmp = map_dir();
    let dir = tmp.path();
    let config = MapConfig::load(&write_config(dir, "icons/brass.png")).unwrap();
    let map = config.build().unwrap();

    let frame = map.render(config.initial_player_position(map.size()), false).unwrap();
    let path = export::save_frame(&frame, &config.output_dir).unwrap();
    assert_eq!(dir.join("exports").join("out.png"), path);
}

#[test]
fn missing_icon_image_is_reported() {
    let tmp = map_dir();
    let dir = tmp.path();
    let config = MapConfig::load(&write_config(dir, "icons/tin.png")).unwrap();

    match config.build() {
        Err(Error::LoadImage { path, .. }) => assert_eq!(dir.join("icons/tin.png"), path),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("map built without its icon"),
    }
}

#[test]
fn scale_that_empties_the_map_is_rejected() {
    let tmp = map_dir();
    let config = MapConfig::load(&write_config_with_scale(tmp.path(), "icons/brass.png", 0.005)).unwrap();

    // 200x100 at 0.005 is 1x0.
    assert!(config.validate().is_ok());
    assert!(matches!(config.build(), Err(Error::InvalidConfig(_))));
}
