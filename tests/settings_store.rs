use beach_sand::sand::model::{Color, LineJoin};
use beach_sand::settings::Settings;

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.json");
    let settings = Settings::load(&path.to_string_lossy()).expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn empty_file_loads_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "  \n").expect("write empty file");
    let settings = Settings::load(&path.to_string_lossy()).expect("load settings");
    assert_eq!(settings, Settings::default());
}

#[test]
fn save_then_load_preserves_values() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.json");
    let path = path.to_string_lossy();

    let settings = Settings {
        stroke_color: "#336699".into(),
        line_width: 4.0,
        line_join: LineJoin::Bevel,
        surface_height_ratio: 0.25,
        window_size: (640.0, 480.0),
        debug_logging: true,
    };
    settings.save(&path).expect("save settings");

    let loaded = Settings::load(&path).expect("load settings");
    assert_eq!(loaded, settings);
    assert_eq!(loaded.stroke_style().color, Color::rgb(0x33, 0x66, 0x99));
}

#[test]
fn malformed_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{ not json").expect("write file");

    let err = Settings::load(&path.to_string_lossy()).expect_err("malformed settings");
    assert!(format!("{err:#}").contains("settings.json"));
}
