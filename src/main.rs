use anyhow::anyhow;
use beach_sand::gui::BeachApp;
use beach_sand::logging;
use beach_sand::settings::Settings;
use eframe::egui;

const SETTINGS_PATH: &str = "settings.json";

fn main() -> anyhow::Result<()> {
    let mut settings = Settings::load(SETTINGS_PATH)?;
    logging::init(settings.debug_logging);
    settings.sanitize();
    tracing::info!(
        color = %settings.stroke_color,
        width = settings.line_width,
        "starting beach sand"
    );

    let (width, height) = settings.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Beach Sand")
            .with_inner_size([width, height]),
        ..Default::default()
    };

    eframe::run_native(
        "Beach Sand",
        native_options,
        Box::new(move |_cc| Box::new(BeachApp::new(&settings))),
    )
    .map_err(|err| anyhow!("run beach sand window: {err}"))
}
