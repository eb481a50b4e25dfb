pub mod gui;
pub mod logging;
pub mod sand;
pub mod settings;
