pub mod autopilot;
pub mod headless;

pub use autopilot::{AutopilotMode, AutopilotOptions, Speed};
pub use headless::{HeadlessMode, HeadlessReport};
