//! Domain modules split by discipline.
//! - `controls`: touch sampling, menu navigation, keyboard toggles, camera.
//! - `presentation`: menus, HUD, and overlays.
//! - `simulation`: scenes, the drift model, and the vehicle body it drives.

pub mod controls;
pub mod presentation;
pub mod simulation;

pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use simulation::SimPlugin;
