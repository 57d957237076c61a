//! Local front panel: 16×2 LCD, three push buttons and a status LED.

pub mod local;
pub mod menu;

pub use local::LocalInterface;
pub use menu::Menu;
