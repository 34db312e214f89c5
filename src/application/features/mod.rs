//! Peripheral enhancements.
//!
//! Each feature is independent of the navigation core and of each other.
//! Settings are compiled from configuration up front so a bad selector is
//! reported when the enhancer is built, never while the page is running.

pub mod active_menu;
pub mod anchors;
pub mod forms;
pub mod hover;
pub mod images;
pub mod logo;
pub mod scroll_reveal;
pub mod spacing;
