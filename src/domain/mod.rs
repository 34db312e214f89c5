//! Domain layer - pure logic with no DOM or timer dependencies.
//!
//! This layer contains the core decisions of the enhancement layer:
//! - Element handles and event data
//! - Selector parsing and matching
//! - The navigation disclosure transition table
//! - Focus boundaries and Tab wrapping
//! - Debounce and throttle policies
//! - Path comparison for anchors and active links
//!
//! All types in this layer are pure and easily testable.

pub mod disclosure;
pub mod event;
pub mod feature;
pub mod focus;
pub mod path;
pub mod rate_limit;
pub mod selector;
