//! Navigation behavior of the portfolio page: the mobile menu, anchor links,
//! scroll-driven highlighting of the current section and the back-to-top
//! button, plus the viewport helpers they share.

mod back_to_top;
mod controller;
mod highlight;
mod throttle;
mod viewport;

pub use back_to_top::*;
pub use controller::*;
pub use highlight::*;
pub use throttle::*;
pub use viewport::*;
