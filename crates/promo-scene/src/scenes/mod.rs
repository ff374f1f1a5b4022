//! The six timed scenes of the promo video.
//!
//! Each scene has a pure `styles(frame, fps)` function producing its animated
//! parameters, and a [`Component`](crate::composition::Component) impl that
//! lays those parameters out as markup. `frame` is always local to the scene.

mod cta;
mod dashboard;
mod hook;
mod mobile;
mod pain_points;
mod solution;

pub use cta::{CtaScene, CtaStyle, REPOSITORY};
pub use dashboard::{Callout, CalloutStyle, DashboardScene, DashboardStyle, CALLOUTS};
pub use hook::{HookScene, HookStyle};
pub use mobile::{MobileScene, MobileStyle};
pub use pain_points::{PainPoint, PainPointStyle, PainPointsScene, PainPointsStyle, PAIN_POINTS};
pub use solution::{SolutionScene, SolutionStyle};

use crate::markup::Element;
use crate::theme;

/// Full-frame dark backdrop with centered content.
fn centered_backdrop() -> Element {
    Element::absolute_fill()
        .style("background-color", theme::BG0.to_css())
        .style("justify-content", "center")
        .style("align-items", "center")
}
