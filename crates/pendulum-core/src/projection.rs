//! Angle Projection
//!
//! Converts body angles to installation-plane coordinates. Renderers and
//! the crossing tracker both consume these positions; the simulation itself
//! never depends on them.

use crate::double::DoublePendulum;

/// Projects both bodies of a double pendulum to plane coordinates.
///
/// `origin` is the suspension point; `scale` converts unit arm lengths to
/// plane units. Positions are cumulative: the outer arm hangs from the
/// inner arm's bob. The y-axis points downward, matching screen space.
pub fn project_bodies(origin: (f64, f64), scale: f64, pendulum: &DoublePendulum) -> [(f64, f64); 2] {
    let (mut x, mut y) = origin;
    let mut coords = [(0.0, 0.0); 2];
    for (i, body) in pendulum.bodies().iter().enumerate() {
        x += body.length * scale * body.angle.sin();
        y += body.length * scale * body.angle.cos();
        coords[i] = (x, y);
    }
    coords
}
