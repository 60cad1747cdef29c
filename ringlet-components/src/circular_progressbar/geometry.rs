//! Ring geometry in the 100x100 view box.

use std::fmt;

use lyon_path::{
    Path,
    builder::SvgPathBuilder,
    geom::ArcFlags,
    math::{Angle, point, vector},
};
use ringlet_ui::format_number;

/// Side length of the square view box.
pub const VIEW_BOX_SIZE: f64 = 100.0;

/// Center coordinate on both axes.
pub const CENTER: f64 = VIEW_BOX_SIZE / 2.0;

/// Radius of the ring's center line.
///
/// The stroke is centered on the path, so half the stroke width is subtracted
/// to keep the whole stroke inside the view box. The result is not validated:
/// a stroke width of 100 or more, or a large gutter, yields a non-positive
/// radius and degenerate geometry.
///
/// A negative radius still prints as well-formed path data: each offset is
/// written as a single signed number, so `-r` for `r = -10` becomes `10`
/// rather than `--10`.
pub fn path_radius(stroke_width: f64, background_gutter: f64) -> f64 {
    CENTER - stroke_width / 2.0 - background_gutter
}

/// One command of a ring path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Absolute move (`M x,y`).
    MoveTo { x: f64, y: f64 },
    /// Relative move (`m dx,dy`).
    RelativeMoveTo { dx: f64, dy: f64 },
    /// Relative elliptical arc (`a rx,ry rotation large-arc sweep dx,dy`).
    RelativeArcTo {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        dx: f64,
        dy: f64,
    },
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathCommand::MoveTo { x, y } => {
                write!(f, "M {},{}", format_number(x), format_number(y))
            }
            PathCommand::RelativeMoveTo { dx, dy } => {
                write!(f, "m {},{}", format_number(dx), format_number(dy))
            }
            PathCommand::RelativeArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                dx,
                dy,
            } => write!(
                f,
                "a {},{} {} {} {} {},{}",
                format_number(rx),
                format_number(ry),
                format_number(x_axis_rotation),
                u8::from(large_arc),
                u8::from(sweep),
                format_number(dx),
                format_number(dy)
            ),
        }
    }
}

/// A full circle centered in the view box, drawn as two opposing half arcs
/// starting at 12 o'clock and running clockwise.
///
/// `Display` yields the SVG path data:
///
/// ```
/// use ringlet_components::circular_progressbar::RingPath;
///
/// assert_eq!(
///     RingPath::new(46.0).to_string(),
///     "M 50,50 m 0,-46 a 46,46 0 1 1 0,92 a 46,46 0 1 1 0,-92",
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RingPath {
    radius: f64,
    commands: [PathCommand; 4],
}

impl RingPath {
    pub fn new(radius: f64) -> Self {
        let half_arc = |dy: f64| PathCommand::RelativeArcTo {
            rx: radius,
            ry: radius,
            x_axis_rotation: 0.0,
            large_arc: true,
            sweep: true,
            dx: 0.0,
            dy,
        };
        Self {
            radius,
            commands: [
                PathCommand::MoveTo {
                    x: CENTER,
                    y: CENTER,
                },
                PathCommand::RelativeMoveTo {
                    dx: 0.0,
                    dy: -radius,
                },
                half_arc(2.0 * radius),
                half_arc(-2.0 * radius),
            ],
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Length of the ring's center line.
    pub fn circumference(&self) -> f64 {
        std::f64::consts::PI * 2.0 * self.radius
    }

    /// Replays the commands through lyon's SVG builder, for renderers that
    /// tessellate geometry instead of consuming path strings.
    pub fn to_lyon_path(&self) -> Path {
        let mut builder = Path::builder().with_svg();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { x, y } => {
                    builder.move_to(point(x as f32, y as f32));
                }
                PathCommand::RelativeMoveTo { dx, dy } => {
                    builder.relative_move_to(vector(dx as f32, dy as f32));
                }
                PathCommand::RelativeArcTo {
                    rx,
                    ry,
                    x_axis_rotation,
                    large_arc,
                    sweep,
                    dx,
                    dy,
                } => {
                    builder.relative_arc_to(
                        vector(rx as f32, ry as f32),
                        Angle::degrees(x_axis_rotation as f32),
                        ArcFlags { large_arc, sweep },
                        vector(dx as f32, dy as f32),
                    );
                }
            }
        }
        builder.build()
    }
}

impl fmt::Display for RingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, command) in self.commands.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}
