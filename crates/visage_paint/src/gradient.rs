//! Gradient fills

use crate::color::Color;
use crate::point::Point;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// A gradient stop
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32, // 0.0 to 1.0
    pub color: Color,
}

/// Linear gradient in normalized surface coordinates
///
/// Background layers of the capture surface are always described this way,
/// a single color being a gradient whose stops share one color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub start: Point,
    pub end: Point,
    pub stops: SmallVec<[GradientStop; 2]>,
}

impl Gradient {
    /// Create a simple linear gradient between two colors
    pub fn linear_simple(start: Point, end: Point, from: Color, to: Color) -> Self {
        Gradient {
            start,
            end,
            stops: smallvec![
                GradientStop {
                    offset: 0.0,
                    color: from,
                },
                GradientStop {
                    offset: 1.0,
                    color: to,
                },
            ],
        }
    }

    /// Left-to-right gradient: start (0,0), end (1,0), stops at 0 and 1
    pub fn horizontal(from: Color, to: Color) -> Self {
        Self::linear_simple(Point::new(0.0, 0.0), Point::new(1.0, 0.0), from, to)
    }

    /// Flat fill expressed as a two-stop gradient
    pub fn solid(color: Color) -> Self {
        Self::horizontal(color, color)
    }

    /// Color of the first stop, used where the target only takes a flat color
    pub fn first_color(&self) -> Option<Color> {
        self.stops.first().map(|stop| stop.color)
    }

    pub fn is_solid(&self) -> bool {
        self.stops.windows(2).all(|pair| pair[0].color == pair[1].color)
    }
}
