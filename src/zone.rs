use serde::{Deserialize, Serialize};

use crate::layout::Margins;

/// A rectangular region of the output image, in pixels. `x` and `y` are the top-left
/// corner; `max_height` is how far down content may extend. Date blocks are
/// configured with `height`, which is accepted as an alias.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    #[serde(alias = "height")]
    pub max_height: i32,
}

impl Zone {
    pub fn new(x: i32, y: i32, width: i32, max_height: i32) -> Zone {
        Zone {
            x,
            y,
            width,
            max_height,
        }
    }

    /// The area left for content once the margins are taken off each side. Dimensions
    /// may go negative for zones smaller than their margins; callers treat that as
    /// "nothing fits"
    pub fn inset(&self, margins: &Margins) -> Zone {
        Zone {
            x: self.x + margins.left,
            y: self.y + margins.top,
            width: self.width - margins.horizontal(),
            max_height: self.max_height - margins.vertical(),
        }
    }

    /// Top-left corner for an object of the given size centred in this zone
    pub fn centre(&self, width: i32, height: i32) -> (i32, i32) {
        (
            self.x + (self.width - width).div_euclid(2),
            self.y + (self.max_height - height).div_euclid(2),
        )
    }

    /// First row below the zone
    pub fn bottom(&self) -> i32 {
        self.y + self.max_height
    }
}
