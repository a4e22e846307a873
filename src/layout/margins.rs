/// Margins are used when laying out text inside a [`Zone`](crate::Zone). Nothing stops
/// drawing from spilling past them; layout functions use them to derive the content
/// area via [`Zone::inset`](crate::Zone::inset)
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Margins {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Margins {
    /// Create margins where all values are equal
    pub fn all(value: i32) -> Margins {
        Margins {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Total horizontal space taken by the margins
    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Total vertical space taken by the margins
    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}
