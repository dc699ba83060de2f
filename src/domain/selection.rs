//! Resize handles of a selected box

/// Grip handle on a bounding box, named by compass direction
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grip {
    /// North-West corner
    NW,
    /// North edge
    N,
    /// North-East corner
    NE,
    /// East edge
    E,
    /// South-East corner
    SE,
    /// South edge
    S,
    /// South-West corner
    SW,
    /// West edge
    W,
}

impl Grip {
    /// Every grip, corners first so they win hit tests over edges
    pub const ALL: [Grip; 8] = [
        Grip::NW,
        Grip::NE,
        Grip::SE,
        Grip::SW,
        Grip::N,
        Grip::E,
        Grip::S,
        Grip::W,
    ];

    pub fn moves_left(self) -> bool {
        matches!(self, Grip::NW | Grip::W | Grip::SW)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Grip::NE | Grip::E | Grip::SE)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Grip::NW | Grip::N | Grip::NE)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Grip::SW | Grip::S | Grip::SE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_grip_moves_something() {
        for grip in Grip::ALL {
            let horizontal = grip.moves_left() || grip.moves_right();
            let vertical = grip.moves_top() || grip.moves_bottom();
            assert!(horizontal || vertical, "{grip:?}");
        }
    }

    #[test]
    fn test_corners_come_first() {
        for grip in &Grip::ALL[..4] {
            let horizontal = grip.moves_left() || grip.moves_right();
            let vertical = grip.moves_top() || grip.moves_bottom();
            assert!(horizontal && vertical, "{grip:?}");
        }
    }

    #[test]
    fn test_opposite_edges_are_exclusive() {
        for grip in Grip::ALL {
            assert!(!(grip.moves_left() && grip.moves_right()));
            assert!(!(grip.moves_top() && grip.moves_bottom()));
        }
    }
}
