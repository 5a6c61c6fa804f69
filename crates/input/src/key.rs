/// A logical key the frame loop cares about.
///
/// Backends map physical keys onto these; the loop never sees raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    /// Ends the frame loop at the top of the next iteration.
    Exit,
}

impl Key {
    /// Every logical key, in declaration order.
    pub const ALL: [Key; 7] = [
        Key::Forward,
        Key::Back,
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Exit,
    ];

    /// The key driving the opposite direction on the same axis.
    pub fn opposite(self) -> Option<Key> {
        match self {
            Key::Forward => Some(Key::Back),
            Key::Back => Some(Key::Forward),
            Key::Left => Some(Key::Right),
            Key::Right => Some(Key::Left),
            Key::Up => Some(Key::Down),
            Key::Down => Some(Key::Up),
            Key::Exit => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposites_are_symmetric() {
        for key in Key::ALL {
            if let Some(other) = key.opposite() {
                assert_eq!(other.opposite(), Some(key));
            }
        }
    }

    #[test]
    fn exit_has_no_opposite() {
        assert_eq!(Key::Exit.opposite(), None);
    }
}
