use crate::error::Channel;

/// An 8-bit-per-channel RGB triple.
///
/// The channel type makes out-of-range values unrepresentable once a color
/// has been built; range checks happen where signed input enters the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Returns the value stored in `channel`.
    pub fn get(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
        }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb { r, g, b }
    }
}

pub mod colors {
    use super::Rgb;

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_lookup_matches_fields() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(c.get(Channel::Red), 1);
        assert_eq!(c.get(Channel::Green), 2);
        assert_eq!(c.get(Channel::Blue), 3);
        assert_eq!(Rgb::from([1, 2, 3]), c);
        assert_eq!(c.to_array(), [1, 2, 3]);
    }
}
