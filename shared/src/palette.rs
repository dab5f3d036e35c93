/// The fixed ten-color palette shared with the authority. Wire messages and
/// the persisted board record carry the `u8` index, never the color itself.
/// Index 0 is the background color of an empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PixelColor {
    White = 0,
    Green = 1,
    Yellow = 2,
    Red = 3,
    Orange = 4,
    Purple = 5,
    Blue = 6,
    Teal = 7,
    Pink = 8,
    Black = 9,
}

impl PixelColor {
    pub const COUNT: usize = 10;

    pub const ALL: [PixelColor; PixelColor::COUNT] = [
        PixelColor::White,
        PixelColor::Green,
        PixelColor::Yellow,
        PixelColor::Red,
        PixelColor::Orange,
        PixelColor::Purple,
        PixelColor::Blue,
        PixelColor::Teal,
        PixelColor::Pink,
        PixelColor::Black,
    ];

    pub fn from_index(index: u8) -> Option<PixelColor> {
        Self::ALL.get(usize::from(index)).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            PixelColor::White => [255, 255, 255],
            PixelColor::Green => [116, 182, 62],
            PixelColor::Yellow => [255, 206, 51],
            PixelColor::Red => [204, 66, 29],
            PixelColor::Orange => [255, 133, 51],
            PixelColor::Purple => [135, 48, 140],
            PixelColor::Blue => [29, 112, 162],
            PixelColor::Teal => [7, 157, 157],
            PixelColor::Pink => [240, 86, 137],
            PixelColor::Black => [0, 0, 0],
        }
    }

    pub fn css(self) -> &'static str {
        match self {
            PixelColor::White => "#FFFFFF",
            PixelColor::Green => "#74B63E",
            PixelColor::Yellow => "#FFCE33",
            PixelColor::Red => "#CC421D",
            PixelColor::Orange => "#FF8533",
            PixelColor::Purple => "#87308C",
            PixelColor::Blue => "#1D70A2",
            PixelColor::Teal => "#079D9D",
            PixelColor::Pink => "#F05689",
            PixelColor::Black => "#000000",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_every_entry() {
        for color in PixelColor::ALL {
            assert_eq!(PixelColor::from_index(color.index()), Some(color));
        }
    }

    #[test]
    fn indices_outside_palette_are_rejected() {
        assert_eq!(PixelColor::from_index(10), None);
        assert_eq!(PixelColor::from_index(255), None);
    }

    #[test]
    fn colors_are_distinct() {
        for a in PixelColor::ALL {
            for b in PixelColor::ALL {
                if a != b {
                    assert_ne!(a.rgb(), b.rgb());
                    assert_ne!(a.css(), b.css());
                }
            }
        }
    }

    #[test]
    fn background_is_index_zero() {
        assert_eq!(PixelColor::White.index(), 0);
        assert_eq!(PixelColor::White.rgb(), [255, 255, 255]);
    }
}
