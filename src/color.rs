//! Packed 8-bit colors
//!
//! Every color on the face is one byte laid out as `AARRGGBB`, two bits per
//! channel. Colors with both alpha bits set are opaque, which gives a palette
//! of 64 opaque colors.

use embedded_graphics::pixelcolor::{raw::RawU8, PixelColor, Rgb565};

/// Mask of the two alpha bits.
const ALPHA_MASK: u8 = 0b1100_0000;
/// Mask of the six color bits.
const RGB_MASK: u8 = 0b0011_1111;

/// One byte ARGB color, two bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PackedColor(u8);

impl PackedColor {
    pub const WHITE: Self = Self(0xFF);
    pub const BLACK: Self = Self(ALPHA_MASK);

    /// Use a raw `AARRGGBB` byte as is.
    pub const fn from_argb(argb: u8) -> Self {
        Self(argb)
    }

    /// Opaque color from the low six `RRGGBB` bits, upper bits are ignored.
    pub const fn opaque(rgb: u8) -> Self {
        Self(ALPHA_MASK | (rgb & RGB_MASK))
    }

    /// The raw `AARRGGBB` byte.
    pub const fn argb(self) -> u8 {
        self.0
    }

    pub const fn alpha(self) -> u8 {
        self.0 >> 6
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 4) & 0b11
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 2) & 0b11
    }

    pub const fn blue(self) -> u8 {
        self.0 & 0b11
    }

    pub const fn is_opaque(self) -> bool {
        self.0 & ALPHA_MASK == ALPHA_MASK
    }
}

impl PixelColor for PackedColor {
    type Raw = RawU8;
}

impl From<PackedColor> for Rgb565 {
    fn from(color: PackedColor) -> Self {
        // Stretch each 2-bit channel over the full 5/6/5-bit range
        Rgb565::new(
            color.red() * 0x1F / 3,
            color.green() * 0x3F / 3,
            color.blue() * 0x1F / 3,
        )
    }
}
