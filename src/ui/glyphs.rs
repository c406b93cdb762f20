//! Digit bitmaps for the hour readout
//!
//! Every digit is `GLYPH_HEIGHT` rows tall and at most `GLYPH_WIDTH` columns
//! wide. Narrower digits leave their right-hand columns empty.

/// Rows per digit
pub const GLYPH_HEIGHT: usize = 5;
/// Columns in the widest digit
pub const GLYPH_WIDTH: usize = 3;

type Bitmap = [[bool; GLYPH_WIDTH]; GLYPH_HEIGHT];

/// Expand row bitmasks, most significant of the low `GLYPH_WIDTH` bits on the left
const fn bitmap(rows: [u8; GLYPH_HEIGHT]) -> Bitmap {
    let mut out = [[false; GLYPH_WIDTH]; GLYPH_HEIGHT];
    let mut r = 0;
    while r < GLYPH_HEIGHT {
        let mut c = 0;
        while c < GLYPH_WIDTH {
            out[r][c] = rows[r] & (1 << (GLYPH_WIDTH - 1 - c)) != 0;
            c += 1;
        }
        r += 1;
    }
    out
}

static DIGITS: [Bitmap; 10] = [
    bitmap([0b111, 0b101, 0b101, 0b101, 0b111]),
    bitmap([0b110, 0b010, 0b010, 0b010, 0b010]),
    bitmap([0b111, 0b001, 0b111, 0b100, 0b111]),
    bitmap([0b111, 0b001, 0b111, 0b001, 0b111]),
    bitmap([0b101, 0b101, 0b111, 0b001, 0b001]),
    bitmap([0b111, 0b100, 0b111, 0b001, 0b111]),
    bitmap([0b111, 0b100, 0b111, 0b101, 0b111]),
    bitmap([0b111, 0b001, 0b001, 0b001, 0b001]),
    bitmap([0b111, 0b101, 0b111, 0b101, 0b111]),
    bitmap([0b111, 0b101, 0b111, 0b001, 0b111]),
];

static DIGIT_WIDTHS: [u8; 10] = [3, 2, 3, 3, 3, 3, 3, 3, 3, 3];

/// Width of `digit` in glyph columns.
///
/// # Panics
///
/// If `digit > 9`.
pub fn digit_width(digit: u8) -> u8 {
    DIGIT_WIDTHS[digit as usize]
}

/// Whether the cell at `row`, `col` of `digit` is lit. Cells outside the
/// bitmap are off.
///
/// # Panics
///
/// If `digit > 9`.
pub fn digit_cell(digit: u8, row: usize, col: usize) -> bool {
    DIGITS[digit as usize]
        .get(row)
        .and_then(|cells| cells.get(col))
        .copied()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_beyond_width_are_off() {
        for digit in 0..10 {
            let width = digit_width(digit) as usize;
            assert!(width >= 1 && width <= GLYPH_WIDTH);
            for row in 0..GLYPH_HEIGHT {
                for col in width..GLYPH_WIDTH {
                    assert!(!digit_cell(digit, row, col), "digit {} ({}, {})", digit, row, col);
                }
            }
        }
    }

    #[test]
    fn test_every_digit_uses_full_height() {
        for digit in 0..10 {
            assert!((0..GLYPH_WIDTH).any(|col| digit_cell(digit, 0, col)));
            assert!((0..GLYPH_WIDTH).any(|col| digit_cell(digit, GLYPH_HEIGHT - 1, col)));
        }
    }

    #[test]
    fn test_digits_are_distinct() {
        for a in 0..10 {
            for b in (a + 1)..10 {
                assert_ne!(DIGITS[a], DIGITS[b], "digits {} and {}", a, b);
            }
        }
    }

    #[test]
    fn test_outside_bitmap_is_off() {
        assert!(!digit_cell(8, GLYPH_HEIGHT, 0));
        assert!(!digit_cell(8, 0, GLYPH_WIDTH));
    }

    #[test]
    fn test_one_shape() {
        assert!(digit_cell(1, 0, 0));
        assert!(digit_cell(1, 0, 1));
        assert!(!digit_cell(1, 1, 0));
        assert!(digit_cell(1, 4, 1));
    }
}
