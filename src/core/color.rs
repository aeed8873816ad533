// src/core/color.rs

use super::error::{QcolorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four vertex colors, stored as a 2-bit pattern.
///
/// Bit `i` of `bits()` lives on qubit `i` of a vertex register. Every
/// comparator and decoder in the crate goes through this encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VertexColor {
    /// `00`
    Red,
    /// `01`
    Blue,
    /// `10`
    Yellow,
    /// `11`
    Green,
}

impl VertexColor {
    /// All colors in encoding order.
    pub const ALL: [VertexColor; 4] = [VertexColor::Red, VertexColor::Blue, VertexColor::Yellow, VertexColor::Green];

    /// The 2-bit encoding of the color.
    pub fn bits(self) -> u8 {
        match self {
            VertexColor::Red => 0b00,
            VertexColor::Blue => 0b01,
            VertexColor::Yellow => 0b10,
            VertexColor::Green => 0b11,
        }
    }

    /// Value of encoding bit `index` (0 or 1).
    pub fn bit(self, index: usize) -> bool {
        (self.bits() >> index) & 1 == 1
    }

    /// Inverse of `bits()`. Only the two low bits are considered.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => VertexColor::Red,
            0b01 => VertexColor::Blue,
            0b10 => VertexColor::Yellow,
            _ => VertexColor::Green,
        }
    }
}

impl FromStr for VertexColor {
    type Err = QcolorError;

    /// Parses a binary string such as `"10"`, most significant bit first.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "00" => Ok(VertexColor::Red),
            "01" => Ok(VertexColor::Blue),
            "10" => Ok(VertexColor::Yellow),
            "11" => Ok(VertexColor::Green),
            _ => Err(QcolorError::InvalidOperation {
                message: format!("cannot interpret binary string '{}' as a color", s),
            }),
        }
    }
}

impl fmt::Display for VertexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VertexColor::Red => "RED",
            VertexColor::Blue => "BLUE",
            VertexColor::Yellow => "YELLOW",
            VertexColor::Green => "GREEN",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_is_a_bijection() {
        for color in VertexColor::ALL {
            assert_eq!(VertexColor::from_bits(color.bits()), color);
        }
        let distinct: std::collections::HashSet<u8> = VertexColor::ALL.iter().map(|c| c.bits()).collect();
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn test_parse_binary_string() -> Result<()> {
        assert_eq!("01".parse::<VertexColor>()?, VertexColor::Blue);
        assert_eq!("10".parse::<VertexColor>()?, VertexColor::Yellow);
        assert!(!VertexColor::Blue.bit(1));
        assert!(VertexColor::Blue.bit(0));
        assert!("2".parse::<VertexColor>().is_err());
        Ok(())
    }
}
