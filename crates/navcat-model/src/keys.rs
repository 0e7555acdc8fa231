use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyboard accelerator bound to a category.
///
/// Discriminants are Windows virtual-key codes so values read from a host
/// keyboard event can be mapped with [`VirtualKey::from_code`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum VirtualKey {
    /// No accelerator.
    #[default]
    None = 0x00,
    Number0 = 0x30,
    Number1 = 0x31,
    Number2 = 0x32,
    Number3 = 0x33,
    Number4 = 0x34,
    Number5 = 0x35,
    Number6 = 0x36,
    Number7 = 0x37,
    Number8 = 0x38,
    Number9 = 0x39,
}

const NUMBER_KEYS: [VirtualKey; 10] = [
    VirtualKey::Number0,
    VirtualKey::Number1,
    VirtualKey::Number2,
    VirtualKey::Number3,
    VirtualKey::Number4,
    VirtualKey::Number5,
    VirtualKey::Number6,
    VirtualKey::Number7,
    VirtualKey::Number8,
    VirtualKey::Number9,
];

impl VirtualKey {
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Map a raw virtual-key code. Codes outside the supported set map to
    /// `None` rather than failing.
    pub fn from_code(code: u16) -> Option<Self> {
        if code == 0 {
            return Some(VirtualKey::None);
        }
        NUMBER_KEYS.iter().copied().find(|key| key.code() == code)
    }

    /// The digit key for `digit` (0-9).
    pub fn number(digit: usize) -> Option<Self> {
        NUMBER_KEYS.get(digit).copied()
    }

    pub fn is_none(self) -> bool {
        self == VirtualKey::None
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VirtualKey::None => f.write_str("None"),
            other => write!(f, "Number{}", other.code() - VirtualKey::Number0.code()),
        }
    }
}
