#![deny(unsafe_code)]

pub mod category;
pub mod enums;
pub mod error;
pub mod keys;
pub mod stored;

pub use category::{CategoryDefinition, NONE_FRIENDLY_NAME};
pub use enums::{CategoryGroupType, ViewMode};
pub use error::{ModelError, Result};
pub use keys::VirtualKey;
pub use stored::{parse_stored_mode, parse_stored_mode_str, stored_mode_value};
