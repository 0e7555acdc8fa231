#![deny(unsafe_code)]

//! Ordered navigation category registry.
//!
//! The [`manifest`] module defines the built-in category table; the
//! [`registry`] module answers positional, membership, and persistence
//! queries over it; [`feature_gate`] decides whether the graphing category
//! is usable; [`menu`] turns the manifest into localized menu groups.

pub mod config;
pub mod error;
pub mod feature_gate;
pub mod manifest;
pub mod menu;
pub mod providers;
pub mod registry;
pub mod resources;

pub use crate::config::NavcatConfig;
pub use crate::error::{NavCategoryError, PolicyError};
pub use crate::feature_gate::{FeatureGate, GateState, PolicyKey};
pub use crate::manifest::{Manifest, build_manifest};
pub use crate::menu::{NavCategory, NavCategoryGroup, create_menu_options};
pub use crate::providers::{
    CapabilityProbe, PolicyProvider, StaticCapability, StaticPolicyProvider, UserId,
};
pub use crate::registry::{
    NOT_FOUND, NavCategoryRegistry, global, install_global, is_date_mode, is_graphing_mode,
};
pub use crate::resources::{ResourceProvider, StringTable, format_localized};

pub use navcat_model::{CategoryDefinition, CategoryGroupType, ViewMode, VirtualKey};
