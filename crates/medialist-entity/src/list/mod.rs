//! List and item domain entities.

pub mod item;
pub mod kind;
pub mod model;
pub mod validate;

pub use item::{Item, ItemPatch, MediaInformation};
pub use kind::{ListKind, Privacy};
pub use model::{List, ListDetailsPatch, NewList};
pub use validate::validate_item_patch;
