pub mod kind;
pub mod visibility;

pub use kind::EntityKind;
pub use visibility::Visibility;
