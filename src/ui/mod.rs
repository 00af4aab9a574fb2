pub mod event;
pub mod view;

pub use event::{CartEvent, EffectTarget, EventQueue};
pub use view::{CardRow, CartView, SnapshotView};
