//! The external state boundary.
//!
//! Watchdogs reach the host application only through [`StateAccess`]; the
//! crate never sees process memory, addresses, or file formats. The
//! in-memory [`MemoryAccess`] backend exists for tests and embedders'
//! doubles.

pub mod field;
pub mod memory;

pub use field::{Field, FieldValue, PanelId, StateAccess};
pub use memory::MemoryAccess;
