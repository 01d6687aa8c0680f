//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `Dataset` / `Row` - the loaded table (immutable after load)
//! - `SelectionState` - the user-chosen filter parameters
//! - `filter` - derives the visible subset from dataset + selection
//! - `ChartBinding` - the input contract for the renderers
//! - `ModalStack` - modal overlay management

pub mod binding;
pub mod dataset;
pub mod domain;
pub mod filter;
pub mod modal;
pub mod selection;
pub mod ui;

// Re-export commonly used types
pub use binding::ChartBinding;
pub use dataset::{Dataset, LoadError, Row};
pub use selection::{ColorBy, SelectionState};
