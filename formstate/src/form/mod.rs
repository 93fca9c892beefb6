//! Form state and its transition function.

mod action;
mod reducer;
mod state;
mod store;

pub use action::FormAction;
pub use reducer::reduce;
pub use state::FormState;
pub use store::FormStore;
