//! Competition result domain.

mod model;

pub use model::{ResultDraft, SwimResult};
