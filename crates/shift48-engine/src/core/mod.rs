pub use self::{board::*, spawn::*};

pub(crate) mod board;
pub(crate) mod spawn;
