pub mod interaction;
pub mod table;

pub use interaction::{EventCount, ProductInteractionRow};
pub use table::Table;
