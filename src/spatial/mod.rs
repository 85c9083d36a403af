pub mod static_grid;

pub use static_grid::{StaticGrid, DEFAULT_CELL_SIZE};
