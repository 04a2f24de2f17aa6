//! Reading datasets from and writing partitions to the outside world.

mod plot;
mod reader;
mod writer;

pub use plot::run_plot_script;
pub use reader::{load_dataset, read_dataset};
pub use writer::{save_csv, write_csv};
