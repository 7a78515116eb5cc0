pub mod counter;

pub use counter::{CounterField, CounterService};
