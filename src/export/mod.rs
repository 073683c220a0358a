//! Export functionality for trained tables and sweep reports
//!
//! Policy tables render the greedy policy as text; sweep rows go to CSV.

mod policy_table;
mod sweep_csv;

pub use policy_table::{HEADER, PolicyRow, PolicyTable};
pub use sweep_csv::SweepCsvWriter;
