//! Domain commands: the inputs of the write and query operations, already
//! parsed into domain types.

pub mod day_off;
pub mod time_log;
