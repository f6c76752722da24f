//! Roster adapters - implementations of the `RosterSource` port.

mod json_file;

pub use json_file::JsonFileRosterSource;
