//! Command Line Boss CLI Library
//!
//! An example command line built with `command-line-boss-core`: `create_spreadsheet`
//! parses the title, sheets, data files, permissions and folder of a spreadsheet to
//! create.
//!
//! # Architecture
//!
//! - [`spreadsheet`]: the parsed option state and the permission spec grammar
//! - [`data_file`]: reading CSV data for a sheet
//! - [`command_line`]: the hooks, help texts and validations of `create_spreadsheet`
//!
//! # Examples
//!
//! ```bash
//! # A spreadsheet with one sheet filled from a CSV file, shared with anyone
//! create_spreadsheet "Q3 Sales" --sheet=Summary --data=summary.csv \
//!   --permission=anyone:reader
//!
//! # Show the options
//! create_spreadsheet --help
//! ```

pub mod command_line;
pub mod data_file;
pub mod spreadsheet;

pub use command_line::{create_spreadsheet_command_line, PROGRAM_NAME};
pub use spreadsheet::{CreateSpreadsheet, Permission, Sheet};
