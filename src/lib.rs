// Tuition Book - Core Library
// Exposes all modules for use in the CLI, the terminal UI and tests

pub mod entities;
pub mod error;
pub mod store;
pub mod model;
pub mod commands;
pub mod storage;
pub mod sample;
pub mod config;
pub mod logging;

#[cfg(test)]
mod testutil;

// Re-export commonly used types
pub use entities::{
    Address, Duration, Email, Fee, Name, Phone, Relationship, Session, SessionDate, Student,
    StudentDescriptor, StudyLevel, Subject, Tuition,
};
pub use error::{CommandError, TuitionError};
pub use store::UniqueTuitionList;
pub use model::{FilteredView, Model, TuitionFilter};
pub use commands::{
    AddSessionCommand, AddTuitionCommand, Command, CommandResult, DeleteTuitionCommand,
    EditTuitionCommand, FindTuitionCommand, Index, ListTuitionCommand, SessionParts,
};
pub use storage::{
    count_tuitions, export_json, import_json, load_tuitions, save_tuitions, setup_database,
};
pub use config::AppConfig;
