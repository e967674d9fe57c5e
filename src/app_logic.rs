/*
 * This module provides the application logic layer, centered around
 * `ConfigToolLogic` which acts as the Presenter: it owns the loaded
 * settings, the pending DLL-override map and the unsaved-changes flag, and
 * exposes the operations the shell invokes. Unit tests for
 * `ConfigToolLogic` are in `handler_tests.rs`.
 */
pub mod handler;
pub mod ui_constants;


pub use handler::{ConfigToolLogic, LogicError};
