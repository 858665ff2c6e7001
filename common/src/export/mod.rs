//! Export core modules shared by the CLI and upload handlers.

#[cfg(feature = "excel")]
pub mod excel_core;
