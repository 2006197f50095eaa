//! rulecraft: compile AI coding-assistant rules from shared templates.
//!
//! Templates are minijinja sources with optional YAML front matter. They are
//! rendered once per target assistant, finished with that assistant's naming
//! and header conventions, and can be installed into the locations each
//! assistant reads.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    CompileFailure, CompileOptions, CompileReport, FetchOptions, FetchedVendor, InitOutcome,
    InstallOptions, InstallReport, SyncReport, TemplateEntry, UninstallOptions, UninstallReport,
    VendorUpdate,
};
pub use domain::{
    AppError, CompiledRule, Compiler, CustomValue, InstallMode, InstallScope, Target,
    TemplateData, TemplateEngine, TemplateError,
};
