pub mod compiler;
pub mod config;
pub mod error;
pub mod front_matter;
pub mod install_location;
pub mod installation;
pub mod mode;
pub mod paths;
pub mod post_process;
pub mod target;
pub mod template;
pub mod template_data;
pub mod vendor;

pub use compiler::{CompiledRule, Compiler, output_path};
pub use config::ProjectConfig;
pub use error::AppError;
pub use front_matter::{FrontMatter, FrontMatterError, split_front_matter};
pub use installation::{InstallFilter, InstallScope, InstallationLedger, InstallationRecord};
pub use mode::InstallMode;
pub use post_process::{ProcessedOutput, post_process};
pub use target::Target;
pub use template::{TemplateEngine, TemplateError};
pub use template_data::{CustomValue, TemplateData};
pub use vendor::{LockFile, VendorLock, VendorName};
