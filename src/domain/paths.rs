//! Project layout catalog.

use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "rulecraft.yaml";
pub const LOCK_FILE: &str = "rulecraft.lock";
pub const TEMPLATES_DIR: &str = "templates";
pub const VENDORS_DIR: &str = "vendors";
pub const COMPILED_DIR: &str = "compiled";
pub const TEMPLATE_EXTENSION: &str = "tmpl";

/// Path segment marking a template as a partial.
pub const PARTIALS_SEGMENT: &str = "partials";

/// Installation ledger file inside the state directory.
pub const LEDGER_FILE: &str = "installations.yaml";

/// Environment variable overriding the state directory.
pub const STATE_DIR_ENV: &str = "RULECRAFT_HOME";

/// Default state directory name under the home directory.
pub const STATE_DIR_NAME: &str = ".rulecraft";

pub fn config_file(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn lock_file(root: &Path) -> PathBuf {
    root.join(LOCK_FILE)
}

pub fn templates_dir(root: &Path) -> PathBuf {
    root.join(TEMPLATES_DIR)
}

pub fn vendors_dir(root: &Path) -> PathBuf {
    root.join(VENDORS_DIR)
}

pub fn vendor_dir(root: &Path, vendor: &str) -> PathBuf {
    vendors_dir(root).join(vendor)
}

/// Templates directory inside a fetched vendor checkout.
pub fn vendor_templates_dir(root: &Path, vendor: &str) -> PathBuf {
    vendor_dir(root, vendor).join(TEMPLATES_DIR)
}

pub fn compiled_target_dir(root: &Path, target: &str) -> PathBuf {
    root.join(COMPILED_DIR).join(target)
}

pub fn ledger_file(state_dir: &Path) -> PathBuf {
    state_dir.join(LEDGER_FILE)
}

/// Whether a logical template name denotes a partial.
pub fn is_partial(template_name: &str) -> bool {
    template_name.split('/').any(|segment| segment == PARTIALS_SEGMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partials_are_detected_by_segment() {
        assert!(is_partial("partials/header"));
        assert!(is_partial("acme/partials/footer"));
        assert!(!is_partial("partials-guide"));
        assert!(!is_partial("style"));
    }

    #[test]
    fn vendor_templates_live_under_vendor_checkout() {
        let root = Path::new("/project");
        assert_eq!(vendor_templates_dir(root, "acme"), Path::new("/project/vendors/acme/templates"));
    }
}
