//! List command: templates available to `compile`.

use std::fs;

use crate::app::AppContext;
use crate::domain::{AppError, VendorName, paths, split_front_matter};
use crate::ports::{Selector, SourceControl};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateEntry {
    pub name: String,
    /// `None` for templates in the project's own `templates/` directory.
    pub vendor: Option<VendorName>,
    pub partial: bool,
    pub description: Option<String>,
}

/// Local templates first, then the templates of every fetched vendor.
pub fn execute<G, S>(ctx: &AppContext<G, S>) -> Result<Vec<TemplateEntry>, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let project = ctx.project();
    project.ensure_exists()?;

    let vendors: Vec<VendorName> = project.load_lock()?.names().cloned().collect();
    let mut entries = Vec::new();
    for file in project.discover_templates(&vendors)? {
        let raw = fs::read_to_string(&file.path)?;
        // An unreadable header only hides the description here; compile reports it.
        let description = split_front_matter(&raw).ok().and_then(|(fm, _)| fm.description);
        entries.push(TemplateEntry {
            partial: paths::is_partial(&file.name),
            name: file.name,
            vendor: file.vendor,
            description,
        });
    }
    Ok(entries)
}
