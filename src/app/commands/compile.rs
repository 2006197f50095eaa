//! Compile command: load every template, render it for each target and
//! write the results below `compiled/<target>/`.

use std::fs;
use std::path::PathBuf;

use crate::adapters::TemplateFile;
use crate::app::AppContext;
use crate::domain::{
    AppError, Compiler, ProjectConfig, Target, TemplateData, TemplateEngine, VendorName, paths,
    split_front_matter,
};
use crate::ports::{Selector, SourceControl};

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Compile for this target only; defaults come from `rulecraft.yaml`.
    pub target: Option<Target>,
    /// Compile only the templates of this vendor.
    pub vendor: Option<VendorName>,
}

/// A template that could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    pub template: String,
    /// `None` when the template failed before any target was attempted.
    pub target: Option<Target>,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct CompileReport {
    pub targets: Vec<Target>,
    pub written: Vec<PathBuf>,
    pub failures: Vec<CompileFailure>,
    /// Outputs written more than once in this run; the last rule wins.
    pub overwritten: Vec<PathBuf>,
}

impl CompileReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A loaded template with its resolved context.
struct Candidate {
    name: String,
    data: TemplateData,
}

/// Execute the compile command.
///
/// A failing template is recorded and skipped; the remaining templates are
/// still compiled.
pub fn execute<G, S>(ctx: &AppContext<G, S>, options: CompileOptions) -> Result<CompileReport, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let project = ctx.project();
    project.ensure_exists()?;

    let config = project.load_config()?;
    let lock = project.load_lock()?;

    let vendors: Vec<VendorName> = match &options.vendor {
        Some(vendor) => {
            if lock.get(vendor).is_none() {
                return Err(AppError::VendorNotFound(vendor.to_string()));
            }
            vec![vendor.clone()]
        }
        None => lock.names().filter(|name| config.includes_vendor(name.as_str())).cloned().collect(),
    };

    let targets = match &options.target {
        Some(target) => vec![target.clone()],
        None => config.default_targets()?,
    };

    let mut report = CompileReport { targets: targets.clone(), ..CompileReport::default() };
    let files = project.discover_templates(&vendors)?;
    tracing::debug!(templates = files.len(), vendors = vendors.len(), "discovered templates");

    let mut engine = TemplateEngine::new();
    let mut candidates = Vec::new();
    for file in &files {
        match load(&mut engine, file, &config) {
            Ok(Some(data)) => {
                if options.vendor.is_none() || file.vendor == options.vendor {
                    candidates.push(Candidate { name: file.name.clone(), data });
                }
            }
            Ok(None) => {}
            Err(reason) => report.failures.push(CompileFailure {
                template: file.name.clone(),
                target: None,
                reason,
            }),
        }
    }

    let compiler = Compiler::new(engine);
    for target in &targets {
        // A vendor-only compile must not discard the local output.
        if options.vendor.is_none() {
            project.clear_compiled(target)?;
        }

        for candidate in &candidates {
            match compiler.compile_template_with_modes(&candidate.name, target, &candidate.data) {
                Ok(rules) => {
                    for rule in rules {
                        let path = project.write_compiled(&rule)?;
                        if report.written.contains(&path) {
                            tracing::warn!(
                                path = %path.display(),
                                template = %candidate.name,
                                "compiled output overwritten by another rule"
                            );
                            report.overwritten.push(path);
                            continue;
                        }
                        tracing::debug!(path = %path.display(), "wrote compiled rule");
                        report.written.push(path);
                    }
                }
                Err(err) => report.failures.push(CompileFailure {
                    template: candidate.name.clone(),
                    target: Some(target.clone()),
                    reason: err.to_string(),
                }),
            }
        }
    }

    Ok(report)
}

/// Register `file` with the engine and resolve its data.
///
/// Partials resolve to `Ok(None)` once loaded; template data is only needed
/// for rules.
fn load(
    engine: &mut TemplateEngine,
    file: &TemplateFile,
    config: &ProjectConfig,
) -> Result<Option<TemplateData>, String> {
    let raw = fs::read_to_string(&file.path).map_err(|err| err.to_string())?;
    let (front_matter, body) = split_front_matter(&raw).map_err(|source| {
        AppError::FrontMatter { path: file.path.display().to_string(), source }.to_string()
    })?;

    engine.load_template(&file.name, &body).map_err(|err| err.to_string())?;
    if paths::is_partial(&file.name) {
        return Ok(None);
    }

    let defaults = config.defaults_for(file.vendor.as_ref().map(VendorName::as_str));
    let merged = front_matter.merged_over(&defaults);
    TemplateData::from_front_matter(&file.name, &merged).map(Some).map_err(|err| err.to_string())
}
