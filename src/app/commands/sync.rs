//! Sync command: update every vendor, then compile.

use crate::app::AppContext;
use crate::app::commands::compile::{self, CompileOptions, CompileReport};
use crate::app::commands::vendor::{self, VendorUpdate};
use crate::domain::{AppError, Target};
use crate::ports::{Selector, SourceControl};

#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub updates: Vec<VendorUpdate>,
    pub compile: CompileReport,
}

pub fn execute<G, S>(ctx: &AppContext<G, S>, target: Option<Target>) -> Result<SyncReport, AppError>
where
    G: SourceControl,
    S: Selector,
{
    let updates = vendor::update(ctx, &[])?;
    let compile = compile::execute(ctx, CompileOptions { target, vendor: None })?;
    Ok(SyncReport { updates, compile })
}
