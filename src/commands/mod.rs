//! Command implementations for jobscript.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

use crate::cli::{Command, QuoteArgs, RenderArgs, SourceArgs, WriteArgs};
use jobscript::quote::quote_value;
use jobscript::{JobScriptWriter, ProcessEnvironment, Result, SiteConfig, TaskJob, WriterConfig};
use tracing::info;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Write(args) => cmd_write(args),
        Command::Render(args) => cmd_render(args),
        Command::Quote(args) => cmd_quote(args),
    }
}

/// Load the description and site config named by the shared arguments.
fn load_sources(source: &SourceArgs) -> Result<(TaskJob, SiteConfig)> {
    let job = TaskJob::load(&source.description)?;
    let site = match &source.site_config {
        Some(path) => SiteConfig::load(path)?,
        None => SiteConfig::default(),
    };
    Ok((job, site))
}

fn cmd_write(args: WriteArgs) -> Result<()> {
    let (job, site) = load_sources(&args.source)?;
    let config = WriterConfig::default()
        .with_debug(args.source.debug)
        .with_check_syntax(args.check_syntax);

    let env = ProcessEnvironment;
    let writer = JobScriptWriter::new(&site, &site, &env, config);
    writer.write(&args.destination, &job)?;

    info!(
        task = %job.task_id,
        path = %args.destination.display(),
        "job script written"
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let (job, site) = load_sources(&args.source)?;
    let config = WriterConfig::default().with_debug(args.source.debug);

    let env = ProcessEnvironment;
    let writer = JobScriptWriter::new(&site, &site, &env, config);
    print!("{}", writer.render(&job)?);
    Ok(())
}

fn cmd_quote(args: QuoteArgs) -> Result<()> {
    for value in &args.values {
        println!("{}", quote_value(value));
    }
    Ok(())
}
