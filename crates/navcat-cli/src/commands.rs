use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};

use navcat_cli::report::{lookup_report, manifest_rows, resolve_mode, restore_mode};
use navcat_registry::{NavCategoryRegistry, NavcatConfig, StringTable, install_global};

use crate::cli::{Cli, DeserializeArgs, MenuArgs, ModeArgs};
use crate::summary::{print_keys, print_manifest, print_menu};

/// Registry and strings shared by every subcommand.
pub struct Session {
    pub registry: &'static NavCategoryRegistry,
    pub strings: StringTable,
}

/// Load the config, apply CLI overrides, and install the process registry.
pub fn open_session(cli: &Cli) -> Result<Session> {
    let mut config = match &cli.config {
        Some(path) => NavcatConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => NavcatConfig::default(),
    };
    if let Some(available) = cli.graphing_available {
        config.platform.graphing_available = available;
    }
    debug!(
        graphing_available = config.platform.graphing_available,
        users = config.policy.users.len(),
        "resolved configuration"
    );
    let registry = install_global(config.registry()).context("install registry")?;
    Ok(Session {
        registry,
        strings: config.string_table(),
    })
}

pub fn run_list(session: &Session) -> Result<()> {
    let rows = manifest_rows(session.registry);
    info!(entries = rows.len(), "listing manifest");
    print_manifest(&rows);
    Ok(())
}

pub fn run_menu(session: &Session, args: &MenuArgs) -> Result<()> {
    let groups = session
        .registry
        .create_menu_options(&session.strings)
        .context("build menu groups")?;
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&groups).context("encode menu")?
        );
    } else {
        print_menu(&groups);
    }
    Ok(())
}

pub fn run_serialize(session: &Session, args: &ModeArgs) -> Result<()> {
    let mode = resolve_mode(session.registry, &args.mode)
        .ok_or_else(|| anyhow!("unknown mode '{}'", args.mode))?;
    println!("{}", session.registry.serialize(mode));
    Ok(())
}

pub fn run_deserialize(session: &Session, args: &DeserializeArgs) -> Result<()> {
    println!("{}", restore_mode(session.registry, &args.value));
    Ok(())
}

pub fn run_lookup(session: &Session, args: &ModeArgs) -> Result<()> {
    let mode = resolve_mode(session.registry, &args.mode)
        .ok_or_else(|| anyhow!("unknown mode '{}'", args.mode))?;
    let report = lookup_report(session.registry, mode);
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("encode lookup report")?
    );
    Ok(())
}

pub fn run_keys(session: &Session) -> Result<()> {
    print_keys(session.registry);
    Ok(())
}
