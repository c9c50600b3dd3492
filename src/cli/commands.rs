//! Command dispatch

use std::io;

use clap::CommandFactory;
use itertools::Itertools;
use termtree::Tree;
use tracing::{debug, instrument};

use crate::cli::args::{CatalogCommands, Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, OutputFormat, Settings};
use crate::domain::Catalog;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::CatalogLoader;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Analyze {
            animal,
            quantity,
            json,
        }) => {
            let container = ServiceContainer::new(load_settings(cli)?)?;
            cmd_analyze(&container, animal, quantity, *json)
        }
        Some(Commands::Catalog { command }) => {
            let container = ServiceContainer::new(load_settings(cli)?)?;
            cmd_catalog(&container.catalog, command.as_ref())
        }
        Some(Commands::Config { command }) => cmd_config(&load_settings(cli)?, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, try `recintos analyze MACACO 2` or --help".into(),
        )),
    }
}

/// Settings from config layers, with CLI flags on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(catalog) = &cli.catalog {
        settings.catalog_path = Some(catalog.clone());
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

#[instrument(skip(container))]
fn cmd_analyze(
    container: &ServiceContainer,
    animal: &str,
    quantity: &str,
    json: bool,
) -> CliResult<()> {
    let result = container.analysis_service().analyze_raw(animal, quantity);

    if json || container.settings.output == OutputFormat::Json {
        output::info(&result.to_json()?);
    } else {
        for descriptor in result.descriptors() {
            output::info(&descriptor);
        }
    }

    match result.error {
        Some(rejection) => Err(CliError::Rejected(rejection)),
        None => Ok(()),
    }
}

#[instrument(skip(catalog))]
fn cmd_catalog(catalog: &Catalog, command: Option<&CatalogCommands>) -> CliResult<()> {
    match command {
        Some(CatalogCommands::Enclosures) => output::info(&enclosure_tree(catalog)),
        Some(CatalogCommands::Species) => print_species(catalog),
        Some(CatalogCommands::Export) => output::info(&CatalogLoader::render(catalog)?),
        None => {
            output::info(&enclosure_tree(catalog));
            print_species(catalog);
        }
    }
    Ok(())
}

/// Enclosures with their occupants, one subtree per enclosure.
pub fn enclosure_tree(catalog: &Catalog) -> Tree<String> {
    let mut root = Tree::new("Recintos".to_string());
    for enclosure in catalog.enclosures() {
        let mut node = Tree::new(format!(
            "Recinto {} [{}] {}/{}",
            enclosure.id, enclosure.biome, enclosure.occupied, enclosure.total
        ));
        for (species, count) in &enclosure.occupants {
            node.push(Tree::new(format!("{species} x{count}")));
        }
        root.push(node);
    }
    root
}

fn print_species(catalog: &Catalog) {
    output::header("Espécies");
    for record in catalog.species() {
        output::detail(&format!(
            "{:<11} tamanho {}  biomas: {}",
            record.species,
            record.size,
            record.biomes.iter().join(", ")
        ));
    }
}

#[instrument]
fn cmd_config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                if path.exists() {
                    output::success(&path.display());
                } else {
                    output::info(&format!("{} (not created)", path.display()));
                }
            }
            None => return Err(CliError::Usage("no config directory on this system".into())),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_zoo_when_rendering_tree_then_lists_enclosures_and_occupants() {
        let rendered = enclosure_tree(&Catalog::default_zoo()).to_string();
        assert!(rendered.starts_with("Recintos"));
        assert!(rendered.contains("Recinto 1 [savana] 3/10"));
        assert!(rendered.contains("Recinto 3 [savana e rio] 2/7"));
        assert!(rendered.contains("MACACO x3"));
        assert!(rendered.contains("LEAO x1"));
    }
}
