use clap::{Parser, Subcommand};
use hp_graph::{NullNetwork, PortDirection, RecordingNetwork, Removal};
use hp_model::ModelError;
use hp_project::{Project, ProjectResult};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "hp-cli")]
#[command(about = "Heat pump topology builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a project file and check that its topology builds
    Validate {
        /// Path to the project file (YAML, or JSON by extension)
        project_path: PathBuf,
    },
    /// List the components of the built topology
    Components {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// List the connections of the built topology
    Connections {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Show counts, streams, open ports and the topology fingerprint
    Summary {
        /// Path to the project file
        project_path: PathBuf,
    },
    /// Delete components from the built topology and report the cascade
    Delete {
        /// Path to the project file
        project_path: PathBuf,
        /// Component labels to delete, in order
        #[arg(required = true)]
        labels: Vec<String>,
    },
}

fn main() -> ProjectResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Components { project_path } => cmd_components(&project_path),
        Commands::Connections { project_path } => cmd_connections(&project_path),
        Commands::Summary { project_path } => cmd_summary(&project_path),
        Commands::Delete {
            project_path,
            labels,
        } => cmd_delete(&project_path, &labels),
    }
}

fn load(project_path: &Path) -> ProjectResult<Project> {
    let project = hp_project::load(project_path)?;
    debug!(path = %project_path.display(), name = %project.name, "project loaded");
    Ok(project)
}

fn cmd_validate(project_path: &Path) -> ProjectResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load(project_path)?;
    let hp = project.build(NullNetwork)?;
    hp.topology().check_integrity().map_err(ModelError::from)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_components(project_path: &Path) -> ProjectResult<()> {
    let hp = load(project_path)?.build(NullNetwork)?;
    for component in hp.topology().components() {
        println!("  {} ({})", component.label, component.kind);
    }
    Ok(())
}

fn cmd_connections(project_path: &Path) -> ProjectResult<()> {
    let hp = load(project_path)?.build(NullNetwork)?;
    for connection in hp.topology().connections() {
        println!(
            "  {}: {} -> {}",
            connection.label, connection.source, connection.target
        );
    }
    Ok(())
}

fn cmd_summary(project_path: &Path) -> ProjectResult<()> {
    let project = load(project_path)?;
    let hp = project.build(NullNetwork)?;
    let topo = hp.topology();
    let streams = topo.streams();

    println!("{}", project.name);
    println!("  Cycles: {}", hp.config().nr_cycles);
    println!("  Fluids: {}", hp.config().fluids.join(", "));
    println!("  Components: {}", topo.component_count());
    println!("  Connections: {}", topo.connection_count());
    println!(
        "  Streams: {} ({} closed)",
        streams.len(),
        topo.closed_loop_count()
    );
    for (i, stream) in streams.iter().enumerate() {
        let kind = if stream.closed { "closed" } else { "open" };
        println!(
            "    #{} {}: {} connections",
            i + 1,
            kind,
            stream.connections.len()
        );
    }

    let open = topo.open_ports();
    if open.is_empty() {
        println!("  Open ports: none");
    } else {
        println!("  Open ports:");
        for port in open {
            let direction = match port.direction {
                PortDirection::Inlet => "inlet",
                PortDirection::Outlet => "outlet",
            };
            println!("    {} ({})", port.port, direction);
        }
    }
    println!("  Fingerprint: {}", topo.fingerprint());
    Ok(())
}

fn cmd_delete(project_path: &Path, labels: &[String]) -> ProjectResult<()> {
    let mut hp = load(project_path)?.build(RecordingNetwork::new())?;

    for label in labels {
        match hp.delete_component(label) {
            Removal::NotFound => println!("✗ {}: not found", label),
            Removal::Removed { connections, .. } => {
                println!("✓ {}: removed with {} connection(s)", label, connections.len());
                for connection in &connections {
                    println!("    - {}", connection.label);
                }
            }
        }
    }

    let topo = hp.topology();
    println!(
        "Remaining: {} components, {} connections ({} live in network)",
        topo.component_count(),
        topo.connection_count(),
        hp.network().live_connections().len()
    );
    println!("Fingerprint: {}", topo.fingerprint());
    Ok(())
}
