//! Kennel CLI - Command-line front end for the dog record mapper

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use kennel::config::{self, KennelConfig};
use kennel::storage::{DogStore, SchemaVariant};
use kennel::ui::{self, Icons};
use kennel::Dog;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "kennel")]
#[command(version)]
#[command(about = "Minimal SQLite-backed mapper for dog records")]
#[command(long_about = r#"
Kennel stores dogs in a SQLite `dogs` table and exposes every mapper
operation as a subcommand.

Example usage:
  kennel init
  kennel add --name Teddy --breed cockapoo
  kennel find --name Teddy
  kennel update 1 --name "Teddy Jr."
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Schema variant (basic, full)
    #[arg(long, global = true)]
    schema: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct DogArgs {
    /// Dog name
    #[arg(short, long)]
    name: String,

    /// Dog breed
    #[arg(short, long)]
    breed: String,

    /// Coat color (full schema only)
    #[arg(long)]
    color: Option<String>,

    /// Instagram handle (full schema only)
    #[arg(short, long)]
    instagram: Option<String>,
}

impl DogArgs {
    fn into_dog(self) -> Dog {
        let mut dog = Dog::new(self.name, self.breed);
        dog.color = self.color;
        dog.instagram = self.instagram;
        dog
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create the dogs table
    Init {
        /// Also write the resolved settings to the config file
        #[arg(long)]
        write_config: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Drop the dogs table
    Drop,

    /// Insert a new dog
    Add(DogArgs),

    /// Show a dog by id
    Show {
        /// Dog id
        id: i64,
    },

    /// Find the first dog with a given name
    Find {
        /// Name to look up
        #[arg(short, long)]
        name: String,
    },

    /// Return the matching dog, creating it if none exists
    FindOrCreate(DogArgs),

    /// Change fields of an existing dog
    Update {
        /// Dog id
        id: i64,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        breed: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(short, long)]
        instagram: Option<String>,
    },

    /// List every dog
    List,

    /// Show statistics about the database
    Stats,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        ui::error(&format!("{:#}", err));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let database = cli.database.clone().unwrap_or_else(|| file_config.database_path());
    let schema = match &cli.schema {
        Some(s) => s.parse::<SchemaVariant>()?,
        None => file_config.schema_variant(),
    };

    config::ensure_db_dir(&database)?;
    tracing::debug!("Opening {:?} with {} schema", database, schema);
    let store = DogStore::open(&database, schema)?;
    let json = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Init { write_config, force } => {
            store.create_table()?;

            if write_config {
                let path = cli.config.clone().unwrap_or_else(config::default_config_path);
                let settings = KennelConfig {
                    database: Some(database.display().to_string()),
                    schema: Some(schema),
                };
                config::write_config(&path, &settings, force)?;
                tracing::info!("Wrote config to {}", path.display());
            }

            if json {
                emit_json(&serde_json::json!({
                    "database": database.display().to_string(),
                    "schema": schema,
                    "created": true,
                }))?;
            } else {
                ui::success(&format!("Table `dogs` ready ({} schema)", schema));
                ui::info("Database", &database.display().to_string());
            }
        }

        Commands::Drop => {
            store.drop_table()?;
            if json {
                emit_json(&serde_json::json!({ "dropped": true }))?;
            } else {
                ui::success("Table `dogs` dropped");
            }
        }

        Commands::Add(args) => {
            let dog = store.create(args.into_dog())?;
            if json {
                emit_json(&dog)?;
            } else {
                ui::header("Saved");
                ui::dog_line(&dog);
            }
        }

        Commands::Show { id } => {
            let dog = store.find(id)?;
            print_lookup(json, dog.as_ref(), &format!("No dog with id {}", id))?;
        }

        Commands::Find { name } => {
            let dog = store.find_by_name(&name)?;
            print_lookup(json, dog.as_ref(), &format!("No dog named '{}'", name))?;
        }

        Commands::FindOrCreate(args) => {
            let before = store.count()?;
            let dog = store.find_or_create_by(args.into_dog())?;
            let created = store.count()? > before;

            if json {
                emit_json(&serde_json::json!({ "dog": dog, "created": created }))?;
            } else {
                ui::header(if created { "Created" } else { "Found existing" });
                ui::dog_line(&dog);
            }
        }

        Commands::Update { id, name, breed, color, instagram } => {
            let Some(mut dog) = store.find(id)? else {
                anyhow::bail!("No dog with id {}", id);
            };

            if let Some(name) = name {
                dog.name = name;
            }
            if let Some(breed) = breed {
                dog.breed = breed;
            }
            if color.is_some() {
                dog.color = color;
            }
            if instagram.is_some() {
                dog.instagram = instagram;
            }
            store.save(&mut dog)?;

            if json {
                emit_json(&dog)?;
            } else {
                ui::header("Updated");
                ui::dog_line(&dog);
            }
        }

        Commands::List => {
            let dogs = store.all()?;
            if json {
                emit_json(&dogs)?;
            } else if dogs.is_empty() {
                ui::notice(Icons::EMPTY, "No dogs found.");
            } else {
                ui::section(&format!("{} dogs", dogs.len()));
                println!("{}", ui::dog_table(&dogs));
            }
        }

        Commands::Stats => {
            let stats = store.stats()?;
            if json {
                emit_json(&stats)?;
            } else {
                ui::notice(Icons::STATS, &format!("Kennel Statistics ({:?})", database));
                let dogs = stats.dogs.to_string();
                let present = stats.table_exists.to_string();
                println!(
                    "{}",
                    ui::stats_table(&[
                        ("Schema", stats.schema.as_str()),
                        ("Table present", &present),
                        ("Dogs", &dogs),
                    ])
                );
            }
        }
    }

    Ok(())
}

fn emit_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_lookup(json: bool, dog: Option<&Dog>, missing: &str) -> anyhow::Result<()> {
    if json {
        return emit_json(&dog);
    }
    match dog {
        Some(dog) => ui::dog_line(dog),
        None => ui::warn(missing),
    }
    Ok(())
}
