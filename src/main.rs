//! pawshaven - pet shelter listing service.
//!
//! Commands:
//! - `pawshaven serve` - run the REST API
//! - `pawshaven browse` - filter the pet list of a running server
//! - `pawshaven favorite <ID>` - toggle a local favorite

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use pawshaven::catalog::{AgeBucket, CatalogFilter};
use pawshaven::config::{BackendKind, Config};
use pawshaven::constants::DEFAULT_SERVER_URL;
use pawshaven::model::PetId;
use pawshaven::{logging, paths};

#[derive(Parser, Debug)]
#[command(name = "pawshaven")]
#[command(version, about = "Pet shelter listing service")]
struct Cli {
    /// Config file (defaults to ./pawshaven.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the REST API
    Serve {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,

        /// Local storage backend: file, sqlite or memory
        #[arg(long)]
        backend: Option<BackendKind>,

        /// Directory for local data files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// List pets from a running server
    Browse {
        /// Server base URL
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,

        /// Only this type (dog, cat, rabbit, bird, other)
        #[arg(long = "type")]
        kind: Option<String>,

        /// Only this age group (young, adult, senior)
        #[arg(long)]
        age: Option<AgeBucket>,

        /// Only this gender
        #[arg(long)]
        gender: Option<String>,

        /// Case-insensitive name search
        #[arg(short, long)]
        search: Option<String>,

        /// Only show favorites
        #[arg(long)]
        favorites_only: bool,
    },

    /// Toggle a pet in the local favorites set
    Favorite {
        /// Pet id
        id: PetId,

        /// Server base URL
        #[arg(long, default_value = DEFAULT_SERVER_URL)]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve {
            port,
            host,
            backend,
            data_dir,
        } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(backend) = backend {
                config.backend = backend;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            logging::init(config.log_format, "info");
            commands::serve::execute(config).await
        },
        Commands::Browse {
            server,
            kind,
            age,
            gender,
            search,
            favorites_only,
        } => {
            logging::init(config.log_format, "warn");
            let filter = CatalogFilter {
                kind,
                age,
                gender,
                search,
            };
            let favorites = paths::get_favorites_path()?;
            commands::browse::execute(&server, &filter, favorites_only, &favorites).await
        },
        Commands::Favorite { id, server } => {
            logging::init(config.log_format, "warn");
            let favorites = paths::get_favorites_path()?;
            commands::favorite::execute(&server, id, &favorites).await
        },
    }
}
