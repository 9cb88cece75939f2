mod nav_commands;
mod project_commands;
mod services;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "waypoint", about = "Waypoint: project URL routing and resolution")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Custom config directory (overrides default ~/.config/waypoint/).
    #[arg(long, global = true, env = "WAYPOINT_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Custom data directory holding the default state file.
    #[arg(long, global = true, env = "WAYPOINT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Project daemon base URL (overrides config value).
    #[arg(long, global = true, env = "WAYPOINT_DAEMON_URL")]
    daemon_url: Option<String>,

    /// Read projects from a TOML file instead of the daemon.
    #[arg(long, global = true)]
    projects_file: Option<PathBuf>,

    /// File remembering the last visited project.
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate to a URL and print the view it renders (default: `/`).
    Open {
        /// Path or full URL.
        url: String,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical URL for a project page.
    Link {
        /// Organization slug; omit for ungrouped projects.
        #[arg(long)]
        org: Option<String>,
        #[arg(long)]
        project: String,
        #[arg(long, default_value = "issues")]
        page: String,
        /// Extra segments after the page keyword.
        subpath: Vec<String>,
    },
    /// Find the project registered at an absolute path.
    Resolve {
        path: PathBuf,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List projects known to the directory.
    Projects {
        /// Only projects in this organization.
        #[arg(long, conflicts_with = "ungrouped")]
        org: Option<String>,
        /// Only projects without an organization.
        #[arg(long)]
        ungrouped: bool,
        /// Include projects whose path no longer exists.
        #[arg(long)]
        include_stale: bool,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Forget the last visited project.
    Forget,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "waypoint starting");

    if let Some(ref dir) = cli.config_dir {
        waypoint_config::set_config_dir(dir.clone());
    }
    if let Some(ref dir) = cli.data_dir {
        waypoint_config::set_data_dir(dir.clone());
    }
    let config = waypoint_config::discover_and_load();
    let overrides = services::Overrides {
        daemon_url: cli.daemon_url,
        projects_file: cli.projects_file,
        state_file: cli.state_file,
    };

    match cli.command {
        None => {
            let services = services::Services::build(&config, overrides)?;
            nav_commands::open(&services, "/", false).await
        },
        Some(Commands::Open { url, json }) => {
            let services = services::Services::build(&config, overrides)?;
            nav_commands::open(&services, &url, json).await
        },
        Some(Commands::Link {
            org,
            project,
            page,
            subpath,
        }) => nav_commands::link(org.as_deref(), &project, &page, &subpath),
        Some(Commands::Resolve { path, json }) => {
            let services = services::Services::build(&config, overrides)?;
            project_commands::resolve(&services, &path, json).await
        },
        Some(Commands::Projects {
            org,
            ungrouped,
            include_stale,
            json,
        }) => {
            let services = services::Services::build(&config, overrides)?;
            let mut filter = match org {
                Some(org) => waypoint_directory::ProjectFilter::organization(org),
                None if ungrouped => waypoint_directory::ProjectFilter::ungrouped(),
                None => waypoint_directory::ProjectFilter::default(),
            };
            filter.include_stale = include_stale;
            project_commands::list(&services, &filter, json).await
        },
        Some(Commands::Forget) => {
            let services = services::Services::build(&config, overrides)?;
            nav_commands::forget(&services).await
        },
    }
}
