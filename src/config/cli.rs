use crate::config::toml_config::TomlConfig;
use crate::config::ClientSettings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "unifinder", version)]
#[command(about = "Find, compare and apply to universities")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Base URL of the university API")]
    pub api_url: Option<String>,

    #[arg(long, global = true, help = "Directory holding the login session")]
    pub session_dir: Option<String>,

    #[arg(long, global = true, help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Defaults, then the config file, then command-line flags.
    pub fn settings(&self) -> Result<ClientSettings> {
        let mut settings = ClientSettings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from {}", path.display());
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            settings = file.apply_to(settings);
        }

        if let Some(api_url) = &self.api_url {
            settings.api_base_url = api_url.clone();
        }
        if let Some(dir) = &self.session_dir {
            settings.session_dir = dir.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout_secs = timeout;
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Explore all universities
    List,
    /// Search universities by name; an empty query shows everything
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    /// Recommend a university from a preference profile
    Recommend {
        #[arg(long, help = "TOML file with the preference form fields")]
        profile: PathBuf,
    },
    /// Fetch an up-to-date summary of a university
    Info { id: String },
    /// Show the average rating of a university
    Ratings { id: String },
    /// Rate a university from 1 to 5 stars
    Rate { id: String, stars: u8 },
    /// Apply to a university
    Apply { id: String },
    /// Create an account
    Signup(SignupArgs),
    Login {
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    /// Show the logged-in user
    Whoami,
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub full_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub age: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProfileCommand {
    Show,
    Update {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        age: Option<u32>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Delete the account and end the session
    Delete {
        #[arg(long, help = "Confirm the deletion")]
        yes: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum AdminCommand {
    Universities {
        #[command(subcommand)]
        command: UniversityCommand,
    },
    /// List every rating users have submitted
    Feedback {
        #[arg(long, help = "Also write the records to a CSV file")]
        csv: Option<PathBuf>,
    },
    /// List every application users have made
    Bookings {
        #[arg(long, help = "Also write the records to a CSV file")]
        csv: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum UniversityCommand {
    List,
    Add(UniversityArgs),
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        ranking: Option<u32>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
    },
    Delete {
        id: String,
        #[arg(long, help = "Confirm the deletion")]
        yes: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct UniversityArgs {
    #[arg(long)]
    pub id: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub location: String,
    #[arg(long)]
    pub ranking: String,
    #[arg(long)]
    pub website: String,
    #[arg(long)]
    pub image_url: String,
}
