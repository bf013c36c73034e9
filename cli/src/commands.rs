use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use users_core::UserId;

#[derive(Debug, Parser)]
#[command(name = "users", version, about = "Browse and manage user records")]
pub struct Cli {
    /// Base URL of the users API
    #[arg(long, env = "USERS_API_URL", default_value = "http://localhost:3000", global = true)]
    pub base_url: String,

    /// Verbosity: -v WARN, -vv INFO, -vvv DEBUG, -vvvv TRACE (default: RUST_LOG or WARN)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all users
    List,

    /// Show one user in detail
    Show {
        #[arg(allow_hyphen_values = true)]
        id: UserId,
    },

    /// Create a user from flags or a JSON file
    Create {
        #[command(flatten)]
        fields: UserFields,

        /// Read the full user (without id) from a JSON file
        #[arg(long, value_name = "FILE")]
        from_json: Option<PathBuf>,
    },

    /// Change some fields of a user
    Update {
        #[arg(allow_hyphen_values = true)]
        id: UserId,

        #[command(flatten)]
        fields: UserFields,

        /// Read the fields to change from a JSON file
        #[arg(long, value_name = "FILE")]
        from_json: Option<PathBuf>,
    },

    /// Delete a user
    Delete {
        #[arg(allow_hyphen_values = true)]
        id: UserId,
    },
}

#[derive(Debug, Default, Args)]
pub struct UserFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub website: Option<String>,
}

impl UserFields {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.website.is_none()
    }
}
