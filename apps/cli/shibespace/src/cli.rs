use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const PASSWORD_ENV: &str = "SHIBESPACE_PASSWORD";

/// Command-line client for the shibespace forum.
#[derive(Debug, Parser)]
#[command(name = "shibespace", version, about)]
pub struct Cli {
    /// API base URL, overriding config.json and SHIBESPACE_API_BASE_URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Directory holding config.json
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Directory holding local storage and the log file
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log everything, including HTTP traffic
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the API is reachable
    Health,

    /// Create an account (does not log in)
    Signup(CredentialArgs),

    /// Log in and remember the session for one hour
    Login(CredentialArgs),

    /// Log out and forget the session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Wait and report session changes until logged out
    Watch,

    /// List threads, optionally filtered by tags
    Threads {
        /// Only threads with all of these tags (up to 5)
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Show a thread and a page of its comments
    Thread {
        id: i32,

        /// Comment page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Start a new thread
    NewThread {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,

        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Replace a thread's content
    EditThread {
        id: i32,

        #[arg(long)]
        content: String,
    },

    /// Delete a thread
    DeleteThread { id: i32 },

    /// Comment on a thread
    Comment {
        thread_id: i32,

        #[arg(long)]
        content: String,
    },

    /// Replace a comment's content
    EditComment {
        id: i32,

        #[arg(long)]
        content: String,
    },

    /// Delete a comment
    DeleteComment {
        id: i32,

        /// Thread the comment belongs to, to report the page to return to
        #[arg(long)]
        thread: Option<i32>,

        /// Comment page the comment is shown on
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[derive(Debug, Args)]
pub struct CredentialArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    pub password: String,
}
