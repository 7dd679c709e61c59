use shibespace::cli::{Cli, Command};
use shibespace::commands::{auth, comments, threads};
use shibespace::error::ShibespaceError;
use shibespace::logger::{initialize as LoggerInitialize, level_for};
use shibespace::render::{self, Printer};
use shibespace::state::AppState;

use client_core::config::{ClientConfig, default_config_dir, default_data_dir};

use std::fs::create_dir_all;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use log::{error, info};
use serde_json::json;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let printer = Printer { json: cli.json };

    match run(cli, printer).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if printer.json {
                match serde_json::to_string(&e) {
                    Ok(encoded) => println!("{encoded}"),
                    Err(_) => eprintln!("{}", e.user_message()),
                }
            } else {
                eprintln!("{}", e.user_message());
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, printer: Printer) -> Result<(), ShibespaceError> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };

    create_dir_all(&data_dir).map_err(|e| {
        ShibespaceError::app(format!("Failed to create data directory: {e}"))
    })?;

    // Initialize logger FIRST
    LoggerInitialize(&data_dir, level_for(cli.verbose, cli.quiet))?;
    info!("Data directory: {}", data_dir.display());

    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => default_config_dir()?,
    };

    let mut config = ClientConfig::load(&config_dir)?;
    config.apply_env_overrides()?;
    config.apply_base_url_override(cli.base_url)?;
    info!("Using API at {}", config.api.base_url);

    let state = AppState::open(config, &data_dir)?;
    let result = dispatch(&state, cli.command, printer).await;
    state.tracker.shutdown();

    result
}

async fn dispatch(
    state: &AppState,
    command: Command,
    printer: Printer,
) -> Result<(), ShibespaceError> {
    let now = Utc::now();

    match command {
        Command::Health => {
            let report = auth::health(state).await?;
            printer.emit(&report, render::health)
        }
        Command::Signup(args) => {
            let user = auth::signup(state, args).await?;
            printer.emit(&user, render::signed_up)
        }
        Command::Login(args) => {
            let user = auth::login(state, args).await?;
            printer.emit(&user, |u| render::session_change(Some(&u.username)))
        }
        Command::Logout => {
            auth::logout(state).await?;
            printer.emit(&json!({ "username": null }), |_| render::session_change(None))
        }
        Command::Whoami => {
            let username = auth::whoami(state);
            printer.emit(&json!({ "username": username }), |_| {
                render::whoami(username.as_deref())
            })
        }
        Command::Watch => {
            let on_change = |username: Option<&str>| {
                printer.emit_logged(&json!({ "username": username }), |_| {
                    render::session_change(username)
                });
            };

            tokio::select! {
                result = auth::watch(state, on_change) => result,
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted, no longer watching the session");
                    Ok(())
                }
            }
        }
        Command::Threads { tags, page } => {
            let listing = threads::list(state, &tags, page).await?;
            printer.emit(&listing, |l| render::thread_listing(l, now))
        }
        Command::Thread { id, page } => {
            let view = threads::show(state, id, page).await?;
            printer.emit(&view, |v| render::thread_view(v, now))
        }
        Command::NewThread {
            title,
            content,
            tags,
        } => {
            let thread = threads::create(state, &title, &content, &tags).await?;
            printer.emit(&thread, |t| render::thread_saved("Created", t))
        }
        Command::EditThread { id, content } => {
            let thread = threads::edit(state, id, &content).await?;
            printer.emit(&thread, |t| render::thread_saved("Updated", t))
        }
        Command::DeleteThread { id } => {
            threads::delete(state, id).await?;
            printer.emit(&json!({ "deleted_thread": id }), |_| {
                format!("Deleted thread #{id}")
            })
        }
        Command::Comment { thread_id, content } => {
            let posted = comments::create(state, thread_id, &content).await?;
            printer.emit(&posted, render::comment_posted)
        }
        Command::EditComment { id, content } => {
            let comment = comments::edit(state, id, &content).await?;
            printer.emit(&comment, |c| format!("Updated comment {}", c.id))
        }
        Command::DeleteComment { id, thread, page } => {
            let deleted = comments::delete(state, id, thread.map(|t| (t, page))).await?;
            printer.emit(&deleted, render::comment_deleted)
        }
    }
}
