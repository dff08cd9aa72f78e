/// Command-line arguments
use clap::{Parser, Subcommand};
use encore_preferences::ThemeMode;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "encore")]
#[command(about = "Encore playlist, theme and profile tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "ENCORE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Edit the playlist with undo/redo
    Playlist {
        #[command(subcommand)]
        action: PlaylistAction,
    },
    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Sign in or out
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Validate and cache the profile form
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Check locations against points of interest
    Geofence {
        #[command(subcommand)]
        action: GeofenceAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum PlaylistAction {
    /// Add a track
    Add {
        title: String,
        /// Cover image URL (a placeholder is used when omitted)
        #[arg(long)]
        cover: Option<String>,
    },
    /// Remove a track by id
    Remove { id: String },
    /// Remove every track
    Clear,
    /// Revert the last change
    Undo,
    /// Reapply the last undone change
    Redo,
    /// Print the playlist
    List {
        /// Print the full history as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch to light, dark, or custom
    Mode { mode: ThemeMode },
    /// Set the accent color (#RRGGBB)
    Accent { color: String },
    /// Set the background color (#RRGGBB)
    Background { color: String },
    /// Set the text color (#RRGGBB)
    Text { color: String },
    /// Restore the default theme
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SessionAction {
    /// Print whether a user is signed in
    Status,
    /// Sign in
    SignIn {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in
    SignUp {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    SignOut,
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Validate the profile form; missing fields come from the cached draft
    Validate {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        /// Cache the draft if invalid, submit it if valid
        #[arg(long)]
        save: bool,
    },
    /// Print the cached draft
    Draft,
    /// Discard the cached draft
    Clear,
}

#[derive(Debug, Subcommand)]
pub enum GeofenceAction {
    /// Walk a path of `<lat> <lon>` pairs and report enter/exit events
    Check {
        #[arg(required = true, num_args = 2.., allow_negative_numbers = true)]
        coordinates: Vec<f64>,
    },
    /// List the configured points of interest
    Points,
}
