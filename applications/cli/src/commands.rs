/// Command handlers
///
/// Handlers write their user-facing output to `out`; diagnostics go through
/// `tracing`.
use crate::cli::{
    Command, GeofenceAction, PlaylistAction, ProfileAction, SessionAction, ThemeAction,
};
use crate::config::{EncoreConfig, StorageBackend};
use crate::error::{CliError, Result};
use encore_core::{KeyValueStore, TrackId};
use encore_geofence::{Coordinate, GeofenceEvent, GeofenceMonitor};
use encore_playlist::PlaylistHistoryStore;
use encore_preferences::{
    PreferencesError, ProfileDraft, ProfileDraftCache, Session, ThemeCommand, ThemeStore,
};
use encore_storage::{FileStore, MemoryStore, SqliteStore};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

/// Open the key-value backend selected in `config`
pub async fn open_store(config: &EncoreConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::File => {
            info!(path = %config.storage.path.display(), "Using file storage");
            Arc::new(FileStore::new(config.storage.path.clone()))
        }
        StorageBackend::Sqlite => {
            info!(url = %config.storage.database_url, "Using SQLite storage");
            Arc::new(SqliteStore::connect(&config.storage.database_url).await?)
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; nothing will be kept after exit");
            Arc::new(MemoryStore::new())
        }
    };
    Ok(store)
}

/// Configuration plus an open backend
pub struct App {
    config: EncoreConfig,
    store: Arc<dyn KeyValueStore>,
}

impl App {
    pub fn new(config: EncoreConfig, store: Arc<dyn KeyValueStore>) -> Self {
        Self { config, store }
    }

    pub async fn run(&self, command: Command, out: &mut impl Write) -> Result<()> {
        match command {
            Command::Playlist { action } => self.playlist(action, out).await,
            Command::Theme { action } => self.theme(action, out).await,
            Command::Session { action } => self.session(action, out).await,
            Command::Profile { action } => self.profile(action, out).await,
            Command::Geofence { action } => self.geofence(action, out),
        }
    }

    async fn playlist(&self, action: PlaylistAction, out: &mut impl Write) -> Result<()> {
        let mut playlist =
            PlaylistHistoryStore::restore(Arc::clone(&self.store), self.config.history_config())
                .await;

        let result = apply_playlist_action(&mut playlist, action, out);

        // Queued writes land even if printing failed
        playlist.flush().await;
        if playlist.failed_writes() > 0 {
            warn!(
                failed = playlist.failed_writes(),
                "Some playlist snapshots were not saved"
            );
        }

        result
    }

    async fn theme(&self, action: ThemeAction, out: &mut impl Write) -> Result<()> {
        let mut theme = ThemeStore::restore(Arc::clone(&self.store), &self.config.theme.key).await;

        let command = match action {
            ThemeAction::Show => None,
            ThemeAction::Mode { mode } => Some(ThemeCommand::SetMode(mode)),
            ThemeAction::Accent { color } => Some(ThemeCommand::SetAccent(color)),
            ThemeAction::Background { color } => Some(ThemeCommand::SetBackground(color)),
            ThemeAction::Text { color } => Some(ThemeCommand::SetText(color)),
            ThemeAction::Reset => Some(ThemeCommand::Reset),
        };

        if let Some(command) = command {
            theme.dispatch(command).await?;
        }

        let state = theme.state();
        writeln!(out, "mode:       {}", state.mode)?;
        writeln!(out, "accent:     {}", state.custom_accent)?;
        writeln!(out, "background: {}", state.custom_background)?;
        writeln!(out, "text:       {}", state.custom_text)?;
        Ok(())
    }

    async fn session(&self, action: SessionAction, out: &mut impl Write) -> Result<()> {
        let session = Session::new(Arc::clone(&self.store));

        match action {
            SessionAction::Status => {}
            SessionAction::SignIn { email, password } => session.sign_in(&email, &password).await?,
            SessionAction::SignUp {
                email,
                name,
                password,
            } => session.sign_up(&email, &name, &password).await?,
            SessionAction::SignOut => session.sign_out().await?,
        }

        let status = if session.is_signed_in().await {
            "signed in"
        } else {
            "signed out"
        };
        writeln!(out, "{status}")?;
        Ok(())
    }

    async fn profile(&self, action: ProfileAction, out: &mut impl Write) -> Result<()> {
        let cache = ProfileDraftCache::new(Arc::clone(&self.store));

        match action {
            ProfileAction::Validate {
                username,
                email,
                genre,
                save,
            } => {
                let cached = cache.load().await;
                let draft = ProfileDraft::new(
                    username.unwrap_or(cached.username),
                    email.unwrap_or(cached.email),
                    genre.unwrap_or(cached.genre),
                );

                if !save {
                    let errors = draft.validate();
                    if !errors.is_empty() {
                        return Err(PreferencesError::Validation(errors).into());
                    }
                    writeln!(out, "Profile is valid")?;
                    return Ok(());
                }

                match cache.submit(draft.clone()).await {
                    Ok(profile) => {
                        writeln!(out, "Profile saved for {}", profile.username)?;
                        Ok(())
                    }
                    Err(e @ PreferencesError::Validation(_)) => {
                        cache.save(&draft).await?;
                        info!("Kept invalid profile as a draft");
                        Err(e.into())
                    }
                    Err(e) => Err(e.into()),
                }
            }
            ProfileAction::Draft => {
                let draft = cache.load().await;
                serde_json::to_writer_pretty(&mut *out, &draft)?;
                writeln!(out)?;
                Ok(())
            }
            ProfileAction::Clear => {
                cache.clear().await?;
                writeln!(out, "Cleared profile draft")?;
                Ok(())
            }
        }
    }

    fn geofence(&self, action: GeofenceAction, out: &mut impl Write) -> Result<()> {
        let points = self.config.geofence.points.clone();

        match action {
            GeofenceAction::Check { coordinates } => {
                if coordinates.len() % 2 != 0 {
                    return Err(CliError::InvalidInput(
                        "coordinates must be given as <lat> <lon> pairs".to_string(),
                    ));
                }

                let mut monitor = GeofenceMonitor::new(points);
                for pair in coordinates.chunks_exact(2) {
                    let location = Coordinate::new(pair[0], pair[1]);
                    for event in monitor.evaluate(location) {
                        match event {
                            GeofenceEvent::Entered {
                                title, distance_m, ..
                            } => writeln!(out, "entered {title} ({distance_m:.0} m)")?,
                            GeofenceEvent::Exited {
                                title, distance_m, ..
                            } => writeln!(out, "exited {title} ({distance_m:.0} m)")?,
                        }
                    }
                }
                Ok(())
            }
            GeofenceAction::Points => {
                for point in &points {
                    writeln!(
                        out,
                        "{}\t{}\t{:.6},{:.6}\t{} m\t{}",
                        point.id,
                        point.title,
                        point.coordinate.latitude,
                        point.coordinate.longitude,
                        point.radius_m,
                        point.description
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn apply_playlist_action(
    playlist: &mut PlaylistHistoryStore,
    action: PlaylistAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        PlaylistAction::Add { title, cover } => {
            let id = playlist.add_track(&title, cover.as_deref())?;
            writeln!(out, "Added {id}")?;
        }
        PlaylistAction::Remove { id } => {
            let id = TrackId::new(id);
            if !playlist.present().iter().any(|t| t.id == id) {
                warn!(id = %id, "No track with this id; recording an unchanged snapshot");
            }
            playlist.remove_track(&id);
            writeln!(out, "Removed {id}")?;
        }
        PlaylistAction::Clear => {
            playlist.clear();
            writeln!(out, "Cleared playlist")?;
        }
        PlaylistAction::Undo => {
            let message = if playlist.undo() { "Undone" } else { "Nothing to undo" };
            writeln!(out, "{message}")?;
        }
        PlaylistAction::Redo => {
            let message = if playlist.redo() { "Redone" } else { "Nothing to redo" };
            writeln!(out, "{message}")?;
        }
        PlaylistAction::List { json: true } => {
            serde_json::to_writer_pretty(&mut *out, playlist.state())?;
            writeln!(out)?;
        }
        PlaylistAction::List { json: false } => print_playlist(playlist, out)?,
    }
    Ok(())
}

fn print_playlist(playlist: &PlaylistHistoryStore, out: &mut impl Write) -> Result<()> {
    if playlist.present().is_empty() {
        writeln!(out, "(empty playlist)")?;
    }
    for (i, track) in playlist.present().iter().enumerate() {
        writeln!(out, "{:>3}. {}  [{}]", i + 1, track.title, track.id)?;
    }
    writeln!(
        out,
        "undo: {} step(s), redo: {} step(s)",
        playlist.past_len(),
        playlist.future_len()
    )?;
    Ok(())
}
