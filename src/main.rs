//! quest-tour command line.
//!
//! ```text
//!   list / show           browse quests from the routes API
//!   start / visit         walk a quest; visits are geofenced (50 m)
//!   progress / complete   completion requires every point visited
//!   login / logout        admin session (password, TTL)
//!   edit                  reorder, insert, delete, optimize, rename; --save PUTs
//! ```
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use quest_tour::api::{self, RoutesClient};
use quest_tour::auth::{AdminGate, FileSessionStore};
use quest_tour::clock::{Clock, SystemClock};
use quest_tour::config::{load_or_default, QuestConfig};
use quest_tour::geo::Geofence;
use quest_tour::model::{Coordinates, PointId, Quest, QuestId};
use quest_tour::observability::{init_logging, init_metrics};
use quest_tour::progress::{ProgressStore, QuestProgress};
use quest_tour::route::{EditOp, QuestDetails, RouteEditor};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "quest-tour")]
#[command(about = "Browse, walk and edit location-based quests", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available quests
    List,
    /// Show a quest with its ordered points
    Show { id: String },
    /// Start a quest, discarding earlier progress
    Start { id: String },
    /// Visit a point from the given position
    Visit {
        id: String,
        point: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
    },
    /// Show progress through a quest
    Progress { id: String },
    /// Complete a quest once every point is visited
    Complete { id: String },
    /// Unlock route editing with the admin password
    Login {
        /// Password; prompted on stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Leave route editing mode
    Logout,
    /// Show admin session status
    Session,
    /// Edit a quest's route (requires login)
    ///
    /// Operations use 1-based positions: move:FROM:TO, up:POS, down:POS,
    /// delete:POS, delete-point:ID, relocate:ID:LAT:LNG,
    /// insert:POS:ID:LAT:LNG:NAME, optimize
    Edit {
        id: String,
        ops: Vec<EditOp>,
        /// New quest name
        #[arg(long)]
        name: Option<String>,
        /// New quest description
        #[arg(long)]
        description: Option<String>,
        /// New cover image URL; an empty value clears it
        #[arg(long)]
        image_url: Option<String>,
        /// PUT the edited route to the backend
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> CliResult {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability);

    tracing::debug!(
        base_url = %config.api.base_url,
        auth_mode = ?config.api.auth_mode,
        "Configuration loaded"
    );

    let metrics = init_metrics(&config.observability);
    let client = RoutesClient::from_config(&config.api)?;

    let result = run(cli.command, &config, &client).await;

    if let Some(sink) = metrics {
        if let Err(e) = sink.flush() {
            tracing::warn!(path = ?sink.path(), error = %e, "Failed to write metrics snapshot");
        }
    }
    result
}

async fn run(command: Commands, config: &QuestConfig, client: &RoutesClient) -> CliResult {
    match command {
        Commands::List => list(config, client).await,
        Commands::Show { id } => show(config, client, &QuestId::new(id)).await,
        Commands::Start { id } => start(config, client, &QuestId::new(id)).await,
        Commands::Visit { id, point, lat, lng } => {
            let location = match (lat, lng) {
                (Some(lat), Some(lng)) => {
                    let coords = Coordinates::new(lat, lng);
                    coords.validate()?;
                    Some(coords)
                }
                _ => None,
            };
            visit(config, client, &QuestId::new(id), &PointId::new(point), location).await
        }
        Commands::Progress { id } => progress(config, client, &QuestId::new(id)).await,
        Commands::Complete { id } => complete(config, client, &QuestId::new(id)).await,
        Commands::Login { password } => login(config, password),
        Commands::Logout => {
            admin_gate(config).logout()?;
            print_json(&json!({ "authenticated": false }))
        }
        Commands::Session => session(config),
        Commands::Edit {
            id,
            ops,
            name,
            description,
            image_url,
            save,
        } => {
            let details = DetailEdits {
                name,
                description,
                image_url,
            };
            edit(config, client, &QuestId::new(id), &ops, details, save).await
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn admin_gate(config: &QuestConfig) -> AdminGate<FileSessionStore> {
    AdminGate::from_config(FileSessionStore::new(&config.admin.session_path), &config.admin)
}

fn quest_points_json(config: &QuestConfig, quest: &Quest) -> Vec<serde_json::Value> {
    let media = config.api.media_base();
    quest
        .points
        .iter()
        .map(|rp| {
            json!({
                "order": rp.order,
                "id": rp.point.id,
                "name": rp.point.name,
                "description": rp.point.description,
                "latitude": rp.point.latitude,
                "longitude": rp.point.longitude,
                "intermediate": rp.point.is_intermediate,
                "photo": rp.point.photo_url(media),
                "audio": rp.point.audio_url(media),
                "video": rp.point.video_url(media),
            })
        })
        .collect()
}

async fn list(config: &QuestConfig, client: &RoutesClient) -> CliResult {
    let quests = api::load_catalog(client, config.fallback.use_sample_data).await?;
    let summaries: Vec<_> = quests
        .iter()
        .map(|q| {
            json!({
                "id": q.id,
                "name": q.name,
                "description": q.description,
                "points": q.visitable_count(),
                "length_km": (q.route_length_km() * 100.0).round() / 100.0,
                "cover": q.cover_image(config.api.media_base(), &config.fallback.default_image),
            })
        })
        .collect();
    print_json(&summaries)
}

async fn show(config: &QuestConfig, client: &RoutesClient, id: &QuestId) -> CliResult {
    let quest = api::load_quest(client, id, config.fallback.use_sample_data).await?;
    print_json(&json!({
        "id": quest.id,
        "name": quest.name,
        "description": quest.description,
        "cover": quest.cover_image(config.api.media_base(), &config.fallback.default_image),
        "length_km": (quest.route_length_km() * 100.0).round() / 100.0,
        "points": quest_points_json(config, &quest),
    }))
}

fn progress_store(config: &QuestConfig) -> ProgressStore {
    ProgressStore::new(&config.progress.state_dir)
}

/// Resume saved progress, or start fresh when there is none.
async fn load_progress(config: &QuestConfig, client: &RoutesClient, id: &QuestId) -> Result<QuestProgress, Box<dyn Error>> {
    let quest = api::load_quest(client, id, config.fallback.use_sample_data).await?;
    let geofence = Geofence::new(config.geofence.visit_radius_km);
    let progress = match progress_store(config).load(id)? {
        Some(snapshot) => QuestProgress::restore(quest, geofence, snapshot)?,
        None => QuestProgress::start(quest, geofence, SystemClock.now_ms()),
    };
    Ok(progress)
}

fn progress_json(progress: &QuestProgress) -> serde_json::Value {
    let snapshot = progress.snapshot();
    json!({
        "quest_id": snapshot.quest_id,
        "visited": snapshot.visited,
        "visited_count": progress.visited_count(),
        "total": progress.total_points(),
        "can_complete": progress.can_complete(),
    })
}

async fn start(config: &QuestConfig, client: &RoutesClient, id: &QuestId) -> CliResult {
    let quest = api::load_quest(client, id, config.fallback.use_sample_data).await?;
    let progress = QuestProgress::start(
        quest,
        Geofence::new(config.geofence.visit_radius_km),
        SystemClock.now_ms(),
    );
    progress_store(config).save(&progress.snapshot())?;
    eprintln!("Location access is required to visit points; pass --lat/--lng to `visit`.");
    print_json(&progress_json(&progress))
}

async fn visit(
    config: &QuestConfig,
    client: &RoutesClient,
    id: &QuestId,
    point: &PointId,
    location: Option<Coordinates>,
) -> CliResult {
    let mut progress = load_progress(config, client, id).await?;
    let outcome = progress.visit(point, location)?;
    progress_store(config).save(&progress.snapshot())?;
    print_json(&json!({
        "result": outcome,
        "message": outcome.message(),
        "progress": progress_json(&progress),
    }))
}

async fn progress(config: &QuestConfig, client: &RoutesClient, id: &QuestId) -> CliResult {
    let progress = load_progress(config, client, id).await?;
    print_json(&progress_json(&progress))
}

async fn complete(config: &QuestConfig, client: &RoutesClient, id: &QuestId) -> CliResult {
    let progress = load_progress(config, client, id).await?;
    let summary = progress.complete(SystemClock.now_ms())?;
    progress_store(config).remove(id)?;
    print_json(&json!({
        "summary": summary,
        "elapsed": summary.elapsed_hms(),
    }))
}

fn read_password() -> io::Result<String> {
    eprint!("Admin password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn login(config: &QuestConfig, password: Option<String>) -> CliResult {
    let gate = admin_gate(config);
    if !gate.check_session()? {
        let password = match password {
            Some(password) => password,
            None => read_password()?,
        };
        gate.login(&password)?;
    }
    session(config)
}

fn session(config: &QuestConfig) -> CliResult {
    let remaining = admin_gate(config).remaining()?;
    print_json(&json!({
        "authenticated": remaining.is_some(),
        "expires_in_secs": remaining.map(|d| d.as_secs()),
    }))
}

/// Quest detail overrides given on the command line.
struct DetailEdits {
    name: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
}

impl DetailEdits {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.image_url.is_none()
    }

    fn apply_to(self, current: &QuestDetails) -> QuestDetails {
        QuestDetails {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            description: self.description.unwrap_or_else(|| current.description.clone()),
            image_url: self.image_url.or_else(|| current.image_url.clone()),
        }
    }
}

async fn edit(
    config: &QuestConfig,
    client: &RoutesClient,
    id: &QuestId,
    ops: &[EditOp],
    details: DetailEdits,
    save: bool,
) -> CliResult {
    admin_gate(config).require_session()?;

    let quest = client.get_quest(id).await?;
    let mut editor = RouteEditor::new(quest)?;
    if !details.is_empty() {
        let updated = details.apply_to(editor.details());
        editor.set_details(updated)?;
    }
    for op in ops {
        op.apply(&mut editor)?;
    }

    let pending = editor.has_changes();
    if save {
        editor.save(client).await?;
    } else if pending {
        eprintln!("Dry run: pass --save to store these changes.");
    }

    let payload = editor.payload();
    print_json(&json!({
        "quest_id": payload.id,
        "name": payload.name,
        "description": payload.description,
        "image_url": payload.image_url,
        "changed": pending,
        "saved": save,
        "points": quest_points_json(config, &payload),
    }))
}
