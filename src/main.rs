use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

use godo_organiser::{
    config::Config,
    forms::{from_event, EventWizard, FieldErrors, QuickCreateDraft, WizardStep},
    models::{
        draft::EventDraft,
        payload::PatchEventDto,
        user::{LoginRequest, RegisterOrganiserRequest},
    },
    services::SubmissionOutcome,
    AppError, AppState,
};

#[derive(Parser)]
#[command(name = "godo")]
#[command(about = "Go.Do organiser client: create and manage events")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(long)]
        username: String,
        /// Falls back to GODO_PASSWORD
        #[arg(long, env = "GODO_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show who the stored token belongs to
    Whoami,
    /// Register a new organiser account
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "GODO_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        business_name: String,
        #[arg(long)]
        organisation_number: String,
    },
    /// Run the create-event wizard over a JSON draft and submit it
    Create {
        #[arg(long)]
        draft: PathBuf,
        /// Print the request body instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Write an existing event as an editable JSON draft
    Export {
        id: String,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Save changes to an existing event
    Edit {
        id: String,
        /// Draft to send; without it the stored event is re-validated and resent
        #[arg(long)]
        draft: Option<PathBuf>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Change selected fields of an existing event
    Patch {
        id: String,
        /// JSON object with only the fields to change (camelCase keys)
        #[arg(long)]
        changes: PathBuf,
    },
    /// Create an always-open place from a single JSON form
    QuickCreate {
        #[arg(long)]
        form: PathBuf,
    },
    /// List your active events
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Delete one of your events
    Delete { id: String },
    /// Browse the mock events of the app preview
    #[cfg(feature = "preview")]
    Preview {
        /// Category codes (comma-separated)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<u32>,
        #[arg(long, value_delimiter = ',')]
        subcategories: Vec<u32>,
        /// Tag codes; every tag must match
        #[arg(long, value_delimiter = ',')]
        tags: Vec<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Лог идёт в stderr, stdout остаётся для вывода команд
    let json_logs = config.app.json_logs;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let cli = Cli::parse();
    info!("Go.Do organiser client ({})", config.app.environment);

    let state = AppState::new(config)?;

    match cli.command {
        Commands::Login { username, password } => {
            state
                .api
                .login(&LoginRequest { username, password })
                .await
                .context("Login failed")?;
            println!("Signed in as {}", state.session.user_id()?);
        }
        Commands::Logout => {
            state.session.logout()?;
            println!("Signed out");
        }
        Commands::Whoami => match state.session.user_id() {
            Ok(id) => println!("{}", id),
            Err(e) => {
                warn!("No usable session: {}", e);
                println!("Not signed in");
            }
        },
        Commands::Register {
            username,
            email,
            password,
            full_name,
            phone,
            business_name,
            organisation_number,
        } => {
            let request = RegisterOrganiserRequest {
                username,
                email,
                password,
                full_name,
                phone_number: phone,
                business_name,
                organisation_number,
            };
            request
                .validate()
                .map_err(|e| anyhow!("Validation failed: {}", e))?;
            state.api.register_organiser(&request).await?.into_result()?;
            println!("Account created, you can sign in now");
        }
        Commands::Create { draft, dry_run } => {
            let draft: EventDraft = read_json(&draft)?;
            let mut wizard = EventWizard::with_draft(draft);
            walk_steps(&mut wizard)?;
            let payload = wizard.finish().map_err(field_error)?;

            if dry_run {
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }
            report(state.dispatcher().submit(&payload).await)?;
        }
        Commands::Export { id, out } => {
            let event = state.api.get_event(&id).await?.into_result()?;
            let json = serde_json::to_string_pretty(&from_event(&event))?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Cannot write {}", path.display()))?;
                    println!("Draft written to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Edit { id, draft, dry_run } => {
            let event = state.api.get_event(&id).await?.into_result()?;
            let mut wizard = EventWizard::for_edit(&event);
            if let Some(path) = draft {
                *wizard.draft_mut() = read_json(&path)?;
            }
            walk_steps(&mut wizard)?;
            let payload = wizard.finish().map_err(field_error)?;

            if dry_run {
                println!("{}", serde_json::to_string_pretty(&payload)?);
                return Ok(());
            }
            report(state.dispatcher().submit_update(&id, &payload).await)?;
        }
        Commands::Patch { id, changes } => {
            let patch: PatchEventDto = read_json(&changes)?;
            report(state.dispatcher().submit_patch(&id, &patch).await)?;
        }
        Commands::QuickCreate { form } => {
            let form: QuickCreateDraft = read_json(&form)?;
            form.validate()
                .map_err(|e| anyhow!("Validation failed: {}", e))?;
            report(SubmissionOutcome::from_response(
                state.api.quick_create_event(&form.to_payload()).await,
            ))?;
        }
        Commands::List { page } => {
            let page = state.dashboard().my_events(page).await?;
            if page.events.is_empty() {
                println!("No active events");
            }
            for event in &page.events {
                println!(
                    "{}  {}  {}  {}",
                    event.id,
                    event.start_date.as_deref().unwrap_or("-"),
                    event.city,
                    event.title
                );
            }
            println!(
                "Page {} of {} ({} events)",
                page.page_number,
                page.total_pages.max(1),
                page.total_count
            );
        }
        Commands::Delete { id } => {
            state.dashboard().delete(&id).await?;
            println!("Event {} deleted", id);
        }
        #[cfg(feature = "preview")]
        Commands::Preview {
            categories,
            subcategories,
            tags,
        } => {
            use godo_organiser::preview::{filter_mock_events, MockFilter};

            if !state.config.features.enable_preview {
                bail!("Preview is disabled (ENABLE_PREVIEW=false)");
            }
            let result = filter_mock_events(&MockFilter {
                category_codes: categories,
                subcategory_codes: subcategories,
                tag_codes: tags,
                page_size: Some(state.config.features.preview_page_size),
            });
            for event in &result.items {
                let tags: Vec<&str> = event.tags.iter().map(|t| t.name.as_str()).collect();
                println!(
                    "{}  {}  {} [{}]",
                    event.start_date.as_deref().unwrap_or("-"),
                    event.title,
                    event.city,
                    tags.join(", ")
                );
            }
            println!("{} of {} events", result.items.len(), result.total_count);
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a valid draft", path.display()))
}

/// Проходит шаги мастера по порядку до шага подтверждения.
fn walk_steps(wizard: &mut EventWizard) -> anyhow::Result<()> {
    while wizard.step() != WizardStep::LAST {
        let step = wizard.step();
        if let Err(errors) = wizard.advance() {
            eprintln!("Step \"{}\" needs attention:", step);
            return Err(field_error(errors));
        }
        println!("✓ {}", step);
    }
    Ok(())
}

fn field_error(errors: FieldErrors) -> anyhow::Error {
    for (field, message) in errors.iter() {
        eprintln!("  {}: {}", field, message);
    }
    AppError::from(errors).into()
}

fn report(outcome: SubmissionOutcome) -> anyhow::Result<()> {
    match outcome {
        SubmissionOutcome::Succeeded { data } => {
            let id = data
                .as_ref()
                .and_then(|d| d.get("id"))
                .and_then(|v| v.as_str())
                .map(str::to_string);
            match id {
                Some(id) => println!("Saved event {}", id),
                None => println!("Event saved"),
            }
            Ok(())
        }
        SubmissionOutcome::Failed { kind, message } => {
            error!("Submission failed ({:?})", kind);
            bail!(message)
        }
    }
}
