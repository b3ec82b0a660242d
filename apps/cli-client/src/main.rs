use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use clap::{Parser, Subcommand};
use client_sdk::OptimizerClient;
use common::{DEFAULT_SERVER_URL, IoPriority, SpeedRequirement, TaskType};
use form_core::{FieldChange, FormView, SubmissionForm};
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

type WebForm = SubmissionForm<OptimizerClient>;

#[derive(Clone)]
struct WebState {
    form: Arc<WebForm>,
}

#[derive(Debug, Parser)]
#[command(name = "storopt")]
#[command(about = "Client for the storage tuning optimizer")]
struct Cli {
    #[arg(long, env = "STOROPT_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server_url: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fill the form from flags, submit it once and print the outcome
    Submit {
        /// e.g. 500M, 1G
        #[arg(long)]
        data_size: Option<String>,
        /// e.g. 70/30
        #[arg(long)]
        read_write_ratio: Option<String>,
        /// 순차 | 랜덤
        #[arg(long)]
        task_type: Option<TaskType>,
        /// 고속 | 보통 | 저속
        #[arg(long)]
        speed_requirement: Option<SpeedRequirement>,
        #[arg(long)]
        cache_usage: bool,
        /// 처리량 우선 | 지연 시간 최소화
        #[arg(long)]
        io_priority: Option<IoPriority>,
        /// Print the form view as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Host the form page for a browser
    ServeWeb {
        #[arg(long, default_value = "127.0.0.1:8081")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let form = SubmissionForm::new(OptimizerClient::new(&cli.server_url));

    match cli.command {
        Commands::Submit {
            data_size,
            read_write_ratio,
            task_type,
            speed_requirement,
            cache_usage,
            io_priority,
            json,
        } => {
            let changes = [
                data_size.map(FieldChange::DataSize),
                read_write_ratio.map(FieldChange::ReadWriteRatio),
                task_type.map(FieldChange::TaskType),
                speed_requirement.map(FieldChange::SpeedRequirement),
                cache_usage.then_some(FieldChange::CacheUsage(true)),
                io_priority.map(FieldChange::IoPriority),
            ];
            for change in changes.into_iter().flatten() {
                form.update(change);
            }

            form.submit().await;
            print_view(&form.view(), json)?;
        }
        Commands::ServeWeb { bind } => {
            let bind_addr: SocketAddr = bind
                .parse()
                .with_context(|| format!("invalid bind address {bind}"))?;
            let state = WebState {
                form: Arc::new(form),
            };

            let app = Router::new()
                .route("/", get(web_index).post(web_form_submit))
                .route("/outcome", post(web_outcome))
                .route("/api/view", get(web_view))
                .route("/api/field", post(web_field))
                .route("/api/submit", post(web_submit))
                .route(
                    "/api/ping",
                    get(|| async {
                        Json(serde_json::json!({
                            "ok": true,
                            "service": "storopt-web"
                        }))
                    }),
                )
                .with_state(state);

            info!(%bind_addr, server_url = %cli.server_url, "web interface listening");
            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn print_view(view: &FormView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print!("{view}");
    }
    Ok(())
}

/// Browser form post. An unchecked checkbox is simply absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WebFormSubmission {
    data_size: String,
    read_write_ratio: String,
    task_type: TaskType,
    speed_requirement: SpeedRequirement,
    cache_usage: Option<String>,
    io_priority: IoPriority,
}

impl WebFormSubmission {
    fn into_changes(self) -> [FieldChange; 6] {
        [
            FieldChange::DataSize(self.data_size),
            FieldChange::ReadWriteRatio(self.read_write_ratio),
            FieldChange::TaskType(self.task_type),
            FieldChange::SpeedRequirement(self.speed_requirement),
            FieldChange::CacheUsage(self.cache_usage.is_some()),
            FieldChange::IoPriority(self.io_priority),
        ]
    }
}

async fn web_index(State(state): State<WebState>) -> Html<String> {
    Html(web_ui::app_html(&state.form.view()))
}

async fn web_form_submit(
    State(state): State<WebState>,
    Form(submission): Form<WebFormSubmission>,
) -> Html<String> {
    for change in submission.into_changes() {
        state.form.update(change);
    }
    state.form.submit().await;
    Html(web_ui::app_html(&state.form.view()))
}

/// In-page submit: settles the request and answers only the outcome fragment.
async fn web_outcome(State(state): State<WebState>) -> Html<String> {
    state.form.submit().await;
    Html(web_ui::outcome_html(&state.form.view()))
}

async fn web_view(State(state): State<WebState>) -> Json<FormView> {
    Json(state.form.view())
}

async fn web_field(
    State(state): State<WebState>,
    Json(change): Json<FieldChange>,
) -> Json<FormView> {
    state.form.update(change);
    Json(state.form.view())
}

async fn web_submit(State(state): State<WebState>) -> Json<FormView> {
    state.form.submit().await;
    Json(state.form.view())
}
