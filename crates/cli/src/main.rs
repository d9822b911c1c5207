mod cli;
mod commands;
mod config;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use toki_mcp::McpClient;

use crate::cli::{
    BigqueryCommand, CliArgs, Command, DashboardsCommand, FirestoreCommand, LookerCommand,
    LooksCommand,
};
use crate::config::CliConfig;
use crate::terminal::Terminal;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();
    let terminal = Terminal::new();

    if let Err(e) = run(&args, &terminal).await {
        error!(error = %e, "Command failed");
        let _ = terminal.print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(args: &CliArgs, terminal: &Terminal) -> Result<()> {
    let config = CliConfig::load(args.config.as_deref()).context("failed to load configuration")?;

    match &args.command {
        Command::Tools { service } => {
            let client = connect(&config, service, args);
            hint(commands::tools::list(&client, terminal).await, &client)
        }

        Command::Bigquery(cmd) => match cmd {
            BigqueryCommand::Query { sql, format } => {
                let client = connect(&config, "bigquery", args);
                hint(
                    commands::bigquery::query(&client, terminal, sql, format).await,
                    &client,
                )
            }
            BigqueryCommand::Tables => {
                let client = connect(&config, "bigquery", args);
                hint(commands::bigquery::tables(&client, terminal).await, &client)
            }
            // Downloads go straight to the export URL, not the MCP endpoint.
            BigqueryCommand::Download { url, output } => {
                commands::bigquery::download(terminal, url, output.as_deref()).await
            }
        },

        Command::Firestore(cmd) => {
            let client = connect(&config, "firestore", args);
            let result = match cmd {
                FirestoreCommand::Get { paths } => {
                    commands::firestore::get(&client, terminal, paths).await
                }
                FirestoreCommand::Add {
                    collection,
                    data,
                    id,
                } => {
                    commands::firestore::add(&client, terminal, collection, data, id.as_deref())
                        .await
                }
                FirestoreCommand::Query {
                    collection,
                    filter,
                    limit,
                } => {
                    commands::firestore::query(
                        &client,
                        terminal,
                        collection,
                        filter.as_deref(),
                        *limit,
                    )
                    .await
                }
                FirestoreCommand::Collections { parent } => {
                    commands::firestore::collections(&client, terminal, parent.as_deref()).await
                }
            };
            hint(result, &client)
        }

        Command::Looker(cmd) => {
            let client = connect(&config, "looker", args);
            let result = match cmd {
                LookerCommand::Models => commands::looker::models(&client, terminal).await,
                LookerCommand::Explore { model, explore } => {
                    commands::looker::explore(&client, terminal, model, explore.as_deref()).await
                }
                LookerCommand::Query {
                    model,
                    explore,
                    fields,
                    filters,
                    sorts,
                    limit,
                    sql,
                    url,
                } => {
                    commands::looker::query(
                        &client,
                        terminal,
                        commands::looker::QueryOpts {
                            model,
                            explore,
                            fields,
                            filters: filters.as_deref(),
                            sorts: sorts.as_deref(),
                            limit: *limit,
                            sql: *sql,
                            url: *url,
                        },
                    )
                    .await
                }
                LookerCommand::Looks(LooksCommand::List { title, limit }) => {
                    commands::looker::looks_list(&client, terminal, title.as_deref(), *limit).await
                }
                LookerCommand::Looks(LooksCommand::Run { look_id }) => {
                    commands::looker::looks_run(&client, terminal, look_id).await
                }
                LookerCommand::Dashboards(DashboardsCommand::List { title, limit }) => {
                    commands::looker::dashboards_list(&client, terminal, title.as_deref(), *limit)
                        .await
                }
                LookerCommand::Dashboards(DashboardsCommand::Create { title, description }) => {
                    commands::looker::dashboards_create(
                        &client,
                        terminal,
                        title,
                        description.as_deref(),
                    )
                    .await
                }
            };
            hint(result, &client)
        }
    }
}

/// Build a client for the resolved service endpoint.
fn connect(config: &CliConfig, service: &str, args: &CliArgs) -> McpClient {
    McpClient::new(&config.resolve_endpoint(service, args.endpoint.as_deref()))
}

/// Attach the endpoint URL to failures so users can tell which server the
/// command was talking to.
fn hint<T>(result: Result<T>, client: &McpClient) -> Result<T> {
    result.with_context(|| format!("using endpoint {}", client.endpoint()))
}
