use std::num::NonZeroU32;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contentfeed::api::{ApiClient, AppActivityApi, CommentsApi, TasksApi, VersionsApi};
use contentfeed::feed::{render_feed, FeedSource, FeedState};
use contentfeed::models::{Marker, Page};

#[derive(Parser)]
#[command(name = "cfeed")]
#[command(about = "Inspect the activity feed of a cloud content file")]
struct Cli {
    /// Log requests at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List app activity on a file
    Activity {
        file_id: String,

        /// Page size; the server default applies when omitted
        #[arg(short, long)]
        limit: Option<NonZeroU32>,

        /// Continue from a marker printed by a previous call
        #[arg(short, long, conflicts_with = "all")]
        marker: Option<String>,

        /// Follow markers until every page is fetched
        #[arg(long)]
        all: bool,
    },
    /// Delete one app activity item from a file
    DeleteActivity { file_id: String, activity_id: String },
    /// Show the merged feed of comments, tasks, versions and app activity
    Feed {
        file_id: String,

        /// Leave app activity out of the feed
        #[arg(long)]
        no_app_activity: bool,
    },
    /// Print the resolved configuration
    Config,
}

/// Initialize tracing on stderr so stdout carries only command output
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "contentfeed=debug,cfeed=debug"
    } else {
        "contentfeed=info,cfeed=info"
    };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let client = ApiClient::from_env();
    let config = client.config().clone();

    match cli.command {
        Commands::Activity {
            file_id,
            limit,
            marker,
            all,
        } => {
            let api = AppActivityApi::new(client);
            let page = if all {
                api.get_all_app_activity(&file_id, limit).await?
            } else {
                let marker = marker.map(Marker::new);
                api.get_app_activity(&file_id, limit, marker.as_ref()).await?
            };
            print_activity_page(&page);
        }
        Commands::DeleteActivity {
            file_id,
            activity_id,
        } => {
            AppActivityApi::new(client)
                .delete_app_activity(&file_id, &activity_id)
                .await?;
            tracing::info!("Deleted app activity {} from file {}", activity_id, file_id);
        }
        Commands::Feed {
            file_id,
            no_app_activity,
        } => {
            let state = load_feed(client, &file_id, !no_app_activity).await?;
            println!("{}", config.file_url(&file_id));
            if state.should_show_empty_state() {
                println!("No activity yet.");
            } else {
                print!("{}", render_feed(&state.collapsed()));
            }
        }
        Commands::Config => {
            let json = serde_json::to_string_pretty(&config.redacted())?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn print_activity_page(page: &Page<contentfeed::models::AppActivityItem>) {
    for item in &page.entries {
        let app = item.app.as_ref().map(|a| a.name.as_str()).unwrap_or("-");
        println!("{}\t{}\t{}\t{}", item.id, item.created_at, app, item.rendered_text);
    }
    println!("total_count: {}", page.total_count);
    if let Some(marker) = &page.marker {
        println!("next marker: {}", marker.as_str());
    }
}

/// Fetch every source concurrently, then build the feed from the results.
async fn load_feed(
    client: ApiClient,
    file_id: &str,
    with_app_activity: bool,
) -> anyhow::Result<FeedState> {
    let comments_api = CommentsApi::new(client.clone());
    let tasks_api = TasksApi::new(client.clone());
    let versions_api = VersionsApi::new(client.clone());
    let activity_api = AppActivityApi::new(client);

    let (comments, tasks, versions, activity) = tokio::join!(
        comments_api.get_comments(file_id),
        tasks_api.get_tasks(file_id),
        versions_api.get_versions(file_id),
        async {
            if with_app_activity {
                Some(activity_api.get_all_app_activity(file_id, None).await)
            } else {
                None
            }
        },
    );

    let mut sources = FeedSource::DEFAULT.to_vec();
    if with_app_activity {
        sources.push(FeedSource::AppActivity);
    }
    let mut state = FeedState::new(&sources);

    state.set_comments(comments.context("Failed to fetch comments")?.entries);
    state.set_tasks(tasks.context("Failed to fetch tasks")?.entries);
    state.set_versions(versions.context("Failed to fetch versions")?.entries);
    if let Some(activity) = activity {
        state.set_app_activity(activity.context("Failed to fetch app activity")?.entries);
    }

    tracing::debug!(items = state.items().len(), "Feed loaded");
    Ok(state)
}
