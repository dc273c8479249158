//! Message Board CLI
//!
//! Command-line client for a running message board server. It speaks the
//! same GraphQL contract as the browser client: `messages` to read the
//! board and `addMessage` to post.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use message_board::{schema_sdl, Message};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tracing::debug;

const LIST_MESSAGES: &str = "query Messages { messages { id content } }";
const ADD_MESSAGE: &str =
    "mutation AddMessage($content: String!) { addMessage(content: $content) { id content } }";

#[derive(Parser)]
#[command(name = "board")]
#[command(about = "Message Board CLI - read and post messages over GraphQL")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// GraphQL endpoint of the server
    #[arg(
        long,
        global = true,
        env = "MESSAGE_BOARD_URL",
        default_value = "http://localhost:4000/graphql"
    )]
    url: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the GraphQL schema (SDL) without contacting the server
    Schema,

    /// List all messages in order
    List,

    /// Post a new message
    Post {
        /// Message text
        content: String,
    },
}

/// Standard GraphQL response envelope
#[derive(Debug, Deserialize)]
struct GraphQLEnvelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct MessagesData {
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddMessageData {
    add_message: Message,
}

impl<T> GraphQLEnvelope<T> {
    fn into_data(self) -> Result<T> {
        if let Some(error) = self.errors.first() {
            bail!("GraphQL error: {}", error.message);
        }
        self.data.ok_or_else(|| anyhow!("GraphQL response contained no data"))
    }
}

async fn execute<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &str,
    variables: Value,
) -> Result<T> {
    debug!("POST {}", url);
    let response = client
        .post(url)
        .json(&json!({ "query": query, "variables": variables }))
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?
        .error_for_status()?;

    let envelope: GraphQLEnvelope<T> = response
        .json()
        .await
        .context("Server returned an invalid GraphQL response")?;
    envelope.into_data()
}

fn render(message: &Message) -> String {
    format!("#{} {}", message.id(), message.content())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let client = reqwest::Client::new();

    match cli.command {
        Commands::Schema => {
            print!("{}", schema_sdl());
        }

        Commands::List => {
            let data: MessagesData = execute(&client, &cli.url, LIST_MESSAGES, json!({})).await?;
            if data.messages.is_empty() {
                println!("(no messages)");
            }
            for message in &data.messages {
                println!("{}", render(message));
            }
        }

        Commands::Post { content } => {
            // Same presence check the server applies, without the round trip
            Message::validate_content(&content)?;
            let data: AddMessageData =
                execute(&client, &cli.url, ADD_MESSAGE, json!({ "content": content })).await?;
            println!("{}", render(&data.add_message));
        }
    }

    Ok(())
}
