use anyhow::Context;
use clap::{Parser, Subcommand};
use counter_types::{AuthUrlResponse, Counter, MessageResponse};
use reqwest::{Client, Response};

#[derive(Parser)]
#[command(name = "counter-cli")]
#[command(about = "CLI for reading and adjusting counters via the backend API")]
#[command(
    long_about = "A command-line interface for interacting with the counter backend server.\n\n\
    Supports reading, creating, incrementing and decrementing per-email counters,\n\
    and printing the Google consent URL used to log in."
)]
struct Cli {
    /// Backend server URL to connect to.
    ///
    /// The CLI will make HTTP requests to this server's API endpoints.
    #[arg(
        short,
        long,
        default_value = "http://localhost:5000",
        env = "COUNTER_API_URL"
    )]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Google consent URL to open in a browser
    AuthUrl,
    /// Read or adjust the counter stored for an email
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },
}

#[derive(Subcommand)]
enum CounterAction {
    /// Show the counter for an email, if one exists
    ///
    /// Reading never creates a counter.
    Get { email: String },

    /// Create a zeroed counter for an email (no-op if it already exists)
    Create { email: String },

    /// Add one to `count`
    Increment { email: String },

    /// Subtract one from `count`
    Decrement { email: String },

    /// Add one to `mycount`
    MyIncrement { email: String },

    /// Subtract one from `mycount`
    MyDecrement { email: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::AuthUrl => {
            let resp: AuthUrlResponse = ensure_ok(
                client
                    .get(format!("{}/auth/url", cli.base_url))
                    .send()
                    .await?,
            )
            .await?
            .json()
            .await?;
            println!("{}", resp.url);
        }
        Commands::Counter { action } => handle_counter(&client, &cli.base_url, action).await?,
    }

    Ok(())
}

async fn handle_counter(
    client: &Client,
    base_url: &str,
    action: CounterAction,
) -> anyhow::Result<()> {
    let url = format!("{}/api/counter", base_url);

    let (path, email) = match action {
        CounterAction::Get { email } => {
            let counter: Option<Counter> = ensure_ok(
                client
                    .get(format!("{}/{}", url, urlencoding::encode(&email)))
                    .send()
                    .await?,
            )
            .await?
            .json()
            .await?;
            match counter {
                Some(counter) => print_counter(&counter),
                None => println!("No counter for {}.", email),
            }
            return Ok(());
        }
        CounterAction::Create { email } => ("create", email),
        CounterAction::Increment { email } => ("increment", email),
        CounterAction::Decrement { email } => ("decrement", email),
        CounterAction::MyIncrement { email } => ("myincrement", email),
        CounterAction::MyDecrement { email } => ("mydecrement", email),
    };

    let counter: Counter = ensure_ok(
        client
            .post(format!("{}/{}/{}", url, path, urlencoding::encode(&email)))
            .send()
            .await?,
    )
    .await?
    .json()
    .await?;
    print_counter(&counter);

    Ok(())
}

/// Turn a non-2xx response into an error carrying the server's message.
async fn ensure_ok(resp: Response) -> anyhow::Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp
        .json::<MessageResponse>()
        .await
        .map(|body| body.message)
        .unwrap_or_default();
    Err(anyhow::anyhow!("{}", message)).with_context(|| format!("Request failed with {}", status))
}

fn print_counter(counter: &Counter) {
    println!(
        "{}: count={} mycount={}",
        counter.email, counter.count, counter.mycount
    );
}
