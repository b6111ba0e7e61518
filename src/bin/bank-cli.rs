use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "bank-cli")]
#[command(about = "Command-line client for the bank account service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a new account with a zero balance
    Create {
        #[arg(long)]
        owner: String,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// Show one account
    Get { id: i64 },
    /// List a page of accounts
    List {
        #[arg(long, default_value_t = 1)]
        page_id: i64,
        #[arg(long, default_value_t = 5)]
        page_size: i64,
    },
    /// Set the balance of an account
    Update {
        id: i64,
        #[arg(long, allow_negative_numbers = true)]
        balance: i64,
    },
    /// Delete an account
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    // The service answers reads with 302; do not follow it as a redirect.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    let base = cli.url.trim_end_matches('/');

    let request = match cli.command {
        Commands::Create { owner, currency } => client
            .request(Method::POST, format!("{}/accounts", base))
            .json(&json!({ "owner": owner, "currency": currency })),
        Commands::Get { id } => client.get(format!("{}/accounts/{}", base, id)),
        Commands::List { page_id, page_size } => client
            .get(format!("{}/accounts", base))
            .query(&[("page_id", page_id), ("page_size", page_size)]),
        Commands::Update { id, balance } => client
            .request(Method::PUT, format!("{}/accounts", base))
            .json(&json!({ "id": id, "balance": balance })),
        Commands::Delete { id } => client.delete(format!("{}/accounts/{}", base, id)),
    };

    print_response(request.send().await?).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if status.is_client_error() || status.is_server_error() {
        eprintln!("Error: service returned status {}", status);
        eprintln!("{}", rendered);
        std::process::exit(1);
    }

    println!("{} {}", status.as_u16(), rendered);
    Ok(())
}
