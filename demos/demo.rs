//! Walk through every MailNuggets operation against a live account.
//!
//! Credentials come from `MAILNUGGETS_API_USER_ID`, `MAILNUGGETS_API_KEY` and
//! `MAILNUGGETS_API_SECRET_KEY`. Set `RUST_LOG=mailnuggets_client=debug` to see
//! the (redacted) request URLs.
//!
//! Pass an email id as the first argument to also repost that email.

use mailnuggets_client::{Client, Response};
use tracing_subscriber::EnvFilter;

fn show(label: &str, response: &Response) {
    println!("\n{label} (HTTP {})", response.status());
    println!("{}", "-".repeat(50));
    match response.text() {
        Ok(text) => println!("{text}"),
        Err(e) => println!("<{e}>"),
    }
    if response.is_remote_error() {
        println!("   ⚠️  the service reported an error");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::from_env()?;

    show("All throwaways", &client.list_all_throwaways().await?);

    let name = format!("demo{}", rand::random::<u32>());
    show("Add throwaway", &client.add_throwaway(Some(&name)).await?);
    show("Lookup throwaway", &client.lookup_throwaway(&name).await?);

    show("Emails from the last 48 hours", &client.list_emails(None).await?);

    if let Some(email_id) = std::env::args().nth(1) {
        show("Repost email", &client.repost_email(&email_id).await?);
    }

    show("Remove throwaway", &client.remove_throwaway(&name).await?);

    Ok(())
}
