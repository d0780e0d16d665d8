//! # Users Console
//!
//! Terminal entry point: loads the collection through the REST gateway and
//! renders the projected table once, demonstrating the full stack
//! end to end. Point it at another API with `USERS_API_URL`.

use console_core::telemetry::setup_tracing;
use console_core::{ConsoleError, DialogView, TableBody, TableView};
use std::time::Duration;
use tracing::info;
use users_console::gateway::RestGateway;
use users_console::lifecycle::ConsoleSystem;
use users_console::model::User;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let gateway = RestGateway::from_env();
    info!(base_url = gateway.base_url(), "Starting users console");

    let system = ConsoleSystem::new(gateway);
    system.client.load().await.map_err(|e| e.to_string())?;

    let view = settled_view(&system.client).await.map_err(|e| e.to_string())?;
    render(&view);

    system.shutdown().await?;
    Ok(())
}

/// Poll the projection until the fetch settles. The gateway's own timeout
/// bounds how long this can stay in the loading branch.
async fn settled_view(
    client: &console_core::ConsoleClient<User>,
) -> Result<TableView<User>, ConsoleError> {
    loop {
        let view = client.view().await?;
        if !matches!(view.body, TableBody::Loading) {
            return Ok(view);
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

fn render(view: &TableView<User>) {
    match &view.body {
        TableBody::Error { message } => println!("Failed loading data. ({message})"),
        TableBody::Loading => println!("Loading..."),
        TableBody::Empty => println!("No results."),
        TableBody::Rows(rows) => {
            println!("{:<25} {:<30} {:<20}", "Name", "Email", "Phone");
            for row in rows {
                println!(
                    "{:<25} {:<30} {:<20}",
                    row.record.name, row.record.email, row.record.phone
                );
            }
        }
    }
    if let DialogView::ConfirmDelete { prompt, .. } = &view.dialog {
        println!("{prompt}");
    }
}
