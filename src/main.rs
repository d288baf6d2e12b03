use anyhow::Result;

mod app;
mod features;
mod shared;
mod ui;
mod widgets;


#[tokio::main]
async fn main() -> Result<()> {
    let config = shared::Config::load()?;

    if let Err(e) = shared::logging::init(&config) {
        eprintln!("Warning: logging disabled: {e}");
    }

    // Initialize the application
    let mut app = app::App::new(config);

    // Run the TUI
    app.run().await?;

    Ok(())
}
