mod app;
mod config;
mod entry_form;
mod error;
mod logging;
mod ui;

use engine::{Engine, JsonFileStorage, Storage};

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;
    logging::init(&config)?;

    let storage: Box<dyn Storage> = Box::new(JsonFileStorage::new(&config.data_dir));
    let ledger = Engine::builder().storage(storage).build()?;
    tracing::info!(
        data_dir = %config.data_dir,
        people = ledger.people().len(),
        "ledger loaded"
    );

    let mut app = app::App::new(config, ledger)?;
    app.run().await?;
    Ok(())
}
