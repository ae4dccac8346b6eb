use clap::Parser;
use engine::{Engine, JsonFileStorage};
use hisab_cli::{
    args::Cli,
    commands::{self, Context},
    error::Result,
    logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    let settings = settings::load(cli.config.as_deref())?.with_overrides(cli.overrides());
    let currency = settings.currency()?;
    let timezone = settings.timezone()?;
    let mut ledger = Engine::builder()
        .storage(JsonFileStorage::new(&settings.data_dir))
        .build()?;
    tracing::debug!(
        data_dir = %settings.data_dir,
        people = ledger.people().len(),
        "ledger loaded"
    );

    let mut stdin = std::io::stdin().lock();
    let mut stdout = std::io::stdout().lock();
    let mut ctx = Context {
        currency,
        timezone,
        insight: settings.insight,
        assume_yes: cli.yes,
        input: &mut stdin,
        out: &mut stdout,
    };
    commands::run(&mut ledger, cli.command, &mut ctx).await
}
