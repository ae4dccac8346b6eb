use clap::{Args, Parser, Subcommand};
use settings::Overrides;

#[derive(Parser, Debug)]
#[command(name = "hisab")]
#[command(about = "Lend and borrow ledger, one person at a time")]
pub struct Cli {
    /// Optional config file path (TOML), the same file `hisab_tui` reads.
    #[arg(long)]
    pub config: Option<String>,

    /// Override the ledger data directory.
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Override currency code (INR, EUR, USD).
    #[arg(long)]
    pub currency: Option<String>,

    /// Override timezone (IANA name) used to print entry times.
    #[arg(long)]
    pub timezone: Option<String>,

    /// Log level for stderr output. The configured level applies to the
    /// terminal UI log file only.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Skip the confirmation prompt of destructive commands.
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            data_dir: self.data_dir.clone(),
            currency: self.currency.clone(),
            timezone: self.timezone.clone(),
            log_level: None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Person(Person),
    /// Record money given to someone.
    Lend(EntryArgs),
    /// Record money taken from someone.
    Borrow(EntryArgs),
    Category(Category),
    /// Print the cash to receive and to give.
    Summary,
    /// Ask the Hisab Guru for a message and a piece of advice.
    Insight(InsightArgs),
    /// Write every entry as CSV.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
pub struct Person {
    #[command(subcommand)]
    pub command: PersonCommand,
}

#[derive(Subcommand, Debug)]
pub enum PersonCommand {
    Add { name: String },
    List,
    Show { person: String },
    Delete { person: String },
    /// Remove every entry but keep the person.
    Clear { person: String },
}

#[derive(Args, Debug)]
pub struct EntryArgs {
    /// Person id or unique name.
    pub person: String,
    pub amount: String,
    /// One of the preset categories.
    #[arg(long, conflicts_with = "custom")]
    pub category: Option<String>,
    /// Free-text category, not added to the presets.
    #[arg(long)]
    pub custom: Option<String>,
}

#[derive(Args, Debug)]
pub struct Category {
    #[command(subcommand)]
    pub command: CategoryCommand,
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    List,
    Add { label: String },
    Remove { label: String },
}

#[derive(Args, Debug)]
pub struct InsightArgs {
    /// Override the configured API key.
    #[arg(long)]
    pub api_key: Option<String>,
    /// Override the configured model.
    #[arg(long)]
    pub model: Option<String>,
    /// Fail instead of printing the offline message.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file; stdout when missing.
    #[arg(long, short)]
    pub output: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_given_flags_override_settings() {
        let cli = Cli::try_parse_from(["hisab", "--data-dir", "ledger", "summary"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.data_dir.as_deref(), Some("ledger"));
        assert!(overrides.currency.is_none());
        assert!(overrides.timezone.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn yes_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from(["hisab", "person", "delete", "Asha", "--yes"]).unwrap();
        assert!(cli.yes);
        assert!(matches!(
            cli.command,
            Command::Person(Person {
                command: PersonCommand::Delete { .. }
            })
        ));
    }
}
