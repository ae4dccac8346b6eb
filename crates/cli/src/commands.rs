use std::io::{BufRead, Write};

use chrono_tz::Tz;
use engine::{
    Currency, Engine, EngineError, EntryKind, FALLBACK_CATEGORY, Money, PersonRecord, Storage,
    resolve_custom,
};
use insight::{InsightClient, InsightConfig};

use crate::{
    args::{CategoryCommand, Command, EntryArgs, InsightArgs, PersonCommand},
    error::Result,
    export,
};

/// Reads a `[y/N]` answer. Anything but `y`/`yes` declines.
pub fn confirm(prompt: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{prompt} [y/N] ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

/// Everything a command needs besides the ledger.
pub struct Context<'a, R, W> {
    pub currency: Currency,
    pub timezone: Tz,
    pub insight: InsightConfig,
    pub assume_yes: bool,
    pub input: &'a mut R,
    pub out: &'a mut W,
}

impl<R: BufRead, W: Write> Context<'_, R, W> {
    fn confirmed(&mut self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let ok = confirm(prompt, self.input, self.out)?;
        if !ok {
            writeln!(self.out, "aborted")?;
        }
        Ok(ok)
    }
}

pub async fn run<S: Storage, R: BufRead, W: Write>(
    ledger: &mut Engine<S>,
    command: Command,
    ctx: &mut Context<'_, R, W>,
) -> Result<()> {
    match command {
        Command::Person(person) => run_person(ledger, person.command, ctx),
        Command::Lend(args) => add_entry(ledger, EntryKind::Lend, args, ctx),
        Command::Borrow(args) => add_entry(ledger, EntryKind::Borrow, args, ctx),
        Command::Category(category) => run_category(ledger, category.command, ctx),
        Command::Summary => {
            let summary = ledger.summary()?;
            let currency = ctx.currency;
            writeln!(ctx.out, "Cash to Receive: {}", summary.receive.format(currency))?;
            writeln!(ctx.out, "Cash to Give:    {}", summary.give.format(currency))?;
            writeln!(ctx.out, "Net:             {}", summary.net().format(currency))?;
            Ok(())
        }
        Command::Export(args) => match args.output {
            Some(path) => {
                let file = std::fs::File::create(&path)?;
                let rows = export::write_csv(ledger.people(), file)?;
                tracing::info!(%path, rows, "ledger exported");
                writeln!(ctx.out, "exported {rows} entries to {path}")?;
                Ok(())
            }
            None => {
                export::write_csv(ledger.people(), &mut *ctx.out)?;
                Ok(())
            }
        },
        Command::Insight(args) => run_insight(ledger, args, ctx).await,
    }
}

fn run_person<S: Storage, R: BufRead, W: Write>(
    ledger: &mut Engine<S>,
    command: PersonCommand,
    ctx: &mut Context<'_, R, W>,
) -> Result<()> {
    match command {
        PersonCommand::Add { name } => {
            let id = ledger.add_person(&name)?;
            writeln!(ctx.out, "added {}: {id}", name.trim())?;
        }
        PersonCommand::List => {
            if ledger.people().is_empty() {
                writeln!(ctx.out, "No records found")?;
            }
            for person in ledger.people() {
                writeln!(
                    ctx.out,
                    "{}  {}  = {}",
                    person.id,
                    person.name,
                    person.balance()?.format(ctx.currency)
                )?;
            }
        }
        PersonCommand::Show { person } => {
            let person = ledger.find_person(&person)?;
            show_person(person, ctx.currency, ctx.timezone, ctx.out)?;
        }
        PersonCommand::Delete { person } => {
            let (id, name) = lookup(ledger, &person)?;
            if ctx.confirmed(&format!("Delete {name} and all their entries?"))? {
                ledger.delete_person(id)?;
                tracing::info!(%id, "person deleted");
                writeln!(ctx.out, "deleted {name}")?;
            }
        }
        PersonCommand::Clear { person } => {
            let (id, name) = lookup(ledger, &person)?;
            if ctx.confirmed(&format!("Clear every entry of {name}?"))? {
                ledger.clear_person_entries(id)?;
                tracing::info!(%id, "entries cleared");
                writeln!(ctx.out, "cleared {name}")?;
            }
        }
    }
    Ok(())
}

fn lookup<S: Storage>(ledger: &Engine<S>, query: &str) -> Result<(uuid::Uuid, String)> {
    let person = ledger.find_person(query)?;
    Ok((person.id, person.name.clone()))
}

fn show_person(
    person: &PersonRecord,
    currency: Currency,
    timezone: Tz,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{} ({})", person.name, person.id)?;
    writeln!(out, "balance: {}", person.balance()?.format(currency))?;
    if person.entries.is_empty() {
        writeln!(out, "New Account")?;
    }
    for entry in &person.entries {
        writeln!(
            out,
            "{}  {:>12}  {}",
            entry
                .timestamp
                .with_timezone(&timezone)
                .format("%Y-%m-%d %H:%M %Z"),
            entry.amount.format(currency),
            entry.category
        )?;
    }
    Ok(())
}

fn add_entry<S: Storage, R: BufRead, W: Write>(
    ledger: &mut Engine<S>,
    kind: EntryKind,
    args: EntryArgs,
    ctx: &mut Context<'_, R, W>,
) -> Result<()> {
    let amount: Money = args.amount.parse()?;
    let category = pick_category(ledger, args.category, args.custom)?;
    let (id, name) = lookup(ledger, &args.person)?;

    ledger.add_entry(id, kind, amount, &category)?;
    tracing::info!(person = %id, kind = kind.as_str(), %amount, %category, "entry added");
    writeln!(
        ctx.out,
        "{name}: {} {category}, balance {}",
        kind.signed(amount).format(ctx.currency),
        ledger.balance(id)?.format(ctx.currency)
    )?;
    Ok(())
}

/// Presets must exist, custom labels are taken as typed and an empty choice
/// falls back to the first preset.
fn pick_category<S: Storage>(
    ledger: &Engine<S>,
    preset: Option<String>,
    custom: Option<String>,
) -> Result<String> {
    if let Some(custom) = custom {
        return Ok(resolve_custom(&custom));
    }
    let categories = ledger.categories();
    match preset {
        Some(label) if categories.contains(&label) => Ok(label),
        Some(label) => Err(EngineError::InvalidCategory(label).into()),
        None => Ok(categories
            .first()
            .unwrap_or(FALLBACK_CATEGORY)
            .to_string()),
    }
}

fn run_category<S: Storage, R: BufRead, W: Write>(
    ledger: &mut Engine<S>,
    command: CategoryCommand,
    ctx: &mut Context<'_, R, W>,
) -> Result<()> {
    match command {
        CategoryCommand::List => {
            for label in ledger.categories().iter() {
                writeln!(ctx.out, "{label}")?;
            }
        }
        CategoryCommand::Add { label } => {
            ledger.add_category(&label)?;
            writeln!(ctx.out, "added {}", label.trim())?;
        }
        CategoryCommand::Remove { label } => {
            ledger.remove_category(&label)?;
            writeln!(ctx.out, "removed {label}")?;
        }
    }
    Ok(())
}

/// Prints a message and a piece of advice for the current ledger.
async fn run_insight<S: Storage, R: BufRead, W: Write>(
    ledger: &Engine<S>,
    args: InsightArgs,
    ctx: &mut Context<'_, R, W>,
) -> Result<()> {
    let mut config = ctx.insight.clone();
    if let Some(api_key) = args.api_key {
        config.api_key = Some(api_key);
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    let client = InsightClient::new(config)?;

    let insight = if args.strict {
        client.try_insights(ledger.people(), ctx.currency).await?
    } else {
        client.insights(ledger.people(), ctx.currency).await
    };

    writeln!(ctx.out, "{}", insight.message)?;
    writeln!(ctx.out, "{}", insight.advice)?;
    Ok(())
}
