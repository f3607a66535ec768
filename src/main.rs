use chrono::{Datelike, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use payout::config::{
    data_dir, format_sequence, load_config, load_owners, load_properties, load_state,
    open_draft, save_draft, save_state, settle_draft, Owner, CONFIG_TEMPLATE, OWNERS_TEMPLATE,
    PROPERTIES_TEMPLATE,
};
use payout::error::{PayoutError, Result};
use payout::money::{checked_sum, format_grouped, format_money};
use payout::reversal::{
    derive_commission, generate_reversal, preview_reversal, receipts_for_owner, FeeCategory,
    LedgerRecorder, PaymentDetails, PaymentMethod, Period, RentReceipt,
};

#[derive(Parser)]
#[command(name = "payout")]
#[command(version, about = "Minimal CLI owner payout ledger for real-estate agencies", long_about = None)]
struct Cli {
    /// Path to data directory (default: ~/.payout or XDG config)
    #[arg(short = 'D', long, global = true)]
    data_dir: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize data directory with template files
    Init,

    /// List configured owners
    Owners,

    /// List managed properties
    Properties {
        /// Only show properties of this owner
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Record a rent payment collected for a property
    AddReceipt {
        /// Property identifier from properties.toml
        #[arg(short, long)]
        property: String,

        /// Rent collected
        #[arg(short, long)]
        amount: Decimal,

        /// Agency commission (default: amount x property commission rate)
        #[arg(long)]
        commission: Option<Decimal>,

        /// Payment date, YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS" (default: now)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded rent receipts
    Receipts {
        /// Only show receipts of this owner's properties
        #[arg(short, long)]
        owner: Option<String>,

        /// Receipts paid from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Receipts paid up to this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Manage deductible fees for an owner's next reversal
    Fee {
        #[command(subcommand)]
        action: FeeCommand,
    },

    /// Show what an owner would receive for a period
    Preview {
        /// Owner identifier from owners.toml
        #[arg(short, long)]
        owner: String,

        /// First day of the period (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last day of the period (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Print the computed reversal as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record the reversal for a period as an owner payout
    Generate {
        /// Owner identifier from owners.toml
        #[arg(short, long)]
        owner: String,

        /// First day of the period (YYYY-MM-DD)
        #[arg(long)]
        from: String,

        /// Last day of the period (YYYY-MM-DD)
        #[arg(long)]
        to: String,

        /// Payment method: cash, transfer, check, mobile-money (default from config.toml)
        #[arg(short, long)]
        method: Option<PaymentMethod>,

        /// Bank or mobile-money reference
        #[arg(short, long)]
        reference: Option<String>,

        /// Free-form notes stored with the payout
        #[arg(short, long)]
        notes: Option<String>,

        /// Payout date (default: today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded owner payouts
    Ledger {
        /// Only show payouts to this owner
        #[arg(short, long)]
        owner: Option<String>,
    },

    /// Show data directory status and next payout number
    Status,
}

#[derive(Subcommand)]
enum FeeCommand {
    /// Add a deductible fee
    Add {
        /// Owner identifier from owners.toml
        #[arg(short, long)]
        owner: String,

        /// What the fee is for
        #[arg(short, long)]
        description: String,

        /// Amount to deduct
        #[arg(short, long, allow_negative_numbers = true)]
        amount: Decimal,

        /// reparation, charge or autre
        #[arg(short, long, default_value = "autre")]
        category: FeeCategory,
    },

    /// Remove a fee from the draft
    Remove {
        /// Owner identifier from owners.toml
        #[arg(short, long)]
        owner: String,

        /// Fee id shown by 'fee list'
        id: u32,
    },

    /// Show the fees drafted for an owner
    List {
        /// Owner identifier from owners.toml
        #[arg(short, long)]
        owner: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    let mut builder = env_logger::Builder::from_default_env();
    if verbose > 0 || std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    builder
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Determine data directory
    let dir = match cli.data_dir {
        Some(p) => p,
        None => data_dir()?,
    };
    log::debug!("Using data directory {}", dir.display());

    match cli.command {
        Commands::Init => cmd_init(&dir),
        Commands::Owners => cmd_owners(&dir),
        Commands::Properties { owner } => cmd_properties(&dir, owner.as_deref()),
        Commands::AddReceipt {
            property,
            amount,
            commission,
            date,
        } => cmd_add_receipt(&dir, &property, amount, commission, date.as_deref()),
        Commands::Receipts { owner, from, to } => {
            cmd_receipts(&dir, owner.as_deref(), from.as_deref(), to.as_deref())
        }
        Commands::Fee { action } => match action {
            FeeCommand::Add {
                owner,
                description,
                amount,
                category,
            } => cmd_fee_add(&dir, &owner, &description, amount, category),
            FeeCommand::Remove { owner, id } => cmd_fee_remove(&dir, &owner, id),
            FeeCommand::List { owner } => cmd_fee_list(&dir, &owner),
        },
        Commands::Preview {
            owner,
            from,
            to,
            json,
        } => cmd_preview(&dir, &owner, &from, &to, json),
        Commands::Generate {
            owner,
            from,
            to,
            method,
            reference,
            notes,
            date,
        } => cmd_generate(
            &dir,
            &owner,
            &from,
            &to,
            PaymentArgs {
                method,
                reference,
                notes,
                date,
            },
        ),
        Commands::Ledger { owner } => cmd_ledger(&dir, owner.as_deref()),
        Commands::Status => cmd_status(&dir),
    }
}

fn require_data_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        Ok(())
    } else {
        Err(PayoutError::DataDirNotFound(dir.to_path_buf()))
    }
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| PayoutError::InvalidDate(s.to_string()))
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    if let Ok(at) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(at);
    }
    parse_day(s)?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| PayoutError::InvalidDate(s.to_string()))
}

fn parse_period(from: &str, to: &str) -> Result<Period> {
    Ok(Period::new(parse_day(from)?, parse_day(to)?))
}

fn find_owner<'a>(owners: &'a HashMap<String, Owner>, owner_id: &str) -> Result<&'a Owner> {
    owners
        .get(owner_id)
        .ok_or_else(|| PayoutError::OwnerNotFound(owner_id.to_string()))
}

/// Initialize data directory with template files
fn cmd_init(dir: &Path) -> Result<()> {
    if dir.exists() {
        return Err(PayoutError::AlreadyInitialized(dir.to_path_buf()));
    }

    fs::create_dir_all(dir)?;
    fs::write(dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(dir.join("owners.toml"), OWNERS_TEMPLATE)?;
    fs::write(dir.join("properties.toml"), PROPERTIES_TEMPLATE)?;

    println!("Initialized payout data at: {}", dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your agency details:  $EDITOR {}/config.toml",
        dir.display()
    );
    println!(
        "  2. Add property owners:       $EDITOR {}/owners.toml",
        dir.display()
    );
    println!(
        "  3. Add managed properties:    $EDITOR {}/properties.toml",
        dir.display()
    );
    println!();
    println!("Then record rent and pay owners:");
    println!("  payout add-receipt --property <property-id> --amount <rent>");
    println!("  payout generate --owner <owner-id> --from <YYYY-MM-DD> --to <YYYY-MM-DD>");

    Ok(())
}

// Table row structs for tabled
#[derive(Tabled)]
struct OwnerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PHONE")]
    phone: String,
    #[tabled(rename = "PROPERTIES")]
    properties: usize,
}

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "OWNER")]
    owner: String,
    #[tabled(rename = "RENT")]
    rent: String,
    #[tabled(rename = "COMMISSION")]
    commission: String,
}

#[derive(Tabled)]
struct ReceiptRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "PROPERTY")]
    property: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "COMMISSION")]
    commission: String,
}

#[derive(Tabled)]
struct FeeRow {
    #[tabled(rename = "#")]
    id: u32,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "CATEGORY")]
    category: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

#[derive(Tabled)]
struct PayoutRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "OWNER")]
    owner: String,
    #[tabled(rename = "METHOD")]
    method: String,
    #[tabled(rename = "REFERENCE")]
    reference: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
}

/// List configured owners
fn cmd_owners(dir: &Path) -> Result<()> {
    require_data_dir(dir)?;

    let owners = load_owners(dir)?;
    let properties = load_properties(dir, &owners)?;

    if owners.is_empty() {
        println!("No owners configured.");
        println!("Add owners to: {}/owners.toml", dir.display());
        return Ok(());
    }

    let mut sorted: Vec<_> = owners.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let rows: Vec<OwnerRow> = sorted
        .iter()
        .map(|(id, owner)| OwnerRow {
            id: id.to_string(),
            name: owner.name.clone(),
            phone: owner.phone.clone().unwrap_or_default(),
            properties: properties.values().filter(|p| &p.owner == *id).count(),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// List managed properties
fn cmd_properties(dir: &Path, owner_filter: Option<&str>) -> Result<()> {
    require_data_dir(dir)?;

    let config = load_config(dir)?;
    let owners = load_owners(dir)?;
    let properties = load_properties(dir, &owners)?;

    if let Some(owner_id) = owner_filter {
        find_owner(&owners, owner_id)?;
    }

    let mut sorted: Vec<_> = properties
        .iter()
        .filter(|(_, p)| owner_filter.map_or(true, |o| p.owner == o))
        .collect();
    sorted.sort_by_key(|(k, _)| *k);

    if sorted.is_empty() {
        println!("No properties configured.");
        println!("Add properties to: {}/properties.toml", dir.display());
        return Ok(());
    }

    let rows: Vec<PropertyRow> = sorted
        .iter()
        .map(|(id, property)| PropertyRow {
            id: id.to_string(),
            name: property.name.clone(),
            owner: property.owner.clone(),
            rent: property
                .monthly_rent
                .map(|r| format_money(r, &config.currency))
                .unwrap_or_else(|| "-".to_string()),
            commission: property
                .commission_rate
                .checked_mul(Decimal::ONE_HUNDRED)
                .map(|pct| format!("{}%", pct.normalize()))
                .unwrap_or_else(|| property.commission_rate.to_string()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    Ok(())
}

/// Record a rent payment collected for a property
fn cmd_add_receipt(
    dir: &Path,
    property_id: &str,
    amount: Decimal,
    commission: Option<Decimal>,
    date: Option<&str>,
) -> Result<()> {
    require_data_dir(dir)?;

    let config = load_config(dir)?;
    let owners = load_owners(dir)?;
    let properties = load_properties(dir, &owners)?;
    let mut state = load_state(dir)?;

    let property = properties
        .get(property_id)
        .ok_or_else(|| PayoutError::PropertyNotFound(property_id.to_string()))?;

    let payment_date = match date {
        Some(s) => parse_timestamp(s)?,
        None => chrono::Local::now().naive_local(),
    };

    let commission = match commission {
        Some(c) => c,
        None => derive_commission(amount, property.commission_rate, config.currency.decimals)?,
    };

    let year = payment_date.year() as u32;
    let seq = state.counter.receipts.peek(year);
    let receipt = RentReceipt::new(
        format_sequence(&config.payout.receipt_format, year, seq),
        property_id.to_string(),
        amount,
        Some(commission),
        payment_date,
    )?;
    state.counter.receipts.advance(year);

    let owner_name = owners
        .get(&property.owner)
        .map(|o| o.name.clone())
        .unwrap_or_else(|| property.owner.clone());

    println!("Recorded {}", receipt.id);
    println!("  Property:   {} ({})", property.name, owner_name);
    println!("  Amount:     {}", format_money(receipt.total_amount, &config.currency));
    println!("  Commission: {}", format_money(receipt.commission(), &config.currency));
    println!("  Paid on:    {}", receipt.payment_date.date());

    log::info!("Recorded receipt {} for property '{}'", receipt.id, property_id);
    state.receipts.push(receipt);
    save_state(dir, &state)?;

    Ok(())
}

/// List recorded rent receipts
fn cmd_receipts(
    dir: &Path,
    owner_filter: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    require_data_dir(dir)?;

    let config = load_config(dir)?;
    let owners = load_owners(dir)?;
    let properties = load_properties(dir, &owners)?;
    let state = load_state(dir)?;

    let from_date = from.map(parse_day).transpose()?;
    let to_date = to.map(parse_day).transpose()?;

    let selected: Vec<&RentReceipt> = match owner_filter {
        Some(owner_id) => {
            find_owner(&owners, owner_id)?;
            receipts_for_owner(&properties, &state.receipts, owner_id)
        }
        None => state.receipts.iter().collect(),
    };

    let filtered: Vec<&RentReceipt> = selected
        .into_iter()
        .filter(|r| from_date.map_or(true, |d| r.payment_date.date() >= d))
        .filter(|r| to_date.map_or(true, |d| r.payment_date.date() <= d))
        .collect();

    if filtered.is_empty() {
        println!("No rent receipts found.");
        return Ok(());
    }

    let rows: Vec<ReceiptRow> = filtered
        .iter()
        .map(|r| ReceiptRow {
            id: r.id.clone(),
            date: r.payment_date.date().to_string(),
            property: r.property_id.clone(),
            amount: format_money(r.total_amount, &config.currency),
            commission: format_money(r.commission(), &config.currency),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let total = checked_sum(filtered.iter().map(|r| r.total_amount))?;
    let commission = checked_sum(filtered.iter().map(|r| r.commission()))?;
    println!();
    println!("Total: {} receipt(s)", filtered.len());
    println!("  Collected:  {}", format_money(total, &config.currency));
    println!("  Commission: {}", format_money(commission, &config.currency));

    Ok(())
}

/// Add a deductible fee to an owner's draft
fn cmd_fee_add(
    dir: &Path,
    owner_id: &str,
    description: &str,
    amount: Decimal,
    category: FeeCategory,
) -> Result<()> {
    require_data_dir(dir)?;

    let config = load_config(dir)?;
    let owners = load_owners(dir)?;
    find_owner(&owners, owner_id)?;

    let mut draft = open_draft(dir, owner_id)?;
    let added = draft
        .add_fee(description, amount, category)
        .map(|fee| (fee.id, fee.description.clone()));

    match added {
        Some((id, description)) => {
            save_draft(dir, &draft)?;
            println!(
                "Added fee #{} '{}' of {} for '{}'",
                id,
                description,
                format_money(amount, &config.currency),
                owner_id
            );
        }
        None => {
            println!(
                "Fee not added: a description is required and the amount must be greater than zero"
            );
        }
    }
    println!(
        "  Draft: {} fee(s), {}",
        draft.len(),
        format_money(draft.total()?, &config.currency)
    );

    Ok(())
}

/// Remove a fee from an owner's draft
fn cmd_fee_remove(dir: &Path, owner_id: &str, id: u32) -> Result<()> {
    require_data_dir(dir)?;

    let config = load_config(dir)?;
    let owners = load_owners(dir)?;
    find_owner(&owners, owner_id)?;

    let mut draft = open_draft(dir, owner_id)?;
    match draft.remove_fee(id) {
        Some(fee) => {
            save_draft(dir, &draft)?;
            println!(
                "Removed fee #{} '{}' ({})",
                fee.id,
                fee.description,
                format_money(fee.amount, &config.currency)
            );
        }
        None => println!("No fee #{id} in the draft for '{owner_id}'"),
    }
    println!(
        "  Draft: {} fee(s), {}",
        draft.len(),
        format_money(draft.total()?, &config.currency)
    );

    Ok(())
}

fn fee_rows(fees: &[payout::DeductibleFee], currency: &payout::config::CurrencySettings) -> Vec<FeeRow> {
    fees.iter()
        .map(|f| FeeRow {
            id: f.id,
            date: f.date.format("%Y-%m-%d").to_string(),
            category: f.category.to_string(),
            description: f.description.clone(),
            amount: format_money(f.amount, currency),
        })
        .collect()
}

/// Show the fees drafted for an owner
fn cmd_fee_list(dir: &Path, owner_id: &str) -> Result<()> {
    require_data_dir(dir)?;

    let config = load_config(dir)?;
    let owners = load_owners(dir)?;
    find_owner(&owners, owner_id)?;

    let draft = open_draft(dir, owner_id)?;
    println!("Deductible fees for '{owner_id}'");

    if draft.is_empty() {
        println!("  No fees drafted.");
        return Ok(());
    }

    let table = Table::new(fee_rows(draft.fees(), &config.currency))
        .with(Style::rounded())
        .to_string();
    println!("{table}");
    println!("Total fees: {}", format_money(draft.total()?, &config.currency));

    Ok(())
}

/// Show what an owner would receive for a period
fn cmd_preview(dir: &Path, owner_id: &str, from: &str, to: &str, json: bool) -> Result<()> {
    require_data_dir(dir)?;

    let config = load_config(dir)?;
    let owners = load_owners(dir)?;
    let properties = load_properties(dir, &owners)?;
    let state = load_state(dir)?;
    let owner = find_owner(&owners, owner_id)?;

    let period = parse_period(from, to)?;
    let draft = open_draft(dir, owner_id)?;
    let owner_receipts = receipts_for_owner(&properties, &state.receipts, owner_id);
    let details = preview_reversal(owner_receipts, &draft, period)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    let money = |v: Decimal| format_money(v, &config.currency);

    println!("Reversal for {} ({})", owner.name, owner_id);
    println!("{}", "-".repeat(50));
    if period.is_inverted() {
        println!("Warning: the end date is before the start date; no receipts can match.");
    }
    println!("Period:      {}", details.period);
    println!("Payments:    {}", details.payments_count);
    println!("Rent:        {}", money(details.total_rent));
    println!("Commission:  {}", money(details.total_commission));
    println!("Fees:        {}", money(details.total_fees));
    println!("Net amount:  {}", money(details.net_amount));

    if !details.fees.is_empty() {
        println!();
        let table = Table::new(fee_rows(&details.fees, &config.currency))
            .with(Style::rounded())
            .to_string();
        println!("{table}");
    }

    println!();
    match details.generation_block() {
        None => println!(
            "Ready: payout generate --owner {owner_id} --from {from} --to {to}"
        ),
        Some(reason) => println!("Generation disabled: {reason}"),
    }

    Ok(())
}

struct PaymentArgs {
    method: Option<PaymentMethod>,
    reference: Option<String>,
    notes: Option<String>,
    date: Option<String>,
}

/// Record the reversal for a period as an owner payout
fn cmd_generate(
    dir: &Path,
    owner_id: &str,
    from: &str,
    to: &str,
    args: PaymentArgs,
) -> Result<()> {
    require_data_dir(dir)?;

    let config = load_config(dir)?;
    let owners = load_owners(dir)?;
    let properties = load_properties(dir, &owners)?;
    let state = load_state(dir)?;
    let owner = find_owner(&owners, owner_id)?;

    let period = parse_period(from, to)?;
    if period.is_inverted() {
        println!("Warning: the end date is before the start date; no receipts can match.");
    }

    let payment = PaymentDetails {
        method: args.method.unwrap_or(config.payout.default_method),
        reference: args.reference,
        notes: args.notes,
        date: match args.date.as_deref() {
            Some(s) => parse_day(s)?,
            None => chrono::Local::now().date_naive(),
        },
    };

    // Only this owner's fees are cleared; a draft kept for someone else stays
    let mut draft = open_draft(dir, owner_id)?;
    let drafted = !draft.is_empty();
    let mut recorder = LedgerRecorder::new(
        dir.to_path_buf(),
        config.payout.number_format.clone(),
        config.currency.clone(),
    );
    let owner_receipts = receipts_for_owner(&properties, &state.receipts, owner_id);

    let (details, transaction) =
        generate_reversal(&mut recorder, &mut draft, owner_receipts, period, payment)?;

    if drafted {
        settle_draft(dir, &draft, &transaction.id)?;
    }

    let money = |v: Decimal| format_money(v, &config.currency);
    println!("Recorded {}", transaction.id);
    println!("  Owner:      {} ({})", owner.name, owner_id);
    println!("  Period:     {}", details.period);
    println!("  Payments:   {}", details.payments_count);
    println!("  Rent:       {}", money(details.total_rent));
    println!("  Commission: {}", money(details.total_commission));
    println!("  Fees:       {}", money(details.total_fees));
    println!("  Paid:       {} via {}", money(transaction.amount), transaction.payment_method);

    Ok(())
}

/// List recorded owner payouts
fn cmd_ledger(dir: &Path, owner_filter: Option<&str>) -> Result<()> {
    require_data_dir(dir)?;

    let config = load_config(dir)?;
    let state = load_state(dir)?;

    if let Some(owner_id) = owner_filter {
        let owners = load_owners(dir)?;
        find_owner(&owners, owner_id)?;
    }

    let payouts: Vec<_> = state
        .transactions
        .iter()
        .filter(|t| owner_filter.map_or(true, |o| t.owner_id == o))
        .collect();

    if payouts.is_empty() {
        println!("No payouts recorded yet.");
        return Ok(());
    }

    let rows: Vec<PayoutRow> = payouts
        .iter()
        .map(|t| PayoutRow {
            id: t.id.clone(),
            date: t.date.to_string(),
            owner: t.owner_id.clone(),
            method: t.payment_method.to_string(),
            reference: t.reference.clone().unwrap_or_default(),
            amount: format_money(t.amount, &config.currency),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");

    let total = checked_sum(payouts.iter().map(|t| t.amount))?;
    println!();
    println!("Total: {} payout(s)", payouts.len());
    println!("  Paid out: {}", format_money(total, &config.currency));

    Ok(())
}

/// Show data directory status
fn cmd_status(dir: &Path) -> Result<()> {
    require_data_dir(dir)?;

    let config = load_config(dir)?;
    let owners = load_owners(dir)?;
    let properties = load_properties(dir, &owners)?;
    let state = load_state(dir)?;

    let current_year = chrono::Local::now().year() as u32;
    let next_payout = format_sequence(
        &config.payout.number_format,
        current_year,
        state.counter.payouts.peek(current_year),
    );

    println!("Payout Status");
    println!("{}", "-".repeat(50));
    println!("Data directory: {}", dir.display());
    println!("Agency:         {} ({})", config.agency.name, config.agency.city);
    println!("Currency:       {} ({})", config.currency.code, config.currency.symbol);
    println!("Owners:         {}", owners.len());
    println!("Properties:     {}", properties.len());
    println!("Receipts:       {}", state.receipts.len());
    println!("Payouts:        {}", state.transactions.len());
    println!("Next payout:    {}", next_payout);

    if !state.transactions.is_empty() {
        println!();
        println!("Recent payouts:");
        for t in state.transactions.iter().rev().take(5) {
            println!(
                "  {} - {} - {}",
                t.id,
                t.owner_id,
                format_grouped(t.amount, config.currency.decimals)
            );
        }
    }

    Ok(())
}
