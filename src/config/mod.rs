mod agency;
mod owner;
pub mod state;

pub use agency::{Agency, Config, CurrencySettings, PayoutSettings};
pub use owner::{Owner, Property};
pub use state::{Counter, State};

use crate::error::{PayoutError, Result};
use crate::reversal::FeeLedger;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the data directory path (~/.payout/)
pub fn data_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "payout") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.payout/
    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        PayoutError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".payout"))
}

fn load_toml<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    if !path.exists() {
        return Err(PayoutError::DataFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    log::debug!("Loaded {}", path.display());
    toml::from_str(&content).map_err(|e| PayoutError::DataParse { path, source: e })
}

/// Load the main config.toml
pub fn load_config(data_dir: &Path) -> Result<Config> {
    load_toml(data_dir.join("config.toml"))
}

/// Load owners.toml as a HashMap
pub fn load_owners(data_dir: &Path) -> Result<HashMap<String, Owner>> {
    load_toml(data_dir.join("owners.toml"))
}

/// Load properties.toml as a HashMap, checking every owner reference
pub fn load_properties(
    data_dir: &Path,
    owners: &HashMap<String, Owner>,
) -> Result<HashMap<String, Property>> {
    let properties: HashMap<String, Property> = load_toml(data_dir.join("properties.toml"))?;
    if let Some((id, property)) = properties
        .iter()
        .find(|(_, p)| !owners.contains_key(&p.owner))
    {
        return Err(PayoutError::UnknownPropertyOwner {
            property: id.clone(),
            owner: property.owner.clone(),
        });
    }
    Ok(properties)
}

/// Load state.toml (creates default if missing). Every stored receipt must
/// still satisfy `0 <= commission <= total`.
pub fn load_state(data_dir: &Path) -> Result<State> {
    let path = data_dir.join("state.toml");
    if !path.exists() {
        return Ok(State::default());
    }
    let state: State = load_toml(path)?;
    for receipt in &state.receipts {
        receipt
            .validate()
            .map_err(|e| PayoutError::InvalidStoredReceipt {
                id: receipt.id.clone(),
                source: Box::new(e),
            })?;
    }
    Ok(state)
}

/// Save state.toml
pub fn save_state(data_dir: &Path, state: &State) -> Result<()> {
    let path = data_dir.join("state.toml");
    let content = toml::to_string_pretty(state)?;
    fs::write(&path, content)?;
    log::debug!("Saved {}", path.display());
    Ok(())
}

/// Open the fee draft for `owner`. A draft left for another owner is
/// discarded and an empty one started.
pub fn open_draft(data_dir: &Path, owner: &str) -> Result<FeeLedger> {
    let path = data_dir.join("draft.toml");
    let previous = if path.exists() {
        Some(load_toml(path)?)
    } else {
        None
    };
    Ok(FeeLedger::reopen(previous, owner))
}

/// Save draft.toml, removing it once the draft holds no fees
pub fn save_draft(data_dir: &Path, draft: &FeeLedger) -> Result<()> {
    let path = data_dir.join("draft.toml");
    if draft.is_empty() {
        if path.exists() {
            fs::remove_file(&path)?;
        }
        return Ok(());
    }
    fs::write(&path, toml::to_string_pretty(draft)?)?;
    log::debug!("Saved {}", path.display());
    Ok(())
}

/// Save the draft once payout `payout_id` is in the ledger. Failing here
/// leaves fees drafted that were already deducted, so it is reported as such.
pub fn settle_draft(data_dir: &Path, draft: &FeeLedger, payout_id: &str) -> Result<()> {
    save_draft(data_dir, draft).map_err(|e| PayoutError::DraftNotCleared {
        payout: payout_id.to_string(),
        source: Box::new(e),
    })
}

/// Format a sequential identifier from a template such as "PAY-{year}-{seq:04}"
pub fn format_sequence(format: &str, year: u32, seq: u32) -> String {
    format
        .replace("{year}", &year.to_string())
        .replace("{seq:04}", &format!("{:04}", seq))
        .replace("{seq:05}", &format!("{:05}", seq))
        .replace("{seq:03}", &format!("{:03}", seq))
        .replace("{seq}", &seq.to_string())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[agency]
name = "Your Agency Name"
city = "Abidjan"
# email = "contact@youragency.com"   # optional
# phone = "+225 07 00 00 00 00"       # optional

[currency]
code = "XOF"
symbol = "FCFA"
decimals = 0  # fractional digits used for display and derived commissions

[payout]
number_format = "PAY-{year}-{seq:04}"   # e.g., PAY-2026-0001
receipt_format = "RCP-{year}-{seq:04}"  # e.g., RCP-2026-0001
default_method = "transfer"             # cash, transfer, check, mobile-money
"#;

/// Template content for owners.toml
pub const OWNERS_TEMPLATE: &str = r#"# Define property owners here. The table name (e.g., [kone]) is used
# as the owner identifier in fee, preview and generate commands.
#
# Example:
#   payout preview --owner kone --from 2026-01-01 --to 2026-01-31

[example-owner]
name = "Awa Koné"
phone = "+225 07 12 34 56 78"   # optional
# email = "awa@example.com"     # optional
# address = "Cocody, Abidjan"   # optional
"#;

/// Template content for properties.toml
pub const PROPERTIES_TEMPLATE: &str = r#"# Define managed properties here. The table name (e.g., [villa-riviera]) is
# used as the property identifier when recording rent receipts.
#
# Example:
#   payout add-receipt --property example-flat --amount 150000

[example-flat]
owner = "example-owner"          # owner identifier from owners.toml
name = "Appartement F3 Riviera"
address = "Riviera 2, Abidjan"   # optional
monthly_rent = 150000            # optional
commission_rate = 0.10           # agency share of collected rent
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn templates_parse() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.currency.symbol, "FCFA");
        assert_eq!(config.currency.decimals, 0);

        let owners: HashMap<String, Owner> = toml::from_str(OWNERS_TEMPLATE).unwrap();
        assert!(owners.contains_key("example-owner"));

        let properties: HashMap<String, Property> = toml::from_str(PROPERTIES_TEMPLATE).unwrap();
        let flat = &properties["example-flat"];
        assert_eq!(flat.owner, "example-owner");
        assert_eq!(flat.commission_rate, dec!(0.10));
        assert_eq!(flat.monthly_rent, Some(dec!(150000)));
    }

    #[test]
    fn draft_survives_until_emptied() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut draft = open_draft(temp.path(), "kone").unwrap();
        draft.add_fee("Peinture", dec!(30000), crate::reversal::FeeCategory::Reparation);
        save_draft(temp.path(), &draft).unwrap();

        let reopened = open_draft(temp.path(), "kone").unwrap();
        assert_eq!(reopened.len(), 1);
        assert!(open_draft(temp.path(), "traore").unwrap().is_empty());

        let mut cleared = reopened;
        cleared.clear();
        save_draft(temp.path(), &cleared).unwrap();
        assert!(!temp.path().join("draft.toml").exists());
    }

    #[test]
    fn draft_that_cannot_be_removed_is_reported() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::create_dir(temp.path().join("draft.toml")).unwrap();

        let settled = FeeLedger::new("kone");
        let err = settle_draft(temp.path(), &settled, "PAY-2025-0001").unwrap_err();

        assert!(matches!(err, PayoutError::DraftNotCleared { .. }));
        assert!(err.to_string().contains("PAY-2025-0001"));
    }

    #[test]
    fn stored_receipt_with_excess_commission_is_rejected() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::write(
            temp.path().join("state.toml"),
            r#"[[receipts]]
id = "RCP-2025-0003"
property_id = "villa"
total_amount = "100000"
commission_amount = "120000"
payment_date = "2025-06-05T09:00:00"
"#,
        )
        .unwrap();

        let err = load_state(temp.path()).unwrap_err();
        assert!(err.to_string().contains("RCP-2025-0003"));
        assert!(matches!(err, PayoutError::InvalidStoredReceipt { .. }));
    }

    #[test]
    fn sequence_formats() {
        assert_eq!(format_sequence("PAY-{year}-{seq:04}", 2026, 7), "PAY-2026-0007");
        assert_eq!(format_sequence("R{seq}", 2026, 12), "R12");
    }
}
