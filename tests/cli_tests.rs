use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn payout_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("payout"))
}

fn init_data_dir(temp_dir: &TempDir) -> PathBuf {
    let data_path = temp_dir.path().join("payout-data");
    payout_cmd()
        .args(["-D", data_path.to_str().unwrap(), "init"])
        .assert()
        .success();
    data_path
}

fn write_state(data_path: &Path, state: &str) {
    fs::write(data_path.join("state.toml"), state).unwrap();
}

const JUNE_RECEIPTS: &str = r#"[[receipts]]
id = "RCP-2025-0001"
property_id = "example-flat"
total_amount = "100000"
commission_amount = "10000"
payment_date = "2025-06-05T09:00:00"

[[receipts]]
id = "RCP-2025-0002"
property_id = "example-flat"
total_amount = "150000"
commission_amount = "15000"
payment_date = "2025-06-20T16:30:00"
"#;

fn run_ok(data_path: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    payout_cmd()
        .args(["-D", data_path.to_str().unwrap()])
        .args(args)
        .assert()
        .success()
}

#[test]
fn test_help() {
    payout_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("owner payout ledger"));
}

#[test]
fn test_version() {
    payout_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("payout"));
}

#[test]
fn test_init_creates_data_files() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("payout-data");

    payout_cmd()
        .args(["-D", data_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized payout data"));

    assert!(data_path.join("config.toml").exists());
    assert!(data_path.join("owners.toml").exists());
    assert!(data_path.join("properties.toml").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);

    payout_cmd()
        .args(["-D", data_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_status_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = temp_dir.path().join("nonexistent");

    payout_cmd()
        .args(["-D", data_path.to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_status() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);

    run_ok(&data_path, &["status"])
        .stdout(predicate::str::contains("Payout Status"))
        .stdout(predicate::str::contains("Owners:         1"))
        .stdout(predicate::str::contains("Next payout:    PAY-"));
}

#[test]
fn test_owners_and_properties_list() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);

    run_ok(&data_path, &["owners"])
        .stdout(predicate::str::contains("example-owner"))
        .stdout(predicate::str::contains("Awa Koné"));

    run_ok(&data_path, &["properties", "--owner", "example-owner"])
        .stdout(predicate::str::contains("example-flat"))
        .stdout(predicate::str::contains("150,000 FCFA"))
        .stdout(predicate::str::contains("10%"));
}

#[test]
fn test_property_with_unknown_owner_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);
    fs::write(
        data_path.join("properties.toml"),
        r#"[orphan]
owner = "ghost"
name = "Studio Marcory"
commission_rate = 0.08
"#,
    )
    .unwrap();

    payout_cmd()
        .args(["-D", data_path.to_str().unwrap(), "properties"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown owner 'ghost'"));
}

#[test]
fn test_add_receipt_derives_commission() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);

    run_ok(
        &data_path,
        &[
            "add-receipt",
            "--property",
            "example-flat",
            "--amount",
            "150000",
            "--date",
            "2025-06-05",
        ],
    )
    .stdout(predicate::str::contains("Recorded RCP-2025-0001"))
    .stdout(predicate::str::contains("Commission: 15,000 FCFA"));

    run_ok(&data_path, &["receipts", "--owner", "example-owner"])
        .stdout(predicate::str::contains("RCP-2025-0001"))
        .stdout(predicate::str::contains("2025-06-05"))
        .stdout(predicate::str::contains("Collected:  150,000 FCFA"));
}

#[test]
fn test_add_receipt_rejects_commission_above_rent() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);

    payout_cmd()
        .args([
            "-D",
            data_path.to_str().unwrap(),
            "add-receipt",
            "--property",
            "example-flat",
            "--amount",
            "100000",
            "--commission",
            "120000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be negative or exceed"));

    assert!(!data_path.join("state.toml").exists());
}

#[test]
fn test_add_receipt_unknown_property() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);

    payout_cmd()
        .args([
            "-D",
            data_path.to_str().unwrap(),
            "add-receipt",
            "--property",
            "nowhere",
            "--amount",
            "100000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Property 'nowhere' not found"));
}

#[test]
fn test_june_reversal_preview_and_generate() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);
    write_state(&data_path, JUNE_RECEIPTS);

    run_ok(
        &data_path,
        &[
            "fee",
            "add",
            "--owner",
            "example-owner",
            "--description",
            "Réparation chauffe-eau",
            "--amount",
            "20000",
            "--category",
            "reparation",
        ],
    )
    .stdout(predicate::str::contains("Added fee #1"));

    run_ok(
        &data_path,
        &[
            "preview",
            "--owner",
            "example-owner",
            "--from",
            "2025-06-01",
            "--to",
            "2025-06-30",
        ],
    )
    .stdout(predicate::str::contains("Payments:    2"))
    .stdout(predicate::str::contains("Rent:        250,000 FCFA"))
    .stdout(predicate::str::contains("Commission:  25,000 FCFA"))
    .stdout(predicate::str::contains("Fees:        20,000 FCFA"))
    .stdout(predicate::str::contains("Net amount:  205,000 FCFA"))
    .stdout(predicate::str::contains("Ready"));

    run_ok(
        &data_path,
        &[
            "generate",
            "--owner",
            "example-owner",
            "--from",
            "2025-06-01",
            "--to",
            "2025-06-30",
            "--method",
            "mobile-money",
            "--reference",
            "OM-2025-118",
            "--date",
            "2025-07-02",
        ],
    )
    .stdout(predicate::str::contains("Recorded PAY-2025-0001"))
    .stdout(predicate::str::contains("Paid:       205,000 FCFA via mobile-money"));

    // Fees are consumed by the payout
    run_ok(&data_path, &["fee", "list", "--owner", "example-owner"])
        .stdout(predicate::str::contains("No fees drafted."));

    run_ok(&data_path, &["ledger", "--owner", "example-owner"])
        .stdout(predicate::str::contains("PAY-2025-0001"))
        .stdout(predicate::str::contains("OM-2025-118"))
        .stdout(predicate::str::contains("Paid out: 205,000 FCFA"));

    let state = fs::read_to_string(data_path.join("state.toml")).unwrap();
    assert!(state.contains("Réparation chauffe-eau"));
}

#[test]
fn test_preview_json() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);
    write_state(&data_path, JUNE_RECEIPTS);

    run_ok(
        &data_path,
        &[
            "preview",
            "--owner",
            "example-owner",
            "--from",
            "2025-06-01",
            "--to",
            "2025-06-30",
            "--json",
        ],
    )
    .stdout(predicate::str::contains("\"net_amount\": \"225000\""))
    .stdout(predicate::str::contains("\"payments_count\": 2"));
}

#[test]
fn test_july_has_no_payments() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);
    write_state(&data_path, JUNE_RECEIPTS);

    run_ok(
        &data_path,
        &[
            "preview",
            "--owner",
            "example-owner",
            "--from",
            "2025-07-01",
            "--to",
            "2025-07-31",
        ],
    )
    .stdout(predicate::str::contains("Payments:    0"))
    .stdout(predicate::str::contains("Generation disabled: no rent payments"));

    payout_cmd()
        .args([
            "-D",
            data_path.to_str().unwrap(),
            "generate",
            "--owner",
            "example-owner",
            "--from",
            "2025-07-01",
            "--to",
            "2025-07-31",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no rent payments"));
}

#[test]
fn test_fees_exceeding_rent_block_generation() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);
    write_state(&data_path, JUNE_RECEIPTS);

    run_ok(
        &data_path,
        &[
            "fee",
            "add",
            "--owner",
            "example-owner",
            "--description",
            "Réfection toiture",
            "--amount",
            "300000",
        ],
    );

    payout_cmd()
        .args([
            "-D",
            data_path.to_str().unwrap(),
            "generate",
            "--owner",
            "example-owner",
            "--from",
            "2025-06-01",
            "--to",
            "2025-06-30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("net amount is not positive"));

    // Draft survives a refused payout
    run_ok(&data_path, &["fee", "list", "--owner", "example-owner"])
        .stdout(predicate::str::contains("Réfection toiture"));
}

#[test]
fn test_invalid_fees_are_ignored() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);

    for amount in ["-5", "0"] {
        run_ok(
            &data_path,
            &[
                "fee",
                "add",
                "--owner",
                "example-owner",
                "--description",
                "Gardiennage",
                "--amount",
                amount,
            ],
        )
        .stdout(predicate::str::contains("Fee not added"))
        .stdout(predicate::str::contains("Draft: 0 fee(s)"));
    }

    run_ok(
        &data_path,
        &[
            "fee",
            "add",
            "--owner",
            "example-owner",
            "--description",
            " ",
            "--amount",
            "1000",
        ],
    )
    .stdout(predicate::str::contains("Fee not added"));

    run_ok(&data_path, &["fee", "list", "--owner", "example-owner"])
        .stdout(predicate::str::contains("No fees drafted."));
}

#[test]
fn test_fee_remove() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);

    for (description, amount) in [("Peinture", "30000"), ("Serrure", "12000")] {
        run_ok(
            &data_path,
            &[
                "fee",
                "add",
                "--owner",
                "example-owner",
                "--description",
                description,
                "--amount",
                amount,
            ],
        );
    }

    run_ok(&data_path, &["fee", "remove", "--owner", "example-owner", "7"])
        .stdout(predicate::str::contains("No fee #7"))
        .stdout(predicate::str::contains("Draft: 2 fee(s), 42,000 FCFA"));

    run_ok(&data_path, &["fee", "remove", "--owner", "example-owner", "1"])
        .stdout(predicate::str::contains("Removed fee #1 'Peinture'"))
        .stdout(predicate::str::contains("Draft: 1 fee(s), 12,000 FCFA"));
}

#[test]
fn test_draft_resets_for_another_owner() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);
    fs::write(
        data_path.join("owners.toml"),
        r#"[example-owner]
name = "Awa Koné"

[traore]
name = "Moussa Traoré"
"#,
    )
    .unwrap();

    run_ok(
        &data_path,
        &[
            "fee",
            "add",
            "--owner",
            "example-owner",
            "--description",
            "Peinture",
            "--amount",
            "30000",
        ],
    );

    // Looking at another owner's draft leaves the first one alone
    run_ok(&data_path, &["fee", "list", "--owner", "traore"])
        .stdout(predicate::str::contains("No fees drafted."));
    run_ok(&data_path, &["fee", "list", "--owner", "example-owner"])
        .stdout(predicate::str::contains("Peinture"));

    // Editing it starts a fresh draft
    run_ok(
        &data_path,
        &[
            "fee",
            "add",
            "--owner",
            "traore",
            "--description",
            "Curage",
            "--amount",
            "8000",
        ],
    )
    .stdout(predicate::str::contains("Draft: 1 fee(s), 8,000 FCFA"));
    run_ok(&data_path, &["fee", "list", "--owner", "example-owner"])
        .stdout(predicate::str::contains("No fees drafted."));
}

#[test]
fn test_inverted_period_warns() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);
    write_state(&data_path, JUNE_RECEIPTS);

    run_ok(
        &data_path,
        &[
            "preview",
            "--owner",
            "example-owner",
            "--from",
            "2025-06-30",
            "--to",
            "2025-06-01",
        ],
    )
    .stdout(predicate::str::contains("Warning: the end date is before the start date"))
    .stdout(predicate::str::contains("Payments:    0"));
}

#[test]
fn test_unknown_owner() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);

    payout_cmd()
        .args([
            "-D",
            data_path.to_str().unwrap(),
            "preview",
            "--owner",
            "nobody",
            "--from",
            "2025-06-01",
            "--to",
            "2025-06-30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Owner 'nobody' not found"));
}

#[test]
fn test_invalid_date() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);

    payout_cmd()
        .args([
            "-D",
            data_path.to_str().unwrap(),
            "preview",
            "--owner",
            "example-owner",
            "--from",
            "01/06/2025",
            "--to",
            "2025-06-30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date '01/06/2025'"));
}

#[test]
fn test_generate_for_another_owner_keeps_draft() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);
    fs::write(
        data_path.join("owners.toml"),
        r#"[example-owner]
name = "Awa Koné"

[traore]
name = "Moussa Traoré"
"#,
    )
    .unwrap();
    fs::write(
        data_path.join("properties.toml"),
        r#"[example-flat]
owner = "example-owner"
name = "Appartement F3 Riviera"
commission_rate = 0.10

[traore-studio]
owner = "traore"
name = "Studio Marcory"
commission_rate = 0.10
"#,
    )
    .unwrap();
    write_state(
        &data_path,
        r#"[[receipts]]
id = "RCP-2025-0001"
property_id = "traore-studio"
total_amount = "80000"
commission_amount = "8000"
payment_date = "2025-06-10T10:00:00"
"#,
    );

    run_ok(
        &data_path,
        &[
            "fee",
            "add",
            "--owner",
            "example-owner",
            "--description",
            "Peinture",
            "--amount",
            "30000",
        ],
    );

    run_ok(
        &data_path,
        &[
            "generate",
            "--owner",
            "traore",
            "--from",
            "2025-06-01",
            "--to",
            "2025-06-30",
            "--date",
            "2025-07-01",
        ],
    )
    .stdout(predicate::str::contains("72,000 FCFA"));

    assert!(data_path.join("draft.toml").exists());
    run_ok(&data_path, &["fee", "list", "--owner", "example-owner"])
        .stdout(predicate::str::contains("Peinture"))
        .stdout(predicate::str::contains("Total fees: 30,000 FCFA"));
}

#[test]
fn test_oversized_totals_fail_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let data_path = init_data_dir(&temp_dir);
    write_state(
        &data_path,
        r#"[[receipts]]
id = "RCP-2025-0001"
property_id = "example-flat"
total_amount = "79228162514264337593543950335"
commission_amount = "0"
payment_date = "2025-06-05T09:00:00"

[[receipts]]
id = "RCP-2025-0002"
property_id = "example-flat"
total_amount = "79228162514264337593543950335"
commission_amount = "0"
payment_date = "2025-06-06T09:00:00"
"#,
    );

    for command in ["preview", "generate"] {
        payout_cmd()
            .args([
                "-D",
                data_path.to_str().unwrap(),
                command,
                "--owner",
                "example-owner",
                "--from",
                "2025-06-01",
                "--to",
                "2025-06-30",
            ])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("too large to total"));
    }

    run_ok(&data_path, &["ledger"]).stdout(predicate::str::contains("No payouts recorded yet."));
}
