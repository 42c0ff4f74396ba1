use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lana(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lana").unwrap();
    cmd.env("LANA_DATA_DIR", dir.path())
        .env_remove("LANA_LEDGER")
        .env_remove("LANA_PASSWORD")
        .env_remove("LANA_LOG");
    cmd
}

fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    lana(&dir).arg("init").assert().success();
    dir
}

fn on_sample_day(dir: &TempDir) -> Command {
    let mut cmd = lana(dir);
    cmd.args(["--today", "2025-01-20"]);
    cmd
}

#[test]
fn test_no_command_prints_usage_hint() {
    let dir = TempDir::new().unwrap();
    lana(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("lana --help"));
}

#[test]
fn test_init_creates_files_once() {
    let dir = TempDir::new().unwrap();
    lana(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ledger created"));

    assert!(dir.path().join("config.json").exists());
    assert!(dir.path().join("data").join("ledger.json").exists());

    lana(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_validate_blocks_expense_over_balance() {
    let dir = initialized();
    on_sample_day(&dir)
        .args(["validate", "Comida", "20000"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Saldo insuficiente. Saldo actual: $15,000"));
}

#[test]
fn test_validate_warns_when_budget_exceeded() {
    let dir = initialized();
    on_sample_day(&dir)
        .args(["validate", "Comida", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Excederás el presupuesto de Comida por $400"))
        .stdout(predicate::str::contains("requiere confirmación"));
}

#[test]
fn test_validate_accepts_small_expense() {
    let dir = initialized();
    on_sample_day(&dir)
        .args(["validate", "Transporte", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transacción válida"));
}

#[test]
fn test_income_is_never_checked() {
    let dir = initialized();
    on_sample_day(&dir)
        .args(["validate", "Salario", "999999", "--kind", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transacción válida"));
}

#[test]
fn test_summary_and_budgets() {
    let dir = initialized();
    on_sample_day(&dir)
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ingreso neto"))
        .stdout(predicate::str::contains("Tasa de ahorro"));

    on_sample_day(&dir)
        .arg("budgets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Comida"))
        .stdout(predicate::str::contains("Presupuesto sugerido"));
}

#[test]
fn test_transactions_filter_and_export() {
    let dir = initialized();
    on_sample_day(&dir)
        .args(["transactions", "--kind", "income"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salario de enero"))
        .stdout(predicate::str::contains("Despensa semanal").not());

    let csv_path = dir.path().join("tx.csv");
    on_sample_day(&dir)
        .args(["transactions", "--export"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("10 transacciones exportadas"));

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("ID,Date,Type,Category,Description,Amount,Importance"));
    assert_eq!(csv.lines().count(), 11);
}

#[test]
fn test_totals_rejects_bad_month() {
    let dir = initialized();
    on_sample_day(&dir)
        .args(["totals", "2025-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 transacciones"));

    on_sample_day(&dir)
        .args(["totals", "enero"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month format"));
}

#[test]
fn test_report_text() {
    let dir = initialized();
    on_sample_day(&dir)
        .args(["report", "--period", "month"])
        .assert()
        .success()
        .stdout(predicate::str::contains("REPORTE FINANCIERO"))
        .stdout(predicate::str::contains("Generado por LanaApp"));
}

#[test]
fn test_report_csv_to_file() {
    let dir = initialized();
    let path = dir.path().join("report.csv");
    on_sample_day(&dir)
        .args(["report", "--format", "csv", "--output"])
        .arg(&path)
        .assert()
        .success();

    let csv = std::fs::read_to_string(&path).unwrap();
    assert!(csv.starts_with("Section,Name,Amount"));
}

#[test]
fn test_notify_lists_due_payments() {
    let dir = initialized();
    on_sample_day(&dir)
        .arg("notify")
        .assert()
        .success()
        .stdout(predicate::str::contains("notificación(es)"));
}

#[test]
fn test_goals_and_payments() {
    let dir = initialized();
    on_sample_day(&dir)
        .arg("goals")
        .assert()
        .success()
        .stdout(predicate::str::contains("Vacaciones Europa"));

    on_sample_day(&dir)
        .arg("payments")
        .assert()
        .success()
        .stdout(predicate::str::contains("Netflix"))
        .stdout(predicate::str::contains("Compromiso mensual"));
}

#[test]
fn test_health_with_overrides() {
    let dir = initialized();
    on_sample_day(&dir)
        .args([
            "health",
            "--income",
            "10000",
            "--expenses",
            "5000",
            "--savings",
            "2000",
            "--debt",
            "0",
            "--emergency-fund",
            "30000",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Salud financiera: 100/100"));
}

#[test]
fn test_config_set_and_format() {
    let dir = initialized();
    lana(&dir).args(["config", "currency", "usd"]).assert().success();
    lana(&dir).args(["config", "locale", "en"]).assert().success();

    lana(&dir)
        .args(["format", "1234.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1,234.50"));

    lana(&dir)
        .args(["config", "set", "display.showDecimals", "false"])
        .assert()
        .success();

    lana(&dir)
        .args(["format", "1234.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1,235"));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let dir = initialized();
    lana(&dir)
        .args(["config", "set", "nope.nothing", "true"])
        .assert()
        .failure();
}

#[test]
fn test_format_rejects_negative_amount() {
    let dir = initialized();
    lana(&dir)
        .args(["format", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("La cantidad no puede ser negativa"));
}

#[test]
fn test_config_export_import() {
    let dir = initialized();
    lana(&dir).args(["config", "currency", "EUR"]).assert().success();

    let backup = dir.path().join("backup.json");
    lana(&dir)
        .args(["config", "export", "--output"])
        .arg(&backup)
        .assert()
        .success();

    lana(&dir).args(["config", "reset"]).assert().success();
    lana(&dir).arg("config").arg("import").arg(&backup).assert().success();

    lana(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moneda:    EUR"));
}

#[test]
fn test_login_validates_before_any_request() {
    let dir = initialized();
    lana(&dir)
        .args(["login", "not-an-email", "--password", "secret"])
        .arg("--api-url")
        .arg("http://127.0.0.1:9")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Por favor, ingresa un correo válido."));
}

#[test]
fn test_logout_without_session() {
    let dir = initialized();
    lana(&dir)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No hay sesión activa."));
}
