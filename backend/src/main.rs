use std::path::PathBuf;

use chrono::Local;
use fee_desk::config::{resolve_config, CONFIG_ENV_VAR};
use fee_desk::{collection_rate, FeeDesk, FeeFilter, FeeStorage};
use shared::{FeeListRequest, PaymentMethod};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = resolve_config(std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))?;
    let today = Local::now().date_naive();
    let desk = FeeDesk::with_sample_data(today, config)?;

    let summary = desk.ledger_service.summary()?;
    info!("Summary on open: {}", serde_json::to_string(&summary)?);

    let request = FeeListRequest {
        search: "priya".to_string(),
        status: String::new(),
    };
    let matches = desk.ledger_service.list_fees_for_request(&request)?;
    for row in desk.table_service.format_fees_for_table(&matches) {
        info!(
            "{} | {} | {} due {} | balance {} | {}",
            row.student_name,
            row.class_label,
            row.formatted_amount,
            row.formatted_due_date,
            row.formatted_balance,
            row.status_label
        );
    }

    if let Some(record) = matches.first() {
        let mut form = desk.ledger_service.form_service().open_form(record);
        form.amount_input = "20,000".to_string();
        form.method = PaymentMethod::Upi;
        form.note = "Collected at the front desk".to_string();

        match desk.ledger_service.submit_payment(&mut form) {
            Ok(updated) => {
                info!("{}", form.success_message.unwrap_or_default());
                for payment in desk.table_service.format_payment_history(&updated) {
                    info!(
                        "  {} {} {} via {}",
                        payment.receipt_no, payment.formatted_date, payment.formatted_amount, payment.method_label
                    );
                }
            }
            Err(err) => warn!("Payment not recorded: {}", err),
        }
    }

    let sweep = desk.ledger_service.refresh_overdue(today)?;
    info!("Marked {} fees overdue", sweep.marked_overdue.len());

    let overdue = desk
        .ledger_service
        .list_fees(&FeeFilter::new("", Some(shared::FeeStatus::Overdue)))?;
    for record in &overdue {
        info!("Overdue: {} owes {:.2}", record.student.name, record.remaining_balance);
    }

    let summary = desk.ledger_service.summary()?;
    info!(
        "Summary on close: {} records, collected {:.2}, pending {:.2}, outstanding {:.2} ({:.1}% received)",
        desk.store.list_fees()?.len(),
        summary.collected,
        summary.pending,
        summary.outstanding,
        collection_rate(&summary)
    );

    Ok(())
}
