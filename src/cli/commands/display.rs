//! Shared display helpers for commands.

use std::collections::BTreeSet;

use crate::records::{Balance, Payment};
use crate::ui::UserInterface;

/// Show what an order costs.
pub fn show_payment(ui: &mut dyn UserInterface, payment: &Payment, payee: Option<&str>) {
    ui.message(&format!(
        "  Dataset:       {} (item #{})",
        payment.item_name, payment.item_id
    ));
    ui.message(&format!("  Matched rows:  {}", payment.matched_rows));
    ui.message(&format!(
        "  Price per row: {}",
        format_balance(payment.price_per_row)
    ));
    ui.message(&format!("  Amount due:    {}", format_balance(payment.amount)));
    if let Some(payee) = payee {
        ui.message(&format!("  Payee:         {}", payee));
    }
}

/// Group digits in threes: `1234567` becomes `1,234,567`.
pub fn format_balance(value: Balance) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Comma-separated ids, or "none".
pub fn format_ids(ids: &BTreeSet<u64>) -> String {
    if ids.is_empty() {
        return "none".to_string();
    }
    ids.iter()
        .map(|id| format!("#{}", id))
        .collect::<Vec<_>>()
        .join(", ")
}
