//! Basic matching usage example

use attachment_matcher::utils::MemoryStore;
use attachment_matcher::{
    find_attachment_match, find_transaction, Attachment, MatchKind, Reconciler, Transaction,
};
use bigdecimal::BigDecimal;
use std::str::FromStr;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Attachment Matcher - Basic Matching Example\n");

    let transactions = vec![
        Transaction::new(BigDecimal::from_str("-150.00")?)
            .with_date("2024-03-10")
            .with_contact("Acme Corp"),
        Transaction::new(BigDecimal::from_str("89.90")?).with_reference("RE 000451"),
        Transaction::new(BigDecimal::from_str("12.00")?).with_date("2024-03-15"),
    ];

    let attachments = vec![
        Attachment::new(BigDecimal::from_str("89.90")?)
            .with_reference("re451")
            .with_invoicing_date("2024-02-28")
            .with_recipient("Globex GmbH"),
        Attachment::new(BigDecimal::from_str("150")?)
            .with_due_date("2024-03-09")
            .with_invoicing_date("2024-02-24")
            .with_recipient("ACME Corporation"),
    ];

    // 1. Match a single transaction and explain the decision
    println!("🔍 Matching transactions one by one...\n");
    for (index, transaction) in transactions.iter().enumerate() {
        match find_attachment_match(transaction, &attachments) {
            Some(found) => match &found.kind {
                MatchKind::Reference => {
                    println!("  ✓ Transaction {index} -> attachment {} (reference)", found.index)
                }
                MatchKind::Scored(pair) => println!(
                    "  ✓ Transaction {index} -> attachment {} (score {}, {} signals)",
                    found.index, pair.score, pair.signals
                ),
            },
            None => println!("  ✗ Transaction {index}: no confident match"),
        }
    }
    println!();

    // 2. Search in the other direction
    println!("🔁 Looking up the payment for an invoice...");
    if let Some(payment) = find_transaction(&attachments[1], &transactions) {
        println!("  ✓ Paid by transaction of {}", payment.amount);
    }
    println!();

    // 3. Reconcile a whole store
    println!("📊 Reconciling the store...");
    let store = MemoryStore::with_records(transactions, attachments);
    let report = Reconciler::new(store).reconcile_transactions().await?;
    println!("  Run:                    {}", report.id);
    println!("  Matched:                {}", report.matches.len());
    println!("  Unmatched transactions: {:?}", report.unmatched_transactions);
    println!("  Unmatched attachments:  {:?}", report.unmatched_attachments);
    println!("  Match rate:             {:.0}%", report.match_rate() * 100.0);

    Ok(())
}
