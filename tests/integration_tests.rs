//! Integration tests for attachment-matcher

use attachment_matcher::{
    find_attachment, find_attachment_match, find_transaction, find_transaction_match,
    names_match, normalize_name, normalize_reference, utils::MemoryStore, Attachment, MatchKind,
    NameSignal, ReconcileDirection, Reconciler, Transaction,
};
use bigdecimal::BigDecimal;
use std::str::FromStr;

fn amount(value: &str) -> BigDecimal {
    BigDecimal::from_str(value).unwrap()
}

fn scored(kind: &MatchKind) -> u32 {
    match kind {
        MatchKind::Scored(pair) => pair.score,
        MatchKind::Reference => panic!("expected a scored match"),
    }
}

#[test]
fn test_invoice_scenario_from_json() {
    let transaction: Transaction = serde_json::from_str(
        r#"{"amount": 150.00, "date": "2024-03-10", "contact": "Acme Corp", "reference": null}"#,
    )
    .unwrap();
    let attachments: Vec<Attachment> = serde_json::from_str(
        r#"[{"data": {"total_amount": 150.00, "due_date": "2024-03-09", "recipient": "Acme Corporation"}}]"#,
    )
    .unwrap();

    let found = find_attachment_match(&transaction, &attachments).unwrap();
    assert_eq!(found.index, 0);
    match &found.kind {
        MatchKind::Scored(pair) => {
            assert_eq!(pair.date_diff, Some(1));
            assert_eq!(pair.name, Some(NameSignal::Partial));
            assert_eq!(pair.score, 10 + 7 + 4);
        }
        MatchKind::Reference => panic!("expected a scored match"),
    }
}

#[test]
fn test_json_amount_matches_decimal_built_record() {
    let transaction: Transaction = serde_json::from_str(
        r#"{"amount": -89.9, "date": "2024-05-02", "contact": "Globex GmbH"}"#,
    )
    .unwrap();
    let built = vec![Attachment::new(amount("89.90"))
        .with_invoicing_date("2024-05-02")
        .with_issuer("Globex GmbH")];
    assert_eq!(find_attachment(&transaction, &built), Some(&built[0]));

    let loaded: Vec<Attachment> = serde_json::from_str(
        r#"[{"data": {"total_amount": "89.90", "invoicing_date": "2024-05-02", "issuer": "Globex GmbH"}}]"#,
    )
    .unwrap();
    assert_eq!(find_attachment(&transaction, &loaded), Some(&loaded[0]));

    let transactions = vec![transaction.clone()];
    assert_eq!(find_transaction(&built[0], &transactions), Some(&transaction));
}

#[test]
fn test_null_total_amount_defaults_to_zero() {
    let attachment: Attachment = serde_json::from_str(
        r#"{"data": {"total_amount": null, "reference": "INV-9", "due_date": null}}"#,
    )
    .unwrap();
    assert_eq!(attachment.data.total_amount, BigDecimal::from(0));
    assert!(attachment.data.due_date.is_none());

    let transactions = vec![Transaction::new(amount("0")).with_reference("inv-9")];
    assert!(find_transaction(&attachment, &transactions).is_some());
}

#[test]
fn test_missing_fields_deserialize_as_absent() {
    let attachment: Attachment =
        serde_json::from_str(r#"{"data": {"issuer": "Globex", "vat": 19}}"#).unwrap();
    assert_eq!(attachment.data.total_amount, BigDecimal::from(0));
    assert!(attachment.data.reference.is_none());

    let empty: Attachment = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, Attachment::default());

    let transaction: Transaction = serde_json::from_str(r#"{"contact": "Globex"}"#).unwrap();
    assert_eq!(transaction.amount, BigDecimal::from(0));
}

#[test]
fn test_malformed_record_fails_at_deserialization() {
    assert!(serde_json::from_str::<Attachment>(r#"{"data": "not a record"}"#).is_err());
    assert!(serde_json::from_str::<Transaction>("[1, 2]").is_err());
}

#[test]
fn test_reference_match_ignores_every_other_signal() {
    let transaction = Transaction::new(amount("10.00"))
        .with_reference("RF 0012 34")
        .with_date("2020-01-01")
        .with_contact("Nobody");
    let attachments = vec![
        Attachment::new(amount("10.00"))
            .with_due_date("2020-01-01")
            .with_recipient("Nobody"),
        Attachment::new(amount("9999"))
            .with_reference("rf001234")
            .with_due_date("1999-12-31")
            .with_issuer("Someone Else"),
    ];

    let found = find_attachment_match(&transaction, &attachments).unwrap();
    assert_eq!(found.index, 1);
    assert_eq!(found.kind, MatchKind::Reference);

    let transactions = vec![transaction.clone()];
    let found = find_transaction_match(&attachments[1], &transactions).unwrap();
    assert_eq!(found.kind, MatchKind::Reference);
}

#[test]
fn test_blank_references_never_match() {
    let transaction = Transaction::new(amount("1")).with_reference("000");
    let attachments = vec![Attachment::new(amount("2")).with_reference("0 0")];

    assert!(find_attachment(&transaction, &attachments).is_none());
}

#[test]
fn test_amount_gate() {
    let transaction = Transaction::new(amount("-200.00"))
        .with_date("2024-06-01")
        .with_contact("Hooli");
    let attachments = vec![
        Attachment::new(amount("200.01"))
            .with_due_date("2024-06-01")
            .with_recipient("Hooli"),
        Attachment::new(amount("199.99"))
            .with_due_date("2024-06-01")
            .with_recipient("Hooli"),
    ];
    assert!(find_attachment(&transaction, &attachments).is_none());

    let mut attachments = attachments;
    attachments.push(
        Attachment::new(amount("200"))
            .with_due_date("2024-06-01")
            .with_recipient("Hooli"),
    );
    let found = find_attachment(&transaction, &attachments).unwrap();
    assert_eq!(found.data.total_amount.abs(), transaction.amount.abs());
}

#[test]
fn test_threshold_boundary() {
    let transaction = Transaction::new(amount("80"))
        .with_date("2024-02-10")
        .with_contact("Stark Industries");

    // amount + same-day date, no name: 17
    let same_day = vec![Attachment::new(amount("80")).with_invoicing_date("2024-02-10")];
    let found = find_attachment_match(&transaction, &same_day).unwrap();
    assert_eq!(scored(&found.kind), 17);

    // amount + exact name, no date: 17
    let exact_name = vec![Attachment::new(amount("80")).with_issuer("stark  industries")];
    let found = find_attachment_match(&transaction, &exact_name).unwrap();
    assert_eq!(scored(&found.kind), 17);

    // amount + fuzzy name + date at the window edge: 10 + 3 + 4
    let far_date = vec![Attachment::new(amount("80"))
        .with_due_date("2024-02-20")
        .with_issuer("Stark")];
    let found = find_attachment_match(&transaction, &far_date).unwrap();
    assert_eq!(scored(&found.kind), 17);

    // amount + fuzzy name only: 14
    let fuzzy_name = vec![Attachment::new(amount("80")).with_issuer("Stark")];
    assert!(find_attachment(&transaction, &fuzzy_name).is_none());
}

#[test]
fn test_date_without_name_requires_same_day() {
    let transaction = Transaction::new(amount("45")).with_date("2024-09-10");
    let attachments = vec![Attachment::new(amount("45")).with_due_date("2024-09-11")];

    assert!(find_attachment(&transaction, &attachments).is_none());

    let transactions = vec![transaction];
    assert!(find_transaction(&attachments[0], &transactions).is_none());
}

#[test]
fn test_unparsable_date_only_drops_that_date() {
    let transaction = Transaction::new(amount("12.50"))
        .with_date("2024-04-04")
        .with_contact("Wayne");
    let attachments = vec![Attachment::new(amount("12.5"))
        .with_due_date("04/04/2024")
        .with_invoicing_date("2024-04-04")
        .with_recipient("Wayne Enterprises")];

    let found = find_attachment_match(&transaction, &attachments).unwrap();
    assert_eq!(scored(&found.kind), 10 + 7 + 4);
}

#[test]
fn test_directions_are_mirrors() {
    let transactions = vec![
        Transaction::new(amount("-310.40"))
            .with_date("2024-11-02")
            .with_contact("Jon Smyth"),
        Transaction::new(amount("310.40"))
            .with_date("2024-11-20")
            .with_contact("Jane Roe"),
        Transaction::new(amount("999")),
    ];
    let attachments = vec![
        Attachment::new(amount("55")).with_recipient("Jon Smyth"),
        Attachment::new(amount("310.4"))
            .with_due_date("2024-11-05")
            .with_invoicing_date("2024-10-30")
            .with_supplier("John Q Smith"),
    ];

    let attachment = find_attachment_match(&transactions[0], &attachments).unwrap();
    let transaction = find_transaction_match(&attachments[1], &transactions).unwrap();

    assert_eq!(attachment.index, 1);
    assert_eq!(transaction.index, 0);
    assert_eq!(attachment.kind, transaction.kind);
}

#[test]
fn test_name_examples() {
    assert!(names_match(Some("John Doe"), Some("John")));
    assert!(!names_match(Some("Jon Doe"), Some("John Smith")));
}

#[test]
fn test_normalization_idempotence() {
    for input in ["  0012 ab ", "Mixed   CASE name", "\u{a0}x\u{a0}", "0"] {
        let name = normalize_name(Some(input));
        assert_eq!(normalize_name(Some(&name)), name);

        let reference = normalize_reference(Some(input));
        assert_eq!(normalize_reference(Some(&reference)), reference);
    }
}

#[tokio::test]
async fn test_batch_reconciliation() {
    let store = MemoryStore::new();
    store
        .add_transaction(
            Transaction::new(amount("-150.00"))
                .with_date("2024-03-10")
                .with_contact("Acme Corp"),
        )
        .unwrap();
    store
        .add_transaction(Transaction::new(amount("42")).with_reference("INV 0042"))
        .unwrap();
    store
        .add_transaction(Transaction::new(amount("7")).with_date("2024-01-01"))
        .unwrap();

    store
        .add_attachment(Attachment::new(amount("42")).with_reference("inv0042"))
        .unwrap();
    store
        .add_attachment(
            Attachment::new(amount("150"))
                .with_due_date("2024-03-09")
                .with_recipient("Acme Corporation"),
        )
        .unwrap();
    store
        .add_attachment(Attachment::new(amount("1000")).with_due_date("not-a-date"))
        .unwrap();

    let reconciler = Reconciler::new(store);
    let report = reconciler.reconcile_transactions().await.unwrap();

    assert_eq!(report.matches.len(), 2);
    assert_eq!(report.matches[0].transaction_index, 0);
    assert_eq!(report.matches[0].attachment_index, 1);
    assert_eq!(report.matches[1].transaction_index, 1);
    assert_eq!(report.matches[1].attachment_index, 0);
    assert_eq!(report.matches[1].kind, MatchKind::Reference);
    assert_eq!(report.unmatched_transactions, vec![2]);
    assert_eq!(report.unmatched_attachments, vec![2]);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("due_date"));

    let mirrored = reconciler.reconcile_attachments().await.unwrap();
    assert_eq!(mirrored.matches.len(), 2);
    assert_eq!(mirrored.unmatched_transactions, vec![2]);
    assert_ne!(mirrored.id, report.id);

    assert_eq!(report.direction, ReconcileDirection::Transactions);
    assert_eq!(mirrored.direction, ReconcileDirection::Attachments);
    assert!((report.match_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
    assert!((mirrored.match_rate() - 2.0 / 3.0).abs() < f64::EPSILON);
    assert_eq!(mirrored.unmatched_attachments, vec![2]);
}
