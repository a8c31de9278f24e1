//! End-to-end tests over synthetic layout dumps.

use releve::{
    parse_bytes, parse_str, render, JsonFormat, LayoutDump, RawBlock, RawLine, RawPage, RawSpan,
    StatementParser, BBox,
};

fn span(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> RawSpan {
    RawSpan {
        text: Some(text.to_string()),
        bbox: Some(BBox::new(x0, y0, x1, y1)),
        font: Some("Helvetica".to_string()),
        size: Some(10.0),
        color: Some(0x112233),
    }
}

fn line(y: f32, spans: Vec<RawSpan>) -> RawLine {
    RawLine {
        bbox: BBox::new(40.0, y, 560.0, y + 12.0),
        spans,
    }
}

fn page(lines: Vec<RawLine>) -> RawPage {
    RawPage {
        width: 600.0,
        height: 800.0,
        blocks: vec![RawBlock::Text { lines }],
    }
}

fn header_line() -> RawLine {
    line(
        100.0,
        vec![
            span("Date", 50.0, 101.0, 80.0, 111.0),
            span("Date de Valeur", 120.0, 101.0, 190.0, 111.0),
            span("Opération", 220.0, 101.0, 280.0, 111.0),
            span("Débit", 380.0, 101.0, 420.0, 111.0),
            span("Crédit", 470.0, 101.0, 510.0, 111.0),
        ],
    )
}

fn anchor_line() -> RawLine {
    line(
        120.0,
        vec![
            span("ANCIEN SOLDE CRÉDITEUR", 50.0, 121.0, 230.0, 131.0),
            span("1 500,00€", 460.0, 121.0, 520.0, 131.0),
        ],
    )
}

fn transaction_line(y: f32, operation: &str, amount: &str, amount_x: f32) -> RawLine {
    line(
        y,
        vec![
            span("01/02/2024", 50.0, y + 1.0, 105.0, y + 11.0),
            span("01/02/2024", 120.0, y + 1.0, 175.0, y + 11.0),
            span(operation, 220.0, y + 1.0, 320.0, y + 11.0),
            span(amount, amount_x, y + 1.0, amount_x + 40.0, y + 11.0),
        ],
    )
}

fn footer_line(y: f32) -> RawLine {
    line(y, vec![span("Fin de relevé", 220.0, y + 1.0, 300.0, y + 11.0)])
}

/// The canonical single-page statement used across tests.
fn statement_page() -> RawPage {
    page(vec![
        header_line(),
        anchor_line(),
        transaction_line(130.0, "Paiement CB", "12,50€", 380.0),
        transaction_line(150.0, "Prélèvement EDF", "45,00€", 385.0),
        footer_line(180.0),
    ])
}

fn continuation_page() -> RawPage {
    page(vec![
        transaction_line(60.0, "Virement reçu", "210,00€", 382.0),
        transaction_line(80.0, "Retrait DAB", "60,00€", 381.0),
        footer_line(110.0),
    ])
}

#[test]
fn classification_flags_are_mutually_exclusive() {
    let dump = LayoutDump {
        pages: vec![statement_page(), continuation_page()],
    };
    let statement = StatementParser::new().parse(&dump).unwrap();

    for bundle in &statement.pages {
        for word in &bundle.words {
            let flags = [
                word.is_header,
                word.is_anchor,
                word.is_anchor_value,
                word.is_table_word,
            ];
            assert!(
                flags.iter().filter(|f| **f).count() <= 1,
                "word '{}' carries multiple flags",
                word.word.text
            );
        }
    }
}

#[test]
fn column_ranges_are_ordered_and_cover_page_width() {
    let dump = LayoutDump {
        pages: vec![statement_page()],
    };
    let statement = StatementParser::new().parse(&dump).unwrap();
    let ranges = statement.column_ranges.as_ref().unwrap();

    assert!(!ranges.is_empty());
    for pair in ranges.windows(2) {
        assert!(pair[0].start_x < pair[1].start_x);
        assert_eq!(pair[0].end_x, pair[1].start_x);
    }
    assert_eq!(ranges.last().unwrap().end_x, 600.0);
}

#[test]
fn identical_input_yields_identical_output() {
    let dump = LayoutDump {
        pages: vec![statement_page(), continuation_page()],
    };
    let parser = StatementParser::new();

    let first = parser.parse(&dump).unwrap();
    let second = parser.parse(&dump).unwrap();
    assert_eq!(first, second);

    let json_a = render::to_json(&first, JsonFormat::Compact).unwrap();
    let json_b = render::to_json(&second, JsonFormat::Compact).unwrap();
    assert_eq!(json_a, json_b);
}

#[test]
fn headerless_document_degrades_without_error() {
    let dump = LayoutDump {
        pages: vec![continuation_page(), continuation_page()],
    };
    let statement = StatementParser::new().parse(&dump).unwrap();

    assert!(statement.column_ranges.is_none());
    assert!(statement.header_groups.is_empty());
    for bundle in &statement.pages {
        assert!(!bundle.has_headers());
        for word in &bundle.words {
            assert!(word.header.is_none());
            assert!(!word.is_table_word);
        }
    }
}

#[test]
fn debit_amount_lands_in_fourth_ordinal_slot() {
    let dump = LayoutDump {
        pages: vec![statement_page()],
    };
    let statement = StatementParser::new().parse(&dump).unwrap();
    let bundle = &statement.pages[0];

    let amount = bundle
        .words
        .iter()
        .find(|w| w.word.text == "12,50€")
        .unwrap();
    assert!(amount.is_table_word);
    assert_eq!(amount.header.as_deref(), Some("Débit"));
}

#[test]
fn anchor_value_forced_into_credit_column() {
    let dump = LayoutDump {
        pages: vec![statement_page()],
    };
    let statement = StatementParser::new().parse(&dump).unwrap();
    let bundle = &statement.pages[0];

    assert_eq!(bundle.anchor_values.len(), 1);
    let value = &bundle.anchor_values[0];
    assert_eq!(value.word.text, "1 500,00€");
    assert!(value.is_anchor_value);
    // x 460 is within 50 units of the Crédit header at 470.
    assert_eq!(value.header.as_deref(), Some("Anchor Value (Crédit)"));

    let marker = bundle
        .words
        .iter()
        .find(|w| w.word.text == "ANCIEN SOLDE CRÉDITEUR")
        .unwrap();
    assert!(marker.is_anchor);
    assert_eq!(marker.header.as_deref(), Some("Anchor"));
}

#[test]
fn continuation_pages_use_first_page_ranges() {
    let dump = LayoutDump {
        pages: vec![statement_page(), continuation_page(), continuation_page()],
    };
    let statement = StatementParser::new().parse(&dump).unwrap();

    // The global standard comes from page 1.
    let global = statement.column_ranges.clone().unwrap();
    let single = StatementParser::new()
        .parse(&LayoutDump {
            pages: vec![statement_page()],
        })
        .unwrap();
    assert_eq!(Some(global.clone()), single.column_ranges);

    // Pages 2 and 3 have no headers yet classify with the cached ranges.
    for bundle in &statement.pages[1..] {
        assert!(!bundle.has_headers());
        let amounts: Vec<_> = bundle
            .words
            .iter()
            .filter(|w| w.word.text.ends_with('€'))
            .collect();
        assert!(!amounts.is_empty());
        for amount in amounts {
            assert!(amount.is_table_word);
            assert_eq!(amount.header.as_deref(), Some("Débit"));
        }
    }
}

#[test]
fn footer_words_never_flagged_as_table_words() {
    let dump = LayoutDump {
        pages: vec![statement_page()],
    };
    let statement = StatementParser::new().parse(&dump).unwrap();
    let bundle = &statement.pages[0];

    let footer = bundle
        .words
        .iter()
        .find(|w| w.word.text == "Fin de relevé")
        .unwrap();
    assert!(!footer.is_table_word);
    assert!(footer.header.is_none());
}

#[test]
fn malformed_spans_do_not_abort_the_page() {
    let mut raw = statement_page();
    if let RawBlock::Text { lines } = &mut raw.blocks[0] {
        lines[2].spans.push(RawSpan {
            text: Some("broken".to_string()),
            ..Default::default()
        });
        lines[2].spans.push(RawSpan::default());
    }
    let dump = LayoutDump { pages: vec![raw] };

    let statement = StatementParser::new().parse(&dump).unwrap();
    let bundle = &statement.pages[0];
    assert!(bundle.words.iter().all(|w| w.word.text != "broken"));
    assert!(bundle.table_words().count() > 0);
}

#[test]
fn parse_json_dump_end_to_end() {
    let dump = LayoutDump {
        pages: vec![statement_page(), continuation_page()],
    };
    let json = serde_json::to_string(&dump).unwrap();

    let statement = parse_str(&json).unwrap();
    assert_eq!(statement.page_count(), 2);
    assert_eq!(statement.pages[0].number, 1);
    assert_eq!(statement.pages[1].number, 2);
    assert_eq!(statement.header_groups.len(), 5);

    let from_bytes = parse_bytes(json.as_bytes()).unwrap();
    assert_eq!(from_bytes, statement);
}

#[test]
fn parse_file_from_disk() {
    let dump = LayoutDump {
        pages: vec![statement_page()],
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("statement.json");
    std::fs::write(&path, serde_json::to_vec(&dump).unwrap()).unwrap();

    let statement = releve::parse_file(&path).unwrap();
    assert_eq!(statement.page_count(), 1);
    assert!(statement.column_ranges.is_some());
}

#[test]
fn header_tokens_carry_group_occurrences() {
    let dump = LayoutDump {
        pages: vec![statement_page()],
    };
    let statement = StatementParser::new().parse(&dump).unwrap();
    let bundle = &statement.pages[0];

    let header = bundle
        .words
        .iter()
        .find(|w| w.word.text == "Crédit")
        .unwrap();
    assert!(header.is_header);
    let token = header.token.as_ref().unwrap();
    assert_eq!(token["text"], "Crédit");
    assert_eq!(token["x"], 470.0);
    assert_eq!(token["y"], 100.0);
    assert_eq!(token["font"], "Helvetica");
    assert_eq!(token["color"], "rgb(17,34,51)");
    // The occurrence shape, not the word snapshot.
    assert!(token.get("left").is_none());
    assert!(token.get("top").is_none());
    assert!(token.get("type").is_none());
}

#[test]
fn token_snapshots_carry_resolved_type() {
    let dump = LayoutDump {
        pages: vec![statement_page()],
    };
    let statement = StatementParser::new().parse(&dump).unwrap();
    let bundle = &statement.pages[0];

    let amount = bundle
        .words
        .iter()
        .find(|w| w.word.text == "12,50€")
        .unwrap();
    let token = amount.token.as_ref().unwrap();
    assert_eq!(token["type"], "Débit");
    assert_eq!(token["text"], "12,50€");

    let unclassified = bundle
        .words
        .iter()
        .find(|w| w.word.text == "Fin de relevé")
        .unwrap();
    assert!(unclassified.token.is_none());
}
