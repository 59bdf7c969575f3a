//! End-to-end packing of an in-memory result set.

use std::borrow::Cow;

use rowpack::{
    ColumnMeta, FieldType, MemorySource, PackedRow, PackedRowBatch, RowError, SourceType,
    SourceValue, Value,
};

fn inventory_source() -> MemorySource {
    let mut source = MemorySource::new(vec![
        ColumnMeta::new("item_id", SourceType::BigInt { unsigned: true }),
        ColumnMeta::new("name", SourceType::WideText),
        ColumnMeta::new("sku", SourceType::Text),
        ColumnMeta::new("price", SourceType::Currency),
        ColumnMeta::new("weight", SourceType::Double),
        ColumnMeta::new("stock", SourceType::Int { unsigned: false }),
        ColumnMeta::new("tags", SourceType::Bytes),
        ColumnMeta::new("discontinued", SourceType::Bool),
    ]);

    source
        .push_row(vec![
            Some(SourceValue::UInt(10_001)),
            Some(SourceValue::Text("Mjölnir replica".into())),
            Some(SourceValue::Text("MJ-1".into())),
            Some(SourceValue::Int(12_990_000)),
            Some(SourceValue::Float(2.5)),
            Some(SourceValue::Int(12)),
            Some(SourceValue::Bytes(vec![0x01, 0x02])),
            Some(SourceValue::Bool(false)),
        ])
        .unwrap();

    // Nulls and zeros everywhere the format allows them.
    source
        .push_row(vec![
            Some(SourceValue::UInt(10_002)),
            None,
            Some(SourceValue::Text(String::new())),
            None,
            Some(SourceValue::Float(0.0)),
            Some(SourceValue::Int(-4)),
            None,
            Some(SourceValue::Int(1)),
        ])
        .unwrap();

    source
}

#[test]
fn packs_and_decodes_a_realistic_result_set() {
    let mut source = inventory_source();
    let batch = PackedRowBatch::from_source(&mut source).unwrap();

    assert_eq!(batch.len(), 2);
    let descriptor = batch.descriptor();
    assert_eq!(descriptor.column_count(), 8);
    assert_eq!(descriptor.columns()[3].field_type, FieldType::Currency);
    assert_eq!(descriptor.column_index("weight"), Some(4));
    // item_id, price, weight, stock, discontinued are fixed-width.
    assert_eq!(descriptor.bitmask_len(), 1);

    let first = batch.get(0).unwrap().values().unwrap();
    assert_eq!(first[0], Value::UInt(10_001));
    assert_eq!(first[1], Value::Text(Cow::Borrowed("Mjölnir replica")));
    assert_eq!(first[2], Value::Text(Cow::Borrowed("MJ-1")));
    assert_eq!(first[3], Value::Int(12_990_000));
    assert_eq!(first[4], Value::Float(2.5));
    assert_eq!(first[5], Value::Int(12));
    assert_eq!(first[6], Value::Bytes(Cow::Borrowed(&[0x01, 0x02][..])));
    assert_eq!(first[7], Value::Bool(false));

    let second = batch.get(1).unwrap().values().unwrap();
    assert_eq!(second[1], Value::Text(Cow::Borrowed("")));
    assert_eq!(second[3], Value::Int(0));
    assert_eq!(second[4], Value::Float(0.0));
    assert_eq!(second[5], Value::Int(-4));
    assert_eq!(second[6], Value::Bytes(Cow::Borrowed(&[][..])));
    assert_eq!(second[7], Value::Bool(true));
}

#[test]
fn packed_rows_survive_a_byte_level_round_trip() {
    let mut source = inventory_source();
    let batch = PackedRowBatch::from_source(&mut source).unwrap();

    for row in &batch {
        let wire = row.as_bytes().to_vec();
        let reloaded = PackedRow::from_bytes(wire, batch.descriptor().clone()).unwrap();
        assert_eq!(reloaded.values().unwrap(), row.values().unwrap());
    }
}

#[test]
fn corrupted_wire_bytes_are_rejected() {
    let mut source = inventory_source();
    let batch = PackedRowBatch::from_source(&mut source).unwrap();
    let row = batch.get(0).unwrap();

    let truncated = row.as_bytes()[..row.as_bytes().len() - 3].to_vec();
    let err = PackedRow::from_bytes(truncated, batch.descriptor().clone()).unwrap_err();
    assert!(err.is_corruption());

    let mut padded = row.as_bytes().to_vec();
    padded.extend_from_slice(&[0xDE, 0xAD]);
    let err = PackedRow::from_bytes(padded, batch.descriptor().clone()).unwrap_err();
    assert!(matches!(err, RowError::DescriptorMismatch { .. }));
}

#[test]
fn unsupported_column_type_fails_before_any_row_is_packed() {
    let mut source = MemorySource::new(vec![
        ColumnMeta::new("id", SourceType::Int { unsigned: false }),
        ColumnMeta::new("metadata", SourceType::Json),
    ]);
    source
        .push_row(vec![
            Some(SourceValue::Int(1)),
            Some(SourceValue::Text("{}".into())),
        ])
        .unwrap();

    let err = PackedRowBatch::from_source(&mut source).unwrap_err();
    match err {
        RowError::UnsupportedColumnType { column, type_name } => {
            assert_eq!(column, "metadata");
            assert_eq!(type_name, "Json");
        }
        other => panic!("expected UnsupportedColumnType, got {other:?}"),
    }
}
