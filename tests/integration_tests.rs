//! Integration tests for thriftpack
//!
//! These tests drive the public API end to end: document in, Compact bytes out.

use thriftpack::*;

/// Parser stand-in that accepts one known source text
struct FixtureParser;

impl SchemaParser for FixtureParser {
    type Error = String;

    fn parse(&self, source: &str) -> std::result::Result<SchemaDocument, String> {
        if source.trim() != "struct User { 1: i16 age, 2: string name }" {
            return Err(format!("unexpected token at 0: {:?}", source));
        }

        Ok(SchemaDocument::new(vec![Statement::Struct(StructSchema::new(
            "User",
            vec![
                FieldDescriptor::new("age", 1, TypeSpec::I16),
                FieldDescriptor::new("name", 2, TypeSpec::StringOrBinary),
            ],
        ))]))
    }
}

fn decode_varint(bytes: &[u8]) -> (u64, usize) {
    varint::decode_u64(bytes).unwrap()
}

fn catalog() -> SchemaDocument {
    SchemaDocument::new(vec![
        Statement::Typedef("Id".into()),
        Statement::Enum("Color".into()),
        Statement::Struct(StructSchema::new(
            "Tag",
            vec![
                FieldDescriptor::new("label", 1, TypeSpec::StringOrBinary),
                FieldDescriptor::new("weight", 2, TypeSpec::I32),
            ],
        )),
        Statement::Struct(StructSchema::new(
            "Item",
            vec![
                FieldDescriptor::new("title", 1, TypeSpec::StringOrBinary),
                FieldDescriptor::new("sizes", 2, TypeSpec::list(TypeSpec::I16)),
                FieldDescriptor::new("flags", 3, TypeSpec::list(TypeSpec::Bool)),
                FieldDescriptor::new("tag", 4, TypeSpec::named("Tag")),
                FieldDescriptor::new("color", 5, TypeSpec::named("Color")),
                FieldDescriptor::new("blob", 40, TypeSpec::StringOrBinary),
                FieldDescriptor::new("price", 41, TypeSpec::Double),
                FieldDescriptor::new("attrs", 42, TypeSpec::map(TypeSpec::StringOrBinary, TypeSpec::I32)),
                FieldDescriptor::new("stock", 43, TypeSpec::I64),
                FieldDescriptor::new("ratios", 44, TypeSpec::list(TypeSpec::Double)),
            ],
        )),
    ])
}

#[test]
fn test_create_thrift_with_parser() {
    let config = EncodeConfig::new().with_scalar_fields(true);
    let namespace =
        create_thrift_with("struct User { 1: i16 age, 2: string name }", &FixtureParser, config)
            .unwrap();

    let mut user = namespace.create("User").unwrap();
    user.set_field("age", 150i16).unwrap();
    user.set_field("name", "al").unwrap();

    assert_eq!(user.bytes(), &[0x14, 0xAC, 0x02, 0x18, 0x02, b'a', b'l']);
    assert_eq!(user.get("age"), Some(&Value::I16(150)));
}

#[test]
fn test_parse_error_is_returned() {
    let result = create_thrift("struct {", &FixtureParser);
    match result {
        Err(Error::Parse(message)) => assert!(message.contains("unexpected token")),
        other => panic!("expected parse error, got {:?}", other.map(|ns| ns.len())),
    }
}

#[test]
fn test_full_item_encoding() {
    let namespace = compile_namespace(&catalog()).unwrap();
    assert_eq!(namespace.len(), 2);

    let mut tag = namespace.create("Tag").unwrap();
    tag.set_field("label", "new").unwrap();

    let mut item = namespace.create("Item").unwrap();
    item.set_field("title", "Mug").unwrap();
    item.set_field("sizes", Value::from_iter([8i16, -3])).unwrap();
    item.set_field("flags", Value::from_iter([true, false])).unwrap();
    item.set_field("tag", tag).unwrap();
    item.set_field("blob", vec![0x80u8, 0xFF]).unwrap();

    let expected: &[u8] = &[
        0x18, 0x03, b'M', b'u', b'g', // title
        0x19, 0x24, 0x10, 0x05, // sizes: list<i16> [8, -3]
        0x19, 0x21, 0x01, 0x02, // flags: list<bool> [true, false]
        0x1C, 0x18, 0x03, b'n', b'e', b'w', 0x00, // tag
        0x08, 0x50, 0x02, 0x80, 0xFF, // blob: delta 36, long header
    ];
    assert_eq!(item.bytes(), expected);
}

#[test]
fn test_gap_fields_record_without_bytes() {
    let namespace = compile_namespace(&catalog()).unwrap();
    let mut item = namespace.create("Item").unwrap();

    item.set_field("price", 9.99).unwrap();
    item.set_field("stock", 12i64).unwrap();
    item.set_field("attrs", Value::List(vec![])).unwrap();
    item.set_field("weight_unused_by_item", 1).unwrap_err();

    assert!(item.bytes().is_empty());
    assert_eq!(item.get("price"), Some(&Value::Double(9.99)));
    assert_eq!(item.get("stock"), Some(&Value::I64(12)));
}

#[test]
fn test_scalar_capability_encodes_integers() {
    let config = EncodeConfig::new().with_scalar_fields(true);
    let namespace = compile_namespace_with(&catalog(), config).unwrap();

    let mut tag = namespace.create("Tag").unwrap();
    tag.set_field("weight", -1).unwrap();
    assert_eq!(tag.bytes(), &[0x25, 0x01]);

    let mut item = namespace.create("Item").unwrap();
    item.set_field("stock", i64::MAX).unwrap();
    let bytes = item.bytes();
    assert_eq!(bytes[0], CompactType::I64);
    assert_eq!(decode_varint(&bytes[1..]), (43 * 2, 1));
    assert_eq!(decode_varint(&bytes[2..]), (u64::MAX - 1, 10));

    assert!(matches!(
        item.set_field("price", 1.0),
        Err(Error::Unsupported { .. })
    ));
}

#[test]
fn test_enum_reference_is_opaque() {
    let namespace = compile_namespace(&catalog()).unwrap();
    let mut item = namespace.create("Item").unwrap();

    item.set_field("color", "RED").unwrap();
    assert_eq!(item.bytes(), &[0x5C, b'R', b'E', b'D', 0x00]);

    assert!(matches!(
        item.set_field("color", 2),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_unsupported_list_elements() {
    let namespace = compile_namespace(&catalog()).unwrap();
    let mut item = namespace.create("Item").unwrap();

    let result = item.set_field("ratios", Value::from_iter([0.5, 1.5]));
    assert_eq!(
        result,
        Err(Error::Unsupported {
            field: "ratios".into(),
            what: "list elements of this type",
        })
    );
    assert!(item.bytes().is_empty());
    assert!(item.get("ratios").is_none());
}

#[test]
fn test_unknown_field_leaves_sink_unchanged() {
    let namespace = compile_namespace(&catalog()).unwrap();
    let mut item = namespace.create("Item").unwrap();
    item.set_field("title", "A").unwrap();
    let before = item.bytes().to_vec();

    let err = item.set_field("missing", "x").unwrap_err();
    assert_eq!(
        err,
        Error::UnknownField {
            structure: "Item".into(),
            field: "missing".into(),
        }
    );
    assert_eq!(err.to_string(), "field 'missing' does not exist in struct 'Item'");
    assert_eq!(item.bytes(), before.as_slice());
}

#[test]
fn test_out_of_order_fields_use_long_headers() {
    let namespace = compile_namespace(&catalog()).unwrap();
    let mut tag = namespace.create("Tag").unwrap();
    let mut reversed = namespace.create("Item").unwrap();
    tag.set_field("label", "").unwrap();

    reversed.set_field("tag", tag).unwrap();
    reversed.set_field("title", "").unwrap();

    assert_eq!(
        reversed.bytes(),
        &[
            0x4C, 0x18, 0x00, 0x00, // tag, nested label
            0x08, 0x02, 0x00, // title: delta -3, long header, zigzag(1) = 2
        ]
    );
}

#[test]
fn test_deeply_nested_structs() {
    let document = SchemaDocument::new(vec![Statement::Struct(StructSchema::new(
        "Node",
        vec![
            FieldDescriptor::new("name", 1, TypeSpec::StringOrBinary),
            FieldDescriptor::new("child", 2, TypeSpec::named("Node")),
        ],
    ))]);
    let namespace = compile_namespace(&document).unwrap();

    let mut leaf = namespace.create("Node").unwrap();
    leaf.set_field("name", "c").unwrap();
    let mut middle = namespace.create("Node").unwrap();
    middle.set_field("child", leaf).unwrap();
    let mut root = namespace.create("Node").unwrap();
    root.set_field("name", "r").unwrap();
    root.set_field("child", middle).unwrap();

    assert_eq!(
        root.bytes(),
        &[
            0x18, 0x01, b'r', //
            0x1C, // root.child
            0x2C, // middle.child
            0x18, 0x01, b'c', 0x00, // leaf body + stop
            0x00, // middle stop
        ]
    );
    assert_eq!(root.writer().depth(), 0);
    assert_eq!(root.writer().last_field_id(), 2);
}

#[test]
fn test_writer_nesting_matches_dispatch() {
    let mut writer = CompactWriter::new();
    writer.write_binary(1, b"r");
    writer.write_struct_begin(2);
    writer.write_struct_begin(2);
    writer.write_binary(1, b"c");
    writer.write_stop();
    writer.write_stop();

    assert_eq!(writer.depth(), 0);
    assert_eq!(writer.last_field_id(), 2);
    assert_eq!(
        writer.into_bytes(),
        vec![0x18, 0x01, b'r', 0x1C, 0x2C, 0x18, 0x01, b'c', 0x00, 0x00]
    );
}

#[test]
fn test_long_list_roundtrips_sizes() {
    let document = SchemaDocument::new(vec![Statement::Struct(StructSchema::new(
        "Series",
        vec![FieldDescriptor::new("points", 1, TypeSpec::list(TypeSpec::I32))],
    ))]);
    let namespace = compile_namespace(&document).unwrap();

    for size in [0usize, 1, 14, 15, 200] {
        let mut series = namespace.create("Series").unwrap();
        series
            .set_field("points", (0..size as i32).collect::<Value>())
            .unwrap();
        let bytes = series.finish();

        assert_eq!(bytes[0], 0x19);
        let (decoded, used) = if size < 15 {
            ((bytes[1] >> 4) as u64, 2)
        } else {
            assert_eq!(bytes[1], 0xF5);
            let (n, len) = decode_varint(&bytes[2..]);
            (n, 2 + len)
        };
        assert_eq!(decoded, size as u64);

        let mut pos = used;
        for expected in 0..size as i64 {
            let (raw, len) = decode_varint(&bytes[pos..]);
            assert_eq!(varint::unzigzag(raw, 32), expected);
            pos += len;
        }
        assert_eq!(pos, bytes.len());
    }
}

#[test]
fn test_namespace_shared_across_threads() {
    let namespace = std::sync::Arc::new(compile_namespace(&catalog()).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let namespace = std::sync::Arc::clone(&namespace);
            std::thread::spawn(move || {
                let mut tag = namespace.create("Tag").unwrap();
                tag.set_field("label", format!("t{i}")).unwrap();
                tag.finish()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let bytes = handle.join().unwrap();
        assert_eq!(bytes, vec![0x18, 0x02, b't', b'0' + i as u8]);
    }
}
