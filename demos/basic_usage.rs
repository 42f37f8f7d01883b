//! Basic usage example for thriftpack
//!
//! Run with: cargo run --example basic_usage

use thriftpack::*;

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn main() -> Result<()> {
    println!("thriftpack Basic Usage Example");
    println!("==============================");

    // What an IDL parser would produce for:
    //
    //   enum Side { BUY, SELL }
    //   struct Venue { 1: string mic }
    //   struct Order { 1: string symbol, 2: i32 qty, 3: list<i64> fills,
    //                  4: Venue venue, 5: Side side }
    let document = SchemaDocument::new(vec![
        Statement::Enum("Side".into()),
        Statement::Struct(StructSchema::new(
            "Venue",
            vec![FieldDescriptor::new("mic", 1, TypeSpec::StringOrBinary)],
        )),
        Statement::Struct(StructSchema::new(
            "Order",
            vec![
                FieldDescriptor::new("symbol", 1, TypeSpec::StringOrBinary),
                FieldDescriptor::new("qty", 2, TypeSpec::I32),
                FieldDescriptor::new("fills", 3, TypeSpec::list(TypeSpec::I64)),
                FieldDescriptor::new("venue", 4, TypeSpec::named("Venue")),
                FieldDescriptor::new("side", 5, TypeSpec::named("Side")),
            ],
        )),
    ]);

    // Example 1: baseline encoding, integer fields are recorded only
    println!("\n1. Baseline Order:");
    {
        let namespace = compile_namespace(&document)?;
        println!("  Structs: {:?}", namespace.names().collect::<Vec<_>>());

        let mut order = namespace.create("Order")?;
        order.set_field("symbol", "AAPL")?;
        order.set_field("qty", 100)?;
        order.set_field("fills", Value::from_iter([50_000_000i64, 50_010_000]))?;

        println!("  qty recorded as {:?}", order.get("qty"));
        println!("  Encoded {} bytes: {}", order.bytes().len(), hex(order.bytes()));
    }

    // Example 2: scalar fields, nested struct and a terminated body
    println!("\n2. Order with Scalars and Nested Venue:");
    {
        let config = EncodeConfig::new()
            .with_scalar_fields(true)
            .with_terminate_top_level(true);
        let namespace = compile_namespace_with(&document, config)?;

        let mut venue = namespace.create("Venue")?;
        venue.set_field("mic", "XNAS")?;

        let mut order = namespace.create("Order")?;
        order.set_field("symbol", "AAPL")?;
        order.set_field("qty", -200)?;
        order.set_field("venue", venue)?;
        order.set_field("side", "SELL")?;

        let bytes = order.finish();
        println!("  Encoded {} bytes: {}", bytes.len(), hex(&bytes));
    }

    // Example 3: error handling
    println!("\n3. Error Handling:");
    {
        let namespace = compile_namespace(&document)?;
        let mut order = namespace.create("Order")?;

        match order.set_field("price", 1.5) {
            Err(e) => println!("  Unknown field: {}", e),
            Ok(()) => println!("  Unexpected success"),
        }

        match order.set_field("fills", Value::from_iter(["a", "b"])) {
            Err(e) => println!("  Bad list element: {}", e),
            Ok(()) => println!("  Unexpected success"),
        }

        match namespace.create("Side") {
            Err(e) => println!("  Enum lookup: {}", e),
            Ok(_) => println!("  Unexpected success"),
        }

        println!("  Bytes after rejected assignments: {}", order.bytes().len());
    }

    println!("\nAll examples completed successfully!");
    Ok(())
}
