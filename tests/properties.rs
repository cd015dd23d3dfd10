//! Property-based tests for scalar typing and the column/row duality

use mochadb::{Column, Data, Row, ScalarType, Table, Value};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn round_trips(value: Value) -> bool {
    value.data_type().parse(&value.to_string()).ok() == Some(value)
}

proptest! {
    #[test]
    fn test_integer_values_round_trip(
        a in any::<i16>(),
        b in any::<i32>(),
        c in any::<i64>(),
        d in any::<u64>(),
        e in any::<u8>(),
        f in any::<i8>(),
        g in any::<u16>(),
        h in any::<u32>(),
        i in any::<i64>()
    ) {
        prop_assert!(round_trips(Value::Int16(a)));
        prop_assert!(round_trips(Value::Int32(b)));
        prop_assert!(round_trips(Value::Int64(c)));
        prop_assert!(round_trips(Value::UInt64(d)));
        prop_assert!(round_trips(Value::Byte(e)));
        prop_assert!(round_trips(Value::SByte(f)));
        prop_assert!(round_trips(Value::UInt16(g)));
        prop_assert!(round_trips(Value::UInt32(h)));
        prop_assert!(round_trips(Value::AutoInt(i)));
    }

    #[test]
    fn test_decimal_values_round_trip(mantissa in any::<i64>(), scale in 0u32..28) {
        prop_assert!(round_trips(Value::Decimal(Decimal::new(mantissa, scale))));
    }

    #[test]
    fn test_text_values_round_trip(s in ".*", c in any::<char>(), b in any::<bool>()) {
        prop_assert!(round_trips(Value::String(s.clone())));
        prop_assert!(round_trips(Value::Unique(s)));
        prop_assert!(round_trips(Value::Char(c)));
        prop_assert!(round_trips(Value::Boolean(b)));
    }

    #[test]
    fn test_fractional_values_round_trip(x in -1.0e12f64..1.0e12, y in -1.0e6f32..1.0e6) {
        prop_assert!(round_trips(Value::Double(x)));
        prop_assert!(round_trips(Value::Float(y)));
    }

    #[test]
    fn test_datetime_round_trips(secs in 0i64..4_000_000_000, millis in 0u32..1000) {
        let dt = chrono::DateTime::from_timestamp(secs, millis * 1_000_000)
            .unwrap()
            .naive_utc();
        prop_assert!(round_trips(Value::DateTime(dt)));
    }

    #[test]
    fn test_is_type_agrees_with_parse(text in "[0-9a-z.-]{0,6}") {
        for ty in [ScalarType::Int32, ScalarType::Double, ScalarType::Boolean, ScalarType::Decimal] {
            prop_assert_eq!(ty.is_type(&text), ty.parse(&text).is_ok());
        }
    }
}

fn scored_table(rows: &[(String, i32)], removals: &[usize]) -> Table {
    let mut table = Table::new("Scores").unwrap();
    table.add_column(Column::new("Id", ScalarType::AutoInt).unwrap()).unwrap();
    table.add_column(Column::new("Name", ScalarType::String).unwrap()).unwrap();
    table.add_column(Column::new("Score", ScalarType::Int32).unwrap()).unwrap();

    for (name, score) in rows {
        let row = Row::new(vec![
            Data::new(Value::AutoInt(0)),
            Data::new(Value::String(name.clone())),
            Data::new(Value::Int32(*score)),
        ]);
        table.add_row(row).unwrap();
    }
    for index in removals {
        table.remove_row(*index);
    }
    table
}

fn column_values(table: &Table, name: &str) -> Vec<Value> {
    table
        .column(name)
        .unwrap()
        .datas()
        .iter()
        .map(|d| d.value().clone())
        .collect()
}

proptest! {
    #[test]
    fn test_transpose_round_trip(
        rows in prop::collection::vec(("[a-z]{0,8}", any::<i32>()), 0..20),
        removals in prop::collection::vec(0usize..20, 0..5)
    ) {
        let mut table = scored_table(&rows, &removals);
        let names = column_values(&table, "Name");
        let scores = column_values(&table, "Score");

        table.set_rows_by_datas();
        table.set_datas_by_rows().unwrap();

        prop_assert_eq!(column_values(&table, "Name"), names);
        prop_assert_eq!(column_values(&table, "Score"), scores);
        let ids: Vec<Value> = (1..=table.row_count() as i64).map(Value::AutoInt).collect();
        prop_assert_eq!(column_values(&table, "Id"), ids);
        prop_assert!(table.rows().iter().all(|row| row.len() == 3));
    }

    #[test]
    fn test_auto_int_is_max_plus_one(count in 1usize..15, removals in prop::collection::vec(0usize..15, 0..5)) {
        let rows: Vec<(String, i32)> = (0..count).map(|i| (format!("n{}", i), i as i32)).collect();
        let mut table = scored_table(&rows, &removals);
        let max = column_values(&table, "Id")
            .iter()
            .filter_map(Value::as_i64)
            .max()
            .unwrap_or(0);

        table.add_empty_row().unwrap();
        let last = column_values(&table, "Id").pop().unwrap();
        prop_assert_eq!(last, Value::AutoInt(max + 1));
    }
}
