//! Integration tests for sheetbind

use chrono::{NaiveDate, NaiveDateTime};
use sheetbind::types::{CellValue, Row};
use sheetbind::{table_record, BindError, BlankCells, ConversionError, Grid, TableMapper};

table_record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Person {
        #[label = "姓名"]
        pub name: String,
        #[label = "年龄"]
        pub age: i64,
    }
}

table_record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    pub struct Order {
        #[label = "Order No"]
        pub number: u32,
        #[label = "Customer"]
        pub customer: String,
        #[label = "Amount"]
        pub amount: f64,
        #[label = "Paid"]
        pub paid: bool,
        #[label = "Placed"]
        pub placed: NaiveDate,
        #[label = "Delivered At"]
        pub delivered_at: Option<NaiveDateTime>,
        pub notes: Option<String>,
    }
}

fn sample_orders() -> Vec<Order> {
    vec![
        Order {
            number: 1001,
            customer: "Alice".into(),
            amount: 129.95,
            paid: true,
            placed: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            delivered_at: NaiveDate::from_ymd_opt(2024, 5, 4)
                .unwrap()
                .and_hms_opt(14, 5, 0),
            notes: Some("leave at door".into()),
        },
        Order {
            number: 1002,
            customer: "Bob, Jr.".into(),
            amount: 0.5,
            paid: false,
            placed: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            delivered_at: None,
            notes: None,
        },
    ]
}

#[test]
fn test_labelled_decode() {
    let grid = Grid::from_rows([["姓名", "年龄"], ["Alice", "30"], ["Bob", "25"]]);
    let people = sheetbind::decode::<Person>(&grid).unwrap();

    assert_eq!(
        people,
        vec![
            Person {
                name: "Alice".into(),
                age: 30
            },
            Person {
                name: "Bob".into(),
                age: 25
            },
        ]
    );
}

#[test]
fn test_decode_yields_one_record_per_data_row() {
    let mut rows = vec![vec!["姓名".to_string(), "年龄".to_string()]];
    for i in 0..50 {
        rows.push(vec![format!("P{}", i), i.to_string()]);
    }
    let grid = Grid::from_rows(rows);

    let people = sheetbind::decode::<Person>(&grid).unwrap();
    assert_eq!(people.len(), grid.rows() - 1);
    for (i, person) in people.iter().enumerate() {
        assert_eq!(person.name, grid.get(i + 1, 0));
        assert_eq!(person.age.to_string(), grid.get(i + 1, 1));
    }
}

#[test]
fn test_write_and_read_roundtrip() {
    let mapper = TableMapper::<Order>::new().unwrap();
    let orders = sample_orders();

    let grid = mapper.encode(&orders).unwrap();
    assert_eq!(grid.rows(), orders.len() + 1);
    assert_eq!(grid.cols(), 7);

    let decoded = mapper.decode(&grid).unwrap();
    assert_eq!(decoded, orders);

    // and once more through the grid
    assert_eq!(mapper.encode(&decoded).unwrap(), grid);
}

#[test]
fn test_encoded_grid_content() {
    let grid = sheetbind::encode(&sample_orders()).unwrap();

    assert_eq!(
        grid.row(0).unwrap(),
        &[
            "Order No",
            "Customer",
            "Amount",
            "Paid",
            "Placed",
            "Delivered At",
            "notes"
        ]
    );
    assert_eq!(
        grid.row(1).unwrap(),
        &[
            "1001",
            "Alice",
            "129.95",
            "TRUE",
            "2024-05-02",
            "2024-05-04 14:05:00",
            "leave at door"
        ]
    );
    assert_eq!(grid.get(2, 5), "");
}

#[test]
fn test_unmatched_columns_are_ignored() {
    let grid = Grid::from_rows([
        vec!["Comment", "姓名", "Internal ID", "年龄"],
        vec!["VIP", "Alice", "X-99", "30"],
    ]);
    let people = sheetbind::decode::<Person>(&grid).unwrap();

    assert_eq!(
        people,
        vec![Person {
            name: "Alice".into(),
            age: 30
        }]
    );
}

#[test]
fn test_missing_columns_leave_defaults() {
    let grid = Grid::from_rows([vec!["Customer", "Paid"], vec!["Carol", "yes"]]);
    let orders = sheetbind::decode::<Order>(&grid).unwrap();

    assert_eq!(
        orders[0],
        Order {
            customer: "Carol".into(),
            paid: true,
            ..Default::default()
        }
    );
}

#[test]
fn test_single_bad_cell_reported_at_sheet_row() {
    let grid = Grid::from_rows([
        ["年龄", "姓名"],
        ["thirty", "Alice"],
        ["25", "Bob"],
        ["41", "Carol"],
    ]);

    let err = sheetbind::decode::<Person>(&grid).unwrap_err();
    let errors = err.decode_errors().expect("batch failure");

    assert_eq!(errors.len(), 1);
    let entry = &errors.entries()[0];
    assert_eq!(entry.row, 2);
    assert_eq!(entry.column, 1);
    assert_eq!(entry.raw, "thirty");
    assert_eq!(entry.target_type, "i64");
    assert!(matches!(entry.cause, ConversionError::Integer(_)));
    assert_eq!(entry.reference(), "A2");

    assert_eq!(errors.for_row(1).count(), 0);
    assert_eq!(errors.for_row(3).count(), 0);
}

#[test]
fn test_every_bad_cell_reported_once() {
    let grid = Grid::from_rows([
        vec!["Order No", "Amount", "Paid", "Placed", "Customer"],
        vec!["1", "10.0", "yes", "2024-01-01", "A"],
        vec!["two", "abc", "maybe", "2024-01-02", "B"],
        vec!["3", "30.0", "no", "someday", "C"],
        vec!["-4", "40.0", "no", "2024-01-04", "D"],
    ]);

    let err = TableMapper::<Order>::new().unwrap().decode(&grid).unwrap_err();
    let BindError::Decode(errors) = err else {
        panic!("expected batch failure");
    };

    let located: Vec<(u32, u32)> = errors.iter().map(|e| (e.row, e.column)).collect();
    assert_eq!(located, vec![(3, 1), (3, 2), (3, 3), (4, 4), (5, 1)]);

    assert!(matches!(errors.entries()[2].cause, ConversionError::Boolean(_)));
    assert!(matches!(errors.entries()[3].cause, ConversionError::Date { .. }));
}

#[test]
fn test_batch_error_message_lists_cells() {
    let grid = Grid::from_rows([["姓名", "年龄"], ["Alice", "x"], ["Bob", "y"]]);
    let message = sheetbind::decode::<Person>(&grid).unwrap_err().to_string();

    assert!(message.starts_with("Failed to decode 2 cell(s)"));
    assert!(message.contains("row 2, column 2 (B2): cannot convert 'x' to i64"));
    assert!(message.contains("row 3, column 2 (B3): cannot convert 'y' to i64"));
}

#[test]
fn test_empty_collection_is_invalid_input() {
    let err = sheetbind::encode::<Person>(&[]).unwrap_err();
    assert!(matches!(err, BindError::InvalidInput(_)));
}

#[test]
fn test_empty_grid_is_invalid_input() {
    let err = sheetbind::decode::<Person>(&Grid::default()).unwrap_err();
    assert!(matches!(err, BindError::InvalidInput(_)));
}

fn text(s: &str) -> CellValue {
    CellValue::String(s.to_string())
}

#[test]
fn test_typed_rows_from_codec() {
    let rows = vec![
        Row::new(0, vec![text("Order No"), text("Amount"), text("Paid")]),
        Row::new(1, vec![CellValue::Int(7), CellValue::Float(12.25), CellValue::Bool(true)]),
        Row::new(2, vec![CellValue::Int(8), CellValue::Int(3), CellValue::Bool(false)]),
    ];

    let orders = sheetbind::decode::<Order>(&Grid::from_typed_rows(&rows)).unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].number, 7);
    assert_eq!(orders[0].amount, 12.25);
    assert!(orders[0].paid);
    assert_eq!(orders[1].amount, 3.0);
    assert!(!orders[1].paid);
}

#[test]
fn test_empty_typed_cell_in_required_field_fails() {
    let rows = vec![
        Row::new(0, vec![text("Order No"), text("Amount")]),
        Row::new(1, vec![CellValue::Int(8), CellValue::Empty]),
    ];

    let err = sheetbind::decode::<Order>(&Grid::from_typed_rows(&rows)).unwrap_err();
    let errors = err.decode_errors().expect("batch failure");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.entries()[0].reference(), "B2");
    assert_eq!(errors.entries()[0].cause, ConversionError::Blank);
}

#[test]
fn test_blank_required_cell_fails_the_batch() {
    let grid = Grid::from_rows([["姓名", "年龄"], ["Alice", ""], ["Bob", "25"]]);

    let err = sheetbind::decode::<Person>(&grid).unwrap_err();
    let errors = err.decode_errors().expect("batch failure");

    assert_eq!(errors.len(), 1);
    let entry = &errors.entries()[0];
    assert_eq!((entry.row, entry.column), (2, 2));
    assert_eq!(entry.raw, "");
    assert_eq!(entry.target_type, "i64");
    assert_eq!(entry.cause, ConversionError::Blank);
}

#[test]
fn test_blank_cells_kept_at_default_when_allowed() {
    let mapper = TableMapper::<Person>::builder()
        .with_blank_cells(BlankCells::Default)
        .build()
        .unwrap();
    let grid = Grid::from_rows([["姓名", "年龄"], ["Alice", ""]]);

    let people = mapper.decode(&grid).unwrap();
    assert_eq!(people[0].age, 0);
}

#[test]
fn test_sub_second_datetime_roundtrip() {
    let delivered = NaiveDate::from_ymd_opt(2024, 5, 4)
        .unwrap()
        .and_hms_milli_opt(14, 5, 0, 250)
        .unwrap();
    let mut orders = sample_orders();
    orders[0].delivered_at = Some(delivered);

    let grid = sheetbind::encode(&orders).unwrap();
    assert_eq!(grid.get(1, 5), "2024-05-04 14:05:00.250");

    let back = sheetbind::decode::<Order>(&grid).unwrap();
    assert_eq!(back[0].delivered_at, Some(delivered));
    assert_eq!(back, orders);
}

#[test]
fn test_serial_dates_from_codec() {
    let rows = vec![
        Row::new(0, vec![text("Placed")]),
        Row::new(1, vec![CellValue::DateTime(45306.0)]),
    ];
    let orders = sheetbind::decode::<Order>(&Grid::from_typed_rows(&rows)).unwrap();
    assert_eq!(orders[0].placed, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
}

#[test]
fn test_encoded_grid_to_writer_rows() {
    let grid = sheetbind::encode(&sample_orders()).unwrap();
    let rows = grid.to_rows();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].to_strings()[0], "Order No");
    assert_eq!(rows[2].cells[5], CellValue::Empty);
    assert_eq!(rows[1].cells[1], text("Alice"));
}

#[test]
fn test_shared_mapper_across_threads() {
    let mapper = std::sync::Arc::new(TableMapper::<Person>::new().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let mapper = mapper.clone();
            std::thread::spawn(move || {
                let grid = Grid::from_rows([
                    vec!["姓名".to_string(), "年龄".to_string()],
                    vec![format!("T{}", t), t.to_string()],
                ]);
                mapper.decode(&grid).unwrap()
            })
        })
        .collect();

    for (t, handle) in handles.into_iter().enumerate() {
        let people = handle.join().unwrap();
        assert_eq!(people[0].age, t as i64);
    }
}
