//! Decode a labelled grid, report bad cells, and encode records back

use sheetbind::{table_record, BindError, Grid, TableMapper};

table_record! {
    #[derive(Debug, Default, Clone)]
    pub struct Employee {
        #[label = "ID"]
        pub id: u32,
        #[label = "Name"]
        pub name: String,
        #[label = "Salary"]
        pub salary: f64,
        #[label = "Remote"]
        pub remote: bool,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mapper = TableMapper::<Employee>::new()?;

    // A grid as handed over by a spreadsheet reader
    let grid = Grid::from_rows([
        ["ID", "Name", "Department", "Salary", "Remote"],
        ["1", "Alice Johnson", "R&D", "75000", "yes"],
        ["2", "Bob Smith", "Sales", "65000.50", "no"],
        ["3", "Carol White", "R&D", "85000", "TRUE"],
    ]);

    let employees = mapper.decode(&grid)?;
    for e in &employees {
        println!("{:>3} {:<15} {:>10.2} remote={}", e.id, e.name, e.salary, e.remote);
    }

    // Write them back; the unmatched "Department" column is not part of the record
    let out = mapper.encode(&employees)?;
    for row in out.iter_rows() {
        println!("{}", row.join(" | "));
    }

    // Bad cells are collected across the whole grid
    let broken = Grid::from_rows([
        ["ID", "Name", "Salary", "Remote"],
        ["x", "Dave", "lots", "no"],
        ["5", "Eve", "50000", "perhaps"],
    ]);
    match mapper.decode(&broken) {
        Err(BindError::Decode(errors)) => println!("{}", errors),
        other => println!("unexpected: {:?}", other.map(|v| v.len())),
    }

    Ok(())
}
