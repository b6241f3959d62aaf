//! Integration tests for CSV loading.

use std::io::Write;

use polars::prelude::DataType;
use tempfile::NamedTempFile;

use stat_ingest::{
    X_COMPOSITE, add_composite_column, any_to_f64, list_columns, read_csv_table,
};

fn temp_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

#[test]
fn reads_types_and_missing_values() {
    let file = temp_csv("age,income,gender\n31,4200.5,F\n45,,M\n,3900,\n");
    let (df, headers) = read_csv_table(file.path(), 1).expect("read csv");

    assert_eq!(headers.columns, vec!["age", "income", "gender"]);
    assert_eq!(df.height(), 3);
    assert_eq!(df.column("age").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("income").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("gender").unwrap().dtype(), &DataType::String);

    let columns = list_columns(&df);
    let non_missing: Vec<usize> = columns.iter().map(|c| c.non_missing).collect();
    assert_eq!(non_missing, vec![2, 2, 2]);
}

#[test]
fn strips_bom_and_reads_label_row() {
    let file = temp_csv("\u{feff}Item one,Item two\nq1,q2\n1,2\n3,4\n");
    let (df, headers) = read_csv_table(file.path(), 2).expect("read csv");

    assert_eq!(headers.label_for("q1"), Some("Item one"));
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["q1", "q2"]);
    assert_eq!(df.height(), 2);
}

#[test]
fn composite_from_loaded_items() {
    let file = temp_csv("q1,q2,q3\n1,2,3\n4,,6\n");
    let (mut df, _) = read_csv_table(file.path(), 1).expect("read csv");

    add_composite_column(&mut df, X_COMPOSITE, &["q1".to_string(), "q2".to_string()])
        .expect("composite");

    let total = df.column(X_COMPOSITE).expect("composite column");
    assert_eq!(any_to_f64(total.get(0).unwrap()), Some(3.0));
    assert_eq!(any_to_f64(total.get(1).unwrap()), Some(4.0));
    assert_eq!(df.width(), 4);
}

#[test]
fn null_markers_keep_numeric_columns_numeric() {
    let file = temp_csv("a,b,label\n1,2,x\n2,N/A,y\nNA,5,null\n4,#N/A,z\nnull,9,NaN\n");
    let (df, _) = read_csv_table(file.path(), 1).expect("read csv");

    let a = df.column("a").unwrap();
    assert_eq!(a.dtype(), &DataType::Int64);
    assert_eq!(a.null_count(), 2);
    assert_eq!(any_to_f64(a.get(2).unwrap()), None);
    assert_eq!(any_to_f64(a.get(3).unwrap()), Some(4.0));

    let b = df.column("b").unwrap();
    assert_eq!(b.dtype(), &DataType::Int64);
    assert_eq!(b.null_count(), 2);

    let label = df.column("label").unwrap();
    assert_eq!(label.dtype(), &DataType::String);
    assert_eq!(label.null_count(), 2);
}

#[test]
fn late_decimal_widens_integer_column() {
    let mut contents = String::from("a,b\n");
    for idx in 0..150 {
        contents.push_str(&format!("{idx},{}\n", idx % 7));
    }
    contents.push_str("2.5,3\n");
    let file = temp_csv(&contents);

    let (df, _) = read_csv_table(file.path(), 1).expect("read csv");
    assert_eq!(df.height(), 151);
    assert_eq!(df.column("a").unwrap().dtype(), &DataType::Float64);
    assert_eq!(df.column("b").unwrap().dtype(), &DataType::Int64);
    assert_eq!(any_to_f64(df.column("a").unwrap().get(150).unwrap()), Some(2.5));
}
