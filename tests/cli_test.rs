//! Command-line tests for colbind
//!
//! End-to-end runs of each subcommand over small CSV files.

mod helpers;

use helpers::*;

#[test]
fn test_rbind_promotes_integer_to_double() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["rbind"]),
        files: vec![
            csv_file("ints.csv", "id,score\n1,10\n2,20\n"),
            csv_file("doubles.csv", "id,score\n3,2.5\n"),
        ],
        expected_output: Some("id,score\n1,10\n2,20\n3,2.5\n".to_string()),
        ..Default::default()
    })
}

#[test]
fn test_rbind_late_column_left_empty() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["rbind"]),
        files: vec![
            csv_file("a.csv", "x\n1\n"),
            csv_file("b.csv", "x,y\n2,hello\n"),
        ],
        expected_output: Some("x,y\n1,\n2,hello\n".to_string()),
        ..Default::default()
    })
}

#[test]
fn test_rbind_incompatible_types_fail() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["rbind"]),
        files: vec![
            csv_file("a.csv", "x\nTRUE\n"),
            csv_file("b.csv", "x\nhello\n"),
        ],
        should_succeed: false,
        expected_stderr: vec![
            "Failed to bind rows".to_string(),
            "column: 'x'".to_string(),
        ],
        ..Default::default()
    })
}

#[test]
fn test_rbind_empty_column_then_text() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["rbind"]),
        files: vec![
            csv_file("a.csv", "x,y\n1,\n"),
            csv_file("b.csv", "x,y\n2,hello\n"),
        ],
        expected_output: Some("x,y\n1,\n2,hello\n".to_string()),
        ..Default::default()
    })
}

#[test]
fn test_rbind_factor_columns() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["rbind", "--factor", "size"]),
        files: vec![
            csv_file("a.csv", "size\nsmall\nlarge\n"),
            csv_file("b.csv", "size\nmedium\n"),
        ],
        expected_output: Some("size\nsmall\nlarge\nmedium\n".to_string()),
        ..Default::default()
    })
}

#[test]
fn test_cbind_keeps_duplicate_names() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["cbind"]),
        files: vec![
            csv_file("a.csv", "id,name\n1,Alice\n2,Bob\n"),
            csv_file("b.csv", "id\n10\n20\n"),
        ],
        expected_output: Some("id,name,id\n1,Alice,10\n2,Bob,20\n".to_string()),
        ..Default::default()
    })
}

#[test]
fn test_cbind_row_count_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["cbind"]),
        files: vec![
            csv_file("a.csv", "a\n1\n2\n3\n"),
            csv_file("b.csv", "b\n1\n2\n3\n4\n"),
        ],
        should_succeed: false,
        expected_stderr: vec!["incompatible number of rows".to_string()],
        ..Default::default()
    })
}

#[test]
fn test_arrange_multiple_keys() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["arrange"]),
        files: vec![csv_file(
            "employees.csv",
            "dept,name,salary\nIT,Alice,70000\nHR,Bob,55000\nIT,Charlie,65000\nHR,David,60000\nIT,Eve,75000\n",
        )],
        trailing_args: args(&["-k", "dept", "-k", "desc(salary)"]),
        expected_output: Some(
            "dept,name,salary\nHR,David,60000\nHR,Bob,55000\nIT,Eve,75000\nIT,Alice,70000\nIT,Charlie,65000\n"
                .to_string(),
        ),
        ..Default::default()
    })
}

#[test]
fn test_arrange_nulls_last() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["arrange"]),
        files: vec![csv_file("data.csv", "score,name\n2,a\n,b\n1,c\n")],
        trailing_args: args(&["--key=-score"]),
        expected_output: Some("score,name\n2,a\n1,c\n,b\n".to_string()),
        ..Default::default()
    })
}

#[test]
fn test_arrange_groups_without_keys() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["arrange"]),
        files: vec![csv_file("data.csv", "g,v\nb,1\na,2\nb,3\na,4\n")],
        trailing_args: args(&["--group-by", "g"]),
        expected_output: Some("g,v\na,2\na,4\nb,1\nb,3\n".to_string()),
        ..Default::default()
    })
}

#[test]
fn test_arrange_unknown_column() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["arrange"]),
        files: vec![csv_file("data.csv", "a\n1\n")],
        trailing_args: args(&["-k", "missing"]),
        should_succeed: false,
        expected_stderr: vec!["Column 'missing' not found".to_string()],
        ..Default::default()
    })
}

#[test]
fn test_distinct_first_occurrence() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["distinct"]),
        files: vec![csv_file(
            "dupes.csv",
            "name,dept\nAlice,Eng\nBob,Ops\nAlice,Eng\nCarol,Eng\nBob,Ops\n",
        )],
        expected_output: Some("name,dept\nAlice,Eng\nBob,Ops\nCarol,Eng\n".to_string()),
        ..Default::default()
    })
}

#[test]
fn test_verbose_logs_to_stderr() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["distinct"]),
        files: vec![csv_file("dupes.csv", "a\n1\n1\n")],
        verbose: true,
        expected_stdout: vec!["a\n1\n".to_string()],
        expected_stderr: vec!["kept 1 of 2 rows".to_string()],
        ..Default::default()
    })
}

#[test]
fn test_custom_field_separator() -> Result<(), Box<dyn std::error::Error>> {
    run_test_case(ColbindTestCase {
        args: args(&["-F", ":", "rbind"]),
        files: vec![csv_file("a.txt", "a:b\n1:x\n"), csv_file("b.txt", "a:b\n2:y\n")],
        expected_output: Some("a:b\n1:x\n2:y\n".to_string()),
        ..Default::default()
    })
}
