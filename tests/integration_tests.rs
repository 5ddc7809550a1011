//! Integration tests for the whole front end.
//!
//! These tests run complete source files through scanning and parsing and
//! check the resulting tree and diagnostics.

use gofront::{
    ast::{
        ast::{Node, Tree},
        declarations::Decl,
        statements::Stmt,
    },
    errors::errors::ErrorImpl,
    format_error,
    lexer::lexer::scan_bytes,
    parser::parser::{parse_source, parse_tree},
};

const PROGRAM: &str = r#"package main

import (
	"fmt"
	str "strings"
)

const (
	limit = 10
	name  = "gofront"
)

type Names []string

var seen = 0

// sum adds up its arguments.
func sum(values ...int) (total int) {
	for _, v := range values {
		total += v
	}
	return
}

func main() {
	var names Names
	for i := 0; i < limit; i++ {
		if i%2 == 0 {
			continue
		} else if i > 7 {
			break
		}
		seen++
	}
	defer fmt.Println(str.ToUpper(name), sum(1, 2, 3))
	go func2(names)
}
"#;

fn parse_ok(source: &str) -> Tree {
    let tree = parse_source("main.go", source).unwrap();
    assert!(tree.errors.is_empty(), "unexpected errors: {:?}", tree.errors);
    tree
}

#[test]
fn test_parse_program() {
    let tree = parse_ok(PROGRAM);

    assert!(tree.well_formed());
    assert_eq!(tree.decls.len(), 7);
    assert!(matches!(tree.decls[0], Decl::Package(_)));
    assert_eq!(tree.decls[1].to_string(), "import (\"fmt\"; str \"strings\")");
    assert_eq!(tree.decls[3].to_string(), "type Names []string");

    let funcs: Vec<&str> = tree
        .iter()
        .filter_map(|decl| match decl {
            Decl::Func(func) => Some(func.name.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(funcs, vec!["sum", "main"]);
}

#[test]
fn test_unsupported_construct_is_reported() {
    // composite literals are not part of the grammar
    let source = PROGRAM.replace("var names Names", "names := Names{}");
    let tree = parse_source("main.go", &source).unwrap();

    assert!(!tree.errors.is_empty());
    assert!(tree.decls.iter().any(|decl| matches!(decl, Decl::Func(func) if func.name.name == "sum")));
}

#[test]
fn test_parse_nested_control_flow() {
    let tree = parse_ok(
        "package p\n\nfunc f(xs []int) {\n\tfor i := range xs {\n\t\tif xs[i] > 0 {\n\t\t\txs[i] = -xs[i]\n\t\t}\n\t}\n}\n",
    );

    let Decl::Func(func) = &tree.decls[1] else {
        panic!("expected func");
    };
    let Stmt::For(for_stmt) = &func.body.stmts[0] else {
        panic!("expected for");
    };
    assert_eq!(
        for_stmt.body.to_string(),
        "{ if (xs[i] > 0) { xs[i] = -xs[i] } }"
    );
}

#[test]
fn test_errors_are_contained() {
    let tree = parse_source(
        "main.go",
        "package p\n\nfunc a() { x := }\n\nfunc b() { return 1 }\n",
    )
    .unwrap();

    assert_eq!(tree.errors.len(), 1);
    assert!(!tree.well_formed());

    let func_b = tree
        .iter()
        .find(|decl| matches!(decl, Decl::Func(func) if func.name.name == "b"))
        .expect("func b survives the error in func a");
    assert!(func_b.well_formed());
    assert_eq!(func_b.render(), "func b() { return 1 }");
}

#[test]
fn test_scan_error_reports_position() {
    let source = "package p\n\nvar s = \"open\n";
    let err = parse_source("main.go", source).unwrap_err();

    assert!(matches!(err.get_impl(), ErrorImpl::ScanError { .. }));
    let report = format_error(&err, source);
    assert!(report.contains("-> main.go"));
    assert!(report.contains("3 | var s = \"open"));
}

#[test]
fn test_invalid_utf8_is_fatal() {
    let err = parse_tree(scan_bytes("main.go", b"package p\nvar \xff\n")).unwrap_err();

    assert!(err.is_fatal());
    assert!(err.to_string().contains("invalid UTF-8"));
}

#[test]
fn test_diagnostics_name_file_and_offset() {
    let tree = parse_source("bad.go", "package p\nconst c int\n").unwrap();

    assert_eq!(tree.errors.len(), 1);
    let rendered = tree.errors[0].to_string();
    assert!(rendered.starts_with("bad.go:"), "{}", rendered);
    assert!(rendered.ends_with("type allowed only if followed by expression"));
}
