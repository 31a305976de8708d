//! Building toolkits from texkit.toml files.

use std::fs;

use tempfile::TempDir;
use texkit::Collector;
use texkit_manifest::{Error, Handlers, Manifest, TexkitToml, UnitKind};

const PAPER: &str = r#"
[output]
path = "values.tex"

[[unit]]
kind = "newcommand"
label = "accuracy"
value = 93.12
format = ".1f"
unit = '\%'
math = false
comment = "held-out set"

[[unit]]
kind = "constant"
label = "epochs 2"
value = 20
digits = "spell"

[[unit]]
kind = "newcommand"
label = "model name"
value = "ResNet"
capitalize = true

[[unit]]
kind = "texstring"
key = "table"
text = '\begin{tabular}{ll}\end{tabular}'
target = "tables.tex"

[[unit]]
kind = "text"
key = "note"
text = '\emph{Preliminary}'
target = { handler = "collect" }
"#;

fn parse_err(content: &str) -> Box<Error> {
    content.parse::<Manifest>().unwrap_err()
}

#[test]
fn test_parse_units_in_order() {
    let manifest: Manifest = PAPER.parse().unwrap();
    let kinds: Vec<_> = manifest.units.iter().map(|u| u.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            UnitKind::NewCommand,
            UnitKind::NewCommand,
            UnitKind::NewCommand,
            UnitKind::TexString,
            UnitKind::TexString,
        ]
    );
}

#[test]
fn test_build_and_flush() {
    let temp = TempDir::new().unwrap();
    let tables = temp.path().join("tables.tex");
    // relative targets are resolved against the working directory
    let content = PAPER.replace(
        r#"target = "tables.tex""#,
        &format!("target = '{}'", tables.display()),
    );
    let manifest: Manifest = content.parse().unwrap();

    let collector = Collector::new();
    let mut handlers = Handlers::builtin();
    handlers.register("collect", collector.clone());

    let tex = manifest.build(&handlers).unwrap();
    assert_eq!(tex.len(), 5);

    let out = temp.path().join(manifest.output_path());
    let preview = tex.preview(&out);
    assert_eq!(preview.len(), 2);
    assert_eq!(preview[0].path, out);
    assert_eq!(preview[1].path, tables);
    insta::assert_snapshot!(preview[0].content, @r"
    \newcommand{\accuracy}{93.1\%} % held-out set
    \newcommand{\epochstwo}{$20$}
    \newcommand{\ModelName}{$ResNet$}
    ");

    let stats = tex.flush(&out).unwrap();
    assert_eq!(stats.units, 5);
    assert_eq!(stats.handled, 1);
    assert_eq!(stats.written(), 2);
    assert_eq!(collector.entries(), vec![r"\emph{Preliminary}"]);
    assert_eq!(fs::read_to_string(&out).unwrap(), preview[0].content);
    assert_eq!(
        fs::read_to_string(&tables).unwrap(),
        format!(r"\begin{{tabular}}{{ll}}\end{{tabular}}{}", texkit::LINE_ENDING)
    );
}

#[test]
fn test_unknown_handler_fails_at_build() {
    let manifest: Manifest = PAPER.parse().unwrap();
    let err = manifest.build(&Handlers::builtin()).unwrap_err();
    match *err {
        Error::InvalidTarget { source, .. } => {
            assert!(matches!(source, texkit::Error::UnknownHandler { ref name } if name == "collect"));
        }
        other => panic!("expected InvalidTarget, got {:?}", other),
    }
}

#[test]
fn test_builtin_stdout_handler() {
    let manifest: Manifest = r#"
        [[unit]]
        kind = "texstring"
        key = "note"
        text = "hello"
        target = { handler = "stdout" }
    "#
    .parse()
    .unwrap();
    let tex = manifest.build(&Handlers::builtin()).unwrap();
    assert!(tex.preview("values.tex").is_empty());
}

#[test]
fn test_invalid_target_kind() {
    let err = parse_err(
        r#"
        [[unit]]
        kind = "texstring"
        key = "note"
        text = "hello"
        target = 42
        "#,
    );
    match *err {
        Error::InvalidTarget { source, .. } => {
            assert!(matches!(source, texkit::Error::InvalidTargetKind { .. }));
        }
        other => panic!("expected InvalidTarget, got {:?}", other),
    }
}

#[test]
fn test_invalid_format() {
    let err = parse_err(
        r#"
        [[unit]]
        kind = "newcommand"
        label = "x"
        value = 1
        format = ".2q"
        "#,
    );
    assert!(matches!(*err, Error::Validation { .. }));
}

#[test]
fn test_unsupported_value() {
    let err = parse_err(
        r#"
        [[unit]]
        kind = "newcommand"
        label = "flag"
        value = true
        "#,
    );
    assert!(err.to_string().contains("unsupported value type 'boolean'"));
}

#[test]
fn test_label_without_letters() {
    let err = parse_err(
        r#"
        [[unit]]
        kind = "newcommand"
        label = "2024"
        value = 1
        "#,
    );
    assert!(err.to_string().contains("no letters left"));
}

#[test]
fn test_duplicate_units() {
    let err = parse_err(
        r#"
        [[unit]]
        kind = "newcommand"
        label = "runs"
        value = 1

        [[unit]]
        kind = "newcommand"
        label = "runs"
        value = 2
        "#,
    );
    match *err {
        Error::DuplicateUnit { id, .. } => assert_eq!(id, "newcommand:runs"),
        other => panic!("expected DuplicateUnit, got {:?}", other),
    }
}

#[test]
fn test_same_key_different_kind_is_fine() {
    let manifest: Manifest = r#"
        [[unit]]
        kind = "newcommand"
        label = "runs"
        value = 1

        [[unit]]
        kind = "texstring"
        key = "runs"
        text = "ten"
    "#
    .parse()
    .unwrap();
    let tex = manifest.build(&Handlers::new()).unwrap();
    assert_eq!(tex.len(), 2);
}

#[test]
fn test_forbidden_fields() {
    let err = parse_err(
        r#"
        [[unit]]
        kind = "texstring"
        key = "note"
        text = "hello"
        unit = "ms"
        "#,
    );
    assert_eq!(err.to_string(), "'unit' is not a valid field for texstring units");

    let err = parse_err(
        r#"
        [[unit]]
        kind = "newcommand"
        label = "x"
        value = 1
        text = "hello"
        "#,
    );
    assert_eq!(err.to_string(), "'text' is not a valid field for newcommand units");
}

#[test]
fn test_missing_fields() {
    let err = parse_err(
        r#"
        [[unit]]
        kind = "newcommand"
        label = "x"
        "#,
    );
    assert_eq!(err.to_string(), "newcommand units need a 'value' field");

    let err = parse_err(
        r#"
        [[unit]]
        kind = "texstring"
        key = "x"
        "#,
    );
    assert_eq!(err.to_string(), "texstring units need a 'text' field");

    let err = parse_err(
        r#"
        [[unit]]
        kind = "texstring"
        key = ""
        text = "x"
        "#,
    );
    assert_eq!(err.to_string(), "key must not be empty");
}

#[test]
fn test_unknown_kind_and_field() {
    assert!(matches!(
        *parse_err("[[unit]]\nkind = \"table\"\nkey = \"x\""),
        Error::Parse { .. }
    ));
    assert!(matches!(
        *parse_err("[[unit]]\nkind = \"texstring\"\nkey = \"x\"\ntext = \"y\"\ncolour = 1"),
        Error::Parse { .. }
    ));
}

#[test]
fn test_open_texkit_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("texkit.toml");
    fs::write(&path, PAPER).unwrap();

    let file = TexkitToml::open(&path).unwrap();
    assert_eq!(file.path(), path);
    assert_eq!(file.content(), PAPER);
    assert_eq!(file.manifest().units.len(), 5);

    let mut handlers = Handlers::builtin();
    handlers.register("collect", Collector::new());
    assert_eq!(file.toolkit(&handlers).unwrap().len(), 5);
}

#[test]
fn test_open_reports_filename() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("texkit.toml");
    fs::write(&path, "[[unit]]\nkind = \"newcommand\"\nlabel = \"x\"\nvalue = [1]\n").unwrap();

    let err = TexkitToml::open(&path).err().unwrap();
    match *err {
        Error::Validation { src, span, .. } => {
            assert_eq!(src.name(), path.display().to_string());
            assert!(span.is_some());
        }
        other => panic!("expected Validation, got {:?}", other),
    }
}
