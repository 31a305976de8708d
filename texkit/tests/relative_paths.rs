//! Relative output paths, resolved against the working directory.
//!
//! Kept in its own test binary: it changes the process working directory.

use std::{env, fs, path::PathBuf};

use tempfile::TempDir;
use texkit::{LINE_ENDING, TexStringMixin, TexToolkit};

#[test]
fn test_dot_prefixed_target_shares_the_default_file() {
    let temp = TempDir::new().unwrap();
    let previous = env::current_dir().unwrap();
    env::set_current_dir(temp.path()).unwrap();

    let mut tex = TexToolkit::new();
    tex.texstring("a", "A")
        .texstring_to("b", "B", "./out.tex")
        .texstring("c", "C");
    let stats = tex.flush("out.tex");

    env::set_current_dir(previous).unwrap();
    let stats = stats.unwrap();

    assert_eq!(stats.written_paths, vec![PathBuf::from("out.tex")]);
    assert_eq!(
        fs::read_to_string(temp.path().join("out.tex")).unwrap(),
        format!("A{0}B{0}C{0}", LINE_ENDING)
    );
}
