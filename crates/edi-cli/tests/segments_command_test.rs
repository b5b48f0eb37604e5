use std::env;
use std::path::PathBuf;
use std::process::{Command, Output};

fn cargo_bin() -> PathBuf {
    match env::var("CARGO_BIN_EXE_edi") {
        Ok(path) => PathBuf::from(path),
        Err(_) => repo_root()
            .join("target")
            .join("debug")
            .join(format!("edi{}", std::env::consts::EXE_SUFFIX)),
    }
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn run_segments(extra: &[&str]) -> Output {
    let input = repo_root().join("testdata").join("edi").join("orders_sample.edi");
    Command::new(cargo_bin())
        .arg("segments")
        .arg(input)
        .args(extra)
        .output()
        .expect("run edi")
}

#[test]
fn segments_command_lists_all_segments_in_order() {
    let output = run_segments(&[]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 38);
    assert_eq!(lines[2], "UNH+ME000001+ORDERS:D:96A:UN:EAN008");
    assert_eq!(lines[37], "UNZ+1+00000123");
    assert!(lines.iter().all(|line| !line.contains('\'')));
}

#[test]
fn segments_command_filters_by_tag() {
    let output = run_segments(&["--tag", "lin"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout should be UTF-8");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, ["LIN+1++5412345678908:EN", "LIN+2++5412345678915:EN", "LIN+3+"]);
}
