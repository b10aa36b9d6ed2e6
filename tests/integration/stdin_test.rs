//! Integration tests for stdin input

#[cfg(test)]
mod stdin_tests {
    use std::fs;
    use std::io::Write;
    use std::process::{Command, Stdio};
    use tempfile::tempdir;

    fn run_with_stdin(args: &[&str], input: &str) -> std::process::Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_xmlconv"))
            .args(args)
            .env("NO_COLOR", "1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn xmlconv");

        child
            .stdin
            .as_mut()
            .expect("stdin not captured")
            .write_all(input.as_bytes())
            .unwrap();

        child.wait_with_output().expect("failed to wait for xmlconv")
    }

    #[test]
    fn test_stdin_prints_json_to_stdout() {
        let output = run_with_stdin(&["--stdin"], "<greeting>hello</greeting>");
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
        assert_eq!(value["greeting"], "hello");
    }

    #[test]
    fn test_stdin_with_output_writes_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out.json");

        let output = run_with_stdin(
            &["--stdin", "--output", out.to_str().unwrap(), "--quiet"],
            "<a><b>1</b><b>2</b></a>",
        );
        assert!(output.status.success());

        let contents = fs::read_to_string(&out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["a"]["b"][1], "2");
    }

    #[test]
    fn test_stdin_malformed_exits_nonzero() {
        let output = run_with_stdin(&["--stdin"], "<a><b></a>");
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("XML parse error"));
    }

    #[test]
    fn test_stdin_validate_only() {
        let output = run_with_stdin(&["--stdin", "--validate-only"], "<a/>");
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("Well-formed XML"));
    }
}
