//! Integration tests for failure modes and exit codes

#[cfg(test)]
mod error_tests {
    use std::fs;
    use std::process::{Command, Output};
    use tempfile::tempdir;

    fn run_xmlconv(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_xmlconv"))
            .args(args)
            .env("NO_COLOR", "1")
            .output()
            .expect("failed to run xmlconv")
    }

    #[test]
    fn test_malformed_xml_fails_and_leaves_no_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.xml");
        fs::write(&input, "<a><b></a>").unwrap();

        let output = run_xmlconv(&[input.to_str().unwrap()]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("XML parse error"));
        assert!(stderr.contains("line"));

        // All-or-nothing: neither the output nor a temp file may exist
        assert!(!dir.path().join("broken.json").exists());
        assert!(!dir.path().join("broken.json.tmp").exists());
    }

    #[test]
    fn test_missing_input_fails_before_parsing() {
        let output = run_xmlconv(&["definitely-not-here.xml"]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("not found"));
    }

    #[test]
    fn test_no_input_is_configuration_error() {
        let output = run_xmlconv(&[]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("no input provided"));
    }

    #[test]
    fn test_validate_only_rejects_malformed() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.xml");
        fs::write(&input, "<a><b>text").unwrap();

        let output = run_xmlconv(&[input.to_str().unwrap(), "--validate-only"]);
        assert!(!output.status.success());
    }

    #[test]
    fn test_input_over_memory_limit_rejected() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("big.xml");
        let payload = format!("<a>{}</a>", "x".repeat(4096));
        fs::write(&input, payload).unwrap();

        let output = run_xmlconv(&[input.to_str().unwrap(), "--memory-limit", "2KB"]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Input too large"));
        assert!(!dir.path().join("big.json").exists());
    }

    #[test]
    fn test_invalid_memory_limit_is_configuration_error() {
        let output = run_xmlconv(&["anything.xml", "--memory-limit", "lots"]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid memory limit"));
    }

    #[test]
    fn test_invalid_indent_is_configuration_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.xml");
        fs::write(&input, "<a/>").unwrap();

        let output = run_xmlconv(&[input.to_str().unwrap(), "--indent", "12"]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Indent size"));
    }

    #[test]
    fn test_derived_output_equal_to_input_rejected() {
        let dir = tempdir().unwrap();
        // XML content in a file already named .json; the derived output
        // path would overwrite the input.
        let input = dir.path().join("data.json");
        fs::write(&input, "<a>1</a>").unwrap();

        let output = run_xmlconv(&[input.to_str().unwrap()]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("equals the input path"));
        // The input must be untouched
        assert_eq!(fs::read_to_string(&input).unwrap(), "<a>1</a>");
    }

    #[test]
    fn test_empty_file_is_parse_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.xml");
        fs::write(&input, "").unwrap();

        let output = run_xmlconv(&[input.to_str().unwrap()]);
        assert!(!output.status.success());

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("empty XML document"));
    }
}
