//! Built-in summarizer definitions tuned for Unity logs.

use crate::config::RunCountDescriptor;

pub const SCENE_SUMMARIZER_NAME: &str = "scene";
pub const ASSETS_SUMMARIZER_NAME: &str = "assets";
pub const CSC_WARNINGS_SUMMARIZER_NAME: &str = "cscWarnings";

pub const SCENE_START_PATTERN: &str = r"^\s*Loaded scene\s+'.*'\s*$";
/// Group 1 captures the reported duration.
pub const SCENE_FINISH_PATTERN: &str = r"^\s+Total Operation Time:\s+([\d.]+).+$";

/// Counts `Start importing ...` lines until the asset pipeline refresh report.
pub fn assets_descriptor() -> RunCountDescriptor {
    RunCountDescriptor {
        count_patterns: vec![
            r"\s*Start importing.*".to_string(),
            r"\s*(\[Worker\s?\w+\])\s*Start importing.*".to_string(),
        ],
        finish_pattern: Some(
            r"^Asset Pipeline Refresh: Total: .+ seconds - Initiated by .+$".to_string(),
        ),
        multiplicative_print: true,
        multiplicative_from: 10,
        multiplicative_base: 100,
        message_template: "Imported {count} Assets".to_string(),
    }
}

/// Counts consecutive C# compiler warnings, e.g.
/// `Assets/Foo.cs(12,5): warning CS0168: The variable 'e' is declared but never used`.
pub fn csc_warnings_descriptor() -> RunCountDescriptor {
    RunCountDescriptor {
        count_patterns: vec![r"^.+\(\d+,\d+\): warning CS\d+: .*$".to_string()],
        finish_pattern: None,
        multiplicative_print: true,
        multiplicative_from: 10,
        multiplicative_base: 100,
        message_template: "{count} C# compiler warnings".to_string(),
    }
}
