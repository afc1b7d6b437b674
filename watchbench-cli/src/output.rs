//! CLI output rendering.
//!
//! Every subcommand produces one payload per invocation (a run report, a
//! scenario listing, a template table). Payloads implement both
//! `Serialize` and [`Render`]; [`OutputWriter`] decides which form goes
//! out based on the global `--output` flag.

use std::io::Write;

use serde::Serialize;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Writes subcommand payloads in the user-selected format.
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Renders `payload` to stdout.
    pub fn render<T: Render + Serialize>(&self, payload: &T) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.render_to(&mut handle, payload)
    }

    /// Renders `payload` into an arbitrary writer.
    ///
    /// `--output json` emits pretty-printed JSON terminated by a newline
    /// so reports can be piped straight into `jq`; the text form goes
    /// through [`Render::render_text`].
    pub fn render_to<T: Render + Serialize>(
        &self,
        w: &mut dyn Write,
        payload: &T,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Text => payload.render_text(w)?,
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *w, payload)?;
                writeln!(w)?;
            }
        }
        Ok(())
    }
}

/// Human-readable rendering, implemented by every CLI payload alongside
/// `serde::Serialize`.
pub trait Render {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct SummaryPayload {
        scenario: String,
        succeeded: usize,
        failed: usize,
    }

    impl Render for SummaryPayload {
        fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
            writeln!(
                w,
                "{}: {} succeeded, {} failed",
                self.scenario, self.succeeded, self.failed
            )
        }
    }

    fn summary() -> SummaryPayload {
        SummaryPayload {
            scenario: "Watcher.create_audit_and_delete".to_owned(),
            succeeded: 9,
            failed: 1,
        }
    }

    #[test]
    fn text_mode_goes_through_render_text() {
        let writer = OutputWriter::new(OutputFormat::Text);
        let mut buffer = Vec::new();
        writer
            .render_to(&mut buffer, &summary())
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert_eq!(
            output,
            "Watcher.create_audit_and_delete: 9 succeeded, 1 failed\n"
        );
    }

    #[test]
    fn json_mode_is_parseable_and_newline_terminated() {
        let writer = OutputWriter::new(OutputFormat::Json);
        let mut buffer = Vec::new();
        writer
            .render_to(&mut buffer, &summary())
            .expect("json rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.ends_with('\n'), "json output should end with newline");

        let parsed: serde_json::Value =
            serde_json::from_str(&output).expect("output should parse back");
        assert_eq!(parsed["succeeded"].as_u64(), Some(9));
        assert_eq!(parsed["failed"].as_u64(), Some(1));
    }

    #[test]
    fn json_mode_never_calls_render_text() {
        struct Tattling;

        impl Serialize for Tattling {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str("clean")
            }
        }

        impl Render for Tattling {
            fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
                writeln!(w, "TEXT-MARKER")
            }
        }

        let writer = OutputWriter::new(OutputFormat::Json);
        let mut buffer = Vec::new();
        writer
            .render_to(&mut buffer, &Tattling)
            .expect("json rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(!output.contains("TEXT-MARKER"));
        assert!(output.contains("clean"));
    }

    #[test]
    fn multibyte_scenario_names_survive_both_modes() {
        let payload = SummaryPayload {
            scenario: "시나리오 이름".to_owned(),
            succeeded: 1,
            failed: 0,
        };

        for format in [OutputFormat::Text, OutputFormat::Json] {
            let writer = OutputWriter::new(format);
            let mut buffer = Vec::new();
            writer
                .render_to(&mut buffer, &payload)
                .expect("rendering should succeed");
            let output = String::from_utf8(buffer).expect("valid UTF-8");
            assert!(output.contains("시나리오"));
        }
    }
}
