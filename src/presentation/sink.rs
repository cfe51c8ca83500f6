// Output sinks that hand label frames to whatever renders them
use crate::domain::label::LabelFrame;
use anyhow::{Context, Result};
use std::io::Write;

const LABEL_SEPARATOR: &str = "  ";

pub trait LabelSink: Send {
    fn render(&mut self, frame: &LabelFrame) -> Result<()>;
}

/// One line per frame, each label in its severity color (24-bit ANSI).
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> LabelSink for TerminalSink<W> {
    fn render(&mut self, frame: &LabelFrame) -> Result<()> {
        let line = frame
            .labels
            .iter()
            .map(|label| {
                let (r, g, b) = label.color.to_rgb8();
                format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, label.text)
            })
            .collect::<Vec<_>>()
            .join(LABEL_SEPARATOR);

        writeln!(self.out, "{}", line).context("Failed to write frame to terminal")?;
        self.out.flush().context("Failed to flush terminal")?;
        Ok(())
    }
}

/// Newline-delimited JSON, for an external renderer reading our stdout.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> LabelSink for JsonLinesSink<W> {
    fn render(&mut self, frame: &LabelFrame) -> Result<()> {
        serde_json::to_writer(&mut self.out, frame).context("Failed to serialize frame")?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::label_service::LabelBuilder;
    use crate::domain::stats::{RamUsage, StatsSnapshot};
    use chrono::{TimeZone, Utc};

    fn frame() -> LabelFrame {
        let snapshot = StatsSnapshot::new(0.0, RamUsage::new(100.0, 16.0, 16.0, 0.0), None);
        let labels = LabelBuilder::default().build_labels(&snapshot);
        LabelFrame::new(Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap(), labels)
    }

    #[test]
    fn test_terminal_sink_colors_each_label() {
        let mut sink = TerminalSink::new(Vec::new());
        sink.render(&frame()).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            "\x1b[38;2;0;255;0mCPU: 0.0%\x1b[0m  \
             \x1b[38;2;255;0;0mRAM: 100.0%\x1b[0m  \
             \x1b[38;2;179;179;179mTemp: N/A\x1b[0m\n"
        );
    }

    #[test]
    fn test_json_sink_writes_one_object_per_line() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.render(&frame()).unwrap();
        sink.render(&frame()).unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["captured_at"], "2026-10-19T12:00:00Z");
        assert_eq!(value["labels"].as_array().unwrap().len(), 3);
        assert_eq!(value["labels"][0]["kind"], "cpu");
        assert_eq!(value["labels"][1]["text"], "RAM: 100.0%");
        assert_eq!(value["labels"][2]["text"], "Temp: N/A");
        assert_eq!(value["labels"][2]["color"]["r"], 0.7);
        assert_eq!(value["labels"][2]["font_size"], 14);
    }
}
