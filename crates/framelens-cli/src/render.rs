use std::fmt;

use framelens_core::{CaptureReport, FrameRecord};

/// Text report: one block per frame, blocks separated by a blank line.
pub fn render_text(report: &CaptureReport) -> String {
    TextReport(report).to_string()
}

struct TextReport<'a>(&'a CaptureReport);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_frames(f, &self.0.frames)
    }
}

fn write_frames<W: fmt::Write>(out: &mut W, frames: &[FrameRecord]) -> fmt::Result {
    for (position, frame) in frames.iter().enumerate() {
        if position > 0 {
            out.write_char('\n')?;
        }
        write_frame(out, frame)?;
    }
    Ok(())
}

fn write_frame<W: fmt::Write>(out: &mut W, frame: &FrameRecord) -> fmt::Result {
    write!(out, "Frame {}", frame.index)?;
    if let Some(ts) = &frame.timestamp {
        write!(out, " @ {ts}")?;
    }
    if frame.truncated {
        writeln!(
            out,
            ": {} of {} bytes captured",
            frame.captured_len, frame.original_len
        )?;
    } else {
        writeln!(out, ": {} bytes", frame.captured_len)?;
    }

    match (&frame.summary, &frame.error) {
        (Some(summary), _) => writeln!(out, "{summary}"),
        (None, Some(error)) => writeln!(out, "decode failed: {error}"),
        (None, None) => Ok(()),
    }
}
