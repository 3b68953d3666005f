use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::thread;
use std::time::Duration;
use anyhow::Context;
use common::tag::TagObservation;
use navigation::Detector;

/// Plays back recorded detections, one JSON array of tags per line
pub struct ReplayDetector<R> {
    lines: std::io::Lines<R>,
    line_number: usize,
    frame_width: u32,
    frame_interval: Duration,
}

impl ReplayDetector<BufReader<File>> {
    pub fn open(path: &Path, frame_width: u32, frame_interval: Duration) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("could not open recording {}", path.display()))?;
        Ok(Self::new(BufReader::new(file), frame_width, frame_interval))
    }
}

impl<R: BufRead> ReplayDetector<R> {
    pub fn new(reader: R, frame_width: u32, frame_interval: Duration) -> Self {
        ReplayDetector {
            lines: reader.lines(),
            line_number: 0,
            frame_width,
            frame_interval,
        }
    }
}

impl<R: BufRead> Detector for ReplayDetector<R> {
    fn frame_width(&self) -> u32 {
        self.frame_width
    }

    fn detect(&mut self) -> anyhow::Result<Option<Vec<TagObservation>>> {
        let line = match self.lines.next() {
            Some(line) => line.context("could not read recording")?,
            None => return Ok(None),
        };
        self.line_number += 1;

        if !self.frame_interval.is_zero() {
            thread::sleep(self.frame_interval);
        }

        if line.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }

        let tags = serde_json::from_str(&line)
            .with_context(|| format!("bad frame on line {}", self.line_number))?;

        Ok(Some(tags))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use glam::DVec2;
    use super::*;

    const RECORDING: &str = r#"[{"id":1,"center":[320.0,100.0],"corners":[[300.0,80.0],[340.0,80.0],[340.0,120.0],[300.0,120.0]],"pose_translation":[0.0,0.0,1.5]}]

[]
"#;

    fn detector(text: &str) -> ReplayDetector<Cursor<Vec<u8>>> {
        ReplayDetector::new(Cursor::new(text.as_bytes().to_vec()), 640, Duration::ZERO)
    }

    #[test]
    fn plays_frames_in_order() {
        let mut detector = detector(RECORDING);
        assert_eq!(detector.frame_width(), 640);

        let first = detector.detect().unwrap().unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, 1);
        assert_eq!(first[0].center, DVec2::new(320.0, 100.0));

        // blank line is a frame without tags
        assert!(detector.detect().unwrap().unwrap().is_empty());
        assert!(detector.detect().unwrap().unwrap().is_empty());

        assert!(detector.detect().unwrap().is_none());
    }

    #[test]
    fn garbage_is_an_error() {
        let mut detector = detector("[{\"id\": 1}]\n");
        let error = detector.detect().unwrap_err();
        assert!(format!("{:?}", error).contains("line 1"));
    }
}
