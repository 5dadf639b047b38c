use std::fs;
use std::path::Path;

use regex::Regex;

use crate::{DecoderErr, SampleSequence};

// A signed digit, a sign with nothing after it, or any character other than a space or tab
const SAMPLE_TOKEN:&str = r"-?[0-9]|-|[^ \t]";

pub fn read_sample_file<P: AsRef<Path>>(path:P) -> Result<SampleSequence, DecoderErr> {
	let text:String = fs::read_to_string(path.as_ref())
		.map_err(|e| DecoderErr::FileRead(format!("{}: {}", path.as_ref().display(), e)))?;
	parse_samples(&text)
}

/// Parses single-digit samples, each optionally preceded by '-'. Spaces, tabs and line breaks only
/// separate values; every other character is an error.
pub fn parse_samples(text:&str) -> Result<SampleSequence, DecoderErr> {
	let re = Regex::new(SAMPLE_TOKEN).map_err(|e| DecoderErr::Other(e.to_string()))?;
	let mut values:Vec<i8> = vec![];

	for (line_idx, line) in text.lines().enumerate() {
		for m in re.find_iter(line) {
			let (line_no, column) = (line_idx + 1, line[..m.start()].chars().count() + 1);
			let token:&str = m.as_str();
			let mut chars = token.chars();
			match (chars.next(), chars.next()) {
				(Some('-'), Some(d)) => values.push(-digit_value(d)),
				(Some('-'), None)    => return Err(DecoderErr::DanglingSign{ line: line_no, column }),
				(Some(d), None) if d.is_ascii_digit() => values.push(digit_value(d)),
				(Some(found), _)     => return Err(DecoderErr::InvalidCharacter{ line: line_no, column, found }),
				(None, _)            => {},
			}
		}
	}

	SampleSequence::new(values)
}

fn digit_value(d:char) -> i8 { (d as u8 - b'0') as i8 }
