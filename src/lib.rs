use std::fmt;

pub mod gnss;
pub mod io;

pub mod utils;

use crate::gnss::constants::CODE_LENGTH;

/// One code period of received samples, exactly `CODE_LENGTH` long
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSequence {
	values: Vec<i8>,
}

impl SampleSequence {

	pub fn new(values:Vec<i8>) -> Result<Self, DecoderErr> {
		if values.len() == CODE_LENGTH { Ok(Self{ values }) }
		else { Err(DecoderErr::WrongSampleCount{ expected: CODE_LENGTH, found: values.len() }) }
	}

	pub fn zeros() -> Self { Self{ values: vec![0; CODE_LENGTH] } }

	pub fn values(&self) -> &[i8] { &self.values }

	pub fn len(&self) -> usize { self.values.len() }

	pub fn is_empty(&self) -> bool { self.values.is_empty() }

}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DecoderErr {
	FileRead(String),
	InvalidCharacter{ line:usize, column:usize, found:char },
	DanglingSign{ line:usize, column:usize },
	WrongSampleCount{ expected:usize, found:usize },
	InvalidTap{ sv_idx:usize, tap:usize },
	InvalidMargin(u32),
	SvOutOfRange(usize),
	TaskFailed(String),
	Other(String),
}

impl fmt::Display for DecoderErr {

	fn fmt(&self, f:&mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::FileRead(msg) => write!(f, "File could not be read: {}", msg),
			Self::InvalidCharacter{ line, column, found } => write!(f, "Invalid character {:?} at line {}, column {}", found, line, column),
			Self::DanglingSign{ line, column } => write!(f, "Sign without a digit at line {}, column {}", line, column),
			Self::WrongSampleCount{ expected, found } => write!(f, "Expected {} samples, found {}", expected, found),
			Self::InvalidTap{ sv_idx, tap } => write!(f, "Tap position {} for satellite index {} is outside the register", tap, sv_idx),
			Self::InvalidMargin(margin) => write!(f, "Detection margin {} exceeds the code length", margin),
			Self::SvOutOfRange(sv_idx) => write!(f, "No code generated for satellite index {}", sv_idx),
			Self::TaskFailed(msg) => write!(f, "Acquisition task failed: {}", msg),
			Self::Other(msg) => write!(f, "{}", msg),
		}
	}

}

impl std::error::Error for DecoderErr {}
