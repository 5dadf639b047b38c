use crate::DecoderErr;
use crate::gnss::constants::{CODE_LENGTH, REGISTER_LENGTH, SATELLITE_COUNT};
use crate::utils;

/// Pair of 0-based bottom register positions combined to select one satellite's code phase
pub type TapConfig = (usize, usize);

// Given in IS-GPS-200, Table 3-Ia, shifted to 0-based register positions
pub const GPS_CA_TAPS:[TapConfig; SATELLITE_COUNT] = [
	(1, 5),	// PRN 01
	(2, 6),	// PRN 02
	(3, 7),	// PRN 03
	(4, 8),	// PRN 04
	(0, 8),	// PRN 05
	(1, 9),	// PRN 06
	(0, 7),	// PRN 07
	(1, 8),	// PRN 08
	(2, 9),	// PRN 09
	(1, 2),	// PRN 10
	(2, 3),	// PRN 11
	(4, 5),	// PRN 12
	(5, 6),	// PRN 13
	(6, 7),	// PRN 14
	(7, 8),	// PRN 15
	(8, 9),	// PRN 16
	(0, 3),	// PRN 17
	(1, 4),	// PRN 18
	(2, 5),	// PRN 19
	(3, 6),	// PRN 20
	(4, 7),	// PRN 21
	(5, 8),	// PRN 22
	(0, 2),	// PRN 23
	(3, 5),	// PRN 24
];

// Feedback taps, 0-based; G1 is x^10 + x^3 + 1 and G2 is x^10 + x^9 + x^8 + x^6 + x^3 + x^2 + 1
const TOP_FEEDBACK_TAPS:[usize; 2] = [2, 9];
const BOTTOM_FEEDBACK_TAPS:[usize; 6] = [1, 2, 5, 7, 8, 9];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftRegister {
	pub state: [bool; REGISTER_LENGTH],
}

impl ShiftRegister {

	pub fn new() -> Self { Self{ state: [true; REGISTER_LENGTH] } }

	/// Mod-2 sum of the given register positions
	pub fn xor_taps(&self, taps:&[usize]) -> bool {
		taps.iter().fold(false, |acc, idx| acc ^ self.state[*idx])
	}

	pub fn output(&self) -> bool { self.state[REGISTER_LENGTH-1] }

	/// Shifts one position to the right, dropping the last bit and inserting `feedback` at the front
	pub fn shift(&mut self, feedback:bool) {
		self.state.rotate_right(1);
		self.state[0] = feedback;
	}

}

impl Default for ShiftRegister {
	fn default() -> Self { Self::new() }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldCode {
	chips: Vec<u8>,
	bipolar: Vec<i8>,
}

impl GoldCode {

	fn from_chips(chips:Vec<u8>) -> Self {
		let bipolar = chips.iter().map(|c| utils::to_bipolar(*c)).collect();
		Self{ chips, bipolar }
	}

	pub fn chips(&self) -> &[u8] { &self.chips }
	pub fn bipolar(&self) -> &[i8] { &self.bipolar }

	/// Every chip as 0/1, separated by spaces
	pub fn chip_string(&self) -> String {
		self.chips.iter().map(|c| c.to_string()).collect::<Vec<String>>().join(" ")
	}

	/// Every chip in bipolar form, right-aligned to two characters
	pub fn bipolar_string(&self) -> String {
		self.bipolar.iter().map(|b| format!("{:2}", b)).collect::<Vec<String>>().join(" ")
	}

}

/// Codes for every configured satellite, indexed by 0-based satellite index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
	codes: Vec<GoldCode>,
}

impl CodeTable {

	pub fn code(&self, sv_idx:usize) -> Result<&GoldCode, DecoderErr> {
		self.codes.get(sv_idx).ok_or(DecoderErr::SvOutOfRange(sv_idx))
	}

	pub fn len(&self) -> usize { self.codes.len() }

	pub fn is_empty(&self) -> bool { self.codes.is_empty() }

	pub fn iter(&self) -> impl Iterator<Item = &GoldCode> { self.codes.iter() }

}

pub fn validate_taps(taps:&[TapConfig]) -> Result<(), DecoderErr> {
	for (sv_idx, (a, b)) in taps.iter().enumerate() {
		for tap in &[*a, *b] {
			if *tap >= REGISTER_LENGTH {
				return Err(DecoderErr::InvalidTap{ sv_idx, tap: *tap });
			}
		}
	}
	Ok(())
}

/// Generates one code per tap pair. The two registers are initialized once and keep running
/// from one satellite to the next.
pub fn generate_codes(taps:&[TapConfig]) -> Result<CodeTable, DecoderErr> {
	validate_taps(taps)?;
	Ok(generate_validated(taps))
}

pub fn generate_gps_ca_codes() -> CodeTable { generate_validated(&GPS_CA_TAPS) }

fn generate_validated(taps:&[TapConfig]) -> CodeTable {
	let mut top    = ShiftRegister::new();
	let mut bottom = ShiftRegister::new();

	let codes = taps.iter().map(|(a, b)| {
		let mut chips:Vec<u8> = Vec::with_capacity(CODE_LENGTH);
		for _ in 0..CODE_LENGTH {
			let phase_select:bool = bottom.xor_taps(&[*a, *b]);
			chips.push((phase_select ^ top.output()) as u8);

			let top_feedback = top.xor_taps(&TOP_FEEDBACK_TAPS);
			top.shift(top_feedback);

			let bottom_feedback = bottom.xor_taps(&BOTTOM_FEEDBACK_TAPS);
			bottom.shift(bottom_feedback);
		}
		GoldCode::from_chips(chips)
	}).collect();

	CodeTable{ codes }
}

#[cfg(test)]
mod tests {

	use super::*;
	use crate::gnss::acquisition::Thresholds;
	use crate::utils::scalar_product;

	#[test]
	fn shift_register_inserts_feedback_at_front() {
		let mut reg = ShiftRegister::new();
		reg.shift(false);
		assert_eq!(reg.state, [false, true, true, true, true, true, true, true, true, true]);
		reg.shift(true);
		assert_eq!(reg.state, [true, false, true, true, true, true, true, true, true, true]);
		assert!(reg.output());
	}

	#[test]
	fn registers_return_to_all_ones_after_one_period() {
		let mut top    = ShiftRegister::new();
		let mut bottom = ShiftRegister::new();
		for step in 1..=CODE_LENGTH {
			let f = top.xor_taps(&TOP_FEEDBACK_TAPS);
			top.shift(f);
			let f = bottom.xor_taps(&BOTTOM_FEEDBACK_TAPS);
			bottom.shift(f);
			if step < CODE_LENGTH {
				assert_ne!(top, ShiftRegister::new(), "top register repeated early at step {}", step);
				assert_ne!(bottom, ShiftRegister::new(), "bottom register repeated early at step {}", step);
			}
		}
		assert_eq!(top, ShiftRegister::new());
		assert_eq!(bottom, ShiftRegister::new());
	}

	#[test]
	fn every_code_is_binary_with_bipolar_mapping() {
		let table = generate_gps_ca_codes();
		assert_eq!(table.len(), SATELLITE_COUNT);
		for code in table.iter() {
			assert_eq!(code.chips().len(), CODE_LENGTH);
			assert_eq!(code.bipolar().len(), CODE_LENGTH);
			for (c, b) in code.chips().iter().zip(code.bipolar().iter()) {
				match c {
					0 => assert_eq!(*b, -1),
					1 => assert_eq!(*b,  1),
					_ => panic!("chip value {} is not binary", c),
				}
			}
		}
	}

	#[test]
	fn prn_01_starts_with_known_chips() {
		// First ten chips of PRN 1 are octal 1440 in IS-GPS-200
		let table = generate_gps_ca_codes();
		let first_ten:Vec<u8> = table.code(0).unwrap().chips()[..10].to_vec();
		assert_eq!(first_ten, vec![1, 1, 0, 0, 1, 0, 0, 0, 0, 0]);
	}

	#[test]
	fn dump_strings_hold_the_whole_code() {
		let table = generate_gps_ca_codes();
		let code = table.code(0).unwrap();

		let chip_string = code.chip_string();
		let chips:Vec<&str> = chip_string.split(' ').collect();
		assert_eq!(chips.len(), CODE_LENGTH);
		assert_eq!(&chips[..10], &["1", "1", "0", "0", "1", "0", "0", "0", "0", "0"]);

		let bipolar:Vec<i8> = code.bipolar_string().split_whitespace().map(|s| s.parse().unwrap()).collect();
		assert_eq!(bipolar, code.bipolar().to_vec());
		assert!(code.bipolar_string().starts_with(" 1  1 -1 -1  1"));
	}

	#[test]
	fn generation_is_deterministic() {
		assert_eq!(generate_gps_ca_codes(), generate_gps_ca_codes());
		assert_eq!(generate_codes(&GPS_CA_TAPS).unwrap(), generate_gps_ca_codes());
	}

	#[test]
	fn auto_correlation_at_zero_lag_is_code_length() {
		let table = generate_gps_ca_codes();
		for code in table.iter() {
			assert_eq!(scalar_product(code.bipolar(), code.bipolar()), CODE_LENGTH as i32);
		}
	}

	#[test]
	fn cross_correlation_stays_inside_thresholds() {
		let table = generate_gps_ca_codes();
		let t = Thresholds::default();
		for i in 0..table.len() {
			for j in 0..table.len() {
				if i == j { continue; }
				let p = scalar_product(table.code(i).unwrap().bipolar(), table.code(j).unwrap().bipolar());
				assert!(t.classify(p).is_none(), "PRN {} vs PRN {}: {}", i+1, j+1, p);
			}
		}
	}

	#[test]
	fn out_of_range_taps_are_rejected() {
		let taps = [(1, 5), (2, 10)];
		assert_eq!(generate_codes(&taps), Err(DecoderErr::InvalidTap{ sv_idx: 1, tap: 10 }));
	}

	#[test]
	fn code_lookup_past_the_table_fails() {
		let table = generate_gps_ca_codes();
		assert_eq!(table.code(SATELLITE_COUNT), Err(DecoderErr::SvOutOfRange(SATELLITE_COUNT)));
	}

}
