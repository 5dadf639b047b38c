use crate::{DecoderErr, SampleSequence};
use crate::gnss::gps_l1_ca::signal_modulation::GoldCode;
use crate::utils::scalar_product;

use super::{AcquisitionResult, Thresholds};

/// Time-domain search: one scalar product per code phase, rotating a working copy of the code
/// one chip to the right between attempts
#[derive(Debug, Clone, Default)]
pub struct SlidingCorrelator {
	pub thresholds:Thresholds,
}

impl SlidingCorrelator {
	pub fn new(thresholds:Thresholds) -> Self { Self{ thresholds } }
}

impl super::Acquisition for SlidingCorrelator {

	fn acquire(&self, sv_idx:usize, code:&GoldCode, samples:&SampleSequence) -> Result<AcquisitionResult, DecoderErr> {
		let mut working:Vec<i8> = code.bipolar().to_vec();
		let products = (0..working.len()).map(|delta| {
			if delta > 0 { working.rotate_right(1); }
			scalar_product(samples.values(), &working)
		});

		Ok(super::first_crossing(sv_idx, products, &self.thresholds))
	}

}
