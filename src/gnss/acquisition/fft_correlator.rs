use std::fmt;
use std::sync::Arc;

use num_complex::Complex;
use num_traits::Zero;
use rustfft::{FFT, FFTplanner};

use crate::{DecoderErr, SampleSequence};
use crate::gnss::constants::CODE_LENGTH;
use crate::gnss::gps_l1_ca::signal_modulation::GoldCode;

use super::{AcquisitionResult, Thresholds};

/// Frequency-domain search: circular correlation at every code phase from one forward and one
/// inverse FFT, then the same first-crossing rule as the sliding search
pub struct FftCorrelator {
	pub thresholds:Thresholds,
	len_fft:usize,
	fft:Arc<dyn FFT<f64>>,
	ifft:Arc<dyn FFT<f64>>,
}

impl FftCorrelator {

	pub fn new(thresholds:Thresholds) -> Self {
		let len_fft = CODE_LENGTH;
		let fft  = FFTplanner::new(false).plan_fft(len_fft);
		let ifft = FFTplanner::new(true).plan_fft(len_fft);
		Self{ thresholds, len_fft, fft, ifft }
	}

	fn forward(&self, x:&[i8]) -> Vec<Complex<f64>> {
		let mut time_domain:Vec<Complex<f64>> = x.iter().map(|v| Complex{ re: *v as f64, im: 0.0 }).collect();
		let mut freq_domain:Vec<Complex<f64>> = vec![Complex::zero(); self.len_fft];
		self.fft.process(&mut time_domain, &mut freq_domain);
		freq_domain
	}

	/// Correlation products for every right rotation of the code, rounded to integers
	pub fn correlate(&self, code:&[i8], samples:&[i8]) -> Vec<i32> {
		let code_freq_domain    = self.forward(code);
		let samples_freq_domain = self.forward(samples);

		// Multiplying by the conjugate in the freq domain is correlation in the time domain
		let mut correlation_freq_domain:Vec<Complex<f64>> = samples_freq_domain.iter()
			.zip(code_freq_domain.iter())
			.map(|(s, c)| s * c.conj())
			.collect();

		let mut correlation_time_domain:Vec<Complex<f64>> = vec![Complex::zero(); self.len_fft];
		self.ifft.process(&mut correlation_freq_domain, &mut correlation_time_domain);

		correlation_time_domain.iter().map(|c| (c.re / (self.len_fft as f64)).round() as i32).collect()
	}

}

impl Default for FftCorrelator {
	fn default() -> Self { Self::new(Thresholds::default()) }
}

impl fmt::Debug for FftCorrelator {
	fn fmt(&self, f:&mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("FftCorrelator").field("thresholds", &self.thresholds).field("len_fft", &self.len_fft).finish()
	}
}

impl super::Acquisition for FftCorrelator {

	fn acquire(&self, sv_idx:usize, code:&GoldCode, samples:&SampleSequence) -> Result<AcquisitionResult, DecoderErr> {
		let products = self.correlate(code.bipolar(), samples.values());
		Ok(super::first_crossing(sv_idx, products.into_iter(), &self.thresholds))
	}

}
