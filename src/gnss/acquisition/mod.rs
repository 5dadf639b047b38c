use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::{DecoderErr, SampleSequence};
use crate::gnss::constants::{CODE_LENGTH, DEFAULT_DETECTION_MARGIN};
use crate::gnss::gps_l1_ca::signal_modulation::{CodeTable, GoldCode};

pub mod fft_correlator;
pub mod sliding_correlator;


/// Correlation values at or beyond these bounds are accepted as synchronization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
	pub upper:i32,
	pub lower:i32,
}

impl Thresholds {

	/// Thresholds `margin` below the perfect correlation of +/- CODE_LENGTH
	pub fn from_margin(margin:u32) -> Result<Self, DecoderErr> {
		if margin as usize > CODE_LENGTH { return Err(DecoderErr::InvalidMargin(margin)); }
		Ok(Self::with_margin(margin))
	}

	fn with_margin(margin:u32) -> Self {
		let peak = CODE_LENGTH as i32;
		Self{ upper: peak - margin as i32, lower: -peak + margin as i32 }
	}

	/// Decoded bit if the product crosses a threshold
	pub fn classify(&self, product:i32) -> Option<u8> {
		if      product >= self.upper { Some(1) }
		else if product <= self.lower { Some(0) }
		else { None }
	}

}

impl Default for Thresholds {
	fn default() -> Self { Self::with_margin(DEFAULT_DETECTION_MARGIN) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AcquisitionResult {
	Detected{ sv_id:usize, bit:u8, delta:usize, correlation:i32 },
	NotFound{ sv_id:usize, best_correlation:i32, best_delta:usize },
}

impl AcquisitionResult {

	pub fn sv_id(&self) -> usize { match self {
		Self::Detected{ sv_id, .. } => *sv_id,
		Self::NotFound{ sv_id, .. } => *sv_id,
	}}

	pub fn is_detected(&self) -> bool { matches!(self, Self::Detected{ .. }) }

}

impl fmt::Display for AcquisitionResult {

	fn fmt(&self, f:&mut fmt::Formatter) -> fmt::Result { match self {
		Self::Detected{ sv_id, bit, delta, .. } =>
			write!(f, "Satellite {:2} has sent bit {} (delta = {})", sv_id, bit, delta),
		Self::NotFound{ sv_id, best_correlation, best_delta } =>
			write!(f, "Satellite {:2} no synchronization found (best correlation = {} at delta = {})", sv_id, best_correlation, best_delta),
	}}

}

pub trait Acquisition {
	/// Searches every code phase of one satellite, `sv_idx` being 0-based
	fn acquire(&self, sv_idx:usize, code:&GoldCode, samples:&SampleSequence) -> Result<AcquisitionResult, DecoderErr>;
}

/// Walks correlation products in code phase order and stops at the first one that crosses a threshold
pub(crate) fn first_crossing<I: Iterator<Item = i32>>(sv_idx:usize, products:I, thresholds:&Thresholds) -> AcquisitionResult {
	let sv_id = sv_idx + 1;
	let mut best = (0i32, 0usize);

	for (delta, product) in products.enumerate() {
		if let Some(bit) = thresholds.classify(product) {
			return AcquisitionResult::Detected{ sv_id, bit, delta, correlation: product };
		}
		if product.abs() > best.0.abs() {
			best = (product, delta);
		}
	}

	AcquisitionResult::NotFound{ sv_id, best_correlation: best.0, best_delta: best.1 }
}

/// Runs the search for every satellite in the table, in satellite order
pub fn acquire_all<A: Acquisition + ?Sized>(acq:&A, codes:&CodeTable, samples:&SampleSequence) -> Result<Vec<AcquisitionResult>, DecoderErr> {
	codes.iter().enumerate()
		.map(|(sv_idx, code)| acq.acquire(sv_idx, code, samples))
		.collect()
}

/// Same as `acquire_all`, but each satellite is searched on the blocking thread pool
pub async fn acquire_all_concurrent<A>(acq:Arc<A>, codes:Arc<CodeTable>, samples:Arc<SampleSequence>) -> Result<Vec<AcquisitionResult>, DecoderErr>
	where A: 'static + Acquisition + Send + Sync {

	let handles:Vec<_> = (0..codes.len()).map(|sv_idx| {
		let (acq, codes, samples) = (acq.clone(), codes.clone(), samples.clone());
		tokio::task::spawn_blocking(move || acq.acquire(sv_idx, codes.code(sv_idx)?, &samples))
	}).collect();

	let mut results:Vec<AcquisitionResult> = Vec::with_capacity(handles.len());
	for handle in handles {
		results.push(handle.await.map_err(|e| DecoderErr::TaskFailed(format!("{:?}", e)))??);
	}

	Ok(results)
}
