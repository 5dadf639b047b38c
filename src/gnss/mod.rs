
/// This module contains the correlators that search a received sample sequence for each satellite's code
pub mod acquisition;

pub mod constants;

pub mod gps_l1_ca;
