
// Chips per code period; both registers are maximal-length with this period
pub const CODE_LENGTH:usize = 1023;

pub const REGISTER_LENGTH:usize = 10;
pub const SATELLITE_COUNT:usize = 24;

// Worst-case Gold code cross-correlation magnitude for 10-bit registers
pub const CROSS_CORRELATION_BOUND:u32 = 65;

pub const DEFAULT_DETECTION_MARGIN:u32 = 3 * CROSS_CORRELATION_BOUND;
