
/// Maps a chip to bipolar form, 0 => -1 and anything else => +1
pub fn to_bipolar(chip:u8) -> i8 { if chip == 0 { -1 } else { 1 } }

pub fn scalar_product(a:&[i8], b:&[i8]) -> i32 {
	a.iter().zip(b.iter()).map(|(x, y)| (*x as i32) * (*y as i32)).sum()
}

#[test]
fn test_to_bipolar() {
	assert_eq!(to_bipolar(0), -1);
	assert_eq!(to_bipolar(1),  1);
}

#[test]
fn test_scalar_product() {
	assert_eq!(scalar_product(&[1, -1, 0, 2], &[1, 1, -1, -1]), -2);
	assert_eq!(scalar_product(&[], &[]), 0);
	assert_eq!(scalar_product(&[9; 1023], &[-1; 1023]), -9207);
}
