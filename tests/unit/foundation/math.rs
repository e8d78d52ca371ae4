use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_clears_fully_transparent_pixels() {
    let mut px = vec![200u8, 100, 50, 0, 255, 0, 0, 128];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[0, 0, 0, 0]);
    assert_eq!(&px[4..8], &[128, 0, 0, 128]);
}

#[test]
fn unpremultiply_restores_opaque_and_half_alpha() {
    assert_eq!(unpremultiply_px([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(unpremultiply_px([128, 0, 0, 128]), [255, 0, 0, 128]);
    assert_eq!(unpremultiply_px([5, 5, 5, 0]), [0, 0, 0, 0]);

    let mut buf = vec![64u8, 64, 64, 128];
    unpremultiply_rgba8_in_place(&mut buf);
    assert_eq!(buf, vec![128, 128, 128, 128]);
}
