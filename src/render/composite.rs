use crate::foundation::error::{DynfigureError, DynfigureResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel, with an extra opacity multiplier on `src`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite `src` over `dst` for two buffers of identical size.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> DynfigureResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(DynfigureError::validation(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Placement of a smaller source buffer inside a destination buffer.
#[derive(Clone, Copy, Debug)]
pub struct Region {
    pub dst_width: u32,
    pub dst_height: u32,
    pub src_width: u32,
    pub src_height: u32,
    /// Top-left of the source in destination pixels; may be negative or out of bounds.
    pub x: i64,
    pub y: i64,
}

/// Composite `src` over the part of `dst` it covers. Pixels outside the region are untouched.
pub fn over_region(dst: &mut [u8], src: &[u8], region: Region) -> DynfigureResult<()> {
    let Region {
        dst_width,
        dst_height,
        src_width,
        src_height,
        x,
        y,
    } = region;
    if dst.len() != dst_width as usize * dst_height as usize * 4
        || src.len() != src_width as usize * src_height as usize * 4
    {
        return Err(DynfigureError::validation(
            "over_region buffer length does not match its dimensions",
        ));
    }

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(i64::from(src_width)).min(i64::from(dst_width));
    let y1 = y.saturating_add(i64::from(src_height)).min(i64::from(dst_height));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let dst_stride = dst_width as usize * 4;
    let src_stride = src_width as usize * 4;
    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        let d_row = dy as usize * dst_stride;
        let s_row = sy * src_stride;
        for dx in x0..x1 {
            let sx = (dx - x) as usize;
            let di = d_row + dx as usize * 4;
            let si = s_row + sx * 4;
            let s = [src[si], src[si + 1], src[si + 2], src[si + 3]];
            let d = [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]];
            dst[di..di + 4].copy_from_slice(&over(d, s, 1.0));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
