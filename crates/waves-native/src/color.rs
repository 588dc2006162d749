// CSS color subset understood by the native preview: #rgb, #rrggbb,
// #rrggbbaa and a few keywords. Output is straight (non-premultiplied) sRGB.

pub fn parse_css_color(input: &str) -> Option<[f32; 4]> {
    let s = input.trim();
    match s.to_ascii_lowercase().as_str() {
        "transparent" => return Some([0.0, 0.0, 0.0, 0.0]),
        "black" => return Some([0.0, 0.0, 0.0, 1.0]),
        "white" => return Some([1.0, 1.0, 1.0, 1.0]),
        _ => {}
    }
    let hex = s.strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize, width: usize| -> Option<f32> {
        let v = u8::from_str_radix(hex.get(i * width..(i + 1) * width)?, 16).ok()?;
        // #rgb expands each nibble to a byte (f -> ff)
        let v = if width == 1 { v * 17 } else { v };
        Some(v as f32 / 255.0)
    };
    match hex.len() {
        3 => Some([channel(0, 1)?, channel(1, 1)?, channel(2, 1)?, 1.0]),
        6 => Some([channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, 1.0]),
        8 => Some([channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, channel(3, 2)?]),
        _ => None,
    }
}

/// Parse `input`, logging and using `fallback` when it is not understood.
pub fn css_color_or(input: &str, fallback: [f32; 4]) -> [f32; 4] {
    parse_css_color(input).unwrap_or_else(|| {
        log::warn!("[color] unsupported color {:?}, using fallback", input);
        fallback
    })
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert the color channels (not alpha) for an sRGB render target.
pub fn to_linear(rgba: [f32; 4]) -> [f32; 4] {
    [
        srgb_to_linear(rgba[0]),
        srgb_to_linear(rgba[1]),
        srgb_to_linear(rgba[2]),
        rgba[3],
    ]
}
