// Inline styles and class names applied to the host container and canvas.
// Kept free of web-sys types so it can be tested on the host.

pub const BASE_CLASS: &str = "waves";

pub const CANVAS_STYLE: &str = "display:block;width:100%;height:100%;";

// Custom properties carrying the smoothed pointer position (cursor-dot hook)
pub const CURSOR_VAR_X: &str = "--x";
pub const CURSOR_VAR_Y: &str = "--y";

/// Container declarations: fill the positioned parent and clip overscan.
pub fn container_style(background_color: &str) -> [(&'static str, String); 9] {
    [
        ("background-color", background_color.to_string()),
        ("position", "absolute".to_string()),
        ("top", "0".to_string()),
        ("left", "0".to_string()),
        ("margin", "0".to_string()),
        ("padding", "0".to_string()),
        ("width", "100%".to_string()),
        ("height", "100%".to_string()),
        ("overflow", "hidden".to_string()),
    ]
}

/// Base class followed by any user-supplied class names.
pub fn class_tokens(class_name: Option<&str>) -> Vec<&str> {
    std::iter::once(BASE_CLASS)
        .chain(class_name.unwrap_or_default().split_whitespace())
        .collect()
}

#[inline]
pub fn px(value: f32) -> String {
    format!("{:.2}px", value)
}

/// `(--x, --y)` declarations for a pointer position in container space.
pub fn cursor_vars(x: f32, y: f32) -> [(&'static str, String); 2] {
    [(CURSOR_VAR_X, px(x)), (CURSOR_VAR_Y, px(y))]
}
