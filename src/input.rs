//! Pointer to field coordinate translation
//!
//! The browser reports pointer positions in client pixels. The paddle is
//! centred under the pointer, and the canvas may be scaled by CSS.

use crate::consts::{FIELD_WIDTH, PADDLE_OFFSET};

/// Paddle target x for a pointer at `client_x`.
///
/// `canvas_left` is the canvas's left edge and `canvas_css_width` its displayed
/// width, both in client pixels. The result is not clamped; the simulation's
/// input port does that.
pub fn pointer_to_paddle_x(client_x: f32, canvas_left: f32, canvas_css_width: f32) -> f32 {
    let scale = if canvas_css_width > 0.0 {
        FIELD_WIDTH / canvas_css_width
    } else {
        1.0
    };
    (client_x - canvas_left) * scale - PADDLE_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unscaled_canvas_centres_paddle() {
        // Canvas at 390px, pointer at its middle
        assert_eq!(pointer_to_paddle_x(640.0, 390.0, 500.0), 225.0);
        assert_eq!(pointer_to_paddle_x(390.0, 390.0, 500.0), -25.0);
    }

    #[test]
    fn test_scaled_canvas() {
        // Canvas squeezed to half width on a phone
        assert_eq!(pointer_to_paddle_x(125.0, 0.0, 250.0), 225.0);
    }

    #[test]
    fn test_degenerate_width_falls_back() {
        assert_eq!(pointer_to_paddle_x(100.0, 0.0, 0.0), 75.0);
    }
}
