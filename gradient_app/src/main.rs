//! Scrolling-gradient demo application
//!
//! Proves the engine's presentation pipeline: every frame it overwrites
//! the whole backbuffer with a diagonal gradient that scrolls one pixel
//! horizontally per frame, and wires up the demonstration gamepad
//! effects (holding A rumbles the pad and scrolls vertically). A real
//! application replaces the producer entirely while keeping the same
//! "fill the backbuffer during render" contract.

use pixel_engine::prelude::*;

/// Motor magnitude commanded while the primary action button is held.
const VIBRATION_STRONG: u16 = 60_000;

/// Horizontal scroll in pixels per frame.
const SCROLL_STEP_X: i32 = 1;

/// Vertical scroll in pixels per frame while A is held.
const BUTTON_SCROLL_STEP_Y: i32 = 2;

/// Optional configuration file next to the binary.
const CONFIG_PATH: &str = "gradient_app.toml";

/// Demo state: just the two animation offsets.
#[derive(Default)]
struct GradientApp {
    offset_x: i32,
    offset_y: i32,
}

impl GradientApp {
    /// React to one gamepad's state this frame.
    ///
    /// Returns the vibration command to send, or `None` for an
    /// unoccupied slot.
    fn gamepad_effect(&mut self, pad: &GamepadSnapshot) -> Option<(u16, u16)> {
        if !pad.connected {
            return None;
        }
        if pad.buttons.contains(GamepadButtons::A) {
            self.offset_y += BUTTON_SCROLL_STEP_Y;
            Some((VIBRATION_STRONG, VIBRATION_STRONG))
        } else {
            Some((0, 0))
        }
    }

    /// Fill the buffer with the current frame, then advance the
    /// horizontal scroll one step.
    fn produce_frame(&mut self, buffer: &mut Backbuffer) {
        fill_gradient(buffer, self.offset_x, self.offset_y);
        self.offset_x += SCROLL_STEP_X;
    }
}

impl Application for GradientApp {
    fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        log::info!("Gradient demo starting");
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
        for slot in 0..MAX_GAMEPADS {
            let pad = engine.input().gamepad(slot);
            if let Some((low, high)) = self.gamepad_effect(&pad) {
                engine.gamepads_mut().set_vibration(slot, low, high);
            }
        }
        Ok(())
    }

    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        self.produce_frame(engine.backbuffer_mut());
        Ok(())
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        log::info!(
            "Gradient demo shutting down at offsets ({}, {})",
            self.offset_x,
            self.offset_y
        );
    }
}

/// Write the scrolling gradient into every pixel of the buffer.
///
/// Pixel (x, y) gets `(x + offset_x) mod 256` in its blue (low) byte
/// and `(y + offset_y) mod 256` in its green byte; the other bytes are
/// zero. The whole buffer is overwritten scanline by scanline, top
/// down, so prior contents never show through.
fn fill_gradient(buffer: &mut Backbuffer, offset_x: i32, offset_y: i32) {
    for (y, row) in buffer.rows_mut().enumerate() {
        let green = (y as i32).wrapping_add(offset_y) as u8;
        for (x, pixel) in row.iter_mut().enumerate() {
            let blue = (x as i32).wrapping_add(offset_x) as u8;
            *pixel = u32::from(green) << 8 | u32::from(blue);
        }
    }
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match EngineConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => {
            log::info!("Loaded configuration from {}", CONFIG_PATH);
            config
        }
        Err(ConfigError::Io(_)) => {
            // No config file is the normal case; run with defaults.
            let mut config = EngineConfig::default();
            config.window.title = "Gradient Demo".to_string();
            config
        }
        Err(e) => {
            log::error!("Invalid configuration in {}: {}", CONFIG_PATH, e);
            std::process::exit(1);
        }
    };

    let mut app = GradientApp::default();
    if let Err(e) = Engine::run(config, &mut app) {
        log::error!("Fatal engine error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(buffer: &Backbuffer, x: usize, y: usize) -> u32 {
        buffer.pixels()[y * buffer.width() as usize + x]
    }

    #[test]
    fn test_gradient_formula() {
        let mut buffer = Backbuffer::new(300, 280);
        fill_gradient(&mut buffer, 0, 0);

        assert_eq!(pixel(&buffer, 0, 0), 0x0000_0000);
        assert_eq!(pixel(&buffer, 5, 0), 0x0000_0005);
        assert_eq!(pixel(&buffer, 0, 3), 0x0000_0300);
        // Both channels wrap modulo 256.
        assert_eq!(pixel(&buffer, 259, 0), 0x0000_0003);
        assert_eq!(pixel(&buffer, 0, 258), 0x0000_0200);
    }

    #[test]
    fn test_gradient_offsets_shift_channels() {
        let mut buffer = Backbuffer::new(16, 16);
        fill_gradient(&mut buffer, 250, 300);

        // blue = (x + 250) mod 256, green = (y + 300) mod 256
        assert_eq!(pixel(&buffer, 10, 0) & 0xFF, (10 + 250) % 256u32);
        assert_eq!((pixel(&buffer, 0, 12) >> 8) & 0xFF, (12 + 300) % 256u32);
    }

    #[test]
    fn test_gradient_handles_negative_offsets() {
        let mut buffer = Backbuffer::new(8, 8);
        fill_gradient(&mut buffer, -1, -2);

        assert_eq!(pixel(&buffer, 0, 0) & 0xFF, 255);
        assert_eq!((pixel(&buffer, 0, 0) >> 8) & 0xFF, 254);
        assert_eq!(pixel(&buffer, 1, 0) & 0xFF, 0);
    }

    #[test]
    fn test_gradient_overwrite_is_idempotent() {
        let mut buffer = Backbuffer::new(32, 32);
        buffer.pixels_mut().fill(0xFFFF_FFFF);

        fill_gradient(&mut buffer, 7, 9);
        let first: Vec<u32> = buffer.pixels().to_vec();

        fill_gradient(&mut buffer, 7, 9);
        assert_eq!(buffer.pixels(), &first[..]);

        // No trace of prior contents anywhere.
        assert!(buffer.pixels().iter().all(|p| p & 0xFFFF_0000 == 0));
    }

    #[test]
    fn test_offset_advances_one_per_frame() {
        let mut app = GradientApp::default();
        let mut buffer = Backbuffer::new(4, 4);

        for frame in 0u32..10 {
            // Frame N is produced with offset N...
            app.produce_frame(&mut buffer);
            assert_eq!(pixel(&buffer, 0, 0) & 0xFF, frame);
        }
        // ...and after N frames the offset equals N.
        assert_eq!(app.offset_x, 10);
        assert_eq!(app.offset_y, 0);
    }

    #[test]
    fn test_gamepad_effect_while_a_held() {
        let mut app = GradientApp::default();

        let mut pad = GamepadSnapshot::default();
        assert_eq!(app.gamepad_effect(&pad), None);

        pad.connected = true;
        assert_eq!(app.gamepad_effect(&pad), Some((0, 0)));
        assert_eq!(app.offset_y, 0);

        pad.buttons = GamepadButtons::A;
        assert_eq!(
            app.gamepad_effect(&pad),
            Some((VIBRATION_STRONG, VIBRATION_STRONG))
        );
        assert_eq!(app.gamepad_effect(&pad), Some((VIBRATION_STRONG, VIBRATION_STRONG)));
        assert_eq!(app.offset_y, 2 * BUTTON_SCROLL_STEP_Y);

        // Releasing the button resets vibration, not the offset.
        pad.buttons = GamepadButtons::empty();
        assert_eq!(app.gamepad_effect(&pad), Some((0, 0)));
        assert_eq!(app.offset_y, 2 * BUTTON_SCROLL_STEP_Y);
    }
}
