//! config.h generation
//!
//! Pure transformation from a validated [`ProjectConfig`] to header text.
//! Each section renders into its own fragment; the fragments are then
//! placed, in the fixed order log, keypad, motor, display, into the
//! include-guarded wrapper. No I/O happens here: see [`crate::output`].

pub mod templates;

use askama::Template;

use crate::logging::{codes, Code};
use crate::model::{DisplayConfig, FirmwareLogLevel, KeypadConfig, MotorConfig, ProjectConfig};
use templates::{ConfigHeaderTemplate, DisplayTemplate, KeypadTemplate, LogTemplate, MotorTemplate};

/// Header rendering failures
///
/// Templates are checked at compile time, so this only surfaces a failure
/// inside the template engine itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("Rendering template `{template}` failed: {message}")]
    Rendering {
        template: &'static str,
        message: String,
    },
}

impl CodegenError {
    pub fn error_code(&self) -> Code {
        codes::codegen::TEMPLATE_FAILURE
    }
}

fn rendered(name: &'static str, template: &impl Template) -> Result<String, CodegenError> {
    template.render().map_err(|e| CodegenError::Rendering {
        template: name,
        message: e.to_string(),
    })
}

/// Render an integer list as a C array initializer: `[3, 2]` -> `{3, 2}`
///
/// Order and duplicates are preserved.
pub fn initializer<T: ToString>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("{{{}}}", items.join(", "))
}

pub fn render_log(log_level: FirmwareLogLevel) -> Result<String, CodegenError> {
    rendered(
        "log",
        &LogTemplate {
            log_level: log_level.symbol(),
        },
    )
}

pub fn render_keypad(keypad: &KeypadConfig) -> Result<String, CodegenError> {
    rendered(
        "keypad",
        &KeypadTemplate {
            row_pins: initializer(&keypad.row_pins),
            col_pins: initializer(&keypad.column_pins),
        },
    )
}

pub fn render_motor(motor: &MotorConfig) -> Result<String, CodegenError> {
    rendered(
        "motor",
        &MotorTemplate {
            driver: motor.driver.symbol(),
            steps_per_revolution: motor.steps_per_revolution,
            pins: initializer(&motor.pins),
        },
    )
}

pub fn render_display(display: &DisplayConfig) -> Result<String, CodegenError> {
    rendered(
        "display",
        &DisplayTemplate {
            controller: &display.controller,
            buffer_mode: display.buffer_mode.symbol(),
            clock: display.clock,
            data: display.data,
            cs: display.cs,
            dc: display.dc,
            reset: display.reset,
            backlight: display.backlight,
        },
    )
}

/// Render the complete config.h text
pub fn render(config: &ProjectConfig) -> Result<String, CodegenError> {
    let header = ConfigHeaderTemplate {
        log: render_log(config.log_level)?,
        keypad: render_keypad(&config.keypad)?,
        motor: render_motor(&config.motor)?,
        display: render_display(&config.display)?,
    };

    rendered("config.h", &header)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::reference_config;
    use crate::model::{BufferMode, MotorDriver};

    #[test]
    fn test_initializer() {
        assert_eq!(initializer(&[3u8, 2, 14, 15]), "{3, 2, 14, 15}");
        assert_eq!(initializer(&[9u8, 9, 1]), "{9, 9, 1}");
        assert_eq!(initializer::<u8>(&[]), "{}");
    }

    #[test]
    fn test_reference_render() {
        let output = render(&reference_config()).unwrap();

        assert!(output.contains(".rowPins = {3, 2, 14, 15}"));
        assert!(output.contains(".colPins = {16, 17, 18, 19}"));
        assert!(output.contains(".driver = motor::Driver"));
        assert!(output.contains(".stepsPerRevolution = 2048"));
        assert!(output.contains(".pins = {8, 10, 9, 12}"));
        assert!(output.contains(".controller = PCD8544"));
        assert!(output.contains(".bufferMode = _1Page"));
        assert!(output.contains(".backlight = 7"));
        assert!(output.contains("#define LOG_LEVEL LOG_LEVEL_INFO"));
        assert!(output.starts_with("#ifndef Planer__config_h_INCLUDED\n#define Planer__config_h_INCLUDED\n"));
        assert!(output.ends_with("#endif // Planer__config_h_INCLUDED\n"));
    }

    #[test]
    fn test_reference_render_exact() {
        let expected = r#"#ifndef Planer__config_h_INCLUDED
#define Planer__config_h_INCLUDED

#include "log.h"
#include "input.h"
#include "motor.h"
#include "display.h"

/// Log
#define LOG_LEVEL LOG_LEVEL_INFO

/// Input
static struct KeypadConfig keypadConfig = {
    .rowPins = {3, 2, 14, 15},
    .colPins = {16, 17, 18, 19}
};

/// Motor
static struct MotorConfig motorConfig = {
    .driver = motor::Driver,
    .stepsPerRevolution = 2048,
    .pins = {8, 10, 9, 12}
};

/// Display

/// Display buffer type
/// _1Page: 1 page buffer, _2Page: 2 page buffer, Full: full buffering
static struct DisplayConfig displayConfig = {
    .controller = PCD8544,
    .bufferMode = _1Page,
    .clock = 13,
    .data = 11,
    .cs = 6,
    .dc = 4,
    .reset = 5,
    .backlight = 7
};

#endif // Planer__config_h_INCLUDED
"#;

        assert_eq!(render(&reference_config()).unwrap(), expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = reference_config();
        assert_eq!(render(&config).unwrap(), render(&config.clone()).unwrap());
    }

    #[test]
    fn test_fragment_order() {
        let output = render(&reference_config()).unwrap();
        let positions: Vec<usize> = ["#define LOG_LEVEL", "keypadConfig", "motorConfig", "displayConfig"]
            .iter()
            .map(|needle| output.find(needle).unwrap())
            .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_enum_variants_render() {
        let mut config = reference_config();
        config.motor.driver = MotorDriver::Full4Wire;
        config.display.buffer_mode = BufferMode::Full;

        let output = render(&config).unwrap();
        assert!(output.contains(".driver = motor::Full4Wire"));
        assert!(output.contains(".bufferMode = Full,"));

        config.display.buffer_mode = BufferMode::TwoPage;
        assert!(render(&config).unwrap().contains(".bufferMode = _2Page,"));
    }

    #[test]
    fn test_fragments_render_verbatim() {
        assert_eq!(
            render_log(FirmwareLogLevel::Debug).unwrap(),
            "#define LOG_LEVEL LOG_LEVEL_DEBUG"
        );

        let keypad = KeypadTemplate {
            row_pins: "{1}".to_string(),
            col_pins: "{}".to_string(),
        };
        assert_eq!(
            keypad.render().unwrap(),
            "static struct KeypadConfig keypadConfig = {\n    .rowPins = {1},\n    .colPins = {}\n};"
        );
    }

    #[test]
    fn test_controller_is_not_escaped() {
        let mut config = reference_config();
        config.display.controller = "U8G2<\"SSD1306\">&".to_string();

        let output = render(&config).unwrap();
        assert!(output.contains(".controller = U8G2<\"SSD1306\">&,"));
    }

    #[test]
    fn test_wrapper_places_fragments_in_order() {
        let header = ConfigHeaderTemplate {
            log: "L".to_string(),
            keypad: "K".to_string(),
            motor: "M".to_string(),
            display: "D".to_string(),
        };
        let output = header.render().unwrap();

        assert!(output.contains("/// Log\nL\n\n/// Input\nK\n\n/// Motor\nM\n"));
        assert!(output.contains("full buffering\nD\n\n#endif // Planer__config_h_INCLUDED\n"));
    }
}
