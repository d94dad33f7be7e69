//! config.h fragments
//!
//! Struct and field names must match the firmware's `input.h`, `motor.h`,
//! `display.h` and `log.h`. Output is C, so nothing is escaped.

use askama::Template;

#[derive(Template, Debug)]
#[template(ext = "h", escape = "none", source = "#define LOG_LEVEL {{ log_level }}")]
pub struct LogTemplate {
    pub log_level: &'static str,
}

#[derive(Template, Debug)]
#[template(
    ext = "h",
    escape = "none",
    source = r#"static struct KeypadConfig keypadConfig = {
    .rowPins = {{ row_pins }},
    .colPins = {{ col_pins }}
};"#
)]
pub struct KeypadTemplate {
    pub row_pins: String,
    pub col_pins: String,
}

#[derive(Template, Debug)]
#[template(
    ext = "h",
    escape = "none",
    source = r#"static struct MotorConfig motorConfig = {
    .driver = {{ driver }},
    .stepsPerRevolution = {{ steps_per_revolution }},
    .pins = {{ pins }}
};"#
)]
pub struct MotorTemplate {
    pub driver: &'static str,
    pub steps_per_revolution: u32,
    pub pins: String,
}

#[derive(Template, Debug)]
#[template(
    ext = "h",
    escape = "none",
    source = r#"static struct DisplayConfig displayConfig = {
    .controller = {{ controller }},
    .bufferMode = {{ buffer_mode }},
    .clock = {{ clock }},
    .data = {{ data }},
    .cs = {{ cs }},
    .dc = {{ dc }},
    .reset = {{ reset }},
    .backlight = {{ backlight }}
};"#
)]
pub struct DisplayTemplate<'a> {
    pub controller: &'a str,
    pub buffer_mode: &'static str,
    pub clock: u8,
    pub data: u8,
    pub cs: u8,
    pub dc: u8,
    pub reset: u8,
    pub backlight: u8,
}

/// The include-guarded wrapper the rendered fragments are placed into
#[derive(Template, Debug)]
#[template(
    ext = "h",
    escape = "none",
    source = r#"#ifndef Planer__config_h_INCLUDED
#define Planer__config_h_INCLUDED

#include "log.h"
#include "input.h"
#include "motor.h"
#include "display.h"

/// Log
{{ log }}

/// Input
{{ keypad }}

/// Motor
{{ motor }}

/// Display

/// Display buffer type
/// _1Page: 1 page buffer, _2Page: 2 page buffer, Full: full buffering
{{ display }}

#endif // Planer__config_h_INCLUDED
"#
)]
pub struct ConfigHeaderTemplate {
    pub log: String,
    pub keypad: String,
    pub motor: String,
    pub display: String,
}
