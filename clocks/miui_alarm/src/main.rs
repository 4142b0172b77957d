//! MIUI Alarm Clock
//!
//! Desktop host for the clock face: owns the window, feeds mouse and touch
//! input into the pointer latch and redraws on every display refresh.

mod drawing;

use chrono::NaiveTime;
use chrono_tz::Tz;
use miui_alarm::{parse_color, ClockRenderer, PointerLatch, Style};
use nannou::prelude::*;
use serde::{Deserialize, Serialize};
use shared::{init_logging, parse_timezone, wall_clock, LoggingConfig};

use crate::drawing::{colors, NannouCanvas};

const CLOCK_NAME: &str = "miui_alarm";

fn main() {
    nannou::app(model).update(update).run();
}

/// Persisted configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct Config {
    /// `#RRGGBB` or `#AARRGGBB`
    strong_color: String,
    /// Padding around the face, in window points
    padding: f32,
    /// IANA zone; the system zone when absent
    time_zone: Option<String>,
    /// `env_logger` filter; `RUST_LOG` when absent
    log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strong_color: "#FFFFFFFF".to_string(),
            padding: 0.0,
            time_zone: None,
            log_filter: None,
        }
    }
}

/// Application state
struct Model {
    /// Immutable face renderer
    renderer: ClockRenderer,
    /// Last pointer position, cleared on release
    pointer: PointerLatch,
    /// Fixed zone, if configured
    zone: Option<Tz>,
    /// Wall-clock time sampled for the current frame
    now: NaiveTime,
}

fn model(app: &App) -> Model {
    let loaded = shared::load_config::<Config>(CLOCK_NAME);
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => Config::default(),
    };

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });

    match loaded {
        Ok(Some(_)) => {}
        Ok(None) => {
            if let Err(e) = shared::save_config(CLOCK_NAME, &config) {
                log::warn!("Failed to save default config: {}", e);
            }
        }
        Err(e) => log::warn!("Failed to load config, using defaults: {}", e),
    }

    let style = build_style(&config);
    let zone = config
        .time_zone
        .as_deref()
        .and_then(|name| match parse_timezone(name) {
            Ok(tz) => Some(tz),
            Err(e) => {
                log::warn!("{}; using the system time zone", e);
                None
            }
        });

    log::info!(
        "starting clock face: color {}, padding {}, zone {}",
        config.strong_color,
        style.padding(),
        zone.map(|tz| tz.name()).unwrap_or("system")
    );

    app.set_loop_mode(LoopMode::RefreshSync);
    app.new_window()
        .title("MIUI Alarm")
        .size(600, 600)
        .view(view)
        .mouse_pressed(mouse_pressed)
        .mouse_moved(mouse_moved)
        .mouse_released(mouse_released)
        .touch(touch)
        .build()
        .expect("failed to create window");

    Model {
        renderer: ClockRenderer::new(style),
        pointer: PointerLatch::new(),
        zone,
        now: wall_clock(zone),
    }
}

fn build_style(config: &Config) -> Style {
    let default = Style::default();
    let strong = parse_color(&config.strong_color).unwrap_or_else(|e| {
        log::warn!("{}; using the default color", e);
        default.strong()
    });
    Style::new(strong, config.padding)
}

fn update(_app: &App, model: &mut Model, _update: Update) {
    model.now = wall_clock(model.zone);
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let window_rect = app.window_rect();

    draw.background().color(colors::BACKGROUND);

    let mut canvas = NannouCanvas::new(&draw, window_rect);
    model.renderer.render(
        &mut canvas,
        &model.now,
        model.pointer.snapshot(),
        window_rect.wh(),
    );

    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("Failed to render frame: {:?}", e);
    }
}

/// Window coordinates (center origin, y up) to view-local pixels (top-left, y down)
fn view_local(app: &App, position: Point2) -> Vec2 {
    let rect = app.window_rect();
    vec2(position.x - rect.left(), rect.top() - position.y)
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        let position = view_local(app, app.mouse.position());
        log::debug!("pointer down at {:?}", position);
        model.pointer.press(position);
    }
}

fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    model.pointer.move_to(view_local(app, pos));
}

fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        log::debug!("pointer up");
        model.pointer.release();
    }
}

fn touch(app: &App, model: &mut Model, touch: TouchEvent) {
    let position = view_local(app, touch.position);
    match touch.phase {
        TouchPhase::Started => model.pointer.touch_start(touch.id, position),
        TouchPhase::Moved => model.pointer.touch_move(touch.id, position),
        TouchPhase::Ended | TouchPhase::Cancelled => model.pointer.touch_end(touch.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: Config = toml::from_str("padding = 24.0").unwrap();
        assert_eq!(config.padding, 24.0);
        assert_eq!(config.strong_color, "#FFFFFFFF");
        assert!(config.time_zone.is_none());
    }

    #[test]
    fn test_bad_color_falls_back_to_white() {
        let config = Config {
            strong_color: "teal".to_string(),
            ..Config::default()
        };
        let style = build_style(&config);
        assert_eq!(style.strong(), Style::default().strong());
    }

    #[test]
    fn test_style_from_config() {
        let config = Config {
            strong_color: "#FF8800".to_string(),
            padding: 16.0,
            ..Config::default()
        };
        let style = build_style(&config);
        assert_eq!(style.strong().red, 0xFF);
        assert_eq!(style.strong().green, 0x88);
        assert_eq!(style.light().alpha, 0x8F);
        assert_eq!(style.padding(), 16.0);
    }
}
