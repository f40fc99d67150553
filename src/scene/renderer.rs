//! # Draw policy
//!
//! Turns a [`Scene`] snapshot into a [`Frame`]: an ordered list of backend-agnostic
//! [`DrawCommand`]s. The renderer decides **what** is drawn, where, how large, in which
//! colour and with which opacity; actually rasterizing the commands is left to the host.
//!
//! ## Per-object pipeline
//!
//! ```text
//! position ──> visual radius ──> cull (viewport + 1.5·r) ──> settings gate
//!          ──> glow? ──> body ──> label? (centre region, zoom fade, alpha floor)
//! ```
//!
//! Objects are processed in list order, so later objects paint over earlier ones.
//! Constellations draw one [`DrawCommand::Line`] per segment whose two member stars are
//! both on screen.
use nalgebra::Point2;

use crate::celestial::color::{body_color, star_color, Color};
use crate::celestial::{CelestialObject, ObjectKind};
use crate::config::ViewConfig;
use crate::constants::{ObjectId, Pixel};
use crate::projection::{ScreenPosition, Viewport};
use crate::scene::{Scene, ScreenPositions};
use crate::settings::Settings;
use crate::viewport::{label_alpha_factor, visual_scale, ViewportTransform};

/// Stops of the vertical background gradient, top to bottom
pub const BACKGROUND_GRADIENT: [Color; 3] = [
    Color::from_rgb_u32(0x0A0A1F),
    Color::from_rgb_u32(0x16213E),
    Color::from_rgb_u32(0x0A0A1F),
];

/// One primitive of a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Full-viewport vertical gradient.
    Background {
        width: Pixel,
        height: Pixel,
        stops: [Color; 3],
    },
    /// Blurred halo behind a body.
    Glow {
        id: ObjectId,
        center: Point2<f64>,
        radius: Pixel,
        blur: Pixel,
        color: Color,
    },
    /// Filled disc of a star or solar system body.
    Body {
        id: ObjectId,
        center: Point2<f64>,
        radius: Pixel,
        color: Color,
    },
    /// Object name anchored at `anchor` (baseline left).
    Label {
        id: ObjectId,
        text: String,
        anchor: Point2<f64>,
        color: Color,
    },
    /// Constellation segment.
    Line {
        id: ObjectId,
        from: Point2<f64>,
        to: Point2<f64>,
        color: Color,
    },
}

/// Result of a render pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    /// Objects that produced a body or line
    pub drawn: usize,
    /// Objects off screen or outside the culling margin
    pub culled: usize,
    /// Objects on screen but hidden by the settings
    pub hidden: usize,
}

impl Frame {
    /// Identifiers of the drawn bodies, in paint order.
    pub fn body_ids(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Body { id, .. } => Some(id.as_str()),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { id, text, .. } => Some((id.as_str(), text.as_str())),
            _ => None,
        })
    }

    pub fn glow_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Glow { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

/// Unscaled radius of an object.
pub fn base_radius(object: &CelestialObject, config: &ViewConfig) -> Pixel {
    match object.kind() {
        ObjectKind::Star { .. } => {
            (config.star_radius_base_scale - object.magnitude()).max(config.star_radius_min)
        }
        ObjectKind::Planet { .. } => config.planet_radius_base,
        ObjectKind::Sun => config.sun_radius_base,
        ObjectKind::Moon => config.moon_radius_base,
        ObjectKind::Constellation { .. } => 0.0,
    }
}

/// Radius of an object as drawn at the given zoom.
pub fn visual_radius(object: &CelestialObject, zoom: f64, config: &ViewConfig) -> Pixel {
    base_radius(object, config) * visual_scale(zoom, config)
}

/// Whether the settings allow drawing this object.
pub fn is_enabled(object: &CelestialObject, settings: &Settings, config: &ViewConfig) -> bool {
    match object.kind() {
        ObjectKind::Star { .. } => {
            settings.show_stars
                && (settings.show_faint_stars || object.magnitude() <= config.faint_star_magnitude)
        }
        ObjectKind::Planet { .. } | ObjectKind::Sun | ObjectKind::Moon => settings.show_planets,
        ObjectKind::Constellation { .. } => settings.show_constellation_lines,
    }
}

/// `255 · brightness`, truncated.
fn base_alpha(settings: &Settings) -> u8 {
    (255.0 * settings.brightness).clamp(0.0, 255.0) as u8
}

/// Centred region, `label_center_region_factor` of the viewport on each axis.
fn in_label_region(point: &Point2<f64>, viewport: &Viewport, config: &ViewConfig) -> bool {
    let center = viewport.center();
    let half_w = viewport.width * config.label_center_region_factor / 2.0;
    let half_h = viewport.height * config.label_center_region_factor / 2.0;
    (point.x - center.x).abs() <= half_w && (point.y - center.y).abs() <= half_h
}

/// Build the draw commands of a frame.
///
/// Arguments
/// -----------------
/// * `scene`: objects and the current position snapshot.
/// * `transform`: current zoom/pan (the zoom drives radii and label fade).
/// * `settings`: user display preferences.
/// * `config`: view constants.
///
/// Return
/// ----------
/// * The [`Frame`], starting with a [`DrawCommand::Background`].
pub fn render(
    scene: &Scene,
    transform: &ViewportTransform,
    settings: &Settings,
    config: &ViewConfig,
) -> Frame {
    let viewport = scene.viewport();
    let positions = scene.positions();
    let zoom = transform.zoom();

    let mut frame = Frame::default();
    frame.commands.push(DrawCommand::Background {
        width: viewport.width,
        height: viewport.height,
        stops: BACKGROUND_GRADIENT,
    });

    let alpha = base_alpha(settings);
    let label_alpha = label_alpha_factor(zoom, config)
        .filter(|_| settings.show_labels)
        .map(|factor| (255.0 * factor * settings.brightness).clamp(0.0, 255.0) as u8)
        .filter(|a| *a > config.label_alpha_floor);

    for object in scene.objects() {
        if let ObjectKind::Constellation { lines, .. } = object.kind() {
            let drawn = draw_constellation(&mut frame, object, lines, &positions, settings, alpha);
            let center = positions.get(object.id()).and_then(|p| p.point());
            if let (true, Some(center), Some(label_alpha)) = (drawn, center, label_alpha) {
                push_label(&mut frame, object, center, &viewport, config, label_alpha);
            }
            continue;
        }

        let Some(center) = positions.get(object.id()).and_then(|p| p.point()) else {
            frame.culled += 1;
            continue;
        };

        let radius = visual_radius(object, zoom, config);
        if !viewport.contains_with_margin(&center, radius * config.cull_margin_factor) {
            frame.culled += 1;
            continue;
        }
        if !is_enabled(object, settings, config) {
            frame.hidden += 1;
            continue;
        }

        draw_body(&mut frame, object, center, radius, settings, config, alpha);
        frame.drawn += 1;

        if let Some(label_alpha) = label_alpha {
            push_label(&mut frame, object, center, &viewport, config, label_alpha);
        }
    }

    frame
}

fn push_label(
    frame: &mut Frame,
    object: &CelestialObject,
    center: Point2<f64>,
    viewport: &Viewport,
    config: &ViewConfig,
    alpha: u8,
) {
    if !in_label_region(&center, viewport, config) {
        return;
    }
    let (dx, dy) = config.label_offset;
    frame.commands.push(DrawCommand::Label {
        id: object.id().to_string(),
        text: object.name().to_string(),
        anchor: Point2::new(center.x + dx, center.y + dy),
        color: Color::WHITE.with_alpha(alpha),
    });
}

fn draw_body(
    frame: &mut Frame,
    object: &CelestialObject,
    center: Point2<f64>,
    radius: Pixel,
    settings: &Settings,
    config: &ViewConfig,
    alpha: u8,
) {
    let id = object.id().to_string();
    let (color, glow) = if object.is_solar_system_body() {
        let color = body_color(object.name(), object.tag());
        let glow = settings.show_glow_effects.then(|| {
            (
                radius * 1.2 + config.planet_glow_blur_radius / 2.0,
                config.planet_glow_blur_radius,
                alpha / 2,
            )
        });
        (color, glow)
    } else {
        let color = star_color(object.tag());
        let glow = (settings.show_glow_effects
            && object.magnitude() < config.bright_star_glow_magnitude)
            .then(|| {
                (
                    radius * 1.5 + config.star_glow_blur_radius / 2.0,
                    config.star_glow_blur_radius,
                    alpha / 3,
                )
            });
        (color, glow)
    };

    if let Some((glow_radius, blur, glow_alpha)) = glow {
        frame.commands.push(DrawCommand::Glow {
            id: id.clone(),
            center,
            radius: glow_radius,
            blur,
            color: color.with_alpha(glow_alpha),
        });
    }
    frame.commands.push(DrawCommand::Body {
        id,
        center,
        radius,
        color: color.with_alpha(alpha),
    });
}

fn draw_constellation(
    frame: &mut Frame,
    object: &CelestialObject,
    lines: &[(usize, usize)],
    positions: &ScreenPositions,
    settings: &Settings,
    alpha: u8,
) -> bool {
    if !settings.show_constellation_lines {
        frame.hidden += 1;
        return false;
    }
    let Some(vertices) = positions.vertices(object.id()) else {
        frame.culled += 1;
        return false;
    };

    let vertex = |i: usize| vertices.get(i).and_then(ScreenPosition::point);
    let color = Color::from_rgb_u32(0x6A7FDB).with_alpha(alpha / 2);
    let before = frame.commands.len();
    for &(a, b) in lines {
        if let (Some(from), Some(to)) = (vertex(a), vertex(b)) {
            frame.commands.push(DrawCommand::Line {
                id: object.id().to_string(),
                from,
                to,
                color,
            });
        }
    }

    let drawn = frame.commands.len() > before;
    if drawn {
        frame.drawn += 1;
    } else {
        frame.culled += 1;
    }
    drawn
}
