//! # Path Data
//!
//! The path-geometry primitive: SVG path data in, absolute commands out.
//!
//! Parsing absolutizes every command. [`unshort`] then expands the smooth
//! curve forms and [`unarc`] replaces elliptical arcs with cubic pieces, so
//! that the decomposer only ever sees move, line, horizontal, vertical,
//! quadratic, cubic and close.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::{self, Write};

use crate::error::{OutlineError, OutlineResult};
use crate::model::Point;

/// One absolute path command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    HorizontalTo(f64),
    VerticalTo(f64),
    QuadTo {
        ctrl: Point,
        to: Point,
    },
    SmoothQuadTo(Point),
    CubicTo {
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    SmoothCubicTo {
        ctrl2: Point,
        to: Point,
    },
    ArcTo {
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

impl PathCommand {
    /// The absolute SVG command letter.
    pub fn letter(&self) -> char {
        match self {
            PathCommand::MoveTo(_) => 'M',
            PathCommand::LineTo(_) => 'L',
            PathCommand::HorizontalTo(_) => 'H',
            PathCommand::VerticalTo(_) => 'V',
            PathCommand::QuadTo { .. } => 'Q',
            PathCommand::SmoothQuadTo(_) => 'T',
            PathCommand::CubicTo { .. } => 'C',
            PathCommand::SmoothCubicTo { .. } => 'S',
            PathCommand::ArcTo { .. } => 'A',
            PathCommand::Close => 'Z',
        }
    }

    /// The current point after this command runs.
    fn end_point(&self, current: Point, subpath_start: Point) -> Point {
        match *self {
            PathCommand::MoveTo(to)
            | PathCommand::LineTo(to)
            | PathCommand::SmoothQuadTo(to)
            | PathCommand::QuadTo { to, .. }
            | PathCommand::CubicTo { to, .. }
            | PathCommand::SmoothCubicTo { to, .. }
            | PathCommand::ArcTo { to, .. } => to,
            PathCommand::HorizontalTo(x) => Point::new(x, current.y),
            PathCommand::VerticalTo(y) => Point::new(current.x, y),
            PathCommand::Close => subpath_start,
        }
    }

    fn write_to(&self, out: &mut impl Write) -> fmt::Result {
        match *self {
            PathCommand::MoveTo(p) => write!(out, "M{}", p),
            PathCommand::LineTo(p) => write!(out, "L{}", p),
            PathCommand::HorizontalTo(x) => write!(out, "H{}", x),
            PathCommand::VerticalTo(y) => write!(out, "V{}", y),
            PathCommand::QuadTo { ctrl, to } => write!(out, "Q{} {}", ctrl, to),
            PathCommand::SmoothQuadTo(to) => write!(out, "T{}", to),
            PathCommand::CubicTo { ctrl1, ctrl2, to } => {
                write!(out, "C{} {} {}", ctrl1, ctrl2, to)
            }
            PathCommand::SmoothCubicTo { ctrl2, to } => write!(out, "S{} {}", ctrl2, to),
            PathCommand::ArcTo {
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                to,
            } => write!(
                out,
                "A{} {} {} {} {} {}",
                rx, ry, x_axis_rotation, large_arc as u8, sweep as u8, to
            ),
            PathCommand::Close => out.write_char('Z'),
        }
    }
}

/// Serializes commands back into compact absolute path data.
pub fn to_path_data(commands: &[PathCommand]) -> String {
    let mut out = String::new();
    for command in commands {
        // Writing into a String cannot fail.
        let _ = command.write_to(&mut out);
    }
    out
}

/// The seam through which the engine obtains absolute, shorthand-free,
/// arc-free commands for a path-data string.
pub trait PathGeometry: Send + Sync + fmt::Debug {
    fn absolutize(&self, d: &str) -> OutlineResult<Vec<PathCommand>>;
}

/// Default primitive: parse, then `unshort`, then (optionally) `unarc`.
#[derive(Debug, Clone, Copy)]
pub struct SvgPathGeometry {
    expand_arcs: bool,
}

impl SvgPathGeometry {
    pub fn new() -> Self {
        Self { expand_arcs: true }
    }

    /// A primitive that leaves arcs in place. Paths containing arcs then fail
    /// decomposition and pass through untouched.
    pub fn without_arcs() -> Self {
        Self { expand_arcs: false }
    }
}

impl Default for SvgPathGeometry {
    fn default() -> Self {
        Self::new()
    }
}

impl PathGeometry for SvgPathGeometry {
    fn absolutize(&self, d: &str) -> OutlineResult<Vec<PathCommand>> {
        let commands = unshort(&parse_path_data(d)?);
        if self.expand_arcs {
            Ok(unarc(&commands))
        } else {
            Ok(commands)
        }
    }
}

/// Tokenize SVG path data into commands and numeric strings.
///
/// This handles commas/whitespace and also starts a new number at a `+`/`-`
/// (e.g. `10-5` -> `10`, `-5`) or at a second decimal point (`.5.5` -> `.5`,
/// `.5`), while preserving scientific notation.
fn tokenize(path_data: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current_token = String::new();

    for ch in path_data.chars() {
        match ch {
            'M' | 'm' | 'L' | 'l' | 'H' | 'h' | 'V' | 'v' | 'C' | 'c' | 'S' | 's' | 'Q' | 'q'
            | 'T' | 't' | 'A' | 'a' | 'Z' | 'z' => {
                if !current_token.is_empty() {
                    tokens.push(std::mem::take(&mut current_token));
                }
                tokens.push(ch.to_string());
            }
            ' ' | ',' | '\n' | '\r' | '\t' => {
                if !current_token.is_empty() {
                    tokens.push(std::mem::take(&mut current_token));
                }
            }
            '-' | '+' => {
                if current_token.is_empty() {
                    current_token.push(ch);
                    continue;
                }

                // If the previous char indicates scientific notation, keep the sign.
                if matches!(current_token.chars().last(), Some('e' | 'E')) {
                    current_token.push(ch);
                } else {
                    tokens.push(std::mem::take(&mut current_token));
                    current_token.push(ch);
                }
            }
            '.' => {
                // A number has one decimal point, and none in its exponent.
                if current_token.contains(['.', 'e', 'E']) {
                    tokens.push(std::mem::take(&mut current_token));
                }
                current_token.push(ch);
            }
            _ => current_token.push(ch),
        }
    }

    if !current_token.is_empty() {
        tokens.push(current_token);
    }

    tokens
}

fn is_command_token(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_alphabetic())
}

/// Cursor over the argument tokens following one command letter.
///
/// `offset` skips arc flags already taken from the front of a packed token
/// such as `110`.
struct Args<'t> {
    tokens: &'t [String],
    pos: usize,
    offset: usize,
}

impl<'t> Args<'t> {
    fn new(tokens: &'t [String], pos: usize) -> Self {
        Self {
            tokens,
            pos,
            offset: 0,
        }
    }

    /// The unread part of the current argument token.
    fn current(&self) -> Option<&'t str> {
        self.tokens
            .get(self.pos)
            .filter(|t| !is_command_token(t))
            .map(|t| &t[self.offset..])
    }

    fn advance(&mut self) {
        self.pos += 1;
        self.offset = 0;
    }

    fn has_more(&self) -> bool {
        self.current().is_some()
    }

    fn number(&mut self, command: char) -> OutlineResult<f64> {
        let token = self
            .current()
            .ok_or_else(|| OutlineError::invalid(format!("missing argument for '{command}'")))?;
        let value: f64 = token
            .parse()
            .map_err(|_| OutlineError::invalid(format!("bad number '{token}'")))?;
        if !value.is_finite() {
            return Err(OutlineError::invalid(format!("non-finite number '{token}'")));
        }
        self.advance();
        Ok(value)
    }

    /// An arc flag is a single `0` or `1`, which may run into what follows.
    fn flag(&mut self, command: char) -> OutlineResult<bool> {
        let token = self
            .current()
            .ok_or_else(|| OutlineError::invalid(format!("missing argument for '{command}'")))?;
        let value = match token.as_bytes().first() {
            Some(b'0') => false,
            Some(b'1') => true,
            _ => return Err(OutlineError::invalid(format!("bad arc flag '{token}'"))),
        };
        if token.len() > 1 {
            self.offset += 1;
        } else {
            self.advance();
        }
        Ok(value)
    }
}

/// Parses path data into absolute commands.
///
/// Smooth curves and arcs are kept as such; see [`unshort`] and [`unarc`].
pub fn parse_path_data(d: &str) -> OutlineResult<Vec<PathCommand>> {
    let tokens = tokenize(d);
    let mut commands = Vec::new();
    let mut current = Point::default();
    let mut start = Point::default();
    let mut i = 0usize;

    while i < tokens.len() {
        let token = &tokens[i];
        if !is_command_token(token) {
            return Err(OutlineError::invalid(format!(
                "number '{token}' without a command"
            )));
        }

        // `is_command_token` guarantees exactly one character.
        let cmd = token.chars().next().unwrap_or('Z');
        let is_relative = cmd.is_ascii_lowercase();
        let cmd_upper = cmd.to_ascii_uppercase();
        let mut args = Args::new(&tokens, i + 1);

        let abs = |p: Point, current: Point| {
            if is_relative {
                Point::new(current.x + p.x, current.y + p.y)
            } else {
                p
            }
        };

        if cmd_upper == 'Z' {
            commands.push(PathCommand::Close);
            current = start;
            i = args.pos;
            continue;
        }

        if !args.has_more() {
            return Err(OutlineError::invalid(format!("missing argument for '{cmd}'")));
        }

        let mut first = true;
        while args.has_more() {
            let command = match cmd_upper {
                'M' => {
                    let to = abs(Point::new(args.number(cmd)?, args.number(cmd)?), current);
                    if first {
                        start = to;
                        PathCommand::MoveTo(to)
                    } else {
                        // Extra coordinate pairs after a move are implicit line-tos.
                        PathCommand::LineTo(to)
                    }
                }
                'L' => PathCommand::LineTo(abs(
                    Point::new(args.number(cmd)?, args.number(cmd)?),
                    current,
                )),
                'H' => {
                    let x = args.number(cmd)?;
                    PathCommand::HorizontalTo(if is_relative { current.x + x } else { x })
                }
                'V' => {
                    let y = args.number(cmd)?;
                    PathCommand::VerticalTo(if is_relative { current.y + y } else { y })
                }
                'C' => {
                    let ctrl1 = abs(Point::new(args.number(cmd)?, args.number(cmd)?), current);
                    let ctrl2 = abs(Point::new(args.number(cmd)?, args.number(cmd)?), current);
                    let to = abs(Point::new(args.number(cmd)?, args.number(cmd)?), current);
                    PathCommand::CubicTo { ctrl1, ctrl2, to }
                }
                'S' => {
                    let ctrl2 = abs(Point::new(args.number(cmd)?, args.number(cmd)?), current);
                    let to = abs(Point::new(args.number(cmd)?, args.number(cmd)?), current);
                    PathCommand::SmoothCubicTo { ctrl2, to }
                }
                'Q' => {
                    let ctrl = abs(Point::new(args.number(cmd)?, args.number(cmd)?), current);
                    let to = abs(Point::new(args.number(cmd)?, args.number(cmd)?), current);
                    PathCommand::QuadTo { ctrl, to }
                }
                'T' => PathCommand::SmoothQuadTo(abs(
                    Point::new(args.number(cmd)?, args.number(cmd)?),
                    current,
                )),
                'A' => {
                    let rx = args.number(cmd)?;
                    let ry = args.number(cmd)?;
                    let x_axis_rotation = args.number(cmd)?;
                    let large_arc = args.flag(cmd)?;
                    let sweep = args.flag(cmd)?;
                    let to = abs(Point::new(args.number(cmd)?, args.number(cmd)?), current);
                    PathCommand::ArcTo {
                        rx,
                        ry,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                        to,
                    }
                }
                other => {
                    return Err(OutlineError::UnsupportedCommand { command: other });
                }
            };
            current = command.end_point(current, start);
            commands.push(command);
            first = false;
        }
        i = args.pos;
    }

    Ok(commands)
}

/// Rewrites `S` and `T` into full cubic and quadratic commands.
///
/// The implied control point is the reflection of the previous command's
/// control point when that command belongs to the same curve family, and the
/// current point otherwise.
pub fn unshort(commands: &[PathCommand]) -> Vec<PathCommand> {
    let mut out = Vec::with_capacity(commands.len());
    let mut current = Point::default();
    let mut start = Point::default();
    let mut prev_cubic_ctrl: Option<Point> = None;
    let mut prev_quad_ctrl: Option<Point> = None;

    for command in commands {
        let rewritten = match *command {
            PathCommand::SmoothCubicTo { ctrl2, to } => {
                let ctrl1 = prev_cubic_ctrl
                    .map(|prev| prev.reflect_about(current))
                    .unwrap_or(current);
                PathCommand::CubicTo { ctrl1, ctrl2, to }
            }
            PathCommand::SmoothQuadTo(to) => {
                let ctrl = prev_quad_ctrl
                    .map(|prev| prev.reflect_about(current))
                    .unwrap_or(current);
                PathCommand::QuadTo { ctrl, to }
            }
            other => other,
        };

        (prev_cubic_ctrl, prev_quad_ctrl) = match rewritten {
            PathCommand::CubicTo { ctrl2, .. } => (Some(ctrl2), None),
            PathCommand::QuadTo { ctrl, .. } => (None, Some(ctrl)),
            _ => (None, None),
        };

        if let PathCommand::MoveTo(to) = rewritten {
            start = to;
        }
        current = rewritten.end_point(current, start);
        out.push(rewritten);
    }

    out
}

/// Replaces every arc with cubic Bézier pieces of at most 90 degrees each.
pub fn unarc(commands: &[PathCommand]) -> Vec<PathCommand> {
    let mut out = Vec::with_capacity(commands.len());
    let mut current = Point::default();
    let mut start = Point::default();

    for command in commands {
        if let PathCommand::ArcTo {
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            to,
        } = *command
        {
            if to != current {
                match arc_to_cubics(current, rx, ry, x_axis_rotation, large_arc, sweep, to) {
                    Some(cubics) => out.extend(
                        cubics
                            .into_iter()
                            .map(|(ctrl1, ctrl2, to)| PathCommand::CubicTo { ctrl1, ctrl2, to }),
                    ),
                    None => out.push(PathCommand::LineTo(to)),
                }
            }
            current = to;
            continue;
        }

        if let PathCommand::MoveTo(to) = *command {
            start = to;
        }
        current = command.end_point(current, start);
        out.push(*command);
    }

    out
}

fn angle_between(u: (f64, f64), v: (f64, f64)) -> f64 {
    let dot = u.0 * v.0 + u.1 * v.1;
    let det = u.0 * v.1 - u.1 * v.0;
    det.atan2(dot)
}

/// Endpoint-to-center arc conversion (SVG implementation notes, F.6.5),
/// split into cubic pieces. `None` means the arc collapses to a line.
fn arc_to_cubics(
    from: Point,
    mut rx: f64,
    mut ry: f64,
    phi_deg: f64,
    large_arc: bool,
    sweep: bool,
    to: Point,
) -> Option<Vec<(Point, Point, Point)>> {
    if rx.abs() < f64::EPSILON || ry.abs() < f64::EPSILON {
        return None;
    }

    rx = rx.abs();
    ry = ry.abs();

    let phi = phi_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: Compute (x1', y1')
    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    // Step 2: Ensure radii are large enough
    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    // Step 3: Compute (cx', cy')
    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let x1p2 = x1p * x1p;
    let y1p2 = y1p * y1p;
    let denom = rx2 * y1p2 + ry2 * x1p2;
    if denom.abs() < f64::EPSILON {
        return None;
    }

    // Numeric precision; clamp.
    let numer = (rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2).max(0.0);

    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = sign * (numer / denom).sqrt();
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    // Step 4: Compute (cx, cy)
    let cx = cos_phi * cxp - sin_phi * cyp + (from.x + to.x) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (from.y + to.y) / 2.0;

    // Step 5: Angles
    let u = ((x1p - cxp) / rx, (y1p - cyp) / ry);
    let v = ((-x1p - cxp) / rx, (-y1p - cyp) / ry);

    let mut theta = angle_between((1.0, 0.0), u);
    let mut delta = angle_between(u, v);

    if !sweep && delta > 0.0 {
        delta -= TAU;
    } else if sweep && delta < 0.0 {
        delta += TAU;
    }

    // Step 6: Split into <= 90deg segments
    let segment_count = ((delta.abs() / FRAC_PI_2).ceil() as usize).max(1);
    let delta_seg = delta / segment_count as f64;

    let on_ellipse = |ux: f64, uy: f64| {
        Point::new(
            cx + cos_phi * (rx * ux) - sin_phi * (ry * uy),
            cy + sin_phi * (rx * ux) + cos_phi * (ry * uy),
        )
    };

    let mut cubics = Vec::with_capacity(segment_count);
    for index in 0..segment_count {
        let t0 = theta;
        let t1 = theta + delta_seg;
        let k = 4.0 / 3.0 * ((t1 - t0) / 4.0).tan();

        let (s0, c0) = t0.sin_cos();
        let (s1, c1) = t1.sin_cos();

        let ctrl1 = on_ellipse(c0 - k * s0, s0 + k * c0);
        let ctrl2 = on_ellipse(c1 + k * s1, s1 - k * c1);
        // Land exactly on the requested endpoint.
        let end = if index + 1 == segment_count {
            to
        } else {
            on_ellipse(c1, s1)
        };

        cubics.push((ctrl1, ctrl2, end));
        theta = t1;
    }

    Some(cubics)
}
