//! Splits absolute path commands into subpaths of edges.

use crate::error::{OutlineError, OutlineResult};
use crate::model::{Edge, Point, Subpath};
use crate::path_data::PathCommand;

/// Walks absolute commands and groups them into subpaths.
///
/// A move starts a new subpath. Close appends a line back to the subpath
/// start only when the current point is elsewhere. Drawing after a close
/// without an intervening move continues from the closed subpath's start in
/// a fresh subpath. Smooth curves and arcs must already be expanded.
pub fn decompose(commands: &[PathCommand]) -> OutlineResult<Vec<Subpath>> {
    let mut subpaths = Vec::new();
    let mut current: Option<Subpath> = None;
    let mut last_start = Point::default();

    for command in commands {
        match *command {
            PathCommand::MoveTo(to) => {
                subpaths.extend(current.take());
                current = Some(Subpath::new(to));
                last_start = to;
            }
            PathCommand::Close => {
                if let Some(mut subpath) = current.take() {
                    subpath.close();
                    last_start = subpath.start();
                    subpaths.push(subpath);
                }
            }
            PathCommand::SmoothQuadTo(_)
            | PathCommand::SmoothCubicTo { .. }
            | PathCommand::ArcTo { .. } => {
                return Err(OutlineError::UnsupportedCommand {
                    command: command.letter(),
                });
            }
            drawing => {
                let subpath = current.get_or_insert_with(|| Subpath::new(last_start));
                let from = subpath.current_point();
                let edge = match drawing {
                    PathCommand::LineTo(to) => Edge::Line { from, to },
                    PathCommand::HorizontalTo(x) => Edge::Line {
                        from,
                        to: Point::new(x, from.y),
                    },
                    PathCommand::VerticalTo(y) => Edge::Line {
                        from,
                        to: Point::new(from.x, y),
                    },
                    PathCommand::QuadTo { ctrl, to } => Edge::Quad { from, ctrl, to },
                    PathCommand::CubicTo { ctrl1, ctrl2, to } => Edge::Cubic {
                        from,
                        ctrl1,
                        ctrl2,
                        to,
                    },
                    other => {
                        return Err(OutlineError::UnsupportedCommand {
                            command: other.letter(),
                        });
                    }
                };
                subpath.push(edge);
            }
        }
    }

    subpaths.extend(current);
    Ok(subpaths)
}
