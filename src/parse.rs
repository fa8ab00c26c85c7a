//! Path-data grammar, built from the combinator engine
//!
//! Every command is a letter (uppercase absolute, lowercase relative)
//! followed by one or more argument groups. Each group after the first
//! repeats the command, except after a move, where extra pairs are implicit
//! line-to segments in the same mode.

use glam::{DVec2, dvec2};

use crate::ast::*;
use crate::combinator::{
    BoxedParser, Failure, ParseResult, Parser, boxed, consume_trivia, flag, literal, map, number,
    one_of, one_or_more, optional, pair, parse_all, skip_separator, skip_whitespace, unexpected,
};
use crate::errors::ParseError;
use crate::log::debug;
use crate::types::{Dimension, Unit};

/// Parse a complete path-data string.
pub fn path_data(source: &str) -> Result<Vec<PathSegment>, ParseError> {
    let segments =
        parse_all(path(), source).map_err(|failure| ParseError::from_failure("pathData", source, failure))?;
    debug!(segments = segments.len(), "parsed path data");
    Ok(segments)
}

/// Any number of commands in document order, stopping before trailing
/// whitespace.
///
/// Fails as soon as something that is not whitespace fails to parse as a
/// command.
pub fn path() -> impl Parser<Vec<PathSegment>> {
    let command = command();
    move |input: &str, position: usize| -> ParseResult<Vec<PathSegment>> {
        let mut segments = Vec::new();
        let mut next = position;
        loop {
            match command.parse(input, next) {
                Ok((parsed, after)) => {
                    segments.extend(parsed);
                    next = after;
                }
                Err(_) if skip_whitespace(input, next) >= input.len() => {
                    return Ok((segments, next));
                }
                Err(failure) => {
                    let start = skip_separator(input, next);
                    if failure.position <= start {
                        return Err(Failure::new(
                            format!("{}, expected a path command", unexpected(input, start)),
                            start,
                        ));
                    }
                    return Err(failure);
                }
            }
        }
    }
}

/// One command with all its repeated argument groups.
pub fn command() -> impl Parser<Vec<PathSegment>> {
    let commands: Vec<BoxedParser<Vec<PathSegment>>> = vec![
        boxed(move_to()),
        boxed(line_to()),
        boxed(horizontal_line_to()),
        boxed(vertical_line_to()),
        boxed(cubic_to()),
        boxed(smooth_cubic_to()),
        boxed(quadratic_to()),
        boxed(smooth_quadratic_to()),
        boxed(arc_to()),
        boxed(close_path()),
    ];
    one_of(commands)
}

// ============================================================================
// Arguments
// ============================================================================

fn command_letter(absolute: &'static str, relative: &'static str) -> impl Parser<Mode> {
    consume_trivia(one_of(vec![
        boxed(map(literal(absolute), |_| Mode::Absolute)),
        boxed(map(literal(relative), |_| Mode::Relative)),
    ]))
}

fn argument() -> impl Parser<f64> {
    consume_trivia(number())
}

fn coordinate() -> impl Parser<DVec2> {
    map(pair(argument(), argument()), |(x, y): (f64, f64)| dvec2(x, y))
}

/// `letter group group ...`, one segment per group.
fn repeated<A>(
    absolute: &'static str,
    relative: &'static str,
    group: impl Parser<A>,
    build: impl Fn(Mode, A) -> PathSegment,
) -> impl Parser<Vec<PathSegment>> {
    map(
        pair(command_letter(absolute, relative), one_or_more(group)),
        move |(mode, groups): (Mode, Vec<A>)| {
            groups
                .into_iter()
                .map(|args| build(mode, args))
                .collect::<Vec<PathSegment>>()
        },
    )
}

// ============================================================================
// Commands
// ============================================================================

/// `M x,y [x,y ...]`
pub fn move_to() -> impl Parser<Vec<PathSegment>> {
    map(
        pair(command_letter("M", "m"), one_or_more(coordinate())),
        |(mode, points): (Mode, Vec<DVec2>)| {
            points
                .into_iter()
                .enumerate()
                .map(|(i, to)| {
                    if i == 0 {
                        PathSegment::from(MoveTo { mode, to })
                    } else {
                        PathSegment::from(LineTo { mode, to })
                    }
                })
                .collect::<Vec<PathSegment>>()
        },
    )
}

/// `L x,y ...`
pub fn line_to() -> impl Parser<Vec<PathSegment>> {
    repeated("L", "l", coordinate(), |mode, to| {
        PathSegment::from(LineTo { mode, to })
    })
}

/// `H x ...`
pub fn horizontal_line_to() -> impl Parser<Vec<PathSegment>> {
    repeated("H", "h", argument(), |mode, x| {
        PathSegment::from(HorizontalLineTo { mode, x })
    })
}

/// `V y ...`
pub fn vertical_line_to() -> impl Parser<Vec<PathSegment>> {
    repeated("V", "v", argument(), |mode, y| {
        PathSegment::from(VerticalLineTo { mode, y })
    })
}

/// `C x1,y1 x2,y2 x,y ...`
pub fn cubic_to() -> impl Parser<Vec<PathSegment>> {
    let group = pair(coordinate(), pair(coordinate(), coordinate()));
    repeated("C", "c", group, |mode, (control1, (control2, to)): (DVec2, (DVec2, DVec2))| {
        PathSegment::from(CubicTo {
            mode,
            control1,
            control2,
            to,
        })
    })
}

/// `S x2,y2 x,y ...`
pub fn smooth_cubic_to() -> impl Parser<Vec<PathSegment>> {
    repeated("S", "s", pair(coordinate(), coordinate()), |mode, (control2, to): (DVec2, DVec2)| {
        PathSegment::from(SmoothCubicTo { mode, control2, to })
    })
}

/// `Q x1,y1 x,y ...`
pub fn quadratic_to() -> impl Parser<Vec<PathSegment>> {
    repeated("Q", "q", pair(coordinate(), coordinate()), |mode, (control, to): (DVec2, DVec2)| {
        PathSegment::from(QuadraticTo { mode, control, to })
    })
}

/// `T x,y ...`
pub fn smooth_quadratic_to() -> impl Parser<Vec<PathSegment>> {
    repeated("T", "t", coordinate(), |mode, to| {
        PathSegment::from(SmoothQuadraticTo { mode, to })
    })
}

/// `A rx,ry x-axis-rotation large-arc-flag sweep-flag x,y ...`
///
/// The two flags are single digits and need no separator after them, so
/// `a1,1 0 1050,0` is large-arc 1, sweep 0, endpoint (50, 0).
pub fn arc_to() -> impl Parser<Vec<PathSegment>> {
    let radius = argument();
    let angle = argument();
    let arc_flag = consume_trivia(flag());
    let endpoint = coordinate();
    let group = move |input: &str, position: usize| -> ParseResult<ArcTo> {
        let (rx, next) = radius.parse(input, position)?;
        let (ry, next) = radius.parse(input, next)?;
        let (x_axis_rotation, next) = angle.parse(input, next)?;
        let (large_arc, next) = arc_flag.parse(input, next)?;
        let (sweep, next) = arc_flag.parse(input, next)?;
        let (to, next) = endpoint.parse(input, next)?;
        let arc = ArcTo {
            mode: Mode::Absolute,
            radii: dvec2(rx, ry),
            x_axis_rotation,
            large_arc,
            sweep,
            to,
        };
        Ok((arc, next))
    };
    repeated("A", "a", group, |mode, arc: ArcTo| {
        PathSegment::from(ArcTo { mode, ..arc })
    })
}

/// `Z` or `z`; takes no arguments.
pub fn close_path() -> impl Parser<Vec<PathSegment>> {
    map(command_letter("Z", "z"), |_| vec![PathSegment::from(ClosePath)])
}

// ============================================================================
// Attribute values
// ============================================================================

fn unit() -> impl Parser<Unit> {
    let units = [
        ("dp", Unit::Dp),
        ("px", Unit::Px),
        ("sp", Unit::Sp),
        ("pt", Unit::Pt),
        ("in", Unit::In),
        ("mm", Unit::Mm),
    ];
    let suffix = one_of(
        units
            .into_iter()
            .map(|(text, unit)| boxed(map(literal(text), move |_| unit)))
            .collect(),
    );
    map(optional(suffix), |unit| unit.unwrap_or(Unit::Unitless))
}

/// A dimension attribute such as `64dp`, `24px` or `10`.
pub fn dimension(text: &str) -> Result<Dimension, Failure> {
    let (value, unit) = parse_all(pair(number(), unit()), text)?;
    Ok(Dimension::new(value, unit))
}

/// A plain numeric attribute, surrounding whitespace allowed.
pub fn scalar(text: &str) -> Result<f64, Failure> {
    parse_all(number(), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Vec<PathSegment> {
        path_data(source).unwrap_or_else(|e| panic!("failed to parse {source:?}: {e:?}"))
    }

    fn move_abs(x: f64, y: f64) -> PathSegment {
        PathSegment::from(MoveTo {
            mode: Mode::Absolute,
            to: dvec2(x, y),
        })
    }

    fn line(mode: Mode, x: f64, y: f64) -> PathSegment {
        PathSegment::from(LineTo {
            mode,
            to: dvec2(x, y),
        })
    }

    #[test]
    fn absolute_move() {
        let (segments, next) = move_to().parse("M300,70", 0).unwrap();
        assert_eq!(segments, vec![move_abs(300.0, 70.0)]);
        assert_eq!(next, 7);
    }

    #[test]
    fn close_path_skips_leading_trivia() {
        let input = "   z";
        let (segments, next) = close_path().parse(input, 0).unwrap();
        assert_eq!(segments, vec![PathSegment::from(ClosePath)]);
        assert_eq!(next, input.len());
    }

    #[test]
    fn repeated_groups_match_repeated_letters() {
        let implicit = parse("l 1,0 2,1 3,4");
        assert_eq!(implicit, parse("l1,0 l2,1 l3,4"));
        assert_eq!(
            implicit,
            vec![
                line(Mode::Relative, 1.0, 0.0),
                line(Mode::Relative, 2.0, 1.0),
                line(Mode::Relative, 3.0, 4.0),
            ]
        );
    }

    #[test]
    fn extra_move_pairs_are_lines() {
        assert_eq!(
            parse("m1,2 3,4 5,6"),
            vec![
                PathSegment::from(MoveTo {
                    mode: Mode::Relative,
                    to: dvec2(1.0, 2.0),
                }),
                line(Mode::Relative, 3.0, 4.0),
                line(Mode::Relative, 5.0, 6.0),
            ]
        );
    }

    #[test]
    fn relative_curve() {
        assert_eq!(
            parse("c2,2 3,2 8,2"),
            vec![PathSegment::from(CubicTo {
                mode: Mode::Relative,
                control1: dvec2(2.0, 2.0),
                control2: dvec2(3.0, 2.0),
                to: dvec2(8.0, 2.0),
            })]
        );
    }

    #[test]
    fn sample_document_path() {
        let segments = parse("M300,70 l 0,-70 70,70 0,0 -70,70z");
        assert_eq!(segments.len(), 6);
        assert_eq!(segments[0], move_abs(300.0, 70.0));
        assert_eq!(segments[4], line(Mode::Relative, -70.0, 70.0));
        assert_eq!(segments[5], PathSegment::from(ClosePath));
    }

    #[test]
    fn compact_numbers_need_no_separators() {
        let segments = parse("M10-20L30.5.5l-5e1,2E+1h10v-5H0V0z");
        assert_eq!(
            segments,
            vec![
                move_abs(10.0, -20.0),
                line(Mode::Absolute, 30.5, 0.5),
                line(Mode::Relative, -50.0, 20.0),
                PathSegment::from(HorizontalLineTo {
                    mode: Mode::Relative,
                    x: 10.0,
                }),
                PathSegment::from(VerticalLineTo {
                    mode: Mode::Relative,
                    y: -5.0,
                }),
                PathSegment::from(HorizontalLineTo {
                    mode: Mode::Absolute,
                    x: 0.0,
                }),
                PathSegment::from(VerticalLineTo {
                    mode: Mode::Absolute,
                    y: 0.0,
                }),
                PathSegment::from(ClosePath),
            ]
        );
    }

    #[test]
    fn arc_flags_without_separators() {
        assert_eq!(
            parse("a1,1 0 1050,0"),
            vec![PathSegment::from(ArcTo {
                mode: Mode::Relative,
                radii: dvec2(1.0, 1.0),
                x_axis_rotation: 0.0,
                large_arc: true,
                sweep: false,
                to: dvec2(50.0, 0.0),
            })]
        );
    }

    #[test]
    fn smooth_and_quadratic_commands() {
        let segments = parse("M0 0 Q3 3 6 0 T12 0 C1 1 2 2 3 3 S5 5 6 6");
        assert_eq!(segments.len(), 5);
        assert!(matches!(segments[1], PathSegment::QuadraticTo(_)));
        assert_eq!(
            segments[2],
            PathSegment::from(SmoothQuadraticTo {
                mode: Mode::Absolute,
                to: dvec2(12.0, 0.0),
            })
        );
        assert_eq!(
            segments[4],
            PathSegment::from(SmoothCubicTo {
                mode: Mode::Absolute,
                control2: dvec2(5.0, 5.0),
                to: dvec2(6.0, 6.0),
            })
        );
    }

    #[test]
    fn whitespace_and_commas_between_commands() {
        let segments = parse("\n  M 1 1 ,\tL 2 2\r\n z  ");
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert!(parse("").is_empty());
        assert!(parse("   ").is_empty());
    }

    #[test]
    fn first_command_need_not_be_a_move() {
        assert_eq!(parse("l5,5"), vec![line(Mode::Relative, 5.0, 5.0)]);
    }

    #[test]
    fn unknown_command_points_at_letter() {
        let err = path_data("M0,0 X10,10").unwrap_err();
        assert_eq!(err.offset, 5);
        assert!(err.message.contains("expected a path command"), "{}", err.message);
        assert!(err.message.contains("`X`"), "{}", err.message);
    }

    #[test]
    fn missing_coordinate_points_at_end() {
        let err = path_data("M0,0 L10").unwrap_err();
        assert_eq!(err.offset, 8);
        assert!(err.message.contains("end of input"), "{}", err.message);
    }

    #[test]
    fn bad_arc_flag_points_at_flag() {
        let err = path_data("M0,0 A5,5 0 2,0 10,10").unwrap_err();
        assert_eq!(err.offset, 12);
        assert!(err.message.contains("flag"), "{}", err.message);
    }

    #[test]
    fn bad_flag_in_repeated_arc_points_at_flag() {
        let err = path_data("M0,0 A5,5 0 0,0 10,10 5,5 0 2,0 1,1").unwrap_err();
        assert_eq!(err.offset, 28);
        assert!(err.message.contains("flag"), "{}", err.message);
    }

    #[test]
    fn bad_coordinate_in_repeated_curve_points_at_it() {
        let err = path_data("M0,0 C1,1 2,2 3,3 4,4 5,5 6,x").unwrap_err();
        assert_eq!(err.offset, 27);
        assert!(err.message.contains("`x`"), "{}", err.message);
    }

    #[test]
    fn half_a_repeated_pair_points_at_end() {
        let err = path_data("M0,0 L1,2 3").unwrap_err();
        assert_eq!(err.offset, 11);
        assert!(err.message.contains("end of input"), "{}", err.message);
    }

    #[test]
    fn dangling_sign() {
        let err = path_data("M0,0 L-,5").unwrap_err();
        assert_eq!(err.offset, 6);
    }

    #[test]
    fn display_parses_back() {
        let source = "M10,20 l5-5 H3 v.5 C1,2 3,4 5,6 s1,1 2,2 Q0,0 1,1 t2,0 A10,5 30 1,0 4,4 z";
        let segments = parse(source);
        let written: Vec<String> = segments.iter().map(ToString::to_string).collect();
        assert_eq!(parse(&written.join(" ")), segments);
    }

    #[test]
    fn dimensions() {
        assert_eq!(dimension("64dp"), Ok(Dimension::new(64.0, Unit::Dp)));
        assert_eq!(dimension(" 24.5px "), Ok(Dimension::new(24.5, Unit::Px)));
        assert_eq!(dimension("10"), Ok(Dimension::new(10.0, Unit::Unitless)));
        assert!(dimension("10 dp").is_err());
        assert!(dimension("dp").is_err());
    }

    #[test]
    fn scalars() {
        assert_eq!(scalar("300.0"), Ok(300.0));
        assert_eq!(scalar("-45"), Ok(-45.0));
        assert!(scalar("45deg").is_err());
    }
}
