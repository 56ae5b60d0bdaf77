//! Text rendering of tiles, superpositions, directions and rules
//!
//! Output is either plain symbols or symbols on truecolor backgrounds. Colored
//! output follows `colored`'s terminal detection and `NO_COLOR`/`CLICOLOR` handling.

use crate::algorithm::bitset::Superposition;
use crate::analysis::rules::AdjacencyRule;
use crate::spatial::tiles::{Direction, Tile};
use colored::Colorize;
use ndarray::Array2;

const WHITE: [u8; 3] = [0xFF, 0xFF, 0xFF];
const BLACK: [u8; 3] = [0x00, 0x00, 0x00];

/// Whether rendered text carries terminal colors
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextStyle {
    /// Bare symbols
    Plain,
    /// Symbols on colored backgrounds
    #[default]
    Ansi,
}

fn paint(
    style: TextStyle,
    background: [u8; 3],
    foreground: [u8; 3],
    bold: bool,
    glyph: &str,
) -> String {
    match style {
        TextStyle::Plain => glyph.to_string(),
        TextStyle::Ansi => {
            let [br, bg, bb] = background;
            let [fr, fg, fb] = foreground;
            let painted = glyph.on_truecolor(br, bg, bb).truecolor(fr, fg, fb);
            let painted = if bold { painted.bold() } else { painted };
            painted.to_string()
        }
    }
}

const fn rgb(color: [u8; 4]) -> [u8; 3] {
    let [r, g, b, _] = color;
    [r, g, b]
}

/// RGBA color of a superposition
///
/// Resolved cells use their tile's color and empty cells are black. Otherwise
/// each candidate lights one channel: coast red, land green, sea blue.
pub fn superposition_color(superposition: &Superposition) -> [u8; 4] {
    match superposition.resolved_tile() {
        Some(tile) => tile.color(),
        None => {
            let channel = |tile| if superposition.contains(tile) { 0xFF } else { 0x00 };
            [
                channel(Tile::Coast),
                channel(Tile::Land),
                channel(Tile::Sea),
                0xFF,
            ]
        }
    }
}

/// One tile as its symbol
pub fn render_tile(tile: Tile, style: TextStyle) -> String {
    paint(style, rgb(tile.color()), WHITE, false, &tile.symbol().to_string())
}

/// One superposition as its tile, `?` when empty, or its candidate count
pub fn render_superposition(superposition: &Superposition, style: TextStyle) -> String {
    if let Some(tile) = superposition.resolved_tile() {
        return render_tile(tile, style);
    }
    let glyph = if superposition.is_empty() {
        "?".to_string()
    } else {
        superposition.count().to_string()
    };
    let background = rgb(superposition_color(superposition));
    let foreground = if background == WHITE { BLACK } else { WHITE };
    paint(style, background, foreground, false, &glyph)
}

/// One direction as a bold colored letter
pub fn render_direction(direction: Direction, style: TextStyle) -> String {
    let foreground = match direction {
        Direction::Up => [0x00, 0xCD, 0x00],
        Direction::Down => [0xCD, 0x00, 0x00],
        Direction::Right => [0x00, 0xCD, 0xCD],
        Direction::Left => [0xCD, 0x00, 0xCD],
    };
    paint(style, BLACK, foreground, true, &direction.label().to_string())
}

/// A rule as tile, neighbor, direction glyphs
pub fn render_rule(rule: &AdjacencyRule, style: TextStyle) -> String {
    format!(
        "{}{}{}",
        render_tile(rule.tile, style),
        render_tile(rule.neighbor, style),
        render_direction(rule.direction, style)
    )
}

/// A tile grid, one line per row
pub fn render_tiles(tiles: &Array2<Tile>, style: TextStyle) -> String {
    tiles
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|&tile| render_tile(tile, style))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A superposition grid, one line per row
pub fn render_superpositions(superpositions: &Array2<Superposition>, style: TextStyle) -> String {
    superpositions
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|superposition| render_superposition(superposition, style))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
