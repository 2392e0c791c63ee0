//! Block glyph font used for poster labels, the 3D scene text and the
//! terminal title art.
//!
//! Every glyph is 5 cells wide and 7 cells tall. A cell is either empty or
//! filled with [`FILLED`]. Lowercase letters share the uppercase shapes.

/// Glyph width in cells.
pub const GLYPH_WIDTH: usize = 5;

/// Glyph height in cells.
pub const GLYPH_HEIGHT: usize = 7;

/// Cells between neighbouring glyphs.
pub const GLYPH_SPACING: usize = 1;

/// Character marking a filled cell.
pub const FILLED: char = '█';

type Glyph = [&'static str; GLYPH_HEIGHT];

/// Shown for characters the font does not cover.
const UNKNOWN: Glyph = ["█████", "█   █", "█   █", "█   █", "█   █", "█   █", "█████"];

const GLYPHS: &[(char, Glyph)] = &[
    ('A', [" ███ ", "█   █", "█   █", "█████", "█   █", "█   █", "█   █"]),
    ('B', ["████ ", "█   █", "█   █", "████ ", "█   █", "█   █", "████ "]),
    ('C', [" ███ ", "█   █", "█    ", "█    ", "█    ", "█   █", " ███ "]),
    ('D', ["████ ", "█   █", "█   █", "█   █", "█   █", "█   █", "████ "]),
    ('E', ["█████", "█    ", "█    ", "████ ", "█    ", "█    ", "█████"]),
    ('F', ["█████", "█    ", "█    ", "████ ", "█    ", "█    ", "█    "]),
    ('G', [" ███ ", "█   █", "█    ", "█ ███", "█   █", "█   █", " ████"]),
    ('H', ["█   █", "█   █", "█   █", "█████", "█   █", "█   █", "█   █"]),
    ('I', [" ███ ", "  █  ", "  █  ", "  █  ", "  █  ", "  █  ", " ███ "]),
    ('J', ["  ███", "   █ ", "   █ ", "   █ ", "   █ ", "█  █ ", " ██  "]),
    ('K', ["█   █", "█  █ ", "█ █  ", "██   ", "█ █  ", "█  █ ", "█   █"]),
    ('L', ["█    ", "█    ", "█    ", "█    ", "█    ", "█    ", "█████"]),
    ('M', ["█   █", "██ ██", "█ █ █", "█ █ █", "█   █", "█   █", "█   █"]),
    ('N', ["█   █", "█   █", "██  █", "█ █ █", "█  ██", "█   █", "█   █"]),
    ('O', [" ███ ", "█   █", "█   █", "█   █", "█   █", "█   █", " ███ "]),
    ('P', ["████ ", "█   █", "█   █", "████ ", "█    ", "█    ", "█    "]),
    ('Q', [" ███ ", "█   █", "█   █", "█   █", "█ █ █", "█  █ ", " ██ █"]),
    ('R', ["████ ", "█   █", "█   █", "████ ", "█ █  ", "█  █ ", "█   █"]),
    ('S', [" ████", "█    ", "█    ", " ███ ", "    █", "    █", "████ "]),
    ('T', ["█████", "  █  ", "  █  ", "  █  ", "  █  ", "  █  ", "  █  "]),
    ('U', ["█   █", "█   █", "█   █", "█   █", "█   █", "█   █", " ███ "]),
    ('V', ["█   █", "█   █", "█   █", "█   █", "█   █", " █ █ ", "  █  "]),
    ('W', ["█   █", "█   █", "█   █", "█ █ █", "█ █ █", "█ █ █", " █ █ "]),
    ('X', ["█   █", "█   █", " █ █ ", "  █  ", " █ █ ", "█   █", "█   █"]),
    ('Y', ["█   █", "█   █", " █ █ ", "  █  ", "  █  ", "  █  ", "  █  "]),
    ('Z', ["█████", "    █", "   █ ", "  █  ", " █   ", "█    ", "█████"]),
    ('0', [" ███ ", "█   █", "█  ██", "█ █ █", "██  █", "█   █", " ███ "]),
    ('1', ["  █  ", " ██  ", "  █  ", "  █  ", "  █  ", "  █  ", " ███ "]),
    ('2', [" ███ ", "█   █", "    █", "   █ ", "  █  ", " █   ", "█████"]),
    ('3', ["█████", "   █ ", "  █  ", "   █ ", "    █", "█   █", " ███ "]),
    ('4', ["   █ ", "  ██ ", " █ █ ", "█  █ ", "█████", "   █ ", "   █ "]),
    ('5', ["█████", "█    ", "████ ", "    █", "    █", "█   █", " ███ "]),
    ('6', ["  ██ ", " █   ", "█    ", "████ ", "█   █", "█   █", " ███ "]),
    ('7', ["█████", "    █", "   █ ", "  █  ", " █   ", " █   ", " █   "]),
    ('8', [" ███ ", "█   █", "█   █", " ███ ", "█   █", "█   █", " ███ "]),
    ('9', [" ███ ", "█   █", "█   █", " ████", "    █", "   █ ", " ██  "]),
    (' ', ["     ", "     ", "     ", "     ", "     ", "     ", "     "]),
    ('[', [" ███ ", " █   ", " █   ", " █   ", " █   ", " █   ", " ███ "]),
    (']', [" ███ ", "   █ ", "   █ ", "   █ ", "   █ ", "   █ ", " ███ "]),
    ('•', ["     ", "     ", " ███ ", " ███ ", " ███ ", "     ", "     "]),
    ('.', ["     ", "     ", "     ", "     ", "     ", " ██  ", " ██  "]),
    ('-', ["     ", "     ", "     ", "█████", "     ", "     ", "     "]),
    ('!', ["  █  ", "  █  ", "  █  ", "  █  ", "  █  ", "     ", "  █  "]),
    (':', ["     ", " ██  ", " ██  ", "     ", " ██  ", " ██  ", "     "]),
    ('?', [" ███ ", "█   █", "    █", "   █ ", "  █  ", "     ", "  █  "]),
];

/// Look up the glyph for `ch`, falling back to a hollow box.
pub fn glyph(ch: char) -> &'static Glyph {
    let ch = ch.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|(c, _)| *c == ch)
        .map(|(_, g)| g)
        .unwrap_or(&UNKNOWN)
}

/// Whether the font has a dedicated glyph for `ch`.
pub fn has_glyph(ch: char) -> bool {
    let ch = ch.to_ascii_uppercase();
    GLYPHS.iter().any(|(c, _)| *c == ch)
}

/// Width of `text` in cells, including the spacing between glyphs.
pub fn text_width(text: &str) -> usize {
    let count = text.chars().count();
    if count == 0 {
        0
    } else {
        count * GLYPH_WIDTH + (count - 1) * GLYPH_SPACING
    }
}

/// Build block art for `text`.
///
/// # Returns
/// A vector of [`GLYPH_HEIGHT`] strings, each one row of the art.
pub fn build_text_art(text: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(GLYPH_HEIGHT);

    for row in 0..GLYPH_HEIGHT {
        let mut line = String::new();
        for (i, ch) in text.chars().enumerate() {
            if i > 0 {
                line.push_str(&" ".repeat(GLYPH_SPACING));
            }
            line.push_str(glyph(ch)[row]);
        }
        lines.push(line);
    }

    lines
}

/// Filled cells of `text` as `(column, row)` pairs, row 0 at the top.
pub fn filled_cells(text: &str) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        let origin = i * (GLYPH_WIDTH + GLYPH_SPACING);
        for (row, line) in glyph(ch).iter().enumerate() {
            for (col, cell) in line.chars().enumerate() {
                if cell == FILLED {
                    cells.push((origin + col, row));
                }
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_well_formed() {
        for (ch, g) in GLYPHS.iter().chain(std::iter::once(&('?', UNKNOWN))) {
            for row in g {
                assert_eq!(row.chars().count(), GLYPH_WIDTH, "glyph {ch:?}");
                assert!(row.chars().all(|c| c == ' ' || c == FILLED), "glyph {ch:?}");
            }
        }
    }

    #[test]
    fn test_lowercase_shares_uppercase() {
        assert_eq!(glyph('l'), glyph('L'));
        assert!(has_glyph('q'));
    }

    #[test]
    fn test_unknown_falls_back() {
        assert!(!has_glyph('~'));
        assert_eq!(glyph('~'), &UNKNOWN);
    }

    #[test]
    fn test_build_text_art() {
        let art = build_text_art("LO");
        assert_eq!(art.len(), GLYPH_HEIGHT);
        assert_eq!(art[0], format!("{}{}{}", glyph('L')[0], " ", glyph('O')[0]));
        assert!(art.iter().all(|l| l.chars().count() == text_width("LO")));

        let empty = build_text_art("");
        assert!(empty.iter().all(String::is_empty));
    }

    #[test]
    fn test_filled_cells_match_art() {
        let text = "lost";
        let art = build_text_art(text);
        let from_art = art
            .iter()
            .map(|l| l.chars().filter(|&c| c == FILLED).count())
            .sum::<usize>();
        assert_eq!(filled_cells(text).len(), from_art);
        assert!(filled_cells(text).iter().all(|&(c, r)| c < text_width(text) && r < GLYPH_HEIGHT));
    }
}
