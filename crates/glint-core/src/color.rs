//! Color-token resolution
//!
//! Effects name their colors with tokens (`"sky-400"`, `"#ffcc00"`). Tokens are
//! resolved once when a particle or lattice point is created and the result is
//! cached on it, so resolution never runs per frame.

use crate::types::Color;
use std::collections::HashMap;

/// Fallback used whenever a token cannot be resolved
pub const NEUTRAL: Color = Color {
    r: 0.639,
    g: 0.639,
    b: 0.639,
    a: 1.0,
};

/// Resolves a color token to a concrete color
pub trait ColorResolver {
    /// Returns `None` when the token is unknown
    fn resolve(&self, token: &str) -> Option<Color>;
}

impl<F> ColorResolver for F
where
    F: Fn(&str) -> Option<Color>,
{
    fn resolve(&self, token: &str) -> Option<Color> {
        self(token)
    }
}

/// Resolve a token, substituting [`NEUTRAL`] for unknown tokens
pub fn resolve_or_neutral(resolver: &dyn ColorResolver, token: &str) -> Color {
    match resolver.resolve(token) {
        Some(color) => color,
        None => {
            log::warn!("unknown color token '{token}', using neutral fallback");
            NEUTRAL
        }
    }
}

/// Resolve a whole color set. An empty set yields a single white entry.
pub fn resolve_set(resolver: &dyn ColorResolver, tokens: &[String]) -> Vec<Color> {
    if tokens.is_empty() {
        return vec![Color::WHITE];
    }
    tokens
        .iter()
        .map(|t| resolve_or_neutral(resolver, t))
        .collect()
}

/// Named token table plus hex literals
#[derive(Debug, Clone)]
pub struct Palette {
    tokens: HashMap<String, Color>,
}

impl Palette {
    /// An empty palette that only understands hex literals
    pub fn empty() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    pub fn insert(&mut self, token: impl Into<String>, color: Color) {
        self.tokens.insert(token.into(), color);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for Palette {
    /// Built-in token set used by the stock effects
    fn default() -> Self {
        let mut palette = Self::empty();
        let table: &[(&str, u32)] = &[
            ("white", 0xFFFFFF),
            ("black", 0x000000),
            ("neutral", 0xA3A3A3),
            ("slate-300", 0xCBD5E1),
            ("slate-400", 0x94A3B8),
            ("sky-200", 0xBAE6FD),
            ("sky-400", 0x38BDF8),
            ("blue-300", 0x93C5FD),
            ("blue-500", 0x3B82F6),
            ("indigo-400", 0x818CF8),
            ("violet-400", 0xA78BFA),
            ("pink-400", 0xF472B6),
            ("rose-500", 0xF43F5E),
            ("red-500", 0xEF4444),
            ("orange-400", 0xFB923C),
            ("orange-600", 0xEA580C),
            ("amber-300", 0xFCD34D),
            ("amber-500", 0xF59E0B),
            ("yellow-300", 0xFDE047),
            ("lime-400", 0xA3E635),
            ("green-500", 0x22C55E),
            ("emerald-400", 0x34D399),
            ("teal-400", 0x2DD4BF),
            ("cyan-300", 0x67E8F9),
        ];
        for (name, hex) in table {
            palette.insert(*name, Color::from_hex(*hex));
        }
        palette
    }
}

impl ColorResolver for Palette {
    fn resolve(&self, token: &str) -> Option<Color> {
        let token = token.trim();
        if token.starts_with('#') {
            return Color::parse_hex(token);
        }
        self.tokens.get(token).copied()
    }
}
