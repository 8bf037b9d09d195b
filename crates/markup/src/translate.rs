//! Rewrites the small LaTeX-like math vocabulary used in publication titles
//! into inline rich-text tags.
//!
//! The passes run in a fixed order. Braced superscript/subscript forms run
//! before the bare forms, so `^{12}` wraps `12` instead of being read as a
//! bare `^` followed by a literal `{`.

use regex::Regex;
use std::sync::LazyLock;

/// Combining overline, drawn over the preceding character.
const COMBINING_OVERLINE: char = '\u{0305}';

/// Literal command tokens and their symbols, applied in this order.
const SYMBOLS: [(&str, &str); 4] = [
    (r"\to", "→"),
    (r"\psi", "ψ"),
    (r"\phi", "φ"),
    (r"\pi", "π"),
];

static BAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\bar\{(.)\}").expect("BUG: invalid BAR_RE regex literal")
});

static BRACED_SUPER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\^\{(.*?)\}").expect("BUG: invalid BRACED_SUPER_RE regex literal")
});

static BARE_SUPER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\^([+\-0-9a-zA-Z])").expect("BUG: invalid BARE_SUPER_RE regex literal")
});

static BRACED_SUB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_\{(.*?)\}").expect("BUG: invalid BRACED_SUB_RE regex literal")
});

static BARE_SUB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"_(\w)").expect("BUG: invalid BARE_SUB_RE regex literal")
});

/// Translates math-like escapes into inline rich-text markup.
///
/// Total: text without recognized markup comes back unchanged apart from
/// removed `$` characters. Unknown backslash commands are left as they are.
pub fn translate(text: &str) -> String {
    let mut out = text.to_string();
    for (command, symbol) in SYMBOLS {
        out = out.replace(command, symbol);
    }

    let overline = format!("${{1}}{}", COMBINING_OVERLINE);
    let out = BAR_RE.replace_all(&out, overline.as_str());
    let out = BRACED_SUPER_RE.replace_all(&out, "<super>${1}</super>");
    let out = BARE_SUPER_RE.replace_all(&out, "<super>${1}</super>");
    let out = BRACED_SUB_RE.replace_all(&out, "<sub>${1}</sub>");
    let out = BARE_SUB_RE.replace_all(&out, "<sub>${1}</sub>");

    out.replace('$', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        let plain = "Measurement of the CP-violating phase in B decays";
        assert_eq!(translate(plain), plain);
    }

    #[test]
    fn test_dollar_signs_are_removed() {
        assert_eq!(translate("a $b$ c$$"), "a b c");
        let once = translate("$x$");
        assert_eq!(translate(&once), once);
    }

    #[test]
    fn test_mass_energy_equivalence() {
        assert_eq!(translate("$E=mc^2$"), "E=mc<super>2</super>");
    }

    #[test]
    fn test_braced_forms_take_precedence() {
        assert_eq!(
            translate(r"\psi^{+}_{bar}"),
            "ψ<super>+</super><sub>bar</sub>"
        );
        assert_eq!(translate("x^{12}"), "x<super>12</super>");
        assert_eq!(translate("x^1 2"), "x<super>1</super> 2");
    }

    #[test]
    fn test_overline() {
        assert_eq!(translate(r"\bar{B}"), "B\u{0305}");
        assert_eq!(
            translate(r"$B^0_s \to J/\psi \bar{K}^{*0}$"),
            "B<super>0</super><sub>s</sub> → J/ψ K\u{0305}<super>*0</super>"
        );
    }

    #[test]
    fn test_overline_requires_single_character() {
        assert_eq!(translate(r"\bar{AB}"), r"\bar{AB}");
    }

    #[test]
    fn test_symbol_substitutions() {
        assert_eq!(translate(r"\pi \phi \psi"), "π φ ψ");
        assert_eq!(translate(r"D \to K\pi"), "D → Kπ");
    }

    #[test]
    fn test_unknown_commands_are_untouched() {
        assert_eq!(translate(r"\Lambda_b"), r"\Lambda<sub>b</sub>");
        assert_eq!(translate(r"\gamma"), r"\gamma");
    }

    #[test]
    fn test_braced_argument_stops_at_first_closing_brace() {
        assert_eq!(translate("x^{a{b}c}"), "x<super>a{b</super>c}");
    }

    #[test]
    fn test_empty_braced_argument() {
        assert_eq!(translate("x^{}"), "x<super></super>");
    }

    #[test]
    fn test_bare_superscript_ignores_other_characters() {
        assert_eq!(translate("x^*"), "x^*");
        assert_eq!(translate("x^-"), "x<super>-</super>");
    }

    #[test]
    fn test_bare_subscript_accepts_word_characters_only() {
        assert_eq!(translate("a_1"), "a<sub>1</sub>");
        assert_eq!(translate("a_+"), "a_+");
        assert_eq!(translate("a__b"), "a<sub>_</sub>b");
    }

    #[test]
    fn test_trailing_markers_are_left_alone() {
        assert_eq!(translate("x^"), "x^");
        assert_eq!(translate("x_"), "x_");
    }
}
