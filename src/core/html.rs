// src/core/html.rs
//
// Display normalisation and full-text extraction for compendium bodies.
// Both are literal substitutions over known source idioms, not an HTML parser.

use std::sync::LazyLock;

use regex::Regex;

use super::sanitize::collapse_spaces;

/// The two bullet images, present on most entries.
const BULLET_IMAGES: &[(&str, &str)] = &[
    (r#"<img src="images/bullet.gif" alt="">"#, "✦"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/x.gif">"#, "✦"),
];

/// Attack, area and die-face symbols. Mostly monster stat blocks.
const SYMBOL_IMAGES: &[(&str, &str)] = &[
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/S2.gif">"#, "(⚔)"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/S3.gif">"#, "(➶)"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/Z1.gif">"#, "ᗕ"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/Z1a.gif">"#, "ᗕ"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/Z2a.gif">"#, "⚔"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/Z3a.gif">"#, "➶"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/Z4.gif">"#, "✻"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/Z4a.gif">"#, "✻"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/aura.png" align="top">"#, "☼"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/aura.png">"#, "☼"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/1a.gif">"#, "⚀"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/2a.gif">"#, "⚁"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/3a.gif">"#, "⚂"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/4a.gif">"#, "⚃"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/5a.gif">"#, "⚄"),
    (r#"<img src="http://www.wizards.com/dnd/images/symbol/6a.gif">"#, "⚅"),
];

/// Source-book links and compendium search links; keeps the link text.
static LINKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a(?: target="_new")? href="(?:http://ww[w2]\.wizards\.com/[^"]*)?"(?: target="_new")?>([^<]*)</a>"#)
        .expect("link pattern")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?\w+[^>]*>").expect("tag pattern"));

static LEFTOVER_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<\w|\w>|&[^D ]").expect("leftover pattern"));

/// Raw body → canonical display HTML. Order matters; see the steps inline.
pub fn normalize(raw: &str) -> String {
    let mut data = s!(raw);
    for (img, glyph) in BULLET_IMAGES {
        data = data.replace(img, glyph);
    }
    if data.contains("<img ") {
        for (img, glyph) in SYMBOL_IMAGES {
            data = data.replace(img, glyph);
        }
    }

    data = data.replace("&nbsp;", "\u{a0}");
    data = collapse_spaces(&data);
    data = data.replace('’', "'");

    // Line wrapping in the source leaves breaks next to punctuation.
    if data.contains('\n') {
        data = data.replace("\n,", ",").replace("\n.", ".").replace(".\n", ".");
    }

    data = LINKS.replace_all(&data, "$1").into_owned();
    data.trim().to_string()
}

/// Canonical HTML → plain search text.
pub fn extract_text(data: &str) -> String {
    let data = data.replace('\u{a0}', " ");
    let data = TAG.replace_all(&data, " ");
    let data = collapse_spaces(&data);
    data.replace("&amp;", "&").replace("&gt;", ">").trim().to_string()
}

/// Diagnostic: an image or anchor survived normalisation, i.e. the
/// substitution tables are missing a shape.
pub fn has_leftover_markup(data: &str) -> bool {
    data.contains("<img ") || data.contains("<a ")
}

/// Diagnostic: something tag- or entity-like survived text extraction.
pub fn has_leftover_tags(text: &str) -> bool {
    LEFTOVER_TAG.is_match(text)
}

/// Cut everything from the first `open` up to (not including) the last
/// `close` after it. `None` when either marker is missing.
pub fn drop_span(s: &str, open: &str, close: &str) -> Option<String> {
    let start = s.find(open)?;
    let end = start + s[start..].rfind(close)?;
    Some(join!(&s[..start], &s[end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_and_symbols_become_glyphs() {
        let raw = r#"<img src="images/bullet.gif" alt=""> Daily <img src="http://www.wizards.com/dnd/images/symbol/S2.gif"> Claw <img src="http://www.wizards.com/dnd/images/symbol/6a.gif">"#;
        let out = normalize(raw);
        assert_eq!(out, "✦ Daily (⚔) Claw ⚅");
        assert!(!out.contains("<img"));
    }

    #[test]
    fn nbsp_apostrophe_and_spacing() {
        let out = normalize("  Kord’s&nbsp;Relentlessness    is   here  ");
        assert_eq!(out, "Kord's\u{a0}Relentlessness is here");
        assert!(!out.contains('’'));
    }

    #[test]
    fn wrapped_punctuation_is_joined() {
        assert_eq!(normalize("one\n, two\n. three.\nfour"), "one, two. three.four");
    }

    #[test]
    fn known_links_keep_text_unknown_links_stay() {
        let raw = concat!(
            r#"<a target="_new" href="http://www.wizards.com/default.asp?x=products/dndacc/217367200">Adventurer's Vault</a> and "#,
            r#"<a href="http://www.wizards.com/dndinsider/compendium/power.aspx?id=2848">Fireball</a> and "#,
            r#"<a href="">Empty</a> and "#,
            r#"<a href="http://example.com/">Other</a>"#,
        );
        let out = normalize(raw);
        assert!(out.starts_with("Adventurer's Vault and Fireball and Empty and "));
        assert!(out.contains(r#"<a href="http://example.com/">Other</a>"#));
        assert!(has_leftover_markup(&out));
    }

    #[test]
    fn text_strips_tags_and_unescapes() {
        assert_eq!(extract_text("<p>Huge\u{a0}creature</p>"), "Huge creature");
        let clean = extract_text("<h1 class=player>Sword &amp; Board</h1><p class=flavor><i>Size</i> &gt; 3</p>");
        assert_eq!(clean, "Sword & Board Size > 3");
        assert!(!has_leftover_tags(&clean));
        assert!(has_leftover_tags("broken <b"));
    }

    #[test]
    fn drop_span_keeps_closing_marker() {
        let body = "<h1 class=miset>Set</h1><p>Intro</p><h1 class=mihead>Ring</h1><p>a</p><h1 class=mihead>Cloak</h1><p class=publishedIn>Published in X.</p>";
        assert_eq!(
            drop_span(body, "<h1 class=mihead>", "<p class=publishedIn>").as_deref(),
            Some("<h1 class=miset>Set</h1><p>Intro</p><p class=publishedIn>Published in X.</p>")
        );
        assert_eq!(drop_span(body, "<h2>", "</p>"), None);
    }
}
