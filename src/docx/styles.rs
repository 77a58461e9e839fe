//! Embedded style definitions and style-name resolution.
//!
//! Every package produced by this crate starts from the same `styles.xml`,
//! so a fragment rendered in isolation and the final composed document agree
//! on what `Heading1` or `Caption` look like. Callers address styles by
//! their Word UI name ("Heading 1") or directly by style id ("Heading1").

/// Style ids defined in [`STYLES_XML`].
const KNOWN_STYLES: [&str; 10] = [
    "Normal", "Title", "Subtitle", "Heading1", "Heading2", "Heading3", "Heading4", "Heading5",
    "Heading6", "Caption",
];

/// The `word/styles.xml` part shared by every generated package.
pub const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120"/></w:pPr></w:pPrDefault></w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:before="240" w:after="240"/></w:pPr><w:rPr><w:b/><w:sz w:val="56"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Subtitle"><w:name w:val="Subtitle"/><w:basedOn w:val="Normal"/><w:rPr><w:i/><w:sz w:val="30"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:pPr><w:outlineLvl w:val="0"/><w:spacing w:before="360" w:after="160"/></w:pPr><w:rPr><w:b/><w:sz w:val="32"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:pPr><w:outlineLvl w:val="1"/><w:spacing w:before="280" w:after="140"/></w:pPr><w:rPr><w:b/><w:sz w:val="28"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/><w:basedOn w:val="Normal"/><w:pPr><w:outlineLvl w:val="2"/><w:spacing w:before="240" w:after="120"/></w:pPr><w:rPr><w:b/><w:sz w:val="26"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading4"><w:name w:val="heading 4"/><w:basedOn w:val="Normal"/><w:pPr><w:outlineLvl w:val="3"/></w:pPr><w:rPr><w:b/><w:sz w:val="24"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading5"><w:name w:val="heading 5"/><w:basedOn w:val="Normal"/><w:pPr><w:outlineLvl w:val="4"/></w:pPr><w:rPr><w:b/><w:i/><w:sz w:val="22"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading6"><w:name w:val="heading 6"/><w:basedOn w:val="Normal"/><w:pPr><w:outlineLvl w:val="5"/></w:pPr><w:rPr><w:i/><w:sz w:val="22"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Caption"><w:name w:val="caption"/><w:basedOn w:val="Normal"/><w:rPr><w:i/><w:sz w:val="18"/></w:rPr></w:style>
</w:styles>
"#;

/// Map a Word UI style name to a style id by stripping spaces:
/// `"Heading 1"` becomes `"Heading1"`.
pub fn normalize_style_name(name: &str) -> String {
    name.split_whitespace().collect()
}

/// Whether `style_id` is defined in the embedded style sheet.
pub fn is_known_style(style_id: &str) -> bool {
    KNOWN_STYLES.contains(&style_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ui_names() {
        assert_eq!(normalize_style_name("Heading 1"), "Heading1");
        assert_eq!(normalize_style_name("Normal"), "Normal");
        assert_eq!(normalize_style_name("  Heading  2 "), "Heading2");
    }

    #[test]
    fn test_known_styles() {
        assert!(is_known_style("Heading1"));
        assert!(is_known_style("Caption"));
        assert!(!is_known_style("FancyBanner"));
        assert!(!is_known_style("Heading 1")); // ids never contain spaces
    }

    #[test]
    fn test_stylesheet_defines_every_known_style() {
        for id in KNOWN_STYLES {
            assert!(
                STYLES_XML.contains(&format!("w:styleId=\"{id}\"")),
                "style {id} missing from embedded stylesheet"
            );
        }
    }
}
