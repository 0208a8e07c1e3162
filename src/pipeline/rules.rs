//! Markup stripping: the ordered mARkdown rule table.
//!
//! ## Rule Order
//!
//! The table is an ordered list, not a set. Several patterns share a leading
//! token (`###`, `#`, `%`), so the order decides which rule sees a fragment
//! first:
//!
//! - the subject code `#####AAA#BBB#` must go before the paragraph-begin
//!   rule turns its first `#` into a divider;
//! - the `$XXX_YYY$` category marker must go before the bare biography rule
//!   would strip `### $` and leave `XXX_YYY$` behind;
//! - a line number `% 12` must go before the verse rule deletes its `%`.
//!
//! The header rule runs before the editorial rule, so `### |EDITOR|` is
//! reduced by the header rule to ` EDITOR|`. A test pins this.
//!
//! Rules (applied in order):
//! 1. subject identifier `#####[A-Z]+#[A-Z]+#` → removed
//! 2. structural header `### |` … `### |||||` → space
//! 3. editorial marker `### |EDITOR|` → removed
//! 4. dictionary entry `$DIC_XXX$` → `.`
//! 5. historical event `### @` / `### @ RAW` → space
//! 6. category marker `### $XXX_YYY$` → space
//! 7. biography `### $` … `### $$$$` → removed
//! 8. page number `PageV01P001` → removed
//! 9. paragraph begin `#` / `# %` at line start → divider
//! 10. paragraph continuation `~~` → space
//! 11. runs of spaces → one space
//! 12. line number `% 12` → space
//! 13. verse / hemistich `%`, `%~%`, `%,%`, `% %` → removed
//! 14. milestone `Milestone300` → removed
//! 15. residual ` % ` → space
//!
//! After the table the line is finished: space runs are collapsed once more
//! and the edges are trimmed. Anything the rules do not recognise is passed
//! through unchanged.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// Separates paragraphs in the assembled plain text.
pub const PARAGRAPH_DIVIDER: char = '\n';

/// Joins a continuation line to the paragraph it continues.
pub const CONTINUATION_JOINER: char = ' ';

/// One (pattern, replacement) pair of the rule table.
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl PatternRule {
    fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
            replacement,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &'static str {
        self.replacement
    }

    /// Replace every match; the replacement is literal (no `$1` expansion).
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(text, NoExpand(self.replacement))
    }
}

/// An ordered table of [`PatternRule`]s.
#[derive(Debug, Clone)]
pub struct PatternRuleSet {
    rules: Vec<PatternRule>,
}

static MARKUP_RULES: Lazy<PatternRuleSet> = Lazy::new(|| PatternRuleSet {
    rules: vec![
        PatternRule::new("subject", r"#####[A-Z]+#[A-Z]+#", ""),
        PatternRule::new("header", r"### \|{1,5}", " "),
        PatternRule::new("editorial", r"### \|EDITOR\|", ""),
        PatternRule::new("dictionary", r"\$DIC_[A-Z]{3}\$", "."),
        PatternRule::new("history", r"### @(?: RAW)?", " "),
        PatternRule::new("generic", r"### \$[A-Z]{3}_[A-Z]{3}\$", " "),
        PatternRule::new("biography", r"### \${1,4}", ""),
        PatternRule::new("page_number", r"PageV\d{2}P\d{3}", ""),
        PatternRule::new("paragraph_begin", r"^#(?: %)?", "\n"),
        PatternRule::new("paragraph_continuation", r"~~", " "),
        PatternRule::new("spaces", r" {2,}", " "),
        PatternRule::new("line_number", r"%\s+\d+", " "),
        PatternRule::new("verse", r"%(?:[~, ]%)?", ""),
        PatternRule::new("milestone", r"Milestone300", ""),
        PatternRule::new("residual_percent", r" % ", " "),
    ],
});

static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

impl PatternRuleSet {
    /// The mARkdown rule table, built once per process.
    pub fn markup() -> &'static PatternRuleSet {
        &MARKUP_RULES
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in table order, without finishing the line.
    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| rule.apply(&acc).into_owned())
    }

    /// Apply the table, then collapse spaces and trim the line edges.
    pub fn clean(&self, raw: &str) -> String {
        let applied = self.apply(raw);
        RE_SPACES.replace_all(&applied, " ").trim().to_string()
    }
}

/// Clean one raw line with the mARkdown rule table.
pub fn clean_line(raw: &str) -> String {
    PatternRuleSet::markup().clean(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(set: &PatternRuleSet, name: &str) -> usize {
        set.rules
            .iter()
            .position(|r| r.name == name)
            .unwrap_or_else(|| panic!("no rule named {name}"))
    }

    fn swapped(a: &str, b: &str) -> PatternRuleSet {
        let mut set = PatternRuleSet::markup().clone();
        let (i, j) = (position(&set, a), position(&set, b));
        set.rules.swap(i, j);
        set
    }

    #[test]
    fn table_has_fifteen_rules_in_order() {
        let names: Vec<_> = PatternRuleSet::markup()
            .rules()
            .iter()
            .map(PatternRule::name)
            .collect();
        assert_eq!(
            names,
            [
                "subject",
                "header",
                "editorial",
                "dictionary",
                "history",
                "generic",
                "biography",
                "page_number",
                "paragraph_begin",
                "paragraph_continuation",
                "spaces",
                "line_number",
                "verse",
                "milestone",
                "residual_percent",
            ]
        );
    }

    #[test]
    fn subject_line_cleans_to_content() {
        assert_eq!(clean_line("#####AAA#BBB# some content"), "some content");
    }

    #[test]
    fn paragraph_marker_removed_from_text() {
        assert_eq!(clean_line("# first paragraph text"), "first paragraph text");
        assert_eq!(clean_line("# % verse line"), "verse line");
    }

    #[test]
    fn continuation_marker_removed_from_text() {
        assert_eq!(clean_line("~~continued text"), "continued text");
    }

    #[test]
    fn each_rule_leaves_no_token_behind() {
        let cases = [
            ("#####SUBJ#CODE# text", "#####SUBJ#CODE#"),
            ("### || Section title", "### |"),
            ("### |EDITOR| note", "### |EDITOR|"),
            ("word $DIC_NIS$ entry", "$DIC_NIS$"),
            ("### @ RAW event", "### @"),
            ("### $BIO_MAN$ Name", "$BIO_MAN$"),
            ("### $$ Name", "### $"),
            ("text PageV01P023 more", "PageV01P023"),
            ("# text", "#"),
            ("~~text", "~~"),
            ("a    b", "  "),
            ("verse % 12 end", "% 12"),
            ("first %~% second", "%"),
            ("text Milestone300 more", "Milestone300"),
            ("left % right", " % "),
        ];
        for (input, token) in cases {
            let out = clean_line(input);
            assert!(
                !out.contains(token),
                "clean({input:?}) = {out:?} still contains {token:?}"
            );
        }
    }

    #[test]
    fn replacements_follow_the_table() {
        assert_eq!(clean_line("### | Chapter One"), "Chapter One");
        assert_eq!(clean_line("word $DIC_NIS$ entry"), "word . entry");
        assert_eq!(clean_line("### @ RAW in the year"), "in the year");
        assert_eq!(clean_line("### $BIO_MAN$ Abu Talib"), "Abu Talib");
        assert_eq!(clean_line("### $$$ Abu Talib"), "Abu Talib");
        assert_eq!(clean_line("before PageV01P023 after"), "before after");
        assert_eq!(clean_line("one % 12 two"), "one two");
        assert_eq!(clean_line("first %~% second"), "first second");
        assert_eq!(clean_line("before Milestone300 after"), "before after");
    }

    #[test]
    fn header_runs_before_editorial() {
        // pinned: the header rule consumes `### |` first
        assert_eq!(clean_line("### |EDITOR| note"), "EDITOR| note");
    }

    #[test]
    fn unknown_markup_passes_through() {
        assert_eq!(clean_line("text ### ?? odd"), "text ### ?? odd");
        // lowercase codes are not a subject marker; only the leading `#` goes
        assert_eq!(clean_line("#####abc#def# lower"), "####abc#def# lower");
        assert_eq!(clean_line("plain words"), "plain words");
    }

    #[test]
    fn clean_is_idempotent_on_well_formed_lines() {
        let lines = [
            "#####AAA#BBB# some content",
            "# first paragraph text",
            "~~continued text PageV01P002 more",
            "### | Chapter",
            "### || Section",
            "### $BIO_MAN$ Name",
            "### @ RAW event",
            "# % first hemistich %~% second hemistich",
            "word $DIC_NIS$ entry Milestone300",
            "verse % 12 end",
            "  spaced    out   ",
        ];
        for line in lines {
            let once = clean_line(line);
            assert_eq!(clean_line(&once), once, "not idempotent for {line:?}");
        }
    }

    #[test]
    fn apply_keeps_divider_before_finishing() {
        let applied = PatternRuleSet::markup().apply("# text");
        assert!(applied.starts_with(PARAGRAPH_DIVIDER));
        assert_eq!(PatternRuleSet::markup().clean("# text"), "text");
    }

    #[test]
    fn replacement_is_literal() {
        let rule = PatternRule::new("dollar", "x", "$1");
        assert_eq!(rule.apply("axb"), "a$1b");
    }

    #[test]
    fn order_matters_for_overlapping_prefixes() {
        let cases = [
            ("header", "editorial", "### |EDITOR| note"),
            ("generic", "biography", "### $BIO_MAN$ Name"),
            ("subject", "paragraph_begin", "#####AAA#BBB# content"),
            ("line_number", "verse", "one % 12 two"),
            ("history", "paragraph_begin", "### @ event"),
        ];
        let standard = PatternRuleSet::markup();
        for (a, b, input) in cases {
            let reordered = swapped(a, b);
            assert_ne!(
                standard.clean(input),
                reordered.clean(input),
                "swapping {a} and {b} did not change clean({input:?})"
            );
        }
    }
}
