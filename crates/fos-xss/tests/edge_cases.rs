//! Edge case tests for fos-xss
//!
//! Malformed markup, attribute quirks, hooks and custom whitelists.

use fos_xss::{noop_hook, sanitize, sanitize_with, sanitize_with_hook, Whitelist, XssFilter};
use std::cell::RefCell;

// ============================================================================
// KNOWN BEHAVIOR
// ============================================================================

#[test]
fn test_unknown_tag_escaped() {
    assert_eq!(
        sanitize("<script>alert(1)</script>"),
        "&lt;script&gt;alert(1)&lt;/script&gt;"
    );
}

#[test]
fn test_unknown_attribute_dropped() {
    assert_eq!(sanitize(r#"<p onclick="x()">hi</p>"#), "<p>hi</p>");
}

#[test]
fn test_hook_rewrites_value() {
    let out = sanitize_with_hook(r#"<a href="x">l</a>"#, |_, attr, value| {
        (attr == "href").then(|| value.to_uppercase())
    });
    assert_eq!(out, r#"<a href="X">l</a>"#);
}

#[test]
fn test_empty_value_renders_bare() {
    assert_eq!(sanitize(r#"<p class="">t</p>"#), "<p class>t</p>");
}

#[test]
fn test_unterminated_tag() {
    assert_eq!(sanitize("<div"), "&lt;div");
}

#[test]
fn test_quoted_gt_keeps_tag_whole() {
    assert_eq!(sanitize(r#"<a title=">">link</a>"#), r#"<a title=">">link</a>"#);
}

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(sanitize(""), "");
}

#[test]
fn test_plain_text() {
    assert_eq!(sanitize("just text & more"), "just text & more");
}

#[test]
fn test_lone_brackets() {
    assert_eq!(sanitize("<"), "&lt;");
    assert_eq!(sanitize(">"), "&gt;");
    assert_eq!(sanitize("<>"), "&lt;&gt;");
    assert_eq!(sanitize("</>"), "&lt;/&gt;");
}

#[test]
fn test_comparison_text() {
    assert_eq!(sanitize("a < b and c > d"), "a &lt; b and c &gt; d");
}

// ============================================================================
// MALFORMED MARKUP
// ============================================================================

#[test]
fn test_nested_open_brackets() {
    assert_eq!(sanitize("<<script>>"), "&lt;&lt;script&gt;&gt;");
    assert_eq!(sanitize("<<<>>>"), "&lt;&lt;&lt;&gt;&gt;&gt;");
}

#[test]
fn test_restart_keeps_following_tag() {
    assert_eq!(sanitize("<div <b>x</b>"), "&lt;div <b>x</b>");
}

#[test]
fn test_unterminated_quote_is_text() {
    assert_eq!(sanitize(r#"<p title="x>y"#), r#"&lt;p title="x&gt;y"#);
}

#[test]
fn test_trailing_unterminated_tag() {
    assert_eq!(sanitize("<b>bold</b><img src"), "<b>bold</b>&lt;img src");
}

#[test]
fn test_self_closing_unknown_name() {
    assert_eq!(sanitize("<br/>"), "&lt;br/&gt;");
}

#[test]
fn test_self_closing_with_attributes() {
    assert_eq!(sanitize(r#"<img src="a.png" />"#), r#"<img src="a.png">"#);
}

#[test]
fn test_space_before_name() {
    assert_eq!(sanitize("< p>x</ p>"), "&lt; p&gt;x&lt;/ p&gt;");
}

#[test]
fn test_comment_is_escaped() {
    assert_eq!(sanitize("<!-- hi -->"), "&lt;!-- hi --&gt;");
}

#[test]
fn test_unbalanced_tags_kept() {
    assert_eq!(sanitize("</p></p><p>"), "</p></p><p>");
}

// ============================================================================
// TAG NAMES
// ============================================================================

#[test]
fn test_uppercase_tags() {
    assert_eq!(sanitize(r#"<P CLASS="X">y</P>"#), r#"<p class="X">y</p>"#);
}

#[test]
fn test_closing_tag_attributes_ignored() {
    assert_eq!(sanitize(r#"<p>x</p onclick="y">"#), "<p>x</p>");
}

#[test]
fn test_tab_after_name_not_separator() {
    assert_eq!(
        sanitize("<a\thref=\"x\">l</a>"),
        "&lt;a\thref=\"x\"&gt;l</a>"
    );
}

#[test]
fn test_default_table_tags() {
    let html = r#"<table border="1" onclick="x"><tbody><tr><td colspan="2" rowspan="2">x</td></tr></tbody></table>"#;
    assert_eq!(
        sanitize(html),
        r#"<table border="1"><tbody><tr><td colspan="2">x</td></tr></tbody></table>"#
    );
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

#[test]
fn test_single_quotes_rewrapped() {
    assert_eq!(sanitize("<a href='/x'>l</a>"), r#"<a href="/x">l</a>"#);
}

#[test]
fn test_bare_attribute() {
    assert_eq!(sanitize(r#"<a title href="x">l</a>"#), r#"<a title href="x">l</a>"#);
}

#[test]
fn test_value_whitespace_trimmed() {
    assert_eq!(sanitize(r#"<p class="  a b  ">t</p>"#), r#"<p class="a b">t</p>"#);
}

#[test]
fn test_unquoted_values_dropped() {
    assert_eq!(sanitize("<img src=x onerror=alert(1)>"), "<img>");
}

#[test]
fn test_double_quote_cannot_break_out() {
    assert_eq!(
        sanitize(r#"<a title='x" onclick="alert(1)'>l</a>"#),
        r#"<a title="x&quot; onclick=&quot;alert(1)">l</a>"#
    );
}

#[test]
fn test_markup_inside_value_stays_in_value() {
    assert_eq!(
        sanitize(r#"<a title="<script>">l</a>"#),
        r#"<a title="<script>">l</a>"#
    );
}

#[test]
fn test_value_with_equals() {
    assert_eq!(
        sanitize(r#"<a href="/search?q=a&amp;b=c">l</a>"#),
        r#"<a href="/search?q=a&amp;b=c">l</a>"#
    );
}

#[test]
fn test_multibyte_values() {
    assert_eq!(
        sanitize(r#"<span class="héllo wörld" title="ü">ü</span>"#),
        r#"<span class="héllo wörld">ü</span>"#
    );
    assert_eq!(
        sanitize(r#"<img alt=" 日本語 " title="€">"#),
        r#"<img alt="日本語" title="€">"#
    );
}

// ============================================================================
// HOOKS
// ============================================================================

#[test]
fn test_hook_sees_dropped_attributes() {
    let calls = RefCell::new(Vec::new());
    let out = sanitize_with_hook(r#"<p onclick="go()" class="c">x</p>"#, |tag, attr, value| {
        calls.borrow_mut().push((tag.to_string(), attr.to_string(), value.to_string()));
        None
    });

    assert_eq!(out, r#"<p class="c">x</p>"#);
    assert_eq!(
        *calls.borrow(),
        vec![
            ("p".to_string(), "onclick".to_string(), "go()".to_string()),
            ("p".to_string(), "class".to_string(), "c".to_string()),
        ]
    );
}

#[test]
fn test_hook_gets_normalized_names() {
    let calls = RefCell::new(Vec::new());
    sanitize_with_hook(r#"<A HREF=" /x ">l</A>"#, |tag, attr, value| {
        calls.borrow_mut().push(format!("{}|{}|{}", tag, attr, value));
        None
    });

    assert_eq!(*calls.borrow(), vec!["a|href|/x"]);
}

#[test]
fn test_hook_not_called_for_unknown_tags() {
    let calls = RefCell::new(0);
    sanitize_with_hook(r#"<iframe src="x"></iframe>"#, |_, _, _| {
        *calls.borrow_mut() += 1;
        None
    });
    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn test_hook_neutralizes_javascript_urls() {
    let filter = XssFilter::new().on_attr(|_, attr, value| {
        let is_url = attr == "href" || attr == "src";
        (is_url && value.to_lowercase().starts_with("javascript:")).then(|| "#".to_string())
    });

    assert_eq!(
        filter.sanitize(r#"<a href="JavaScript:alert(1)">x</a><a href="/ok">y</a>"#),
        r##"<a href="#">x</a><a href="/ok">y</a>"##
    );
}

// ============================================================================
// CUSTOM WHITELISTS
// ============================================================================

#[test]
fn test_empty_whitelist_escapes_everything() {
    let wl = Whitelist::empty();
    assert_eq!(
        sanitize_with("<p>x</p>", &wl, noop_hook),
        "&lt;p&gt;x&lt;/p&gt;"
    );
}

#[test]
fn test_extended_default() {
    let mut wl = Whitelist::default();
    wl.allow_attrs("ul", ["class"]).unwrap();
    wl.allow_tag("li").unwrap();

    assert_eq!(
        sanitize_with(r#"<ul class="x" id="y"><li class="z">a</li></ul>"#, &wl, noop_hook),
        r#"<ul class="x"><li>a</li></ul>"#
    );
}

#[test]
fn test_whitelist_from_json() {
    let wl = Whitelist::from_json(r#"{"a": ["href", "rel"]}"#).unwrap();
    let filter = XssFilter::new().with_whitelist(wl);

    assert_eq!(
        filter.sanitize(r#"<a href="/x" rel="nofollow" title="t">l</a><b>b</b>"#),
        r#"<a href="/x" rel="nofollow">l</a>&lt;b&gt;b&lt;/b&gt;"#
    );
}

#[test]
fn test_removed_attribute() {
    let mut wl = Whitelist::default();
    wl.remove_attr("img", "src");

    assert_eq!(
        sanitize_with(r#"<img src="x.png" alt="x">"#, &wl, noop_hook),
        r#"<img alt="x">"#
    );
}
