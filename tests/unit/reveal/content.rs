use super::*;

fn heading() -> Inline {
    Inline::group(vec![
        Inline::span("accent", vec![Inline::text(" ⁝⁝⁝")]),
        Inline::text(" "),
        Inline::span("", vec![Inline::text("PROFILE")]),
    ])
}

#[test]
fn plain_text_flattens_depth_first() {
    assert_eq!(heading().plain_text(), " ⁝⁝⁝ PROFILE");
    assert_eq!(Inline::from("ABC").plain_text(), "ABC");
}

#[test]
fn rewrap_keeps_only_the_outer_span() {
    let content = Inline::span(
        "text-theme-primary",
        vec![Inline::text("A"), Inline::span("inner", vec![Inline::text("B")])],
    );
    let wrapped = content.rewrap("ЖБ");
    assert_eq!(wrapped.class(), Some("text-theme-primary"));
    assert_eq!(wrapped.plain_text(), "ЖБ");

    assert_eq!(heading().rewrap("X"), Inline::text("X"));
}

#[test]
fn deserializes_tagged_json() {
    let v: Inline = serde_json::from_str(
        r#"{"kind":"span","class":"c","children":[{"kind":"text","text":"hi"}]}"#,
    )
    .unwrap();
    assert_eq!(v.plain_text(), "hi");
    assert_eq!(v.class(), Some("c"));
}
