use super::*;
use crate::resume::backup::embedded_resume;

#[test]
fn embedded_document_round_trips_through_json() {
    let data = embedded_resume();
    data.validate().unwrap();
    let json = data.to_json_pretty().unwrap();
    assert!(json.contains("\"renderIndex\": 1"));
    assert_eq!(ResumeData::from_json_str(&json).unwrap(), data);
}

#[test]
fn unknown_keys_are_ignored() {
    let mut v = serde_json::to_value(embedded_resume()).unwrap();
    v["extra"] = serde_json::json!({"anything": true});
    v["sections"]["projects"]["items"][0]["role"] = serde_json::json!("DEVELOPER");
    let data = ResumeData::from_json_str(&v.to_string()).unwrap();
    assert_eq!(data.sections.projects.items[0].name, "accessguard");
}

#[test]
fn missing_section_is_a_validation_error() {
    let mut v = serde_json::to_value(embedded_resume()).unwrap();
    v.as_object_mut().unwrap().remove("bio");
    let err = ResumeData::from_json_str(&v.to_string()).unwrap_err();
    assert!(matches!(err, GlyphfolioError::Validation(_)));
}

#[test]
fn blank_name_is_rejected() {
    let mut data = embedded_resume();
    data.personal_info.name = "   ".to_string();
    assert!(data.validate().is_err());
}

#[test]
fn garbage_is_rejected() {
    assert!(ResumeData::from_json_str("<html>502</html>").is_err());
}
