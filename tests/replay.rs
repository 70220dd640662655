use folio::{AppOptions, replay::ReplayScript};
use temp_dir::TempDir;

const SCRIPT: &str = r##"{
    "viewport": { "width": 375, "height": 700 },
    "elements": [
        { "tag": "nav", "id": "navbar", "height": 64 },
        { "tag": "button", "id": "menu-toggle", "attributes": { "aria-expanded": "false" } },
        { "tag": "div", "id": "mobile-menu", "classes": ["hidden"] },
        { "tag": "a", "classes": ["nav-link", "text-gray-700"], "attributes": { "href": "#home" } },
        { "tag": "a", "id": "about-link", "classes": ["nav-link", "text-gray-700"], "attributes": { "href": "#about" } },
        { "tag": "section", "id": "home", "top": 0, "height": 700 },
        { "tag": "section", "id": "about", "top": 700, "height": 600 },
        { "tag": "section", "id": "contact", "top": 1300, "height": 700 },
        { "tag": "form", "id": "contact-form", "parent": "contact" },
        { "tag": "input", "id": "name", "parent": "contact-form" },
        { "tag": "input", "id": "email", "parent": "contact-form" },
        { "tag": "textarea", "id": "message", "parent": "contact-form" },
        { "tag": "div", "id": "form-message", "classes": ["hidden"] }
    ],
    "events": [
        { "at_ms": 0, "type": "click", "target": "#menu-toggle" },
        { "at_ms": 10, "type": "scroll", "y": 650 },
        { "at_ms": 20, "type": "scroll", "y": 700 },
        { "at_ms": 500, "type": "input", "target": "#name", "value": "Ada" },
        { "at_ms": 510, "type": "input", "target": "#email", "value": "ada@example.com" },
        { "at_ms": 520, "type": "input", "target": "#message", "value": "Hello there, nice site!" },
        { "at_ms": 600, "type": "submit", "target": "#contact-form" },
        { "at_ms": 700, "type": "click", "target": "#missing" }
    ],
    "run_for_ms": 1000
}"##;

fn element<'a>(snapshot: &'a serde_json::Value, id: &str) -> &'a serde_json::Value {
    snapshot["elements"]
        .as_array()
        .and_then(|elements| elements.iter().find(|element| element["id"] == id))
        .unwrap()
}

#[test]
fn test_replay_from_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("session.json");
    std::fs::write(&path, SCRIPT)?;

    let script = ReplayScript::from_path(&path)?;
    let snapshot = serde_json::to_value(folio::replay::run(&script, AppOptions::default())?)?;

    assert_eq!(snapshot["scroll_y"], 700.0);
    assert_eq!(snapshot["inner_width"], 375.0);

    let menu = element(&snapshot, "mobile-menu");
    assert_eq!(menu["classes"], serde_json::json!([]));
    assert_eq!(
        element(&snapshot, "menu-toggle")["attributes"]["aria-expanded"],
        "true"
    );

    let about = element(&snapshot, "about-link");
    assert_eq!(
        about["classes"],
        serde_json::json!(["nav-link", "text-primary", "font-semibold"])
    );

    let panel = element(&snapshot, "form-message");
    assert_eq!(panel["inner_html"], "消息发送成功！我会尽快回复您。");
    assert!(element(&snapshot, "name").get("value").is_none());

    Ok(())
}

#[test]
fn test_success_message_hidden_once_run_long_enough() -> anyhow::Result<()> {
    let mut script = ReplayScript::from_json(SCRIPT)?;
    script.run_for_ms = 3600;

    let snapshot = serde_json::to_value(folio::replay::run(&script, AppOptions::default())?)?;
    let classes = element(&snapshot, "form-message")["classes"].clone();

    assert!(
        classes
            .as_array()
            .is_some_and(|classes| classes.iter().any(|class| class == "hidden"))
    );

    Ok(())
}

#[test]
fn test_missing_script_file() {
    let dir = TempDir::new().unwrap();

    assert!(ReplayScript::from_path(dir.child("missing.json")).is_err());
}
