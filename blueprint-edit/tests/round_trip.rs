//! Stamping a version into the name must leave the rest of the document
//! unchanged when re-parsed.

use blueprint_dialect::{BlueprintDocument, parse};
use blueprint_edit::{rewrite_name, versioned_name};
use blueprint_types::VersionTuple;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const MOTION_LIGHT: &str = r#"# Motion-activated light
blueprint:
  name: Motion-activated Light
  description: >
    Turn on a light when motion is detected.
  domain: automation
  author: Home Assistant
  homeassistant:
    min_version: 2024.6.0
  input:
    motion_entity:
      name: Motion Sensor
      selector:
        entity:
          domain: binary_sensor
    light_target:
      name: Light
      selector:
        target:
          entity:
            domain: light

mode: restart
max_exceeded: silent

trigger:
  platform: state
  entity_id: !input motion_entity
  from: "off"
  to: "on"

action:
  - service: light.turn_on
    target: !input light_target
  - wait_for_trigger:
      platform: state
      entity_id: !input motion_entity
      from: "on"
      to: "off"
"#;

fn strip_name(doc: &BlueprintDocument) -> serde_yaml::Value {
    let mut value = doc.root.to_yaml_value();
    if let Some(meta) = value.get_mut("blueprint").and_then(|b| b.as_mapping_mut()) {
        meta.remove("name");
    }
    value
}

#[test]
fn realistic_document_round_trips() {
    let version = VersionTuple::new(1, 3, 2);
    let before = BlueprintDocument::parse(MOTION_LIGHT).expect("parse original");

    let (text, _) = rewrite_name(MOTION_LIGHT, &before.name, &version).expect("rewrite");
    let after = BlueprintDocument::parse(&text).expect("parse rewritten");

    assert_eq!(after.name, "Motion-activated Light v1.3.2");
    assert_eq!(after.name, versioned_name(&before.name, &version));
    assert_eq!(after.domain, before.domain);
    assert_eq!(after.description, before.description);
    assert_eq!(after.author, before.author);
    assert_eq!(after.min_version, before.min_version);
    assert_eq!(strip_name(&after), strip_name(&before));

    // Comments and layout survive: exactly one line differs.
    let changed = MOTION_LIGHT
        .lines()
        .zip(text.lines())
        .filter(|(a, b)| a != b)
        .count();
    assert_eq!(changed, 1);
    assert!(text.starts_with("# Motion-activated light\n"));
}

#[test]
fn input_names_are_untouched() {
    let (text, _) =
        rewrite_name(MOTION_LIGHT, "Motion-activated Light", &VersionTuple::BASELINE).expect("rewrite");
    let root = parse(&text).expect("parse");
    let input = root
        .get("blueprint")
        .and_then(|b| b.get("input"))
        .and_then(|i| i.get("light_target"))
        .and_then(|t| t.get("name"))
        .and_then(|n| n.as_str());
    assert_eq!(input, Some("Light"));
}

proptest! {
    /// Any plain-safe name in any quoting style round-trips with the rest
    /// of the document intact.
    #[test]
    fn rewrite_preserves_other_fields(
        name in "[A-Za-z][A-Za-z0-9 ]{0,20}[A-Za-z0-9]",
        style in 0usize..3,
        major in 0u64..5,
        minor in 0u64..20,
        patch in 0u64..50,
    ) {
        prop_assume!(!["true", "false", "null"].contains(&name.to_lowercase().as_str()));
        let quoted = match style {
            0 => name.clone(),
            1 => format!("\"{name}\""),
            _ => format!("'{name}'"),
        };
        let raw = format!(
            "blueprint:\n  name: {quoted}\n  domain: script\n  author: me\nsequence:\n  - delay: 5\n"
        );
        let version = VersionTuple::new(major, minor, patch);

        let before = BlueprintDocument::parse(&raw).expect("parse");
        let (text, _) = rewrite_name(&raw, &before.name, &version).expect("rewrite");
        let after = BlueprintDocument::parse(&text).expect("reparse");

        prop_assert_eq!(after.name, format!("{} v{}", before.name, version));
        prop_assert_eq!(after.domain, before.domain);
        prop_assert_eq!(after.author, before.author);
        prop_assert_eq!(after.root.get("sequence"), before.root.get("sequence"));
    }
}
