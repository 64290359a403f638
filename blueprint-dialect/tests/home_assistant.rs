//! Loader tests against realistic blueprint documents.

use blueprint_dialect::{BlueprintDocument, Node, ParseError, TaggedValue, parse};
use blueprint_types::Domain;
use pretty_assertions::assert_eq;

const MOTION_LIGHT: &str = r#"
blueprint:
  name: "Motion-activated Light"
  description: >
    Turn on a light when motion is detected.
  domain: automation
  author: Home Assistant
  homeassistant:
    min_version: 2023.8.0
  input:
    motion_entity:
      name: Motion Sensor
      selector:
        entity:
          filter:
            device_class: motion
            domain: binary_sensor
    light_target:
      name: Light
      selector:
        target:
          entity:
            domain: light
    no_motion_wait:
      name: Wait time
      default: 120

mode: restart
max_exceeded: silent

trigger:
  platform: state
  entity_id: !input motion_entity
  from: "off"
  to: "on"

action:
  - alias: "Turn on the light"
    service: light.turn_on
    target: !input light_target
  - delay: !input no_motion_wait
  - service: notify.mobile
    data:
      token: !secret notify_token
      home: !env_var HOME_DIR
  - !include shared/turn_off.yaml
"#;

#[test]
fn loads_metadata_from_realistic_blueprint() {
    let doc = BlueprintDocument::parse(MOTION_LIGHT).expect("load blueprint");

    assert_eq!(doc.name, "Motion-activated Light");
    assert_eq!(doc.domain, Domain::Automation);
    assert_eq!(
        doc.description.as_deref(),
        Some("Turn on a light when motion is detected.\n")
    );
    assert_eq!(doc.author.as_deref(), Some("Home Assistant"));
    assert_eq!(doc.min_version.as_deref(), Some("2023.8.0"));
}

#[test]
fn placeholders_stay_unresolved_in_body() {
    let root = parse(MOTION_LIGHT).expect("parse");

    let trigger = root.get("trigger").expect("trigger");
    assert_eq!(
        trigger.get("entity_id"),
        Some(&Node::Tagged(TaggedValue::Input("motion_entity".into())))
    );

    let Some(Node::Sequence(actions)) = root.get("action") else {
        panic!("action should be a sequence");
    };
    assert_eq!(actions.len(), 4);
    assert_eq!(
        actions[0].get("target"),
        Some(&Node::Tagged(TaggedValue::Input("light_target".into())))
    );
    let data = actions[2].get("data").expect("data");
    assert_eq!(
        data.get("token"),
        Some(&Node::Tagged(TaggedValue::Secret("notify_token".into())))
    );
    assert_eq!(
        data.get("home"),
        Some(&Node::Tagged(TaggedValue::EnvVar("HOME_DIR".into())))
    );
    assert_eq!(
        actions[3],
        Node::Tagged(TaggedValue::Include("shared/turn_off.yaml".into()))
    );
}

#[test]
fn placeholders_echo_as_text_in_yaml_output() {
    let root = parse("a: !secret pw\nb: [!input x]\n").expect("parse");
    let echoed = serde_yaml::to_string(&root.to_yaml_value()).expect("serialize");
    let reread: serde_yaml::Value = serde_yaml::from_str(&echoed).expect("reparse");
    assert_eq!(reread["a"], serde_yaml::Value::from("SECRET:pw"));
    assert_eq!(reread["b"][0], serde_yaml::Value::from("INPUT:x"));
}

#[test]
fn parse_is_deterministic() {
    assert_eq!(parse(MOTION_LIGHT), parse(MOTION_LIGHT));
}

#[test]
fn syntax_error_reports_position() {
    let broken = "blueprint:\n  name: ok\n  domain: automation\n bad_indent: [\n";
    let err = parse(broken).expect_err("malformed yaml");
    let ParseError::Syntax { message, line, .. } = &err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert!(line.is_some());
    assert!(!message.is_empty());
}
