//! End-to-end generation tests against temporary output trees.

use bromastub_codegen::{CodegenError, GeneratorConfig, generate_from_files, generate_from_str};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const DESCRIPTION: &str = r#"
class cocos2d::CCNode {
    virtual bool init() = win 0x10;
}

class PlayerManager {
    int health;
    virtual void update();
}

class SomeDelegate {
    static int getValue();
}

class MenuLayer : cocos2d::CCLayer, FLAlertLayerProtocol {
    static MenuLayer* create() = win 0x100;
    void onQuit(cocos2d::CCObject* sender) = win 0x200;
    virtual bool init() = win 0x300;
    PAD = win 0x10;
    TodoReturn onMystery(gd::string key);
}

class LevelCell : TableViewCell {
    void loadFromLevel(GJGameLevel* level);
}

class GameToolbox {
    static gd::string intToString(int value);
}

class CCMenuItemSpriteExtra : cocos2d::CCMenuItemSprite {
    void setSizeMult(float mult);
}

class GameObject {
    gd::string m_name;
    bool isVisible() = win inline { return m_node->isVisible() && !m_hidden; }
}

class TextAlertDelegate {
    virtual void textChanged(gd::string text);
}
"#;

fn config(dir: &Path) -> GeneratorConfig {
    GeneratorConfig::new().output_root(dir)
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).expect("Failed to read output file")
}

fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, String>) {
        for entry in fs::read_dir(dir).expect("Failed to list directory") {
            let path = entry.expect("Failed to read entry").path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                let rel = path.strip_prefix(root).expect("Path outside root").to_path_buf();
                out.insert(rel, read(&path));
            }
        }
    }
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

#[test]
fn test_player_manager_example() {
    let dir = tempdir().expect("Failed to create temp dir");
    generate_from_str(DESCRIPTION, config(dir.path())).expect("Failed to generate");

    let header = read(dir.path().join("headers/Managers/PlayerManager.h"));
    assert!(header.starts_with("#ifndef __PLAYERMANAGER_H__\n#define __PLAYERMANAGER_H__"));
    assert!(header.contains("    int health;\n    virtual void update();\n};"));
    assert!(header.ends_with("#endif /* __PLAYERMANAGER_H__ */"));

    let source = read(dir.path().join("src/Managers/PlayerManager.cpp"));
    assert!(source.contains("void PlayerManager::update() { return; }"));
}

#[test]
fn test_delegate_example() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = generate_from_str(DESCRIPTION, config(dir.path())).expect("Failed to generate");

    assert_eq!(report.delegates, vec!["SomeDelegate", "TextAlertDelegate"]);
    for dir_name in ["Common", "Managers", "Layers"] {
        assert!(!dir.path().join(format!("headers/{dir_name}/SomeDelegate.h")).exists());
    }

    let umbrella = read(&report.umbrella);
    assert_eq!(umbrella.matches("class SomeDelegate {").count(), 1);
    assert!(umbrella.contains("class SomeDelegate {\npublic:\n    static int getValue();\n};"));
    assert!(umbrella.contains("    virtual void textChanged(std::string text);"));
}

#[test]
fn test_pad_example() {
    let dir = tempdir().expect("Failed to create temp dir");
    generate_from_str(DESCRIPTION, config(dir.path())).expect("Failed to generate");

    let header = read(dir.path().join("headers/Layers/MenuLayer.h"));
    let lines: Vec<_> = header.lines().collect();
    let pad = lines
        .iter()
        .position(|l| l.trim() == "/* PAD */")
        .expect("PAD comment missing");
    assert_eq!(lines[pad + 1], "");
    assert_eq!(lines[pad + 2], "    TodoReturn onMystery(std::string key);");
}

#[test]
fn test_framework_classes_produce_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = generate_from_str(DESCRIPTION, config(dir.path())).expect("Failed to generate");

    assert!(report.headers.iter().all(|p| !p.to_string_lossy().contains("CCNode")));
    assert_eq!(report.headers.len(), report.sources.len());
    assert_eq!(report.headers.len(), 6);
}

#[test]
fn test_routing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = generate_from_str(DESCRIPTION, config(dir.path())).expect("Failed to generate");

    assert_eq!(
        report.includes,
        vec![
            "Managers/PlayerManager.h",
            "Layers/MenuLayer.h",
            "Cells/LevelCell.h",
            "Tools/GameToolbox.h",
            "CustomCCClasses/CCMenuItemSpriteExtra.h",
            "Common/GameObject.h",
        ]
    );
    assert!(dir.path().join("src/CustomCCClasses/CCMenuItemSpriteExtra.cpp").is_file());
}

#[test]
fn test_stubs_sorted_and_sentinel_commented() {
    let dir = tempdir().expect("Failed to create temp dir");
    generate_from_str(DESCRIPTION, config(dir.path())).expect("Failed to generate");

    let source = read(dir.path().join("src/Layers/MenuLayer.cpp"));
    let init = source.find("MenuLayer::init").expect("init missing");
    let create = source.find("MenuLayer::create").expect("create missing");
    let on_mystery = source.find("MenuLayer::onMystery").expect("onMystery missing");
    let on_quit = source.find("MenuLayer::onQuit").expect("onQuit missing");
    assert!(create < init && init < on_mystery && on_mystery < on_quit);

    assert!(source.contains("/* Unknown Return: MenuLayer::onMystery(std::string key){}; */"));
    assert!(!source.contains("TodoReturn MenuLayer::onMystery"));
    assert!(source.contains("MenuLayer* MenuLayer::create() { return; }"));
}

#[test]
fn test_inline_bodies_do_not_leak() {
    let dir = tempdir().expect("Failed to create temp dir");
    generate_from_str(DESCRIPTION, config(dir.path())).expect("Failed to generate");

    let header = read(dir.path().join("headers/Common/GameObject.h"));
    assert!(header.contains("    std::string m_name;\n    bool isVisible();\n};"));
    let source = read(dir.path().join("src/Common/GameObject.cpp"));
    assert!(source.contains("bool GameObject::isVisible() { return; }"));
    assert!(!source.contains("m_node->"));
}

#[test]
fn test_no_framework_forward_declarations() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = generate_from_str(DESCRIPTION, config(dir.path())).expect("Failed to generate");

    for header in &report.headers {
        let text = read(header);
        assert!(!text.contains("class cocos2d::"), "{}", header.display());
    }
    let menu = read(dir.path().join("headers/Layers/MenuLayer.h"));
    assert!(menu.contains("class FLAlertLayerProtocol;"));
}

#[test]
fn test_umbrella_lists_every_header_once() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = generate_from_str(DESCRIPTION, config(dir.path())).expect("Failed to generate");
    let umbrella = read(&report.umbrella);

    for include in &report.includes {
        let line = format!("#include \"{include}\"");
        assert_eq!(umbrella.matches(&line).count(), 1, "{include}");
    }

    let sections: Vec<_> = umbrella
        .lines()
        .filter_map(|l| l.strip_prefix("/* ")?.strip_suffix(" */"))
        .filter(|s| {
            !matches!(
                *s,
                "External Resources" | "Macros" | "Delegates" | "Enums" | "Forward Declarations"
            )
        })
        .collect();
    assert_eq!(
        sections,
        vec!["Cells", "Common", "CustomCCClasses", "Layers", "Managers", "Tools"]
    );
}

#[test]
fn test_idempotent() {
    let first = tempdir().expect("Failed to create temp dir");
    let second = tempdir().expect("Failed to create temp dir");

    generate_from_str(DESCRIPTION, config(first.path())).expect("Failed to generate");
    generate_from_str(DESCRIPTION, config(second.path())).expect("Failed to generate");
    let before = snapshot(first.path());
    assert_eq!(before, snapshot(second.path()));

    generate_from_str(DESCRIPTION, config(first.path())).expect("Failed to regenerate");
    assert_eq!(before, snapshot(first.path()));
}

#[test]
fn test_generate_from_files_concatenates() {
    let dir = tempdir().expect("Failed to create temp dir");
    let a = dir.path().join("a.bro");
    let b = dir.path().join("b.bro");
    fs::write(&a, "class GameManager { void save(); }").expect("Failed to write input");
    fs::write(&b, "class PlayLayer { void resetLevel(); }").expect("Failed to write input");

    let out = dir.path().join("out");
    let report = generate_from_files(&[&a, &b], config(&out)).expect("Failed to generate");
    assert_eq!(report.includes, vec!["Managers/GameManager.h", "Layers/PlayLayer.h"]);
}

#[test]
fn test_missing_input_writes_nothing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let present = dir.path().join("present.bro");
    fs::write(&present, "class GameManager {}").expect("Failed to write input");
    let missing = dir.path().join("missing.bro");

    let out = dir.path().join("out");
    let err = generate_from_files(&[&present, &missing], config(&out)).unwrap_err();
    assert!(matches!(err, CodegenError::InputMissing { ref path } if *path == missing));
    assert!(!out.exists());
}

#[test]
fn test_parse_error_surfaces() {
    let dir = tempdir().expect("Failed to create temp dir");
    let err = generate_from_str("class Broken { int m_a }", config(dir.path())).unwrap_err();
    assert!(matches!(err, CodegenError::Parse(_)));
    assert!(!dir.path().join("headers").exists());
}
