//! Class classification policy.
//!
//! Every class is routed by name alone into one [`ClassCategory`], which
//! decides the output directory or whether the class gets a file at all.

/// Namespace of classes provided by the framework headers.
pub const FRAMEWORK_PREFIX: &str = "cocos2d::";
/// Legacy dictionary class shipped with the framework headers.
pub const LEGACY_DICTIONARY: &str = "DS_Dictionary";
/// Prefix of framework-style classes declared outside the framework namespace.
pub const NATIVE_CLASS_PREFIX: &str = "CC";
/// Name prefixes of list and table view classes.
pub const CELL_PREFIXES: &[&str] = &["TableView", "BoomListView"];
/// Utility class treated as a toolbox despite its name.
pub const TOOL_CLASS: &str = "LevelTools";

/// Output category of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClassCategory {
    /// Anything not matched by another rule.
    Default,
    /// `...Manager` singletons.
    Manager,
    /// Interface-only delegate types, inlined into the umbrella header.
    Delegate,
    /// `CC...` classes outside the framework namespace.
    NativeCustom,
    /// Framework classes, provided by the framework headers.
    NativeFramework,
    /// `...Layer` scenes and popups.
    Layer,
    /// Table and list cells.
    Cell,
    /// Static helper collections.
    ToolBox,
}

impl ClassCategory {
    /// Every category.
    pub const ALL: [Self; 8] = [
        Self::Default,
        Self::Manager,
        Self::Delegate,
        Self::NativeCustom,
        Self::NativeFramework,
        Self::Layer,
        Self::Cell,
        Self::ToolBox,
    ];

    /// Returns the output directory, or `None` for categories that never
    /// produce a per-class file.
    #[must_use]
    pub const fn directory(self) -> Option<&'static str> {
        match self {
            Self::NativeFramework | Self::Delegate => None,
            Self::Manager => Some("Managers"),
            Self::Cell => Some("Cells"),
            Self::ToolBox => Some("Tools"),
            Self::NativeCustom => Some("CustomCCClasses"),
            Self::Layer => Some("Layers"),
            Self::Default => Some("Common"),
        }
    }

    /// Returns true if classes of this category get their own files.
    #[must_use]
    pub const fn is_emitted(self) -> bool {
        self.directory().is_some()
    }
}

/// Classifies a class by name. First matching rule wins.
#[must_use]
pub fn classify(name: &str) -> ClassCategory {
    let lower = name.to_lowercase();

    if is_framework(name) {
        ClassCategory::NativeFramework
    } else if lower.contains("delegate") {
        ClassCategory::Delegate
    } else if name.starts_with(NATIVE_CLASS_PREFIX) {
        ClassCategory::NativeCustom
    } else if CELL_PREFIXES.iter().any(|p| name.starts_with(p)) || lower.ends_with("cell") {
        ClassCategory::Cell
    } else if lower.ends_with("manager") {
        ClassCategory::Manager
    } else if lower.ends_with("layer") {
        ClassCategory::Layer
    } else if name == TOOL_CLASS || lower.ends_with("toolbox") {
        ClassCategory::ToolBox
    } else {
        ClassCategory::Default
    }
}

/// Returns true for names the framework headers already define.
#[must_use]
pub fn is_framework(name: &str) -> bool {
    name.starts_with(FRAMEWORK_PREFIX) || name.starts_with(LEGACY_DICTIONARY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_rule() {
        assert_eq!(classify("cocos2d::CCNode"), ClassCategory::NativeFramework);
        assert_eq!(classify("cocos2d::CCTouchDelegate"), ClassCategory::NativeFramework);
        assert_eq!(classify("DS_Dictionary"), ClassCategory::NativeFramework);
    }

    #[test]
    fn test_delegate_beats_later_rules() {
        assert_eq!(classify("GJDropDownLayerDelegate"), ClassCategory::Delegate);
        assert_eq!(classify("CCTextInputDelegate"), ClassCategory::Delegate);
        assert_eq!(classify("SomeDELEGATEManager"), ClassCategory::Delegate);
    }

    #[test]
    fn test_native_custom_beats_layer() {
        assert_eq!(classify("CCMenuItemSpriteExtra"), ClassCategory::NativeCustom);
        assert_eq!(classify("CCBlockLayer"), ClassCategory::NativeCustom);
    }

    #[test]
    fn test_cell_rules() {
        assert_eq!(classify("TableViewCell"), ClassCategory::Cell);
        assert_eq!(classify("TableView"), ClassCategory::Cell);
        assert_eq!(classify("BoomListView"), ClassCategory::Cell);
        assert_eq!(classify("LevelCell"), ClassCategory::Cell);
        assert_eq!(classify("GJCommentCELL"), ClassCategory::Cell);
        assert_eq!(classify("ManagerCell"), ClassCategory::Cell);
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(classify("GameManager"), ClassCategory::Manager);
        assert_eq!(classify("CellManager"), ClassCategory::Manager);
        assert_eq!(classify("PlayLayer"), ClassCategory::Layer);
        assert_eq!(classify("LevelTools"), ClassCategory::ToolBox);
        assert_eq!(classify("EditorToolBox"), ClassCategory::ToolBox);
        assert_eq!(classify("GameObject"), ClassCategory::Default);
        assert_eq!(classify("LevelTool"), ClassCategory::Default);
    }

    #[test]
    fn test_classify_is_deterministic() {
        for name in ["PlayerManager", "SomeDelegate", "cocos2d::CCSprite", "X", ""] {
            let first = classify(name);
            assert_eq!(classify(name), first);
            assert!(ClassCategory::ALL.contains(&first));
        }
    }

    #[test]
    fn test_directories() {
        assert_eq!(ClassCategory::Manager.directory(), Some("Managers"));
        assert_eq!(ClassCategory::Cell.directory(), Some("Cells"));
        assert_eq!(ClassCategory::ToolBox.directory(), Some("Tools"));
        assert_eq!(ClassCategory::NativeCustom.directory(), Some("CustomCCClasses"));
        assert_eq!(ClassCategory::Layer.directory(), Some("Layers"));
        assert_eq!(ClassCategory::Default.directory(), Some("Common"));
        assert!(!ClassCategory::Delegate.is_emitted());
        assert!(!ClassCategory::NativeFramework.is_emitted());
    }
}
