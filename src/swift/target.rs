//! Swift platform flavors for generated accessor code.

use std::str::FromStr;

/// Platform flavor the generated accessors compile against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwiftTarget {
    /// macOS, `NSImage` via Cocoa.
    Cocoa,
    /// iPhone and iPad, `UIImage` via UIKit.
    Ios,
    /// Apple Watch, `UIImage` via ClockKit.
    Watch,
}

impl SwiftTarget {
    /// Framework imported by the generated file.
    pub fn library_name(self) -> &'static str {
        match self {
            Self::Cocoa => "Cocoa",
            Self::Ios => "UIKit",
            Self::Watch => "ClockKit",
        }
    }

    /// Image class the generated accessors resolve to.
    pub fn image_class_name(self) -> &'static str {
        match self {
            Self::Cocoa => "NSImage",
            Self::Ios | Self::Watch => "UIImage",
        }
    }
}

impl FromStr for SwiftTarget {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "cocoa" | "macos" => Ok(Self::Cocoa),
            "ios" => Ok(Self::Ios),
            "watch" | "watchos" => Ok(Self::Watch),
            _ => Err(format!(
                "unknown Swift target `{value}`, expected cocoa, ios or watch"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_target_names_case_insensitively() {
        assert_eq!("iOS".parse::<SwiftTarget>().unwrap(), SwiftTarget::Ios);
        assert_eq!("COCOA".parse::<SwiftTarget>().unwrap(), SwiftTarget::Cocoa);
        assert_eq!("watchos".parse::<SwiftTarget>().unwrap(), SwiftTarget::Watch);
        assert!("android".parse::<SwiftTarget>().is_err());
    }

    #[test]
    fn cocoa_uses_nsimage() {
        assert_eq!(SwiftTarget::Cocoa.image_class_name(), "NSImage");
        assert_eq!(SwiftTarget::Ios.image_class_name(), "UIImage");
        assert_eq!(SwiftTarget::Watch.library_name(), "ClockKit");
    }
}
