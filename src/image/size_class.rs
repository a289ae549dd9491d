//! Size classification inferred from trailing filename suffixes.

/// Enumerated classification derived from a filename suffix, driving the
/// idiom, fixed size and screen-width defaults of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    /// 42mm watch variant, `-42` suffix.
    Watch42,
    /// 38mm watch variant, `-38` suffix.
    Watch38,
    /// Notification icon, `-20` suffix.
    Notification,
    /// Settings icon, `-29` suffix.
    Settings,
    /// Spotlight icon, `-40` suffix.
    Spotlight,
    /// iPhone app icon, `-60` suffix.
    IphoneAppIcon,
    /// iPad app icon, `-76` suffix.
    IpadAppIcon,
    /// iPad Pro app icon, `-83.5` suffix.
    IpadProAppIcon,
    /// App Store marketing preview, `-1024` suffix.
    MarketingPreview,
    /// No recognised suffix.
    Universal,
}

/// Ordered suffix dispatch table; scanned top to bottom, first match wins.
const SUFFIX_RULES: [(&str, SizeClass); 9] = [
    ("-42", SizeClass::Watch42),
    ("-38", SizeClass::Watch38),
    ("-20", SizeClass::Notification),
    ("-29", SizeClass::Settings),
    ("-40", SizeClass::Spotlight),
    ("-60", SizeClass::IphoneAppIcon),
    ("-76", SizeClass::IpadAppIcon),
    ("-83.5", SizeClass::IpadProAppIcon),
    ("-1024", SizeClass::MarketingPreview),
];

impl SizeClass {
    /// Match a trailing size suffix, returning the class and the name with
    /// the suffix removed. Names without a recognised suffix classify as
    /// [`SizeClass::Universal`] and are returned unchanged.
    pub fn match_suffix(name: &str) -> (SizeClass, &str) {
        for (suffix, size_class) in SUFFIX_RULES {
            if let Some(stripped) = name.strip_suffix(suffix) {
                return (size_class, stripped);
            }
        }

        (SizeClass::Universal, name)
    }

    /// Idiom intrinsic to the size class, if it defines one.
    pub fn idiom(self) -> Option<&'static str> {
        match self {
            Self::Watch42 | Self::Watch38 => Some("watch"),
            Self::IphoneAppIcon => Some("iphone"),
            Self::IpadAppIcon | Self::IpadProAppIcon => Some("ipad"),
            Self::MarketingPreview => Some("ios-marketing"),
            _ => None,
        }
    }

    /// Fixed point size written to the manifest, if the class defines one.
    pub fn size_string(self) -> Option<&'static str> {
        match self {
            Self::Notification => Some("20x20"),
            Self::Settings => Some("29x29"),
            Self::Spotlight => Some("40x40"),
            Self::IphoneAppIcon => Some("60x60"),
            Self::IpadAppIcon => Some("76x76"),
            Self::IpadProAppIcon => Some("83.5x83.5"),
            Self::MarketingPreview => Some("1024x1024"),
            _ => None,
        }
    }

    /// Screen-width marker written to the manifest; watch variants only.
    pub fn screen_width(self) -> Option<&'static str> {
        match self {
            Self::Watch38 => Some("<=145"),
            Self::Watch42 => Some(">145"),
            _ => None,
        }
    }

    /// Classifier matched against `device-type` entries in the configuration.
    pub fn device_type(self) -> &'static str {
        match self {
            Self::Watch42 | Self::Watch38 => "watch",
            Self::IphoneAppIcon => "iPhone",
            Self::IpadAppIcon | Self::IpadProAppIcon => "iPad",
            _ => "universal",
        }
    }

    /// Watch variants always render at a fixed `2x` scale.
    pub fn is_watch(self) -> bool {
        matches!(self, Self::Watch42 | Self::Watch38)
    }
}
