//! Device idiom identifiers shared by manifests and configuration rules.

/// Target device classifier embedded in generated manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceIdiom {
    /// Apple Watch.
    Watch,
    /// iPhone and iPod touch.
    Iphone,
    /// iPad.
    Ipad,
}

impl DeviceIdiom {
    /// Every recognised idiom, in declaration order.
    pub const ALL: [DeviceIdiom; 3] = [Self::Watch, Self::Iphone, Self::Ipad];

    /// Parse a configured idiom string, compared case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|idiom| idiom.idiom_string().eq_ignore_ascii_case(value))
    }

    /// Value written to the `idiom` key of generated manifests.
    pub fn idiom_string(self) -> &'static str {
        match self {
            Self::Watch => "watch",
            Self::Iphone => "iphone",
            Self::Ipad => "ipad",
        }
    }

    /// Value matched against `device-type` entries in the configuration.
    pub fn configuration_key(self) -> &'static str {
        match self {
            Self::Watch => "watch",
            Self::Iphone => "iPhone",
            Self::Ipad => "iPad",
        }
    }
}
