//! Target platforms and build configurations.
//!
//! Both are closed enumerations named after the engine-side values they
//! mirror. Which of them are actually supported is decided by the lookup
//! tables in [`crate::core::layout`], not here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    Win64,
    Linux,
    LinuxArm64,
    Mac,
    #[serde(rename = "IOS")]
    Ios,
    Android,
    #[serde(rename = "TVOS")]
    TvOs,
    #[serde(rename = "VisionOS")]
    VisionOs,
}

impl Platform {
    /// Every platform, in declaration order.
    pub const ALL: [Platform; 8] = [
        Platform::Win64,
        Platform::Linux,
        Platform::LinuxArm64,
        Platform::Mac,
        Platform::Ios,
        Platform::Android,
        Platform::TvOs,
        Platform::VisionOs,
    ];

    /// The directory token used under `Installs/<spec>/`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Win64 => "Win64",
            Platform::Linux => "Linux",
            Platform::LinuxArm64 => "LinuxArm64",
            Platform::Mac => "Mac",
            Platform::Ios => "IOS",
            Platform::Android => "Android",
            Platform::TvOs => "TVOS",
            Platform::VisionOs => "VisionOS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Platform::ALL.iter().map(|p| p.as_str()).collect();
                format!(
                    "unknown platform '{}'; expected one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}

/// A build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Configuration {
    Debug,
    DebugGame,
    Development,
    Shipping,
    Test,
    /// Placeholder configuration; never mapped to an install directory.
    Unknown,
}

impl Configuration {
    /// Every configuration, in declaration order.
    pub const ALL: [Configuration; 6] = [
        Configuration::Debug,
        Configuration::DebugGame,
        Configuration::Development,
        Configuration::Shipping,
        Configuration::Test,
        Configuration::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::DebugGame => "DebugGame",
            Configuration::Development => "Development",
            Configuration::Shipping => "Shipping",
            Configuration::Test => "Test",
            Configuration::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Configuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Configuration::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Configuration::ALL.iter().map(|c| c.as_str()).collect();
                format!(
                    "unknown configuration '{}'; expected one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}
